use std::fmt::Write as _;

use serde_json::{Map as JsonMap, Value as JsonValue};
use tra_core::{
    Catalog, CheckpointLocation, DecodeIssue, DecodeIssueKind, Decoded, LevelGroup,
    SelectionState, encode,
};

const SHEET_WIDTH: usize = 60;
const LABEL_WIDTH: usize = 13;
const OPTION_CAPTION_WIDTH: usize = 24;
const MAIN_MENU_LABEL: &str = "Main Menu";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    CanonicalV1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRenderOptions {
    /// List disabled advanced options too.
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSection {
    Levels,
    Outfits,
    AdvancedOptions,
}

pub fn render_selection_json(
    state: &SelectionState,
    catalog: &Catalog,
    style: JsonStyle,
) -> JsonValue {
    let location = state
        .checkpoint()
        .and_then(|id| catalog.find_level_checkpoint(id));
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Object(selection_json(state, catalog, location)),
    }
}

/// Like [`render_selection_json`], plus the decode verdict and any issues.
pub fn render_decoded_json(decoded: &Decoded<'_>, style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => {
            let mut out = JsonMap::new();
            out.insert("ok".to_string(), JsonValue::Bool(decoded.ok));
            out.insert("issues".to_string(), issues_to_json(&decoded.issues));
            out.extend(selection_json(
                &decoded.state,
                decoded.catalog(),
                decoded.checkpoint_location,
            ));
            JsonValue::Object(out)
        }
    }
}

pub fn render_selection_text(
    state: &SelectionState,
    catalog: &Catalog,
    options: TextRenderOptions,
) -> String {
    let location = state
        .checkpoint()
        .and_then(|id| catalog.find_level_checkpoint(id));
    render_sheet(state, catalog, location, options)
}

/// Summary sheet followed by the rejected tokens, if any.
pub fn render_decoded_text(decoded: &Decoded<'_>, options: TextRenderOptions) -> String {
    let mut out = render_sheet(
        &decoded.state,
        decoded.catalog(),
        decoded.checkpoint_location,
        options,
    );
    if !decoded.issues.is_empty() {
        writeln!(&mut out).expect("writing to String cannot fail");
        writeln!(&mut out, " ::: Rejected Tokens :::").expect("writing to String cannot fail");
        out.push_str(&render_decode_issues(&decoded.issues));
    }
    out
}

/// One line per issue, each terminated by a newline.
pub fn render_decode_issues(issues: &[DecodeIssue]) -> String {
    let mut out = String::new();
    for issue in issues {
        writeln!(&mut out, "  {issue}").expect("writing to String cannot fail");
    }
    out
}

pub fn render_catalog_text(catalog: &Catalog, section: CatalogSection) -> String {
    let mut out = String::new();
    match section {
        CatalogSection::Levels => {
            for group in catalog.level_groups() {
                writeln!(&mut out, "{}", group.name).expect("writing to String cannot fail");
                match &group.checkpoints {
                    None => {
                        writeln!(&mut out, "  -").expect("writing to String cannot fail");
                    }
                    Some(list) => {
                        for entry in list {
                            writeln!(&mut out, "  {:<16}{}", entry.id, entry.caption)
                                .expect("writing to String cannot fail");
                        }
                    }
                }
            }
        }
        CatalogSection::Outfits => {
            for outfit in catalog.outfits() {
                writeln!(
                    &mut out,
                    "{:<16}{}",
                    outfit.id.as_deref().unwrap_or("-"),
                    outfit.caption
                )
                .expect("writing to String cannot fail");
            }
        }
        CatalogSection::AdvancedOptions => {
            for option in catalog.advanced_options() {
                let flag = if option.takes_parameter {
                    format!("{} <VALUE>", option.flag)
                } else {
                    option.flag.clone()
                };
                writeln!(&mut out, "{:<28}{}", flag, option.caption)
                    .expect("writing to String cannot fail");
            }
        }
    }
    out
}

pub fn render_catalog_json(catalog: &Catalog, section: CatalogSection) -> JsonValue {
    match section {
        CatalogSection::Levels => JsonValue::Array(
            catalog
                .level_groups()
                .iter()
                .map(level_group_to_json)
                .collect(),
        ),
        CatalogSection::Outfits => JsonValue::Array(
            catalog
                .outfits()
                .iter()
                .map(|outfit| {
                    let mut entry = JsonMap::new();
                    entry.insert("id".to_string(), optional_string(outfit.id.as_deref()));
                    entry.insert(
                        "caption".to_string(),
                        JsonValue::String(outfit.caption.clone()),
                    );
                    JsonValue::Object(entry)
                })
                .collect(),
        ),
        CatalogSection::AdvancedOptions => JsonValue::Array(
            catalog
                .advanced_options()
                .iter()
                .map(|option| {
                    let mut entry = JsonMap::new();
                    entry.insert("flag".to_string(), JsonValue::String(option.flag.clone()));
                    entry.insert(
                        "caption".to_string(),
                        JsonValue::String(option.caption.clone()),
                    );
                    entry.insert(
                        "takes_parameter".to_string(),
                        JsonValue::Bool(option.takes_parameter),
                    );
                    JsonValue::Object(entry)
                })
                .collect(),
        ),
    }
}

/// The whole catalog keyed by section.
pub fn render_full_catalog_json(catalog: &Catalog) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert(
        "levels".to_string(),
        render_catalog_json(catalog, CatalogSection::Levels),
    );
    out.insert(
        "outfits".to_string(),
        render_catalog_json(catalog, CatalogSection::Outfits),
    );
    out.insert(
        "advanced_options".to_string(),
        render_catalog_json(catalog, CatalogSection::AdvancedOptions),
    );
    JsonValue::Object(out)
}

fn selection_json(
    state: &SelectionState,
    catalog: &Catalog,
    location: Option<CheckpointLocation<'_>>,
) -> JsonMap<String, JsonValue> {
    let mut out = JsonMap::new();

    out.insert("checkpoint".to_string(), optional_string(state.checkpoint()));
    out.insert(
        "level_group".to_string(),
        JsonValue::String(
            location
                .map(|l| l.group)
                .unwrap_or(MAIN_MENU_LABEL)
                .to_string(),
        ),
    );
    out.insert(
        "checkpoint_caption".to_string(),
        optional_string(location.map(|l| l.entry.caption.as_str())),
    );
    out.insert("outfit".to_string(), optional_string(state.outfit()));
    out.insert(
        "outfit_caption".to_string(),
        optional_string(catalog.outfit_caption(state.outfit())),
    );

    let mut advanced = JsonMap::new();
    for option in catalog.advanced_options() {
        let Some(setting) = state.advanced(&option.flag) else {
            continue;
        };
        let mut entry = JsonMap::new();
        entry.insert("enabled".to_string(), JsonValue::Bool(setting.enabled));
        if option.takes_parameter {
            entry.insert(
                "parameter".to_string(),
                optional_string(setting.parameter.as_deref()),
            );
        }
        advanced.insert(option.flag.clone(), JsonValue::Object(entry));
    }
    out.insert("advanced".to_string(), JsonValue::Object(advanced));
    out.insert(
        "arguments".to_string(),
        JsonValue::String(encode(state, catalog)),
    );

    out
}

fn level_group_to_json(group: &LevelGroup) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert("name".to_string(), JsonValue::String(group.name.clone()));
    out.insert(
        "checkpoints".to_string(),
        match &group.checkpoints {
            None => JsonValue::Null,
            Some(list) => JsonValue::Array(
                list.iter()
                    .map(|entry| {
                        let mut item = JsonMap::new();
                        item.insert("id".to_string(), JsonValue::String(entry.id.clone()));
                        item.insert(
                            "caption".to_string(),
                            JsonValue::String(entry.caption.clone()),
                        );
                        JsonValue::Object(item)
                    })
                    .collect(),
            ),
        },
    );
    JsonValue::Object(out)
}

fn issues_to_json(issues: &[DecodeIssue]) -> JsonValue {
    JsonValue::Array(
        issues
            .iter()
            .map(|issue| {
                let mut entry = JsonMap::new();
                entry.insert(
                    "kind".to_string(),
                    JsonValue::String(issue_kind_name(issue.kind).to_string()),
                );
                entry.insert("token".to_string(), JsonValue::String(issue.token.clone()));
                entry.insert("position".to_string(), JsonValue::from(issue.position));
                JsonValue::Object(entry)
            })
            .collect(),
    )
}

fn issue_kind_name(kind: DecodeIssueKind) -> &'static str {
    match kind {
        DecodeIssueKind::UnrecognizedToken => "unrecognized_token",
        DecodeIssueKind::TruncatedParameter => "truncated_parameter",
    }
}

fn optional_string(value: Option<&str>) -> JsonValue {
    match value {
        Some(v) => JsonValue::String(v.to_string()),
        None => JsonValue::Null,
    }
}

fn render_sheet(
    state: &SelectionState,
    catalog: &Catalog,
    location: Option<CheckpointLocation<'_>>,
    options: TextRenderOptions,
) -> String {
    let mut out = String::new();
    writeln!(&mut out).expect("writing to String cannot fail");
    writeln!(
        &mut out,
        "{}",
        centered_no_trailing("TOMB RAIDER: ANNIVERSARY", SHEET_WIDTH)
    )
    .expect("writing to String cannot fail");
    writeln!(
        &mut out,
        "{}",
        centered_no_trailing("LAUNCH CONFIGURATION", SHEET_WIDTH)
    )
    .expect("writing to String cannot fail");
    writeln!(&mut out).expect("writing to String cannot fail");

    let level = location.map(|l| l.group).unwrap_or(MAIN_MENU_LABEL);
    let checkpoint = match (state.checkpoint(), location) {
        (Some(id), Some(l)) => format!("{} ({id})", l.entry.caption),
        (Some(id), None) => id.to_string(),
        (None, _) => "-".to_string(),
    };
    let outfit_caption = catalog.outfit_caption(state.outfit()).unwrap_or("Unknown");
    let outfit = match state.outfit() {
        Some(id) => format!("{outfit_caption} ({id})"),
        None => outfit_caption.to_string(),
    };

    write_field(&mut out, "Level:", level);
    write_field(&mut out, "Checkpoint:", &checkpoint);
    write_field(&mut out, "Outfit:", &outfit);
    writeln!(&mut out).expect("writing to String cannot fail");

    writeln!(&mut out, " ::: Advanced Options :::").expect("writing to String cannot fail");
    let mut listed = 0usize;
    for option in catalog.advanced_options() {
        let setting = state.advanced(&option.flag);
        let enabled = setting.is_some_and(|s| s.enabled);
        if !enabled && !options.verbose {
            continue;
        }
        let mark = if enabled { 'x' } else { ' ' };
        let mut line = format!(
            "  [{mark}] {:<width$}{}",
            option.caption,
            option.flag,
            width = OPTION_CAPTION_WIDTH
        );
        if enabled && option.takes_parameter {
            let value = setting.and_then(|s| s.parameter.as_deref()).unwrap_or("");
            write!(&mut line, " \"{value}\"").expect("writing to String cannot fail");
        }
        writeln!(&mut out, "{line}").expect("writing to String cannot fail");
        listed += 1;
    }
    if listed == 0 {
        writeln!(&mut out, "  (none)").expect("writing to String cannot fail");
    }
    writeln!(&mut out).expect("writing to String cannot fail");

    let arguments = encode(state, catalog);
    write_field(
        &mut out,
        "Arguments:",
        if arguments.is_empty() { "(none)" } else { &arguments },
    );
    out
}

fn write_field(out: &mut String, label: &str, value: &str) {
    writeln!(out, "  {label:<width$}{value}", width = LABEL_WIDTH)
        .expect("writing to String cannot fail");
}

fn centered_no_trailing(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.to_string();
    }

    let left_padding = (width - len) / 2;
    format!("{}{}", " ".repeat(left_padding), value)
}
