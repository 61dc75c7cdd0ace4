mod config_file;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, ArgGroup, Parser};
use log::{LevelFilter, debug, info};
use tra_core::{Catalog, SelectionState, decode_config_text, encode};
use tra_render::{
    CatalogSection, JsonStyle, TextRenderOptions, render_catalog_json, render_catalog_text,
    render_decode_issues, render_selection_json, render_selection_text,
};

use crate::config_file::{
    config_path_for_executable, read_config_text, remove_config, write_config_text,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
#[command(group(
    ArgGroup::new("listing")
        .multiple(true)
        .conflicts_with_all([
            "config", "exe", "level", "group", "checkpoint", "main_menu", "outfit",
            "default_outfit", "enable", "disable", "param", "reset", "keep_partial",
            "strict", "print_args", "all_options",
        ])
))]
struct Cli {
    /// Path to TRAE.arg
    #[arg(value_name = "TRAE.arg", conflicts_with = "exe")]
    config: Option<PathBuf>,
    /// Locate TRAE.arg from the game executable instead
    #[arg(long, value_name = "tra.exe")]
    exe: Option<PathBuf>,
    #[arg(long, value_name = "ID", conflicts_with_all = ["group", "main_menu"])]
    level: Option<String>,
    #[arg(long, value_name = "NAME", requires = "checkpoint")]
    group: Option<String>,
    /// Row within --group, starting at 0
    #[arg(long, value_name = "ROW", requires = "group")]
    checkpoint: Option<usize>,
    #[arg(long = "main-menu", conflicts_with = "group")]
    main_menu: bool,
    #[arg(long, value_name = "ID", conflicts_with = "default_outfit")]
    outfit: Option<String>,
    #[arg(long = "default-outfit")]
    default_outfit: bool,
    #[arg(long, value_name = "FLAG", allow_hyphen_values = true)]
    enable: Vec<String>,
    #[arg(long, value_name = "FLAG", allow_hyphen_values = true)]
    disable: Vec<String>,
    #[arg(
        long,
        value_name = "FLAG=VALUE",
        allow_hyphen_values = true,
        value_parser = parse_param
    )]
    param: Vec<(String, String)>,
    /// Delete TRAE.arg
    #[arg(long)]
    reset: bool,
    /// Keep whatever could be recovered from a malformed file
    #[arg(long = "keep-partial", conflicts_with = "strict")]
    keep_partial: bool,
    /// Treat a malformed file as an error
    #[arg(long)]
    strict: bool,
    #[arg(long)]
    json: bool,
    /// Print the argument line only
    #[arg(long = "args", conflicts_with = "json")]
    print_args: bool,
    /// Also list disabled advanced options
    #[arg(long = "all-options")]
    all_options: bool,
    #[arg(long = "list-levels", group = "listing")]
    list_levels: bool,
    #[arg(long = "list-outfits", group = "listing")]
    list_outfits: bool,
    #[arg(long = "list-options", group = "listing")]
    list_options: bool,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn has_edits(&self) -> bool {
        self.level.is_some()
            || self.group.is_some()
            || self.main_menu
            || self.outfit.is_some()
            || self.default_outfit
            || !self.enable.is_empty()
            || !self.disable.is_empty()
            || !self.param.is_empty()
    }

    fn listing_sections(&self) -> Vec<CatalogSection> {
        let mut sections = Vec::new();
        if self.list_levels {
            sections.push(CatalogSection::Levels);
        }
        if self.list_outfits {
            sections.push(CatalogSection::Outfits);
        }
        if self.list_options {
            sections.push(CatalogSection::AdvancedOptions);
        }
        sections
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = Catalog::builtin();

    let sections = cli.listing_sections();
    if !sections.is_empty() {
        print_listings(catalog, &sections, cli.json);
        return;
    }

    let has_edits = cli.has_edits();
    if cli.reset && has_edits {
        eprintln!("--reset cannot be combined with edits");
        process::exit(2);
    }

    let path = match (&cli.config, &cli.exe) {
        (Some(path), _) => path.clone(),
        (None, Some(exe)) => config_path_for_executable(exe).unwrap_or_else(|e| {
            eprintln!("Error resolving {}: {e}", exe.display());
            process::exit(1);
        }),
        (None, None) => {
            eprintln!("a TRAE.arg path or --exe <PATH> is required");
            process::exit(2);
        }
    };
    debug!("configuration file: {}", path.display());

    if cli.reset {
        match remove_config(&path) {
            Ok(true) => println!("Removed {}", path.display()),
            Ok(false) => println!("Nothing to remove at {}", path.display()),
            Err(e) => {
                eprintln!("Error removing {}: {e}", path.display());
                process::exit(1);
            }
        }
        return;
    }

    let text = read_config_text(&path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", path.display());
        process::exit(1);
    });
    if text.is_none() {
        info!("{} does not exist, starting from defaults", path.display());
    }

    let decoded = decode_config_text(text.as_deref(), catalog);
    if !decoded.ok {
        eprintln!("Could not load configuration from {}", path.display());
        eprint!("{}", render_decode_issues(&decoded.issues));
        if cli.strict {
            process::exit(1);
        }
    }
    let mut state = if cli.keep_partial {
        decoded.state
    } else {
        decoded.state_or_default()
    };

    if has_edits {
        apply_edits(&cli, catalog, &mut state);
        let line = encode(&state, catalog);
        write_config_text(&path, &line).unwrap_or_else(|e| {
            eprintln!("Error writing {}: {e}", path.display());
            process::exit(1);
        });
        info!("wrote '{line}' to {}", path.display());
    }

    if cli.print_args {
        println!("{}", encode(&state, catalog));
        return;
    }

    if cli.json {
        let json = render_selection_json(&state, catalog, JsonStyle::CanonicalV1);
        let rendered = serde_json::to_string_pretty(&json).unwrap_or_else(|e| {
            eprintln!("Error rendering JSON output: {e}");
            process::exit(1);
        });
        println!("{rendered}");
        return;
    }

    if has_edits {
        println!("Wrote configuration to {}", path.display());
    }
    print!(
        "{}",
        render_selection_text(
            &state,
            catalog,
            TextRenderOptions {
                verbose: cli.all_options,
            },
        )
    );
}

fn apply_edits(cli: &Cli, catalog: &Catalog, state: &mut SelectionState) {
    if let Some(level) = &cli.level {
        state
            .set_checkpoint(catalog, Some(level.as_str()))
            .unwrap_or_else(|e| {
                eprintln!("Error applying level edit: {e}");
                process::exit(1);
            });
    }
    if let (Some(group), Some(row)) = (&cli.group, cli.checkpoint) {
        state.select_level(catalog, group, row).unwrap_or_else(|e| {
            eprintln!("Error applying level edit: {e}");
            process::exit(1);
        });
    }
    if cli.main_menu {
        state.set_checkpoint(catalog, None).unwrap_or_else(|e| {
            eprintln!("Error applying level edit: {e}");
            process::exit(1);
        });
    }
    if let Some(outfit) = &cli.outfit {
        state
            .set_outfit(catalog, Some(outfit.as_str()))
            .unwrap_or_else(|e| {
                eprintln!("Error applying outfit edit: {e}");
                process::exit(1);
            });
    }
    if cli.default_outfit {
        state.set_outfit(catalog, None).unwrap_or_else(|e| {
            eprintln!("Error applying outfit edit: {e}");
            process::exit(1);
        });
    }
    for flag in &cli.enable {
        state.set_enabled(catalog, flag, true).unwrap_or_else(|e| {
            eprintln!("Error applying advanced option edit: {e}");
            process::exit(1);
        });
    }
    for (flag, value) in &cli.param {
        state.set_parameter(catalog, flag, value).unwrap_or_else(|e| {
            eprintln!("Error applying advanced option edit: {e}");
            process::exit(1);
        });
    }
    for flag in &cli.disable {
        state.set_enabled(catalog, flag, false).unwrap_or_else(|e| {
            eprintln!("Error applying advanced option edit: {e}");
            process::exit(1);
        });
    }
}

fn print_listings(catalog: &Catalog, sections: &[CatalogSection], json: bool) {
    for section in sections {
        if json {
            let rendered =
                serde_json::to_string_pretty(&render_catalog_json(catalog, *section))
                    .unwrap_or_else(|e| {
                        eprintln!("Error rendering JSON output: {e}");
                        process::exit(1);
                    });
            println!("{rendered}");
        } else {
            print!("{}", render_catalog_text(catalog, *section));
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn parse_param(value: &str) -> Result<(String, String), String> {
    let (flag, param) = value
        .split_once('=')
        .ok_or_else(|| format!("expected FLAG=VALUE, got '{value}'"))?;
    if flag.is_empty() {
        return Err(format!("missing flag in '{value}'"));
    }
    Ok((flag.to_string(), param.to_string()))
}

#[cfg(test)]
mod tests {
    use super::parse_param;

    #[test]
    fn parse_param_splits_on_first_equals() {
        assert_eq!(
            parse_param("-FONTNAME=Arial").expect("valid param"),
            ("-FONTNAME".to_string(), "Arial".to_string())
        );
        assert_eq!(
            parse_param("-CHAPTERVARS=a=b").expect("valid param"),
            ("-CHAPTERVARS".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_param("-FONTNAME=").expect("empty value is allowed"),
            ("-FONTNAME".to_string(), String::new())
        );
    }

    #[test]
    fn parse_param_rejects_missing_parts() {
        assert!(parse_param("-FONTNAME").is_err());
        assert!(parse_param("=Arial").is_err());
    }
}
