use std::fmt;

use log::{debug, warn};
use serde::Serialize;

use crate::catalog::{Catalog, CheckpointLocation};
use crate::selection::SelectionState;

use super::{NO_MAIN_MENU_TOKEN, PLAYER_TOKEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecodeIssueKind {
    /// The token is not a flag, outfit, marker or checkpoint.
    UnrecognizedToken,
    /// A parameterized flag ended the input.
    TruncatedParameter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeIssue {
    pub kind: DecodeIssueKind,
    pub token: String,
    /// Zero-based index of the token in the split input.
    pub position: usize,
}

impl DecodeIssue {
    fn new(kind: DecodeIssueKind, token: &str, position: usize) -> Self {
        Self {
            kind,
            token: token.to_string(),
            position,
        }
    }
}

impl fmt::Display for DecodeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DecodeIssueKind::UnrecognizedToken => {
                write!(f, "token {} '{}' is not recognized", self.position, self.token)
            }
            DecodeIssueKind::TruncatedParameter => write!(
                f,
                "token {} '{}' expects a parameter but the input ended",
                self.position, self.token
            ),
        }
    }
}

/// Category of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass<'c> {
    AdvancedFlag { takes_parameter: bool },
    Outfit,
    Marker,
    Checkpoint(CheckpointLocation<'c>),
    Unrecognized,
}

/// Classifies `token`. Precedence is fixed: advanced flag, outfit, structural
/// marker, checkpoint.
pub fn classify_token<'c>(token: &str, catalog: &'c Catalog) -> TokenClass<'c> {
    if let Some(takes_parameter) = catalog.advanced_flag(token) {
        return TokenClass::AdvancedFlag { takes_parameter };
    }
    if catalog.is_known_outfit(token) {
        return TokenClass::Outfit;
    }
    if token == NO_MAIN_MENU_TOKEN || token == PLAYER_TOKEN {
        return TokenClass::Marker;
    }
    match catalog.find_level_checkpoint(token) {
        Some(location) => TokenClass::Checkpoint(location),
        None => TokenClass::Unrecognized,
    }
}

pub fn tokenize(input: &str) -> impl Iterator<Item = &str> {
    input.split(' ').filter(|token| !token.is_empty())
}

/// Removes one pair of surrounding double quotes. A value quoted on one side
/// only is returned untouched.
pub fn strip_parameter_quotes(raw: &str) -> &str {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}

/// Result of decoding an argument line.
///
/// `state` holds everything that could be recovered even when `ok` is false.
#[derive(Debug, Clone)]
pub struct Decoded<'c> {
    pub state: SelectionState,
    pub ok: bool,
    pub issues: Vec<DecodeIssue>,
    /// Group and row of the decoded checkpoint, for level pickers.
    pub checkpoint_location: Option<CheckpointLocation<'c>>,
    catalog: &'c Catalog,
}

impl<'c> Decoded<'c> {
    pub fn into_parts(self) -> (SelectionState, bool) {
        (self.state, self.ok)
    }

    /// The decoded state, or the default state if anything was rejected.
    pub fn state_or_default(self) -> SelectionState {
        if self.ok {
            self.state
        } else {
            SelectionState::new(self.catalog)
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }
}

/// Decodes a `TRAE.arg` line. Never fails: unknown tokens are skipped and
/// reported through `ok` and `issues`.
pub fn decode<'c>(input: &str, catalog: &'c Catalog) -> Decoded<'c> {
    let mut state = SelectionState::new(catalog);
    let mut issues = Vec::new();
    let mut checkpoint_location = None;

    let mut tokens = tokenize(input).enumerate();
    while let Some((position, token)) = tokens.next() {
        let class = classify_token(token, catalog);
        debug!("token {position} '{token}': {class:?}");

        match class {
            TokenClass::AdvancedFlag { takes_parameter } => {
                let setting = state.advanced_mut(token);
                setting.enabled = true;
                if !takes_parameter {
                    continue;
                }
                match tokens.next() {
                    Some((_, raw)) => {
                        setting.parameter = Some(strip_parameter_quotes(raw).to_string());
                    }
                    None => issues.push(DecodeIssue::new(
                        DecodeIssueKind::TruncatedParameter,
                        token,
                        position,
                    )),
                }
            }
            TokenClass::Outfit => state.set_outfit_unchecked(token),
            TokenClass::Marker => {}
            TokenClass::Checkpoint(location) => {
                state.set_checkpoint_unchecked(token);
                checkpoint_location = Some(location);
            }
            TokenClass::Unrecognized => issues.push(DecodeIssue::new(
                DecodeIssueKind::UnrecognizedToken,
                token,
                position,
            )),
        }
    }

    for issue in &issues {
        warn!("{issue}");
    }

    Decoded {
        state,
        ok: issues.is_empty(),
        issues,
        checkpoint_location,
        catalog,
    }
}

/// Decodes the contents of a configuration file. Only the first line is
/// read; `None` (no file) decodes to the default state.
pub fn decode_config_text<'c>(text: Option<&str>, catalog: &'c Catalog) -> Decoded<'c> {
    let line = text.and_then(|text| text.lines().next()).unwrap_or("");
    decode(line, catalog)
}
