use crate::catalog::Catalog;
use crate::selection::SelectionState;

use super::{NO_MAIN_MENU_TOKEN, PLAYER_TOKEN};

/// Encodes `state` as the token sequence the game expects, one argument per
/// element. Advanced options follow catalog order.
pub fn encode_tokens(state: &SelectionState, catalog: &Catalog) -> Vec<String> {
    let mut tokens = Vec::new();

    if let Some(checkpoint) = state.checkpoint() {
        tokens.push(checkpoint.to_string());
        tokens.push(NO_MAIN_MENU_TOKEN.to_string());
    }
    if let Some(outfit) = state.outfit() {
        tokens.push(PLAYER_TOKEN.to_string());
        tokens.push(outfit.to_string());
    }

    for (option, setting) in state.enabled_options(catalog) {
        tokens.push(option.flag.clone());
        if option.takes_parameter {
            tokens.push(quote_parameter(setting.parameter.as_deref().unwrap_or("")));
        }
    }

    tokens
}

/// Encodes `state` as a single `TRAE.arg` line (no trailing newline).
pub fn encode(state: &SelectionState, catalog: &Catalog) -> String {
    encode_tokens(state, catalog).join(" ")
}

pub fn quote_parameter(value: &str) -> String {
    format!("\"{value}\"")
}
