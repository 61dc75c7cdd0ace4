//! The `TRAE.arg` token format.
//!
//! Checkpoint ids, outfit ids and advanced flags share one token namespace;
//! a token's category is decided by catalog membership, never by its shape.

mod decode;
mod encode;

pub use decode::{
    DecodeIssue, DecodeIssueKind, Decoded, TokenClass, classify_token, decode, decode_config_text,
    strip_parameter_quotes, tokenize,
};
pub use encode::{encode, encode_tokens, quote_parameter};

/// Follows the checkpoint id so the game skips its main menu.
pub const NO_MAIN_MENU_TOKEN: &str = "-NOMAINMENU";
/// Precedes the outfit id.
pub const PLAYER_TOKEN: &str = "-PLAYER";
