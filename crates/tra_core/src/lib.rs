//! Encoder/decoder for the Tomb Raider: Anniversary launcher argument file
//! (`TRAE.arg`).
//!
//! The game reads a single line of space separated tokens at startup. This
//! crate owns the catalog of tokens the game understands, the in-memory
//! [`SelectionState`] a front end edits, and the codec between the two.

pub mod catalog;
pub mod codec;
pub mod error;
pub mod selection;

pub use catalog::{
    AdvancedOption, Catalog, CheckpointEntry, CheckpointLocation, LevelGroup, OutfitEntry,
};
pub use codec::{
    DecodeIssue, DecodeIssueKind, Decoded, NO_MAIN_MENU_TOKEN, PLAYER_TOKEN, TokenClass,
    classify_token, decode, decode_config_text, encode, encode_tokens,
};
pub use error::{CoreError, CoreErrorCode};
pub use selection::{AdvancedSetting, SelectionState};
