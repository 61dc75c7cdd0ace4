use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorCode {
    /// `Catalog::new` found ids that would not survive an encode/decode cycle.
    InvalidCatalog,
    /// No level group carries the requested name.
    UnknownLevelGroup,
    /// Checkpoint id not in the catalog, or a picker row past the group's end.
    UnknownCheckpoint,
    UnknownOutfit,
    UnknownAdvancedOption,
    /// A parameter was given to a plain flag, or the value contains whitespace.
    InvalidParameter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreError {
    pub code: CoreErrorCode,
    pub message: String,
}

impl CoreError {
    pub fn new(code: CoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl Error for CoreError {}
