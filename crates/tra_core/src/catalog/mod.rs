mod builtin;

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::Serialize;

use crate::codec::{NO_MAIN_MENU_TOKEN, PLAYER_TOKEN};
use crate::error::{CoreError, CoreErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckpointEntry {
    pub id: String,
    pub caption: String,
}

impl CheckpointEntry {
    pub fn new(id: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            caption: caption.into(),
        }
    }
}

/// A level or area as shown in the level picker.
///
/// `checkpoints == None` marks a group with a single implicit target (the
/// main menu) that is never written to the argument line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelGroup {
    pub name: String,
    pub checkpoints: Option<Vec<CheckpointEntry>>,
}

impl LevelGroup {
    pub fn implicit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            checkpoints: None,
        }
    }

    pub fn with_checkpoints(name: impl Into<String>, checkpoints: Vec<CheckpointEntry>) -> Self {
        Self {
            name: name.into(),
            checkpoints: Some(checkpoints),
        }
    }

    pub fn is_implicit(&self) -> bool {
        self.checkpoints.is_none()
    }

    pub fn checkpoints(&self) -> &[CheckpointEntry] {
        self.checkpoints.as_deref().unwrap_or(&[])
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.checkpoints().iter().position(|entry| entry.id == id)
    }

    /// Number of picker rows: an implicit group still offers one row.
    pub fn choice_count(&self) -> usize {
        match &self.checkpoints {
            None => 1,
            Some(list) => list.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutfitEntry {
    pub id: Option<String>,
    pub caption: String,
}

impl OutfitEntry {
    pub fn new(id: Option<&str>, caption: impl Into<String>) -> Self {
        Self {
            id: id.map(str::to_string),
            caption: caption.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvancedOption {
    pub flag: String,
    pub caption: String,
    pub takes_parameter: bool,
}

impl AdvancedOption {
    pub fn new(flag: impl Into<String>, caption: impl Into<String>, takes_parameter: bool) -> Self {
        Self {
            flag: flag.into(),
            caption: caption.into(),
            takes_parameter,
        }
    }
}

/// Where a checkpoint id was found while scanning the level groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointLocation<'c> {
    pub group_index: usize,
    pub group: &'c str,
    pub index: usize,
    pub entry: &'c CheckpointEntry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    levels: Vec<LevelGroup>,
    outfits: Vec<OutfitEntry>,
    advanced: Vec<AdvancedOption>,
}

impl Catalog {
    pub fn new(
        levels: Vec<LevelGroup>,
        outfits: Vec<OutfitEntry>,
        advanced: Vec<AdvancedOption>,
    ) -> Result<Self, CoreError> {
        let catalog = Self {
            levels,
            outfits,
            advanced,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog of tokens understood by the retail game.
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let catalog = Self {
                levels: builtin::level_groups(),
                outfits: builtin::outfits(),
                advanced: builtin::advanced_options(),
            };
            log::trace!(
                "built catalog: {} level groups, {} outfits, {} advanced options",
                catalog.levels.len(),
                catalog.outfits.len(),
                catalog.advanced.len()
            );
            catalog
        })
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let mut group_names = HashSet::new();
        let mut checkpoint_ids = HashSet::new();
        for group in &self.levels {
            if !group_names.insert(group.name.as_str()) {
                return Err(invalid_catalog(format!(
                    "level group '{}' is declared twice",
                    group.name
                )));
            }
            let mut in_group = HashSet::new();
            for entry in group.checkpoints() {
                check_token_shape(&entry.id, "checkpoint id")?;
                if entry.id == NO_MAIN_MENU_TOKEN || entry.id == PLAYER_TOKEN {
                    return Err(invalid_catalog(format!(
                        "checkpoint id '{}' collides with a structural marker",
                        entry.id
                    )));
                }
                if !in_group.insert(entry.id.as_str()) {
                    return Err(invalid_catalog(format!(
                        "checkpoint id '{}' appears twice in group '{}'",
                        entry.id, group.name
                    )));
                }
                checkpoint_ids.insert(entry.id.as_str());
            }
        }

        let mut flags = HashSet::new();
        for option in &self.advanced {
            check_token_shape(&option.flag, "advanced flag")?;
            if !option.flag.starts_with('-') {
                return Err(invalid_catalog(format!(
                    "advanced flag '{}' must start with '-'",
                    option.flag
                )));
            }
            if option.flag == NO_MAIN_MENU_TOKEN || option.flag == PLAYER_TOKEN {
                return Err(invalid_catalog(format!(
                    "advanced flag '{}' collides with a structural marker",
                    option.flag
                )));
            }
            if !flags.insert(option.flag.as_str()) {
                return Err(invalid_catalog(format!(
                    "advanced flag '{}' is declared twice",
                    option.flag
                )));
            }
            if checkpoint_ids.contains(option.flag.as_str()) {
                return Err(invalid_catalog(format!(
                    "advanced flag '{}' is also a checkpoint id",
                    option.flag
                )));
            }
        }

        let mut outfit_ids = HashSet::new();
        for outfit in &self.outfits {
            let Some(id) = outfit.id.as_deref() else {
                continue;
            };
            check_token_shape(id, "outfit id")?;
            if !outfit_ids.insert(id) {
                return Err(invalid_catalog(format!("outfit id '{id}' is declared twice")));
            }
            if flags.contains(id)
                || checkpoint_ids.contains(id)
                || id == NO_MAIN_MENU_TOKEN
                || id == PLAYER_TOKEN
            {
                return Err(invalid_catalog(format!(
                    "outfit id '{id}' collides with another token"
                )));
            }
        }

        Ok(())
    }

    pub fn level_groups(&self) -> &[LevelGroup] {
        &self.levels
    }

    pub fn outfits(&self) -> &[OutfitEntry] {
        &self.outfits
    }

    pub fn advanced_options(&self) -> &[AdvancedOption] {
        &self.advanced
    }

    pub fn level_group(&self, name: &str) -> Option<&LevelGroup> {
        self.levels.iter().find(|group| group.name == name)
    }

    /// Scans groups in declared order; the first group holding `token` wins.
    pub fn find_level_checkpoint(&self, token: &str) -> Option<CheckpointLocation<'_>> {
        self.levels
            .iter()
            .enumerate()
            .find_map(|(group_index, group)| {
                let index = group.position(token)?;
                Some(CheckpointLocation {
                    group_index,
                    group: &group.name,
                    index,
                    entry: &group.checkpoints()[index],
                })
            })
    }

    /// Resolves a picker choice to the checkpoint id it stands for.
    ///
    /// Row 0 of an implicit group resolves to `None` (no checkpoint).
    pub fn checkpoint_at(&self, group_name: &str, index: usize) -> Result<Option<&str>, CoreError> {
        let group = self.level_group(group_name).ok_or_else(|| {
            CoreError::new(
                CoreErrorCode::UnknownLevelGroup,
                format!("unknown level group '{group_name}'"),
            )
        })?;

        if index >= group.choice_count() {
            return Err(CoreError::new(
                CoreErrorCode::UnknownCheckpoint,
                format!(
                    "level group '{}' has {} choice(s), index {} is out of range",
                    group.name,
                    group.choice_count(),
                    index
                ),
            ));
        }

        Ok(group
            .checkpoints
            .as_ref()
            .map(|list| list[index].id.as_str()))
    }

    pub fn is_known_outfit(&self, token: &str) -> bool {
        self.outfit(token).is_some()
    }

    pub fn outfit(&self, token: &str) -> Option<&OutfitEntry> {
        self.outfits
            .iter()
            .find(|outfit| outfit.id.as_deref() == Some(token))
    }

    /// Caption of the outfit, with `None` naming the default outfit.
    pub fn outfit_caption(&self, id: Option<&str>) -> Option<&str> {
        self.outfits
            .iter()
            .find(|outfit| outfit.id.as_deref() == id)
            .map(|outfit| outfit.caption.as_str())
    }

    pub fn advanced_option(&self, flag: &str) -> Option<&AdvancedOption> {
        self.advanced.iter().find(|option| option.flag == flag)
    }

    /// Returns whether the flag takes a parameter, or `None` for unknown flags.
    pub fn advanced_flag(&self, token: &str) -> Option<bool> {
        self.advanced_option(token)
            .map(|option| option.takes_parameter)
    }
}

fn check_token_shape(token: &str, what: &str) -> Result<(), CoreError> {
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return Err(invalid_catalog(format!(
            "{what} '{token}' must be a non-empty token without whitespace"
        )));
    }
    Ok(())
}

fn invalid_catalog(message: String) -> CoreError {
    CoreError::new(CoreErrorCode::InvalidCatalog, message)
}

#[cfg(test)]
mod tests {
    use super::{Catalog, LevelGroup};

    #[test]
    fn implicit_group_offers_a_single_choice() {
        let group = LevelGroup::implicit("Main Menu");
        assert!(group.is_implicit());
        assert_eq!(group.choice_count(), 1);
        assert_eq!(group.position("ma1"), None);
    }

    #[test]
    fn builtin_catalog_is_consistent() {
        Catalog::builtin()
            .validate()
            .expect("builtin catalog should satisfy its invariants");
    }
}
