use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{AdvancedOption, Catalog};
use crate::error::{CoreError, CoreErrorCode};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdvancedSetting {
    pub enabled: bool,
    pub parameter: Option<String>,
}

/// The user's launcher choices, independent of any widget toolkit.
///
/// Every advanced flag of the catalog the state was created from is always
/// present. The setters keep the state encodable: a disabled flag carries no
/// parameter and a parameter never contains whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    checkpoint: Option<String>,
    outfit: Option<String>,
    advanced: BTreeMap<String, AdvancedSetting>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}

impl SelectionState {
    pub fn new(catalog: &Catalog) -> Self {
        let advanced = catalog
            .advanced_options()
            .iter()
            .map(|option| (option.flag.clone(), AdvancedSetting::default()))
            .collect();
        Self {
            checkpoint: None,
            outfit: None,
            advanced,
        }
    }

    pub fn checkpoint(&self) -> Option<&str> {
        self.checkpoint.as_deref()
    }

    pub fn outfit(&self) -> Option<&str> {
        self.outfit.as_deref()
    }

    pub fn advanced(&self, flag: &str) -> Option<&AdvancedSetting> {
        self.advanced.get(flag)
    }

    pub fn is_enabled(&self, flag: &str) -> bool {
        self.advanced.get(flag).is_some_and(|setting| setting.enabled)
    }

    pub fn parameter(&self, flag: &str) -> Option<&str> {
        self.advanced
            .get(flag)
            .and_then(|setting| setting.parameter.as_deref())
    }

    /// Enabled options paired with their settings, in catalog order.
    pub fn enabled_options<'c>(
        &self,
        catalog: &'c Catalog,
    ) -> Vec<(&'c AdvancedOption, &AdvancedSetting)> {
        catalog
            .advanced_options()
            .iter()
            .filter_map(|option| {
                let setting = self.advanced.get(&option.flag)?;
                setting.enabled.then_some((option, setting))
            })
            .collect()
    }

    pub fn is_default(&self) -> bool {
        self.checkpoint.is_none()
            && self.outfit.is_none()
            && self
                .advanced
                .values()
                .all(|setting| *setting == AdvancedSetting::default())
    }

    pub fn reset(&mut self, catalog: &Catalog) {
        *self = Self::new(catalog);
    }

    /// `None` returns to the main menu.
    pub fn set_checkpoint(&mut self, catalog: &Catalog, id: Option<&str>) -> Result<(), CoreError> {
        if let Some(id) = id {
            if catalog.find_level_checkpoint(id).is_none() {
                return Err(CoreError::new(
                    CoreErrorCode::UnknownCheckpoint,
                    format!("unknown checkpoint '{id}'"),
                ));
            }
        }
        self.checkpoint = id.map(str::to_string);
        Ok(())
    }

    /// Picker-style selection: a level group and a row within it.
    pub fn select_level(
        &mut self,
        catalog: &Catalog,
        group_name: &str,
        index: usize,
    ) -> Result<(), CoreError> {
        let id = catalog.checkpoint_at(group_name, index)?;
        self.checkpoint = id.map(str::to_string);
        Ok(())
    }

    /// `None` selects the default outfit.
    pub fn set_outfit(&mut self, catalog: &Catalog, id: Option<&str>) -> Result<(), CoreError> {
        if let Some(id) = id {
            if !catalog.is_known_outfit(id) {
                return Err(CoreError::new(
                    CoreErrorCode::UnknownOutfit,
                    format!("unknown outfit '{id}'"),
                ));
            }
        }
        self.outfit = id.map(str::to_string);
        Ok(())
    }

    /// Enabling a parameterized flag starts it with an empty parameter;
    /// disabling any flag drops its parameter.
    pub fn set_enabled(
        &mut self,
        catalog: &Catalog,
        flag: &str,
        enabled: bool,
    ) -> Result<(), CoreError> {
        let option = lookup_option(catalog, flag)?;
        let setting = self.advanced.entry(option.flag.clone()).or_default();
        setting.enabled = enabled;
        if !enabled {
            setting.parameter = None;
        } else if option.takes_parameter && setting.parameter.is_none() {
            setting.parameter = Some(String::new());
        }
        Ok(())
    }

    /// Sets the parameter of a parameterized flag and enables it.
    pub fn set_parameter(
        &mut self,
        catalog: &Catalog,
        flag: &str,
        value: &str,
    ) -> Result<(), CoreError> {
        let option = lookup_option(catalog, flag)?;
        if !option.takes_parameter {
            return Err(CoreError::new(
                CoreErrorCode::InvalidParameter,
                format!("advanced option '{flag}' does not take a parameter"),
            ));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(CoreError::new(
                CoreErrorCode::InvalidParameter,
                format!("parameter for '{flag}' must not contain whitespace: {value:?}"),
            ));
        }

        let setting = self.advanced.entry(option.flag.clone()).or_default();
        setting.enabled = true;
        setting.parameter = Some(value.to_string());
        Ok(())
    }

    pub(crate) fn set_checkpoint_unchecked(&mut self, id: &str) {
        self.checkpoint = Some(id.to_string());
    }

    pub(crate) fn set_outfit_unchecked(&mut self, id: &str) {
        self.outfit = Some(id.to_string());
    }

    pub(crate) fn advanced_mut(&mut self, flag: &str) -> &mut AdvancedSetting {
        self.advanced.entry(flag.to_string()).or_default()
    }
}

fn lookup_option<'c>(catalog: &'c Catalog, flag: &str) -> Result<&'c AdvancedOption, CoreError> {
    catalog.advanced_option(flag).ok_or_else(|| {
        CoreError::new(
            CoreErrorCode::UnknownAdvancedOption,
            format!("unknown advanced option '{flag}'"),
        )
    })
}
