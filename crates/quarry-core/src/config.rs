use crate::error::{ErrorClass, ErrorOrigin};
use derive_more::{Deref, DerefMut};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

/// Configuration key naming the store unit a session connects to.
pub const UNIT_KEY: &str = "quarry.unit";

///
/// Settings
///
/// Plain key/value configuration handed in by the surrounding
/// application. An explicit value, not ambient state.
///

#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct Settings(BTreeMap<String, String>);

impl Settings {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

///
/// SessionConfig
/// Typed view over the settings the engine actually reads.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionConfig {
    pub unit: String,
}

impl SessionConfig {
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let unit = settings
            .get(UNIT_KEY)
            .ok_or(ConfigError::MissingKey { key: UNIT_KEY })?;

        Ok(Self { unit: unit.clone() })
    }
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("required configuration key '{key}' is missing")]
    MissingKey { key: &'static str },
}

impl ConfigError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::Invalid
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        ErrorOrigin::Config
    }
}
