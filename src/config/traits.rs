use crate::error::EvobugError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), EvobugError>;
}

/// Validate a section, prefixing any configuration error with its name
pub fn validate_section<S: ConfigSection>(section: &S) -> Result<(), EvobugError> {
    section.validate().map_err(|e| match e {
        EvobugError::Configuration(msg) => {
            EvobugError::Configuration(format!("[{}] {}", S::section_name(), msg))
        }
        other => other,
    })
}
