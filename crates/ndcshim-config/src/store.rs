use std::collections::HashMap;
use std::path::Path;

use ndcshim_codec::Separators;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{ConfigError, Result};

/// Maximum bytes allowed for the configuration file.
pub const MAX_CONFIG_FILE_SIZE: u64 = 256 * 1024;

/// Default fixed width of a note-count token in a transaction request.
const DEFAULT_NOTE_COUNT_LENGTH: usize = 2;

/// One enhanced configuration parameter override.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfigParameter {
    /// Two-character option code.
    pub code: String,
    /// Override value; usually a decimal number, kept as text because the
    /// protocol also allows raw-text options.
    pub value: String,
    /// When set, the numeric value is OR-merged with the current value
    /// instead of replacing it.
    #[serde(default)]
    pub mask: bool,
}

impl ConfigParameter {
    /// The override value parsed as a decimal integer, when it is one.
    pub fn numeric_value(&self) -> Option<i64> {
        self.value.parse().ok()
    }
}

/// One device-inventory override for a message category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceOverride {
    /// Single-character device identifier.
    pub dig: char,
    /// Replacement text, merged positionally with existing data (`'?'`
    /// preserves the current character). Empty means "remove this DIG".
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoreFile {
    note_count_length: Option<usize>,
    separators: Option<SeparatorsFile>,
    state_definitions: HashMap<String, String>,
    configuration_parameters: Vec<ConfigParameter>,
    note_mappings: HashMap<String, String>,
    devices: HashMap<String, Vec<DeviceOverride>>,
}

#[derive(Debug, Deserialize)]
struct SeparatorsFile {
    field: u8,
    group: u8,
}

/// The read-only lookup tables driving every rewrite rule.
///
/// Loaded once, immutable thereafter; concurrent intercept calls only share
/// `&Store` reads, so no locking is required.
#[derive(Debug, Clone)]
pub struct Store {
    note_count_length: usize,
    separators: Separators,
    state_definitions: HashMap<String, String>,
    configuration_parameters: Vec<ConfigParameter>,
    note_mappings: HashMap<String, String>,
    devices: HashMap<String, Vec<DeviceOverride>>,
}

impl Store {
    /// Load the store from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let metadata = std::fs::metadata(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::TooLarge {
                size: metadata.len(),
                max: MAX_CONFIG_FILE_SIZE,
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&content)
    }

    /// Load the store from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: StoreFile = serde_json::from_str(content)?;
        Ok(Self::from_file(file))
    }

    /// Load the store, falling back to empty tables on any failure.
    ///
    /// With empty tables every rewrite rule is a no-op, so a broken
    /// configuration degrades to pure pass-through instead of taking the
    /// host down.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::from_path(&path) {
            Ok(store) => {
                info!(
                    path = %path.as_ref().display(),
                    states = store.state_definitions.len(),
                    parameters = store.configuration_parameters.len(),
                    note_mappings = store.note_mappings.len(),
                    device_categories = store.devices.len(),
                    "configuration loaded"
                );
                store
            }
            Err(err) => {
                warn!(
                    path = %path.as_ref().display(),
                    %err,
                    "configuration unavailable, all rewrite rules disabled"
                );
                Self::default()
            }
        }
    }

    fn from_file(file: StoreFile) -> Self {
        Self {
            note_count_length: file.note_count_length.unwrap_or(DEFAULT_NOTE_COUNT_LENGTH),
            separators: match file.separators.map(|s| Separators::new(s.field, s.group)) {
                Some(separators) if separators.is_ascii() => separators,
                Some(separators) => {
                    warn!(
                        field = separators.field,
                        group = separators.group,
                        "separators must be ASCII bytes, using protocol defaults"
                    );
                    Separators::default()
                }
                None => Separators::default(),
            },
            state_definitions: file.state_definitions,
            configuration_parameters: file.configuration_parameters,
            note_mappings: file.note_mappings,
            devices: file.devices,
        }
    }

    /// Override text for a 3-character state code, when configured.
    pub fn state_override(&self, code: &str) -> Option<&str> {
        self.state_definitions.get(code).map(String::as_str)
    }

    /// Configured parameter for a 2-character option code, when present.
    pub fn parameter(&self, code: &str) -> Option<&ConfigParameter> {
        self.configuration_parameters
            .iter()
            .find(|p| p.code == code)
    }

    /// All configured parameters, in configuration order.
    pub fn parameters(&self) -> &[ConfigParameter] {
        &self.configuration_parameters
    }

    /// Replacement text for a 2-character note-type id, when configured.
    pub fn note_mapping(&self, id: &str) -> Option<&str> {
        self.note_mappings.get(id).map(String::as_str)
    }

    /// Device overrides for a message category id ("HA", "IA", "JA"),
    /// in configuration order.
    pub fn device_overrides(&self, message_id: &str) -> &[DeviceOverride] {
        self.devices
            .get(message_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Configured fixed width of a note-count token.
    pub fn note_count_length(&self) -> usize {
        self.note_count_length
    }

    /// Protocol separator bytes for the deployed revision.
    pub fn separators(&self) -> Separators {
        self.separators
    }

    // Builder-style additions, for fixture stores in tests and embedded use.

    /// Add a state definition override.
    pub fn with_state_definition(mut self, code: &str, text: &str) -> Self {
        self.state_definitions
            .insert(code.to_string(), text.to_string());
        self
    }

    /// Add an enhanced configuration parameter override.
    pub fn with_parameter(mut self, code: &str, value: &str, mask: bool) -> Self {
        self.configuration_parameters.push(ConfigParameter {
            code: code.to_string(),
            value: value.to_string(),
            mask,
        });
        self
    }

    /// Add a note-type mapping.
    pub fn with_note_mapping(mut self, id: &str, replacement: &str) -> Self {
        self.note_mappings
            .insert(id.to_string(), replacement.to_string());
        self
    }

    /// Add a device override under a message category id.
    pub fn with_device(mut self, message_id: &str, dig: char, data: &str) -> Self {
        self.devices
            .entry(message_id.to_string())
            .or_default()
            .push(DeviceOverride {
                dig,
                data: data.to_string(),
            });
        self
    }

    /// Set the note-count token width.
    pub fn with_note_count_length(mut self, length: usize) -> Self {
        self.note_count_length = length;
        self
    }

    /// Set the protocol separators.
    pub fn with_separators(mut self, separators: Separators) -> Self {
        self.separators = separators;
        self
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::from_file(StoreFile::default())
    }
}
