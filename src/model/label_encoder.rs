use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{PredictionError, Result};

/// Fitted mapping from category string to integer code. Codes are the
/// positions of the classes in sorted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

/// Result of encoding one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoded {
    Known(usize),
    /// The value was not seen during fitting; the first class was used.
    Unknown(usize),
}

impl Encoded {
    pub fn code(self) -> usize {
        match self {
            Encoded::Known(code) | Encoded::Unknown(code) => code,
        }
    }
}

impl LabelEncoder {
    pub fn new(classes: impl IntoIterator<Item = String>) -> Self {
        let mut classes: Vec<String> = classes.into_iter().collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn transform(&self, column: &str, value: &str) -> Result<Encoded> {
        if self.classes.is_empty() {
            return Err(PredictionError::EmptyEncoder(column.to_string()));
        }
        match self.classes.binary_search_by(|class| class.as_str().cmp(value)) {
            Ok(code) => Ok(Encoded::Known(code)),
            Err(_) => Ok(Encoded::Unknown(0)),
        }
    }
}

/// One encoder per categorical column.
#[derive(Debug, Clone, Default)]
pub struct LabelEncoders {
    encoders: HashMap<String, LabelEncoder>,
}

impl LabelEncoders {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PredictionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| PredictionError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("Loaded {} encoders from {}", raw.len(), path.display());
        Ok(Self::from_classes(raw))
    }

    pub fn from_classes(raw: impl IntoIterator<Item = (String, Vec<String>)>) -> Self {
        let encoders = raw
            .into_iter()
            .map(|(column, classes)| (column, LabelEncoder::new(classes)))
            .collect();
        Self { encoders }
    }

    pub fn get(&self, column: &str) -> Option<&LabelEncoder> {
        self.encoders.get(column)
    }

    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }

    /// Encodes `value` for `column`. Anything that cannot be encoded becomes
    /// code 0 with a warning.
    pub fn encode_or_default(&self, column: &str, value: &str) -> f64 {
        let Some(encoder) = self.get(column) else {
            log::warn!("No encoder for column '{}', using code 0", column);
            return 0.0;
        };
        match encoder.transform(column, value) {
            Ok(Encoded::Known(code)) => code as f64,
            Ok(Encoded::Unknown(code)) => {
                log::warn!(
                    "Unknown {} '{}', falling back to '{}'",
                    column,
                    value,
                    encoder.classes()[code]
                );
                code as f64
            }
            Err(e) => {
                log::warn!("Encoding error for {}: {}", column, e);
                0.0
            }
        }
    }
}
