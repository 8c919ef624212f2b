use std::collections::BTreeMap;

use super::{LoadError, LoadWarning, ProfileRecord};

/// One raw profile definition handed to the store. Discovery (or a test
/// fixture) supplies the pairs; the store never touches the filesystem.
#[derive(Debug, Clone)]
pub struct ProfileSource {
    /// Where the text came from, for diagnostics (usually a file name).
    pub identifier: String,
    pub text: String,
}

impl ProfileSource {
    pub fn new(identifier: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            text: text.into(),
        }
    }
}

/// What happened during a load: how many profiles made it into the index and
/// every non-fatal finding along the way.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub warnings: Vec<LoadWarning>,
}

/// The immutable `name -> ProfileRecord` index built once at startup.
///
/// A BTreeMap keeps enumeration lexicographic, which makes listing output and
/// `UnknownDeploymentType` diagnostics deterministic. Reloading means building
/// a fresh store and swapping the handle; nothing mutates in place.
#[derive(Debug, Default)]
pub struct ProfileStore {
    records: BTreeMap<String, ProfileRecord>,
}

impl ProfileStore {
    /// Parses and indexes the given sources.
    ///
    /// Per-source failures are isolated: a document that does not parse, or
    /// parses to something without a `name`, never aborts the batch. Only a
    /// batch that yields zero usable profiles is fatal.
    pub fn load(sources: &[ProfileSource]) -> Result<(Self, LoadReport), LoadError> {
        let mut records: BTreeMap<String, ProfileRecord> = BTreeMap::new();
        let mut report = LoadReport::default();

        for source in sources {
            let value: serde_yaml::Value = match serde_yaml::from_str(&source.text) {
                Ok(value) => value,
                Err(err) => {
                    report.warnings.push(LoadWarning::ParseFailure {
                        source: source.identifier.clone(),
                        message: err.to_string(),
                    });
                    continue;
                }
            };

            // Empty documents and documents with no `name` key are not
            // profiles; skip them without comment.
            if !value.is_mapping() || value.get("name").is_none() {
                continue;
            }

            let record: ProfileRecord = match serde_yaml::from_value(value) {
                Ok(record) => record,
                Err(err) => {
                    report.warnings.push(LoadWarning::ParseFailure {
                        source: source.identifier.clone(),
                        message: err.to_string(),
                    });
                    continue;
                }
            };

            if !record.enabled {
                report.warnings.push(LoadWarning::DisabledSkipped {
                    name: record.name.clone(),
                });
                continue;
            }

            report.warnings.extend(record.lint());

            if records.contains_key(&record.name) {
                report.warnings.push(LoadWarning::DuplicateName {
                    name: record.name.clone(),
                    source: source.identifier.clone(),
                });
            }
            records.insert(record.name.clone(), record);
        }

        if records.is_empty() {
            return Err(LoadError::NoUsableProfiles);
        }

        report.loaded = records.len();
        Ok((Self { records }, report))
    }

    /// Exact-match lookup; no fuzzy matching.
    pub fn lookup(&self, name: &str) -> Option<&ProfileRecord> {
        self.records.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// All active profile names, lexicographically sorted.
    pub fn names(&self) -> Vec<&str> {
        self.records.keys().map(String::as_str).collect()
    }

    /// Records in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ProfileRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
