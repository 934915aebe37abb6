//! Model and dataset access.
//!
//! Generators never touch persistence directly. Models and datasets are
//! obtained through [`ModelLoader`] and [`DatasetLoader`], which a driver
//! implements over whatever store it has. [`ResourceStore`] is the in-memory
//! implementation backing program documents and tests.

use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Construction recipe a model can describe about itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryMetadata {
    #[serde(rename = "type")]
    pub factory_type: String,
    pub architecture: String,
}

/// Handle to a loaded machine-learning method
pub trait MlMethod: fmt::Debug {
    /// Human-readable model kind, used in diagnostics
    fn kind(&self) -> &str;

    /// Factory metadata, if this model can be rebuilt from a recipe
    fn factory(&self) -> Option<FactoryMetadata> {
        None
    }
}

pub trait ModelLoader {
    fn load_model(&self, path: &Path) -> Result<Box<dyn MlMethod>, LoadError>;
}

pub trait DatasetLoader {
    fn load_dataset(&self, path: &Path) -> Result<Dataset, LoadError>;
}

/// Everything a generator may need to load
pub trait ResourceLoader: ModelLoader + DatasetLoader {}

impl<T: ModelLoader + DatasetLoader> ResourceLoader for T {}

/// One training example
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPair {
    pub input: Vec<f64>,
    pub ideal: Vec<f64>,
}

impl DataPair {
    pub fn new(input: Vec<f64>, ideal: Vec<f64>) -> Self {
        Self { input, ideal }
    }
}

/// In-memory data set. All pairs share the same input and ideal widths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DataPair>", into = "Vec<DataPair>")]
pub struct Dataset {
    pairs: Vec<DataPair>,
}

impl Dataset {
    pub fn new(pairs: Vec<DataPair>) -> Result<Self, LoadError> {
        if let Some(first) = pairs.first() {
            let (expected_input, expected_ideal) = (first.input.len(), first.ideal.len());
            for (index, pair) in pairs.iter().enumerate() {
                if pair.input.len() != expected_input || pair.ideal.len() != expected_ideal {
                    return Err(LoadError::Ragged {
                        index,
                        input: pair.input.len(),
                        ideal: pair.ideal.len(),
                        expected_input,
                        expected_ideal,
                    });
                }
            }
        }
        Ok(Self { pairs })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl TryFrom<Vec<DataPair>> for Dataset {
    type Error = LoadError;

    fn try_from(pairs: Vec<DataPair>) -> Result<Self, Self::Error> {
        Dataset::new(pairs)
    }
}

impl From<Dataset> for Vec<DataPair> {
    fn from(dataset: Dataset) -> Self {
        dataset.pairs
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DataPair;
    type IntoIter = std::slice::Iter<'a, DataPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Model description stored in a program document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredModel {
    #[serde(default = "StoredModel::default_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory: Option<FactoryMetadata>,
}

impl StoredModel {
    fn default_kind() -> String {
        "MLMethod".to_string()
    }

    pub fn with_factory(kind: impl Into<String>, factory_type: impl Into<String>, architecture: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            factory: Some(FactoryMetadata {
                factory_type: factory_type.into(),
                architecture: architecture.into(),
            }),
        }
    }

    pub fn opaque(kind: impl Into<String>) -> Self {
        Self { kind: kind.into(), factory: None }
    }
}

impl MlMethod for StoredModel {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn factory(&self) -> Option<FactoryMetadata> {
        self.factory.clone()
    }
}

/// Models and datasets keyed by the file reference used in the program tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceStore {
    #[serde(default)]
    pub models: BTreeMap<PathBuf, StoredModel>,
    #[serde(default)]
    pub datasets: BTreeMap<PathBuf, Dataset>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, path: impl Into<PathBuf>, model: StoredModel) -> Self {
        self.models.insert(path.into(), model);
        self
    }

    pub fn with_dataset(mut self, path: impl Into<PathBuf>, dataset: Dataset) -> Self {
        self.datasets.insert(path.into(), dataset);
        self
    }
}

impl ModelLoader for ResourceStore {
    fn load_model(&self, path: &Path) -> Result<Box<dyn MlMethod>, LoadError> {
        self.models
            .get(path)
            .map(|model| Box::new(model.clone()) as Box<dyn MlMethod>)
            .ok_or_else(|| LoadError::UnknownModel(path.to_path_buf()))
    }
}

impl DatasetLoader for ResourceStore {
    fn load_dataset(&self, path: &Path) -> Result<Dataset, LoadError> {
        self.datasets
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::UnknownDataset(path.to_path_buf()))
    }
}
