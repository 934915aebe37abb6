//! JSON program documents: a program tree plus the resources it references.
//!
//! ```json
//! {
//!   "program": [{"type": "comment", "text": "gen"}],
//!   "resources": {
//!     "models": {"net.eg": {"kind": "BasicNetwork", "factory": {"type": "feedforward", "architecture": "?:B->SIGMOID->4->?"}}},
//!     "datasets": {"xor.egb": [{"input": [0, 1], "ideal": [1]}]}
//!   }
//! }
//! ```

use crate::error::DocumentError;
use crate::program::Program;
use crate::resources::ResourceStore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramDocument {
    pub program: Program,
    #[serde(default)]
    pub resources: ResourceStore,
}

impl ProgramDocument {
    pub fn from_json(source: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let source = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source)
    }
}
