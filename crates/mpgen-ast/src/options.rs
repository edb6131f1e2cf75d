//! Options for one generation pass.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{LoadError, TagMap};

pub const DEFAULT_TEMPLATE_NAME: &str = "defaultName";

/// Default nesting limit. Trees deeper than this are reported as a
/// generation failure rather than risking stack exhaustion.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// A compiled sub-component available for instantiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportEntry {
    pub source_path: String,
    pub content_hash: String,
}

impl ImportEntry {
    pub fn new(source_path: impl Into<String>, content_hash: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            content_hash: content_hash.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOptions {
    pub template_name: String,

    /// Source tag name → compiled sub-component. Emitted as imports in this order.
    pub import_table: IndexMap<String, ImportEntry>,

    /// Declared slot names. Accepted for completeness; only the default slot is wired.
    pub slot_names: Vec<String>,

    /// Overrides on top of the built-in tag remapping table.
    pub tag_map: TagMap,

    pub max_depth: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            template_name: DEFAULT_TEMPLATE_NAME.to_string(),
            import_table: IndexMap::new(),
            slot_names: Vec::new(),
            tag_map: TagMap::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl GeneratorOptions {
    pub fn new(template_name: impl Into<String>) -> Self {
        Self {
            template_name: template_name.into(),
            ..Self::default()
        }
    }

    pub fn from_json(source: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Register a sub-component under its source tag name.
    pub fn with_import(mut self, tag: impl Into<String>, entry: ImportEntry) -> Self {
        self.import_table.insert(tag.into(), entry);
        self
    }

    pub fn import_for(&self, tag: &str) -> Option<&ImportEntry> {
        self.import_table.get(tag)
    }
}
