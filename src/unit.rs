use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type UnitKey = BTreeMap<String, Value>;
pub type UnitMetadata = BTreeMap<String, Value>;

const ID_KEY: &str = "id";

/// Content unit as handed between the host and an importer plugin.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Unit {
    pub type_id: String,
    pub unit_key: UnitKey,
    pub metadata: UnitMetadata,
    pub storage_path: Option<PathBuf>,
}

impl Unit {
    pub fn new(
        type_id: impl Into<String>,
        unit_key: UnitKey,
        metadata: UnitMetadata,
        storage_path: Option<PathBuf>,
    ) -> Self {
        Self {
            type_id: type_id.into(),
            unit_key,
            metadata,
            storage_path,
        }
    }

    /// Unit with only an `id` key and no metadata or path
    pub fn with_id(type_id: impl Into<String>, id: impl Into<Value>) -> Self {
        let mut unit_key = UnitKey::new();
        unit_key.insert(ID_KEY.to_owned(), id.into());
        Self::new(type_id, unit_key, UnitMetadata::new(), None)
    }

    pub fn id(&self) -> Option<&Value> {
        self.unit_key.get(ID_KEY)
    }

    pub fn storage_path(&self) -> Option<&Path> {
        self.storage_path.as_deref()
    }
}

/// Association query restricting units to a set of types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UnitCriteria {
    pub type_ids: Vec<String>,
}

impl UnitCriteria {
    pub fn for_types<I, S>(type_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_ids: type_ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, unit: &Unit) -> bool {
        self.type_ids.contains(&unit.type_id)
    }
}

/// Unit search in the host's document-filter shape, e.g.
/// `{"filters": {"id": "foo"}}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SearchCriteria {
    pub filters: Map<String, Value>,
}

impl SearchCriteria {
    pub fn by_id(id: impl Into<Value>) -> Self {
        let mut filters = Map::new();
        filters.insert(ID_KEY.to_owned(), id.into());
        Self { filters }
    }

    pub fn id_filter(&self) -> Option<&Value> {
        self.filters.get(ID_KEY)
    }
}

/// Outcome record a plugin returns to the host.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Report {
    pub success: bool,
    pub summary: Value,
    pub details: Value,
}
