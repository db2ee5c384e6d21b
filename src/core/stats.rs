use std::path::PathBuf;
use serde::{Serialize, Deserialize};

/// Point-in-time statistics, gathered in a single read transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseStats {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub total_records: u64,
    pub facets: Vec<FacetStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetStats {
    pub name: String,
    pub term_count: u64,
}

impl DatabaseStats {
    pub fn facet(&self, name: &str) -> Option<&FacetStats> {
        self.facets.iter().find(|f| f.name == name)
    }
}
