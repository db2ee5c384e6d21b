use std::fmt;
use crate::core::error::{Error, ErrorKind, Result};

/// Normalized index term. Terms are stored and matched lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term(String);

impl Term {
    pub fn new(text: &str) -> Self {
        Term(text.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a stored term key falls under this prefix.
    pub fn is_prefix_of(&self, stored: &str) -> bool {
        stored.starts_with(self.0.as_str())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Facet names are used verbatim as sub-namespace names.
pub fn check_facet_name(facet: &str) -> Result<()> {
    if facet.is_empty() {
        return Err(Error::new(
            ErrorKind::Validation,
            "index name must be non-empty".to_string(),
        ));
    }
    Ok(())
}
