use std::fmt;

use serde::{Deserialize, Serialize};

/// A completed recording as listed by `GET /recordings`.
///
/// The name doubles as the stream identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recording {
    /// Unique recording name, used to build the manifest URL.
    pub name: String,
}

impl Recording {
    /// Creates a recording reference from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Recording {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
