use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::parse_pair;

/// Identity of a component instance: the registered type and an instance name.
///
/// An empty `name` denotes the default instance of the type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentKey {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub name: String,
}

impl ComponentKey {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    /// Parse a `"type"` or `"type:name"` component reference.
    pub fn parse(reference: &str) -> Self {
        let (type_name, name) = parse_pair(reference);
        Self::new(type_name, name)
    }

    /// Whether this is the unnamed, default instance of its type.
    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.type_name)
        } else {
            write!(f, "{}:{}", self.type_name, self.name)
        }
    }
}

impl FromStr for ComponentKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
