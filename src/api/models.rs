//! Offline catalog of well-known model identifiers.
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Model identifiers accepted by the service.
///
/// Convenience only: identifiers are never validated against a live
/// catalog, and anything unrecognized passes through as `Other`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Model {
    Gpt4o,
    Gpt4oMini,
    Gpt41,
    Gpt41Mini,
    DeepseekChat,
    Other(String),
}

impl Model {
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt4o => "gpt-4o",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Gpt41 => "gpt-4.1",
            Model::Gpt41Mini => "gpt-4.1-mini",
            Model::DeepseekChat => "deepseek-chat",
            Model::Other(name) => name,
        }
    }
}

impl From<&str> for Model {
    fn from(name: &str) -> Self {
        match name {
            "gpt-4o" => Model::Gpt4o,
            "gpt-4o-mini" => Model::Gpt4oMini,
            "gpt-4.1" => Model::Gpt41,
            "gpt-4.1-mini" => Model::Gpt41Mini,
            "deepseek-chat" => Model::DeepseekChat,
            other => Model::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Model::from(name.as_str()))
    }
}
