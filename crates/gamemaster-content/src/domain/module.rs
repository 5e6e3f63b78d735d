//! Campaign module sources.

use serde::{Deserialize, Serialize};

/// Encoding of an uploaded campaign module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    /// Structured module as JSON.
    Json,
    /// Structured module as YAML.
    Yaml,
    /// Campaign document as Markdown.
    Markdown,
}

impl ModuleFormat {
    /// Structured modules replace the rule system; documents only add
    /// campaign text.
    #[must_use]
    pub fn is_structured(self) -> bool {
        matches!(self, Self::Json | Self::Yaml)
    }
}

/// A campaign module as received from the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSource {
    /// How `content` is encoded.
    pub format: ModuleFormat,
    /// File or display name of the module.
    pub name: String,
    /// Raw module content.
    pub content: String,
}

/// Fields read from a structured module. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StructuredModule {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub campaign_text: Option<String>,
}

/// Plain text extracted from a campaign document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignDocument {
    /// Document name.
    pub name: String,
    /// Full plain text.
    pub text: String,
}
