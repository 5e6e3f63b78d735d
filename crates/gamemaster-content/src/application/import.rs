//! Campaign module import.
//!
//! A structured module (JSON or YAML) replaces the rule system outright. A
//! document module (Markdown) keeps the current attributes and contributes
//! its name and plain text as campaign text.

use std::fmt::Write as _;

use gamemaster_core::sheet::RuleSystem;
use pulldown_cmark::{Event, Parser, TagEnd};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::domain::module::{CampaignDocument, ModuleFormat, ModuleSource, StructuredModule};
use crate::error::ImportError;

/// Hex SHA-256 of a module's raw content.
#[must_use]
pub fn source_hash(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

/// Parses a structured module into a rule system.
///
/// # Errors
///
/// Returns `ImportError::Json`/`ImportError::Yaml` when the content does not
/// parse, or `ImportError::Empty` for a document format.
pub fn import_structured(source: &ModuleSource) -> Result<RuleSystem, ImportError> {
    let module: StructuredModule = match source.format {
        ModuleFormat::Json => serde_json::from_str(&source.content)?,
        ModuleFormat::Yaml => serde_yaml::from_str(&source.content)?,
        ModuleFormat::Markdown => return Err(ImportError::Empty(source.name.clone())),
    };

    let name = module
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| source.name.clone());
    Ok(RuleSystem {
        name,
        attributes: module
            .attributes
            .into_iter()
            .map(|a| a.trim().to_owned())
            .filter(|a| !a.is_empty())
            .collect(),
        campaign_text: module.campaign_text,
        source_hash: Some(source_hash(&source.content)),
    })
}

/// Extracts the plain text of a Markdown campaign document.
///
/// # Errors
///
/// Returns `ImportError::Empty` when the document has no text.
pub fn import_document(source: &ModuleSource) -> Result<CampaignDocument, ImportError> {
    let mut text = String::new();
    for event in Parser::new(&source.content) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak => text.push(' '),
            Event::HardBreak
            | Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock,
            ) => text.push('\n'),
            _ => {}
        }
    }

    let text = text.trim().to_owned();
    if text.is_empty() {
        return Err(ImportError::Empty(source.name.clone()));
    }
    Ok(CampaignDocument {
        name: source.name.clone(),
        text,
    })
}

/// Applies a module to the rules chosen so far and returns the resulting
/// rule system.
///
/// # Errors
///
/// Propagates the import error of the module's format.
pub fn apply_module(current: RuleSystem, source: &ModuleSource) -> Result<RuleSystem, ImportError> {
    if source.format.is_structured() {
        let rules = import_structured(source)?;
        info!(module = %rules.name, attributes = rules.attributes.len(), "structured module imported");
        return Ok(rules);
    }

    let document = import_document(source)?;
    info!(module = %document.name, chars = document.text.len(), "campaign document imported");
    Ok(RuleSystem {
        name: document.name,
        campaign_text: Some(document.text),
        source_hash: Some(source_hash(&source.content)),
        ..current
    })
}
