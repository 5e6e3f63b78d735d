//! Character sheet generation through the model gateway.

use gamemaster_core::error::DomainError;
use gamemaster_core::gateway::{CompletionRequest, ModelGateway};
use gamemaster_core::message::Turn;
use gamemaster_core::sheet::{AttributeValue, Attributes, CharacterSheet, RuleSystem, SheetRole};
use serde_json::Value;
use tracing::{debug, warn};

const SHEET_MAX_TOKENS: u32 = 400;
const SHEET_TEMPERATURE: f32 = 0.7;

fn sheet_prompt(rules: &RuleSystem, role: SheetRole, name: &str) -> String {
    let attributes = if rules.attributes.is_empty() {
        "whatever attributes the system uses".to_owned()
    } else {
        rules.attributes.join(", ")
    };
    format!(
        "You are a character sheet generator for the {} system. Create the sheet of the {} \
'{name}' with attributes ({attributes}), backstory and skills. Reply only with a JSON object \
of the form {{\"name\": string, \"class\": string, \"attributes\": {{name: value}}, \
\"history\": string}}.",
        rules.name,
        role.label()
    )
}

fn attribute_value(value: &Value) -> AttributeValue {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map_or_else(|| AttributeValue::Text(n.to_string()), AttributeValue::Number),
        Value::String(s) => AttributeValue::parse(s),
        other => AttributeValue::Text(other.to_string()),
    }
}

fn text_field(object: &serde_json::Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|k| object.get(*k).and_then(Value::as_str))
        .unwrap_or_default()
        .to_owned()
}

/// Reads a sheet out of a model reply. Tolerates prose or code fences around
/// the JSON object and loosely typed attribute values. The requested name and
/// role always win over whatever the model wrote.
///
/// # Errors
///
/// Returns `DomainError::Gateway` when no JSON object can be found.
pub fn parse_sheet(reply: &str, role: SheetRole, name: &str) -> Result<CharacterSheet, DomainError> {
    let start = reply.find('{');
    let end = reply.rfind('}');
    let json = match (start, end) {
        (Some(s), Some(e)) if s < e => &reply[s..=e],
        _ => {
            return Err(DomainError::Gateway(
                "sheet reply contains no JSON object".to_owned(),
            ));
        }
    };
    let value: Value = serde_json::from_str(json)
        .map_err(|e| DomainError::Gateway(format!("malformed sheet JSON: {e}")))?;
    let Value::Object(object) = value else {
        return Err(DomainError::Gateway("sheet JSON is not an object".to_owned()));
    };

    let attributes: Attributes = match object.get("attributes") {
        Some(Value::Object(attrs)) => attrs
            .iter()
            .map(|(k, v)| (k.clone(), attribute_value(v)))
            .collect(),
        _ => Attributes::new(),
    };

    Ok(CharacterSheet {
        name: name.to_owned(),
        role,
        class: text_field(&object, &["class", "clase"]),
        attributes,
        history: text_field(&object, &["history", "backstory", "trasfondo"]),
    })
}

/// Asks the model to write a sheet for `name` under `rules`.
///
/// # Errors
///
/// Propagates gateway failures and returns `DomainError::Gateway` when the
/// reply is not a usable sheet.
pub async fn generate_sheet(
    rules: &RuleSystem,
    role: SheetRole,
    name: &str,
    gateway: &dyn ModelGateway,
) -> Result<CharacterSheet, DomainError> {
    let request = CompletionRequest {
        messages: vec![Turn::user(sheet_prompt(rules, role, name))],
        max_tokens: SHEET_MAX_TOKENS,
        temperature: SHEET_TEMPERATURE,
    };
    let reply = gateway.complete(&request).await?;
    let mut sheet = parse_sheet(&reply, role, name)?;
    // Rule-system attributes first, in their listed order; extras keep theirs.
    sheet.attributes.sort_by_cached_key(|key, _| {
        rules
            .attributes
            .iter()
            .position(|a| a == key)
            .unwrap_or(usize::MAX)
    });
    debug!(name, attributes = sheet.attributes.len(), "sheet generated");
    Ok(sheet)
}

/// Generates a companion sheet, falling back to a name-only sheet when the
/// model is unreachable or answers with something unusable.
pub async fn companion_sheet(
    rules: &RuleSystem,
    name: &str,
    gateway: &dyn ModelGateway,
) -> CharacterSheet {
    match generate_sheet(rules, SheetRole::Companion, name, gateway).await {
        Ok(sheet) => sheet,
        Err(e) => {
            warn!(name, error = %e, "companion sheet generation failed; using name only");
            CharacterSheet::named(name, SheetRole::Companion)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use gamemaster_test_support::{FailingGateway, ScriptedGateway};

    fn rules() -> RuleSystem {
        RuleSystem {
            name: "D20".to_owned(),
            attributes: vec!["STR".to_owned(), "DEX".to_owned()],
            campaign_text: None,
            source_hash: None,
        }
    }

    #[test]
    fn test_parse_sheet_tolerates_fences_and_loose_values() {
        // Arrange
        let reply = "Here you go:\n```json\n{\"name\": \"Other\", \"class\": \"Cleric\", \
\"attributes\": {\"STR\": 12, \"DEX\": \"14\", \"CON\": 10.5, \"WIS\": \"wise\"}, \
\"backstory\": \"A temple orphan.\"}\n```";

        // Act
        let sheet = parse_sheet(reply, SheetRole::Companion, "Bram").unwrap();

        // Assert
        assert_eq!(sheet.name, "Bram");
        assert_eq!(sheet.class, "Cleric");
        assert_eq!(sheet.history, "A temple orphan.");
        assert_eq!(sheet.attributes["STR"], AttributeValue::Number(12));
        assert_eq!(sheet.attributes["DEX"], AttributeValue::Number(14));
        assert_eq!(sheet.attributes["CON"], AttributeValue::Text("10.5".to_owned()));
        assert_eq!(sheet.attributes["WIS"], AttributeValue::Text("wise".to_owned()));
    }

    #[test]
    fn test_parse_sheet_without_json_is_gateway_error() {
        let result = parse_sheet("I cannot do that.", SheetRole::Companion, "Bram");

        assert!(matches!(result, Err(DomainError::Gateway(_))));
    }

    #[tokio::test]
    async fn test_generate_sheet_prompts_with_rules_and_name() {
        // Arrange
        let gateway = ScriptedGateway::new([r#"{"class": "Ranger", "history": "Scout."}"#]);

        // Act
        let sheet = generate_sheet(&rules(), SheetRole::Companion, "Bram", &gateway)
            .await
            .unwrap();

        // Assert
        assert_eq!(sheet.class, "Ranger");
        let prompt = &gateway.requests()[0].messages[0].content;
        assert!(prompt.contains("D20"));
        assert!(prompt.contains("'Bram'"));
        assert!(prompt.contains("STR, DEX"));
    }

    #[tokio::test]
    async fn test_generated_attributes_follow_rule_order() {
        // Arrange
        let gateway = ScriptedGateway::new([
            r#"{"class": "Ranger", "attributes": {"LUCK": 3, "DEX": 15, "STR": 11}}"#,
        ]);

        // Act
        let sheet = generate_sheet(&rules(), SheetRole::Companion, "Bram", &gateway)
            .await
            .unwrap();

        // Assert
        let keys: Vec<_> = sheet.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["STR", "DEX", "LUCK"]);
    }

    #[tokio::test]
    async fn test_companion_sheet_falls_back_to_name_only() {
        let sheet = companion_sheet(&rules(), "Bram", &FailingGateway).await;

        assert_eq!(sheet, CharacterSheet::named("Bram", SheetRole::Companion));
    }

    #[tokio::test]
    async fn test_companion_sheet_falls_back_on_garbage_reply() {
        let gateway = ScriptedGateway::new(["no sheet here"]);

        let sheet = companion_sheet(&rules(), "Bram", &gateway).await;

        assert_eq!(sheet, CharacterSheet::named("Bram", SheetRole::Companion));
    }
}
