//! Built-in rule systems.

use gamemaster_core::sheet::RuleSystem;

/// Attribute names of the classic D20 system, in the order they are asked.
pub const D20_ATTRIBUTES: [&str; 6] = ["STR", "DEX", "CON", "INT", "WIS", "CHA"];

/// Menu of rule systems offered during onboarding. Only the first entry is
/// currently supported.
pub const RULES_MENU: &str = "1) Classic D20";

/// The classic D20 rule system.
#[must_use]
pub fn d20() -> RuleSystem {
    RuleSystem {
        name: "D20".to_owned(),
        attributes: D20_ATTRIBUTES.iter().map(|a| (*a).to_owned()).collect(),
        campaign_text: None,
        source_hash: None,
    }
}

/// Resolves a menu choice to a rule system. Only `1` is supported.
#[must_use]
pub fn by_choice(choice: &str) -> Option<RuleSystem> {
    match choice.trim() {
        "1" => Some(d20()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d20_has_six_attributes_in_order() {
        let rules = d20();

        assert_eq!(rules.name, "D20");
        assert_eq!(rules.attributes, D20_ATTRIBUTES);
    }

    #[test]
    fn test_only_choice_one_is_supported() {
        assert!(by_choice(" 1 ").is_some());
        assert!(by_choice("2").is_none());
        assert!(by_choice("d20").is_none());
    }
}
