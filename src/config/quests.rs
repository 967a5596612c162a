//! Static quest definitions and the optional reward description table.
//!
//! Both are JSON files loaded once at startup and never mutated afterwards.

use crate::error::{ConfigError, Result};
use crate::gateway::HeroId;
use alloy::primitives::Address;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestDefinition {
    pub name: String,
    pub contract_address: Address,
    #[serde(default)]
    pub level: u8,
    /// Eligible heroes, in the order they should be grouped into batches.
    #[serde(alias = "professionHeroes")]
    pub heroes: Vec<HeroId>,
    /// Overrides the global `QUEST_ATTEMPTS` for this quest.
    #[serde(default)]
    pub attempts: Option<u8>,
}

impl QuestDefinition {
    pub fn attempts_or(&self, default_attempts: u8) -> u8 {
        self.attempts.unwrap_or(default_attempts)
    }
}

pub fn parse_quest_definitions(raw: &str) -> Result<Vec<QuestDefinition>> {
    let quests: Vec<QuestDefinition> = serde_json::from_str(raw)
        .map_err(|e| ConfigError::Invalid(format!("quest definitions are not valid JSON: {e}")))?;
    if quests.is_empty() {
        return Err(ConfigError::Invalid("at least one quest definition is required".to_string()).into());
    }
    for quest in &quests {
        if quest.name.trim().is_empty() {
            return Err(ConfigError::Invalid("quest definition with empty name".to_string()).into());
        }
        if quest.attempts == Some(0) {
            return Err(ConfigError::Invalid(format!(
                "quest `{}` must request at least one attempt",
                quest.name
            ))
            .into());
        }
        let mut seen = HashSet::new();
        if let Some(hero) = quest.heroes.iter().find(|hero| !seen.insert(**hero)) {
            return Err(ConfigError::Invalid(format!(
                "quest `{}` lists hero {hero} more than once",
                quest.name
            ))
            .into());
        }
    }
    Ok(quests)
}

pub fn load_quest_definitions(path: &Path) -> Result<Vec<QuestDefinition>> {
    let raw = fs::read_to_string(path).map_err(|e| {
        ConfigError::Invalid(format!("cannot read quests file `{}`: {e}", path.display()))
    })?;
    parse_quest_definitions(&raw)
}

/// Human readable names for reward items, keyed by item address.
#[derive(Debug, Clone, Default)]
pub struct RewardTable {
    names: HashMap<Address, String>,
}

impl RewardTable {
    pub fn from_json(raw: &str) -> Result<Self> {
        let names: HashMap<Address, String> = serde_json::from_str(raw)
            .map_err(|e| ConfigError::Invalid(format!("rewards table is not valid JSON: {e}")))?;
        Ok(Self { names })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            ConfigError::Invalid(format!("cannot read rewards file `{}`: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    /// Falls back to the checksummed item address when the item is unknown.
    pub fn describe(&self, item: Address) -> String {
        self.names
            .get(&item)
            .cloned()
            .unwrap_or_else(|| item.to_checksum(None))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn parses_profession_hero_alias_and_defaults() {
        let raw = r#"[
            {
                "name": "Foraging",
                "contractAddress": "0x3132c76acF2217646fB8391918D28a16bD8A8Ef4",
                "level": 1,
                "professionHeroes": [101, 102]
            }
        ]"#;
        let quests = parse_quest_definitions(raw).expect("valid quests");
        assert_eq!(quests.len(), 1);
        assert_eq!(quests[0].heroes, vec![101, 102]);
        assert_eq!(quests[0].level, 1);
        assert_eq!(quests[0].attempts_or(5), 5);
    }

    #[test]
    fn rejects_empty_quest_list() {
        let err = parse_quest_definitions("[]").expect_err("empty list must fail");
        assert!(err.to_string().contains("at least one quest"));
    }

    #[test]
    fn rejects_zero_attempt_override() {
        let raw = r#"[{"name":"Fishing","contractAddress":"0x0000000000000000000000000000000000000001","heroes":[1],"attempts":0}]"#;
        let err = parse_quest_definitions(raw).expect_err("zero attempts must fail");
        assert!(err.to_string().contains("Fishing"));
    }

    #[test]
    fn rejects_hero_listed_twice_in_one_quest() {
        let raw = r#"[{"name":"Fishing","contractAddress":"0x0000000000000000000000000000000000000001","heroes":[4,7,4]}]"#;
        let err = parse_quest_definitions(raw).expect_err("duplicate hero must fail");
        assert!(err.to_string().contains("hero 4 more than once"));
    }

    #[test]
    fn same_hero_in_different_quests_is_accepted() {
        let raw = r#"[
            {"name":"Fishing","contractAddress":"0x0000000000000000000000000000000000000001","heroes":[4]},
            {"name":"Foraging","contractAddress":"0x0000000000000000000000000000000000000002","heroes":[4]}
        ]"#;
        assert_eq!(parse_quest_definitions(raw).expect("valid quests").len(), 2);
    }

    #[test]
    fn reward_table_falls_back_to_address() {
        let known = address!("24eA0D436d3c2602fbfEfBe6a16bBc304C963D04");
        let unknown = address!("0000000000000000000000000000000000000abc");
        let table = RewardTable::from_json(&format!(r#"{{"{known:#x}": "Gaia's Tears"}}"#))
            .expect("valid table");
        assert_eq!(table.describe(known), "Gaia's Tears");
        assert_eq!(table.describe(unknown), unknown.to_checksum(None));
    }
}
