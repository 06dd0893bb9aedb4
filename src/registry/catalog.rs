use schemars::schema_for;
use serde::Serialize;
use serde_json::Value;

use super::{CommandCategory, CommandInfo};

/// A registry entry: metadata + JSON schema for the params.
#[derive(Debug, Clone, Serialize)]
pub struct CommandRegistryEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub category: CommandCategory,
    pub mutating: bool,
    pub param_schema: Value,
}

pub(super) fn empty_object_schema() -> Value {
    serde_json::json!({ "type": "object", "properties": {} })
}

pub(super) fn schema_value<T: schemars::JsonSchema>() -> Value {
    let root = schema_for!(T);
    serde_json::to_value(root).unwrap_or(empty_object_schema())
}

pub(super) fn entry(info: CommandInfo, param_schema: Value) -> CommandRegistryEntry {
    CommandRegistryEntry {
        name: info.name,
        description: info.description,
        category: info.category,
        mutating: info.mutating,
        param_schema,
    }
}

pub(super) fn de<T: serde::de::DeserializeOwned>(input: &Value) -> Result<T, String> {
    serde_json::from_value(input.clone()).map_err(|e| e.to_string())
}

/// The complete command registry, auto-generated from param struct schemas.
pub fn command_registry() -> Vec<CommandRegistryEntry> {
    super::Command::registry_entries()
}

/// Registry entries grouped under their category, in category order.
pub fn registry_by_category() -> Vec<(CommandCategory, Vec<CommandRegistryEntry>)> {
    let all = command_registry();
    CommandCategory::all()
        .iter()
        .map(|cat| {
            let entries = all.iter().filter(|e| e.category == *cat).cloned().collect();
            (*cat, entries)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::registry::Command;

    #[test]
    fn command_names_are_unique() {
        let registry = command_registry();
        let names: HashSet<&str> = registry.iter().map(|e| e.name).collect();
        assert_eq!(names.len(), registry.len());
    }

    #[test]
    fn every_category_has_commands() {
        for (cat, entries) in registry_by_category() {
            assert!(!entries.is_empty(), "{} has no commands", cat.slug());
        }
    }

    #[test]
    fn param_schemas_describe_fields() {
        let registry = command_registry();
        let select = registry.iter().find(|e| e.name == "select").unwrap();
        assert!(select.param_schema["properties"]["indices"].is_object());
        assert!(select.mutating);
        let save = registry.iter().find(|e| e.name == "save_frame").unwrap();
        assert!(!save.mutating);
    }

    #[test]
    fn from_json_resolves_matching_command() {
        for entry in command_registry() {
            let result = Command::from_json(entry.name, &serde_json::json!({}));
            // Commands with required params reject an empty object; the rest parse.
            if let Ok(cmd) = result {
                assert_eq!(cmd.info().name, entry.name);
            }
        }
        assert!(Command::from_json("nope", &serde_json::json!({})).is_err());
    }

    #[test]
    fn from_json_builds_param_commands() {
        let cmd = Command::from_json("set_hex", &serde_json::json!({ "hex": "123456FF" })).unwrap();
        assert!(matches!(cmd, Command::SetHex(ref p) if p.hex == "123456FF"));
    }
}
