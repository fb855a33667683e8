use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_GROUP: &str = "other";

/// A boilerplate package offered by the init config package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boilerplate {
    /// Key in the mapping, also accepted by `--type`.
    pub key: String,
    pub package: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub deprecated: bool,
}

impl Boilerplate {
    /// Label shown when choosing a boilerplate.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.description {
            Some(description) => format!("{} ({description})", self.key),
            None => self.key.clone(),
        }
    }
}

pub type BoilerplateMapping = IndexMap<String, Boilerplate>;

#[derive(Debug, Deserialize)]
struct RawBoilerplate {
    package: String,
    name: Option<String>,
    description: Option<String>,
    category: Option<String>,
    #[serde(alias = "deprecated")]
    deprecate: Option<Value>,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        Value::Number(_) | Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}

/// Reads `config.boilerplate` from a registry package document.
///
/// Entries that are not objects with a `package` field are skipped.
#[must_use]
pub fn parse_boilerplate_mapping(package_info: &Value) -> Option<BoilerplateMapping> {
    let mapping = package_info
        .get("config")
        .and_then(|config| config.get("boilerplate"))
        .and_then(Value::as_object)?;

    let parsed = mapping
        .iter()
        .filter_map(|(key, raw)| {
            let raw: RawBoilerplate = match serde_json::from_value(raw.clone()) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(key, error = %e, "skipping invalid boilerplate entry");
                    return None;
                }
            };
            Some((
                key.clone(),
                Boilerplate {
                    key: key.clone(),
                    name: raw.name.unwrap_or_else(|| key.clone()),
                    package: raw.package,
                    description: raw.description,
                    category: raw.category,
                    deprecated: raw.deprecate.as_ref().is_some_and(is_truthy),
                },
            ))
        })
        .collect();
    Some(parsed)
}

/// Groups boilerplates by category, keeping first-seen order. Entries
/// without a category land in `other`.
#[must_use]
pub fn group_by_category(mapping: &BoilerplateMapping) -> IndexMap<String, Vec<Boilerplate>> {
    let mut groups: IndexMap<String, Vec<Boilerplate>> = IndexMap::new();
    for boilerplate in mapping.values() {
        let group = boilerplate
            .category
            .clone()
            .unwrap_or_else(|| DEFAULT_GROUP.to_string());
        groups.entry(group).or_default().push(boilerplate.clone());
    }
    groups
}
