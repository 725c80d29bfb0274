use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Finds the id of the first entry in `data["collections"]` whose name is exactly `name`.
///
/// Works on loosely shaped documents (hand-written files may carry extra
/// fields or numeric ids). `None` covers every kind of miss.
pub fn collection_id_by_name(data: &Value, name: &str) -> Option<String> {
    let item = data
        .get("collections")?
        .as_array()?
        .iter()
        .find(|item| item.get("name").and_then(Value::as_str) == Some(name))?;

    match item.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

pub fn load_collections(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read collections file {}", path.display()))?;
    let data = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse collections file {}", path.display()))?;
    Ok(data)
}
