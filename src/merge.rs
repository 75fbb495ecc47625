//! Container bootstrap and upsert rules shared by the client adapters.
//!
//! Two container shapes exist: mapping-by-name (most clients) and
//! list-with-name-field (Continue). Both rules are idempotent: re-applying
//! the same `(name, entry)` pair changes nothing.

use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::error::Error;

/// Walk `path` inside a JSON object tree, creating missing intermediate
/// objects, and return the innermost map. Non-object values standing in the
/// way are replaced; the file is this tool's to repair at that point.
pub fn ensure_object_path<'a>(
    root: &'a mut JsonValue,
    path: &[&str],
) -> Result<&'a mut serde_json::Map<String, JsonValue>, Error> {
    let mut current = root;
    for seg in path {
        if !current.is_object() {
            *current = JsonValue::Object(serde_json::Map::new());
        }
        let map = current.as_object_mut().expect("object ensured above");
        current = map
            .entry(seg.to_string())
            .or_insert_with(|| JsonValue::Object(serde_json::Map::new()));
    }
    if !current.is_object() {
        *current = JsonValue::Object(serde_json::Map::new());
    }
    Ok(current.as_object_mut().expect("object ensured above"))
}

/// Mapping-by-name upsert: `container[name] = entry`, other keys untouched,
/// new names appended at the end (objects are insertion-ordered).
pub fn upsert_json_map(
    root: &mut JsonValue,
    container: &[&str],
    name: &str,
    entry: JsonValue,
) -> Result<(), Error> {
    let map = ensure_object_path(root, container)?;
    map.insert(name.to_string(), entry);
    Ok(())
}

/// Same rule over a YAML tree.
pub fn upsert_yaml_map(
    root: &mut YamlValue,
    container: &[&str],
    name: &str,
    entry: YamlValue,
) -> Result<(), Error> {
    let mut current = root;
    for seg in container {
        if !current.is_mapping() {
            *current = YamlValue::Mapping(serde_yaml::Mapping::new());
        }
        let map = current.as_mapping_mut().expect("mapping ensured above");
        let key = YamlValue::String(seg.to_string());
        current = map
            .entry(key)
            .or_insert_with(|| YamlValue::Mapping(serde_yaml::Mapping::new()));
    }
    if !current.is_mapping() {
        *current = YamlValue::Mapping(serde_yaml::Mapping::new());
    }
    current
        .as_mapping_mut()
        .expect("mapping ensured above")
        .insert(YamlValue::String(name.to_string()), entry);
    Ok(())
}

/// List-with-name-field upsert: replace the first element whose `name`
/// field matches (position preserved), append otherwise.
pub fn upsert_yaml_list(
    root: &mut YamlValue,
    container: &[&str],
    name: &str,
    entry: YamlValue,
) -> Result<(), Error> {
    let mut current = root;
    if !current.is_mapping() {
        *current = YamlValue::Mapping(serde_yaml::Mapping::new());
    }
    let (last, parents) = container.split_last().ok_or_else(|| {
        Error::Config("list container path must not be empty".into())
    })?;
    for seg in parents {
        let map = current.as_mapping_mut().expect("mapping ensured above");
        let key = YamlValue::String(seg.to_string());
        current = map
            .entry(key)
            .or_insert_with(|| YamlValue::Mapping(serde_yaml::Mapping::new()));
        if !current.is_mapping() {
            *current = YamlValue::Mapping(serde_yaml::Mapping::new());
        }
    }
    let map = current.as_mapping_mut().expect("mapping ensured above");
    let seq = map
        .entry(YamlValue::String(last.to_string()))
        .or_insert_with(|| YamlValue::Sequence(Vec::new()));
    if !seq.is_sequence() {
        *seq = YamlValue::Sequence(Vec::new());
    }
    let seq = seq.as_sequence_mut().expect("sequence ensured above");

    let name_key = YamlValue::String("name".to_string());
    let wanted = YamlValue::String(name.to_string());
    match seq
        .iter_mut()
        .find(|el| el.as_mapping().and_then(|m| m.get(&name_key)) == Some(&wanted))
    {
        Some(slot) => *slot = entry,
        None => seq.push(entry),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_upsert_creates_missing_containers() {
        let mut root = json!({});
        upsert_json_map(&mut root, &["mcpServers"], "fs", json!({ "command": "npx" }))
            .expect("upsert");
        assert_eq!(root, json!({ "mcpServers": { "fs": { "command": "npx" } } }));
    }

    #[test]
    fn json_upsert_replaces_without_duplicating() {
        let mut root = json!({ "mcpServers": { "fs": { "command": "old" }, "db": {} } });
        upsert_json_map(&mut root, &["mcpServers"], "fs", json!({ "command": "new" }))
            .expect("upsert");
        let servers = root["mcpServers"].as_object().expect("map");
        assert_eq!(servers.len(), 2);
        assert_eq!(servers["fs"]["command"], "new");
        // Existing keys keep their relative order.
        let keys: Vec<_> = servers.keys().map(String::as_str).collect();
        assert_eq!(keys, ["fs", "db"]);
    }

    #[test]
    fn json_upsert_appends_new_names_at_the_end() {
        let mut root = json!({ "mcpServers": { "a": {}, "b": {} } });
        upsert_json_map(&mut root, &["mcpServers"], "c", json!({})).expect("upsert");
        let keys: Vec<_> = root["mcpServers"]
            .as_object()
            .expect("map")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn yaml_list_replaces_in_place() {
        let mut root: YamlValue = serde_yaml::from_str(
            "mcpServers:\n  - name: a\n    command: x\n  - name: b\n    command: y\n  - name: c\n    command: z\n",
        )
        .expect("parse yaml");
        let entry: YamlValue =
            serde_yaml::from_str("name: b\ncommand: updated\n").expect("parse entry");
        upsert_yaml_list(&mut root, &["mcpServers"], "b", entry).expect("upsert");

        let seq = root["mcpServers"].as_sequence().expect("sequence");
        assert_eq!(seq.len(), 3);
        assert_eq!(seq[0]["name"], "a");
        assert_eq!(seq[1]["name"], "b");
        assert_eq!(seq[1]["command"], "updated");
        assert_eq!(seq[2]["name"], "c");
    }

    #[test]
    fn yaml_list_appends_unknown_names() {
        let mut root = YamlValue::Mapping(serde_yaml::Mapping::new());
        let entry: YamlValue = serde_yaml::from_str("name: a\ncommand: x\n").expect("parse entry");
        upsert_yaml_list(&mut root, &["mcpServers"], "a", entry.clone()).expect("first upsert");
        upsert_yaml_list(&mut root, &["mcpServers"], "a", entry).expect("second upsert");
        assert_eq!(root["mcpServers"].as_sequence().expect("sequence").len(), 1);
    }

    #[test]
    fn yaml_map_nests_under_container() {
        let mut root: YamlValue = serde_yaml::from_str("other: keep\n").expect("parse yaml");
        let entry: YamlValue = serde_yaml::from_str("cmd: npx\n").expect("parse entry");
        upsert_yaml_map(&mut root, &["extensions"], "fs", entry).expect("upsert");
        assert_eq!(root["other"], "keep");
        assert_eq!(root["extensions"]["fs"]["cmd"], "npx");
    }
}
