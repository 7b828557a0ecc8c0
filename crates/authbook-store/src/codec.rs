//! YAML encoding and lenient decoding of the credential document.
//!
//! Decoding goes through an untyped [`Value`] tree so that a wrong shape in
//! one node never prevents reading the rest of the document:
//!
//! - a non-mapping project or file node reads as empty;
//! - a non-mapping credential reads as a blank credential;
//! - a non-sequence list reads as empty, and non-mapping list items are skipped;
//! - numbers and booleans where strings are expected read as their text form,
//!   and null reads as an empty string.
//!
//! Keys are trimmed on the way in. Keyed entries whose key is blank are
//! dropped.

use authbook_types::{
    AccountUpdate, Credential, Document, Node, OrderedEntry, OrderedMap, StepRecord,
};
use serde_yaml::{Mapping, Value};
use tracing::warn;

use crate::error::{StoreError, StoreResult};

/// Parse document text. Blank text is an empty document.
pub fn decode(text: &str) -> StoreResult<Document> {
    if text.trim().is_empty() {
        return Ok(Document::new());
    }
    let root: Value =
        serde_yaml::from_str(text).map_err(|e| StoreError::Serialization(e.to_string()))?;
    Ok(decode_document(&root))
}

/// Serialize a document, preserving key order and non-ASCII text.
pub fn encode(document: &Document) -> StoreResult<String> {
    serde_yaml::to_string(document).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Build a document from an untyped tree. A non-mapping root is empty.
pub fn decode_document(root: &Value) -> Document {
    let mut document = Document::new();
    let Some(projects) = root.as_mapping() else {
        if !root.is_null() {
            warn!("document root is not a mapping; reading as empty");
        }
        return document;
    };

    for (project_key, files) in projects {
        let Some(project) = scalar_text(project_key) else {
            continue;
        };
        document.insert_project(project.clone());
        let Some(files) = files.as_mapping() else {
            continue;
        };
        for (file_key, node) in files {
            let Some(file) = scalar_text(file_key) else {
                continue;
            };
            let node = match node.as_mapping() {
                Some(map) => decode_node(map),
                None => {
                    if !node.is_null() {
                        warn!(
                            project = %project,
                            file = %file,
                            "node is not a mapping; reading as empty"
                        );
                    }
                    Node::default()
                }
            };
            document.insert_node(project.clone(), file, node);
        }
    }
    document
}

/// Decode one node. A mapping with none of the structured field names is the
/// legacy layout, a bare address → credential mapping.
pub fn decode_node(map: &Mapping) -> Node {
    let structured = Node::FIELDS.iter().any(|field| map.contains_key(*field));
    if !structured {
        return Node {
            by_address: decode_legacy(map),
            ..Default::default()
        };
    }

    Node {
        by_address: map.get("by_address").map(decode_credentials).unwrap_or_default(),
        by_order: map.get("by_order").map(decode_entries).unwrap_or_default(),
        by_slot: map.get("by_slot").map(decode_slots).unwrap_or_default(),
        product_address_slots: map
            .get("product_address_slots")
            .map(decode_address_slots)
            .unwrap_or_default(),
        by_step: map.get("by_step").map(decode_steps).unwrap_or_default(),
    }
}

/// Build an [`AccountUpdate`] from an untyped tree with the same leniency
/// as document decoding.
///
/// Each view may appear under its update name or its stored name. An absent
/// or null view stays `None`; a view of the wrong container type is ignored.
/// The root itself must be a mapping.
pub fn decode_update(root: &Value) -> StoreResult<AccountUpdate> {
    let Some(map) = root.as_mapping() else {
        return Err(StoreError::Serialization(
            "account update is not a mapping".into(),
        ));
    };
    Ok(AccountUpdate {
        accounts: update_view(map, "accounts", "by_address", Value::is_mapping)
            .map(decode_credentials),
        accounts_list: update_view(map, "accounts_list", "by_order", Value::is_sequence)
            .map(decode_entries),
        accounts_slots: update_view(map, "accounts_slots", "by_slot", Value::is_mapping)
            .map(decode_slots),
        product_address_slots: update_view(
            map,
            "product_address_slots",
            "product_address_slots",
            Value::is_mapping,
        )
        .map(decode_address_slots),
    })
}

fn update_view<'a>(
    map: &'a Mapping,
    name: &str,
    stored_name: &str,
    shape: fn(&Value) -> bool,
) -> Option<&'a Value> {
    let value = map.get(name).or_else(|| map.get(stored_name))?;
    if value.is_null() {
        return None;
    }
    if !shape(value) {
        warn!(view = name, "ignoring update view of the wrong shape");
        return None;
    }
    Some(value)
}

fn decode_legacy(map: &Mapping) -> OrderedMap<Credential> {
    let mut out = OrderedMap::new();
    for (key, value) in map {
        let Some(address) = trimmed_key(key) else {
            continue;
        };
        if let Some(fields) = value.as_mapping() {
            out.insert(address, credential_from(fields));
        }
    }
    out
}

fn decode_credentials(value: &Value) -> OrderedMap<Credential> {
    let mut out = OrderedMap::new();
    let Some(map) = value.as_mapping() else {
        return out;
    };
    for (key, info) in map {
        let Some(address) = trimmed_key(key) else {
            continue;
        };
        let credential = info.as_mapping().map(credential_from).unwrap_or_default();
        out.insert(address, credential);
    }
    out
}

fn decode_entries(value: &Value) -> Vec<OrderedEntry> {
    let Some(items) = value.as_sequence() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item.as_mapping() {
            Some(fields) => out.push(entry_from(fields)),
            None => warn!("skipping non-mapping by_order item"),
        }
    }
    out
}

fn decode_slots(value: &Value) -> OrderedMap<OrderedEntry> {
    let mut out = OrderedMap::new();
    let Some(map) = value.as_mapping() else {
        return out;
    };
    for (key, info) in map {
        let Some(slot) = trimmed_key(key) else {
            continue;
        };
        let entry = info.as_mapping().map(entry_from).unwrap_or_default();
        out.insert(slot, entry);
    }
    out
}

fn decode_address_slots(value: &Value) -> OrderedMap<String> {
    let mut out = OrderedMap::new();
    let Some(map) = value.as_mapping() else {
        return out;
    };
    for (key, address) in map {
        let Some(slot) = trimmed_key(key) else {
            continue;
        };
        let address = scalar_text(address).unwrap_or_default();
        out.insert(slot, address.trim().to_string());
    }
    out
}

fn decode_steps(value: &Value) -> Vec<StepRecord> {
    let Some(items) = value.as_sequence() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let Some(fields) = item.as_mapping() else {
            warn!("skipping non-mapping by_step item");
            continue;
        };
        out.push(StepRecord {
            step_index: fields.get("step_index").and_then(integer).unwrap_or_default(),
            step_name: text_field(fields, "step_name"),
            operation_event: text_field(fields, "operation_event"),
            by_address: fields.get("by_address").map(decode_credentials).unwrap_or_default(),
            by_order: fields.get("by_order").map(decode_entries).unwrap_or_default(),
            by_slot: fields.get("by_slot").map(decode_slots).unwrap_or_default(),
            product_address_slots: fields
                .get("product_address_slots")
                .map(decode_address_slots)
                .unwrap_or_default(),
        });
    }
    out
}

fn credential_from(fields: &Mapping) -> Credential {
    Credential {
        email: text_field(fields, "email"),
        password: text_field(fields, "password"),
    }
}

fn entry_from(fields: &Mapping) -> OrderedEntry {
    OrderedEntry {
        address: text_field(fields, "address").trim().to_string(),
        email: text_field(fields, "email"),
        password: text_field(fields, "password"),
    }
}

fn text_field(fields: &Mapping, name: &str) -> String {
    fields.get(name).and_then(scalar_text).unwrap_or_default()
}

/// Text form of a scalar. Null is empty; sequences and mappings have none.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

fn trimmed_key(key: &Value) -> Option<String> {
    let text = scalar_text(key)?;
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
