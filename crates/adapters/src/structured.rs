// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Opaque structured-file metadata (spec §6.5 `structured_file()`).
//!
//! The `event` handler walks every API-event chunk by index rather than
//! assuming a single chunk per event, so the accessor surface stays a plain
//! tree: child count, indexed child lookup, and two leaf coercions.

/// One node of the adapter's structured chunk tree.
pub trait StructuredChunk {
    fn name(&self) -> &str;
    fn num_children(&self) -> usize;
    fn get_child(&self, index: usize) -> Option<&dyn StructuredChunk>;
    fn as_string(&self) -> Option<String>;
    fn as_int(&self) -> Option<i64>;
}

/// A `StructuredChunk` tree backed by a JSON value, used by the fake adapter
/// and suitable for any adapter implementation that serializes its native
/// chunk tree to JSON first.
#[derive(Debug, Clone)]
pub struct JsonChunk {
    name: String,
    value: serde_json::Value,
    children: Vec<JsonChunk>,
}

impl JsonChunk {
    pub fn new(name: impl Into<String>, value: serde_json::Value) -> Self {
        let children = match &value {
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(k, v)| JsonChunk::new(k.clone(), v.clone()))
                .collect(),
            serde_json::Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| JsonChunk::new(i.to_string(), v.clone()))
                .collect(),
            _ => Vec::new(),
        };
        Self {
            name: name.into(),
            value,
            children,
        }
    }
}

impl StructuredChunk for JsonChunk {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_children(&self) -> usize {
        self.children.len()
    }

    fn get_child(&self, index: usize) -> Option<&dyn StructuredChunk> {
        self.children.get(index).map(|c| c as &dyn StructuredChunk)
    }

    fn as_string(&self) -> Option<String> {
        match &self.value {
            serde_json::Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn as_int(&self) -> Option<i64> {
        self.value.as_i64()
    }
}

#[cfg(test)]
#[path = "structured_tests.rs"]
mod tests;
