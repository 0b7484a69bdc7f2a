//! Testing utilities for fieldscope workspace
//!
//! Shared fixtures, form trees and tracing setup.

#![allow(missing_docs)]

use fieldscope_core::Attributes;
use fieldscope_tree::{with_scope, ListScope, Node, Scope, ScopeNode, TreeError, WithScope};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
});

/// Install a `RUST_LOG`-filtered subscriber once per test binary
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// Field adapter emitting `input` elements
pub fn field() -> WithScope {
    with_scope("Field", |props| Ok(Node::element("input", props)))
}

/// Field node with a local name
pub fn text_field(name: &str) -> Node {
    field().node(Attributes::new().with("name", name))
}

/// Props from key/value pairs
pub fn props<const N: usize>(pairs: [(&str, Value); N]) -> Attributes {
    pairs.into_iter().collect()
}

/// Form data with one outer item holding two nested items
pub fn sample_form_data() -> Value {
    json!({
        "array": [
            {
                "id": "a1",
                "nestedArray": [
                    { "id": "n1", "foo": "1", "boo": "2" },
                    { "id": "n2", "foo": "3", "boo": "4" }
                ]
            },
            {
                "id": "a2",
                "nestedArray": [
                    { "id": "n3", "foo": "5", "boo": "6" }
                ]
            }
        ]
    })
}

fn ids(items: &Value) -> Vec<String> {
    items
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("id").and_then(Value::as_str).map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

/// Value at a dotted, indexed path such as `array[0].nestedArray`
pub fn lookup<'v>(data: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(data, |value, segment| {
            let mut parts = segment.split('[');
            let key = parts.next().unwrap_or_default();
            let mut current = if key.is_empty() { value } else { value.get(key)? };
            for index in parts {
                let index: usize = index.strip_suffix(']')?.parse().ok()?;
                current = current.get(index)?;
            }
            Some(current)
        })
}

/// List component sized from `data` at its own full name
///
/// Reads the nearest context once to learn where it sits, then repeats
/// `template` once per item found there.
pub fn easy_array(name: &str, data: Arc<Value>, template: Vec<Node>) -> Node {
    let name = name.to_owned();
    Node::component("EasyArray", move |scope: &mut Scope<'_>| {
        let query = scope.use_scope(Some(name.as_str()))?;
        let items = lookup(&data, query.full_name.as_str()).ok_or_else(|| {
            TreeError::component("EasyArray", format!("no list at '{}'", query.full_name))
        })?;
        let list = template
            .iter()
            .cloned()
            .fold(ListScope::new(name.clone(), ids(items)), ListScope::child);
        Ok(list.into())
    })
}

/// Nested list form: `array[i].nestedArray[j].{foo,boo}`, declared with scopes
pub fn nested_list_form(data: &Value) -> Node {
    let data = Arc::new(data.clone());
    easy_array(
        "array",
        Arc::clone(&data),
        vec![easy_array(
            "nestedArray",
            data,
            vec![
                text_field("foo"),
                text_field("boo"),
                Node::element("br", Attributes::new()),
            ],
        )],
    )
}

/// The same names as [`nested_list_form`], spelled out by hand
pub fn hand_written_names(data: &Value) -> Vec<String> {
    let mut names = Vec::new();
    for (index, item) in data["array"].as_array().into_iter().flatten().enumerate() {
        let nested = item["nestedArray"].as_array().into_iter().flatten();
        for (nested_index, _) in nested.enumerate() {
            names.push(format!("array[{index}].nestedArray[{nested_index}].foo"));
            names.push(format!("array[{index}].nestedArray[{nested_index}].boo"));
        }
    }
    names
}

/// Linear chain of `depth` named scopes around one field
pub fn deep_chain(depth: usize, leaf: &str) -> Node {
    (0..depth).rev().fold(text_field(leaf), |child, level| {
        ScopeNode::named(format!("s{level}"))
            .child(child)
            .into()
    })
}
