//! Indexed list scopes and list components

use anyhow::Result;
use fieldscope_core::Attributes;
use fieldscope_test_utils::{
    easy_array, hand_written_names, init_tracing, lookup, nested_list_form, sample_form_data,
    text_field,
};
use fieldscope_tree::{ListScope, Node, Renderer, Scope, ScopeNode};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

#[test]
fn nested_lists_match_hand_written_names() -> Result<()> {
    init_tracing();
    let data = sample_form_data();

    let rendered = Renderer::new().render(&nested_list_form(&data))?;
    assert_eq!(rendered.names(), hand_written_names(&data));
    assert_eq!(
        &rendered.names()[..2],
        &["array[0].nestedArray[0].foo", "array[0].nestedArray[0].boo"]
    );
    Ok(())
}

#[test]
fn list_items_expose_their_keys() -> Result<()> {
    init_tracing();
    let keyed = Node::component("keyed", |scope: &mut Scope<'_>| {
        let key = scope.item_key().unwrap_or("none").to_owned();
        let query = scope.use_scope(Some("value"))?;
        Ok(Node::element(
            "input",
            Attributes::new()
                .with("name", query.full_name.into_string())
                .with("key", key),
        ))
    });
    let tree: Node = ListScope::new("rows", ["r1", "r2"]).child(keyed).into();

    let rendered = Renderer::new().render(&tree)?;
    let keys: Vec<_> = rendered
        .elements()
        .iter()
        .filter_map(|el| el.props().get_str("key"))
        .collect();
    assert_eq!(keys, vec!["r1", "r2"]);
    assert_eq!(rendered.names(), vec!["rows[0].value", "rows[1].value"]);
    Ok(())
}

#[test]
fn item_key_is_innermost_list() -> Result<()> {
    init_tracing();
    let reader = Node::component("reader", |scope: &mut Scope<'_>| {
        let key = scope.item_key().unwrap_or_default().to_owned();
        Ok(Node::element("key", Attributes::new().with("key", key)))
    });
    let tree: Node = ListScope::new("outer", ["o1"])
        .child(
            ScopeNode::named("group")
                .child(ListScope::new("inner", ["i1", "i2"]).child(reader.clone()))
                .child(reader),
        )
        .into();

    let rendered = Renderer::new().render(&tree)?;
    let keys: Vec<_> = rendered
        .elements()
        .iter()
        .filter_map(|el| el.props().get_str("key"))
        .collect();
    assert_eq!(keys, vec!["i1", "i2", "o1"]);
    Ok(())
}

#[test]
fn list_scope_shares_flag_and_attributes() -> Result<()> {
    init_tracing();
    let tree: Node = ScopeNode::named("order")
        .child(
            ListScope::new("lines", ["a", "b"])
                .read_only(true)
                .attr("row", true)
                .child(text_field("sku")),
        )
        .into();

    let rendered = Renderer::new().render(&tree)?;
    assert_eq!(rendered.len(), 2);
    assert_eq!(
        rendered.elements()[1].props().to_json(),
        json!({"name": "order.lines[1].sku", "readOnly": true, "row": true})
    );
    Ok(())
}

#[test]
fn empty_list_renders_nothing() -> Result<()> {
    let tree: Node = ListScope::new("rows", Vec::<String>::new())
        .child(text_field("x"))
        .into();
    let rendered = Renderer::new().render(&tree)?;
    assert!(rendered.is_empty());
    assert_eq!(rendered.stats().scopes_derived, 0);
    Ok(())
}

#[test]
fn list_component_reports_missing_data() {
    let data = Arc::new(json!({"array": []}));
    let tree = easy_array("missing", data, vec![text_field("x")]);
    let err = Renderer::new().render(&tree).unwrap_err();
    assert_eq!(
        err.to_string(),
        "component 'EasyArray' failed: no list at 'missing'"
    );
}

#[test]
fn lookup_follows_indexed_paths() {
    let data = sample_form_data();
    assert_eq!(
        lookup(&data, "array[1].nestedArray[0].foo"),
        Some(&json!("5"))
    );
    assert_eq!(lookup(&data, "array[2]"), None);
    assert_eq!(lookup(&data, "array[x]"), None);
}
