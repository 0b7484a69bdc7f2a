//! Composition properties
//!
//! Name joining and read-only precedence across arbitrary scope chains.

use fieldscope_core::{compose, ReadOnly, ScopeContext, ScopeOverrides};
use proptest::prelude::*;
use serde_json::json;

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,7}(\\[[0-9]{1,2}\\])?"
}

fn read_only() -> impl Strategy<Value = ReadOnly> {
    prop_oneof![
        Just(ReadOnly::Unset),
        Just(ReadOnly::Literal(false)),
        Just(ReadOnly::Literal(true)),
    ]
}

#[test]
fn test_nested_scopes_scenario() {
    let ctx = ScopeContext::root()
        .derive(&ScopeOverrides::named("array"))
        .derive(&ScopeOverrides::named("nestedArray"));
    let query = ctx.query(Some("foo"), &ReadOnly::Unset).unwrap();
    assert_eq!(query.full_name.as_str(), "array.nestedArray.foo");
}

#[test]
fn test_read_only_through_transparent_scope() {
    let ctx = ScopeContext::root()
        .derive(&ScopeOverrides::new().with_read_only(true))
        .derive(&ScopeOverrides::new());
    let query = ctx.query(None, &ReadOnly::Unset).unwrap();
    assert_eq!(query.read_only, Some(true));
}

#[test]
fn test_descendant_false_overrides_ancestor_true() {
    let ctx = ScopeContext::root()
        .derive(&ScopeOverrides::new().with_read_only(true))
        .derive(&ScopeOverrides::new().with_read_only(false));
    let query = ctx.query(Some("a"), &ReadOnly::Unset).unwrap();
    assert_eq!(query.read_only, Some(false));
}

#[test]
fn test_predicate_sees_deeper_context() {
    // declared at A, resolved below B which sets "mode"
    let ctx = ScopeContext::root()
        .derive(
            &ScopeOverrides::named("a")
                .with_attr("mode", "edit")
                .with_read_only(ReadOnly::when(|ctx| ctx.get("mode") == Some(&json!("view")))),
        )
        .derive(&ScopeOverrides::named("b").with_attr("mode", "view"));
    let query = ctx.query(Some("c"), &ReadOnly::Unset).unwrap();
    assert_eq!(query.read_only, Some(true));
    assert_eq!(query.full_name.as_str(), "a.b.c");
}

proptest! {
    #[test]
    fn prop_chain_joins_with_single_dots(segments in prop::collection::vec(segment(), 1..12)) {
        let ctx = segments.iter().fold(ScopeContext::root(), |ctx, s| {
            ctx.derive(&ScopeOverrides::named(s.clone()))
        });
        let expected = segments.join(".");
        prop_assert_eq!(ctx.name().as_str(), expected.as_str());
        prop_assert!(!ctx.name().as_str().starts_with('.'));
        prop_assert!(!ctx.name().as_str().contains(".."));
    }

    #[test]
    fn prop_compose_is_associative(a in segment(), b in segment(), c in segment()) {
        let left = compose(Some(compose(Some(a.as_str()), Some(b.as_str())).as_str()), Some(c.as_str()));
        let right = compose(Some(a.as_str()), Some(compose(Some(b.as_str()), Some(c.as_str())).as_str()));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_empty_segments_are_transparent(
        segments in prop::collection::vec(prop_oneof![segment(), Just(String::new())], 0..10)
    ) {
        let composed = segments
            .iter()
            .fold(String::new(), |acc, s| compose(Some(acc.as_str()), Some(s.as_str())));
        let expected = segments
            .iter()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(".");
        prop_assert_eq!(composed, expected);
    }

    #[test]
    fn prop_innermost_explicit_flag_wins(flags in prop::collection::vec(read_only(), 0..10)) {
        let ctx = flags.iter().fold(ScopeContext::root(), |ctx, flag| {
            ctx.derive(&ScopeOverrides::new().with_read_only(flag.clone()))
        });
        let expected = flags.iter().rev().find_map(|flag| match flag {
            ReadOnly::Literal(value) => Some(*value),
            _ => None,
        });
        let query = ctx.query(None, &ReadOnly::Unset).unwrap();
        prop_assert_eq!(query.read_only, expected);
    }

    #[test]
    fn prop_derive_is_idempotent(segments in prop::collection::vec(segment(), 0..6)) {
        let build = || segments.iter().fold(ScopeContext::root(), |ctx, s| {
            ctx.derive(&ScopeOverrides::named(s.clone()).with_attr("depth", s.len()))
        });
        let first = build();
        let second = build();
        prop_assert_eq!(first.fingerprint(), second.fingerprint());
        prop_assert_eq!(first, second);
    }
}
