//! Rendering properties over generated trees

use fieldscope_test_utils::text_field;
use fieldscope_tree::{ListScope, Node, RenderConfig, Renderer, ScopeNode};
use proptest::prelude::*;

/// One level of nesting above the field
#[derive(Debug, Clone)]
enum Level {
    Named(String),
    Transparent,
    List(String, usize),
    Flag(bool),
    Attr(String, i64),
}

fn level() -> impl Strategy<Value = Level> {
    prop_oneof![
        "[a-z]{1,6}".prop_map(Level::Named),
        Just(Level::Transparent),
        ("[a-z]{1,6}", 1..3_usize).prop_map(|(name, len)| Level::List(name, len)),
        any::<bool>().prop_map(Level::Flag),
        ("[a-c]", 0..10_i64).prop_map(|(key, value)| Level::Attr(key, value)),
    ]
}

fn build(levels: &[Level], leaf: &str) -> Node {
    levels.iter().rev().fold(text_field(leaf), |child, level| match level {
        Level::Named(name) => ScopeNode::named(name.clone()).child(child).into(),
        Level::Transparent => ScopeNode::default().child(child).into(),
        Level::List(name, len) => ListScope::new(name.clone(), (0..*len).map(|i| i.to_string()))
            .child(child)
            .into(),
        Level::Flag(flag) => ScopeNode::default().read_only(*flag).child(child).into(),
        Level::Attr(key, value) => ScopeNode::default().attr(key.clone(), *value).child(child).into(),
    })
}

/// Names spelled out by expanding every list level by hand
fn expected_names(levels: &[Level], leaf: &str) -> Vec<String> {
    let mut prefixes = vec![String::new()];
    for level in levels {
        let segments: Vec<String> = match level {
            Level::Named(name) => vec![name.clone()],
            Level::List(name, len) => (0..*len).map(|i| format!("{name}[{i}]")).collect(),
            _ => continue,
        };
        prefixes = prefixes
            .iter()
            .flat_map(|prefix| {
                segments.iter().map(move |segment| {
                    if prefix.is_empty() {
                        segment.clone()
                    } else {
                        format!("{prefix}.{segment}")
                    }
                })
            })
            .collect();
    }
    prefixes
        .into_iter()
        .map(|prefix| if prefix.is_empty() { leaf.to_owned() } else { format!("{prefix}.{leaf}") })
        .collect()
}

fn innermost_flag(levels: &[Level]) -> Option<bool> {
    levels.iter().rev().find_map(|level| match level {
        Level::Flag(flag) => Some(*flag),
        _ => None,
    })
}

proptest! {
    #[test]
    fn names_match_hand_built_joins(levels in prop::collection::vec(level(), 0..6)) {
        let rendered = Renderer::new().render(&build(&levels, "leaf")).unwrap();
        prop_assert_eq!(rendered.names(), expected_names(&levels, "leaf"));
    }

    #[test]
    fn innermost_flag_reaches_every_field(levels in prop::collection::vec(level(), 0..6)) {
        let rendered = Renderer::new().render(&build(&levels, "leaf")).unwrap();
        let expected = innermost_flag(&levels);
        for element in rendered.elements() {
            prop_assert_eq!(element.read_only(), expected);
        }
    }

    #[test]
    fn memoized_and_plain_renders_agree(levels in prop::collection::vec(level(), 0..6)) {
        let tree = build(&levels, "leaf");
        let memoized = Renderer::new();
        let plain = Renderer::with_config(RenderConfig::new().with_memoize(false));

        let first = memoized.render(&tree).unwrap();
        let second = memoized.render(&tree).unwrap();
        let fresh = plain.render(&tree).unwrap();

        prop_assert_eq!(first.elements(), fresh.elements());
        prop_assert_eq!(second.elements(), fresh.elements());
        prop_assert_eq!(second.stats().scopes_derived, 0);
    }
}
