//! Unit tests for the config tree model and the SQL text helpers.
mod common;
use common::*;
use honyaku::prelude::*;
use honyaku::sql::{sanitize_alias, wildcard_to_like};
use pretty_assertions::assert_eq;

#[test]
fn test_get_value_and_find_child() {
    let tree = ConfigElement::node(
        "settings",
        vec![
            ConfigElement::leaf("name", "My Node"),
            ConfigElement::node("inner", vec![ConfigElement::leaf("deep", "x")]),
        ],
    );
    assert_eq!(tree.get_value("name"), Some("My Node"));
    assert_eq!(tree.get_value("missing"), None);
    assert_eq!(
        tree.find_child("inner").and_then(|n| n.get_value("deep")),
        Some("x")
    );
    // A node child has no scalar value.
    assert_eq!(tree.get_value("inner"), None);
}

#[test]
fn test_duplicate_keys_first_match_wins() {
    let tree = ConfigElement::node(
        "settings",
        vec![
            ConfigElement::leaf("key", "first"),
            ConfigElement::leaf("key", "second"),
        ],
    );
    assert_eq!(tree.get_value("key"), Some("first"));
}

#[test]
fn test_get_bool() {
    let tree = ConfigElement::node(
        "settings",
        vec![
            ConfigElement::typed_leaf("flag", "xboolean", "true"),
            ConfigElement::leaf("plain", "false"),
            ConfigElement::leaf("junk", "yes"),
        ],
    );
    assert_eq!(tree.get_bool("flag"), Some(true));
    assert_eq!(tree.get_bool("plain"), Some(false));
    assert_eq!(tree.get_bool("junk"), None);
    assert_eq!(tree.get_bool("missing"), None);
}

#[test]
fn test_indexed_children_numeric_order() {
    let list = ConfigElement::node(
        "list",
        vec![
            ConfigElement::leaf("10", "j"),
            ConfigElement::leaf("2", "b"),
            ConfigElement::leaf("0", "a"),
            ConfigElement::leaf("not-a-number", "skip"),
        ],
    );
    let values: Vec<_> = list
        .indexed_children()
        .iter()
        .filter_map(|c| c.as_value())
        .collect();
    assert_eq!(values, vec!["a", "b", "j"]);
}

#[test]
fn test_from_json_shapes() {
    let json = serde_json::json!({
        "name": "reader",
        "count": 3,
        "ratio": 0.5,
        "enabled": true,
        "items": ["a", "b"],
    });
    let tree = ConfigElement::from_json("settings", &json);
    assert_eq!(tree.get_value("name"), Some("reader"));
    assert_eq!(tree.get_value("count"), Some("3"));
    assert_eq!(tree.get_value("ratio"), Some("0.5"));
    assert_eq!(tree.get_bool("enabled"), Some(true));
    let items: Vec<_> = tree
        .find_child("items")
        .unwrap()
        .indexed_children()
        .iter()
        .filter_map(|c| c.as_value())
        .collect();
    assert_eq!(items, vec!["a", "b"]);
}

#[test]
fn test_quote_ident_doubles_embedded_quotes() {
    assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    assert_eq!(quote_ident("plain"), "\"plain\"");
}

#[test]
fn test_quote_str_doubles_embedded_quotes() {
    assert_eq!(quote_str("o'clock"), "'o''clock'");
    assert_eq!(quote_str("plain"), "'plain'");
}

#[test]
fn test_wildcard_translation() {
    let like = wildcard_to_like("a*b?c");
    assert_eq!(like.pattern, "a%b_c");
    assert!(!like.escaped);

    // Literal % and _ must be pre-escaped, and only then is escaping flagged.
    let like = wildcard_to_like("100%_done*");
    assert_eq!(like.pattern, "100\\%\\_done%");
    assert!(like.escaped);
}

#[test]
fn test_sanitize_alias() {
    assert_eq!(sanitize_alias("Sum_sales"), "Sum_sales");
    assert_eq!(sanitize_alias("Sum(sales)"), "Sum_sales_");
    assert_eq!(sanitize_alias("total sales"), "total_sales");
}

#[test]
fn test_node_id_from_folder() {
    assert_eq!(node_id_from_folder("CSV Reader (#7)"), Some(7));
    assert_eq!(node_id_from_folder("Row Filter (#12)"), Some(12));
    assert_eq!(node_id_from_folder("#3"), Some(3));
    assert_eq!(node_id_from_folder("no marker"), None);
    assert_eq!(node_id_from_folder("dangling #"), None);
}

#[test]
fn test_translation_result_display() {
    let sql = TranslationResult::Sql("SELECT 1;".to_string());
    assert_eq!(sql.to_string(), "SELECT 1;");
    assert!(sql.is_sql());

    let diagnostic = TranslationResult::Diagnostic("something broke".to_string());
    assert_eq!(diagnostic.to_string(), "Error: something broke");
    assert!(!diagnostic.is_sql());
}

#[test]
fn test_descriptor_error_display() {
    let err = DescriptorError::MissingSection("nodes");
    assert!(err.to_string().contains("nodes"));
}

#[test]
fn test_config_element_serde_round_trip() {
    let tree = row_filter_settings(
        "MATCHING",
        "AND",
        vec![predicate("a", "EQ", "org.knime.core.data.def.IntCell", "1")],
    );
    let encoded = serde_json::to_string(&tree).unwrap();
    let decoded: ConfigElement = serde_json::from_str(&encoded).unwrap();
    assert_eq!(tree, decoded);
}
