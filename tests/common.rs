//! Common test utilities for building settings trees and workflow fixtures.
use honyaku::prelude::*;

/// Rekeys the given elements with sequential stringified indices and wraps
/// them in a node, matching how the source format stores lists.
#[allow(dead_code)]
pub fn indexed(key: &str, items: Vec<ConfigElement>) -> ConfigElement {
    let children = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            ConfigElement::Leaf {
                type_tag, value, ..
            } => ConfigElement::Leaf {
                key: i.to_string(),
                type_tag,
                value,
            },
            ConfigElement::Node { children, .. } => ConfigElement::Node {
                key: i.to_string(),
                children,
            },
        })
        .collect();
    ConfigElement::node(key, children)
}

/// An indexed list of plain string leaves.
#[allow(dead_code)]
pub fn string_list(key: &str, values: &[&str]) -> ConfigElement {
    indexed(
        key,
        values.iter().map(|v| ConfigElement::leaf("x", v)).collect(),
    )
}

/// A predicate subtree for the row filter translator.
#[allow(dead_code)]
pub fn predicate(column: &str, operator: &str, cell_class: &str, value: &str) -> ConfigElement {
    ConfigElement::node(
        "x",
        vec![
            ConfigElement::leaf("column", column),
            ConfigElement::leaf("operator", operator),
            ConfigElement::node(
                "value",
                vec![
                    ConfigElement::leaf("cellClass", cell_class),
                    ConfigElement::leaf("value", value),
                ],
            ),
        ],
    )
}

/// A predicate that needs no comparison value (null checks).
#[allow(dead_code)]
pub fn unary_predicate(column: &str, operator: &str) -> ConfigElement {
    ConfigElement::node(
        "x",
        vec![
            ConfigElement::leaf("column", column),
            ConfigElement::leaf("operator", operator),
        ],
    )
}

/// Row filter settings with the given predicates.
#[allow(dead_code)]
pub fn row_filter_settings(
    output_mode: &str,
    match_criteria: &str,
    predicates: Vec<ConfigElement>,
) -> ConfigElement {
    ConfigElement::node(
        "settings",
        vec![
            ConfigElement::leaf(
                "factory",
                "org.knime.base.node.preproc.filter.row3.RowFilterNodeFactory",
            ),
            ConfigElement::leaf("outputMode", output_mode),
            ConfigElement::leaf("matchCriteria", match_criteria),
            indexed("predicates", predicates),
        ],
    )
}

/// Group-by settings from plain column/method slices.
#[allow(dead_code)]
pub fn group_by_settings(
    grouping: &[&str],
    agg_columns: &[&str],
    agg_methods: &[&str],
    extra: Vec<ConfigElement>,
) -> ConfigElement {
    let mut children = vec![
        ConfigElement::leaf(
            "factory",
            "org.knime.base.node.preproc.groupby.GroupByNodeFactory",
        ),
        string_list("groupByColumns", grouping),
        string_list("aggregationColumnNames", agg_columns),
        string_list("aggregationMethods", agg_methods),
    ];
    children.extend(extra);
    ConfigElement::node("settings", children)
}

/// Sorter settings from `(column, order)` pairs and the global null flag.
#[allow(dead_code)]
pub fn sorter_settings(criteria: &[(&str, &str)], missing_to_end: bool) -> ConfigElement {
    let items = criteria
        .iter()
        .map(|(column, order)| {
            ConfigElement::node(
                "x",
                vec![
                    ConfigElement::leaf("column", column),
                    ConfigElement::leaf("sortingOrder", order),
                ],
            )
        })
        .collect();
    ConfigElement::node(
        "settings",
        vec![
            ConfigElement::leaf(
                "factory",
                "org.knime.base.node.preproc.sorter.SorterNodeFactory",
            ),
            ConfigElement::typed_leaf("missingToEnd", "xboolean", &missing_to_end.to_string()),
            indexed("sortingCriteria", items),
        ],
    )
}

/// Concatenate settings with the intersection toggle.
#[allow(dead_code)]
pub fn concatenate_settings(intersection: bool) -> ConfigElement {
    ConfigElement::node(
        "settings",
        vec![
            ConfigElement::leaf(
                "factory",
                "org.knime.base.node.preproc.append.row.AppendedRowsNodeFactory",
            ),
            ConfigElement::typed_leaf(
                "intersection_of_columns",
                "xboolean",
                &intersection.to_string(),
            ),
        ],
    )
}

/// A predecessor context with the given alias and exposed columns.
#[allow(dead_code)]
pub fn ctx(alias: &str, columns: &[&str]) -> PredecessorContext {
    PredecessorContext::new(alias, columns.iter().map(|c| c.to_string()).collect())
}

/// A small descriptor tree: node entries `(id, settings folder)` plus
/// connections `(source, dest)`.
#[allow(dead_code)]
pub fn descriptor_tree(nodes: &[(i64, &str)], connections: &[(i64, i64)]) -> ConfigElement {
    let node_entries = nodes
        .iter()
        .map(|(id, folder)| {
            ConfigElement::node(
                "x",
                vec![
                    ConfigElement::typed_leaf("id", "xint", &id.to_string()),
                    ConfigElement::leaf(
                        "node_settings_file",
                        &format!("{}/settings.xml", folder),
                    ),
                    ConfigElement::leaf("state", "CONFIGURED"),
                ],
            )
        })
        .collect();
    let connection_entries = connections
        .iter()
        .map(|(source, dest)| {
            ConfigElement::node(
                "x",
                vec![
                    ConfigElement::typed_leaf("sourceID", "xint", &source.to_string()),
                    ConfigElement::typed_leaf("destID", "xint", &dest.to_string()),
                ],
            )
        })
        .collect();
    ConfigElement::node(
        "workflow",
        vec![
            indexed("nodes", node_entries),
            indexed("connections", connection_entries),
        ],
    )
}

/// A minimal settings document carrying a node name and factory identifier.
#[allow(dead_code)]
pub fn named_settings(name: &str, factory: &str) -> ConfigElement {
    ConfigElement::node(
        "settings",
        vec![
            ConfigElement::leaf("name", name),
            ConfigElement::leaf("factory", factory),
        ],
    )
}
