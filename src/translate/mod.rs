use crate::settings::ConfigElement;
use crate::workflow::graph::WorkflowGraph;
use crate::workflow::node::NodeId;
use crate::workflow::predecessor::{ColumnProvider, PredecessorContext, PLACEHOLDER_INPUT};
use ahash::AHashMap;
use std::fmt;

mod column_filter;
mod concatenate;
mod csv_reader;
mod group_by;
mod row_filter;
mod sorter;

pub use column_filter::ColumnFilterTranslator;
pub use concatenate::ConcatenateTranslator;
pub use csv_reader::CsvReaderTranslator;
pub use group_by::GroupByTranslator;
pub use row_filter::RowFilterTranslator;
pub use sorter::SorterTranslator;

/// Fixed diagnostic for factory identifiers with no registered translator.
pub const UNSUPPORTED_NODE: &str = "Conversion for this node type is not supported.";

/// The outcome of translating one node: SQL text terminated by `;`, or
/// diagnostic text rendered with an `Error:` prefix.
///
/// Diagnostics are returned as data, never signalled through `Err`, so callers
/// render success and failure uniformly and no fault crosses the translator
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationResult {
    Sql(String),
    Diagnostic(String),
}

impl TranslationResult {
    pub fn is_sql(&self) -> bool {
        matches!(self, TranslationResult::Sql(_))
    }

    pub fn into_text(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TranslationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationResult::Sql(sql) => write!(f, "{}", sql),
            TranslationResult::Diagnostic(text) => write!(f, "Error: {}", text),
        }
    }
}

/// Defines the contract for translating one node type into SQL.
///
/// Translators are pure functions of their inputs: the node's settings tree
/// and the resolved upstream contexts (one entry for unary translators, an
/// ordered list for n-ary ones). They must be total over that domain.
pub trait NodeTranslator: Send + Sync {
    /// The fully-qualified factory identifier this translator handles.
    fn factory_id(&self) -> &str;

    /// True for translators that consume every predecessor instead of one.
    fn is_nary(&self) -> bool {
        false
    }

    fn translate(
        &self,
        settings: &ConfigElement,
        ctx: &[PredecessorContext],
    ) -> TranslationResult;
}

fn register_default_translators(registry: &mut AHashMap<String, Box<dyn NodeTranslator>>) {
    let defaults: Vec<Box<dyn NodeTranslator>> = vec![
        Box::new(RowFilterTranslator),
        Box::new(GroupByTranslator),
        Box::new(SorterTranslator),
        Box::new(ConcatenateTranslator),
        Box::new(ColumnFilterTranslator),
        Box::new(CsvReaderTranslator),
    ];
    for translator in defaults {
        registry.insert(translator.factory_id().to_string(), translator);
    }
}

fn create_translator_by_name(factory_id: &str) -> Option<Box<dyn NodeTranslator>> {
    match factory_id {
        row_filter::FACTORY_ID => Some(Box::new(RowFilterTranslator)),
        group_by::FACTORY_ID => Some(Box::new(GroupByTranslator)),
        sorter::FACTORY_ID => Some(Box::new(SorterTranslator)),
        concatenate::FACTORY_ID => Some(Box::new(ConcatenateTranslator)),
        column_filter::FACTORY_ID => Some(Box::new(ColumnFilterTranslator)),
        csv_reader::FACTORY_ID => Some(Box::new(CsvReaderTranslator)),
        _ => None,
    }
}

/// Exact-match registry from factory identifier to translator.
pub struct SqlConverter {
    registry: AHashMap<String, Box<dyn NodeTranslator>>,
}

pub struct SqlConverterBuilder {
    registry: AHashMap<String, Box<dyn NodeTranslator>>,
}

impl SqlConverterBuilder {
    pub fn new() -> Self {
        let mut registry: AHashMap<String, Box<dyn NodeTranslator>> = AHashMap::new();
        register_default_translators(&mut registry);
        Self { registry }
    }

    /// Registers a built-in translator under an additional factory identifier,
    /// for workflows whose source format names node types differently.
    pub fn with_factory_alias(mut self, user_factory_id: &str, builtin_factory_id: &str) -> Self {
        if let Some(translator) = create_translator_by_name(builtin_factory_id) {
            self.registry
                .insert(user_factory_id.to_string(), translator);
        }
        self
    }

    pub fn with_translator(mut self, translator: Box<dyn NodeTranslator>) -> Self {
        self.registry
            .insert(translator.factory_id().to_string(), translator);
        self
    }

    pub fn build(self) -> SqlConverter {
        SqlConverter {
            registry: self.registry,
        }
    }
}

impl Default for SqlConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlConverter {
    pub fn new() -> Self {
        SqlConverterBuilder::new().build()
    }

    pub fn builder() -> SqlConverterBuilder {
        SqlConverterBuilder::new()
    }

    /// Dispatches on the factory identifier. Exact match only; an unknown
    /// identifier yields the fixed unsupported-node diagnostic.
    pub fn convert(
        &self,
        factory_id: &str,
        settings: &ConfigElement,
        ctx: &[PredecessorContext],
    ) -> TranslationResult {
        match self.registry.get(factory_id) {
            Some(translator) => translator.translate(settings, ctx),
            None => TranslationResult::Diagnostic(UNSUPPORTED_NODE.to_string()),
        }
    }

    /// The presentation-layer entry point: translates the selected node of a
    /// reconstructed graph, resolving its upstream context first.
    ///
    /// Exposed columns per predecessor come from `columns`; the resolver does
    /// no inference of its own.
    pub fn convert_node(
        &self,
        graph: &WorkflowGraph,
        id: NodeId,
        columns: &dyn ColumnProvider,
    ) -> TranslationResult {
        let Some(node) = graph.node(id) else {
            return TranslationResult::Diagnostic(format!("Node #{} not found in the workflow", id));
        };
        let Some(settings) = &node.settings else {
            return TranslationResult::Diagnostic(format!(
                "Node #{} has no parsed settings document",
                id
            ));
        };
        let Some(factory_id) = node.factory.as_deref().or(settings.get_value("factory")) else {
            return TranslationResult::Diagnostic(format!(
                "Node #{} declares no factory identifier",
                id
            ));
        };
        let Some(translator) = self.registry.get(factory_id) else {
            return TranslationResult::Diagnostic(UNSUPPORTED_NODE.to_string());
        };

        let ctx: Vec<PredecessorContext> = if translator.is_nary() {
            graph
                .find_all_predecessors(id)
                .into_iter()
                .map(|p| PredecessorContext::for_node(p, columns))
                .collect()
        } else {
            vec![
                graph
                    .find_single_predecessor(id)
                    .map(|p| PredecessorContext::for_node(p, columns))
                    .unwrap_or_else(PredecessorContext::placeholder),
            ]
        };

        translator.translate(settings, &ctx)
    }
}

impl Default for SqlConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Common translator preamble: when the settings carry a `factory` leaf it
/// must equal the expected identifier; a mismatch is terminal for this node.
pub(crate) fn check_factory(settings: &ConfigElement, expected: &str) -> Option<TranslationResult> {
    match settings.get_value("factory") {
        Some(actual) if actual != expected => Some(TranslationResult::Diagnostic(format!(
            "Unexpected node factory: expected '{}', found '{}'",
            expected, actual
        ))),
        _ => None,
    }
}

/// Alias of the single upstream table, falling back to the fixed placeholder.
pub(crate) fn input_alias(ctx: &[PredecessorContext]) -> String {
    ctx.first()
        .map(|c| c.alias.clone())
        .unwrap_or_else(|| PLACEHOLDER_INPUT.to_string())
}

/// Reads a column reference that the source format stores either as a plain
/// leaf or as a selection subtree with a `selected` leaf.
pub(crate) fn column_ref(parent: &ConfigElement, key: &str) -> Option<String> {
    match parent.find_child(key)? {
        ConfigElement::Leaf { value, .. } if !value.is_empty() => Some(value.clone()),
        node @ ConfigElement::Node { .. } => node.get_value("selected").map(str::to_string),
        _ => None,
    }
}

/// Prepends accumulated warning/advisory comments to a finished statement.
pub(crate) fn with_comments(comments: &[String], statement: String) -> String {
    if comments.is_empty() {
        statement
    } else {
        format!("{}\n{}", comments.join("\n"), statement)
    }
}
