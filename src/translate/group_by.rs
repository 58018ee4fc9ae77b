use crate::settings::ConfigElement;
use crate::sql::{comment, quote_ident, quote_str, sanitize_alias};
use crate::translate::{
    check_factory, input_alias, with_comments, NodeTranslator, TranslationResult,
};
use crate::workflow::predecessor::PredecessorContext;
use itertools::Itertools;
use tracing::warn;

pub(crate) const FACTORY_ID: &str = "org.knime.base.node.preproc.groupby.GroupByNodeFactory";

/// How generated aggregation columns are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NamePolicy {
    /// `Sum_sales`
    MethodColumn,
    /// `sales_Sum`
    ColumnMethod,
    /// `sales`, disambiguated with a numeric suffix on collision.
    KeepOriginal,
}

impl NamePolicy {
    fn from_settings(settings: &ConfigElement) -> Self {
        match settings.get_value("columnNamePolicy") {
            Some("Column name (aggregation method)") => NamePolicy::ColumnMethod,
            Some("Keep original name(s)") => NamePolicy::KeepOriginal,
            _ => NamePolicy::MethodColumn,
        }
    }
}

/// Translates a group-by node into an aggregation query.
///
/// Grouping columns and the two positionally-zipped aggregation lists come
/// straight from the settings; aggregation methods map through a fixed table,
/// and unmapped methods are dropped with a warning.
pub struct GroupByTranslator;

impl NodeTranslator for GroupByTranslator {
    fn factory_id(&self) -> &str {
        FACTORY_ID
    }

    fn translate(
        &self,
        settings: &ConfigElement,
        ctx: &[PredecessorContext],
    ) -> TranslationResult {
        if let Some(diagnostic) = check_factory(settings, FACTORY_ID) {
            return diagnostic;
        }
        let input = quote_ident(&input_alias(ctx));

        let grouping: Vec<String> = leaf_values(settings, "groupByColumns");
        let agg_columns = leaf_values(settings, "aggregationColumnNames");
        let agg_methods = leaf_values(settings, "aggregationMethods");
        if agg_columns.len() != agg_methods.len() {
            warn!(
                columns = agg_columns.len(),
                methods = agg_methods.len(),
                "aggregation lists have unequal lengths, using common prefix"
            );
        }
        let delimiter = settings.get_value("valueDelimiter").unwrap_or(", ");
        let policy = NamePolicy::from_settings(settings);

        let configured = agg_columns.len().min(agg_methods.len());
        let mut used_names: Vec<String> = grouping.clone();
        let mut aggregations = Vec::new();
        for (column, method) in agg_columns.iter().zip(agg_methods.iter()) {
            let Some(expr) = aggregate_expression(method, column, delimiter) else {
                warn!(method = %method, column = %column, "aggregation method has no SQL mapping, dropped");
                continue;
            };
            let alias = output_alias(policy, method, column, &used_names);
            used_names.push(alias.clone());
            aggregations.push(format!("{} AS {}", expr, quote_ident(&alias)));
        }

        let mut comments = Vec::new();
        if configured > 0 && aggregations.is_empty() {
            comments.push(comment(
                "WARNING: no configured aggregation method could be mapped to SQL",
            ));
        }

        let grouped_idents = grouping.iter().map(|g| quote_ident(g)).join(", ");
        let statement = match (grouping.is_empty(), aggregations.is_empty()) {
            (false, true) => {
                // Grouping without aggregation is row deduplication.
                format!("SELECT DISTINCT {} FROM {};", grouped_idents, input)
            }
            (true, false) => {
                // Whole-table aggregation carries no GROUP BY.
                format!("SELECT {} FROM {};", aggregations.join(", "), input)
            }
            (false, false) => format!(
                "SELECT {}, {} FROM {} GROUP BY {};",
                grouped_idents,
                aggregations.join(", "),
                input,
                grouped_idents
            ),
            (true, true) => {
                return TranslationResult::Diagnostic(
                    "GroupBy node defines neither grouping columns nor usable aggregations"
                        .to_string(),
                );
            }
        };
        TranslationResult::Sql(with_comments(&comments, statement))
    }
}

fn leaf_values(settings: &ConfigElement, key: &str) -> Vec<String> {
    settings
        .find_child(key)
        .map(|list| {
            list.indexed_children()
                .iter()
                .filter_map(|c| c.as_value())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Maps an aggregation method to its SQL expression over the quoted column.
///
/// `Count` counts the named column, not `*`; distinct-count and
/// missing-value-count expand parametrized templates.
fn aggregate_expression(method: &str, column: &str, delimiter: &str) -> Option<String> {
    let col = quote_ident(column);
    let direct = match method {
        "Sum" => Some("SUM"),
        "Mean" => Some("AVG"),
        "Minimum" => Some("MIN"),
        "Maximum" => Some("MAX"),
        "Count" => Some("COUNT"),
        "Variance" => Some("VAR_SAMP"),
        "Standard deviation" => Some("STDDEV_SAMP"),
        _ => None,
    };
    if let Some(name) = direct {
        return Some(format!("{}({})", name, col));
    }
    let template = match method {
        "Unique count" => "COUNT(DISTINCT $$col$$)",
        "Missing value count" => "SUM(CASE WHEN $$col$$ IS NULL THEN 1 ELSE 0 END)",
        "List" | "Concatenate" => {
            return Some(format!("STRING_AGG({}, {})", col, quote_str(delimiter)));
        }
        _ => return None,
    };
    Some(template.replace("$$col$$", &col))
}

fn output_alias(policy: NamePolicy, method: &str, column: &str, used: &[String]) -> String {
    let base = match policy {
        NamePolicy::MethodColumn => format!("{}_{}", method, column),
        NamePolicy::ColumnMethod => format!("{}_{}", column, method),
        NamePolicy::KeepOriginal => column.to_string(),
    };
    let base = sanitize_alias(&base);
    if !used.contains(&base) {
        return base;
    }
    let mut counter = 1;
    loop {
        let candidate = format!("{}_{}", base, counter);
        if !used.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
