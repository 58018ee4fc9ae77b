use crate::settings::ConfigElement;
use crate::sql::{comment, is_numeric_literal, quote_ident, quote_str, wildcard_to_like};
use crate::translate::{
    check_factory, column_ref, input_alias, with_comments, NodeTranslator, TranslationResult,
};
use crate::workflow::predecessor::PredecessorContext;
use tracing::warn;

pub(crate) const FACTORY_ID: &str =
    "org.knime.base.node.preproc.filter.row3.RowFilterNodeFactory";

/// Translates a row filter node into a `SELECT * ... WHERE` statement.
///
/// Each configured predicate maps through a fixed operator table; predicates
/// missing a required field are dropped with a warning, and when every
/// predicate drops the output degrades to an unfiltered passthrough rather
/// than failing.
pub struct RowFilterTranslator;

impl NodeTranslator for RowFilterTranslator {
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
        let exclude = settings.get_value("outputMode") == Some("NON_MATCHING");
        let combinator = match settings.get_value("matchCriteria") {
            Some("OR") => " OR ",
            _ => " AND ",
        };

        let predicates = settings
            .find_child("predicates")
            .map(|p| p.indexed_children())
            .unwrap_or_default();

        let mut clauses = Vec::new();
        for (position, predicate) in predicates.iter().enumerate() {
            match translate_predicate(predicate) {
                Some(clause) => clauses.push(clause),
                None => warn!(position, "row filter predicate dropped"),
            }
        }

        if clauses.is_empty() {
            let comments = vec![comment(
                "WARNING: no usable filter predicate, passing all rows through",
            )];
            return TranslationResult::Sql(with_comments(
                &comments,
                format!("SELECT * FROM {};", input),
            ));
        }

        let mut clause = clauses.join(combinator);
        if exclude {
            clause = format!("NOT ({})", clause);
        }
        TranslationResult::Sql(format!("SELECT * FROM {} WHERE {};", input, clause))
    }
}

/// Resolves one predicate subtree into a SQL condition, or `None` when a
/// required field is missing or the operator is unmapped.
fn translate_predicate(predicate: &ConfigElement) -> Option<String> {
    let column = column_ref(predicate, "column")?;
    let operator = predicate.get_value("operator")?;
    let lhs = quote_ident(&column);

    // Null checks take no operand.
    match operator {
        "IS_MISSING" => return Some(format!("{} IS NULL", lhs)),
        "IS_NOT_MISSING" => return Some(format!("{} IS NOT NULL", lhs)),
        _ => {}
    }

    let value_node = predicate.find_child("value")?;
    let raw = value_node.get_value("value")?;
    let cell_class = value_node.get_value("cellClass");
    let case_sensitive = predicate.get_bool("caseSensitive").unwrap_or(true);

    let (op, rhs, suffix) = match operator {
        "EQ" => ("=", render_literal(cell_class, raw), ""),
        "NEQ" => ("!=", render_literal(cell_class, raw), ""),
        "LT" => ("<", render_literal(cell_class, raw), ""),
        "LTE" => ("<=", render_literal(cell_class, raw), ""),
        "GT" => (">", render_literal(cell_class, raw), ""),
        "GTE" => (">=", render_literal(cell_class, raw), ""),
        "LIKE" | "WILDCARD" => {
            let like = wildcard_to_like(raw);
            let suffix = if like.escaped { " ESCAPE '\\'" } else { "" };
            ("LIKE", quote_str(&like.pattern), suffix)
        }
        "REGEX" => ("REGEXP", quote_str(raw), ""),
        other => {
            warn!(operator = other, "comparison operator has no SQL mapping");
            return None;
        }
    };

    let fold = !case_sensitive && matches!(op, "=" | "!=" | "LIKE" | "REGEXP");
    if fold {
        Some(format!("LOWER({}) {} LOWER({}){}", lhs, op, rhs, suffix))
    } else {
        Some(format!("{} {} {}{}", lhs, op, rhs, suffix))
    }
}

fn render_literal(cell_class: Option<&str>, value: &str) -> String {
    if is_numeric_literal(cell_class, value) {
        value.to_string()
    } else {
        quote_str(value)
    }
}
