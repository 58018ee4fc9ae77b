use crate::settings::ConfigElement;
use crate::sql::{comment, quote_ident};
use crate::translate::{
    check_factory, column_ref, input_alias, with_comments, NodeTranslator, TranslationResult,
};
use crate::workflow::predecessor::PredecessorContext;
use itertools::Itertools;
use tracing::warn;

pub(crate) const FACTORY_ID: &str = "org.knime.base.node.preproc.sorter.SorterNodeFactory";

/// Translates a sorter node into an `ORDER BY` query.
///
/// The null-ordering flag is global: it applies uniformly to every criterion,
/// matching the source node's single missing-values toggle.
pub struct SorterTranslator;

impl NodeTranslator for SorterTranslator {
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
        let nulls = if settings.get_bool("missingToEnd").unwrap_or(false) {
            "NULLS LAST"
        } else {
            "NULLS FIRST"
        };

        let criteria = settings
            .find_child("sortingCriteria")
            .map(|c| c.indexed_children())
            .unwrap_or_default();

        let mut comments = Vec::new();
        let mut terms = Vec::new();
        for (position, criterion) in criteria.iter().enumerate() {
            let Some(column) = column_ref(criterion, "column") else {
                warn!(position, "sort criterion names no column, dropped");
                continue;
            };
            let direction = match criterion.get_value("sortingOrder") {
                Some("DESCENDING") => "DESC",
                _ => "ASC",
            };
            if criterion.get_value("stringComparison") == Some("ALPHANUMERIC") {
                // Alphanumeric collation is dialect-specific; flag it instead
                // of guessing a COLLATE clause.
                comments.push(comment(&format!(
                    "NOTE: alphanumeric ordering for {} depends on dialect collation, using default ordering",
                    quote_ident(&column)
                )));
            }
            terms.push(format!("{} {} {}", quote_ident(&column), direction, nulls));
        }

        if terms.is_empty() {
            comments.push(comment(
                "WARNING: no usable sort criterion, emitting passthrough query",
            ));
            return TranslationResult::Sql(with_comments(
                &comments,
                format!("SELECT * FROM {};", input),
            ));
        }

        TranslationResult::Sql(with_comments(
            &comments,
            format!("SELECT * FROM {} ORDER BY {};", input, terms.iter().join(", ")),
        ))
    }
}
