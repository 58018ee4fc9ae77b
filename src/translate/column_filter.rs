use crate::settings::ConfigElement;
use crate::sql::{comment, quote_ident};
use crate::translate::{
    check_factory, input_alias, with_comments, NodeTranslator, TranslationResult,
};
use crate::workflow::predecessor::PredecessorContext;
use itertools::Itertools;

pub(crate) const FACTORY_ID: &str =
    "org.knime.base.node.preproc.filter.column.DataColumnSpecFilterNodeFactory";

/// Translates a column filter node into a plain projection.
///
/// Inclusion mode projects the explicit include list; exclusion mode projects
/// the predecessor's exposed columns minus the exclude list, degrading to
/// `SELECT *` when the complement cannot be computed.
pub struct ColumnFilterTranslator;

impl NodeTranslator for ColumnFilterTranslator {
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
        let Some(filter) = settings.find_child("column-filter") else {
            return TranslationResult::Diagnostic(
                "Column filter settings contain no 'column-filter' subtree".to_string(),
            );
        };

        let included = name_list(filter, "included_names");
        let excluded = name_list(filter, "excluded_names");
        let exclude_mode = filter.get_value("enforce_option") == Some("EnforceExclusion");

        let columns: Vec<String> = if exclude_mode {
            let known = ctx.first().map(|c| c.columns.clone()).unwrap_or_default();
            if known.is_empty() {
                let comments = vec![comment(
                    "WARNING: upstream columns unknown, cannot apply exclusion list",
                )];
                return TranslationResult::Sql(with_comments(
                    &comments,
                    format!("SELECT * FROM {};", input),
                ));
            }
            known
                .into_iter()
                .filter(|c| !excluded.contains(c))
                .collect()
        } else {
            included
        };

        if columns.is_empty() {
            let comments = vec![comment(
                "WARNING: column filter selects no columns, passing all through",
            )];
            return TranslationResult::Sql(with_comments(
                &comments,
                format!("SELECT * FROM {};", input),
            ));
        }

        TranslationResult::Sql(format!(
            "SELECT {} FROM {};",
            columns.iter().map(|c| quote_ident(c)).join(", "),
            input
        ))
    }
}

fn name_list(filter: &ConfigElement, key: &str) -> Vec<String> {
    filter
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
