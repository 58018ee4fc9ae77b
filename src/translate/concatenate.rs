use crate::settings::ConfigElement;
use crate::sql::{comment, quote_ident};
use crate::translate::{check_factory, with_comments, NodeTranslator, TranslationResult};
use crate::workflow::predecessor::PredecessorContext;
use itertools::Itertools;
use std::collections::BTreeSet;

pub(crate) const FACTORY_ID: &str =
    "org.knime.base.node.preproc.append.row.AppendedRowsNodeFactory";

/// Translates a concatenate node into a `UNION ALL` over its inputs.
///
/// The output column set is the intersection or union of every predecessor's
/// exposed columns, sorted for determinism; columns an input lacks are padded
/// with `NULL AS "col"`. No type reconciliation across inputs is attempted.
pub struct ConcatenateTranslator;

impl NodeTranslator for ConcatenateTranslator {
    fn factory_id(&self) -> &str {
        FACTORY_ID
    }

    fn is_nary(&self) -> bool {
        true
    }

    fn translate(
        &self,
        settings: &ConfigElement,
        ctx: &[PredecessorContext],
    ) -> TranslationResult {
        if let Some(diagnostic) = check_factory(settings, FACTORY_ID) {
            return diagnostic;
        }
        if ctx.len() < 2 {
            return TranslationResult::Diagnostic(format!(
                "Concatenate requires at least two connected inputs, found {}",
                ctx.len()
            ));
        }
        let intersect = settings.get_bool("intersection_of_columns").unwrap_or(false);

        let sets: Vec<BTreeSet<&str>> = ctx
            .iter()
            .map(|c| c.columns.iter().map(String::as_str).collect())
            .collect();
        let columns: Vec<&str> = if intersect {
            sets.iter()
                .skip(1)
                .fold(sets[0].clone(), |acc, s| acc.intersection(s).copied().collect())
                .into_iter()
                .collect()
        } else {
            sets.iter().flatten().copied().unique().sorted().collect()
        };

        if columns.is_empty() {
            return TranslationResult::Diagnostic(if intersect {
                "Connected inputs share no common column; the intersection is empty".to_string()
            } else {
                "No exposed columns are known for the connected inputs".to_string()
            });
        }

        let mut comments = Vec::new();
        if settings
            .get_bool("merge_columns_of_different_types")
            .unwrap_or(false)
        {
            comments.push(comment(
                "NOTE: column types are not reconciled across inputs; differing types may fail downstream",
            ));
        }

        let branches = ctx
            .iter()
            .map(|pred| {
                let alias = quote_ident(&pred.alias);
                let items = columns
                    .iter()
                    .map(|col| {
                        if pred.has_column(col) {
                            format!("{}.{}", alias, quote_ident(col))
                        } else {
                            format!("NULL AS {}", quote_ident(col))
                        }
                    })
                    .join(", ");
                format!("SELECT {} FROM {}", items, alias)
            })
            .join("\nUNION ALL\n");

        TranslationResult::Sql(with_comments(&comments, format!("{};", branches)))
    }
}
