use crate::settings::ConfigElement;
use crate::sql::{comment, quote_ident};
use crate::translate::{check_factory, with_comments, NodeTranslator, TranslationResult};
use crate::workflow::predecessor::PredecessorContext;
use itertools::Itertools;

pub(crate) const FACTORY_ID: &str = "org.knime.base.node.io.csvreader.CSVReaderNodeFactory";

/// Translates a CSV reader node into a templated projection over its declared
/// schema, with the source location preserved as a comment. The table name is
/// derived from the file stem of the configured location.
pub struct CsvReaderTranslator;

impl NodeTranslator for CsvReaderTranslator {
    fn factory_id(&self) -> &str {
        FACTORY_ID
    }

    fn translate(
        &self,
        settings: &ConfigElement,
        _ctx: &[PredecessorContext],
    ) -> TranslationResult {
        if let Some(diagnostic) = check_factory(settings, FACTORY_ID) {
            return diagnostic;
        }
        let Some(url) = settings.get_value("url") else {
            return TranslationResult::Diagnostic(
                "CSV reader settings declare no source location".to_string(),
            );
        };

        let columns: Vec<String> = settings
            .find_child("table_spec")
            .map(|spec| {
                spec.indexed_children()
                    .iter()
                    .filter_map(|c| c.get_value("name").or(c.as_value()))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let projection = if columns.is_empty() {
            "*".to_string()
        } else {
            columns.iter().map(|c| quote_ident(c)).join(", ")
        };

        let comments = vec![comment(&format!("source: {}", url))];
        TranslationResult::Sql(with_comments(
            &comments,
            format!("SELECT {} FROM {};", projection, quote_ident(&table_name(url))),
        ))
    }
}

/// File stem of the configured location, used as the table name.
fn table_name(url: &str) -> String {
    let segment = url
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(url);
    match segment.rfind('.') {
        Some(dot) if dot > 0 => segment[..dot].to_string(),
        _ => segment.to_string(),
    }
}
