//! Batch weigh-in ingestion.
//!
//! Operators weigh a tray of returns and paste/upload one CSV with the
//! columns `toner_model,client_code,branch,returned_weight`. The batch
//! is parsed and previewed as a whole; the first bad row aborts with
//! its line number so the operator can fix the sheet, and nothing is
//! persisted until each preview is committed individually.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::error::WorkflowError;
use crate::returns::{ReturnPreview, ReturnsProcessor};

/// One parsed CSV row. `line` is filled in by the parser, counting the
/// header as line 1.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRow {
    pub toner_model: String,
    pub client_code: String,
    pub branch: String,
    pub returned_weight: f64,
    #[serde(skip)]
    pub line: u64,
}

/// Parse the CSV body. Whitespace around fields is trimmed; the header
/// row is required.
pub fn parse_batch(csv_text: &str) -> Result<Vec<BatchRow>, WorkflowError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<BatchRow>().enumerate() {
        let line = index as u64 + 2;
        let mut row = result.map_err(|err| WorkflowError::BatchParse {
            line,
            message: err.to_string(),
        })?;
        row.line = line;
        rows.push(row);
    }
    debug!(rows = rows.len(), "batch parsed");
    Ok(rows)
}

impl ReturnsProcessor {
    /// Parse a CSV batch and classify every row against the catalog.
    /// Models are matched case-insensitively. All-or-nothing: one
    /// unknown model or bad row fails the whole batch.
    pub async fn preview_batch(
        &self,
        csv_text: &str,
    ) -> Result<Vec<ReturnPreview>, WorkflowError> {
        let rows = parse_batch(csv_text)?;

        let by_model: HashMap<String, _> = self
            .toners
            .list()
            .await
            .into_iter()
            .map(|toner| (toner.reference.model().to_lowercase(), toner))
            .collect();

        let mut previews = Vec::with_capacity(rows.len());
        for row in rows {
            let toner = by_model
                .get(&row.toner_model.to_lowercase())
                .ok_or(WorkflowError::UnknownModel {
                    line: row.line,
                    model: row.toner_model.clone(),
                })?;
            previews.push(self.preview_for(toner, row.returned_weight)?);
        }
        Ok(previews)
    }
}
