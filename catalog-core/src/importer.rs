//! Bulk import of raw records into a [`RecipeSink`].
//!
//! One pass, strictly sequential. A record that fails to persist is
//! recorded in the [`ImportReport`] and the run moves on to the next one;
//! nothing here aborts the batch.

use serde::Serialize;

use crate::error::SinkError;
use crate::normalize::normalize;
use crate::record::RawRecord;
use crate::types::CanonicalRecipe;

/// How often progress is logged, in inserted (or skipped) records.
pub const PROGRESS_INTERVAL: usize = 100;

/// How many persistence failures are logged at error level before the rest
/// are only counted.
pub const LOGGED_FAILURES: usize = 5;

/// Destination for normalized recipes. Returns the assigned row id.
pub trait RecipeSink {
    fn insert(&mut self, recipe: &CanonicalRecipe) -> Result<i32, SinkError>;
}

impl<S: RecipeSink + ?Sized> RecipeSink for &mut S {
    fn insert(&mut self, recipe: &CanonicalRecipe) -> Result<i32, SinkError> {
        (**self).insert(recipe)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportFailure {
    /// Zero-based position of the record in the loaded sequence
    pub index: usize,
    /// Raw title of the record, or "Unknown"
    pub recipe: String,
    pub error: String,
}

#[derive(Debug)]
pub enum RecordOutcome {
    Inserted,
    Skipped,
    Failed(SinkError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub inserted: usize,
    pub skipped: usize,
    pub errors: Vec<ImportFailure>,
}

impl ImportReport {
    /// Fold one record's outcome into the report.
    pub fn record(&mut self, index: usize, title: &str, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Inserted => {
                self.inserted += 1;
                if self.inserted % PROGRESS_INTERVAL == 0 {
                    tracing::info!(inserted = self.inserted, "Imported recipes");
                }
            }
            RecordOutcome::Skipped => {
                self.skipped += 1;
                if self.skipped % PROGRESS_INTERVAL == 0 {
                    tracing::info!(skipped = self.skipped, "Skipped recipes with missing titles");
                }
            }
            RecordOutcome::Failed(err) => {
                if self.errors.len() < LOGGED_FAILURES {
                    tracing::error!(index, recipe = %title, error = %err, "Failed to insert recipe");
                } else {
                    tracing::debug!(index, recipe = %title, error = %err, "Failed to insert recipe");
                }
                self.errors.push(ImportFailure {
                    index,
                    recipe: title.to_string(),
                    error: err.to_string(),
                });
            }
        }
    }

    pub fn total_processed(&self) -> usize {
        self.inserted + self.skipped + self.errors.len()
    }
}

/// Best-effort label for a record in error reports.
fn display_title(record: &RawRecord) -> &str {
    record
        .get_str("title")
        .filter(|t| !t.is_empty())
        .unwrap_or("Unknown")
}

/// Normalize and persist every record, in order.
pub fn import_all<S: RecipeSink>(records: &[RawRecord], mut sink: S) -> ImportReport {
    let mut report = ImportReport::default();

    for (index, raw) in records.iter().enumerate() {
        let outcome = match normalize(raw) {
            None => RecordOutcome::Skipped,
            Some(recipe) => match sink.insert(&recipe) {
                Ok(_) => RecordOutcome::Inserted,
                Err(e) => RecordOutcome::Failed(e),
            },
        };
        report.record(index, display_title(raw), outcome);
    }

    report
}
