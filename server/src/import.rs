//! `catalog-server import`: replace the catalog with the contents of a JSON
//! file.

use crate::db::DbPool;
use crate::store::{count_recipes, delete_all_recipes, DieselRecipeStore};
use anyhow::Context;
use catalog_core::{import_all, load_records, resolve_json_path, ImportReport};
use std::path::Path;
use std::time::{Duration, Instant};

pub const DEFAULT_DATA_PATH: &str = "../data/US_recipes_null.json";

/// Failures listed individually in the summary.
const SHOWN_ERRORS: usize = 5;

/// `JSON_DATA_PATH` wins over the command-line argument, which wins over the
/// default.
pub fn source_path(env_path: Option<String>, arg_path: Option<String>) -> String {
    env_path
        .filter(|p| !p.is_empty())
        .or(arg_path.filter(|p| !p.is_empty()))
        .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string())
}

/// Blocking; run it off the async runtime.
pub fn run(pool: &DbPool, candidate: &str) -> anyhow::Result<()> {
    println!("Starting recipe data import");
    println!("JSON file path: {}", candidate);

    let mut conn = pool.get().context("Database connection failed")?;

    let path = resolve_json_path(candidate, Path::new(env!("CARGO_MANIFEST_DIR")))
        .with_context(|| format!("Invalid JSON file path: {}", candidate))?;

    let records =
        load_records(&path).with_context(|| format!("Failed to parse {}", path.display()))?;

    if records.is_empty() {
        println!("No valid recipes found in JSON file");
        return Ok(());
    }

    let existing = count_recipes(&mut conn).context("Failed to count existing recipes")?;
    if existing > 0 {
        println!("Found {} existing recipes in database", existing);
        println!("Clearing existing data...");
        delete_all_recipes(&mut conn).context("Failed to clear existing recipes")?;
    }

    println!("Importing {} recipes...", records.len());
    let started = Instant::now();
    let report = import_all(&records, DieselRecipeStore::new(&mut conn));
    let elapsed = started.elapsed();

    tracing::info!(
        inserted = report.inserted,
        skipped = report.skipped,
        failed = report.errors.len(),
        elapsed_ms = %elapsed.as_millis(),
        "Import finished"
    );

    let final_count = count_recipes(&mut conn).context("Failed to count imported recipes")?;

    for line in summary_lines(&report, elapsed, final_count) {
        println!("{}", line);
    }

    Ok(())
}

pub fn summary_lines(report: &ImportReport, elapsed: Duration, final_count: i64) -> Vec<String> {
    let rule = "=".repeat(50);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        "IMPORT COMPLETE".to_string(),
        rule.clone(),
        format!("Inserted: {}", report.inserted),
        format!("Skipped: {}", report.skipped),
        format!("Errors: {}", report.errors.len()),
        format!("Duration: {:.2}s", elapsed.as_secs_f64()),
    ];

    if !report.errors.is_empty() {
        lines.push(String::new());
        lines.push("Import errors:".to_string());
        for failure in report.errors.iter().take(SHOWN_ERRORS) {
            lines.push(format!(
                "  - Recipe \"{}\" (index {}): {}",
                failure.recipe, failure.index, failure.error
            ));
        }
        if report.errors.len() > SHOWN_ERRORS {
            lines.push(format!(
                "  - ... and {} more errors",
                report.errors.len() - SHOWN_ERRORS
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!("Final database count: {} recipes", final_count));
    lines.push(if final_count > 0 {
        "Data import completed successfully".to_string()
    } else {
        "No recipes were imported to the database".to_string()
    });
    lines.push(rule);

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::ImportFailure;

    fn failure(index: usize) -> ImportFailure {
        ImportFailure {
            index,
            recipe: format!("Recipe {index}"),
            error: "value too long".to_string(),
        }
    }

    #[test]
    fn test_source_path_priority() {
        assert_eq!(
            source_path(Some("/env.json".into()), Some("arg.json".into())),
            "/env.json"
        );
        assert_eq!(source_path(None, Some("arg.json".into())), "arg.json");
        assert_eq!(source_path(Some(String::new()), None), DEFAULT_DATA_PATH);
    }

    #[test]
    fn test_summary_truncates_errors() {
        let report = ImportReport {
            inserted: 10,
            skipped: 2,
            errors: (0..8).map(failure).collect(),
        };
        let lines = summary_lines(&report, Duration::from_millis(1234), 10);

        assert!(lines.contains(&"Duration: 1.23s".to_string()));
        assert!(lines.contains(&"  - Recipe \"Recipe 4\" (index 4): value too long".to_string()));
        assert!(!lines.iter().any(|l| l.contains("(index 5)")));
        assert!(lines.contains(&"  - ... and 3 more errors".to_string()));
        assert!(lines.contains(&"Final database count: 10 recipes".to_string()));
    }

    #[test]
    fn test_summary_without_errors_or_rows() {
        let lines = summary_lines(&ImportReport::default(), Duration::ZERO, 0);

        assert!(!lines.iter().any(|l| l.contains("Import errors")));
        assert!(lines.contains(&"No recipes were imported to the database".to_string()));
    }
}
