//! Recipe dump ingestion: locate, load, normalize and bulk-import recipe
//! records, plus the comparison-token parser used by catalog search.

pub mod error;
pub mod filter;
pub mod importer;
pub mod loader;
pub mod normalize;
pub mod paths;
pub mod record;
pub mod shape;
pub mod types;

pub use error::{LoadError, PathError, SinkError};
pub use filter::{parse_filter, Filter, FilterOp};
pub use importer::{import_all, ImportFailure, ImportReport, RecipeSink, RecordOutcome};
pub use loader::{load_records, load_records_with, parse_records, records_from_value};
pub use normalize::{normalize, parse_duration_minutes, parse_rating};
pub use paths::{resolve_json_path, validate_json_path};
pub use record::RawRecord;
pub use shape::{ContainerShape, ContainerStrategy, ShapeClassifier};
pub use types::CanonicalRecipe;
