pub mod aggregate;
pub mod engine;
pub mod export;
pub mod filter;
pub mod reader;
pub mod report;
pub mod scanner;
pub mod schema;
pub mod topk;

pub use aggregate::{aggregate, Aggregation, FieldTally};
pub use engine::{run_dataset, run_datasets, DatasetReport};
pub use export::{export_json, print_summary, write_text_reports};
pub use filter::{Condition, RowFilter};
pub use reader::{read_header, Dataset, DatasetInfo, DELIMITER};
pub use report::{build_field_report, FieldReport, ReportEntry};
pub use scanner::{resolve_paths, scan_directory};
pub use schema::{resolve_column, resolve_columns, ResolvedColumn};
pub use topk::{top_k, RankedValue};
pub use visa_lens_common::{Result, VisaLensError};
