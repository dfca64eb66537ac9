//! Rule-based field extraction for patient-flow documents.

pub mod columns;
pub mod dates;
pub mod markers;
pub mod names;
pub mod patterns;

pub use columns::{canonical_field, output_key, COLUMN_RENAMES};
pub use dates::{format_dmy, parse_dmy, validate_date};
pub use markers::{blocks, marker_positions, split_at_markers, Block, PatientType};
pub use names::extract_name;
