//! Patient name extraction from a report block.

use super::patterns::PATIENT_NAME;

/// Find the patient name in a block body.
///
/// The name is the uppercase run that sits right before the bed/location
/// token (`PS`, `BOX`, `ISOL`, `em casa`). Returns `None` when no such run
/// exists or it is only whitespace.
pub fn extract_name(body: &str) -> Option<String> {
    let caps = PATIENT_NAME.captures(body)?;
    let name = caps[1].trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
