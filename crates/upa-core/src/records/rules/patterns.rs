//! Regex patterns for patient-flow extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Uppercase run (accented range included) ending right before a
    // location token: PS, BOX, ISOL, or "em casa".
    pub static ref PATIENT_NAME: Regex = Regex::new(
        r"([A-ZÁ-Ú\s']+)(?:PS|BOX|ISOL|em casa)"
    ).unwrap();

    // Strict dd/mm/yyyy, zero-padded.
    pub static ref DATE_DMY: Regex = Regex::new(
        r"^(\d{2})/(\d{2})/(\d{4})$"
    ).unwrap();
}
