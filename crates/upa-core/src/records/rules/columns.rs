//! Spreadsheet header mapping onto the canonical schema.

use crate::models::record::CanonicalField;

/// Source header → canonical field, for the census spreadsheet export.
pub const COLUMN_RENAMES: [(&str, CanonicalField); 6] = [
    ("Nome", CanonicalField::Name),
    ("Data Entrada", CanonicalField::AdmissionDate),
    ("Data Saída", CanonicalField::DischargeDate),
    ("Destino", CanonicalField::Hospital),
    ("Fim", CanonicalField::Status),
    ("Clinica", CanonicalField::Sector),
];

/// Canonical field for a source header, if it is in the rename table.
pub fn canonical_field(header: &str) -> Option<CanonicalField> {
    COLUMN_RENAMES
        .iter()
        .find(|(source, _)| *source == header)
        .map(|(_, field)| *field)
}

/// Output key for a source header: the canonical key, or the header itself.
pub fn output_key(header: &str) -> &str {
    canonical_field(header).map_or(header, |field| field.key())
}
