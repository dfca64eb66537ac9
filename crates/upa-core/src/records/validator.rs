//! Canonical schema validation of raw records.

use crate::models::record::{CanonicalField, CanonicalRecord, RawRecord, NOT_INFORMED};

use super::rules::validate_date;

/// Bring a raw record into the canonical schema.
///
/// Canonical fields absent from `record` are set to [`NOT_INFORMED`];
/// present fields keep their value and every non-canonical field is kept
/// as an extra. Pure and total.
pub fn validate(record: RawRecord) -> CanonicalRecord {
    let mut fields = record.into_fields();
    let mut take = |field: CanonicalField| {
        fields
            .remove(field.key())
            .unwrap_or_else(|| NOT_INFORMED.to_string())
    };

    let name = take(CanonicalField::Name);
    let admission_date = take(CanonicalField::AdmissionDate);
    let discharge_date = take(CanonicalField::DischargeDate);
    let hospital = take(CanonicalField::Hospital);
    let status = take(CanonicalField::Status);
    let sector = take(CanonicalField::Sector);

    CanonicalRecord {
        name,
        admission_date,
        discharge_date,
        hospital,
        status,
        sector,
        extras: fields,
    }
}

/// Run both date fields of a record through [`validate_date`].
pub fn normalize_dates(mut record: CanonicalRecord) -> CanonicalRecord {
    for field in CanonicalField::ALL.into_iter().filter(|f| f.is_date()) {
        let value = record.field_mut(field);
        *value = validate_date(Some(value.as_str()));
    }
    record
}
