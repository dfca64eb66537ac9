//! Patient record models: raw extractor output and the canonical schema.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder for a field that could not be determined.
pub const NOT_INFORMED: &str = "NÃO INFORMADO";

/// Placeholder for a missing or invalid date. A patient without a valid
/// discharge date is still being attended.
pub const IN_CARE: &str = "EM ATENDIMENTO";

/// Key of the patient-type passthrough field set by the PDF extractor.
pub const TYPE_FIELD: &str = "Tipo";

/// The six fields every canonical record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalField {
    /// Patient name (`Nome`).
    Name,
    /// Admission date (`Data_Entrada`).
    AdmissionDate,
    /// Discharge date (`Data_Saida`).
    DischargeDate,
    /// Destination hospital (`Hospital`).
    Hospital,
    /// Outcome status (`Status`).
    Status,
    /// Clinical sector (`Setor`).
    Sector,
}

impl CanonicalField {
    /// All canonical fields in schema order.
    pub const ALL: [CanonicalField; 6] = [
        CanonicalField::Name,
        CanonicalField::AdmissionDate,
        CanonicalField::DischargeDate,
        CanonicalField::Hospital,
        CanonicalField::Status,
        CanonicalField::Sector,
    ];

    /// The exact, case-sensitive key used in serialized records.
    pub fn key(self) -> &'static str {
        match self {
            CanonicalField::Name => "Nome",
            CanonicalField::AdmissionDate => "Data_Entrada",
            CanonicalField::DischargeDate => "Data_Saida",
            CanonicalField::Hospital => "Hospital",
            CanonicalField::Status => "Status",
            CanonicalField::Sector => "Setor",
        }
    }

    /// Look up a field by its serialized key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Whether the field holds a date.
    pub fn is_date(self) -> bool {
        matches!(self, CanonicalField::AdmissionDate | CanonicalField::DischargeDate)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Field map produced by an extractor before validation.
///
/// Keys are not guaranteed to cover the canonical schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: BTreeMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing any previous value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.fields.remove(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// A patient record in the canonical schema.
///
/// All six canonical fields are always present; anything else an extractor
/// produced (such as `Tipo`) is kept in `extras`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    #[serde(rename = "Nome", default = "not_informed")]
    pub name: String,

    #[serde(rename = "Data_Entrada", default = "not_informed")]
    pub admission_date: String,

    #[serde(rename = "Data_Saida", default = "not_informed")]
    pub discharge_date: String,

    #[serde(rename = "Hospital", default = "not_informed")]
    pub hospital: String,

    #[serde(rename = "Status", default = "not_informed")]
    pub status: String,

    #[serde(rename = "Setor", default = "not_informed")]
    pub sector: String,

    /// Non-canonical passthrough fields.
    #[serde(flatten)]
    pub extras: BTreeMap<String, String>,
}

fn not_informed() -> String {
    NOT_INFORMED.to_string()
}

impl CanonicalRecord {
    /// Value of a canonical field.
    pub fn field(&self, field: CanonicalField) -> &str {
        match field {
            CanonicalField::Name => &self.name,
            CanonicalField::AdmissionDate => &self.admission_date,
            CanonicalField::DischargeDate => &self.discharge_date,
            CanonicalField::Hospital => &self.hospital,
            CanonicalField::Status => &self.status,
            CanonicalField::Sector => &self.sector,
        }
    }

    pub(crate) fn field_mut(&mut self, field: CanonicalField) -> &mut String {
        match field {
            CanonicalField::Name => &mut self.name,
            CanonicalField::AdmissionDate => &mut self.admission_date,
            CanonicalField::DischargeDate => &mut self.discharge_date,
            CanonicalField::Hospital => &mut self.hospital,
            CanonicalField::Status => &mut self.status,
            CanonicalField::Sector => &mut self.sector,
        }
    }

    /// Value of any field, canonical or extra, by serialized key.
    pub fn get(&self, key: &str) -> Option<&str> {
        match CanonicalField::from_key(key) {
            Some(field) => Some(self.field(field)),
            None => self.extras.get(key).map(String::as_str),
        }
    }

    /// The patient type code, for PDF-sourced records.
    pub fn patient_type(&self) -> Option<&str> {
        self.extras.get(TYPE_FIELD).map(String::as_str)
    }

    /// Flatten back into a raw field map.
    pub fn into_raw(self) -> RawRecord {
        let mut fields = self.extras;
        fields.insert(CanonicalField::Name.key().to_string(), self.name);
        fields.insert(CanonicalField::AdmissionDate.key().to_string(), self.admission_date);
        fields.insert(CanonicalField::DischargeDate.key().to_string(), self.discharge_date);
        fields.insert(CanonicalField::Hospital.key().to_string(), self.hospital);
        fields.insert(CanonicalField::Status.key().to_string(), self.status);
        fields.insert(CanonicalField::Sector.key().to_string(), self.sector);
        RawRecord { fields }
    }
}
