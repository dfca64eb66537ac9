//! Summary statistics over a merged dataset.

use std::collections::HashMap;
use std::fmt::Write;

use serde::Serialize;

use crate::models::record::{CanonicalField, CanonicalRecord};

/// Occurrence count of each distinct value of one field.
///
/// Ordered by descending count; equal counts keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValueCounts {
    pub field: String,
    pub counts: Vec<(String, usize)>,
}

impl ValueCounts {
    /// Count the values of `field` across `records`.
    pub fn of<'a>(
        field: CanonicalField,
        records: impl IntoIterator<Item = &'a CanonicalRecord>,
    ) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(String, usize)> = Vec::new();

        for record in records {
            let value = record.field(field);
            match index.get(value) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(value, counts.len());
                    counts.push((value.to_string(), 1));
                }
            }
        }

        // Stable sort keeps first-seen order among ties.
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            field: field.key().to_string(),
            counts,
        }
    }

    /// Count for a value, 0 if absent.
    pub fn get(&self, value: &str) -> usize {
        self.counts
            .iter()
            .find(|(v, _)| v == value)
            .map_or(0, |(_, c)| *c)
    }

    /// Value and count columns, the value column padded to align counts.
    pub fn render(&self) -> String {
        let width = self
            .counts
            .iter()
            .map(|(v, _)| v.chars().count())
            .max()
            .unwrap_or(0)
            .max(self.field.chars().count());

        let mut out = String::new();
        let _ = writeln!(out, "{}", self.field);
        for (value, count) in &self.counts {
            let pad = width - value.chars().count();
            let _ = writeln!(out, "{}{}    {}", value, " ".repeat(pad), count);
        }
        out
    }
}

/// Distribution of records by status, sector, and hospital.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub total: usize,
    pub by_status: ValueCounts,
    pub by_sector: ValueCounts,
    pub by_hospital: ValueCounts,
}

impl DatasetStats {
    pub fn from_records(records: &[CanonicalRecord]) -> Self {
        Self {
            total: records.len(),
            by_status: ValueCounts::of(CanonicalField::Status, records),
            by_sector: ValueCounts::of(CanonicalField::Sector, records),
            by_hospital: ValueCounts::of(CanonicalField::Hospital, records),
        }
    }

    /// Plain-text report, as written next to the merged dataset.
    pub fn render_report(&self) -> String {
        let mut out = String::new();
        out.push_str("ESTATÍSTICAS DOS DADOS MESCLADOS\n");
        out.push_str(&"=".repeat(50));
        out.push_str("\n\n");

        let _ = writeln!(out, "Total de registros: {}\n", self.total);

        out.push_str("1. DISTRIBUIÇÃO POR STATUS\n");
        out.push_str(&self.by_status.render());
        out.push('\n');

        out.push_str("2. DISTRIBUIÇÃO POR SETOR\n");
        out.push_str(&self.by_sector.render());
        out.push('\n');

        out.push_str("3. DISTRIBUIÇÃO POR HOSPITAL\n");
        out.push_str(&self.by_hospital.render());

        out
    }
}
