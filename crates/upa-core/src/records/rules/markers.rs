//! Patient-type markers and block segmentation of report text.
//!
//! Census reports print the patient type character-spaced (`R E M`,
//! `C T I`, `S P`) at the start of each patient entry. Text is split at
//! every marker occurrence, with the marker kept at the start of the
//! block it opens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Patient type, as announced by a block marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientType {
    /// `R E M`, remoção (awaiting transfer).
    Rem,
    /// `C T I`, intensive care.
    Cti,
    /// `S P`, sala de procedimento.
    Sp,
}

impl PatientType {
    pub const ALL: [PatientType; 3] = [PatientType::Rem, PatientType::Cti, PatientType::Sp];

    /// Marker text as it appears in the source, trailing space included.
    pub fn marker(self) -> &'static str {
        match self {
            PatientType::Rem => "R E M ",
            PatientType::Cti => "C T I ",
            PatientType::Sp => "S P ",
        }
    }

    /// Trimmed marker text, stored in the `Tipo` field.
    pub fn code(self) -> &'static str {
        self.marker().trim_end()
    }

    /// The marker `text` starts with, if any.
    pub fn at_start(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| text.starts_with(t.marker()))
    }
}

impl fmt::Display for PatientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One patient entry of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub patient_type: PatientType,
    /// Block text after the marker.
    pub body: &'a str,
}

/// Byte offsets at which a marker begins, in one pass over the text.
pub fn marker_positions(text: &str) -> Vec<usize> {
    text.char_indices()
        .filter(|&(i, c)| matches!(c, 'R' | 'C' | 'S') && PatientType::at_start(&text[i..]).is_some())
        .map(|(i, _)| i)
        .collect()
}

/// Split text before every marker.
///
/// The leading segment (text before the first marker) is included, so the
/// segments concatenate back to the input.
pub fn split_at_markers(text: &str) -> Vec<&str> {
    let positions = marker_positions(text);
    let mut segments = Vec::with_capacity(positions.len() + 1);
    let mut start = 0;

    for pos in positions {
        segments.push(&text[start..pos]);
        start = pos;
    }
    segments.push(&text[start..]);

    segments
}

/// Segment report text into patient blocks.
///
/// Blank segments and segments that do not open with a marker (text before
/// the first marker) are dropped.
pub fn blocks(text: &str) -> Vec<Block<'_>> {
    split_at_markers(text)
        .into_iter()
        .filter(|segment| !segment.trim().is_empty())
        .filter_map(|segment| {
            let patient_type = PatientType::at_start(segment)?;
            Some(Block {
                patient_type,
                body: &segment[patient_type.marker().len()..],
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_codes() {
        assert_eq!(PatientType::Rem.code(), "R E M");
        assert_eq!(PatientType::Cti.code(), "C T I");
        assert_eq!(PatientType::Sp.code(), "S P");
    }

    #[test]
    fn test_split_keeps_marker_on_following_block() {
        let text = "CENSO R E M JOAO PS C T I MARIA BOX";
        let segments = split_at_markers(text);
        assert_eq!(segments, vec!["CENSO ", "R E M JOAO PS ", "C T I MARIA BOX"]);
        assert_eq!(segments.concat(), text);
    }

    #[test]
    fn test_blocks_drop_preamble() {
        let text = "Relatório diário\nR E M JOAO PS\nS P ANA ISOL";
        let blocks = blocks(text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].patient_type, PatientType::Rem);
        assert_eq!(blocks[0].body, "JOAO PS\n");
        assert_eq!(blocks[1].patient_type, PatientType::Sp);
        assert_eq!(blocks[1].body, "ANA ISOL");
    }

    #[test]
    fn test_no_markers() {
        assert!(blocks("").is_empty());
        assert!(blocks("   \n\n").is_empty());
        assert!(blocks("REM CTI SP sem espaçamento").is_empty());
    }

    #[test]
    fn test_marker_requires_trailing_space() {
        assert!(blocks("R E M").is_empty());
        assert_eq!(blocks("R E M ").len(), 1);
    }

    #[test]
    fn test_accented_text_before_marker() {
        let text = "ÇÃO S P JOSÉ PS";
        let blocks = blocks(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].body, "JOSÉ PS");
    }
}
