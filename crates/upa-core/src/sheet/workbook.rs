//! Worksheet loading using calamine.

use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, DataType, Range, Reader, Xls, Xlsx};
use chrono::{NaiveDateTime, Timelike};
use tracing::debug;

use super::SheetTable;
use crate::error::SheetError;
use crate::models::document::SheetFormat;

type Source = Cursor<Vec<u8>>;

/// Load one worksheet of a workbook as a table, first row as header.
pub fn load_table(
    data: &[u8],
    format: SheetFormat,
    sheet_index: usize,
) -> Result<SheetTable, SheetError> {
    let range = match format {
        SheetFormat::Xlsx => load_range::<Xlsx<Source>>(data, sheet_index)?,
        SheetFormat::Xls => load_range::<Xls<Source>>(data, sheet_index)?,
    };

    let table = table_from_range(&range);
    debug!(
        "Loaded sheet {}: {} columns, {} rows",
        sheet_index,
        table.headers.len(),
        table.row_count()
    );
    Ok(table)
}

fn load_range<R>(data: &[u8], sheet_index: usize) -> Result<Range<Data>, SheetError>
where
    R: Reader<Source>,
    R::Error: std::fmt::Display,
{
    let mut workbook: R = open_workbook_from_rs(Cursor::new(data.to_vec()))
        .map_err(|e: R::Error| SheetError::Open(e.to_string()))?;

    workbook
        .worksheet_range_at(sheet_index)
        .ok_or(SheetError::MissingSheet(sheet_index))?
        .map_err(|e| SheetError::Range(e.to_string()))
}

fn table_from_range(range: &Range<Data>) -> SheetTable {
    let mut rows = range.rows();

    let headers = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| cell_text(cell).unwrap_or_default())
            .collect(),
        None => return SheetTable::default(),
    };

    let rows = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    SheetTable::new(headers, rows)
}

/// Text of a cell, `None` when the cell is empty or an error.
///
/// Numbers use their shortest form (`3.0` → `3`), date cells render as
/// `dd/mm/yyyy` (plus `HH:MM:SS` when the time is not midnight).
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(format_datetime)
            .or_else(|| Some(cell.to_string())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

fn format_datetime(dt: NaiveDateTime) -> String {
    if dt.time().num_seconds_from_midnight() == 0 {
        dt.format("%d/%m/%Y").to_string()
    } else {
        dt.format("%d/%m/%Y %H:%M:%S").to_string()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    /// A census export with one date-formatted cell, a numeric cell and a
    /// row with empty cells.
    pub(crate) fn sample_xlsx() -> Vec<u8> {
        let mut workbook = Workbook::new();
        let date_format = Format::new().set_num_format("dd/mm/yyyy");
        let admitted = ExcelDateTime::from_ymd(2024, 1, 5).unwrap();

        let sheet = workbook.add_worksheet();
        for (col, header) in ["Nome", "Data Entrada", "Data Saída", "Destino", "Fim", "Leito"]
            .into_iter()
            .enumerate()
        {
            sheet.write_string(0, col as u16, header).unwrap();
        }

        sheet.write_string(1, 0, "MARIA SOUZA").unwrap();
        sheet
            .write_datetime_with_format(1, 1, &admitted, &date_format)
            .unwrap();
        sheet.write_string(1, 2, "10/01/2024").unwrap();
        sheet.write_string(1, 3, "HRAN").unwrap();
        sheet.write_string(1, 4, "ALTA").unwrap();
        sheet.write_number(1, 5, 12).unwrap();

        sheet.write_string(2, 0, "PEDRO LIMA").unwrap();
        sheet.write_string(2, 4, "OBITO").unwrap();

        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::String(String::new())), None);
        assert_eq!(cell_text(&Data::String("ALTA".to_string())), Some("ALTA".to_string()));
        assert_eq!(cell_text(&Data::Int(42)), Some("42".to_string()));
        assert_eq!(cell_text(&Data::Float(3.0)), Some("3".to_string()));
        assert_eq!(cell_text(&Data::Float(2.5)), Some("2.5".to_string()));
        assert_eq!(cell_text(&Data::Bool(true)), Some("true".to_string()));
        assert_eq!(
            cell_text(&Data::DateTimeIso("2024-01-15".to_string())),
            Some("2024-01-15".to_string())
        );
    }

    #[test]
    fn test_format_datetime() {
        let midnight = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(format_datetime(midnight), "05/01/2024");

        let afternoon = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(format_datetime(afternoon), "05/01/2024 14:30:00");
    }

    #[test]
    fn test_table_from_range() {
        let mut range = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), Data::String("Nome".to_string()));
        range.set_value((0, 1), Data::String("Fim".to_string()));
        range.set_value((1, 0), Data::String("ANA".to_string()));
        range.set_value((1, 1), Data::String("ALTA".to_string()));
        range.set_value((2, 0), Data::String("JOAO".to_string()));

        let table = table_from_range(&range);
        assert_eq!(table.headers, vec!["Nome", "Fim"]);
        assert_eq!(
            table.rows,
            vec![
                vec![Some("ANA".to_string()), Some("ALTA".to_string())],
                vec![Some("JOAO".to_string()), None],
            ]
        );
    }

    #[test]
    fn test_corrupt_workbook() {
        let err = load_table(b"not a zip archive", SheetFormat::Xlsx, 0).unwrap_err();
        assert!(matches!(err, SheetError::Open(_)));

        let err = load_table(b"not an ole file", SheetFormat::Xls, 0).unwrap_err();
        assert!(matches!(err, SheetError::Open(_)));
    }

    #[test]
    fn test_load_xlsx_table() {
        let table = load_table(&sample_xlsx(), SheetFormat::Xlsx, 0).unwrap();

        assert_eq!(
            table.headers,
            vec!["Nome", "Data Entrada", "Data Saída", "Destino", "Fim", "Leito"]
        );
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.rows[0],
            vec![
                Some("MARIA SOUZA".to_string()),
                Some("05/01/2024".to_string()),
                Some("10/01/2024".to_string()),
                Some("HRAN".to_string()),
                Some("ALTA".to_string()),
                Some("12".to_string()),
            ]
        );
        assert_eq!(table.rows[1][0], Some("PEDRO LIMA".to_string()));
        assert_eq!(table.rows[1][1], None);
        assert_eq!(table.rows[1][4], Some("OBITO".to_string()));
    }

    #[test]
    fn test_missing_sheet_index() {
        let err = load_table(&sample_xlsx(), SheetFormat::Xlsx, 1).unwrap_err();
        assert!(matches!(err, SheetError::MissingSheet(1)));
    }
}
