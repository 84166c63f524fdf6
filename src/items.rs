//! Uploaded item table: CSV ingestion, column lookup and numeric cell parsing

use rust_decimal::Decimal;
use std::io::Read;
use std::str::FromStr;

/// The uploaded line-item table, kept in row order with its original headers.
///
/// Identifying columns (product description, NCM, DI numbers, ...) are never
/// interpreted; they pass through to the augmented output unchanged.
#[derive(Debug, Clone)]
pub struct ItemTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ItemTable {
    /// Resolve a column by an ordered list of accepted aliases.
    ///
    /// Matching is case-insensitive and first-alias-wins: the alias order
    /// expresses preference, not the header order.
    pub fn resolve_column(&self, aliases: &[String]) -> Option<usize> {
        for alias in aliases {
            if let Some(idx) = self
                .headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(alias))
            {
                return Some(idx);
            }
        }
        None
    }

    /// Cell contents at (row, column), empty string if the row is short.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Read an item table from CSV, preserving header and row order
pub fn read_csv<R: Read>(reader: R) -> anyhow::Result<ItemTable> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    log::debug!("read item table: {} columns, {} rows", headers.len(), rows.len());
    Ok(ItemTable { headers, rows })
}

/// Parse a numeric cell, accepting both `1234.56` and the Brazilian
/// `1.234,56` convention (thousands dot, decimal comma). A leading `R$`
/// is tolerated. Returns `None` for an empty cell.
///
/// When a cell carries both separators their order decides the convention:
/// the decimal separator is the one that appears last. A lone comma is
/// always a decimal comma.
pub fn parse_decimal_cell(raw: &str) -> Option<Result<Decimal, ()>> {
    let s = raw.trim().trim_start_matches("R$").trim();
    if s.is_empty() {
        return None;
    }

    let last_comma = s.rfind(',');
    let last_dot = s.rfind('.');
    let normalized = match (last_comma, last_dot) {
        // Brazilian: strip thousands dots, promote the comma
        (Some(c), Some(d)) if c > d => s.replace('.', "").replace(',', "."),
        (Some(_), None) => s.replace(',', "."),
        // English thousands commas before a decimal dot
        (Some(_), Some(_)) => s.replace(',', ""),
        _ => s.to_string(),
    };

    Some(Decimal::from_str(&normalized).map_err(|_| ()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> ItemTable {
        let csv_data = "\
PRODUTO,NCM,QTD,VLR_UNITARIO_MOEDA,ALIQ_II
Parafuso M6,7318.15.00,1000,\"0,12\",16
Motor eletrico,8501.10.19,4,\"1.250,00\",14";
        read_csv(csv_data.as_bytes()).unwrap()
    }

    #[test]
    fn reads_headers_and_rows_in_order() {
        let t = table();
        assert_eq!(t.headers[0], "PRODUTO");
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.cell(1, 0), "Motor eletrico");
        assert_eq!(t.cell(0, 2), "1000");
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let t = table();
        let aliases = vec!["qtd".to_string(), "quantidade".to_string()];
        assert_eq!(t.resolve_column(&aliases), Some(2));
    }

    #[test]
    fn resolve_prefers_earlier_alias() {
        // Both aliases exist as headers; the first alias must win even
        // though the other appears earlier in the header row
        let csv_data = "VALOR,VLR_UNITARIO_MOEDA\n10,20";
        let t = read_csv(csv_data.as_bytes()).unwrap();
        let aliases = vec!["VLR_UNITARIO_MOEDA".to_string(), "VALOR".to_string()];
        assert_eq!(t.resolve_column(&aliases), Some(1));
    }

    #[test]
    fn resolve_missing_column() {
        let t = table();
        assert_eq!(t.resolve_column(&["ALIQ_IPI".to_string()]), None);
    }

    #[test]
    fn parse_plain_decimal() {
        assert_eq!(parse_decimal_cell("1234.56"), Some(Ok(dec!(1234.56))));
        assert_eq!(parse_decimal_cell("  42 "), Some(Ok(dec!(42))));
    }

    #[test]
    fn parse_brazilian_decimal() {
        assert_eq!(parse_decimal_cell("1.234,56"), Some(Ok(dec!(1234.56))));
        assert_eq!(parse_decimal_cell("0,12"), Some(Ok(dec!(0.12))));
        assert_eq!(parse_decimal_cell("R$ 1.250,00"), Some(Ok(dec!(1250.00))));
    }

    #[test]
    fn parse_english_thousands_decimal() {
        // Comma before dot means thousands commas, not a decimal comma
        assert_eq!(parse_decimal_cell("1,234.56"), Some(Ok(dec!(1234.56))));
        assert_eq!(parse_decimal_cell("12,345,678.90"), Some(Ok(dec!(12345678.90))));
    }

    #[test]
    fn parse_empty_cell_is_none() {
        assert_eq!(parse_decimal_cell(""), None);
        assert_eq!(parse_decimal_cell("   "), None);
    }

    #[test]
    fn parse_garbage_is_error() {
        assert_eq!(parse_decimal_cell("abc"), Some(Err(())));
        assert_eq!(parse_decimal_cell("1,234.56,78"), Some(Err(())));
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let csv_data = "A,B,C\n1,2";
        let t = read_csv(csv_data.as_bytes()).unwrap();
        assert_eq!(t.cell(0, 2), "");
    }
}
