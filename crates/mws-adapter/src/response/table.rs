/*
[INPUT]:  Tab-delimited report bodies with a header row
[OUTPUT]: Row maps keyed by column name
[POS]:    Response layer - tab-separated decoding
[UPDATE]: When report quoting or column handling changes
*/

use std::collections::BTreeMap;

use crate::http::Result;

/// One report row: column name to cell value
pub type Row = BTreeMap<String, String>;

/// Decode a tab-separated body.
///
/// The first record names the columns. Quoting is lenient and ragged rows
/// are kept: cells beyond the header are dropped, missing cells are absent
/// from the row.
pub fn parse_table(body: &str) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}
