//! CSV rendering for generated reports.

use super::builders::ReportTable;

/// Serializes a report as CSV: a bare header row, then one line per data
/// row with every field double-quoted and interior quotes doubled.
///
/// # Example
///
/// ```
/// use attend_engine::report::{ReportTable, to_csv};
///
/// let table = ReportTable {
///     title: "Overtime Report - 2026-01".to_string(),
///     columns: vec!["Name".to_string(), "OT Pay".to_string()],
///     rows: vec![vec!["Asha Verma".to_string(), "₹700".to_string()]],
/// };
/// assert_eq!(to_csv(&table), "Name,OT Pay\n\"Asha Verma\",\"₹700\"");
/// ```
pub fn to_csv(table: &ReportTable) -> String {
    let mut lines = Vec::with_capacity(table.rows.len() + 1);
    lines.push(table.columns.join(","));
    for row in &table.rows {
        let quoted: Vec<String> = row
            .iter()
            .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
            .collect();
        lines.push(quoted.join(","));
    }
    lines.join("\n")
}

/// Derives the download filename for a report: the title with whitespace
/// runs replaced by underscores, plus a `.csv` extension.
pub fn report_filename(title: &str) -> String {
    let mut name = title.split_whitespace().collect::<Vec<_>>().join("_");
    name.push_str(".csv");
    name
}
