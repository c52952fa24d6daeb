//! Plain-text rendering of a selected divider

use std::fmt::Write;

use divider::DividerResult;

/// Minimum width of the parameter column.
const PARAMETER_COLUMN_WIDTH: usize = 10;
/// Minimum width of the value column.
const VALUE_COLUMN_WIDTH: usize = 6;

fn rows(result: &DividerResult) -> [(&'static str, String); 4] {
    [
        ("R1", result.r1.to_string()),
        ("R2", result.r2.to_string()),
        ("Vout", format!("{}V", result.vout)),
        ("Error", format!("{}%", result.error_percent)),
    ]
}

/// Renders the result as a two-column markdown table.
///
/// Columns grow to fit their longest cell, and the value column always
/// keeps one space of padding after its longest value.
pub fn render(result: &DividerResult) -> String {
    let rows = rows(result);

    let parameter_width = rows
        .iter()
        .map(|(parameter, _)| parameter.len())
        .fold(PARAMETER_COLUMN_WIDTH, usize::max);
    let value_width = rows
        .iter()
        .map(|(_, value)| value.len())
        .fold(VALUE_COLUMN_WIDTH, usize::max)
        + 1;

    let mut out = format!(
        "| {:<parameter_width$}| {:<value_width$}|\n|-{}|-{}|\n",
        "Parameter",
        "Value",
        "-".repeat(parameter_width),
        "-".repeat(value_width),
    );
    for (parameter, value) in &rows {
        // writing to a String cannot fail
        let _ = writeln!(out, "| {parameter:<parameter_width$}| {value:<value_width$}|");
    }
    out
}

/// Renders the result as `Parameter: value` lines, for narrow terminals.
pub fn render_stacked(result: &DividerResult) -> String {
    rows(result)
        .iter()
        .map(|(parameter, value)| format!("{parameter}: {value}\n"))
        .collect()
}
