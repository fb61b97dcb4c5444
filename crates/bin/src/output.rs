//! Output formatting helpers for human-readable and JSON output.

use clap::ValueEnum;
use datanode::{Kind, Value};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Render rows under `headers` as left-aligned columns separated by two
/// spaces. The last column is not padded. Cells beyond the header count are
/// ignored.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let render_row = |cells: &mut dyn Iterator<Item = &str>| -> String {
        let mut line = String::new();
        for (i, (cell, &width)) in cells.zip(&widths).enumerate() {
            if i + 1 == widths.len() {
                line.push_str(cell);
            } else {
                line.push_str(&format!("{cell:<width$}  "));
            }
        }
        line.trim_end().to_string()
    };

    let mut lines = vec![render_row(&mut headers.iter().copied())];
    lines.extend(rows.iter().map(|row| render_row(&mut row.iter().map(String::as_str))));
    lines.join("\n")
}

/// Print a table in human-readable format. Prints nothing for no rows.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if !rows.is_empty() {
        println!("{}", render_table(headers, rows));
    }
}

/// Print a single value in the selected format.
pub fn print_value(value: &Value, format: OutputFormat) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Human => println!("{value}"),
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
    }
    Ok(())
}

/// Short type label for a stored value, e.g. `int` or `null`.
pub fn kind_label(value: &Value) -> &'static str {
    value.kind().map_or("null", Kind::as_str)
}
