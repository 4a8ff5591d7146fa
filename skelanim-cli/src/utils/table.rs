//! Table formatting utilities

use prettytable::{Cell, Row, Table};

/// Create a table with bold headers
pub fn create_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*prettytable::format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).style_spec("b"))
        .collect();
    table.set_titles(Row::new(header_cells));

    table
}

/// Add a row to a table
pub fn add_table_row(table: &mut Table, cells: &[String]) {
    let row_cells: Vec<Cell> = cells.iter().map(|s| Cell::new(s)).collect();
    table.add_row(Row::new(row_cells));
}

/// Format 16 floats as four lines of four columns
pub fn format_matrix(values: &[f32; 16]) -> String {
    values
        .chunks(4)
        .map(|row| {
            row.iter()
                .map(|v| format!("{v:>9.4}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
