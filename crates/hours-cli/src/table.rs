//! Console table rendering.

use hours_core::ReportRow;
use prettytable::{Cell, Row, Table, format};

/// Builds a table with the header row as titles and the rest as body rows.
pub fn render_table(rows: &[ReportRow]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

    for row in rows {
        let cells = Row::new(row.cells().iter().map(|c| Cell::new(c)).collect());
        match row {
            ReportRow::Header => table.set_titles(cells),
            ReportRow::Day(_) | ReportRow::Total(_) => {
                table.add_row(cells);
            }
        }
    }

    table
}

/// Renders the rows as text.
pub fn format_table(rows: &[ReportRow]) -> String {
    render_table(rows).to_string()
}
