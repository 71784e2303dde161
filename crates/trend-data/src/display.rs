//! Terminal rendering of price rows

use crate::price::PriceRow;
use comfy_table::{CellAlignment, Table, presets::UTF8_FULL};

/// Render rows as a table with one line per date
pub fn price_table(rows: &[PriceRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["date", "open", "high", "low", "close", "volume"]);

    for row in rows {
        table.add_row(vec![
            row.date.to_string(),
            format!("{:.2}", row.open),
            format!("{:.2}", row.high),
            format!("{:.2}", row.low),
            format!("{:.2}", row.close),
            format!("{:.0}", row.volume),
        ]);
    }

    for index in 1..6 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::row;

    #[test]
    fn test_price_table_contents() {
        let rendered = price_table(&[row("2024-01-02", 248.42)]).to_string();
        assert!(rendered.contains("date"));
        assert!(rendered.contains("2024-01-02"));
        assert!(rendered.contains("248.42"));
        assert!(rendered.contains("1000"));
    }
}
