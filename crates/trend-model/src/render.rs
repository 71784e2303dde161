//! Terminal heatmap for the confusion matrix

use crate::metrics::ConfusionMatrix;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, presets::UTF8_FULL};

const TITLE: &str = "Confusion Matrix";

/// Blue ramp from near-white (0) to dark blue (the largest cell)
fn shade(count: usize, max: usize) -> Color {
    let t = if max == 0 { 0.0 } else { count as f64 / max as f64 };
    let lerp = |from: f64, to: f64| (from + (to - from) * t).round() as u8;
    Color::Rgb {
        r: lerp(247.0, 8.0),
        g: lerp(251.0, 48.0),
        b: lerp(255.0, 107.0),
    }
}

/// Build the matrix as a table: rows are actual classes, columns predicted
pub fn confusion_table(cm: &ConfusionMatrix) -> Table {
    let counts = cm.counts();
    let max = counts.iter().flatten().copied().max().unwrap_or(0);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        Cell::new("Actual \\ Predicted").add_attribute(Attribute::Bold),
        Cell::new("0 (down)").add_attribute(Attribute::Bold),
        Cell::new("1 (up)").add_attribute(Attribute::Bold),
    ]);

    for (actual, row) in counts.iter().enumerate() {
        let label = if actual == 0 { "0 (down)" } else { "1 (up)" };
        let mut cells = vec![Cell::new(label).add_attribute(Attribute::Bold)];
        for &count in row {
            let text_color = if max > 0 && count * 2 > max {
                Color::White
            } else {
                Color::Black
            };
            cells.push(
                Cell::new(count)
                    .bg(shade(count, max))
                    .fg(text_color)
                    .set_alignment(CellAlignment::Center),
            );
        }
        table.add_row(cells);
    }

    table
}

/// Titled rendering of the matrix, ready to print
pub fn render_confusion_matrix(cm: &ConfusionMatrix) -> String {
    format!("{TITLE}\n{}", confusion_table(cm))
}
