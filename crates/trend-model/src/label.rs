//! Next-day direction labels

use trend_data::PriceRow;

/// A price row with its next-day outcome
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledRow {
    pub row: PriceRow,
    /// Close of the following row
    pub tomorrow_close: f64,
    /// 1 if `tomorrow_close > close`, else 0 (ties are 0)
    pub target: u8,
}

/// Label every row except the last, whose next close is unknown.
///
/// `rows` must be ascending by date; N rows yield N-1 labels.
pub fn label_rows(rows: &[PriceRow]) -> Vec<LabeledRow> {
    rows.windows(2)
        .map(|pair| {
            let (today, tomorrow) = (pair[0], pair[1]);
            LabeledRow {
                row: today,
                tomorrow_close: tomorrow.close,
                target: u8::from(tomorrow.close > today.close),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::price;

    #[test]
    fn test_labels_drop_last_row() {
        let rows = [
            price("2024-01-01", 100.0, 10.0),
            price("2024-01-02", 105.0, 10.0),
            price("2024-01-03", 102.0, 10.0),
        ];

        let labeled = label_rows(&rows);
        assert_eq!(labeled.len(), 2);
        assert_eq!(labeled[0].row.date, rows[0].date);
        assert_eq!(labeled[0].target, 1);
        assert_eq!(labeled[0].tomorrow_close, 105.0);
        assert_eq!(labeled[1].row.date, rows[1].date);
        assert_eq!(labeled[1].target, 0);
    }

    #[test]
    fn test_equal_close_is_not_up() {
        let rows = [
            price("2024-01-01", 100.0, 10.0),
            price("2024-01-02", 100.0, 10.0),
        ];
        assert_eq!(label_rows(&rows)[0].target, 0);
    }

    #[test]
    fn test_short_inputs() {
        assert!(label_rows(&[]).is_empty());
        assert!(label_rows(&[price("2024-01-01", 1.0, 1.0)]).is_empty());
    }

    #[test]
    fn test_count_is_n_minus_one() {
        let rows: Vec<_> = (1..=20)
            .map(|d| price(&format!("2024-02-{d:02}"), f64::from(d % 7), 1.0))
            .collect();
        assert_eq!(label_rows(&rows).len(), rows.len() - 1);
    }
}
