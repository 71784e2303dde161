//! Prompt construction from recent closes

use crate::error::{NarrateError, Result};
use minijinja::{Environment, context};
use serde::Serialize;
use trend_data::{PriceRow, PriceTable};

/// How many trailing days go into the prompt
pub const PROMPT_DAYS: usize = 5;

const TEMPLATE_NAME: &str = "trend_summary";

const TEMPLATE: &str = "
You are a financial assistant AI. Based on the closing prices of {{ symbol }} over the last {{ days }} days:

{{ header }}
{% for line in lines %}{{ line }}
{% endfor %}
Write a short summary about the trend, including if it's going up, down, or fluctuating, and what it might indicate.
";

/// The closing prices a summary is asked about
#[derive(Debug, Clone, Serialize)]
pub struct PromptContext {
    pub symbol: String,
    pub rows: Vec<PriceRow>,
}

impl PromptContext {
    /// Take the last [`PROMPT_DAYS`] rows of `table`
    pub fn from_table(table: &PriceTable) -> Result<Self> {
        if table.is_empty() {
            return Err(NarrateError::EmptyTable(table.symbol().to_string()));
        }

        Ok(Self {
            symbol: table.symbol().to_string(),
            rows: table.tail(PROMPT_DAYS).to_vec(),
        })
    }

    /// Date/close columns, right-aligned, header first, no index column
    pub fn close_table(&self) -> (String, Vec<String>) {
        let decimals = self
            .rows
            .iter()
            .map(|r| decimals_needed(r.close))
            .max()
            .unwrap_or(0)
            .max(1);

        let dates: Vec<String> = self.rows.iter().map(|r| r.date.to_string()).collect();
        let closes: Vec<String> = self
            .rows
            .iter()
            .map(|r| format!("{:.*}", decimals, r.close))
            .collect();

        let date_width = dates.iter().map(String::len).max().unwrap_or(0).max(4);
        let close_width = closes.iter().map(String::len).max().unwrap_or(0).max(5);

        let header = format!("{:>date_width$} {:>close_width$}", "date", "close");
        let lines = dates
            .iter()
            .zip(&closes)
            .map(|(d, c)| format!("{d:>date_width$} {c:>close_width$}"))
            .collect();

        (header, lines)
    }

    /// Render the full prompt text
    pub fn render(&self) -> Result<String> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, TEMPLATE)?;

        let (header, lines) = self.close_table();
        let prompt = env.get_template(TEMPLATE_NAME)?.render(context! {
            symbol => &self.symbol,
            days => self.rows.len(),
            header => header,
            lines => lines,
        })?;

        Ok(prompt)
    }
}

/// Decimal places needed to show `value` exactly, capped at 6
fn decimals_needed(value: f64) -> usize {
    let text = format!("{value:.6}");
    let trimmed = text.trim_end_matches('0');
    trimmed
        .split_once('.')
        .map_or(0, |(_, frac)| frac.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn table(closes: &[f64]) -> PriceTable {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let rows = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceRow {
                date: start + chrono::Days::new(i as u64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1.0,
            })
            .collect();
        PriceTable::new("TSLA", rows).unwrap()
    }

    #[test]
    fn test_takes_last_five_rows() {
        let ctx = PromptContext::from_table(&table(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0])).unwrap();
        assert_eq!(ctx.rows.len(), PROMPT_DAYS);
        assert_eq!(ctx.rows[0].close, 3.0);
        assert_eq!(ctx.rows[4].close, 7.0);
    }

    #[test]
    fn test_short_table_uses_all_rows() {
        let ctx = PromptContext::from_table(&table(&[1.0, 2.0])).unwrap();
        assert_eq!(ctx.rows.len(), 2);
        assert!(ctx.render().unwrap().contains("over the last 2 days"));
    }

    #[test]
    fn test_empty_table_rejected() {
        let empty = PriceTable::new("TSLA", vec![]).unwrap();
        assert!(matches!(
            PromptContext::from_table(&empty),
            Err(NarrateError::EmptyTable(_))
        ));
    }

    #[test]
    fn test_close_table_alignment() {
        let ctx = PromptContext::from_table(&table(&[248.42, 238.5, 1000.0])).unwrap();
        let (header, lines) = ctx.close_table();

        assert_eq!(header, "      date   close");
        assert_eq!(lines[0], "2024-03-01  248.42");
        assert_eq!(lines[1], "2024-03-02  238.50");
        assert_eq!(lines[2], "2024-03-03 1000.00");
    }

    #[test]
    fn test_rendered_prompt() {
        let ctx = PromptContext::from_table(&table(&[100.0, 105.0, 102.0, 101.0, 99.0])).unwrap();
        let prompt = ctx.render().unwrap();

        assert!(prompt.contains(
            "You are a financial assistant AI. Based on the closing prices of TSLA over the last 5 days:"
        ));
        assert!(prompt.contains("2024-03-05  99.0"));
        assert!(prompt.contains("Write a short summary about the trend"));
        assert!(prompt.find("date").unwrap() < prompt.find("2024-03-01").unwrap());
    }

    #[test]
    fn test_decimals_needed() {
        assert_eq!(decimals_needed(248.42), 2);
        assert_eq!(decimals_needed(100.0), 0);
        assert_eq!(decimals_needed(0.125), 3);
    }
}
