use crate::domain::model::{AggregationResult, Table};
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use crate::utils::format::{format_currency, format_thousands};
use chrono::{Local, NaiveDateTime};

const RULE: &str = "==========================================";

pub const DEFAULT_TITLE: &str = "SALES REPORT";
pub const DEFAULT_CURRENCY: &str = "£";

/// Fixed-layout plain text summary of one run.
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    title: String,
    currency_symbol: String,
}

impl ReportRenderer {
    pub fn new(title: impl Into<String>, currency_symbol: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            currency_symbol: currency_symbol.into(),
        }
    }

    /// Renders the report stamped with the current local time.
    pub fn render(&self, table: &Table, result: &AggregationResult) -> Result<String> {
        self.render_at(table, result, Local::now().naive_local())
    }

    pub fn render_at(
        &self,
        table: &Table,
        result: &AggregationResult,
        generated_at: NaiveDateTime,
    ) -> Result<String> {
        let (first, last) = table.date_range().ok_or(EtlError::EmptyDataset)?;
        let money = |value: f64| format_currency(value, &self.currency_symbol);

        let lines = [
            self.title.clone(),
            format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M")),
            RULE.to_string(),
            String::new(),
            "SUMMARY STATISTICS:".to_string(),
            format!("- Total Sales: {}", money(result.total_sales)),
            format!("- Average Daily Sales: {}", money(result.average_sales)),
            format!("- Top Performing Product: {}", result.top_product),
            String::new(),
            "DATA OVERVIEW:".to_string(),
            format!(
                "- Period Covered: {} to {}",
                first.format("%Y-%m-%d"),
                last.format("%Y-%m-%d")
            ),
            format!("- Number of Transactions: {}", format_thousands(table.len())),
            format!("- Products Tracked: {}", table.distinct_products().len()),
        ];

        let mut text = lines.join("\n");
        text.push('\n');
        Ok(text)
    }

    /// Writes the rendered text and returns the location it was saved to.
    pub fn save<S: Storage>(&self, storage: &S, text: &str, name: &str) -> Result<String> {
        storage.write_file(name, text.as_bytes())?;
        let location = storage.output_location(name);
        tracing::info!("Report saved as '{}'", location);
        Ok(location)
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, DEFAULT_CURRENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SalesRecord;
    use chrono::NaiveDate;

    fn table() -> Table {
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        Table::from_records(vec![
            SalesRecord::new(day(15), "Widget", 1000.0),
            SalesRecord::new(day(3), "Gadget", 200.0),
            SalesRecord::new(day(28), "Widget", 34.5),
        ])
    }

    fn generated_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap()
    }

    #[test]
    fn test_render_layout() {
        let result = AggregationResult {
            total_sales: 1234.5,
            average_sales: 411.5,
            top_product: "Widget".to_string(),
        };
        let text = ReportRenderer::default()
            .render_at(&table(), &result, generated_at())
            .unwrap();

        let expected = "\
SALES REPORT
Generated: 2024-02-01 09:05
==========================================

SUMMARY STATISTICS:
- Total Sales: £1,234.50
- Average Daily Sales: £411.50
- Top Performing Product: Widget

DATA OVERVIEW:
- Period Covered: 2024-01-03 to 2024-01-28
- Number of Transactions: 3
- Products Tracked: 2
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_uses_configured_title_and_currency() {
        let result = AggregationResult {
            total_sales: 2_500_000.0,
            average_sales: 12.5,
            top_product: "Gadget".to_string(),
        };
        let text = ReportRenderer::new("Q1 RETROSPECTIVE", "$")
            .render_at(&table(), &result, generated_at())
            .unwrap();

        assert!(text.starts_with("Q1 RETROSPECTIVE\n"));
        assert!(text.contains("- Total Sales: $2,500,000.00"));
        assert!(text.contains("- Average Daily Sales: $12.50"));
    }

    #[test]
    fn test_render_live_timestamp_format() {
        let result = AggregationResult {
            total_sales: 1.0,
            average_sales: 1.0,
            top_product: "Widget".to_string(),
        };
        let text = ReportRenderer::default().render(&table(), &result).unwrap();
        let stamp = text
            .lines()
            .nth(1)
            .and_then(|line| line.strip_prefix("Generated: "))
            .unwrap();
        assert!(NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M").is_ok());
    }

    #[test]
    fn test_render_empty_table() {
        let result = AggregationResult {
            total_sales: 0.0,
            average_sales: 0.0,
            top_product: String::new(),
        };
        assert!(matches!(
            ReportRenderer::default().render(&Table::default(), &result),
            Err(EtlError::EmptyDataset)
        ));
    }
}
