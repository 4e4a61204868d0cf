use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// One cleaned row. Columns beyond `Date`, `Product` and `Sales` are kept in
/// source order so that duplicate detection still sees every column.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub product: String,
    pub sales: f64,
    pub extra: Vec<String>,
}

impl SalesRecord {
    pub fn new(date: NaiveDate, product: impl Into<String>, sales: f64) -> Self {
        Self {
            date,
            product: product.into(),
            sales,
            extra: Vec::new(),
        }
    }

    pub fn with_extra(mut self, extra: Vec<String>) -> Self {
        self.extra = extra;
        self
    }

    fn identity(&self) -> (NaiveDate, String, u64, Vec<String>) {
        // `+ 0.0` folds -0.0 into 0.0
        (
            self.date,
            self.product.clone(),
            (self.sales + 0.0).to_bits(),
            self.extra.clone(),
        )
    }
}

/// In-memory sales table for a single run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    extra_columns: Vec<String>,
    records: Vec<SalesRecord>,
}

impl Table {
    pub fn new(extra_columns: Vec<String>, records: Vec<SalesRecord>) -> Self {
        Self {
            extra_columns,
            records,
        }
    }

    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        Self::new(Vec::new(), records)
    }

    /// Drops exact duplicates, keeping the first occurrence. Typed records
    /// carry no missing values, so this is all cleaning has left to do and
    /// applying it twice changes nothing.
    pub fn clean(self) -> Self {
        let mut seen = HashSet::with_capacity(self.records.len());
        let records = self
            .records
            .into_iter()
            .filter(|record| seen.insert(record.identity()))
            .collect();
        Self {
            extra_columns: self.extra_columns,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub fn total_sales(&self) -> f64 {
        self.records.iter().map(|r| r.sales).sum()
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?.date;
        Some(self.records.iter().fold((first, first), |(lo, hi), r| {
            (lo.min(r.date), hi.max(r.date))
        }))
    }

    /// Product labels in the order they first appear.
    pub fn distinct_products(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.product.as_str())
            .filter(|p| seen.insert(*p))
            .collect()
    }

    /// Summed sales per product, in first-encountered order.
    pub fn product_totals(&self) -> Vec<(String, f64)> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut totals: Vec<(String, f64)> = Vec::new();
        for record in &self.records {
            match index.get(record.product.as_str()) {
                Some(&i) => totals[i].1 += record.sales,
                None => {
                    index.insert(record.product.as_str(), totals.len());
                    totals.push((record.product.clone(), record.sales));
                }
            }
        }
        totals
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult {
    pub total_sales: f64,
    pub average_sales: f64,
    pub top_product: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Table {
        Table::from_records(vec![
            SalesRecord::new(date(2024, 1, 3), "B", 50.0),
            SalesRecord::new(date(2024, 1, 1), "A", 100.0),
            SalesRecord::new(date(2024, 1, 1), "A", 100.0),
            SalesRecord::new(date(2024, 1, 2), "C", 25.0),
            SalesRecord::new(date(2024, 1, 5), "B", 10.0),
        ])
    }

    #[test]
    fn test_clean_removes_duplicates_and_is_idempotent() {
        let once = sample().clean();
        assert_eq!(once.len(), 4);
        assert_eq!(once.records()[1].product, "A");

        let twice = once.clone().clean();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_keeps_rows_differing_only_in_extra_columns() {
        let table = Table::new(
            vec!["Region".to_string()],
            vec![
                SalesRecord::new(date(2024, 1, 1), "A", 10.0).with_extra(vec!["North".into()]),
                SalesRecord::new(date(2024, 1, 1), "A", 10.0).with_extra(vec!["South".into()]),
            ],
        );
        assert_eq!(table.clean().len(), 2);
    }

    #[test]
    fn test_date_range_and_products() {
        let table = sample();
        assert_eq!(table.date_range(), Some((date(2024, 1, 1), date(2024, 1, 5))));
        assert_eq!(table.distinct_products(), vec!["B", "A", "C"]);
        assert_eq!(
            table.product_totals(),
            vec![
                ("B".to_string(), 60.0),
                ("A".to_string(), 200.0),
                ("C".to_string(), 25.0)
            ]
        );
        assert_eq!(table.total_sales(), 285.0);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::default();
        assert!(table.is_empty());
        assert_eq!(table.date_range(), None);
        assert!(table.product_totals().is_empty());
    }
}
