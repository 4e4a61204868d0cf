//! Reads a comma-separated sales export into a typed [`Table`].
//!
//! Cleaning happens while loading: rows with a missing value in any column
//! are dropped, then exact duplicates are removed (first occurrence wins).
//! What is left must have a parseable `Date` and a non-negative numeric
//! `Sales` value, otherwise the whole load fails with `MalformedData`.

use crate::domain::model::{SalesRecord, Table};
use crate::utils::error::{EtlError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

pub const DATE_COLUMN: &str = "Date";
pub const PRODUCT_COLUMN: &str = "Product";
pub const SALES_COLUMN: &str = "Sales";

const MISSING_TOKENS: [&str; 19] = [
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A",
    "#N/A N/A", "#NA", "<NA>", "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y", "%d %B %Y", "%B %d, %Y",
];

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

fn is_missing(value: &str) -> bool {
    MISSING_TOKENS.contains(&value.trim())
}

/// Column positions resolved from the header row.
struct Schema {
    date: usize,
    product: usize,
    sales: usize,
    extra: Vec<(usize, String)>,
    width: usize,
}

impl Schema {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        // a repeated header resolves to its first column
        let mut header_map: HashMap<&str, usize> = HashMap::new();
        for (i, name) in headers.iter().enumerate() {
            header_map.entry(name.trim()).or_insert(i);
        }

        let missing: Vec<&str> = [DATE_COLUMN, PRODUCT_COLUMN, SALES_COLUMN]
            .into_iter()
            .filter(|name| !header_map.contains_key(name))
            .collect();
        if !missing.is_empty() {
            return Err(EtlError::malformed(format!(
                "missing required column(s): {}",
                missing.join(", ")
            )));
        }

        let date = header_map[DATE_COLUMN];
        let product = header_map[PRODUCT_COLUMN];
        let sales = header_map[SALES_COLUMN];
        let extra = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| ![date, product, sales].contains(i))
            .map(|(i, name)| (i, name.trim().to_string()))
            .collect();

        Ok(Self {
            date,
            product,
            sales,
            extra,
            width: headers.len(),
        })
    }

    fn to_record(&self, line: u64, cells: &[&str]) -> Result<SalesRecord> {
        let date = parse_date(cells[self.date]).ok_or_else(|| {
            EtlError::malformed(format!(
                "line {}: cannot parse date '{}'",
                line, cells[self.date]
            ))
        })?;
        let sales = parse_sales(cells[self.sales]).ok_or_else(|| {
            EtlError::malformed(format!(
                "line {}: sales value '{}' is not a non-negative number",
                line, cells[self.sales]
            ))
        })?;
        let extra = self
            .extra
            .iter()
            .map(|(i, _)| cells[*i].to_string())
            .collect();

        Ok(SalesRecord::new(date, cells[self.product], sales).with_extra(extra))
    }
}

/// Accepts the date layouts commonly found in spreadsheet exports; any time
/// of day is discarded.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

fn parse_sales(value: &str) -> Option<f64> {
    let v = value.trim().parse::<f64>().ok()?;
    if v.is_finite() && v >= 0.0 {
        Some(v)
    } else {
        None
    }
}

pub fn load_and_clean<R: Read>(reader: R) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let schema = Schema::from_headers(&headers)?;

    let mut raw_rows = 0usize;
    let mut incomplete = 0usize;
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let row = result?;
        raw_rows += 1;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        if row.len() > schema.width {
            return Err(EtlError::malformed(format!(
                "line {}: expected {} fields, found {}",
                line,
                schema.width,
                row.len()
            )));
        }

        // short rows count as missing trailing values
        let mut cells: Vec<&str> = row.iter().collect();
        cells.resize(schema.width, "");

        if cells.iter().any(|c| is_missing(c)) {
            incomplete += 1;
            continue;
        }

        records.push(schema.to_record(line, &cells)?);
    }

    let complete = records.len();
    let extra_columns = schema.extra.into_iter().map(|(_, name)| name).collect();
    let table = Table::new(extra_columns, records).clean();

    tracing::info!(
        "Loaded {} rows: {} incomplete, {} duplicates, {} kept",
        raw_rows,
        incomplete,
        complete - table.len(),
        table.len()
    );

    Ok(table)
}

pub fn load_and_clean_file<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => EtlError::SourceNotFound {
            path: path.display().to_string(),
        },
        _ => EtlError::IoError(e),
    })?;
    load_and_clean(std::io::BufReader::new(file))
}
