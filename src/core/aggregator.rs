use crate::domain::model::{AggregationResult, Table};
use crate::utils::error::{EtlError, Result};

/// Total, mean and best-selling product over a cleaned table.
///
/// The top product is the one whose summed sales is strictly greatest; on a
/// tie the product that appears first in the table wins.
pub fn analyze(table: &Table) -> Result<AggregationResult> {
    if table.is_empty() {
        return Err(EtlError::EmptyDataset);
    }

    let total_sales = table.total_sales();
    let average_sales = total_sales / table.len() as f64;

    let mut best: Option<(String, f64)> = None;
    for (product, sum) in table.product_totals() {
        if best.as_ref().map_or(true, |(_, best_sum)| sum > *best_sum) {
            best = Some((product, sum));
        }
    }
    let (top_product, top_sum) = best.ok_or(EtlError::EmptyDataset)?;

    tracing::info!("Total sales: {:.2}", total_sales);
    tracing::info!("Average sales: {:.2}", average_sales);
    tracing::info!("Top performing product: {} ({:.2})", top_product, top_sum);

    Ok(AggregationResult {
        total_sales,
        average_sales,
        top_product,
    })
}
