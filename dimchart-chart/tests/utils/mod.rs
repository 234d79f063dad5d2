#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use dimchart_chart::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Routes `tracing` output through the test harness, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sale {
    pub region: &'static str,
    pub product: &'static str,
    pub month: &'static str,
    pub amount: f64,
}

fn sale(region: &'static str, product: &'static str, month: &'static str, amount: f64) -> Sale {
    Sale {
        region,
        product,
        month,
        amount,
    }
}

pub fn sales() -> Vec<Sale> {
    vec![
        sale("North", "Tea", "Jan", 100.0),
        sale("North", "Coffee", "Jan", 250.0),
        sale("North", "Tea", "Feb", 120.0),
        sale("South", "Coffee", "Feb", 300.0),
        sale("South", "Cocoa", "Mar", 80.0),
        sale("South", "Tea", "Mar", 90.0),
        sale("East", "Coffee", "Jan", 200.0),
        sale("East", "Cocoa", "Feb", 60.0),
        sale("West", "Tea", "Mar", 110.0),
        sale("West", "Coffee", "Feb", 140.0),
    ]
}

pub fn size_bucket(sale: &Sale) -> String {
    if sale.amount >= 150.0 { "large" } else { "small" }.to_string()
}

/// Region, product, month and size charts over the sales records.
pub fn sales_charts() -> Vec<ChartComponents<Sale>> {
    let region = ChartController::new(|s: &Sale| s.region.to_string(), reduce_count());
    let product = ChartController::new(
        |s: &Sale| s.product.to_string(),
        reduce_sum(|s: &Sale| s.amount),
    );
    let month = ChartController::new(
        |s: &Sale| s.month.to_string(),
        reduce_sum(|s: &Sale| s.amount),
    );
    let size = ChartController::new(size_bucket, reduce_count());
    [region, product, month, size]
        .into_iter()
        .map(|chart| ChartComponents::new(chart, SelectionController::new()))
        .collect()
}

/// Counts the partition updates published by `chart`.
pub fn count_updates<T: 'static>(chart: &ChartController<T>) -> Rc<Cell<usize>> {
    let count = Rc::new(Cell::new(0));
    let captured = count.clone();
    chart.on_partitions_changed(move |_| captured.set(captured.get() + 1));
    count
}

pub fn keys(partitions: &[Partition]) -> Vec<String> {
    partitions.iter().map(|p| p.key().to_string()).collect()
}
