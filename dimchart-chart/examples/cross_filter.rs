//! Cross filtering across three linked charts
//!
//! Selecting a region narrows the product and month charts, then selecting
//! a product narrows the month chart further. Run with
//! `RUST_LOG=debug` to see the propagation events.

use dimchart_chart::prelude::*;
use dimchart_scales::format::format_partition_value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct Sale {
    region: &'static str,
    product: &'static str,
    month: &'static str,
    amount: f64,
}

fn sale(region: &'static str, product: &'static str, month: &'static str, amount: f64) -> Sale {
    Sale {
        region,
        product,
        month,
        amount,
    }
}

fn print_chart(name: &str, chart: &ChartController<Sale>) {
    let partitions = chart
        .partitions()
        .iter()
        .map(|p| format!("{}={}", p.key(), format_partition_value(p.value())))
        .collect::<Vec<_>>();
    println!("  {name:<8} {}", partitions.join(", "));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let records = vec![
        sale("North", "Tea", "Jan", 1_200.0),
        sale("North", "Coffee", "Feb", 3_400.0),
        sale("South", "Tea", "Jan", 800.0),
        sale("South", "Cocoa", "Mar", 450.0),
        sale("East", "Coffee", "Jan", 2_100.0),
        sale("North", "Tea", "Mar", 950.0),
    ];

    let charts = vec![
        ChartComponents::new(
            ChartController::new(|s: &Sale| s.region.to_string(), reduce_count()),
            SelectionController::new(),
        ),
        ChartComponents::new(
            ChartController::new(
                |s: &Sale| s.product.to_string(),
                reduce_sum(|s: &Sale| s.amount),
            ),
            SelectionController::new(),
        ),
        ChartComponents::new(
            ChartController::new(|s: &Sale| s.month.to_string(), reduce_sum(|s: &Sale| s.amount)),
            SelectionController::new(),
        ),
    ];
    let controller = DimensionalController::new(records, charts);
    controller.refresh()?;

    let show = |title: &str| {
        println!("{title}");
        let charts = controller.charts();
        print_chart("region", &charts[0]);
        print_chart("product", &charts[1]);
        print_chart("month", &charts[2]);
    };

    show("All records:");

    if let Some(north) = controller.charts()[0].find("North") {
        controller.selections()[0].toggle(&north);
    }
    show("\nRegion North selected:");

    if let Some(tea) = controller.charts()[1].find("Tea") {
        controller.selections()[1].toggle(&tea);
    }
    show("\nProduct Tea selected:");

    println!("\nSelection context: {:?}", controller.selection_context());
    Ok(())
}
