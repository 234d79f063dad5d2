//! Axis ticks, label formatting and partition positions
//!
//! Prints nice ticks for a few ranges, compact number labels and the pixel
//! positions of partitions on a numeric and a categorical axis.

use dimchart_common::partition::{key_accessor, value_accessor};
use dimchart_common::Partition;
use dimchart_scales::format::format_number;
use dimchart_scales::ticks::neighbor_ticks;
use dimchart_scales::{nice_ticks, AxisRange, CoordinatesController};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Nice ticks ===");
    for (min, max) in [(0.0, 10.0), (0.0, 1.0), (3.0, 97.0), (-250.0, 1_200.0)] {
        let ticks = nice_ticks(min, max);
        let labels = ticks
            .majors
            .iter()
            .map(|v| format_number(*v))
            .collect::<Vec<_>>();
        println!(
            "[{min}, {max}] → {} majors, {} minors: {}",
            ticks.majors.len(),
            ticks.minors.len(),
            labels.join(" ")
        );
    }

    let ticks = nice_ticks(0.0, 100.0);
    println!(
        "neighbours of 37 among {:?}: {:?}",
        ticks.majors,
        neighbor_ticks(&ticks.majors, 37.0)
    );

    println!("\n=== Number formatting ===");
    for n in [0.25, 12.0, 1_260.0, 3_400_000.0, 7_000_000_000.0] {
        println!("  {n} → '{}'", format_number(n));
    }

    println!("\n=== Positions ===");
    let partitions = vec![
        Partition::new("Tea", 220),
        Partition::new("Coffee", 400),
        Partition::new("Cocoa", 50),
    ];

    let coordinates = CoordinatesController::new();
    coordinates.setup_x(key_accessor(), None);
    coordinates.setup_y(value_accessor(), Some(AxisRange::new(0.0, 400.0)));

    let xs = coordinates
        .x_axis_position_values(&partitions, 300.0)?
        .unwrap_or_default();
    let ys = coordinates
        .y_axis_position_values(&partitions, 200.0)?
        .unwrap_or_default();
    for (key, x) in &xs {
        println!("  {key}: x = {x}, y = {}", ys.get(key).copied().unwrap_or(f64::NAN));
    }

    Ok(())
}
