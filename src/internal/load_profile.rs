#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_precision_loss)]

//! Records how load factor and empty buckets evolve as random keys are inserted into
//! both map variants, and plots the results.

use log::info;
use plotters::prelude::*;
use primemap::{ChainedHashMap, QuadraticHashMap, StringHashMap, sip_hash};
use rand::Rng;

const INITIAL_CAPACITY: usize = 11;
const NUM_KEYS: usize = 5_000;
// Print a summary line every this many insertions
const REPORT_EVERY: usize = 1_000;

const METHODS: [&str; 2] = ["Quadratic Probing", "Separate Chaining"];

/// Measurements taken after each insertion
#[derive(Debug, Default)]
struct Profile {
    load: Vec<f64>,
    empty_fraction: Vec<f64>,
    capacity: Vec<usize>,
}

impl Profile {
    fn record<M: StringHashMap>(&mut self, map: &M) {
        self.load.push(map.table_load());
        self.empty_fraction.push(map.empty_buckets() as f64 / map.get_capacity() as f64);
        self.capacity.push(map.get_capacity());
    }
}

fn profile<M: StringHashMap<Value = usize>>(mut map: M, keys: &[String], method: &str) -> Profile {
    let mut profile = Profile::default();

    for (i, key) in keys.iter().enumerate() {
        map.put(key.clone(), i);
        profile.record(&map);

        if (i + 1) % REPORT_EVERY == 0 {
            println!(
                "  {}: {} keys, capacity = {}, load = {:.2}, empty buckets = {}",
                method,
                map.get_size(),
                map.get_capacity(),
                map.table_load(),
                map.empty_buckets()
            );
        }
    }

    profile
}

fn draw_series(
    path: &str,
    caption: &str,
    y_desc: &str,
    series: &[&[f64]],
) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let colors = [RGBColor(220, 50, 50), RGBColor(50, 90, 220)];

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series.iter().flat_map(|s| s.iter()).fold(0.0_f64, |max, &y| max.max(y)) * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..NUM_KEYS, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (method_idx, values) in series.iter().enumerate() {
        let color = colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(&color).stroke_width(2);

        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(i, &y)| (i + 1, y)),
                line_style,
            ))?
            .label(METHODS[method_idx])
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Generate random keys outside the runs so both variants see the same input
    let mut rng = rand::rng();
    let keys: Vec<String> =
        (0..NUM_KEYS).map(|_| format!("key-{}", rng.random_range(0..u64::MAX))).collect();
    info!("generated {} keys", keys.len());

    println!("Testing with {NUM_KEYS} keys");
    let quadratic = profile(
        QuadraticHashMap::new(INITIAL_CAPACITY, sip_hash),
        &keys,
        METHODS[0],
    );
    let chained = profile(ChainedHashMap::new(INITIAL_CAPACITY, sip_hash), &keys, METHODS[1]);

    for (method, run) in METHODS.iter().zip([&quadratic, &chained]) {
        let peak = run.load.iter().copied().fold(0.0_f64, f64::max);
        let resizes = run.capacity.windows(2).filter(|w| w[0] != w[1]).count();
        println!("{method}: peak load = {peak:.3}, resizes = {resizes}");
    }

    draw_series(
        "load_factor.png",
        "Table Load After Each Insertion",
        "Load Factor",
        &[quadratic.load.as_slice(), chained.load.as_slice()],
    )?;
    draw_series(
        "empty_buckets.png",
        "Empty Bucket Fraction After Each Insertion",
        "Empty Buckets / Capacity",
        &[quadratic.empty_fraction.as_slice(), chained.empty_fraction.as_slice()],
    )?;

    println!("Generated plot images: load_factor.png, empty_buckets.png");

    Ok(())
}
