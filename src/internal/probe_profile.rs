#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use openmap::{MapConfig, OpenAddressingMap};
use plotters::prelude::*;
use rand::{Rng, distr::Alphanumeric, rngs::ThreadRng};

// Large enough that the probe statistics are stable between runs
const TABLE_SIZE: usize = 1 << 16;
// Load ratios from 0.1 to 0.9
const NUM_LOAD_RATIOS: usize = 9;
// Keeps every measured table at its initial capacity until churn
const MAX_LOAD_RATIO: f64 = 0.95;
// Share of the keys deleted and reinserted by the churn pass
const CHURN_DIVISOR: usize = 4;
const NOISE_LEN: usize = 8;

const SERIES: [&str; 3] = ["Successful lookup", "Unsuccessful lookup", "Successful lookup after churn"];

const COLORS: [RGBColor; 3] = [
    RGBColor(220, 50, 50), // red
    RGBColor(50, 90, 220), // blue
    RGBColor(50, 180, 50), // green
];

const FONT: &str = "sans-serif";

#[derive(Debug, Default, Clone, Copy)]
struct ProbeStats {
    average: f64,
    worst: usize,
}

impl ProbeStats {
    fn collect(lengths: impl IntoIterator<Item = usize>) -> Self {
        let (count, total, worst) = lengths
            .into_iter()
            .fold((0_usize, 0_usize, 0_usize), |(count, total, worst), len| {
                (count + 1, total + len, worst.max(len))
            });
        if count == 0 {
            return Self::default();
        }
        Self { average: total as f64 / count as f64, worst }
    }
}

// Unique per `tag` and `n`, the random noise spreads the keys over the table
fn random_key(rng: &mut ThreadRng, tag: &str, n: usize) -> String {
    let noise: String = rng.sample_iter(Alphanumeric).take(NOISE_LEN).map(char::from).collect();
    format!("{tag}-{noise}-{n}")
}

fn profile(rng: &mut ThreadRng, n_keys: usize) -> [ProbeStats; 3] {
    let config = MapConfig::default().with_capacity(TABLE_SIZE).with_max_load_ratio(MAX_LOAD_RATIO);
    let mut map = OpenAddressingMap::with_config(config);

    let keys: Vec<String> = (0..n_keys).map(|n| random_key(rng, "hit", n)).collect();
    for (n, key) in keys.iter().enumerate() {
        map.set(key.clone(), n);
    }

    let hits = ProbeStats::collect(keys.iter().map(|key| map.probe_length(key)));
    let misses = ProbeStats::collect(
        (0..n_keys.max(1)).map(|n| map.probe_length(random_key(rng, "miss", n).as_str())),
    );

    // delete a share of the keys and put them back, they land past their own tombstones
    let churned = n_keys / CHURN_DIVISOR;
    for key in keys.iter().take(churned) {
        if let Ok(n) = map.delete(key) {
            map.set(key.clone(), n);
        }
    }
    let after_churn = ProbeStats::collect(keys.iter().map(|key| map.probe_length(key)));

    println!(
        "  capacity = {}, tombstones after churn = {}, load ratio = {:.3}",
        map.capacity(),
        map.tombstones(),
        map.load_ratio()
    );

    [hits, misses, after_churn]
}

fn draw_chart(
    path: &str,
    caption: &str,
    y_desc: &str,
    series: &[Vec<(f64, f64)>],
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = series
        .iter()
        .flat_map(|points| points.iter().map(|&(_, y)| y))
        .fold(1.0, f64::max) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (FONT, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Load ratio")
        .y_desc(y_desc)
        .axis_desc_style((FONT, 16))
        .draw()?;

    for (idx, (name, points)) in SERIES.iter().zip(series).enumerate() {
        let color = COLORS[idx % COLORS.len()];
        let line_style = ShapeStyle::from(&color).stroke_width(2);

        chart
            .draw_series(LineSeries::new(points.iter().copied(), line_style))?
            .label(*name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(points.iter().map(|&point| Circle::new(point, 4, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let load_ratios: Vec<f64> =
        (1..=NUM_LOAD_RATIOS).map(|i| i as f64 / (NUM_LOAD_RATIOS + 1) as f64).collect();
    println!("Load ratios: {load_ratios:?}");

    let mut rng = rand::rng();
    let mut averages: Vec<Vec<(f64, f64)>> = vec![Vec::new(); SERIES.len()];
    let mut worst: Vec<Vec<(f64, f64)>> = vec![Vec::new(); SERIES.len()];

    for &ratio in &load_ratios {
        let n_keys = (TABLE_SIZE as f64 * ratio) as usize;
        println!("Testing with {n_keys} keys");

        for (idx, stats) in profile(&mut rng, n_keys).into_iter().enumerate() {
            println!("  {}: Avg probes = {:.2}, Worst = {}", SERIES[idx], stats.average, stats.worst);
            averages[idx].push((ratio, stats.average));
            worst[idx].push((ratio, stats.worst as f64));
        }
    }

    draw_chart("average_probe_length.png", "Linear Probing: Average Probe Length", "Probes", &averages)?;
    draw_chart("worst_probe_length.png", "Linear Probing: Worst-Case Probe Length", "Probes", &worst)?;

    println!("Generated plot images: average_probe_length.png, worst_probe_length.png");

    Ok(())
}
