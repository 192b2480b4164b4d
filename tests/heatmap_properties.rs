//! Behavioral checks for the public heatmap pipeline

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use shotmap::{
    GridDims, GridInterpolator, HeatmapPipeline, HeatmapSettings, ShotPoint, SmoothedPoint,
    interpolate, smooth,
};

fn pt(x: f64, y: f64, value: f64) -> ShotPoint {
    ShotPoint { x, y, value }
}

/// Integer pixel positions with made (100) / missed (10) values, like mapped court shots.
fn random_shots(rng: &mut StdRng, count: usize, extent: f64) -> Vec<ShotPoint> {
    (0..count)
        .map(|_| {
            let x = rng.gen_range(0.0..extent).round();
            let y = rng.gen_range(0.0..extent).round();
            let value = if rng.gen_bool(0.45) { 100.0 } else { 10.0 };
            pt(x, y, value)
        })
        .collect()
}

#[test]
fn test_zero_value_points_never_influence_output() {
    let base = vec![pt(20.0, 20.0, 100.0), pt(25.0, 22.0, 10.0)];
    let mut with_zeros = base.clone();
    with_zeros.push(pt(21.0, 21.0, 0.0));
    with_zeros.insert(0, pt(23.0, 20.0, 0.0));

    let pipeline = HeatmapPipeline::from_settings(&HeatmapSettings {
        grid_size: Some(50),
        ..HeatmapSettings::default()
    })
    .unwrap();

    let a = pipeline.run(&base).unwrap();
    let b = pipeline.run(&with_zeros).unwrap();
    assert_eq!(a, b);
    assert!(b.data.iter().all(|c| c.value != 0.0));
}

#[test]
fn test_exact_node_reads_its_own_value() {
    let points = [
        SmoothedPoint {
            x: 5.0,
            y: 5.0,
            value: 80.0,
        },
        SmoothedPoint {
            x: 6.0,
            y: 5.0,
            value: 10.0,
        },
    ];
    let cells = interpolate(&points, 0.5, 10.0, 100).unwrap();
    let cell = cells.iter().find(|c| c.j == 5 && c.i == 5).unwrap();
    assert_eq!(cell.value, 80.0);
}

#[test]
fn test_point_beyond_radius_is_ignored() {
    let radius = 10.0;
    let target = pt(40.0, 40.0, 70.0);
    let far = pt(40.0 + radius + 1.0, 40.0, 10.0);

    let alone = smooth(&[target], 0.5, radius).unwrap();
    let with_far = smooth(&[target, far], 0.5, radius).unwrap();
    assert_eq!(alone[0], with_far[0]);

    // Node (30, 40) sits on the edge of target's reach and 21 away from `far`
    let grid_alone = interpolate(&alone, 0.5, radius, 80).unwrap();
    let grid_with_far = interpolate(&with_far, 0.5, radius, 80).unwrap();
    let edge = |cells: &[shotmap::GridCell]| {
        cells
            .iter()
            .find(|c| c.j == 30 && c.i == 40)
            .map(|c| c.value)
    };
    let value = edge(&grid_alone).expect("edge node within radius");
    assert!((value - 70.0).abs() < 1e-9, "expected 70, got {}", value);
    assert_eq!(edge(&grid_alone), edge(&grid_with_far));
}

#[test]
fn test_values_stay_on_scale_for_random_input() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let shots = random_shots(&mut rng, 150, 100.0);
    let pipeline = HeatmapPipeline::from_settings(&HeatmapSettings {
        grid_size: Some(100),
        ..HeatmapSettings::default()
    })
    .unwrap();
    let data = pipeline.run(&shots).unwrap();

    assert!(!data.is_empty());
    for cell in &data.data {
        assert!(cell.j < 100 && cell.i < 100);
        assert!(
            cell.value > 0.0 && cell.value <= 100.0,
            "cell ({}, {}) out of range: {}",
            cell.j,
            cell.i,
            cell.value
        );
    }
}

#[test]
fn test_single_point_scenario() {
    let smoothed = smooth(&[pt(50.0, 50.0, 100.0)], 0.5, 10.0).unwrap();
    let cells = interpolate(&smoothed, 0.5, 10.0, 100).unwrap();

    let center = cells.iter().find(|c| c.j == 50 && c.i == 50).unwrap();
    assert_eq!(center.value, 100.0);
    for cell in &cells {
        let dx = cell.j as f64 - 50.0;
        let dy = cell.i as f64 - 50.0;
        assert!((dx * dx + dy * dy).sqrt() <= 10.0);
    }
    // Every node inside the disc is reached by the lone point
    let inside = (0..100)
        .flat_map(|i| (0..100).map(move |j| (j, i)))
        .filter(|&(j, i)| {
            let dx = j as f64 - 50.0;
            let dy = i as f64 - 50.0;
            (dx * dx + dy * dy).sqrt() <= 10.0
        })
        .count();
    assert_eq!(cells.len(), inside);
}

#[test]
fn test_symmetric_configuration() {
    let points = [
        SmoothedPoint {
            x: 30.0,
            y: 27.0,
            value: 45.0,
        },
        SmoothedPoint {
            x: 30.0,
            y: 33.0,
            value: 45.0,
        },
    ];
    let cells = interpolate(&points, 0.5, 10.0, 60).unwrap();
    let center = cells.iter().find(|c| c.j == 30 && c.i == 30).unwrap();
    assert!((center.value - 45.0).abs() < 1e-9);
}

#[test]
fn test_repeated_runs_are_identical() {
    let mut rng = StdRng::seed_from_u64(42);
    let shots = random_shots(&mut rng, 80, 120.0);
    let settings = HeatmapSettings {
        grid_size: Some(120),
        ..HeatmapSettings::default()
    };
    let pipeline = HeatmapPipeline::from_settings(&settings).unwrap();

    let first = pipeline.run(&shots).unwrap();
    let second = pipeline.run(&shots).unwrap();
    assert_eq!(first, second);

    let smoothed = smooth(&shots, settings.power, settings.smoothing_radius).unwrap();
    let base = GridInterpolator::new(
        settings.power,
        settings.smoothing_radius,
        GridDims::square(120),
    )
    .unwrap();
    assert_eq!(
        base.with_parallel(true).interpolate(&smoothed),
        base.with_parallel(false).interpolate(&smoothed)
    );
    assert_eq!(base.interpolate(&smoothed), first.data);
}
