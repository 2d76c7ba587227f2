// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `knobwork_color` and the color mappings.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use knobwork_color::Color;
use knobwork_widgets::mapping::{WheelPoint, wheel_position};
use kurbo::{Point, Rect};

fn bench_color(c: &mut Criterion) {
    let hues: Vec<f64> = (0..360)
        .map(|i| f64::from(i) * core::f64::consts::TAU / 360.0)
        .collect();
    let colors: Vec<Color> = hues.iter().map(|&h| Color::from_hsv(h, 0.8, 1.0)).collect();

    let mut group = c.benchmark_group("color");

    group.bench_function("from_hsv/360", |b| {
        b.iter(|| {
            for &h in &hues {
                black_box(Color::from_hsv(h, 0.8, 1.0));
            }
        })
    });

    group.bench_function("hue_angle/360", |b| {
        b.iter(|| {
            for color in &colors {
                black_box(color.hue_angle());
            }
        })
    });

    group.bench_function("interpolate", |b| {
        let a = Color::from_rgb8(250, 160, 100);
        let z = Color::from_rgb8(190, 200, 255);
        b.iter(|| black_box(a.interpolate(&z, black_box(0.37))))
    });

    group.bench_function("wheel/position_to_color", |b| {
        let bounds = Rect::new(0.0, 0.0, 240.0, 240.0);
        b.iter(|| black_box(WheelPoint::from_position(bounds, black_box(Point::new(190.0, 64.0))).color()))
    });

    group.bench_function("wheel/color_to_position", |b| {
        b.iter(|| {
            for color in &colors {
                black_box(wheel_position(color));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_color);
criterion_main!(benches);
