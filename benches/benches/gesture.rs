// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `knobwork_gesture` and whole-widget drags.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::time::Duration;

use knobwork_gesture::{
    ActivePointers, CaptureHost, GestureContext, GestureUnifier, InputEvent, Sample, Touch,
};
use knobwork_timing::{TimerHost, TimerId, TimerQueue};
use knobwork_widgets::{ScrubberOptions, SliderOptions, Widget};
use kurbo::{Point, Rect};

#[derive(Default)]
struct Host {
    timers: TimerQueue,
}

impl CaptureHost for Host {
    fn attach_window_listeners(&mut self) {}
    fn detach_window_listeners(&mut self) {}
}

impl TimerHost for Host {
    fn schedule_repeating(&mut self, period: Duration) -> TimerId {
        self.timers.schedule_repeating(period)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.cancel(id)
    }
}

/// A press, `moves` moves along a diagonal, and a release.
fn mouse_drag(moves: usize) -> Vec<InputEvent<'static>> {
    let mut events = Vec::with_capacity(moves + 2);
    events.push(InputEvent::MouseDown {
        button: 0,
        position: Point::ZERO,
    });
    for i in 0..moves {
        let t = i as f64;
        events.push(InputEvent::mouse_move(Point::new(t, t)));
    }
    events.push(InputEvent::mouse_up(0, Point::new(moves as f64, moves as f64)));
    events
}

fn bench_unifier(c: &mut Criterion) {
    let cx = GestureContext::IDLE;
    let mut group = c.benchmark_group("gesture/unifier");

    for moves in [16_usize, 256] {
        let events = mouse_drag(moves);
        group.bench_function(BenchmarkId::new("mouse_drag", moves), |b| {
            let mut host = Host::default();
            b.iter_batched(
                GestureUnifier::new,
                |mut unifier| {
                    let mut last = Point::ZERO;
                    let mut sink = |s: &Sample, _: ActivePointers, _: bool| last = s.position;
                    for event in &events {
                        unifier.handle(event, cx, &mut sink, &mut host);
                    }
                    black_box(last);
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.bench_function("two_touch_pinch", |b| {
        let mut host = Host::default();
        let start = [
            Touch::new(1, Point::new(0.0, 0.0)),
            Touch::new(2, Point::new(100.0, 100.0)),
        ];
        let frames: Vec<[Touch; 2]> = (0..64)
            .map(|i| {
                let d = f64::from(i);
                [
                    Touch::new(1, Point::new(d, d)),
                    Touch::new(2, Point::new(100.0 - d, 100.0 - d)),
                ]
            })
            .collect();
        b.iter_batched(
            GestureUnifier::new,
            |mut unifier| {
                let mut count = 0_u32;
                let mut sink = |_: &Sample, _: ActivePointers, _: bool| count += 1;
                unifier.handle(&InputEvent::TouchStart(&start), cx, &mut sink, &mut host);
                for frame in &frames {
                    unifier.handle(&InputEvent::TouchMove(frame), cx, &mut sink, &mut host);
                }
                unifier.handle(&InputEvent::TouchEnd(&start), cx, &mut sink, &mut host);
                black_box(count);
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_widgets(c: &mut Criterion) {
    let cx = GestureContext::IDLE;
    let events = mouse_drag(64);
    let mut group = c.benchmark_group("widgets/drag");

    group.bench_function("slider", |b| {
        let mut host = Host::default();
        b.iter_batched(
            || {
                Widget::slider(SliderOptions::default())
                    .with_bounds(Rect::new(0.0, 0.0, 20.0, 100.0))
            },
            |mut slider| {
                for event in &events {
                    slider.handle(event, cx, &mut host);
                }
                black_box(slider.value());
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("scrubber_with_ticks", |b| {
        let mut host = Host::default();
        b.iter_batched(
            || {
                Widget::scrubber(ScrubberOptions::default())
                    .with_bounds(Rect::new(0.0, 0.0, 20.0, 100.0))
            },
            |mut scrubber| {
                for event in &events {
                    scrubber.handle(event, cx, &mut host);
                    if let Some(id) = scrubber.timer() {
                        scrubber.tick(id, &mut host);
                    }
                }
                black_box(scrubber.value());
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_unifier, bench_widgets);
criterion_main!(benches);
