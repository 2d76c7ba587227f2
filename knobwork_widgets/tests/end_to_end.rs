// Copyright 2025 the Knobwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `knobwork_widgets` crate.
//!
//! Each test builds a widget, drives it through a host that records capture
//! traffic and owns a manual timer queue, and checks committed values.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use knobwork_color::Color;
use knobwork_gesture::{CaptureHost, EventOrigin, GestureContext, InputEvent, Touch};
use knobwork_timing::{TimerHost, TimerId, TimerQueue};
use knobwork_widgets::mapping::Axis;
use knobwork_widgets::{
    ButtonOptions, ColorWheelOptions, Dispatch, ScrubberOptions, SelectOptions, SliderOptions,
    ToggleOptions, Value, Widget, keys,
};
use kurbo::{Point, Rect};

#[derive(Default)]
struct Host {
    timers: TimerQueue,
    attached: u32,
    detached: u32,
}

impl CaptureHost for Host {
    fn attach_window_listeners(&mut self) {
        self.attached += 1;
    }

    fn detach_window_listeners(&mut self) {
        self.detached += 1;
    }
}

impl TimerHost for Host {
    fn schedule_repeating(&mut self, period: Duration) -> TimerId {
        self.timers.schedule_repeating(period)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.cancel(id)
    }
}

impl Host {
    /// Fires the next due timer into `widget`. Returns `false` if none is
    /// scheduled.
    fn fire_next(&mut self, widget: &mut Widget) -> bool {
        let Some(deadline) = self.timers.next_deadline() else {
            return false;
        };
        let Some(id) = self.timers.pop_due(deadline) else {
            return false;
        };
        widget.tick(id, self)
    }
}

const CX: GestureContext = GestureContext::IDLE;

fn press(x: f64, y: f64) -> InputEvent<'static> {
    InputEvent::MouseDown {
        button: 0,
        position: Point::new(x, y),
    }
}

fn release(x: f64, y: f64) -> InputEvent<'static> {
    InputEvent::mouse_up(0, Point::new(x, y))
}

fn number(v: &Value) -> f64 {
    v.as_number().expect("numeric value")
}

fn count_commits(widget: &mut Widget) -> Rc<Cell<u32>> {
    let commits = Rc::new(Cell::new(0));
    let seen = Rc::clone(&commits);
    widget.subscribe(move |change| {
        if change.key().is_value() {
            seen.set(seen.get() + 1);
        }
    });
    commits
}

#[test]
fn slider_quantizes_raw_values_to_step() {
    let mut host = Host::default();
    // Nine hundred units for the 1..10 range: x = 404 is a raw 5.04.
    let mut slider = Widget::slider(SliderOptions::default().with_axis(Axis::Horizontal))
        .with_bounds(Rect::new(0.0, 0.0, 900.0, 20.0));

    slider.handle(&press(404.0, 10.0), CX, &mut host);
    slider.handle(&release(404.0, 10.0), CX, &mut host);
    assert!((number(&slider.value()) - 5.0).abs() < 1e-9);

    slider.handle(&press(406.0, 10.0), CX, &mut host);
    slider.handle(&release(406.0, 10.0), CX, &mut host);
    assert!((number(&slider.value()) - 5.1).abs() < 1e-9);
}

#[test]
fn slider_notifies_once_per_commit() {
    let mut host = Host::default();
    let mut slider = Widget::slider(SliderOptions::default())
        .with_bounds(Rect::new(0.0, 0.0, 20.0, 90.0));
    let commits = count_commits(&mut slider);

    slider.handle(&press(10.0, 45.0), CX, &mut host);
    for y in [40.0, 30.0, 20.0] {
        slider.handle(&InputEvent::mouse_move(Point::new(10.0, y)), CX, &mut host);
    }
    assert_eq!(commits.get(), 0);
    slider.handle(&release(10.0, 20.0), CX, &mut host);
    assert_eq!(commits.get(), 1);

    // Configuration changes re-derive without committing.
    slider.set_property(keys::STEP, 1.0, false, &mut host);
    slider.set_property(keys::PERCENT, true, false, &mut host);
    assert_eq!(commits.get(), 1);
    assert!(slider.display().text.as_deref().is_some_and(|t| t.ends_with('%')));
}

#[test]
fn scrubber_steps_at_max_zone_then_commits_clamped() {
    let mut host = Host::default();
    let mut scrubber = Widget::scrubber(
        ScrubberOptions::default()
            .with_range(60.0, 80.0)
            .with_step(1.0)
            .with_zones(3)
            .with_spring(1.0)
            .with_value(70.0),
    )
    .with_bounds(Rect::new(0.0, 0.0, 20.0, 100.0));
    let commits = count_commits(&mut scrubber);

    // The top edge is offset 1.0, the outermost zone.
    scrubber.handle(&press(10.0, 0.0), CX, &mut host);
    assert_eq!(scrubber.display().zone, 3);
    assert!(scrubber.timer().is_some());

    for expected in [73.0, 76.0, 79.0, 80.0, 80.0] {
        assert!(host.fire_next(&mut scrubber));
        assert_eq!(scrubber.pending(), Some(Value::Number(expected)));
    }
    assert_eq!(commits.get(), 0);
    assert_eq!(scrubber.value(), Value::Number(70.0));

    scrubber.handle(&release(10.0, 0.0), CX, &mut host);
    assert_eq!(scrubber.value(), Value::Number(80.0));
    assert_eq!(commits.get(), 1);
    assert_eq!(scrubber.display().zone, 0);
    assert!(scrubber.timer().is_none());
    assert!(host.timers.is_empty());
}

#[test]
fn scrubber_neutral_tick_stops_timer() {
    let mut host = Host::default();
    let mut scrubber = Widget::scrubber(ScrubberOptions::default().with_spring(1.0))
        .with_bounds(Rect::new(0.0, 0.0, 20.0, 100.0));

    scrubber.handle(&press(10.0, 100.0), CX, &mut host);
    assert_eq!(scrubber.display().zone, -2);
    assert!(host.fire_next(&mut scrubber));
    assert_eq!(scrubber.pending(), Some(Value::Number(4.0)));

    // Back to the center: the timer survives until its next tick.
    scrubber.handle(&InputEvent::mouse_move(Point::new(10.0, 50.0)), CX, &mut host);
    assert_eq!(scrubber.display().zone, 0);
    assert!(scrubber.timer().is_some());
    assert!(host.fire_next(&mut scrubber));
    assert!(scrubber.timer().is_none());
    assert_eq!(scrubber.pending(), Some(Value::Number(4.0)));
    assert!(!host.fire_next(&mut scrubber));
}

#[test]
fn escaped_scrubber_release_cancels_timer() {
    let mut host = Host::default();
    let mut scrubber = Widget::scrubber(ScrubberOptions::default().with_spring(1.0))
        .with_bounds(Rect::new(0.0, 0.0, 20.0, 100.0));

    scrubber.handle(&press(10.0, 0.0), CX, &mut host);
    scrubber.handle(&InputEvent::MouseLeave, CX, &mut host);
    let outside = InputEvent::MouseMove {
        position: Point::new(10.0, -300.0),
        origin: EventOrigin::Window,
    };
    scrubber.handle(&outside, CX, &mut host);
    assert!(host.fire_next(&mut scrubber));

    let up = InputEvent::MouseUp {
        button: 0,
        position: Point::new(10.0, -300.0),
        origin: EventOrigin::Window,
    };
    scrubber.handle(&up, CX, &mut host);
    assert_eq!(scrubber.value(), Value::Number(6.0));
    assert!(host.timers.is_empty());
    assert_eq!((host.attached, host.detached), (1, 1));
}

#[test]
fn wheel_center_commits_white() {
    let mut host = Host::default();
    let mut wheel = Widget::color_wheel(ColorWheelOptions::default().with_value(Color::RED))
        .with_bounds(Rect::new(0.0, 0.0, 120.0, 120.0));

    wheel.handle(&press(60.0, 60.0), CX, &mut host);
    wheel.handle(&release(60.0, 60.0), CX, &mut host);

    let white = Color::from_hsv(0.0, 0.0, 1.0);
    assert_eq!(wheel.value(), Value::Color(white));
    assert_eq!(white.to_rgb8(), [255, 255, 255]);
    assert_eq!(wheel.display().handle.map(|h| h.hypot()), Some(0.0));
}

#[test]
fn wheel_edge_commits_saturated_hue() {
    let mut host = Host::default();
    let mut wheel =
        Widget::color_wheel(ColorWheelOptions::default()).with_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));

    wheel.handle(&press(50.0, 50.0), CX, &mut host);
    wheel.handle(&InputEvent::mouse_move(Point::new(100.0, 50.0)), CX, &mut host);
    wheel.handle(&release(100.0, 50.0), CX, &mut host);
    assert_eq!(wheel.value().as_color().map(|c| c.to_rgb8()), Some([255, 0, 0]));
}

#[test]
fn button_holds_true_until_last_pointer_lifts() {
    let mut host = Host::default();
    let mut button = Widget::button(
        ButtonOptions::default()
            .with_true_value("pressed")
            .with_false_value("idle"),
    )
    .with_bounds(Rect::new(0.0, 0.0, 40.0, 40.0));
    let touch = [Touch::new(7, Point::new(20.0, 20.0))];

    button.handle(&press(20.0, 20.0), CX, &mut host);
    button.handle(&InputEvent::TouchStart(&touch), CX, &mut host);
    button.handle(&release(20.0, 20.0), CX, &mut host);
    assert_eq!(button.value(), Value::from("pressed"));
    button.handle(&InputEvent::TouchEnd(&touch), CX, &mut host);
    assert_eq!(button.value(), Value::from("idle"));
}

#[test]
fn touch_toggle_flips_only_inside_bounds() {
    let mut host = Host::default();
    let mut toggle =
        Widget::toggle(ToggleOptions::default()).with_bounds(Rect::new(0.0, 0.0, 40.0, 40.0));
    let inside = [Touch::new(1, Point::new(10.0, 10.0))];
    let outside = [Touch::new(1, Point::new(90.0, 10.0))];

    toggle.handle(&InputEvent::TouchStart(&inside), CX, &mut host);
    toggle.handle(&InputEvent::TouchEnd(&inside), CX, &mut host);
    assert_eq!(toggle.value(), Value::Bool(true));
    assert!(toggle.display().on);

    toggle.handle(&InputEvent::TouchStart(&inside), CX, &mut host);
    toggle.handle(&InputEvent::TouchEnd(&outside), CX, &mut host);
    assert_eq!(toggle.value(), Value::Bool(true));
}

#[test]
fn scrolling_context_blocks_touch_engagement() {
    let mut host = Host::default();
    let mut slider = Widget::slider(SliderOptions::default())
        .with_bounds(Rect::new(0.0, 0.0, 20.0, 90.0));
    let touch = [Touch::new(3, Point::new(10.0, 0.0))];
    let scrolling = GestureContext { scrolling: true };

    let dispatch = slider.handle(&InputEvent::TouchStart(&touch), scrolling, &mut host);
    assert_eq!(dispatch, Dispatch::Handled { samples: 0 });
    assert!(!slider.is_engaged());
}

#[test]
fn deactivating_escaped_scrubber_releases_capture_and_timer() {
    let mut host = Host::default();
    let mut scrubber = Widget::scrubber(ScrubberOptions::default().with_spring(1.0))
        .with_bounds(Rect::new(0.0, 0.0, 20.0, 100.0));
    let commits = count_commits(&mut scrubber);

    scrubber.handle(&press(10.0, 0.0), CX, &mut host);
    scrubber.handle(&InputEvent::MouseLeave, CX, &mut host);
    assert!(host.fire_next(&mut scrubber));
    let stale = scrubber.timer().expect("scrubber timer");

    scrubber.set_inactive(true, &mut host);
    assert!(!scrubber.is_engaged());
    assert!(scrubber.timer().is_none());
    assert!(host.timers.is_empty());
    assert_eq!((host.attached, host.detached), (1, 1));
    assert!(!scrubber.tick(stale, &mut host));
    assert_eq!(scrubber.pending(), Some(Value::Number(5.0)));
    assert_eq!(scrubber.display().zone, 0);

    let up = InputEvent::MouseUp {
        button: 0,
        position: Point::new(10.0, -300.0),
        origin: EventOrigin::Window,
    };
    assert_eq!(scrubber.handle(&up, CX, &mut host), Dispatch::Inactive);
    assert_eq!(scrubber.value(), Value::Number(5.0));
    assert_eq!(commits.get(), 0);

    // Reactivated, the next gesture starts from scratch.
    scrubber.set_inactive(false, &mut host);
    scrubber.handle(&press(10.0, 50.0), CX, &mut host);
    scrubber.handle(&release(10.0, 50.0), CX, &mut host);
    assert_eq!(commits.get(), 1);
    assert!(host.timers.is_empty());
}

#[test]
fn deactivating_pressed_button_reverts_to_false() {
    let mut host = Host::default();
    let mut button = Widget::button(ButtonOptions::default());
    button.handle(&press(1.0, 1.0), CX, &mut host);
    assert_eq!(button.value(), Value::Bool(true));
    button.set_inactive(true, &mut host);
    assert_eq!(button.value(), Value::Bool(false));
    assert!(!button.is_engaged());
}

#[test]
fn locked_out_option_abandons_its_gesture() {
    let mut host = Host::default();
    let mut group = Widget::select(
        SelectOptions::default()
            .with_max_selections(1)
            .with_replace_oldest(false),
    );
    let a = group.add_option("A", "a", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
    let b = group.add_option("B", "b", Rect::new(10.0, 0.0, 20.0, 10.0)).unwrap();

    group.handle_option(a, &press(5.0, 5.0), CX, &mut host);
    group.handle_option(a, &InputEvent::MouseLeave, CX, &mut host);
    assert_eq!(host.attached, 1);

    // A touch selects B while the mouse still holds A.
    let touch = [Touch::new(2, Point::new(15.0, 5.0))];
    group.handle_option(b, &InputEvent::TouchStart(&touch), CX, &mut host);
    group.handle_option(b, &InputEvent::TouchEnd(&touch), CX, &mut host);
    assert_eq!(group.value(), Value::from(vec![Value::from("b")]));
    assert!(group.options()[a].is_inactive());
    assert_eq!(host.detached, 1);

    let up = InputEvent::MouseUp {
        button: 0,
        position: Point::new(5.0, 50.0),
        origin: EventOrigin::Window,
    };
    assert_eq!(group.handle_option(a, &up, CX, &mut host), Dispatch::Inactive);
    assert_eq!((host.attached, host.detached), (1, 1));

    // Deselecting B unlocks A, whose next gesture works normally.
    group.handle_option(b, &InputEvent::TouchStart(&touch), CX, &mut host);
    group.handle_option(b, &InputEvent::TouchEnd(&touch), CX, &mut host);
    group.handle_option(a, &press(5.0, 5.0), CX, &mut host);
    group.handle_option(a, &release(5.0, 5.0), CX, &mut host);
    assert_eq!(group.value(), Value::from(vec![Value::from("a")]));
}

#[test]
fn value_property_commits_through_type_check() {
    let mut host = Host::default();
    let mut slider = Widget::slider(SliderOptions::default());
    let commits = count_commits(&mut slider);

    slider.set_property(keys::VALUE, Value::Number(7.0), false, &mut host);
    assert_eq!(slider.value(), Value::Number(7.0));
    assert_eq!(slider.pending(), Some(Value::Number(7.0)));
    slider.set_property(keys::VALUE, 8_i32, false, &mut host);
    assert_eq!(slider.value(), Value::Number(8.0));
    assert_eq!(commits.get(), 2);

    slider.set_property(keys::VALUE, Color::RED, false, &mut host);
    slider.set_property(keys::VALUE, Duration::from_millis(5), false, &mut host);
    assert_eq!(slider.value(), Value::Number(8.0));
    assert_eq!(commits.get(), 2);
}

#[test]
fn button_commits_true_once_across_modalities() {
    let mut host = Host::default();
    let mut button =
        Widget::button(ButtonOptions::default()).with_bounds(Rect::new(0.0, 0.0, 40.0, 40.0));
    let commits = count_commits(&mut button);
    let touch = [Touch::new(9, Point::new(20.0, 20.0))];

    button.handle(&press(20.0, 20.0), CX, &mut host);
    button.handle(&InputEvent::TouchStart(&touch), CX, &mut host);
    assert_eq!(commits.get(), 1);
    button.handle(&InputEvent::TouchEnd(&touch), CX, &mut host);
    button.handle(&release(20.0, 20.0), CX, &mut host);
    assert_eq!(commits.get(), 2);
    assert_eq!(button.value(), Value::Bool(false));
}

#[test]
fn mistyped_setting_falls_back_to_default() {
    let mut host = Host::default();
    let mut scrubber = Widget::scrubber(ScrubberOptions::default().with_spring(1.0))
        .with_bounds(Rect::new(0.0, 0.0, 20.0, 100.0));
    scrubber.set_property(keys::ZONES, 3_i32, false, &mut host);
    scrubber.handle(&press(10.0, 0.0), CX, &mut host);
    assert_eq!(scrubber.display().zone, 2);
    scrubber.handle(&release(10.0, 0.0), CX, &mut host);
}
