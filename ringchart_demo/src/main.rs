// Copyright 2025 the Ringchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring chart demos rendered to a static HTML report.
//!
//! A simulated 60 Hz frame clock stands in for a widget host, so animated redraws
//! can be captured frame by frame.
mod html;
mod svg;

use std::time::Duration;

use kurbo::{Insets, Size};
use peniko::color::palette::css;
use ringchart::trace::{AnimationEndEvent, AnimationStartEvent, ConfigRejectedEvent, LayoutEvent};
use ringchart::{AnimationMode, ChartConfig, Easing, Host, RingChart, TraceSink, Value};

use crate::html::{HtmlFrame, HtmlSection};
use crate::svg::SvgScene;

const VIEW: Size = Size::new(160.0, 160.0);
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// A headless host that records repaint and frame requests.
#[derive(Debug)]
struct DemoHost {
    density: f64,
    frame_requested: bool,
    repaints: u32,
}

impl DemoHost {
    fn new(density: f64) -> Self {
        Self {
            density,
            frame_requested: false,
            repaints: 0,
        }
    }

    fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }
}

impl Host for DemoHost {
    fn density(&self) -> f64 {
        self.density
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    fn invalidate(&mut self) {
        self.repaints += 1;
    }
}

/// Prints chart diagnostics to stderr.
#[derive(Debug)]
struct StderrSink {
    label: &'static str,
}

impl TraceSink for StderrSink {
    fn on_layout(&mut self, e: &LayoutEvent) {
        if let Some(cut) = e.cut {
            eprintln!(
                "[{}] layout f={:.3} cut={} filled={:.1}",
                self.label,
                e.fraction,
                cut.index,
                cut.target()
            );
        }
    }

    fn on_animation_start(&mut self, e: &AnimationStartEvent) {
        eprintln!(
            "[{}] animation #{} started ({} ms, superseded: {})",
            self.label,
            e.generation,
            e.duration.as_millis(),
            e.superseded
        );
    }

    fn on_animation_end(&mut self, e: &AnimationEndEvent) {
        eprintln!(
            "[{}] animation #{} finished after {} frames",
            self.label, e.generation, e.frames
        );
    }

    fn on_config_rejected(&mut self, e: &ConfigRejectedEvent) {
        eprintln!("[{}] rejected: {}", self.label, e.error);
    }
}

fn main() {
    let sections = vec![
        scenarios_demo(),
        animation_demo(AnimationMode::Sequential),
        animation_demo(AnimationMode::Parallel),
        supersede_demo(),
        gauge_demo(),
    ];

    let html = html::render_report("Ring chart demo", &sections);
    std::fs::write("ringchart_demo.html", html).expect("write ringchart_demo.html");
    println!("wrote ringchart_demo.html");
}

fn padding() -> Insets {
    Insets::new(8.0, 8.0, 8.0, 8.0)
}

fn sample_values() -> [Value; 3] {
    [
        Value::argb(25, 0xFFE5_3935),
        Value::argb(25, 0xFF43_A047),
        Value::argb(50, 0xFF1E_88E5),
    ]
}

fn chart(config: ChartConfig, label: &'static str) -> RingChart<DemoHost> {
    let mut chart = RingChart::new(config, DemoHost::new(0.5)).expect("demo config is valid");
    chart.set_trace_sink(StderrSink { label });
    chart
}

fn snapshot(chart: &mut RingChart<DemoHost>, caption: String) -> HtmlFrame {
    let mut scene = SvgScene::new(VIEW);
    chart.paint(VIEW, padding(), &mut scene);
    HtmlFrame {
        caption,
        svg: scene.to_svg_string(),
    }
}

/// Drives the host clock until the chart stops asking for frames.
///
/// Captures every `every`-th frame plus the final one.
fn run_frames(
    chart: &mut RingChart<DemoHost>,
    start: Duration,
    every: usize,
    frames: &mut Vec<HtmlFrame>,
) -> Duration {
    let mut now = start;
    let mut index = 0;
    while chart.host_mut().take_frame_request() {
        let more = chart.on_frame(now);
        if index % every == 0 || !more {
            let caption = format!(
                "{} ms, f = {:.2}",
                (now - start).as_millis(),
                chart.fraction()
            );
            frames.push(snapshot(chart, caption));
        }
        now += FRAME_INTERVAL;
        index += 1;
    }
    now
}

fn scenarios_demo() -> HtmlSection {
    let fixed = ChartConfig::default().with_animation_mode(AnimationMode::None);
    let mut frames = Vec::new();

    let mut defaults = chart(fixed.clone(), "defaults");
    defaults.with_values(&sample_values());
    frames.push(snapshot(&mut defaults, "25 / 25 / 50 of 100".into()));

    let mut half = chart(fixed.clone().with_angle_range(90.0, 270.0), "half");
    half.with_max_value(50)
        .expect("50 > 0")
        .with_values(&[Value::new(10, css::CRIMSON), Value::new(15, css::TEAL)]);
    frames.push(snapshot(&mut half, "90..270 deg, 10 / 15 of 50".into()));

    let mut over = chart(fixed.clone(), "oversubscribed");
    over.with_values(&[Value::new(70, css::DARK_ORANGE), Value::new(60, css::PURPLE)]);
    frames.push(snapshot(&mut over, "70 / 60 of 100".into()));

    let mut empty = chart(fixed, "empty");
    if empty.with_value_range(10, 10).is_err() {
        frames.push(snapshot(&mut empty, "empty range rejected".into()));
    }

    HtmlSection {
        title: "Static layouts".into(),
        description: "Mode None: one redraw at fraction 1, no frames requested.".into(),
        frames,
    }
}

fn animation_demo(mode: AnimationMode) -> HtmlSection {
    let label = match mode {
        AnimationMode::Sequential => "sequential",
        _ => "parallel",
    };
    let mut chart = chart(ChartConfig::default().with_animation_mode(mode), label);
    chart.with_values(&sample_values());

    let mut frames = Vec::new();
    run_frames(&mut chart, Duration::ZERO, 8, &mut frames);

    HtmlSection {
        title: format!("{mode:?} animation"),
        description: format!(
            "1000 ms decelerating animation; {} repaints requested.",
            chart.host().repaints
        ),
        frames,
    }
}

fn supersede_demo() -> HtmlSection {
    let mut chart = chart(ChartConfig::default(), "supersede");
    chart.with_values(&sample_values());

    let mut frames = Vec::new();
    let mut now = Duration::ZERO;
    for _ in 0..20 {
        chart.host_mut().take_frame_request();
        chart.on_frame(now);
        now += FRAME_INTERVAL;
    }
    frames.push(snapshot(&mut chart, "before new values".into()));

    chart.with_values(&[Value::new(60, css::GOLDENROD), Value::new(30, css::INDIGO)]);
    run_frames(&mut chart, now, 12, &mut frames);

    HtmlSection {
        title: "Superseded animation".into(),
        description: "New values mid-run restart the animation from zero.".into(),
        frames,
    }
}

fn gauge_demo() -> HtmlSection {
    let config = ChartConfig::default()
        .with_angle_range(135.0, 405.0)
        .with_stroke_width(20.0)
        .with_background_width(8.0)
        .with_background_color(css::GAINSBORO)
        .with_animation_mode(AnimationMode::Parallel)
        .with_animation_duration(Duration::from_millis(600))
        .with_easing(Easing::AccelerateDecelerate);
    let mut chart = chart(config, "gauge");
    chart.with_values(&[Value::new(72, css::SEA_GREEN)]);

    let mut frames = Vec::new();
    run_frames(&mut chart, Duration::ZERO, 6, &mut frames);

    HtmlSection {
        title: "Gauge".into(),
        description: "270 deg sweep, thin background track, accelerate/decelerate easing.".into(),
        frames,
    }
}
