//! Calculator Display Demo
//!
//! Drives a horizontal glass scroll strip the way a calculator display
//! would: digits are appended, the strip pins to its trailing edge, and the
//! user drags the thumb back to read the start of the number.
//!
//! The in-process test host stands in for a real UI runtime.
//!
//! Run with: cargo run -p glass_scroll --example display_demo [config.toml]

use std::time::Duration;

use anyhow::Context;
use glass_core::testing::{ManualScheduler, TestObserver, TestViewport};
use glass_scroll::prelude::*;
use tracing_subscriber::EnvFilter;

const DIGIT_WIDTH: f32 = 18.0;
const DISPLAY: Size = Size::new(220.0, 48.0);
const ELEMENT: ElementId = ElementId(1);

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,glass_scroll=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match std::env::args().nth(1) {
        Some(path) => ScrollConfig::load(path.as_ref()).with_context(|| format!("loading {path}"))?,
        None => ScrollConfig::new().horizontal().auto_scroll_to_end(true),
    };
    tracing::info!(?config, "display config");

    let sizes = TestObserver::new();
    let mutations = TestObserver::new();
    let scheduler = ManualScheduler::new();
    let host = ScrollHost::new(sizes.clone(), mutations.clone(), scheduler.clone());

    let viewport = TestViewport::new(ELEMENT, Size::new(DIGIT_WIDTH, DISPLAY.height), DISPLAY)
        .with_track(Axis::Horizontal, Some(DISPLAY.width - 8.0));
    let display = GlassScroll::new(config, host);
    display.mount(Box::new(viewport.clone()));
    display.set_hovered(true);

    // Type a long number
    for digits in 2..=30 {
        viewport.set_content_size(Size::new(digits as f32 * DIGIT_WIDTH, DISPLAY.height));
        mutations.notify(ELEMENT);
        scheduler.run_frame();
        report(&display, &viewport, &format!("{digits} digits"));
    }
    scheduler.advance(Duration::from_millis(50));
    report(&display, &viewport, "settled");

    // Drag the thumb back to the start
    let Some(thumb) = display.thumb(Axis::Horizontal) else {
        tracing::info!("display does not overflow, nothing to drag");
        return Ok(());
    };
    let grab = Point::new(thumb.offset + thumb.length / 2.0, 4.0);
    display.pointer_down(Axis::Horizontal, PointerId(1), grab);
    for step in 1..=4 {
        let x = grab.x - thumb.offset * step as f32 / 4.0;
        display.pointer_move(PointerId(1), Point::new(x, grab.y));
        scheduler.run_frame();
        report(&display, &viewport, &format!("drag step {step}"));
    }
    display.pointer_up(PointerId(1));
    report(&display, &viewport, "released");

    Ok(())
}

fn report(display: &GlassScroll, viewport: &TestViewport, label: &str) {
    let info = display.render_info();
    let thumb = info.thumb(Axis::Horizontal);
    tracing::info!(
        label,
        offset = viewport.offset().x,
        thumb_length = thumb.map(|t| t.length),
        thumb_offset = thumb.map(|t| t.offset),
        cursor = ?thumb.map(|t| t.cursor),
        mask = %info.content.mask.as_ref().map(|m| m.to_string()).unwrap_or_default(),
    );
}
