//! Frame rendering: header row plus the quadrant surfaces.

use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;

use super::layout::LayoutManager;
use super::style::Styles;

/// What the header row shows.
#[derive(Debug, Clone, Copy)]
pub struct HeaderInfo {
    /// Unix timestamp of the displayed sample, if any.
    pub timestamp: Option<i64>,
    pub interval: Duration,
}

/// Header text: program name, sample time, interval and the quit hint.
pub fn header_text(info: &HeaderInfo) -> String {
    let time_str = info
        .timestamp
        .and_then(|ts| Local.timestamp_opt(ts, 0).single())
        .map(|dt: DateTime<Local>| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "----".to_string());
    format!(
        " quadtop  {}  interval {}s  q: quit",
        time_str,
        info.interval.as_secs()
    )
}

/// Main render function.
pub fn render(frame: &mut Frame, layout: &LayoutManager, info: &HeaderInfo) {
    let area = frame.area();

    let header_area = Rect {
        height: area.height.min(1),
        ..area
    };
    frame.render_widget(
        Paragraph::new(header_text(info)).style(Styles::header()),
        header_area,
    );

    layout.draw(frame.buffer_mut());
}
