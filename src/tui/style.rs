//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

use super::layout::QuadrantId;

/// Dashboard color palette.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Reset;
    pub const FG: Color = Color::White;

    pub const HEADER_BG: Color = Color::Blue;
    pub const HEADER_FG: Color = Color::White;

    // Quadrant colors
    pub const CPU_COLOR: Color = Color::Red;
    pub const MEM_COLOR: Color = Color::Green;
    pub const DISK_COLOR: Color = Color::Blue;
    pub const NET_COLOR: Color = Color::Yellow;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn quadrant_color(id: QuadrantId) -> Color {
        match id {
            QuadrantId::Cpu => Theme::CPU_COLOR,
            QuadrantId::Memory => Theme::MEM_COLOR,
            QuadrantId::Disk => Theme::DISK_COLOR,
            QuadrantId::Network => Theme::NET_COLOR,
        }
    }

    /// Quadrant border style.
    pub fn border(id: QuadrantId) -> Style {
        Style::default().fg(Self::quadrant_color(id))
    }

    /// Quadrant title style (bold).
    pub fn title(id: QuadrantId) -> Style {
        Self::border(id).add_modifier(Modifier::BOLD)
    }
}
