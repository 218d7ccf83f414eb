//! Quadrant layout manager.
//!
//! Owns the four quadrants (CPU top-left, Memory top-right, Disk bottom-left,
//! Network bottom-right) and an off-screen surface for each. Geometry is only
//! ever recomputed from inside the main loop: resize notifications just set
//! the shared [`DirtyFlag`], and [`LayoutManager::refresh_if_dirty`] does the
//! work before the next draw.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::{Block, Borders, Widget};
use tracing::{debug, warn};

use crate::fmt::wrap_text;

use super::style::Styles;

/// Terminal size floor; smaller terminals are laid out as if they were this big.
pub const MIN_TERMINAL_WIDTH: u16 = 80;
pub const MIN_TERMINAL_HEIGHT: u16 = 24;

/// Blank border around the grid.
pub const MARGIN: u16 = 2;
/// Gap between neighbouring quadrants.
pub const SPACING: u16 = 1;

pub const MIN_QUADRANT_WIDTH: u16 = 35;
pub const MIN_QUADRANT_HEIGHT: u16 = 8;

/// Registration capacity.
pub const MAX_QUADRANTS: usize = 4;

/// Largest surface (in cells) that will be allocated.
pub const MAX_SURFACE_CELLS: usize = 512 * 512;

/// First content row inside a surface, below the top border and a blank row.
const CONTENT_TOP: u16 = 2;

// ---------------------------------------------------------------------------
// Quadrant identity
// ---------------------------------------------------------------------------

/// The four fixed quadrants, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuadrantId {
    Cpu,
    Memory,
    Disk,
    Network,
}

impl QuadrantId {
    pub const ALL: [QuadrantId; 4] = [
        QuadrantId::Cpu,
        QuadrantId::Memory,
        QuadrantId::Disk,
        QuadrantId::Network,
    ];

    pub fn index(self) -> usize {
        match self {
            QuadrantId::Cpu => 0,
            QuadrantId::Memory => 1,
            QuadrantId::Disk => 2,
            QuadrantId::Network => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            QuadrantId::Cpu => "CPU Statistics",
            QuadrantId::Memory => "Memory Statistics",
            QuadrantId::Disk => "Disk Usage",
            QuadrantId::Network => "Network Statistics",
        }
    }
}

impl std::fmt::Display for QuadrantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

// ---------------------------------------------------------------------------
// Dirty flag
// ---------------------------------------------------------------------------

/// Shared "geometry is stale" flag.
///
/// Clones share the same flag, so a notification context can hold one and
/// only ever call [`set`](Self::set).
#[derive(Debug, Clone, Default)]
pub struct DirtyFlag(Arc<AtomicBool>);

impl DirtyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clears the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from quadrant registration and surface management.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// All quadrant slots are taken.
    CapacityExceeded { capacity: usize },
    /// Quadrant was registered before.
    AlreadyRegistered(QuadrantId),
    /// Quadrants must be registered CPU, Memory, Disk, Network.
    OutOfOrder {
        expected: QuadrantId,
        got: QuadrantId,
    },
    /// Surfaces for these quadrants could not be created.
    SurfaceCreation { failed: Vec<QuadrantId> },
    /// Quadrant currently has no surface.
    NoSurface(QuadrantId),
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::CapacityExceeded { capacity } => {
                write!(f, "cannot register more than {} quadrants", capacity)
            }
            LayoutError::AlreadyRegistered(id) => write!(f, "quadrant {} already registered", id),
            LayoutError::OutOfOrder { expected, got } => {
                write!(f, "expected quadrant {} to be registered, got {}", expected, got)
            }
            LayoutError::SurfaceCreation { failed } => {
                let names: Vec<&str> = failed.iter().map(|id| id.title()).collect();
                write!(f, "failed to create surface for: {}", names.join(", "))
            }
            LayoutError::NoSurface(id) => write!(f, "quadrant {} has no surface", id),
        }
    }
}

impl std::error::Error for LayoutError {}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Size of every quadrant for a terminal of `width` x `height`.
///
/// Inputs below the terminal floor are raised to it; the result is never
/// smaller than the minimum quadrant size.
pub fn quadrant_size(width: u16, height: u16) -> (u16, u16) {
    let width = width.max(MIN_TERMINAL_WIDTH);
    let height = height.max(MIN_TERMINAL_HEIGHT);

    let avail_width = width - 2 * MARGIN;
    let avail_height = height - 2 * MARGIN;

    let comp_width = ((avail_width - SPACING) / 2).max(MIN_QUADRANT_WIDTH);
    let comp_height = ((avail_height - SPACING) / 2).max(MIN_QUADRANT_HEIGHT);
    (comp_width, comp_height)
}

/// Rectangle of quadrant `id` for a terminal of `width` x `height`.
pub fn quadrant_rect(id: QuadrantId, width: u16, height: u16) -> Rect {
    let (comp_width, comp_height) = quadrant_size(width, height);
    let right = MARGIN + comp_width + SPACING;
    let bottom = MARGIN + comp_height + SPACING;

    let (x, y) = match id {
        QuadrantId::Cpu => (MARGIN, MARGIN),
        QuadrantId::Memory => (right, MARGIN),
        QuadrantId::Disk => (MARGIN, bottom),
        QuadrantId::Network => (right, bottom),
    };
    Rect {
        x,
        y,
        width: comp_width,
        height: comp_height,
    }
}

// ---------------------------------------------------------------------------
// Surfaces
// ---------------------------------------------------------------------------

/// Off-screen drawing area of one quadrant, in terminal coordinates.
#[derive(Debug)]
pub struct Surface {
    id: u64,
    area: Rect,
    buffer: Buffer,
}

impl Surface {
    fn create(id: u64, area: Rect) -> Option<Self> {
        let cells = usize::from(area.width) * usize::from(area.height);
        if cells == 0 || cells > MAX_SURFACE_CELLS {
            return None;
        }
        Some(Self {
            id,
            area,
            buffer: Buffer::empty(area),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Width available to content inside the side borders.
    pub fn content_width(&self) -> usize {
        usize::from(self.area.width.saturating_sub(2))
    }

    /// Rows available to content between the first content row and the bottom border.
    pub fn content_height(&self) -> usize {
        usize::from(self.area.height.saturating_sub(CONTENT_TOP + 1))
    }

    /// Redraws border, centered title and wrapped `text`.
    fn paint(&mut self, quadrant: QuadrantId, text: &str) {
        self.buffer.reset();

        Block::default()
            .title(format!(" {} ", quadrant.title()))
            .title_alignment(Alignment::Center)
            .title_style(Styles::title(quadrant))
            .borders(Borders::ALL)
            .border_style(Styles::border(quadrant))
            .render(self.area, &mut self.buffer);

        let width = self.content_width();
        let x = self.area.x + 1;
        let top = self.area.y + CONTENT_TOP;
        for (row, line) in wrap_text(text, width, self.content_height())
            .iter()
            .enumerate()
        {
            // bounded by content_height(), which fits in u16
            let y = top + row as u16;
            self.buffer.set_stringn(x, y, line, width, Styles::default());
        }
    }
}

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

/// Registered quadrants, their geometry and their surfaces.
#[derive(Debug, Default)]
pub struct LayoutManager {
    registered: Vec<QuadrantId>,
    surfaces: [Option<Surface>; MAX_QUADRANTS],
    /// Physical terminal size seen by the last recompute.
    terminal: (u16, u16),
    next_surface_id: u64,
    dirty: DirtyFlag,
}

impl LayoutManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager with all four quadrants registered in order.
    pub fn with_all_quadrants() -> Result<Self, LayoutError> {
        let mut layout = Self::new();
        for id in QuadrantId::ALL {
            layout.register(id)?;
        }
        Ok(layout)
    }

    /// Shared handle to the dirty flag.
    pub fn dirty_flag(&self) -> DirtyFlag {
        self.dirty.clone()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_set()
    }

    pub fn registered(&self) -> &[QuadrantId] {
        &self.registered
    }

    /// Registers the next quadrant and marks the layout dirty.
    pub fn register(&mut self, id: QuadrantId) -> Result<(), LayoutError> {
        if self.registered.len() >= MAX_QUADRANTS {
            return Err(LayoutError::CapacityExceeded {
                capacity: MAX_QUADRANTS,
            });
        }
        if self.registered.contains(&id) {
            return Err(LayoutError::AlreadyRegistered(id));
        }
        let expected = QuadrantId::ALL[self.registered.len()];
        if id != expected {
            return Err(LayoutError::OutOfOrder { expected, got: id });
        }

        self.registered.push(id);
        self.dirty.set();
        debug!(quadrant = %id, "quadrant registered");
        Ok(())
    }

    /// Rebuilds every surface for a terminal of `width` x `height`.
    ///
    /// Old surfaces are dropped first. A quadrant whose surface cannot be
    /// created is left without one and reported in the error; the others are
    /// still created.
    pub fn recompute(&mut self, width: u16, height: u16) -> Result<(), LayoutError> {
        for slot in self.surfaces.iter_mut() {
            if let Some(old) = slot.take() {
                debug!(surface = old.id, "surface destroyed");
            }
        }
        self.terminal = (width, height);

        let mut failed = Vec::new();
        for &quadrant in &self.registered {
            let area = quadrant_rect(quadrant, width, height);
            let id = self.next_surface_id;
            self.next_surface_id += 1;

            match Surface::create(id, area) {
                Some(surface) => self.surfaces[quadrant.index()] = Some(surface),
                None => {
                    warn!(
                        quadrant = %quadrant,
                        width = area.width,
                        height = area.height,
                        "failed to create surface"
                    );
                    failed.push(quadrant);
                }
            }
        }

        debug!(width, height, "layout recomputed");
        if failed.is_empty() {
            Ok(())
        } else {
            Err(LayoutError::SurfaceCreation { failed })
        }
    }

    /// Recomputes when the dirty flag is set, clearing it.
    ///
    /// Returns `Ok(true)` when geometry changed and the screen should be cleared.
    pub fn refresh_if_dirty(&mut self, width: u16, height: u16) -> Result<bool, LayoutError> {
        if !self.dirty.take() {
            return Ok(false);
        }
        self.recompute(width, height)?;
        Ok(true)
    }

    pub fn surface(&self, id: QuadrantId) -> Option<&Surface> {
        self.surfaces[id.index()].as_ref()
    }

    /// Current geometry of a quadrant, if it has a surface.
    pub fn geometry(&self, id: QuadrantId) -> Option<Rect> {
        self.surface(id).map(Surface::area)
    }

    /// Ids of all live surfaces.
    pub fn surface_ids(&self) -> Vec<u64> {
        self.surfaces.iter().flatten().map(Surface::id).collect()
    }

    /// Replaces the content of a quadrant.
    pub fn update(&mut self, id: QuadrantId, text: &str) -> Result<(), LayoutError> {
        let surface = self.surfaces[id.index()]
            .as_mut()
            .ok_or(LayoutError::NoSurface(id))?;
        surface.paint(id, text);
        Ok(())
    }

    /// Copies all surfaces into `buf`, clipped to its area.
    pub fn draw(&self, buf: &mut Buffer) {
        for surface in self.surfaces.iter().flatten() {
            let clip = surface.area.intersection(buf.area);
            for y in clip.top()..clip.bottom() {
                for x in clip.left()..clip.right() {
                    if let (Some(src), Some(dst)) =
                        (surface.buffer.cell((x, y)), buf.cell_mut((x, y)))
                    {
                        *dst = src.clone();
                    }
                }
            }
        }
    }

    /// Physical terminal size used by the last recompute.
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(width: u16, height: u16) -> LayoutManager {
        let mut layout = LayoutManager::with_all_quadrants().unwrap();
        layout.recompute(width, height).unwrap();
        layout
    }

    fn row_text(buf: &Buffer, y: u16, x: u16, width: u16) -> String {
        (x..x + width)
            .map(|x| buf.cell((x, y)).unwrap().symbol())
            .collect()
    }

    fn overlaps(a: Rect, b: Rect) -> bool {
        a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
    }

    #[test]
    fn minimum_terminal_geometry() {
        let layout = ready(80, 24);

        let rects: Vec<Rect> = QuadrantId::ALL
            .iter()
            .map(|id| layout.geometry(*id).unwrap())
            .collect();
        for rect in &rects {
            assert!(rect.width >= MIN_QUADRANT_WIDTH);
            assert!(rect.height >= MIN_QUADRANT_HEIGHT);
            assert!(rect.right() <= 80);
            assert!(rect.bottom() <= 24);
        }
        for i in 0..rects.len() {
            for j in (i + 1)..rects.len() {
                assert!(!overlaps(rects[i], rects[j]), "{:?} overlaps {:?}", rects[i], rects[j]);
            }
        }

        assert_eq!(rects[0], Rect::new(2, 2, 37, 9));
        assert_eq!(rects[1], Rect::new(40, 2, 37, 9));
        assert_eq!(rects[2], Rect::new(2, 12, 37, 9));
        assert_eq!(rects[3], Rect::new(40, 12, 37, 9));
    }

    #[test]
    fn small_terminal_clamped_to_floor() {
        assert_eq!(quadrant_size(40, 10), quadrant_size(80, 24));
        assert_eq!(quadrant_rect(QuadrantId::Network, 10, 5), Rect::new(40, 12, 37, 9));
    }

    #[test]
    fn larger_terminal_scales() {
        assert_eq!(quadrant_size(120, 40), (57, 17));
        assert_eq!(quadrant_rect(QuadrantId::Memory, 120, 40), Rect::new(60, 2, 57, 17));
    }

    #[test]
    fn resize_destroys_old_surfaces() {
        let mut layout = ready(80, 24);
        let first = layout.surface_ids();
        assert_eq!(first.len(), 4);

        layout.recompute(120, 40).unwrap();
        let second = layout.surface_ids();

        assert_eq!(second.len(), 4);
        assert!(first.iter().all(|id| !second.contains(id)));
        for id in QuadrantId::ALL {
            assert_eq!(layout.geometry(id), Some(quadrant_rect(id, 120, 40)));
        }
        assert_eq!(layout.terminal_size(), (120, 40));
    }

    #[test]
    fn registration_order_and_capacity() {
        let mut layout = LayoutManager::new();
        assert_eq!(
            layout.register(QuadrantId::Disk),
            Err(LayoutError::OutOfOrder {
                expected: QuadrantId::Cpu,
                got: QuadrantId::Disk
            })
        );
        layout.register(QuadrantId::Cpu).unwrap();
        assert_eq!(
            layout.register(QuadrantId::Cpu),
            Err(LayoutError::AlreadyRegistered(QuadrantId::Cpu))
        );
        layout.register(QuadrantId::Memory).unwrap();
        layout.register(QuadrantId::Disk).unwrap();
        layout.register(QuadrantId::Network).unwrap();
        assert_eq!(
            layout.register(QuadrantId::Cpu),
            Err(LayoutError::CapacityExceeded { capacity: 4 })
        );
        assert_eq!(layout.registered(), &QuadrantId::ALL);
    }

    #[test]
    fn dirty_flag_protocol() {
        let mut layout = LayoutManager::new();
        assert!(!layout.is_dirty());

        layout.register(QuadrantId::Cpu).unwrap();
        assert!(layout.is_dirty());
        assert_eq!(layout.refresh_if_dirty(80, 24), Ok(true));
        assert!(!layout.is_dirty());
        assert_eq!(layout.refresh_if_dirty(80, 24), Ok(false));

        // a clone held elsewhere marks the layout stale
        let flag = layout.dirty_flag();
        flag.set();
        let before = layout.surface_ids();
        assert_eq!(layout.refresh_if_dirty(100, 30), Ok(true));
        assert_ne!(layout.surface_ids(), before);
        assert_eq!(
            layout.geometry(QuadrantId::Cpu),
            Some(quadrant_rect(QuadrantId::Cpu, 100, 30))
        );
    }

    #[test]
    fn oversized_surface_is_refused() {
        let mut layout = LayoutManager::with_all_quadrants().unwrap();
        let err = layout.recompute(u16::MAX, u16::MAX).unwrap_err();
        assert_eq!(
            err,
            LayoutError::SurfaceCreation {
                failed: QuadrantId::ALL.to_vec()
            }
        );
        assert!(layout.surface_ids().is_empty());
        assert_eq!(
            layout.update(QuadrantId::Cpu, "x"),
            Err(LayoutError::NoSurface(QuadrantId::Cpu))
        );

        // back to a sane size recovers
        layout.recompute(80, 24).unwrap();
        assert_eq!(layout.surface_ids().len(), 4);
    }

    #[test]
    fn update_draws_border_title_and_text() {
        let mut layout = ready(80, 24);
        layout
            .update(QuadrantId::Cpu, "Usage: 12.5%\nUser Time: 100")
            .unwrap();

        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        layout.draw(&mut buf);

        let rect = layout.geometry(QuadrantId::Cpu).unwrap();
        let top = row_text(&buf, rect.y, rect.x, rect.width);
        assert!(top.starts_with('┌'));
        assert!(top.contains(" CPU Statistics "));
        assert_eq!(buf.cell((rect.x, rect.y)).unwrap().fg, Styles::quadrant_color(QuadrantId::Cpu));

        // row right below the border is left blank
        let blank = row_text(&buf, rect.y + 1, rect.x + 1, rect.width - 2);
        assert_eq!(blank.trim(), "");

        let first = row_text(&buf, rect.y + 2, rect.x + 1, rect.width - 2);
        assert_eq!(first.trim_end(), "Usage: 12.5%");
        let second = row_text(&buf, rect.y + 3, rect.x + 1, rect.width - 2);
        assert_eq!(second.trim_end(), "User Time: 100");
    }

    #[test]
    fn update_truncates_to_content_height() {
        let mut layout = ready(80, 24);
        let text: Vec<String> = (0..20).map(|i| format!("line {i}")).collect();
        layout.update(QuadrantId::Disk, &text.join("\n")).unwrap();

        let surface = layout.surface(QuadrantId::Disk).unwrap();
        // 9 rows: border, blank, 6 content rows, border
        assert_eq!(surface.content_height(), 6);

        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        layout.draw(&mut buf);
        let rect = surface.area();
        let last = row_text(&buf, rect.bottom() - 2, rect.x + 1, rect.width - 2);
        assert_eq!(last.trim_end(), "line 5");
        let bottom = row_text(&buf, rect.bottom() - 1, rect.x, rect.width);
        assert!(bottom.starts_with('└'));
    }

    #[test]
    fn update_replaces_previous_text() {
        let mut layout = ready(80, 24);
        layout.update(QuadrantId::Memory, "a much longer first text").unwrap();
        layout.update(QuadrantId::Memory, "short").unwrap();

        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        layout.draw(&mut buf);
        let rect = layout.geometry(QuadrantId::Memory).unwrap();
        let line = row_text(&buf, rect.y + 2, rect.x + 1, rect.width - 2);
        assert_eq!(line.trim_end(), "short");
    }

    #[test]
    fn draw_clips_to_physical_terminal() {
        // layout computed for the floor, drawn into a smaller screen
        let mut layout = ready(60, 20);
        for id in QuadrantId::ALL {
            layout.update(id, "text").unwrap();
        }

        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 20));
        layout.draw(&mut buf);

        let rect = layout.geometry(QuadrantId::Cpu).unwrap();
        let top = row_text(&buf, rect.y, rect.x, rect.width);
        assert!(top.starts_with('┌'));
        assert_eq!(buf.area, Rect::new(0, 0, 60, 20));
    }
}
