//! Terminal User Interface for quadtop.
//!
//! Draws the four metric quadrants in a fixed 2x2 grid and keeps the grid in
//! step with the terminal size.

mod app;
mod event;
mod input;
pub mod layout;
mod render;
mod style;

pub use app::{App, AppError, LOOP_SLEEP, check_terminal_size};
pub use event::{CrosstermEvents, Event, EventSource};
pub use input::{KeyAction, handle_key};
pub use layout::{DirtyFlag, LayoutError, LayoutManager, QuadrantId};
pub use render::{HeaderInfo, header_text, render};
pub use style::{Styles, Theme};
