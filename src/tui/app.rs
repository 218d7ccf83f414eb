//! Main TUI application.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::{debug, info, warn};

use crate::collector::{Collector, HostSource};
use crate::model::SystemSnapshot;
use crate::view::quadrant_text;

use super::event::{CrosstermEvents, Event, EventSource};
use super::input::{KeyAction, handle_key};
use super::layout::{LayoutError, LayoutManager, MIN_TERMINAL_HEIGHT, MIN_TERMINAL_WIDTH, QuadrantId};
use super::render::{HeaderInfo, render};

/// Pause between loop iterations.
pub const LOOP_SLEEP: Duration = Duration::from_millis(100);

/// Errors that stop the application.
#[derive(Debug)]
pub enum AppError {
    /// Terminal I/O failed.
    Io(io::Error),
    /// Terminal is below the startup floor.
    TerminalTooSmall { width: u16, height: u16 },
    /// Quadrants could not be set up.
    Layout(LayoutError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "terminal error: {}", e),
            AppError::TerminalTooSmall { width, height } => write!(
                f,
                "terminal too small: {}x{} (minimum {}x{})",
                width, height, MIN_TERMINAL_WIDTH, MIN_TERMINAL_HEIGHT
            ),
            AppError::Layout(e) => write!(f, "layout error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Layout(e) => Some(e),
            AppError::TerminalTooSmall { .. } => None,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        AppError::Io(e)
    }
}

impl From<LayoutError> for AppError {
    fn from(e: LayoutError) -> Self {
        AppError::Layout(e)
    }
}

/// Refuses to start below 80x24.
pub fn check_terminal_size(width: u16, height: u16) -> Result<(), AppError> {
    if width < MIN_TERMINAL_WIDTH || height < MIN_TERMINAL_HEIGHT {
        return Err(AppError::TerminalTooSmall { width, height });
    }
    Ok(())
}

/// Main TUI application.
///
/// Single-threaded: every iteration services a pending resize, samples and
/// renders when the interval has elapsed, checks for one input event and
/// sleeps. Signal handlers only touch the shared `running` flag.
pub struct App<H: HostSource> {
    collector: Collector<H>,
    layout: LayoutManager,
    snapshot: Option<SystemSnapshot>,
    interval: Duration,
    last_update: Option<Instant>,
    running: Arc<AtomicBool>,
}

impl<H: HostSource> App<H> {
    /// Creates the app and registers all four quadrants.
    pub fn new(
        collector: Collector<H>,
        interval: Duration,
        running: Arc<AtomicBool>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            collector,
            layout: LayoutManager::with_all_quadrants()?,
            snapshot: None,
            interval,
            last_update: None,
            running,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn layout(&self) -> &LayoutManager {
        &self.layout
    }

    pub fn snapshot(&self) -> Option<&SystemSnapshot> {
        self.snapshot.as_ref()
    }

    /// Runs the TUI application until quit or signal.
    ///
    /// The terminal is restored even when the loop fails.
    pub fn run(mut self) -> Result<(), AppError> {
        let (width, height) = crossterm::terminal::size()?;
        check_terminal_size(width, height)?;

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        let backend = CrosstermBackend::new(stdout);

        let result = match Terminal::new(backend) {
            Ok(mut terminal) => {
                let result = self.run_loop(&mut terminal, &mut CrosstermEvents);
                let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen, Show);
                result
            }
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
                Err(e.into())
            }
        };

        // Restore terminal
        disable_raw_mode()?;
        result
    }

    /// Lays out the quadrants for the current terminal and loops until stopped.
    pub fn run_loop<B: Backend, E: EventSource>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut E,
    ) -> Result<(), AppError> {
        let size = terminal.size()?;
        self.layout.refresh_if_dirty(size.width, size.height)?;
        terminal.clear()?;
        info!(
            width = size.width,
            height = size.height,
            interval_secs = self.interval.as_secs(),
            "display started"
        );

        while self.is_running() {
            self.step(terminal, events, Instant::now())?;
            thread::sleep(LOOP_SLEEP);
        }

        info!("display stopped");
        Ok(())
    }

    /// One loop iteration at `now`.
    pub fn step<B: Backend, E: EventSource>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut E,
        now: Instant,
    ) -> Result<(), AppError> {
        let mut force = false;
        if self.layout.is_dirty() {
            let size = terminal.size()?;
            // a missing surface only blanks its quadrant; keep running
            if let Err(e) = self.layout.refresh_if_dirty(size.width, size.height) {
                warn!("{}", e);
            }
            terminal.clear()?;
            force = true;
        }

        if force || self.is_due(now) {
            self.sample_and_render(terminal, now)?;
        }

        match events.poll_event()? {
            Some(Event::Key(key)) => {
                if handle_key(key) == KeyAction::Quit {
                    debug!(?key, "quit requested");
                    self.running.store(false, Ordering::SeqCst);
                }
            }
            Some(Event::Resize(width, height)) => {
                debug!(width, height, "terminal resized");
                self.layout.dirty_flag().set();
            }
            None => {}
        }
        Ok(())
    }

    fn is_due(&self, now: Instant) -> bool {
        self.last_update
            .is_none_or(|at| now.saturating_duration_since(at) >= self.interval)
    }

    fn sample_and_render<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        now: Instant,
    ) -> Result<(), AppError> {
        let snapshot = self.collector.collect_snapshot_at(now);
        debug!("{}", snapshot.describe());

        let text = quadrant_text(&snapshot);
        for (id, content) in [
            (QuadrantId::Cpu, &text.cpu),
            (QuadrantId::Memory, &text.memory),
            (QuadrantId::Disk, &text.disk),
            (QuadrantId::Network, &text.network),
        ] {
            if let Err(e) = self.layout.update(id, content) {
                warn!("{}", e);
            }
        }

        let info = HeaderInfo {
            timestamp: Some(snapshot.timestamp),
            interval: self.interval,
        };
        let layout = &self.layout;
        terminal.draw(|frame| render(frame, layout, &info))?;

        self.snapshot = Some(snapshot);
        self.last_update = Some(now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::MockHost;
    use crate::tui::layout::quadrant_rect;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct ScriptedEvents(VecDeque<Event>);

    impl ScriptedEvents {
        fn push(&mut self, event: Event) {
            self.0.push_back(event);
        }
    }

    impl EventSource for ScriptedEvents {
        fn poll_event(&mut self) -> io::Result<Option<Event>> {
            Ok(self.0.pop_front())
        }
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn app(host: MockHost) -> App<MockHost> {
        App::new(
            Collector::new(host, "/proc"),
            Duration::from_secs(1),
            Arc::new(AtomicBool::new(true)),
        )
        .unwrap()
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn terminal_size_floor() {
        assert!(check_terminal_size(80, 24).is_ok());
        assert!(matches!(
            check_terminal_size(79, 24),
            Err(AppError::TerminalTooSmall { width: 79, height: 24 })
        ));
        assert!(check_terminal_size(80, 23).is_err());
    }

    #[test]
    fn first_step_samples_and_renders() {
        let mut app = app(MockHost::typical_system());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut events = ScriptedEvents::default();

        app.step(&mut terminal, &mut events, Instant::now()).unwrap();

        assert!(app.snapshot().is_some());
        assert!(!app.layout().is_dirty());
        let text = screen(&terminal);
        assert!(text.contains("CPU Statistics"));
        assert!(text.contains("Memory Statistics"));
        assert!(text.contains("Disk Usage"));
        assert!(text.contains("Network Statistics"));
        assert!(text.contains("Usage: 0.0%"));
        assert!(text.contains("eth0:"));
        assert!(!text.contains("lo:"));
    }

    #[test]
    fn samples_only_when_interval_elapsed() {
        let mut host = MockHost::typical_system();
        host.set_cpu(100, 0, 100, 800, 0);
        let mut app = app(host);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut events = ScriptedEvents::default();
        let t0 = Instant::now();

        app.step(&mut terminal, &mut events, t0).unwrap();
        app.collector.host_mut().set_cpu(150, 0, 150, 900, 0);

        // not due yet
        app.step(&mut terminal, &mut events, t0 + Duration::from_millis(500)).unwrap();
        assert_eq!(app.snapshot().unwrap().cpu.usage_percent, 0.0);

        app.step(&mut terminal, &mut events, t0 + Duration::from_secs(1)).unwrap();
        assert!((app.snapshot().unwrap().cpu.usage_percent - 50.0).abs() < 1e-9);
        assert!(screen(&terminal).contains("Usage: 50.0%"));
    }

    #[test]
    fn quit_keys_stop_the_loop() {
        for c in ['q', 'Q'] {
            let mut app = app(MockHost::typical_system());
            let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
            let mut events = ScriptedEvents::default();
            events.push(key(c));

            app.step(&mut terminal, &mut events, Instant::now()).unwrap();
            assert!(!app.is_running());
        }

        let mut app = app(MockHost::typical_system());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut events = ScriptedEvents::default();
        events.push(Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        app.step(&mut terminal, &mut events, Instant::now()).unwrap();
        assert!(!app.is_running());
    }

    #[test]
    fn other_keys_keep_running() {
        let mut app = app(MockHost::typical_system());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut events = ScriptedEvents::default();
        events.push(key('x'));

        app.step(&mut terminal, &mut events, Instant::now()).unwrap();
        assert!(app.is_running());
    }

    #[test]
    fn resize_recomputes_before_next_draw() {
        let mut app = app(MockHost::typical_system());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut events = ScriptedEvents::default();
        let t0 = Instant::now();

        app.step(&mut terminal, &mut events, t0).unwrap();
        let before = app.layout().surface_ids();
        let sampled_at = app.snapshot().unwrap().timestamp;

        terminal.backend_mut().resize(120, 40);
        events.push(Event::Resize(120, 40));
        app.step(&mut terminal, &mut events, t0).unwrap();
        assert!(app.layout().is_dirty());

        // next iteration rebuilds geometry and forces a cycle, though not due
        app.step(&mut terminal, &mut events, t0 + Duration::from_millis(100)).unwrap();
        assert!(!app.layout().is_dirty());
        let after = app.layout().surface_ids();
        assert!(before.iter().all(|id| !after.contains(id)));
        assert_eq!(
            app.layout().geometry(QuadrantId::Network),
            Some(quadrant_rect(QuadrantId::Network, 120, 40))
        );
        assert!(app.snapshot().unwrap().timestamp >= sampled_at);
        assert!(screen(&terminal).contains("Network Statistics"));
    }

    #[test]
    fn external_stop_flag_ends_run_loop() {
        let running = Arc::new(AtomicBool::new(false));
        let mut app = App::new(
            Collector::new(MockHost::typical_system(), "/proc"),
            Duration::from_secs(1),
            running,
        )
        .unwrap();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        app.run_loop(&mut terminal, &mut ScriptedEvents::default())
            .unwrap();
        assert!(app.snapshot().is_none());
        assert_eq!(app.layout().surface_ids().len(), 4);
    }

    #[test]
    fn unavailable_sources_render_placeholders() {
        let mut app = app(MockHost::unavailable());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        app.step(&mut terminal, &mut ScriptedEvents::default(), Instant::now())
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("CPU information unavailable"));
        assert!(text.contains("Memory information unavailable"));
        assert!(text.contains("No disk information available"));
        assert!(text.contains("No network interfaces found"));
    }
}
