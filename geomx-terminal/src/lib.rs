//! Terminal host for the geometry explorer

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use geomx_core::backend::{Container, FrameScheduler};
use geomx_core::{
    Catalog, Explorer, KeyValueStore, Result as ViewerResult, ViewAction, ViewerConfig, ViewerError,
};
use std::cell::Cell;
use std::io::{self, stdout, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

pub mod renderer;
pub mod store;

pub use renderer::AsciiRenderer;
pub use store::FileStore;

/// Columns reserved on the left for the shape list
pub const SIDEBAR_WIDTH: u16 = 20;
/// Rows reserved at the top for the status line
const STATUS_ROWS: u16 = 1;
/// Fallback drawing area: a single character cell
pub const MIN_DRAWING_AREA: (u32, u32) = (1, 2);

/// Area right of the sidebar and below the status line, in half-height "pixels"
pub fn drawing_area(cols: u16, rows: u16) -> (f64, f64) {
    (
        cols.saturating_sub(SIDEBAR_WIDTH) as f64,
        rows.saturating_sub(STATUS_ROWS) as f64 * 2.0,
    )
}

/// The terminal area right of the sidebar, measured in half-height "pixels"
#[derive(Default)]
pub struct TerminalContainer {
    attached: Cell<bool>,
}

impl Container for TerminalContainer {
    type Surface = ();

    fn size(&self) -> (f64, f64) {
        match terminal::size() {
            Ok((cols, rows)) => drawing_area(cols, rows),
            Err(err) => {
                log::debug!("terminal size unavailable: {}", err);
                (0.0, 0.0)
            }
        }
    }

    fn attach(&self, _surface: &()) -> ViewerResult<()> {
        self.attached.set(true);
        Ok(())
    }

    fn detach(&self, _surface: &()) -> ViewerResult<()> {
        self.attached.set(false);
        Ok(())
    }

    fn contains(&self, _surface: &()) -> bool {
        self.attached.get()
    }
}

/// Frame requests become a flag the main loop consumes at the next tick
#[derive(Clone, Default)]
pub struct TickScheduler {
    due: Rc<Cell<Option<u64>>>,
    issued: u64,
}

impl TickScheduler {
    /// Take the pending frame, if any
    pub fn take_due(&self) -> Option<u64> {
        self.due.take()
    }
}

impl FrameScheduler for TickScheduler {
    type Token = u64;

    fn request_frame(&mut self) -> ViewerResult<u64> {
        self.issued += 1;
        self.due.set(Some(self.issued));
        Ok(self.issued)
    }

    fn cancel_frame(&mut self, token: u64) {
        if self.due.get() == Some(token) {
            self.due.set(None);
        }
    }
}

pub type TerminalExplorer = Explorer<AsciiRenderer, TerminalContainer, TickScheduler>;

fn to_io(err: ViewerError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    explorer: TerminalExplorer,
    ticks: TickScheduler,
    frame_time: Duration,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: ViewerConfig, store: Box<dyn KeyValueStore>, target_fps: u32) -> Self {
        // a pixel-sized fallback would flood a tiny terminal with cells
        let config = ViewerConfig {
            fallback_size: MIN_DRAWING_AREA,
            ..config
        };
        let ticks = TickScheduler::default();
        Self {
            explorer: Explorer::new(config, store, ticks.clone()),
            ticks,
            frame_time: Duration::from_millis(1000 / u64::from(target_fps.clamp(1, 120))),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn explorer(&self) -> &TerminalExplorer {
        &self.explorer
    }

    pub fn dispatch(&mut self, action: ViewAction) {
        self.explorer.dispatch(action);
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self
            .explorer
            .mount(TerminalContainer::default(), |_| Ok(AsciiRenderer::new()))
            .map_err(to_io)
            .and_then(|()| self.main_loop());
        self.explorer.unmount();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?)?;
            }

            // Update and render
            if self.ticks.take_due().is_some() && self.explorer.frame() {
                self.present()?;
                self.frame_count += 1;
            }

            // Frame timing
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                if let Some(action) = self.action_for(code) {
                    self.explorer.dispatch(action);
                }
            }
            Event::Resize(_, _) => {
                execute!(stdout(), Clear(ClearType::All))?;
                self.explorer.handle_resize();
            }
            _ => {}
        }
        Ok(())
    }

    fn action_for(&mut self, code: KeyCode) -> Option<ViewAction> {
        let selected = Catalog::position(self.explorer.view().selected_shape).unwrap_or(0);
        let select = |index: usize| {
            Catalog::iter()
                .nth(index)
                .map(|shape| ViewAction::SelectShape(shape.id.to_string()))
        };

        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
                None
            }
            KeyCode::Char('w') => Some(ViewAction::ToggleWireframe),
            KeyCode::Char(' ') | KeyCode::Char('r') => Some(ViewAction::ToggleAutoRotate),
            KeyCode::Up => select((selected + Catalog::len() - 1) % Catalog::len()),
            KeyCode::Down => select((selected + 1) % Catalog::len()),
            KeyCode::Char(c) => c
                .to_digit(10)
                .and_then(|digit| (digit as usize).checked_sub(1))
                .and_then(select),
            _ => None,
        }
    }

    fn present(&self) -> io::Result<()> {
        let mut stdout = stdout();
        let view = self.explorer.view();

        if let Some(renderer) = self.explorer.scene().renderer() {
            renderer.draw(&mut stdout, SIDEBAR_WIDTH, STATUS_ROWS)?;
        }

        // Sidebar
        for (index, shape) in Catalog::iter().enumerate() {
            let active = shape.id == view.selected_shape;
            let (r, g, b) = shape.color().to_rgb8();
            queue!(
                stdout,
                cursor::MoveTo(0, STATUS_ROWS + 1 + index as u16),
                SetForegroundColor(TermColor::Rgb { r, g, b }),
                SetAttribute(if active { Attribute::Reverse } else { Attribute::Reset }),
                Print(format!(
                    "{} {:<w$}",
                    index + 1,
                    shape.display_name,
                    w = SIDEBAR_WIDTH as usize - 3
                )),
                SetAttribute(Attribute::Reset),
            )?;
        }

        // Status overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(TermColor::Yellow),
            Print(format!(
                "Geometry Explorer | FPS: {:.1} | [r] rotate: {} | [w] wireframe: {} | 1-8/↑↓ shape | q quit",
                self.fps,
                if view.auto_rotate { "on " } else { "off" },
                if view.wireframe { "on " } else { "off" },
            )),
            ResetColor
        )?;

        stdout.flush()
    }
}
