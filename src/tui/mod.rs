//! Ratatui-based terminal UI.
//!
//! The canvas takes the mouse: left-drag moves a point, right-click adds or
//! deletes one, dragging empty space pans and the wheel zooms. A collapsible
//! panel lists the settings and the fitted equation.

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::scene::Scene;
use crate::app::session::Session;
use crate::cli::TuiArgs;
use crate::domain::{COEFFICIENT_PRECISION, ScreenSize, Setting};
use crate::error::AppError;
use crate::report::format_equation_lines;
use crate::view::{PointerButton, PointerOutcome};

mod canvas_chart;

use canvas_chart::{CELL_HEIGHT, CELL_WIDTH, CanvasChart, cell_to_screen};

/// Screen units of camera travel per h/j/k/l press.
const KEY_PAN: f64 = 8.0 * CELL_WIDTH;
/// Wheel delta applied per +/- press.
const KEY_ZOOM: f64 = 100.0;
/// Wheel delta per mouse scroll notch.
const SCROLL_ZOOM: f64 = 100.0;
const SETTINGS_WIDTH: u16 = 34;

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let tick = Duration::from_millis(args.tick_ms.max(1));
    let session = Session::new(
        args.session.settings(),
        args.session.initial_points()?,
        args.camera_follow,
    )?
    .with_scatter(args.session.scatter());

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(session);
    app.event_loop(&mut terminal, tick)
}

/// Ensures the terminal is restored (raw mode, alternate screen, mouse) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

struct App {
    session: Session,
    settings_open: bool,
    selected: usize,
    status: String,
    /// Canvas area from the last draw, used to map mouse cells.
    canvas: Rect,
}

impl App {
    fn new(session: Session) -> Self {
        Self {
            session,
            settings_open: false,
            selected: Setting::ALL.len() - 1,
            status: "right-click adds a point".to_string(),
            canvas: Rect::default(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        tick: Duration,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        let mut next_tick = Instant::now() + tick;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            let timeout = next_tick.saturating_duration_since(Instant::now());
            if event::poll(timeout).map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key.code)? {
                            break;
                        }
                        needs_redraw = true;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        needs_redraw = true;
                    }
                    Event::Resize(_, _) => {
                        needs_redraw = true;
                    }
                    _ => {}
                }
            }

            if Instant::now() >= next_tick {
                next_tick += tick;
                // Don't replay missed frames after a stall.
                if next_tick < Instant::now() {
                    next_tick = Instant::now() + tick;
                }
                needs_redraw |= self.session.tick();
            }
        }
        info!("quit");
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Char('e') => self.settings_open = !self.settings_open,
            KeyCode::Char('h') => self.session.pan(ScreenSize::new(KEY_PAN, 0.0)),
            KeyCode::Char('l') => self.session.pan(ScreenSize::new(-KEY_PAN, 0.0)),
            KeyCode::Char('k') => self.session.pan(ScreenSize::new(0.0, KEY_PAN)),
            KeyCode::Char('j') => self.session.pan(ScreenSize::new(0.0, -KEY_PAN)),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.session.zoom_center(-KEY_ZOOM);
            }
            KeyCode::Char('-') => {
                self.session.zoom_center(KEY_ZOOM);
            }
            KeyCode::Char('x') => {
                self.session.reset()?;
                self.status = "reset view and settings".to_string();
            }
            KeyCode::Char('c') => {
                self.session.clear();
                self.status = "cleared points".to_string();
            }
            KeyCode::Char('g') => match self.session.generate() {
                Ok(n) => self.status = format!("generated {n} points"),
                Err(err) => self.status = err.to_string(),
            },
            KeyCode::Up if self.settings_open => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down if self.settings_open => {
                self.selected = (self.selected + 1).min(Setting::ALL.len() - 1);
            }
            KeyCode::Left if self.settings_open => self.adjust(-1),
            KeyCode::Right if self.settings_open => self.adjust(1),
            _ => {}
        }
        Ok(false)
    }

    fn adjust(&mut self, steps: i32) {
        let setting = Setting::ALL[self.selected];
        match self.session.adjust(setting, steps) {
            Ok(()) => {
                let value = self.session.settings().get(setting);
                self.status = format!("{}: {}", setting.label(), setting.format_value(value));
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(screen) = cell_to_screen(self.canvas, mouse.column, mouse.row) else {
            self.session.pointer_up();
            return;
        };

        let outcome = match mouse.kind {
            MouseEventKind::Down(button) => {
                let button = match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Right => PointerButton::Secondary,
                    MouseButton::Middle => PointerButton::Middle,
                };
                self.session.pointer_down(button, screen)
            }
            MouseEventKind::Drag(_) | MouseEventKind::Moved => self.session.pointer_move(screen),
            MouseEventKind::Up(_) => {
                self.session.pointer_up();
                PointerOutcome::None
            }
            MouseEventKind::ScrollUp => {
                self.session.wheel(screen, -SCROLL_ZOOM);
                PointerOutcome::None
            }
            MouseEventKind::ScrollDown => {
                self.session.wheel(screen, SCROLL_ZOOM);
                PointerOutcome::None
            }
            _ => PointerOutcome::None,
        };

        match outcome {
            PointerOutcome::Added(id) => self.status = format!("added point #{}", id.get()),
            PointerOutcome::Removed(id) => self.status = format!("removed point #{}", id.get()),
            PointerOutcome::DragStarted(id) => self.status = format!("dragging point #{}", id.get()),
            _ => {}
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let camera = self.session.camera();
        let engine = self.session.engine();

        let mut spans = vec![
            Span::styled("poly", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!(
                    " | points: {} | order: {} | zoom: {:.2} | camera: ({:.0}, {:.0})",
                    self.session.points().len(),
                    engine.order(),
                    camera.zoom(),
                    camera.x(),
                    camera.y(),
                ),
                Style::default().fg(Color::Gray),
            ),
        ];
        if engine.is_degenerate() && !self.session.points().is_empty() {
            spans.push(Span::styled(
                " | underdetermined",
                Style::default().fg(Color::Yellow),
            ));
        }

        let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let (canvas_area, settings_area) = if self.settings_open && area.width > SETTINGS_WIDTH + 20 {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(SETTINGS_WIDTH)])
                .split(area);
            (chunks[0], Some(chunks[1]))
        } else {
            (area, None)
        };

        self.draw_canvas(frame, canvas_area);
        if let Some(settings_area) = settings_area {
            self.draw_settings(frame, settings_area);
        }
    }

    fn draw_canvas(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Canvas").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        self.canvas = inner;
        self.session.set_viewport(ScreenSize::new(
            inner.width as f64 * CELL_WIDTH,
            inner.height as f64 * CELL_HEIGHT,
        ));

        let scene = Scene::from_session(&self.session);
        frame.render_widget(CanvasChart { scene: &scene }, inner);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Setting::ALL.len() as u16 + 2),
                Constraint::Min(0),
            ])
            .split(area);

        let settings = self.session.settings();
        let items: Vec<ListItem> = Setting::ALL
            .iter()
            .map(|&s| {
                ListItem::new(format!(
                    "{:<14}{:>10}",
                    s.label(),
                    s.format_value(settings.get(s))
                ))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let equation: Vec<Line> = format_equation_lines(
            self.session.engine().target_coefficients(),
            COEFFICIENT_PRECISION,
        )
        .into_iter()
        .map(Line::from)
        .collect();
        let p = Paragraph::new(Text::from(equation))
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(Block::default().title("Equation").borders(Borders::ALL));
        frame.render_widget(p, chunks[1]);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = if self.settings_open {
            "↑/↓ select  ←/→ adjust  e close  x reset  c clear  g random  q quit"
        } else {
            "h/j/k/l pan  +/- zoom  e settings  x reset  c clear  g random  q quit"
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
