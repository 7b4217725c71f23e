//! Interactive terminal front end built on crossterm.

use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use tower_of_go_core::{Command, Direction};
use tower_of_go_rendering::{Color, RenderingBackend, Screen};
use tower_of_go_system_reducers::apply;
use tower_of_go_world::{query, GameState};
use tracing::{debug, warn};

/// Player intent decoded from a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Input {
    Command(Command),
    Quit,
}

/// Runs the interactive loop until the player quits.
///
/// The terminal is restored even when the loop fails.
pub(crate) fn run(state: GameState, frame: Duration) -> Result<()> {
    let mut backend = CrosstermBackend::new(io::stdout());
    backend.enter().context("failed to prepare the terminal")?;

    let result = run_loop(&mut backend, state, frame);

    backend.leave().context("failed to restore the terminal")?;
    result
}

fn run_loop<B>(backend: &mut B, mut state: GameState, frame: Duration) -> Result<()>
where
    B: RenderingBackend,
{
    let (rows, columns) = query::dimensions(&state);
    let mut screen = Screen::for_field(rows, columns);
    let mut last_tick = Instant::now();

    loop {
        let input = if event::poll(frame)? {
            translate_event(&event::read()?)
        } else {
            None
        };

        match input {
            Some(Input::Quit) => return Ok(()),
            Some(Input::Command(command)) => state = step(state, command),
            None => {}
        }

        let now = Instant::now();
        let delta = now.duration_since(last_tick);
        last_tick = now;
        state = step(state, Command::AdvanceTime { delta });

        screen.render(&state)?;
        backend.present(&screen)?;
    }
}

fn step(state: GameState, command: Command) -> GameState {
    match apply(state, command) {
        Ok(reduction) => {
            if reduction.changed && !matches!(command, Command::AdvanceTime { .. }) {
                debug!(?command, "input applied");
            }
            reduction.state
        }
        Err(error) => {
            warn!(?command, %error, "reducer failed; keeping previous state");
            error.into_state()
        }
    }
}

fn translate_event(event: &Event) -> Option<Input> {
    match event {
        Event::Key(key) => translate_key(key),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<Input> {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'q') => Some(Input::Quit),
            _ => None,
        };
    }

    let walk = |direction| Some(Input::Command(Command::WalkHero { direction }));
    match key.code {
        KeyCode::Esc => Some(Input::Quit),
        KeyCode::Char('s') => Some(Input::Command(Command::StartOrRestartGame)),
        KeyCode::Up | KeyCode::Char('k') => walk(Direction::Up),
        KeyCode::Right | KeyCode::Char('l') => walk(Direction::Right),
        KeyCode::Down | KeyCode::Char('j') => walk(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => walk(Direction::Left),
        _ => None,
    }
}

/// Presents screens on a crossterm-controlled terminal.
struct CrosstermBackend<W: Write> {
    out: W,
}

impl<W: Write> CrosstermBackend<W> {
    fn new(out: W) -> Self {
        Self { out }
    }

    /// Switches to raw mode and the alternate screen.
    ///
    /// Raw mode is switched off again when preparing the screen fails.
    fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        let prepared = self.prepare_screen();
        if prepared.is_err() {
            terminal::disable_raw_mode()?;
        }
        prepared
    }

    fn prepare_screen(&mut self) -> Result<()> {
        let _ = self.out.execute(EnterAlternateScreen)?;
        let _ = self.out.execute(Hide)?;
        let _ = self.out.execute(Clear(ClearType::All))?;
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        let _ = self.out.execute(ResetColor)?;
        let _ = self.out.execute(Show)?;
        let _ = self.out.execute(LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl<W: Write> RenderingBackend for CrosstermBackend<W> {
    fn present(&mut self, screen: &Screen) -> Result<()> {
        for (y, line) in screen.lines().enumerate() {
            let row = u16::try_from(y)?;
            queue!(self.out, MoveTo(0, row))?;
            let mut current = None;
            for element in line {
                let colors = (element.foreground, element.background);
                if current != Some(colors) {
                    queue!(
                        self.out,
                        SetForegroundColor(terminal_color(element.foreground)),
                        SetBackgroundColor(terminal_color(element.background)),
                    )?;
                    current = Some(colors);
                }
                queue!(self.out, Print(element.symbol))?;
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}

fn terminal_color(color: Color) -> style::Color {
    match color {
        Color::Black => style::Color::Black,
        Color::White => style::Color::White,
        Color::Yellow => style::Color::Yellow,
        Color::Green => style::Color::Green,
        Color::Magenta => style::Color::Magenta,
        Color::Cyan => style::Color::Cyan,
    }
}
