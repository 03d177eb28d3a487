#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Terminal rendering backend for Boulder Push built on crossterm.
//!
//! The backend switches the terminal into raw mode on an alternate screen,
//! ticks at a fixed rate, consumes at most one queued input per tick and
//! redraws the scene whenever it changes.

mod input;

use std::{
    io::{self, Stdout, Write},
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use boulder_push_core::PlayerInput;
use boulder_push_rendering::{
    Color, FrameControl, FrameInput, Presentation, RenderingBackend, Scene,
};
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};

pub use input::{decode_input, pump, spawn_input_pump};

/// Default interval between two game loop ticks.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Rendering backend that draws scenes into the controlling terminal.
#[derive(Debug)]
pub struct TerminalBackend {
    tick: Duration,
    inputs: Receiver<PlayerInput>,
}

impl TerminalBackend {
    /// Creates a backend that polls `inputs` once per `tick`.
    #[must_use]
    pub fn new(tick: Duration, inputs: Receiver<PlayerInput>) -> Self {
        Self { tick, inputs }
    }

    fn next_input(&self) -> Option<PlayerInput> {
        match self.inputs.try_recv() {
            Ok(input) => Some(input),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                tracing::warn!("input pump disconnected");
                Some(PlayerInput::Quit)
            }
        }
    }
}

impl RenderingBackend for TerminalBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> FrameControl,
    {
        let mut session = TerminalSession::enter(io::stdout(), &presentation.title)?;
        let mut scene = presentation.scene;
        render_frame(&mut session.writer, &scene).context("failed to draw frame")?;

        let mut last_tick = Instant::now();
        loop {
            thread::sleep(self.tick);
            let now = Instant::now();
            let frame = FrameInput {
                dt: now.duration_since(last_tick),
                input: self.next_input(),
            };
            last_tick = now;

            let previous = scene.clone();
            let control = update_scene(frame, &mut scene);
            if scene != previous {
                render_frame(&mut session.writer, &scene).context("failed to draw frame")?;
            }

            if control == FrameControl::Exit {
                break;
            }
        }

        session.leave()
    }
}

/// Terminal in raw mode on the alternate screen.
///
/// Dropping the session restores the terminal, so early returns and panics
/// leave the shell usable.
struct TerminalSession {
    writer: Stdout,
    restored: bool,
}

impl TerminalSession {
    fn enter(mut writer: Stdout, title: &str) -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw terminal mode")?;
        let session_started = execute!(
            writer,
            EnterAlternateScreen,
            Hide,
            SetTitle(title),
            Clear(ClearType::All)
        );
        let session = Self {
            writer,
            restored: false,
        };
        session_started.context("failed to prepare the terminal")?;
        Ok(session)
    }

    fn leave(mut self) -> Result<()> {
        self.restored = true;
        restore(&mut self.writer).context("failed to restore the terminal")
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if !self.restored {
            if let Err(error) = restore(&mut self.writer) {
                tracing::warn!(%error, "failed to restore the terminal");
            }
        }
    }
}

fn restore<W>(writer: &mut W) -> io::Result<()>
where
    W: Write,
{
    execute!(writer, ResetColor, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()
}

/// Writes one complete frame for `scene` into `writer`.
///
/// Runs of glyphs sharing a color are printed together.
pub fn render_frame<W>(writer: &mut W, scene: &Scene) -> io::Result<()>
where
    W: Write,
{
    queue!(writer, Clear(ClearType::All))?;

    let mut line = 0_u16;
    for row in &scene.cells {
        queue!(writer, MoveTo(0, line))?;
        let mut run = String::new();
        let mut run_color = None;
        for glyph in row {
            let color = glyph.color();
            if run_color != Some(color) && !run.is_empty() {
                print_run(writer, run_color, &run)?;
                run.clear();
            }
            run_color = Some(color);
            run.push(glyph.symbol());
        }
        print_run(writer, run_color, &run)?;
        line = line.saturating_add(1);
    }

    queue!(writer, ResetColor)?;
    for text in &scene.hud {
        queue!(writer, MoveTo(0, line), Print(text))?;
        line = line.saturating_add(1);
    }

    writer.flush()
}

fn print_run<W>(writer: &mut W, color: Option<Color>, run: &str) -> io::Result<()>
where
    W: Write,
{
    let Some(color) = color else {
        return Ok(());
    };
    queue!(writer, SetForegroundColor(to_terminal_color(color)), Print(run))
}

fn to_terminal_color(color: Color) -> crossterm::style::Color {
    crossterm::style::Color::Rgb {
        r: color.red,
        g: color.green,
        b: color.blue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boulder_push_rendering::Glyph;

    #[test]
    fn frame_contains_rows_and_hud() {
        let scene = Scene {
            cells: vec![
                vec![Glyph::Wall; 5],
                vec![
                    Glyph::Wall,
                    Glyph::Player,
                    Glyph::Boulder,
                    Glyph::Target,
                    Glyph::Wall,
                ],
                vec![Glyph::Wall; 5],
            ],
            hud: vec!["Level 1/1".to_owned()],
        };
        let mut output = Vec::new();

        render_frame(&mut output, &scene).expect("writing into memory succeeds");

        let text = String::from_utf8(output).expect("frame is utf-8");
        assert!(text.contains("XXXXX"));
        assert!(text.contains('@'));
        assert!(text.contains('*'));
        assert!(text.contains("Level 1/1"));
    }

    #[test]
    fn disconnected_pump_reads_as_quit() {
        let (sender, receiver) = crossbeam_channel::unbounded();
        drop(sender);
        let backend = TerminalBackend::new(DEFAULT_TICK, receiver);

        assert_eq!(backend.next_input(), Some(PlayerInput::Quit));
    }

    #[test]
    fn one_input_is_consumed_per_poll() {
        let (sender, receiver) = crossbeam_channel::unbounded();
        sender.send(PlayerInput::Undo).expect("receiver alive");
        sender.send(PlayerInput::Quit).expect("receiver alive");
        let backend = TerminalBackend::new(DEFAULT_TICK, receiver);

        assert_eq!(backend.next_input(), Some(PlayerInput::Undo));
        assert_eq!(backend.next_input(), Some(PlayerInput::Quit));
        assert_eq!(backend.next_input(), None);
    }
}
