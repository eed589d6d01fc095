//! Terminal rendering and input.
//!
//! Engine events go to one stream and everything conversational (prompts,
//! errors, help) to another, so JSON mode can keep stdout machine-readable.

use crate::controller::ColorPrompt;
use flipside_core::{Color, GameEvent, GameSnapshot, Observer};
use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Prints every engine notification to `out`
pub struct ConsoleView<W> {
    json: bool,
    out: W,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(json: bool, out: W) -> Self {
        Self { json, out }
    }

    fn write_event(&mut self, event: &GameEvent) -> io::Result<()> {
        if self.json {
            let line = serde_json::to_string(event)?;
            writeln!(self.out, "{line}")?;
        } else {
            match event {
                GameEvent::Update(snapshot) => writeln!(self.out, "{}", render(snapshot))?,
                GameEvent::GameOver { message } => writeln!(self.out, "*** {message} ***")?,
            }
        }
        self.out.flush()
    }
}

impl<W: Write + Send> Observer for ConsoleView<W> {
    fn notify(&mut self, event: &GameEvent) {
        if let Err(e) = self.write_event(event) {
            tracing::error!("failed to write event: {}", e);
        }
    }
}

/// Text view of a snapshot
pub fn render(snapshot: &GameSnapshot) -> String {
    let side = if snapshot.is_dark { "dark" } else { "light" };
    let mut out = format!(
        "\n--- {} ({} side) ---\nTop: {}\n",
        snapshot.current_player, side, snapshot.top_text
    );

    if snapshot.current_is_ai {
        out.push_str(&format!("Hand: {} cards\n", snapshot.hand.len()));
    } else {
        for (i, card) in snapshot.hand.iter().enumerate() {
            out.push_str(&format!("  [{i}] {}\n", card.face(snapshot.is_dark)));
        }
    }

    out.push_str(&snapshot.info);
    out
}

/// Player input plus the stream prompts and messages are written to
pub struct Terminal<R, W> {
    input: R,
    chat: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, chat: W) -> Self {
        Self { input, chat }
    }

    pub fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.chat, "{message}")
    }

    /// Prompt for a command line. `None` once input is closed.
    pub fn read_command(&mut self) -> io::Result<Option<String>> {
        write!(self.chat, "> ")?;
        self.chat.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

impl<R: BufRead, W: Write> ColorPrompt for Terminal<R, W> {
    fn choose_color(&mut self, dark: bool) -> Option<Color> {
        let palette = Color::palette(dark);
        let names: Vec<String> = palette.iter().map(|c| c.to_string()).collect();
        write!(self.chat, "Choose a color ({}), blank to cancel: ", names.join("/")).ok()?;
        self.chat.flush().ok()?;

        let mut line = String::new();
        self.input.read_line(&mut line).ok()?;
        Color::from_name(&line).filter(|c| palette.contains(c))
    }
}
