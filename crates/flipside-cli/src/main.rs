//! Flipside terminal game.

use flipside_core::Game;
use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod console;
mod controller;

use config::Config;
use console::{ConsoleView, Terminal};
use controller::{Command, Reply};

fn main() -> anyhow::Result<()> {
    // Initialize tracing on stderr so stdout stays the table
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env()?;
    info!(
        players = config.seats.len(),
        seed = ?config.seed,
        json = config.json,
        "Starting Flipside..."
    );

    let count = config.seats.len();
    let mut game = match config.seed {
        Some(seed) => Game::with_seed(count, config.names(), config.ai_flags(), seed)?,
        None => Game::new(count, config.names(), config.ai_flags())?,
    };
    game.register_observer(Box::new(ConsoleView::new(config.json, io::stdout())));

    // JSON mode keeps stdout for events only
    let chat: Box<dyn Write> = if config.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    let mut terminal = Terminal::new(io::stdin().lock(), chat);

    run(&mut game, &mut terminal)
}

/// Main loop: AI seats act on their own, humans type commands
fn run<R: BufRead, W: Write>(
    game: &mut Game,
    terminal: &mut Terminal<R, W>,
) -> anyhow::Result<()> {
    while !game.is_finished() {
        if game.current_player().is_ai {
            let action = game.run_ai_turn()?;
            debug!(?action, "ai acted");
            continue;
        }

        let Some(line) = terminal.read_command()? else {
            info!("input closed");
            return Ok(());
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                terminal.say(e)?;
                continue;
            }
        };

        match controller::handle(game, command, &mut *terminal) {
            Ok(Reply::Applied(_)) => {}
            Ok(Reply::Info(message)) => terminal.say(message)?,
            Ok(Reply::Quit) => return Ok(()),
            Err(e) => {
                warn!(%e, "command rejected");
                terminal.say(e)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipside_core::GameEvent;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    /// Stands in for stdout, readable after the observer is boxed away
    #[derive(Clone, Default)]
    struct SharedOut(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedOut {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedOut {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn humans() -> Game {
        Game::with_seed(2, vec!["Ann".into(), "Bea".into()], vec![false, false], 1).unwrap()
    }

    #[test]
    fn test_json_mode_keeps_events_apart_from_chat() {
        let events = SharedOut::default();
        let mut game = humans();
        game.register_observer(Box::new(ConsoleView::new(true, events.clone())));

        let mut chat = Vec::new();
        let input = Cursor::new("draw\nnext\nplay 99\nbogus\n\n");
        run(&mut game, &mut Terminal::new(input, &mut chat)).unwrap();

        // Registration, draw and next each produce one update
        let parsed: Vec<GameEvent> = events
            .text()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed.len(), 3);

        let chat = String::from_utf8(chat).unwrap();
        assert!(chat.contains("> "));
        assert!(chat.contains("Invalid card."));
        assert!(chat.contains("Unknown command: bogus"));
    }

    #[test]
    fn test_rejected_command_goes_to_chat() {
        let events = SharedOut::default();
        let mut game = humans();
        game.register_observer(Box::new(ConsoleView::new(false, events.clone())));

        let mut chat = Vec::new();
        run(&mut game, &mut Terminal::new(Cursor::new("next\nquit\n"), &mut chat)).unwrap();

        let chat = String::from_utf8(chat).unwrap();
        assert!(chat.contains("You must perform an action first."));
        assert!(!events.text().contains("You must perform an action first."));
        assert_eq!(game.current_player_id(), 0);
    }
}
