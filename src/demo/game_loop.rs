//! Terminal game loop.
//!
//! Ticks the manager on a fixed interval and forwards stdin lines as start
//! signals and command picks. Input never blocks the ticks: the input phase
//! just idles until three picks have arrived.

use std::io::BufRead;
use std::time::Duration;

use log::{debug, info};
use tokio::sync::mpsc;

use crate::config::GameConfig;
use crate::demo::render::{TileSurface, describe_event, draw_board, status_line};
use crate::error::GameResult;
use crate::game::{GameEvent, GameManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInput {
    Start,
    /// 0-based index into the offered commands.
    Select(usize),
    Quit,
}

/// Empty line or "start" dismisses the title, "1".."9" picks an offered command.
pub fn parse_input(line: &str) -> Option<UserInput> {
    match line.trim() {
        "" | "s" | "start" => Some(UserInput::Start),
        "q" | "quit" => Some(UserInput::Quit),
        other => other
            .parse::<usize>()
            .ok()
            .filter(|&n| n > 0)
            .map(|n| UserInput::Select(n - 1)),
    }
}

/// Forward parsed lines until the player quits, input ends or the loop hangs up.
///
/// Runs on its own thread: a blocked stdin read there never holds up runtime
/// shutdown.
pub fn forward_input(reader: impl BufRead, tx: &mpsc::Sender<UserInput>) {
    for line in reader.lines() {
        let Ok(line) = line else {
            break;
        };
        let Some(input) = parse_input(&line) else {
            continue;
        };
        let quit = input == UserInput::Quit;
        if tx.blocking_send(input).is_err() || quit {
            break;
        }
    }
    debug!("[Demo] Input reader stopped");
}

/// Run the game until the player quits or stdin closes.
pub async fn run_game_loop(config: GameConfig, seed: Option<u64>) -> GameResult<()> {
    let period = Duration::from_millis(config.tick_period_ms);
    let mut manager = match seed {
        Some(seed) => GameManager::with_seed(config, seed)?,
        None => GameManager::new(config)?,
    };
    info!("[Demo] Session {} started", manager.session_id());

    let (tx, mut rx) = mpsc::channel(16);
    std::thread::spawn(move || forward_input(std::io::stdin().lock(), &tx));

    let mut interval = tokio::time::interval(period);
    let mut surface: Option<TileSurface> = None;
    println!("ROBOT RACING - press Enter to start, q to quit");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let report = manager.tick()?;
                for event in manager.drain_events() {
                    if let GameEvent::MapLoaded { rows, columns, .. } = event {
                        surface = Some(TileSurface::new(rows, columns));
                    }
                    if let Some(line) = describe_event(&event) {
                        println!("{line}");
                    }
                }
                if report.result.is_some() || report.state_finished {
                    if let (Some(surface), Some(board)) = (surface.as_mut(), manager.board()) {
                        draw_board(surface, board, manager.player())?;
                        println!("{}\n{}\n", surface.to_text(), status_line(manager.player(), manager.maps_completed()));
                    }
                }
            }
            input = rx.recv() => match input {
                Some(UserInput::Start) => {
                    manager.start();
                }
                Some(UserInput::Select(index)) => {
                    if let Err(e) = manager.select_command(index) {
                        println!("{e}");
                    }
                }
                Some(UserInput::Quit) | None => break,
            }
        }
    }

    info!("[Demo] Session {} ended after {} ticks", manager.session_id(), manager.ticks());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_lines_map_to_actions() {
        assert_eq!(parse_input(""), Some(UserInput::Start));
        assert_eq!(parse_input(" 3 "), Some(UserInput::Select(2)));
        assert_eq!(parse_input("q"), Some(UserInput::Quit));
        assert_eq!(parse_input("0"), None);
        assert_eq!(parse_input("left"), None);
    }

    #[test]
    fn reader_stops_at_quit() {
        let (tx, mut rx) = mpsc::channel(8);
        forward_input(std::io::Cursor::new("\nnope\n2\nq\n1\n"), &tx);
        assert_eq!(rx.try_recv(), Ok(UserInput::Start));
        assert_eq!(rx.try_recv(), Ok(UserInput::Select(1)));
        assert_eq!(rx.try_recv(), Ok(UserInput::Quit));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn reader_stops_when_the_loop_hangs_up() {
        let (tx, rx) = mpsc::channel(8);
        drop(rx);
        forward_input(std::io::Cursor::new("1\n2\n3\n"), &tx);
        assert!(tx.is_closed());
    }
}
