//! Line-based command input
//!
//! Each stdin line is one command: a short word (`next`, `jump 3`, ...) or
//! the JSON form of [`SlideshowCommand`] as a host UI would send it.

use crate::error::{CliError, Result};
use keepsake_slideshow::SlideshowCommand;
use std::io::BufRead;
use tokio::sync::mpsc;
use tracing::warn;

pub const HELP: &str = "\
Commands:
  space | toggle        play/pause the slideshow
  n | next              next slide
  p | prev              previous slide
  jump <N>              go to slide N (1-based)
  music <uri>           select a background track
  play | pause | stop   control the music
  m | music-toggle      play/pause the music
  q | close             close the slideshow
  {\"command\": ...}      JSON command";

/// Parse one input line
///
/// Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<SlideshowCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if line.starts_with('{') {
        return Ok(Some(serde_json::from_str(line)?));
    }

    let (word, arg) = match line.split_once(char::is_whitespace) {
        Some((word, arg)) => (word, Some(arg.trim())),
        None => (line, None),
    };

    let command = match (word.to_ascii_lowercase().as_str(), arg) {
        ("space" | "toggle" | "t", None) => SlideshowCommand::Toggle,
        ("n" | "next", None) => SlideshowCommand::Next,
        ("p" | "prev", None) => SlideshowCommand::Prev,
        ("jump" | "j", Some(arg)) => {
            let number: usize = arg
                .parse()
                .map_err(|_| CliError::InvalidCommand(format!("not a slide number: {}", arg)))?;
            let index = number
                .checked_sub(1)
                .ok_or_else(|| CliError::InvalidCommand("slides are numbered from 1".into()))?;
            SlideshowCommand::JumpTo(index)
        }
        ("music", Some(uri)) if !uri.is_empty() => SlideshowCommand::SelectTrack(uri.to_string()),
        ("play", None) => SlideshowCommand::PlayMusic,
        ("pause", None) => SlideshowCommand::PauseMusic,
        ("stop", None) => SlideshowCommand::StopMusic,
        ("m" | "music-toggle", None) => SlideshowCommand::ToggleMusic,
        ("q" | "quit" | "close", None) => SlideshowCommand::Close,
        _ => return Err(CliError::InvalidCommand(line.to_string())),
    };

    Ok(Some(command))
}

/// Forward parsed commands from `reader` until it ends or the receiver drops
///
/// Blocks; run it on a dedicated thread. Unparseable lines are logged and
/// skipped.
pub fn forward_commands<R: BufRead>(reader: R, tx: &mpsc::Sender<SlideshowCommand>) -> Result<()> {
    for line in reader.lines() {
        let line = line?;
        if matches!(line.trim(), "help" | "?") {
            println!("{}", HELP);
            continue;
        }

        match parse_command(&line) {
            Ok(Some(command)) => {
                if tx.blocking_send(command).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => warn!("{} (type \"help\" for commands)", e),
        }
    }

    Ok(())
}
