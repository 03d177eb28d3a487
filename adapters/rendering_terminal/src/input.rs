//! Raw stdin decoding and the background input pump.

use std::{
    io::{self, Read},
    thread,
};

use anyhow::{Context, Result};
use boulder_push_core::{Direction, PlayerInput};
use crossbeam_channel::{Receiver, Sender};

const ESCAPE: u8 = 0x1b;
const CONTROL_C: u8 = 0x03;
const CSI_INTRODUCER: u8 = b'[';
const SS3_INTRODUCER: u8 = b'O';

/// Decodes a single key sequence read from a raw-mode terminal.
///
/// Arrow keys arrive as `ESC [ A..D` or `ESC O A..D`, Shift-Tab as
/// `ESC [ Z`. An escape byte on its own or Ctrl-C quits. Unknown sequences
/// decode to `None`.
#[must_use]
pub fn decode_input(bytes: &[u8]) -> Option<PlayerInput> {
    match bytes {
        [ESCAPE] | [CONTROL_C] => Some(PlayerInput::Quit),
        [ESCAPE, CSI_INTRODUCER, b'Z'] => Some(PlayerInput::Undo),
        [ESCAPE, CSI_INTRODUCER | SS3_INTRODUCER, code] => arrow(*code).map(PlayerInput::Move),
        [b'u' | b'U'] => Some(PlayerInput::Undo),
        _ => None,
    }
}

fn arrow(code: u8) -> Option<Direction> {
    match code {
        b'A' => Some(Direction::Up),
        b'B' => Some(Direction::Down),
        b'C' => Some(Direction::Right),
        b'D' => Some(Direction::Left),
        _ => None,
    }
}

/// Splits a chunk read from stdin into individual key sequences.
///
/// A single read may carry several keys when input arrives faster than the
/// pump drains it. An escape byte stays attached to the bytes that follow
/// it; only a chunk consisting of the escape byte alone yields it on its own.
pub(crate) fn key_sequences(chunk: &[u8]) -> Vec<&[u8]> {
    if chunk == [ESCAPE] {
        return vec![chunk];
    }

    let mut sequences = Vec::new();
    let mut rest = chunk;
    while !rest.is_empty() {
        let length = match rest {
            [ESCAPE, CSI_INTRODUCER | SS3_INTRODUCER, _, ..] => 3,
            [ESCAPE, _, ..] => 2,
            _ => 1,
        };
        let (sequence, tail) = rest.split_at(length);
        // A trailing escape inside a longer chunk belongs to a cut-off sequence.
        if sequence != [ESCAPE] {
            sequences.push(sequence);
        }
        rest = tail;
    }
    sequences
}

/// Spawns the thread that reads stdin and forwards decoded input.
///
/// The thread is detached; it ends once it has reported end of input or the
/// receiving side is dropped.
pub fn spawn_input_pump() -> Result<Receiver<PlayerInput>> {
    let (sender, receiver) = crossbeam_channel::unbounded();
    let _ = thread::Builder::new()
        .name("input-pump".to_owned())
        .spawn(move || pump(io::stdin().lock(), &sender))
        .context("failed to spawn the input pump thread")?;
    Ok(receiver)
}

/// Forwards decoded key sequences from `reader` until input ends.
///
/// Read failures and end of input are reported as [`PlayerInput::Quit`].
pub fn pump<R>(mut reader: R, sender: &Sender<PlayerInput>)
where
    R: Read,
{
    let mut buffer = [0_u8; 32];
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => {
                tracing::debug!("input closed");
                let _ = sender.send(PlayerInput::Quit);
                return;
            }
            Ok(read) => read,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => {
                tracing::warn!(%error, "failed to read input");
                let _ = sender.send(PlayerInput::Quit);
                return;
            }
        };

        for sequence in key_sequences(&buffer[..read]) {
            let Some(input) = decode_input(sequence) else {
                tracing::trace!(?sequence, "ignoring unmapped key");
                continue;
            };
            if sender.send(input).is_err() {
                return;
            }
        }
    }
}
