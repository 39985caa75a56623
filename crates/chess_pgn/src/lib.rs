//! Game-record replay on top of `chess_core`.
//!
//! Splits a PGN record into its tag pairs and move tokens, then drives the
//! move engine over copies of the most recent position, keeping the whole
//! history. All record parsing lives here; the core knows nothing about PGN.

use std::collections::HashMap;

use chess_core::{Board, MoveError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("move {ply} could not be applied")]
    Move {
        ply: usize,
        #[source]
        source: MoveError,
    },
}

#[derive(Debug, Clone)]
pub struct Game {
    tags: HashMap<String, String>,
    positions: Vec<Board>,
}

impl Game {
    /// Replays a PGN record from the standard initial position.
    ///
    /// Tag pairs are collected until the first non-tag line; if that line is
    /// the movetext (it starts with `1.`), every token is applied to a copy
    /// of the latest position and the result appended to the history.
    /// Result markers end up filtered, not applied.
    pub fn from_pgn(text: &str) -> Result<Self, ReplayError> {
        let mut tags = HashMap::new();
        let mut positions = vec![Board::new()];

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some((key, value)) = parse_tag(line) {
                tags.insert(key, value);
                continue;
            }
            if line.starts_with("1.") {
                let tokens = movetext_tokens(line);
                log::debug!("replaying {} tokens", tokens.len());
                for (idx, token) in tokens.iter().enumerate() {
                    let next = positions[positions.len() - 1]
                        .make_move_copy(token)
                        .map_err(|source| ReplayError::Move {
                            ply: idx + 1,
                            source,
                        })?;
                    positions.push(next);
                }
            }
            break;
        }

        Ok(Self { tags, positions })
    }

    /// Looks up a `[Key "Value"]` metadata tag.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Every position of the game, starting with the initial one; one entry
    /// per applied move after that.
    pub fn positions(&self) -> &[Board] {
        &self.positions
    }
}

fn parse_tag(line: &str) -> Option<(String, String)> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    let (key, rest) = inner.split_once(char::is_whitespace)?;
    let value = rest.strip_prefix('"')?.strip_suffix('"')?;
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}

fn movetext_tokens(line: &str) -> Vec<&str> {
    line.split_whitespace()
        .map(strip_move_number)
        .filter(|token| !token.is_empty() && !matches!(*token, "1-0" | "0-1" | "1/2-1/2"))
        .collect()
}

// "12.Nf3" and bare "12." prefixes drop; anything else passes through.
fn strip_move_number(token: &str) -> &str {
    let digits = token.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        if let Some(rest) = token[digits..].strip_prefix('.') {
            return rest;
        }
    }
    token
}
