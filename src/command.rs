// SPDX-License-Identifier: MIT

use thiserror::Error;

use std::fmt;

use crate::tracker::UsedIdTracker;

pub const SET_USAGE: &str = "correct usage is SET <id> <message>";
pub const GET_USAGE: &str = "correct usage is GET <id>";

/// A validated operator request, ready to be written to the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { id: u64, message: String },
    Get { id: u64 },
}

impl Command {
    pub fn id(&self) -> u64 {
        match self {
            Command::Set { id, .. } => *id,
            Command::Get { id } => *id,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Command::Set { id, message } => write!(f, "SET {id} {message}"),
            Command::Get { id } => write!(f, "GET {id}"),
        }
    }
}

/// Why a raw instruction was refused locally. None of these ever reach the
/// network layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Reject {
    #[error("malformed SET: {SET_USAGE}")]
    MalformedSet,

    #[error("malformed GET: {GET_USAGE}")]
    MalformedGet,

    #[error("id {id} has already been used{}", max_hint(.max_used))]
    DuplicateId { id: u64, max_used: Option<u64> },

    #[error("unknown command {verb:?}; expected SET or GET")]
    UnknownVerb { verb: String },
}

fn max_hint(max_used: &Option<u64>) -> String {
    match max_used {
        Some(max) => format!(" (current max id is {max}, supply a larger one)"),
        None => String::new(),
    }
}

/// Parses and validates one raw instruction line against the tracker.
///
/// Lexing is verb, id, rest-of-line-as-message, so a `SET` message may
/// contain spaces; the verb is matched case-insensitively. A successful `SET`
/// marks its id used immediately, before any network traffic, so a duplicate
/// can never be submitted twice even if the first send later fails.
pub fn validate(raw: &str, tracker: &mut UsedIdTracker) -> Result<Command, Reject> {
    let (verb, rest) = split_token(raw.trim());

    match verb.to_uppercase().as_str() {
        "SET" => {
            let (id_token, message) = split_token(rest);
            let id = id_token.parse::<u64>().map_err(|_| Reject::MalformedSet)?;
            if tracker.contains(id) {
                return Err(Reject::DuplicateId {
                    id,
                    max_used: tracker.max_used(),
                });
            }
            // Optimistic pre-registration: used even if the send fails.
            tracker.insert(id);
            Ok(Command::Set {
                id,
                message: message.to_string(),
            })
        }
        "GET" => {
            let (id_token, trailing) = split_token(rest);
            let id = id_token.parse::<u64>().map_err(|_| Reject::MalformedGet)?;
            if !trailing.is_empty() {
                return Err(Reject::MalformedGet);
            }
            Ok(Command::Get { id })
        }
        _ => Err(Reject::UnknownVerb {
            verb: verb.to_string(),
        }),
    }
}

/// Splits off the next whitespace-delimited token, returning it and the rest
/// of the line with leading whitespace dropped.
fn split_token(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim_start()),
        None => (line, ""),
    }
}
