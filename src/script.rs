//! Replay scripts: a plain-text list of host events.
//!
//! One event per line. Blank lines and `#` comments are ignored.
//!
//! ```text
//! ready
//! click entry 0          # open the first entry
//! key ArrowLeft
//! click overlay 400 300  # inside the content box: stays open
//! click close
//! click close 880 60     # explicit pointer position
//! ```

use crate::events::{Event, Key, Point, Target};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// One scripted event and the 1-based line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub line: usize,
    pub event: Event,
}

pub fn parse_script(text: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let event = parse_event(line).map_err(|message| ScriptError::Parse {
            line: i + 1,
            message,
        })?;
        steps.push(Step {
            line: i + 1,
            event,
        });
    }
    Ok(steps)
}

pub fn load_script(path: &Path) -> Result<Vec<Step>, ScriptError> {
    let content = fs::read_to_string(path)?;
    parse_script(&content)
}

fn parse_event(line: &str) -> Result<Event, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["ready"] => Ok(Event::Ready),
        ["key", name] => {
            let Ok(key) = name.parse::<Key>();
            Ok(Event::key(key))
        }
        ["click", "entry", index] => {
            let index = index
                .parse::<usize>()
                .map_err(|_| format!("entry index must be a non-negative integer, got {index:?}"))?;
            Ok(Event::Click {
                target: Target::Entry(index),
                point: Point::default(),
            })
        }
        ["click", "overlay", x, y] => Ok(Event::Click {
            target: Target::Overlay,
            point: parse_point(x, y)?,
        }),
        ["click", "close"] => Ok(Event::Click {
            target: Target::CloseButton,
            point: Point::default(),
        }),
        ["click", "close", x, y] => Ok(Event::Click {
            target: Target::CloseButton,
            point: parse_point(x, y)?,
        }),
        ["click", ..] => Err(format!(
            "expected `click entry <i>`, `click overlay <x> <y>` or `click close [<x> <y>]`, got {line:?}"
        )),
        ["key"] => Err("`key` needs a key name, e.g. `key ArrowRight`".to_string()),
        _ => Err(format!("unknown event {line:?}")),
    }
}

fn parse_point(x: &str, y: &str) -> Result<Point, String> {
    let coord = |s: &str| {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("coordinate must be a number, got {s:?}"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}
