use std::fs;
use std::process;

use serde::Serialize;

use tex_engine::position::byte_offset;
use tex_engine::{EditorSession, FeatureToggles, HostEditor, KeyEvent, KeyResponse, MemoryEditor, Position};

use super::classify_ops::parse_position;
use crate::keyscript::parse_key_script;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Cursor marker accepted in input documents and printed in text output.
pub const CURSOR_MARK: char = '‸';

#[derive(Debug, Serialize)]
pub struct KeyStep {
    pub key: KeyEvent,
    pub response: KeyResponse,
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub text: String,
    pub cursor: Position,
    pub steps: Vec<KeyStep>,
}

impl ReplayReport {
    /// Final text with the cursor marker inserted.
    pub fn marked_text(&self) -> String {
        self.text
            .split('\n')
            .enumerate()
            .map(|(row, line)| {
                if row == self.cursor.line {
                    let at = byte_offset(line, self.cursor.col);
                    format!("{}{CURSOR_MARK}{}", &line[..at], &line[at..])
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Editor over `text`. A `‸` in the text wins over `cursor`; with neither,
/// the cursor starts at the end of the document.
pub fn editor_for(text: &str, cursor: Option<Position>) -> MemoryEditor {
    let mut marker = None;
    let (mut line, mut col) = (0, 0);
    for ch in text.chars() {
        match ch {
            CURSOR_MARK => marker = Some(Position::new(line, col)),
            '\n' => {
                line += 1;
                col = 0;
            }
            _ => col += 1,
        }
    }
    let start = marker.or(cursor).unwrap_or(Position::new(line, col));
    MemoryEditor::with_cursor(&text.replace(CURSOR_MARK, ""), start)
}

/// Feed `keys` through a fresh session, letting the editor apply every key the
/// session does not consume.
pub fn replay_keys(
    text: &str,
    cursor: Option<Position>,
    keys: &[KeyEvent],
    features: FeatureToggles,
) -> ReplayReport {
    let mut editor = editor_for(text, cursor);
    let mut session = EditorSession::new(features);

    let steps = keys
        .iter()
        .map(|&key| {
            let response = session.handle_key(&mut editor, key);
            if !response.consumed {
                editor.apply_default(key);
            }
            KeyStep { key, response }
        })
        .collect();

    ReplayReport {
        text: editor.text(),
        cursor: editor.cursor(),
        steps,
    }
}

pub fn replay(
    file: &str,
    keys: &str,
    cursor: Option<&str>,
    settings: Option<&str>,
    json: bool,
) {
    let text = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let keys = die!(parse_key_script(keys), "Error: {}");
    let cursor = cursor.map(|c| die!(parse_position(c), "Error: {}"));
    let features = match settings {
        Some(path) => {
            let content = die!(fs::read_to_string(path), "Error reading {path}: {}");
            die!(tex_engine::settings::parse_settings_toml(&content), "Error: {}").features
        }
        None => FeatureToggles::default(),
    };

    let report = replay_keys(text.trim_end_matches('\n'), cursor, &keys, features);
    if json {
        println!("{}", die!(serde_json::to_string_pretty(&report), "Error: {}"));
        return;
    }

    for step in &report.steps {
        let ended: Vec<&str> = step.response.ended.iter().map(|m| m.kind.as_str()).collect();
        println!(
            "{:<12} consumed={:<5} ended=[{}]",
            format!("{:?}", step.key),
            step.response.consumed,
            ended.join(", ")
        );
    }
    println!("---");
    println!("{}", report.marked_text());
}
