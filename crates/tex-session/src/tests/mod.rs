mod fraction;
mod scripts;
mod stack;

use tex_core::position::byte_offset;
use tex_core::Position;

use super::{HostEditor, MemoryEditor};

/// Cursor marker used in test buffers.
pub(super) const CURSOR: char = '‸';

/// Build an editor from `text`, placing the cursor at the `‸` marker.
pub(super) fn marked(text: &str) -> MemoryEditor {
    let mut cursor = Position::zero();
    let (mut line, mut col) = (0, 0);
    for ch in text.chars() {
        match ch {
            CURSOR => cursor = Position::new(line, col),
            '\n' => {
                line += 1;
                col = 0;
            }
            _ => col += 1,
        }
    }
    MemoryEditor::with_cursor(&text.replace(CURSOR, ""), cursor)
}

/// Buffer contents with `‸` inserted at the cursor.
pub(super) fn shown(editor: &MemoryEditor) -> String {
    let cursor = editor.cursor();
    editor
        .lines()
        .iter()
        .enumerate()
        .map(|(row, text)| {
            if row == cursor.line {
                let at = byte_offset(text, cursor.col);
                format!("{}{CURSOR}{}", &text[..at], &text[at..])
            } else {
                text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_marker_round_trip() {
    let ed = marked("ab\nc‸d");
    assert_eq!(ed.text(), "ab\ncd");
    assert_eq!(ed.cursor(), Position::new(1, 1));
    assert_eq!(shown(&ed), "ab\nc‸d");
}
