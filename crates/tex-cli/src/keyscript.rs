//! Key scripts for `textool replay`.
//!
//! Plain characters type themselves; `<Name>` sends a named key using the
//! DOM names and aliases `KeyEvent::from_key_str` accepts (`<Esc>`,
//! `<Left>`, `<Space>`, `<BS>`, ...). `<lt>` types a literal `<`.

use tex_engine::KeyEvent;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyScriptError {
    #[error("unknown key <{name}> at offset {offset}")]
    UnknownKey { name: String, offset: usize },
    #[error("unterminated <...> at offset {offset}")]
    Unterminated { offset: usize },
}

pub fn parse_key_script(script: &str) -> Result<Vec<KeyEvent>, KeyScriptError> {
    let mut keys = Vec::new();
    let mut rest = script.char_indices();

    while let Some((offset, c)) = rest.next() {
        if c != '<' {
            keys.push(KeyEvent::from_char(c));
            continue;
        }

        let mut name = String::new();
        let mut closed = false;
        for (_, c) in rest.by_ref() {
            if c == '>' {
                closed = true;
                break;
            }
            name.push(c);
        }
        if !closed {
            return Err(KeyScriptError::Unterminated { offset });
        }

        let key = match name.as_str() {
            "lt" => Some(KeyEvent::Char('<')),
            other => KeyEvent::from_key_str(other),
        };
        keys.push(key.ok_or(KeyScriptError::UnknownKey { name, offset })?);
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_characters() {
        assert_eq!(
            parse_key_script("a_1 ").unwrap(),
            vec![
                KeyEvent::Char('a'),
                KeyEvent::Char('_'),
                KeyEvent::Char('1'),
                KeyEvent::Space
            ]
        );
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(
            parse_key_script("x<Esc><Left><Space><lt>").unwrap(),
            vec![
                KeyEvent::Char('x'),
                KeyEvent::Escape,
                KeyEvent::ArrowLeft,
                KeyEvent::Space,
                KeyEvent::Char('<')
            ]
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_key_script("ab<Nope>"),
            Err(KeyScriptError::UnknownKey {
                name: "Nope".to_string(),
                offset: 2
            })
        );
        assert_eq!(
            parse_key_script("a<Esc"),
            Err(KeyScriptError::Unterminated { offset: 1 })
        );
    }
}
