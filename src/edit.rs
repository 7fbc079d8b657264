use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A change to the input box, as produced by one key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Insert(char),
    DeleteBack,
    DeleteWord,
    Clear,
}

impl Edit {
    /// Map a key press to a text edit, if it is one.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Backspace if ctrl || alt => Some(Edit::DeleteWord),
            KeyCode::Backspace => Some(Edit::DeleteBack),
            KeyCode::Char('w') if ctrl => Some(Edit::DeleteWord),
            KeyCode::Char('u') if ctrl => Some(Edit::Clear),
            KeyCode::Char(_) if ctrl || alt => None,
            KeyCode::Char(c) => Some(Edit::Insert(c)),
            KeyCode::Enter => Some(Edit::Insert('\n')),
            KeyCode::Tab => Some(Edit::Insert('\t')),
            _ => None,
        }
    }
}

/// Apply `edit` to the current input, returning the new raw text.
pub fn apply_edit(current: &str, edit: Edit) -> String {
    let mut text = current.to_string();
    match edit {
        Edit::Insert(c) => text.push(c),
        Edit::DeleteBack => {
            text.pop();
        }
        Edit::DeleteWord => {
            let kept = text.trim_end().len();
            text.truncate(kept);
            let word_start = text
                .char_indices()
                .rev()
                .find(|(_, c)| c.is_whitespace())
                .map(|(idx, c)| idx + c.len_utf8())
                .unwrap_or(0);
            text.truncate(word_start);
        }
        Edit::Clear => text.clear(),
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_from_key_plain_chars() {
        assert_eq!(
            Edit::from_key(key(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(Edit::Insert('a'))
        );
        assert_eq!(
            Edit::from_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(Edit::Insert('A'))
        );
    }

    #[test]
    fn test_from_key_enter_and_tab_insert_whitespace() {
        assert_eq!(
            Edit::from_key(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Edit::Insert('\n'))
        );
        assert_eq!(
            Edit::from_key(key(KeyCode::Tab, KeyModifiers::NONE)),
            Some(Edit::Insert('\t'))
        );
    }

    #[test]
    fn test_from_key_deletions() {
        assert_eq!(
            Edit::from_key(key(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(Edit::DeleteBack)
        );
        assert_eq!(
            Edit::from_key(key(KeyCode::Backspace, KeyModifiers::ALT)),
            Some(Edit::DeleteWord)
        );
        assert_eq!(
            Edit::from_key(key(KeyCode::Char('w'), KeyModifiers::CONTROL)),
            Some(Edit::DeleteWord)
        );
        assert_eq!(
            Edit::from_key(key(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            Some(Edit::Clear)
        );
    }

    #[test]
    fn test_from_key_ignores_other_keys() {
        assert_eq!(Edit::from_key(key(KeyCode::Esc, KeyModifiers::NONE)), None);
        assert_eq!(Edit::from_key(key(KeyCode::Left, KeyModifiers::NONE)), None);
        assert_eq!(
            Edit::from_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_insert_and_delete_back() {
        let s = apply_edit("ca", Edit::Insert('t'));
        assert_eq!(s, "cat");
        assert_eq!(apply_edit(&s, Edit::DeleteBack), "ca");
        assert_eq!(apply_edit("", Edit::DeleteBack), "");
    }

    #[test]
    fn test_delete_back_multibyte() {
        assert_eq!(apply_edit("café", Edit::DeleteBack), "caf");
    }

    #[test]
    fn test_delete_word() {
        assert_eq!(apply_edit("the quick bro", Edit::DeleteWord), "the quick ");
        assert_eq!(apply_edit("the quick ", Edit::DeleteWord), "the ");
        assert_eq!(apply_edit("single", Edit::DeleteWord), "");
        assert_eq!(apply_edit("", Edit::DeleteWord), "");
    }

    #[test]
    fn test_clear() {
        assert_eq!(apply_edit("some text", Edit::Clear), "");
    }
}
