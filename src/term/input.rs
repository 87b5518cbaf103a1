//! Input events and their script-facing token encoding.
//!
//! Decodes crossterm key events into a backend-neutral [`Key`] and renders
//! each key as the token the `getch` method returns. The token mapping is
//! total: every representable key produces exactly one token.

use bitflags::bitflags;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

bitflags! {
    /// Modifier keys
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        let mut result = Modifiers::empty();
        if mods.contains(KeyModifiers::SHIFT) {
            result |= Modifiers::SHIFT;
        }
        if mods.contains(KeyModifiers::CONTROL) {
            result |= Modifiers::CTRL;
        }
        if mods.contains(KeyModifiers::ALT) {
            result |= Modifiers::ALT;
        }
        result
    }
}

// Curses-compatible codes for keys without a dedicated token.
pub const CODE_ESC: u16 = 0x1B;
pub const CODE_TAB: u16 = 0x09;
pub const CODE_HOME: u16 = 0x106;
pub const CODE_BACKTAB: u16 = 0x161;
pub const CODE_DELETE: u16 = 0x14A;
pub const CODE_INSERT: u16 = 0x14B;
pub const CODE_PAGE_DOWN: u16 = 0x152;
pub const CODE_PAGE_UP: u16 = 0x153;
pub const CODE_END: u16 = 0x168;
pub const CODE_F0: u16 = 0x108;

/// A single decoded input event, backend neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Backspace,
    Enter,
    /// Any other key, as a curses-style numeric code.
    Code(u16),
}

impl Key {
    /// Decode a crossterm key event. Returns `None` for events with no
    /// terminal representation (media keys and the like).
    pub fn from_event(event: &KeyEvent) -> Option<Key> {
        let mods = Modifiers::from(event.modifiers);

        match event.code {
            KeyCode::Char(ch) => Some(Self::from_char(ch, mods)),
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Esc => Some(Key::Code(CODE_ESC)),
            KeyCode::Tab => Some(Key::Code(CODE_TAB)),
            KeyCode::BackTab => Some(Key::Code(CODE_BACKTAB)),
            KeyCode::Delete => Some(Key::Code(CODE_DELETE)),
            KeyCode::Insert => Some(Key::Code(CODE_INSERT)),
            KeyCode::Home => Some(Key::Code(CODE_HOME)),
            KeyCode::End => Some(Key::Code(CODE_END)),
            KeyCode::PageUp => Some(Key::Code(CODE_PAGE_UP)),
            KeyCode::PageDown => Some(Key::Code(CODE_PAGE_DOWN)),
            KeyCode::F(n) => Some(Key::Code(CODE_F0 + u16::from(n))),
            _ => None,
        }
    }

    /// Fold modifiers into the character, curses style: a Ctrl chord
    /// arrives at the script as the matching control code.
    fn from_char(ch: char, mods: Modifiers) -> Key {
        if mods.contains(Modifiers::CTRL) {
            if ch.is_ascii_lowercase() {
                return Key::Code(ch as u16 - 'a' as u16 + 1);
            }
            if ch.is_ascii_uppercase() {
                return Key::Code(ch as u16 - 'A' as u16 + 1);
            }
            match ch {
                '@' | '`' | ' ' => return Key::Code(0x00),
                '[' => return Key::Code(0x1B),
                '\\' => return Key::Code(0x1C),
                ']' => return Key::Code(0x1D),
                '^' | '~' => return Key::Code(0x1E),
                '_' | '?' => return Key::Code(0x1F),
                _ => {}
            }
        }
        Key::Char(ch)
    }

    /// Script-facing token for this key.
    ///
    /// Printable, non-whitespace characters are returned verbatim; arrows,
    /// backspace, and enter get fixed symbolic tokens; everything else is a
    /// hexadecimal escape `<0xNN>` (uppercase, minimum two digits).
    pub fn token(&self) -> String {
        match *self {
            Key::Up => "<Up>".to_string(),
            Key::Down => "<Down>".to_string(),
            Key::Left => "<Left>".to_string(),
            Key::Right => "<Right>".to_string(),
            Key::Backspace => "<Backspace>".to_string(),
            Key::Enter => "<Enter>".to_string(),
            Key::Char(ch) if !ch.is_whitespace() && !ch.is_control() => ch.to_string(),
            Key::Char(ch) => format!("<0x{:02X}>", ch as u32),
            Key::Code(code) => format!("<0x{:02X}>", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn test_char_keys() {
        let event = key_event(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(Key::from_event(&event), Some(Key::Char('a')));

        // Ctrl+C folds to the control code
        let event = key_event(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Key::from_event(&event), Some(Key::Code(0x03)));

        let event = key_event(KeyCode::Char('['), KeyModifiers::CONTROL);
        assert_eq!(Key::from_event(&event), Some(Key::Code(0x1B)));
    }

    #[test]
    fn test_special_keys() {
        let event = key_event(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(Key::from_event(&event), Some(Key::Up));

        let event = key_event(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(Key::from_event(&event), Some(Key::Code(CODE_ESC)));

        let event = key_event(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(Key::from_event(&event), Some(Key::Code(CODE_F0 + 5)));
    }

    #[test]
    fn test_tokens() {
        assert_eq!(Key::Char('x').token(), "x");
        assert_eq!(Key::Char('%').token(), "%");
        assert_eq!(Key::Up.token(), "<Up>");
        assert_eq!(Key::Down.token(), "<Down>");
        assert_eq!(Key::Left.token(), "<Left>");
        assert_eq!(Key::Right.token(), "<Right>");
        assert_eq!(Key::Backspace.token(), "<Backspace>");
        assert_eq!(Key::Enter.token(), "<Enter>");

        // whitespace and control characters fall back to hex
        assert_eq!(Key::Char(' ').token(), "<0x20>");
        assert_eq!(Key::Char('\t').token(), "<0x09>");
        assert_eq!(Key::Code(0x1B).token(), "<0x1B>");
        assert_eq!(Key::Code(0x03).token(), "<0x03>");

        // codes above one byte keep their full width
        assert_eq!(Key::Code(CODE_HOME).token(), "<0x106>");
    }
}
