//! Turning text into keypresses.
//!
//! The macro programs include literal text, which has to become a sequence of
//! (possibly shifted) HID usages.  Letters and digits are arithmetic on the
//! usage page; everything else printable is a small lookup.  Characters we
//! can't type on a US layout are skipped rather than guessed at.

use usbd_human_interface_device::page::Keyboard;

use crate::{KeyAction, Mods};

/// The keypress for one ASCII character: the usage and whether it needs
/// shift.
pub fn key_for_char(ch: char) -> Option<(Keyboard, bool)> {
    let key = match ch {
        'a'..='z' => return Some((keyboard_at(Keyboard::A, ch as u8 - b'a'), false)),
        'A'..='Z' => return Some((keyboard_at(Keyboard::A, ch as u8 - b'A'), true)),
        '1'..='9' => return Some((keyboard_at(Keyboard::Keyboard1, ch as u8 - b'1'), false)),
        '0' => Keyboard::Keyboard0,
        '\n' => Keyboard::ReturnEnter,
        '\t' => Keyboard::Tab,
        ' ' => Keyboard::Space,
        '-' => Keyboard::Minus,
        '=' => Keyboard::Equal,
        '[' => Keyboard::LeftBrace,
        ']' => Keyboard::RightBrace,
        '\\' => Keyboard::Backslash,
        ';' => Keyboard::Semicolon,
        '\'' => Keyboard::Apostrophe,
        '`' => Keyboard::Grave,
        ',' => Keyboard::Comma,
        '.' => Keyboard::Dot,
        '/' => Keyboard::ForwardSlash,
        _ => return shifted_punct(ch).map(|k| (k, true)),
    };
    Some((key, false))
}

/// Characters reached through shift on a US layout.
fn shifted_punct(ch: char) -> Option<Keyboard> {
    Some(match ch {
        '!' => Keyboard::Keyboard1,
        '@' => Keyboard::Keyboard2,
        '#' => Keyboard::Keyboard3,
        '$' => Keyboard::Keyboard4,
        '%' => Keyboard::Keyboard5,
        '^' => Keyboard::Keyboard6,
        '&' => Keyboard::Keyboard7,
        '*' => Keyboard::Keyboard8,
        '(' => Keyboard::Keyboard9,
        ')' => Keyboard::Keyboard0,
        '_' => Keyboard::Minus,
        '+' => Keyboard::Equal,
        '{' => Keyboard::LeftBrace,
        '}' => Keyboard::RightBrace,
        '|' => Keyboard::Backslash,
        ':' => Keyboard::Semicolon,
        '"' => Keyboard::Apostrophe,
        '~' => Keyboard::Grave,
        '<' => Keyboard::Comma,
        '>' => Keyboard::Dot,
        '?' => Keyboard::ForwardSlash,
        _ => return None,
    })
}

fn keyboard_at(base: Keyboard, offset: u8) -> Keyboard {
    (base as u8 + offset).into()
}

/// Expand a string into press/release pairs, feeding each to `emit`.
pub fn type_str<F: FnMut(KeyAction)>(text: &str, mut emit: F) {
    for ch in text.chars() {
        let Some((key, shifted)) = key_for_char(ch) else {
            continue;
        };
        let mods = if shifted { Mods::SHIFT } else { Mods::empty() };
        emit(KeyAction::KeyPress(key, mods));
        emit(KeyAction::KeyRelease);
    }
}

#[cfg(test)]
mod test {
    use super::key_for_char;
    use usbd_human_interface_device::page::Keyboard;

    #[test]
    fn char_mapping() {
        assert_eq!(key_for_char('a'), Some((Keyboard::A, false)));
        assert_eq!(key_for_char('Z'), Some((Keyboard::Z, true)));
        assert_eq!(key_for_char('5'), Some((Keyboard::Keyboard5, false)));
        assert_eq!(key_for_char('0'), Some((Keyboard::Keyboard0, false)));
        assert_eq!(key_for_char(':'), Some((Keyboard::Semicolon, true)));
        assert_eq!(key_for_char('\n'), Some((Keyboard::ReturnEnter, false)));
        assert_eq!(key_for_char('é'), None);
    }
}
