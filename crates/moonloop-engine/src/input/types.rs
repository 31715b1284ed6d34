use std::fmt;

/// Keyboard key identifier.
///
/// Hosts map platform key identifiers into these variants; [`Key::code`] gives the
/// legacy DOM `keyCode` value that renderers receive. Keys without a variant are
/// carried as `Key::Unknown(code)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    // Common control keys
    Backspace,
    Tab,
    Enter,
    Escape,
    Space,

    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,

    // Modifiers as keys
    Shift,
    Control,
    Alt,
    Meta,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    /// Key not represented above, by DOM code.
    Unknown(u32),
}

const LETTERS: [Key; 26] = [
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
    Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
    Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
];

const DIGITS: [Key; 10] = [
    Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
    Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
];

const FUNCTION_KEYS: [Key; 12] = [
    Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6,
    Key::F7, Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
];

impl Key {
    /// DOM `keyCode` for this key (`'A'` is 65, `'0'` is 48, arrows are 37..=40).
    pub fn code(self) -> u32 {
        match self {
            Key::Backspace => 8,
            Key::Tab => 9,
            Key::Enter => 13,
            Key::Shift => 16,
            Key::Control => 17,
            Key::Alt => 18,
            Key::Escape => 27,
            Key::Space => 32,
            Key::PageUp => 33,
            Key::PageDown => 34,
            Key::End => 35,
            Key::Home => 36,
            Key::ArrowLeft => 37,
            Key::ArrowUp => 38,
            Key::ArrowRight => 39,
            Key::ArrowDown => 40,
            Key::Insert => 45,
            Key::Delete => 46,
            Key::Meta => 91,
            Key::Unknown(code) => code,
            other => {
                if let Some(i) = LETTERS.iter().position(|k| *k == other) {
                    65 + i as u32
                } else if let Some(i) = DIGITS.iter().position(|k| *k == other) {
                    48 + i as u32
                } else if let Some(i) = FUNCTION_KEYS.iter().position(|k| *k == other) {
                    112 + i as u32
                } else {
                    unreachable!("every named key has a code")
                }
            }
        }
    }

    /// Inverse of [`Key::code`]; unmapped codes become `Key::Unknown`.
    pub fn from_code(code: u32) -> Key {
        match code {
            8 => Key::Backspace,
            9 => Key::Tab,
            13 => Key::Enter,
            16 => Key::Shift,
            17 => Key::Control,
            18 => Key::Alt,
            27 => Key::Escape,
            32 => Key::Space,
            33 => Key::PageUp,
            34 => Key::PageDown,
            35 => Key::End,
            36 => Key::Home,
            37 => Key::ArrowLeft,
            38 => Key::ArrowUp,
            39 => Key::ArrowRight,
            40 => Key::ArrowDown,
            45 => Key::Insert,
            46 => Key::Delete,
            48..=57 => DIGITS[(code - 48) as usize],
            65..=90 => LETTERS[(code - 65) as usize],
            91 => Key::Meta,
            112..=123 => FUNCTION_KEYS[(code - 112) as usize],
            other => Key::Unknown(other),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Input notification forwarded to the renderer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    /// Key state change, DOM `keyCode` numbering.
    Key { code: u32, pressed: bool },

    /// Pointer position in logical pixels.
    PointerMoved { x: f64, y: f64 },
}

impl InputEvent {
    pub fn key(key: Key, pressed: bool) -> Self {
        Self::Key {
            code: key.code(),
            pressed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_match_ascii_uppercase() {
        assert_eq!(Key::A.code(), u32::from(b'A'));
        assert_eq!(Key::D.code(), u32::from(b'D'));
        assert_eq!(Key::Z.code(), u32::from(b'Z'));
    }

    #[test]
    fn digits_and_function_keys() {
        assert_eq!(Key::Digit0.code(), 48);
        assert_eq!(Key::Digit9.code(), 57);
        assert_eq!(Key::F1.code(), 112);
        assert_eq!(Key::F12.code(), 123);
    }

    #[test]
    fn from_code_inverts_code() {
        for key in [Key::W, Key::Digit5, Key::ArrowDown, Key::Space, Key::F7, Key::Meta] {
            assert_eq!(Key::from_code(key.code()), key);
        }
    }

    #[test]
    fn unknown_codes_round_trip() {
        assert_eq!(Key::from_code(186), Key::Unknown(186));
        assert_eq!(Key::Unknown(186).code(), 186);
    }
}
