//! NEC command codes of the 17-key remote

/// Remote buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Star,
    Hash,
    Ok,
    Up,
    Down,
    Left,
    Right,
}

const CODES: [(u8, Button); 17] = [
    (0x19, Button::Num0),
    (0x45, Button::Num1),
    (0x46, Button::Num2),
    (0x47, Button::Num3),
    (0x44, Button::Num4),
    (0x40, Button::Num5),
    (0x43, Button::Num6),
    (0x07, Button::Num7),
    (0x15, Button::Num8),
    (0x09, Button::Num9),
    (0x16, Button::Star),
    (0x0D, Button::Hash),
    (0x1C, Button::Ok),
    (0x18, Button::Up),
    (0x52, Button::Down),
    (0x08, Button::Left),
    (0x5A, Button::Right),
];

impl Button {
    /// Map an NEC command byte to a button
    pub fn from_code(code: u8) -> Option<Self> {
        CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, button)| *button)
    }

    pub fn code(self) -> u8 {
        CODES
            .iter()
            .find(|(_, button)| *button == self)
            .map(|(c, _)| *c)
            .unwrap_or_default()
    }

    /// Whether a held button keeps acting on repeat frames
    pub fn repeats(self) -> bool {
        matches!(self, Button::Up | Button::Down | Button::Num0 | Button::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_roundtrip() {
        for (code, button) in CODES {
            assert_eq!(Button::from_code(code), Some(button));
            assert_eq!(button.code(), code);
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(Button::from_code(0x00), None);
        assert_eq!(Button::from_code(0xFF), None);
    }

    #[test]
    fn test_repeatable_buttons() {
        assert!(Button::Up.repeats());
        assert!(Button::Num0.repeats());
        assert!(!Button::Left.repeats());
        assert!(!Button::Hash.repeats());
    }
}
