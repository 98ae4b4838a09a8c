//! 키 조합 (수식키 집합 + 키).
//!
//! 표시 형식은 `Ctrl+Shift+Right`, `Ctrl+Comma`, `F1` 처럼 수식키를
//! Ctrl, Alt, Shift, Meta 순서로 나열한 뒤 키 이름을 붙인다.
//! 문자열 파싱은 `Ctrl++`, `Ctrl+,` 같은 기호 표기도 받아들인다.

use crate::error::CoreError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 수식키 집합
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    /// 수식키 없음
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::NONE
        }
    }

    pub fn ctrl_shift() -> Self {
        Self {
            ctrl: true,
            shift: true,
            ..Self::NONE
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.ctrl || self.alt || self.shift || self.meta)
    }
}

/// 키
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// 문자 키 (영문자는 대문자로 정규화)
    Char(char),
    /// 기능 키 F1..F24
    F(u8),
    Up,
    Down,
    Left,
    Right,
    Tab,
    Enter,
    Escape,
    Space,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
}

/// 이름으로 표기되는 기호 키
const SYMBOL_NAMES: &[(char, &str)] = &[
    (',', "Comma"),
    ('.', "Period"),
    ('+', "Plus"),
    ('-', "Minus"),
    ('/', "Slash"),
    ('?', "Question"),
    (';', "Semicolon"),
    ('=', "Equal"),
];

impl Key {
    /// 문자 키 생성 (영문자는 대문자로)
    pub fn char(c: char) -> Self {
        Self::Char(c.to_ascii_uppercase())
    }

    /// 방향키 여부
    pub fn is_arrow(&self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::Left | Self::Right)
    }

    fn parse_name(name: &str) -> Result<Self, CoreError> {
        let lower = name.to_ascii_lowercase();
        let key = match lower.as_str() {
            "up" => Self::Up,
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            "tab" => Self::Tab,
            "enter" | "return" => Self::Enter,
            "esc" | "escape" => Self::Escape,
            "space" => Self::Space,
            "backspace" => Self::Backspace,
            "del" | "delete" => Self::Delete,
            "ins" | "insert" => Self::Insert,
            "home" => Self::Home,
            "end" => Self::End,
            "pgup" | "pageup" => Self::PageUp,
            "pgdown" | "pagedown" => Self::PageDown,
            _ => {
                if let Some((c, _)) = SYMBOL_NAMES
                    .iter()
                    .find(|(_, n)| n.eq_ignore_ascii_case(name))
                {
                    return Ok(Self::Char(*c));
                }
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_whitespace() => Self::char(c),
                    _ => {
                        if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                            if (1..=24).contains(&n) {
                                return Ok(Self::F(n));
                            }
                        }
                        return Err(CoreError::InvalidChord(format!("알 수 없는 키: {}", name)));
                    }
                }
            }
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => match SYMBOL_NAMES.iter().find(|(s, _)| s == c) {
                Some((_, name)) => f.write_str(name),
                None => write!(f, "{}", c),
            },
            Self::F(n) => write!(f, "F{}", n),
            Self::Up => f.write_str("Up"),
            Self::Down => f.write_str("Down"),
            Self::Left => f.write_str("Left"),
            Self::Right => f.write_str("Right"),
            Self::Tab => f.write_str("Tab"),
            Self::Enter => f.write_str("Enter"),
            Self::Escape => f.write_str("Escape"),
            Self::Space => f.write_str("Space"),
            Self::Backspace => f.write_str("Backspace"),
            Self::Delete => f.write_str("Delete"),
            Self::Insert => f.write_str("Insert"),
            Self::Home => f.write_str("Home"),
            Self::End => f.write_str("End"),
            Self::PageUp => f.write_str("PageUp"),
            Self::PageDown => f.write_str("PageDown"),
        }
    }
}

/// 키 조합
///
/// 디스패치는 수식키 집합까지 정확히 일치해야 한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyChord {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// 수식키 없는 단일 키
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// 표시 문자열 파싱 (`"Ctrl+Shift+V"`)
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CoreError::InvalidChord("빈 키 조합".to_string()));
        }

        // "Ctrl++" 와 "+" 는 Plus 키
        let (modifier_part, key_part) = if s == "+" {
            ("", "+")
        } else if let Some(prefix) = s.strip_suffix("++") {
            (prefix, "+")
        } else if s.ends_with('+') {
            return Err(CoreError::InvalidChord(format!("키 누락: {}", s)));
        } else {
            match s.rsplit_once('+') {
                Some((mods, key)) => (mods, key),
                None => ("", s),
            }
        };

        let mut modifiers = Modifiers::NONE;
        for token in modifier_part.split('+').map(str::trim).filter(|t| !t.is_empty()) {
            match token.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "meta" | "super" | "cmd" | "command" => modifiers.meta = true,
                _ => {
                    return Err(CoreError::InvalidChord(format!(
                        "알 수 없는 수식키: {}",
                        token
                    )))
                }
            }
        }

        Ok(Self {
            key: Key::parse_name(key_part.trim())?,
            modifiers,
        })
    }

    /// 단축키로 처리되지 않은 키 입력이 워크플로우에 전달될 때의 액션 ID
    pub fn action_id(&self) -> String {
        format!("key:{}", self)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.alt {
            f.write_str("Alt+")?;
        }
        if self.modifiers.shift {
            f.write_str("Shift+")?;
        }
        if self.modifiers.meta {
            f.write_str("Meta+")?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for KeyChord {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for KeyChord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for KeyChord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_modifiers_and_named_key() {
        let chord = KeyChord::parse("Ctrl+Shift+Right").unwrap();
        assert_eq!(chord.key, Key::Right);
        assert!(chord.modifiers.ctrl);
        assert!(chord.modifiers.shift);
        assert!(!chord.modifiers.alt);
        assert_eq!(chord.to_string(), "Ctrl+Shift+Right");
    }

    #[test]
    fn parse_plus_key() {
        let chord = KeyChord::parse("Ctrl++").unwrap();
        assert_eq!(chord.key, Key::Char('+'));
        assert_eq!(chord.to_string(), "Ctrl+Plus");
        assert_eq!(KeyChord::parse("Ctrl+Plus").unwrap(), chord);
    }

    #[test]
    fn symbols_and_names_are_equivalent() {
        assert_eq!(
            KeyChord::parse("Ctrl+,").unwrap(),
            KeyChord::parse("ctrl+comma").unwrap()
        );
    }

    #[test]
    fn letters_are_case_insensitive() {
        assert_eq!(
            KeyChord::parse("ctrl+q").unwrap(),
            KeyChord::parse("Ctrl+Q").unwrap()
        );
    }

    #[test]
    fn function_keys() {
        assert_eq!(KeyChord::parse("F1").unwrap().key, Key::F(1));
        assert_eq!(KeyChord::parse("Shift+F10").unwrap().to_string(), "Shift+F10");
        assert!(KeyChord::parse("F99").is_err());
    }

    #[test]
    fn rejects_malformed() {
        assert!(KeyChord::parse("").is_err());
        assert!(KeyChord::parse("Ctrl+").is_err());
        assert!(KeyChord::parse("Hyper+A").is_err());
        assert!(KeyChord::parse("Ctrl+Banana").is_err());
    }

    #[test]
    fn modifier_sets_distinguish_chords() {
        let space = KeyChord::plain(Key::Space);
        let ctrl_space = KeyChord::new(Key::Space, Modifiers::ctrl());
        assert_ne!(space, ctrl_space);
        assert_eq!(space.action_id(), "key:Space");
    }
}
