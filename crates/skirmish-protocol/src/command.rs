//! The command alphabet available to the acting player.

use std::fmt;

/// What the acting player asked for.
///
/// Only the first non-blank character of a line matters; the rest of the
/// line is ignored, so `attack!` is the same as `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `a`: a regular attack.
    Attack,
    /// `p`: a power move (limited uses, may miss).
    PowerMove,
    /// `s`: compose a line of chat for the opponent.
    Speak,
    /// `m`: toggle muting the opponent (asks for confirmation).
    Mute,
    /// Any other character. Has no effect.
    Unknown(char),
}

impl Command {
    /// Parses a command from one line of input.
    ///
    /// Returns `None` for a blank line.
    pub fn parse(line: &str) -> Option<Self> {
        let first = line.trim_start().chars().next()?;
        Some(match first {
            'a' => Self::Attack,
            'p' => Self::PowerMove,
            's' => Self::Speak,
            'm' => Self::Mute,
            other => Self::Unknown(other),
        })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attack => write!(f, "attack"),
            Self::PowerMove => write!(f, "powermove"),
            Self::Speak => write!(f, "speak"),
            Self::Mute => write!(f, "mute"),
            Self::Unknown(c) => write!(f, "unknown({c:?})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_letters() {
        assert_eq!(Command::parse("a"), Some(Command::Attack));
        assert_eq!(Command::parse("p"), Some(Command::PowerMove));
        assert_eq!(Command::parse("s"), Some(Command::Speak));
        assert_eq!(Command::parse("m"), Some(Command::Mute));
    }

    #[test]
    fn test_parse_ignores_rest_of_line() {
        assert_eq!(Command::parse("attack now"), Some(Command::Attack));
        assert_eq!(Command::parse("  p"), Some(Command::PowerMove));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(Command::parse("A"), Some(Command::Unknown('A')));
    }

    #[test]
    fn test_parse_blank_line_is_none() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("   "), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Command::PowerMove.to_string(), "powermove");
        assert_eq!(Command::Unknown('x').to_string(), "unknown('x')");
    }
}
