use core::fmt;
use serde::{Deserialize, Serialize};

/// The single trump suit followed by the three plain suits, in iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Trump = 0,
    A = 1,
    B = 2,
    C = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Trump, Suit::A, Suit::B, Suit::C];
    pub const PLAIN: [Suit; 3] = [Suit::A, Suit::B, Suit::C];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Trump),
            1 => Some(Suit::A),
            2 => Some(Suit::B),
            3 => Some(Suit::C),
            _ => None,
        }
    }

    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'T' | 't' | '_' => Some(Suit::Trump),
            'A' | 'a' => Some(Suit::A),
            'B' | 'b' => Some(Suit::B),
            'C' | 'c' => Some(Suit::C),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_trump(self) -> bool {
        matches!(self, Suit::Trump)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Trump => "T",
            Suit::A => "A",
            Suit::B => "B",
            Suit::C => "C",
        };
        f.write_str(symbol)
    }
}
