use core::fmt;
use serde::{Deserialize, Serialize};

/// Seat around the table; play proceeds in ascending index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

/// North/South (seats 0 and 2) form team 0, East/West team 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Team {
    NorthSouth = 0,
    EastWest = 1,
}

impl Seat {
    pub const LOOP: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::North),
            1 => Some(Seat::East),
            2 => Some(Seat::South),
            3 => Some(Seat::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The seat `offset` places after this one.
    pub const fn advance(self, offset: usize) -> Seat {
        match Self::from_index((self.index() + offset) % 4) {
            Some(seat) => seat,
            None => self,
        }
    }

    pub const fn partner(self) -> Seat {
        self.advance(2)
    }

    pub const fn opponents(self) -> [Seat; 2] {
        [self.advance(1), self.advance(3)]
    }

    pub const fn team(self) -> Team {
        match self {
            Seat::North | Seat::South => Team::NorthSouth,
            Seat::East | Seat::West => Team::EastWest,
        }
    }
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::NorthSouth, Team::EastWest];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn other(self) -> Team {
        match self {
            Team::NorthSouth => Team::EastWest,
            Team::EastWest => Team::NorthSouth,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seat::North => "North",
            Seat::East => "East",
            Seat::South => "South",
            Seat::West => "West",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Team::NorthSouth => "North/South",
            Team::EastWest => "East/West",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::{Seat, Team};

    #[test]
    fn advance_wraps_around() {
        assert_eq!(Seat::West.advance(1), Seat::North);
        assert_eq!(Seat::South.advance(3), Seat::East);
    }

    #[test]
    fn partners_share_a_team() {
        assert_eq!(Seat::North.partner(), Seat::South);
        assert_eq!(Seat::East.partner(), Seat::West);
        assert_eq!(Seat::North.team(), Team::NorthSouth);
        assert_eq!(Seat::West.team(), Team::EastWest);
    }

    #[test]
    fn opponents_are_the_other_team() {
        assert_eq!(Seat::North.opponents(), [Seat::East, Seat::West]);
        assert_eq!(Seat::East.opponents(), [Seat::South, Seat::North]);
        for seat in Seat::LOOP {
            for opponent in seat.opponents() {
                assert_eq!(opponent.team(), seat.team().other());
            }
        }
    }

    #[test]
    fn index_roundtrip() {
        for (i, seat) in Seat::LOOP.iter().enumerate() {
            assert_eq!(Seat::from_index(i), Some(*seat));
            assert_eq!(seat.index(), i);
        }
    }
}
