use serde::{Deserialize, Serialize};
use std::fmt;

/// Hand in 34-format: one count per tile type, each entry in 0..=4.
pub type TileCounts = [u8; 34];

/// A tile type in 34-format.
///
/// Indices 0-8 are man 1-9, 9-17 are pin 1-9, 18-26 are sou 1-9,
/// 27-30 are the winds (East, South, West, North) and 31-33 are the
/// dragons (Haku, Hatsu, Chun). The index does not distinguish a red
/// five from a normal five; that identity lives in [`TileId`] only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tile(u8);

/// East wind (1z)
pub const EAST: Tile = Tile(27);
/// South wind (2z)
pub const SOUTH: Tile = Tile(28);
/// West wind (3z)
pub const WEST: Tile = Tile(29);
/// North wind (4z)
pub const NORTH: Tile = Tile(30);
/// White dragon (5z)
pub const HAKU: Tile = Tile(31);
/// Green dragon (6z)
pub const HATSU: Tile = Tile(32);
/// Red dragon (7z)
pub const CHUN: Tile = Tile(33);

/// The 1 and 9 of each suit
pub const TERMINALS: [Tile; 6] = [Tile(0), Tile(8), Tile(9), Tile(17), Tile(18), Tile(26)];

/// The four wind tiles
pub const WINDS: [Tile; 4] = [EAST, SOUTH, WEST, NORTH];

/// The three dragon tiles
pub const DRAGONS: [Tile; 3] = [HAKU, HATSU, CHUN];

/// All 13 tile types used by kokushi musou (terminals and honors)
pub const TERMINALS_AND_HONORS: [Tile; 13] = [
    Tile(0),
    Tile(8),
    Tile(9),
    Tile(17),
    Tile(18),
    Tile(26),
    EAST,
    SOUTH,
    WEST,
    NORTH,
    HAKU,
    HATSU,
    CHUN,
];

impl Tile {
    pub(crate) const fn new(index: u8) -> Self {
        debug_assert!(index < 34);
        Tile(index)
    }

    /// Create a tile type from its 34-format index, if in range
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 34 { Some(Tile(index)) } else { None }
    }

    /// The 34-format index, usable directly into a [`TileCounts`] array
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all 34 tile types in index order
    pub fn all() -> impl Iterator<Item = Tile> {
        (0..34).map(Tile)
    }

    /// Is this a man (characters) tile?
    pub const fn is_man(self) -> bool {
        self.0 <= 8
    }

    /// Is this a pin (circles) tile?
    pub const fn is_pin(self) -> bool {
        self.0 > 8 && self.0 <= 17
    }

    /// Is this a sou (bamboo) tile?
    pub const fn is_sou(self) -> bool {
        self.0 > 17 && self.0 <= 26
    }

    /// Is this an honor tile (wind or dragon)?
    pub const fn is_honor(self) -> bool {
        self.0 >= 27
    }

    /// Is this a terminal (1 or 9 of a suit, not honors)?
    pub const fn is_terminal(self) -> bool {
        self.0 < 27 && (self.0 % 9 == 0 || self.0 % 9 == 8)
    }

    /// Is this a terminal or an honor?
    pub const fn is_terminal_or_honor(self) -> bool {
        self.is_terminal() || self.is_honor()
    }

    /// Is this a wind tile?
    pub const fn is_wind(self) -> bool {
        self.0 >= 27 && self.0 <= 30
    }

    /// Is this a dragon (sangenpai)?
    pub const fn is_dragon(self) -> bool {
        self.0 >= 31
    }

    /// Rank within the suit as 0-8. Callers must not pass honors.
    pub const fn simplify(self) -> u8 {
        debug_assert!(self.0 < 27);
        self.0 % 9
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (rank, letter) = if self.0 < 27 {
            (self.0 % 9 + 1, [b'm', b'p', b's'][(self.0 / 9) as usize])
        } else {
            (self.0 - 27 + 1, b'z')
        };
        write!(f, "{}{}", rank, letter as char)
    }
}

/// A physical tile in 136-format.
///
/// Each of the 34 tile types has four copies; ids `4t..4t+3` are the
/// copies of type `t`. The ids 16, 52 and 88 are the red fives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(u8);

/// Red five of man (0m)
pub const FIVE_RED_MAN: TileId = TileId(16);
/// Red five of pin (0p)
pub const FIVE_RED_PIN: TileId = TileId(52);
/// Red five of sou (0s)
pub const FIVE_RED_SOU: TileId = TileId(88);

/// The three red five tiles
pub const AKA_DORAS: [TileId; 3] = [FIVE_RED_MAN, FIVE_RED_PIN, FIVE_RED_SOU];

impl TileId {
    pub(crate) const fn new(id: u8) -> Self {
        debug_assert!(id < 136);
        TileId(id)
    }

    /// Create a physical tile from its 136-format id, if in range
    pub const fn from_id(id: u8) -> Option<Self> {
        if id < 136 { Some(TileId(id)) } else { None }
    }

    /// The 136-format id
    pub const fn id(self) -> usize {
        self.0 as usize
    }

    /// The tile type this physical tile belongs to
    pub const fn tile(self) -> Tile {
        Tile(self.0 / 4)
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.tile().fmt(f)
    }
}

/// A single discard record.
///
/// Not used by the solvers; provided for consumers that track discards
/// with tsumogiri (drawn-and-discarded) information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discard {
    pub tile: TileId,
    /// True if the tile was discarded immediately after drawing it
    pub is_tsumogiri: bool,
}
