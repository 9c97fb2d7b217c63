//! Hand structure helpers: the called-meld record, set classification,
//! and isolation analysis over 34-format counts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parse::hand_to_string;
use crate::tile::{Tile, TileCounts, TileId};

/// Kind of a declared meld
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeldType {
    /// Sequence of three consecutive suited tiles, called from the left
    Chi,
    /// Triplet of identical tiles
    Pon,
    /// Quad of identical tiles
    Kan,
    /// Added kan — a pon extended with its fourth tile
    Shouminkan,
    /// North wind extraction in three-player rules
    Nuki,
}

/// A declared meld (called or concealed tile group).
///
/// The shanten solvers never inspect melds; callers subtract a meld's
/// tiles from the hand before building the 34-format counts. The record
/// exists so consumers can carry called tiles alongside the hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    pub meld_type: MeldType,
    /// The meld's physical tiles in 136-format
    pub tiles: Vec<TileId>,
    /// True for melds called from another player, false for closed kan
    pub opened: bool,
    /// The discarded tile that was claimed to form this meld
    pub called_tile: Option<TileId>,
    /// Seat of the player who declared the meld
    pub who: Option<u8>,
    /// Seat of the player whose discard was claimed
    pub from_who: Option<u8>,
}

impl Meld {
    /// Create an open meld with no call bookkeeping
    pub fn new(meld_type: MeldType, tiles: Vec<TileId>) -> Self {
        Meld {
            meld_type,
            tiles,
            opened: true,
            called_tile: None,
            who: None,
            from_who: None,
        }
    }

    /// Create a concealed meld (closed kan)
    pub fn closed(meld_type: MeldType, tiles: Vec<TileId>) -> Self {
        Meld {
            opened: false,
            ..Meld::new(meld_type, tiles)
        }
    }

    /// The meld's tiles as 34-format types
    pub fn tiles_34(&self) -> Vec<Tile> {
        self.tiles.iter().map(|tile| tile.tile()).collect()
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.meld_type {
            MeldType::Chi => "chi",
            MeldType::Pon => "pon",
            MeldType::Kan => "kan",
            MeldType::Shouminkan => "shouminkan",
            MeldType::Nuki => "nuki",
        };
        write!(f, "{}: {}", kind, hand_to_string(&self.tiles, false))
    }
}

/// Does a sorted set of 34-format tiles form a chi?
pub fn is_chi(set: &[Tile]) -> bool {
    if set.len() != 3 {
        return false;
    }
    set[0].index() + 1 == set[1].index() && set[1].index() + 1 == set[2].index()
}

/// Does a set of 34-format tiles form a pon?
pub fn is_pon(set: &[Tile]) -> bool {
    set.len() == 3 && set[0] == set[1] && set[1] == set[2]
}

/// Does a set of 34-format tiles form a kan?
pub fn is_kan(set: &[Tile]) -> bool {
    set.len() == 4
}

/// Does a set form a pon or a kan?
pub fn is_pon_or_kan(set: &[Tile]) -> bool {
    is_kan(set) || is_pon(set)
}

/// Does a set of 34-format tiles form a pair?
pub fn is_pair(set: &[Tile]) -> bool {
    set.len() == 2
}

/// Does any set in the decomposition hold a pon or kan of `tile`?
pub fn has_pon_or_kan_of(sets: &[Vec<Tile>], tile: Tile) -> bool {
    sets.iter()
        .any(|set| set.first() == Some(&tile) && is_pon_or_kan(set))
}

/// Does a set contain a terminal tile?
pub fn contains_terminals(set: &[Tile]) -> bool {
    set.iter().any(|tile| tile.is_terminal())
}

/// Classify the sets of a decomposition by suit.
///
/// Returns a bitmask (1 = sou, 2 = pin, 4 = man) and the number of
/// honor sets.
pub fn classify_hand_suits(sets: &[Vec<Tile>]) -> (u8, usize) {
    let mut suit_mask = 0u8;
    let mut honor_count = 0usize;
    for set in sets {
        let Some(&first) = set.first() else { continue };
        if first.is_honor() {
            honor_count += 1;
        } else if first.is_sou() {
            suit_mask |= 1;
        } else if first.is_pin() {
            suit_mask |= 2;
        } else {
            suit_mask |= 4;
        }
    }
    (suit_mask, honor_count)
}

/// Per-suit tile totals for a hand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuitCounts {
    pub man: u8,
    pub pin: u8,
    pub sou: u8,
    pub honor: u8,
}

/// Count the tiles of a hand per suit
pub fn count_tiles_by_suits(counts: &TileCounts) -> SuitCounts {
    let mut totals = SuitCounts::default();
    for tile in Tile::all() {
        let count = counts[tile.index()];
        if tile.is_man() {
            totals.man += count;
        } else if tile.is_pin() {
            totals.pin += count;
        } else if tile.is_sou() {
            totals.sou += count;
        } else {
            totals.honor += count;
        }
    }
    totals
}

/// Find tile types that are isolated from the hand.
///
/// A suited type is isolated when the hand holds no copy of it and no
/// copy of its in-suit neighbors at ±1. Honor types are isolated
/// whenever the hand holds none of them. Neighbor checks never cross a
/// suit boundary.
pub fn find_isolated_tiles(counts: &TileCounts) -> Vec<Tile> {
    let mut isolated = Vec::new();

    for suit_start in [0usize, 9, 18] {
        for rank in 0..9 {
            let index = suit_start + rank;
            if counts[index] != 0 {
                continue;
            }
            let left_empty = rank == 0 || counts[index - 1] == 0;
            let right_empty = rank == 8 || counts[index + 1] == 0;
            if left_empty && right_empty {
                isolated.push(Tile::new(index as u8));
            }
        }
    }

    for index in 27..34 {
        if counts[index] == 0 {
            isolated.push(Tile::new(index as u8));
        }
    }

    isolated
}

/// Check that a tile has no support within ±2 in its suit.
///
/// At most one copy of the tile itself (the one being considered) may
/// be present. Honors only need the copy check.
pub fn is_tile_strictly_isolated(counts: &TileCounts, tile: Tile) -> bool {
    if counts[tile.index()] > 1 {
        return false;
    }
    if tile.is_honor() {
        return true;
    }

    let rank = tile.simplify() as i32;
    let index = tile.index() as i32;
    for delta in [-2i32, -1, 1, 2] {
        let neighbor_rank = rank + delta;
        if !(0..9).contains(&neighbor_rank) {
            continue;
        }
        if counts[(index + delta) as usize] != 0 {
            return false;
        }
    }
    true
}
