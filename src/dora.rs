//! Aka dora and dora-indicator handling.

use std::collections::HashMap;

use crate::tile::{AKA_DORAS, EAST, HAKU, Tile, TileCounts, TileId};

/// Check if a physical tile is an aka dora (red five)
pub fn is_aka_dora(tile: TileId, aka_enabled: bool) -> bool {
    aka_enabled && AKA_DORAS.contains(&tile)
}

/// Map a dora indicator to the tile it makes dora.
///
/// Suited indicators point to the next rank, wrapping 9 back to 1
/// within the same suit. Wind indicators cycle East through North and
/// dragon indicators cycle Haku, Hatsu, Chun.
pub fn indicator_to_dora(indicator: Tile) -> Tile {
    let index = indicator.index() as u8;
    if !indicator.is_honor() {
        let suit_base = index / 9 * 9;
        Tile::new(suit_base + (index - suit_base + 1) % 9)
    } else if indicator.is_wind() {
        let east = EAST.index() as u8;
        Tile::new(east + (index - east + 1) % 4)
    } else {
        let haku = HAKU.index() as u8;
        Tile::new(haku + (index - haku + 1) % 3)
    }
}

/// Is this tile a dora indicator that points to a terminal?
///
/// Rank 8 indicators make the 9 dora, and rank 9 indicators wrap
/// around to make the 1 dora.
pub fn is_dora_indicator_for_terminal(tile: Tile) -> bool {
    !tile.is_honor() && tile.simplify() >= 7
}

/// Build a map from tile type to dora count for the given indicators.
///
/// Indicators that point to the same dora accumulate.
pub fn build_dora_count_map(indicators: &[TileId]) -> HashMap<Tile, u8> {
    let mut map = HashMap::new();
    for indicator in indicators {
        let dora = indicator_to_dora(indicator.tile());
        *map.entry(dora).or_insert(0) += 1;
    }
    map
}

/// Count total dora in a hand using a precomputed dora count map
pub fn count_dora_for_hand(counts: &TileCounts, dora_map: &HashMap<Tile, u8>) -> u32 {
    dora_map
        .iter()
        .map(|(tile, &dora)| counts[tile.index()] as u32 * dora as u32)
        .sum()
}

/// Count the dora carried by a single physical tile.
///
/// Each indicator pointing at the tile's type counts once; with
/// `add_aka_dora` the red fives add one more.
pub fn plus_dora(tile: TileId, indicators: &[TileId], add_aka_dora: bool) -> u32 {
    let mut dora = indicators
        .iter()
        .filter(|indicator| indicator_to_dora(indicator.tile()) == tile.tile())
        .count() as u32;
    if add_aka_dora && is_aka_dora(tile, true) {
        dora += 1;
    }
    dora
}
