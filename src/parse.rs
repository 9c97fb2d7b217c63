//! Conversions between the three tile encodings.
//!
//! Hands move between mpsz-notation strings (`"123m456p789s11z"`),
//! 34-format count arrays, and 136-format physical tile ids. Parsing is
//! best-effort: characters that do not form a valid tile are skipped, and
//! no parse ever fails.

use crate::tile::{
    FIVE_RED_MAN, FIVE_RED_PIN, FIVE_RED_SOU, Tile, TileCounts, TileId,
};

/// Convert 136-format tiles to a 34-format count array
pub fn to_counts(tiles: &[TileId]) -> TileCounts {
    let mut counts = [0u8; 34];
    for tile in tiles {
        counts[tile.tile().index()] += 1;
    }
    counts
}

/// Convert a 34-format count array to 136-format tiles.
///
/// For each type with count `n`, the first `n` physical ids are emitted
/// (count 2 of 1m yields ids 0 and 1).
pub fn to_ids(counts: &TileCounts) -> Vec<TileId> {
    let mut tiles = Vec::with_capacity(counts.iter().map(|&c| c as usize).sum());
    for (index, &count) in counts.iter().enumerate() {
        let base = (index * 4) as u8;
        for offset in 0..count {
            tiles.push(TileId::new(base + offset));
        }
    }
    tiles
}

/// Find the first physical tile of the given type present in `tiles`.
///
/// A tile type maps to four candidate ids; the smallest one that appears
/// in `tiles` is returned.
pub fn find_tile_in_ids(tile: Tile, tiles: &[TileId]) -> Option<TileId> {
    let base = (tile.index() * 4) as u8;
    (base..base + 4)
        .map(TileId::new)
        .find(|candidate| tiles.contains(candidate))
}

/// Render 136-format tiles as an mpsz-notation string.
///
/// Tiles are sorted and grouped into suits in m-p-s-z order. When
/// `print_aka_dora` is true the red fives are rendered as `0`,
/// otherwise as `5`.
pub fn hand_to_string(tiles: &[TileId], print_aka_dora: bool) -> String {
    let mut sorted: Vec<TileId> = tiles.to_vec();
    sorted.sort();

    let mut result = String::new();
    let groups: [(usize, usize, char, Option<TileId>); 4] = [
        (0, 36, 'm', Some(FIVE_RED_MAN)),
        (36, 72, 'p', Some(FIVE_RED_PIN)),
        (72, 108, 's', Some(FIVE_RED_SOU)),
        (108, 136, 'z', None),
    ];

    for (start, end, letter, red) in groups {
        let mut any = false;
        for &tile in sorted.iter().filter(|t| (start..end).contains(&t.id())) {
            any = true;
            if print_aka_dora && Some(tile) == red {
                result.push('0');
            } else {
                let rank = (tile.id() - start) / 4 + 1;
                result.push(char::from_digit(rank as u32, 10).unwrap());
            }
        }
        if any {
            result.push(letter);
        }
    }

    result
}

/// Parse an mpsz-notation string into 136-format tiles.
///
/// Digit runs are terminated by a suit letter: `m`, `p`, `s`, or
/// `z`/`h` for honors. Multiple runs of the same suit may appear and
/// are concatenated; the output is always emitted in m-p-s-z order.
/// When `has_aka_dora` is true, `0` and `r` in a suited run produce the
/// red five, and a plain `5` avoids the red id. Unrecognized characters
/// are skipped.
pub fn parse_hand(input: &str, has_aka_dora: bool) -> Vec<TileId> {
    let mut man = String::new();
    let mut pin = String::new();
    let mut sou = String::new();
    let mut honors = String::new();

    let mut run = String::new();
    for ch in input.chars() {
        match ch {
            'm' => man.push_str(&std::mem::take(&mut run)),
            'p' => pin.push_str(&std::mem::take(&mut run)),
            's' => sou.push_str(&std::mem::take(&mut run)),
            'z' | 'h' => honors.push_str(&std::mem::take(&mut run)),
            _ => run.push(ch),
        }
    }

    parse_suit_runs(&man, &pin, &sou, &honors, has_aka_dora)
}

/// Parse an mpsz-notation string straight into a 34-format count array
pub fn parse_hand_counts(input: &str, has_aka_dora: bool) -> TileCounts {
    to_counts(&parse_hand(input, has_aka_dora))
}

/// Parse per-suit digit strings into 136-format tiles.
///
/// Each string holds the ranks for one suit; the honor string uses 1-7
/// for East through Chun. Output is emitted in man, pin, sou, honors
/// order. Aka handling matches [`parse_hand`].
pub fn parse_suit_runs(
    man: &str,
    pin: &str,
    sou: &str,
    honors: &str,
    has_aka_dora: bool,
) -> Vec<TileId> {
    let mut tiles = Vec::new();
    let mut emitted = [0u8; 136];

    let red = |id: TileId| if has_aka_dora { Some(id) } else { None };
    split_run(man, 0, red(FIVE_RED_MAN), &mut tiles, &mut emitted);
    split_run(pin, 36, red(FIVE_RED_PIN), &mut tiles, &mut emitted);
    split_run(sou, 72, red(FIVE_RED_SOU), &mut tiles, &mut emitted);
    split_run(honors, 108, None, &mut tiles, &mut emitted);
    tiles
}

/// Parse one suit's digit run. `emitted` tracks how many copies of each
/// base id have been produced so far, so successive equal digits get
/// successive physical ids.
fn split_run(
    run: &str,
    offset: u8,
    red: Option<TileId>,
    tiles: &mut Vec<TileId>,
    emitted: &mut [u8; 136],
) {
    for ch in run.chars() {
        // explicit aka markers produce exactly the red id
        if ch == '0' || ch == 'r' {
            if let Some(red) = red {
                tiles.push(red);
                continue;
            }
        }

        let Some(digit) = ch.to_digit(10) else {
            continue;
        };
        // without aka support, treat 0 as a plain five
        let rank = if digit == 0 { 5 } else { digit as u8 };
        if rank > 9 || (offset == 108 && rank > 7) {
            continue;
        }

        let mut base = offset + (rank - 1) * 4;
        // a numeric 5 must not claim the aka slot
        if red.map(|r| r.id() as u8) == Some(base) {
            base += 1;
        }

        let id = base + emitted[base as usize];
        emitted[base as usize] += 1;
        if let Some(tile) = TileId::from_id(id) {
            tiles.push(tile);
        }
    }
}
