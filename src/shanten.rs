//! Shanten calculation for Riichi Mahjong.
//!
//! Shanten is the minimum number of tile exchanges needed to reach a
//! winning hand. A value of 0 means tenpai (one tile away) and -1 means
//! the hand is already complete. Three hand shapes are recognized: the
//! standard four sets plus a pair, chiitoitsu (seven pairs), and
//! kokushi musou (thirteen orphans).

use thiserror::Error;

use crate::tile::{TERMINALS_AND_HONORS, Tile, TileCounts};

/// Shanten value of a complete hand
pub const AGARI: i8 = -1;

/// Shanten value of a tenpai hand
pub const TENPAI: i8 = 0;

/// A hand that violates the solver preconditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HandError {
    #[error("hand has too many tiles: {0}")]
    TooManyTiles(u8),
    #[error("tile {tile} has {count} copies (max 4)")]
    InvalidTileCount { tile: Tile, count: u8 },
}

/// Calculate the minimum shanten across the enabled hand shapes.
///
/// The standard shape is always evaluated; chiitoitsu and kokushi are
/// included per the flags. The result is in `[-1, 8]`.
pub fn calculate_shanten(
    counts: &TileCounts,
    use_chiitoitsu: bool,
    use_kokushi: bool,
) -> Result<i8, HandError> {
    for tile in Tile::all() {
        let count = counts[tile.index()];
        if count > 4 {
            return Err(HandError::InvalidTileCount { tile, count });
        }
    }

    let mut shanten = calculate_standard_shanten(counts)?;
    if use_chiitoitsu {
        shanten = shanten.min(calculate_chiitoitsu_shanten(counts));
    }
    if use_kokushi {
        shanten = shanten.min(calculate_kokushi_shanten(counts));
    }
    Ok(shanten)
}

/// Shanten for the chiitoitsu (seven pairs) shape.
///
/// Seven distinct pair types are needed, so hands short on distinct
/// kinds pay for the missing kinds on top of the missing pairs.
pub fn calculate_chiitoitsu_shanten(counts: &TileCounts) -> i8 {
    let pairs = counts.iter().filter(|&&count| count >= 2).count() as i8;
    if pairs == 7 {
        return AGARI;
    }

    let kinds = counts.iter().filter(|&&count| count >= 1).count() as i8;
    6 - pairs + (7 - kinds).max(0)
}

/// Shanten for the kokushi musou (thirteen orphans) shape.
///
/// Counts the distinct terminal/honor types held and whether any of
/// them already forms the pair.
pub fn calculate_kokushi_shanten(counts: &TileCounts) -> i8 {
    let mut kinds = 0i8;
    let mut has_pair = false;
    for tile in TERMINALS_AND_HONORS {
        let count = counts[tile.index()];
        if count >= 1 {
            kinds += 1;
        }
        if count >= 2 {
            has_pair = true;
        }
    }
    13 - kinds - i8::from(has_pair)
}

/// Shanten for the standard shape (four sets plus a pair).
///
/// Runs an exhaustive depth-first decomposition of the suited tiles
/// into melds, partial sets, and pairs after a constant-time honor
/// pre-pass. Hands of fewer than 13 tiles are scored as if the missing
/// sets were already melded away.
pub fn calculate_standard_shanten(counts: &TileCounts) -> Result<i8, HandError> {
    StandardSearch::new(counts).calculate()
}

/// Search state for the standard-shape decomposition.
///
/// The tile array is a private workspace: every branch applies a
/// structural choice, recurses, and undoes it, so the array and the
/// counters are back to their entry values on every return.
struct StandardSearch {
    tiles: TileCounts,
    melds: u8,
    tatsu: u8,
    pairs: u8,
    jidahai: i8,
    four_copies: u32,
    isolated: u32,
    min_shanten: i8,
}

impl StandardSearch {
    fn new(counts: &TileCounts) -> Self {
        StandardSearch {
            tiles: *counts,
            melds: 0,
            tatsu: 0,
            pairs: 0,
            jidahai: 0,
            four_copies: 0,
            isolated: 0,
            min_shanten: 8,
        }
    }

    fn calculate(mut self) -> Result<i8, HandError> {
        let total: u8 = self.tiles.iter().sum();
        if total > 14 {
            return Err(HandError::TooManyTiles(total));
        }

        self.scan_honors(total);

        // melds that a short hand has already resolved outside the array
        self.melds += (14 - total) / 3;
        for index in 0..27 {
            if self.tiles[index] == 4 {
                self.four_copies |= 1 << index;
            }
        }
        self.explore(0);

        Ok(self.min_shanten)
    }

    /// Honor types only form triplets and pairs, so they are folded
    /// into the counters up front instead of being searched.
    fn scan_honors(&mut self, total: u8) {
        let mut four_copies = 0u32;
        let mut isolated = 0u32;

        for index in 27..34 {
            match self.tiles[index] {
                4 => {
                    self.melds += 1;
                    self.jidahai += 1;
                    four_copies |= 1 << (index - 27);
                    isolated |= 1 << (index - 27);
                }
                3 => self.melds += 1,
                2 => self.pairs += 1,
                1 => isolated |= 1 << (index - 27),
                _ => {}
            }
        }

        // a full hand keeps one slot for the head, which frees one
        // locked honor group
        if self.jidahai > 0 && total % 3 == 2 {
            self.jidahai -= 1;
        }

        if isolated != 0 {
            self.isolated |= 1 << 27;
            if (four_copies | isolated) == four_copies {
                self.four_copies |= 1 << 27;
            }
        }
    }

    fn explore(&mut self, mut depth: usize) {
        if self.min_shanten == AGARI {
            return;
        }

        while depth < 27 && self.tiles[depth] == 0 {
            depth += 1;
        }
        if depth >= 27 {
            self.score_and_update();
            return;
        }

        // rank within the suit, to keep +1/+2 lookahead inside it
        let mut rank = depth;
        if rank > 8 {
            rank -= 9;
        }
        if rank > 8 {
            rank -= 9;
        }

        match self.tiles[depth] {
            4 => {
                self.take_triplet(depth);
                if rank < 7 && self.tiles[depth + 2] > 0 {
                    if self.tiles[depth + 1] > 0 {
                        self.take_chi(depth);
                        self.explore(depth + 1);
                        self.undo_chi(depth);
                    }
                    self.take_kanchan(depth);
                    self.explore(depth + 1);
                    self.undo_kanchan(depth);
                }
                if rank < 8 && self.tiles[depth + 1] > 0 {
                    self.take_adjacent(depth);
                    self.explore(depth + 1);
                    self.undo_adjacent(depth);
                }
                self.mark_isolated(depth);
                self.explore(depth + 1);
                self.unmark_isolated(depth);
                self.undo_triplet(depth);

                self.take_pair(depth);
                if rank < 7 && self.tiles[depth + 2] > 0 {
                    if self.tiles[depth + 1] > 0 {
                        self.take_chi(depth);
                        // the leftover single may still extend; stay put
                        self.explore(depth);
                        self.undo_chi(depth);
                    }
                    self.take_kanchan(depth);
                    self.explore(depth + 1);
                    self.undo_kanchan(depth);
                }
                if rank < 8 && self.tiles[depth + 1] > 0 {
                    self.take_adjacent(depth);
                    self.explore(depth + 1);
                    self.undo_adjacent(depth);
                }
                self.undo_pair(depth);
            }
            3 => {
                self.take_triplet(depth);
                self.explore(depth + 1);
                self.undo_triplet(depth);

                self.take_pair(depth);
                if rank < 7 && self.tiles[depth + 1] > 0 && self.tiles[depth + 2] > 0 {
                    self.take_chi(depth);
                    self.explore(depth + 1);
                    self.undo_chi(depth);
                } else {
                    if rank < 7 && self.tiles[depth + 2] > 0 {
                        self.take_kanchan(depth);
                        self.explore(depth + 1);
                        self.undo_kanchan(depth);
                    }
                    if rank < 8 && self.tiles[depth + 1] > 0 {
                        self.take_adjacent(depth);
                        self.explore(depth + 1);
                        self.undo_adjacent(depth);
                    }
                }
                self.undo_pair(depth);

                if rank < 7 && self.tiles[depth + 1] >= 2 && self.tiles[depth + 2] >= 2 {
                    // two chis at once leave a single behind at this depth
                    self.take_chi(depth);
                    self.take_chi(depth);
                    self.explore(depth);
                    self.undo_chi(depth);
                    self.undo_chi(depth);
                }
            }
            2 => {
                self.take_pair(depth);
                self.explore(depth + 1);
                self.undo_pair(depth);

                if rank < 7 && self.tiles[depth + 1] > 0 && self.tiles[depth + 2] > 0 {
                    self.take_chi(depth);
                    self.explore(depth);
                    self.undo_chi(depth);
                }
            }
            1 => {
                // a clean single chi with nothing else to try lets the
                // scan jump ahead two positions
                if rank < 6
                    && self.tiles[depth + 1] == 1
                    && self.tiles[depth + 2] > 0
                    && self.tiles[depth + 3] != 4
                {
                    self.take_chi(depth);
                    self.explore(depth + 2);
                    self.undo_chi(depth);
                } else {
                    self.mark_isolated(depth);
                    self.explore(depth + 1);
                    self.unmark_isolated(depth);

                    if rank < 7 && self.tiles[depth + 2] > 0 {
                        if self.tiles[depth + 1] > 0 {
                            self.take_chi(depth);
                            self.explore(depth + 1);
                            self.undo_chi(depth);
                        }
                        self.take_kanchan(depth);
                        self.explore(depth + 1);
                        self.undo_kanchan(depth);
                    }
                    if rank < 8 && self.tiles[depth + 1] > 0 {
                        self.take_adjacent(depth);
                        self.explore(depth + 1);
                        self.undo_adjacent(depth);
                    }
                }
            }
            _ => {}
        }
    }

    /// Score the decomposition the scan just completed.
    fn score_and_update(&mut self) {
        let mut shanten = 8 - 2 * self.melds as i8 - self.tatsu as i8 - self.pairs as i8;

        let mut candidates = self.melds + self.tatsu;
        if self.pairs > 0 {
            // one pair is the head; extra pairs count as partial sets
            candidates += self.pairs - 1;
        } else if self.four_copies != 0
            && self.isolated != 0
            && (self.four_copies | self.isolated) == self.four_copies
        {
            // every pair candidate is locked inside a four-of-a-kind
            shanten += 1;
        }

        if candidates > 4 {
            shanten += (candidates - 4) as i8;
        }

        if shanten != AGARI && shanten < self.jidahai {
            shanten = self.jidahai;
        }

        self.min_shanten = self.min_shanten.min(shanten);
    }

    fn take_triplet(&mut self, depth: usize) {
        self.tiles[depth] -= 3;
        self.melds += 1;
    }

    fn undo_triplet(&mut self, depth: usize) {
        self.tiles[depth] += 3;
        self.melds -= 1;
    }

    fn take_pair(&mut self, depth: usize) {
        self.tiles[depth] -= 2;
        self.pairs += 1;
    }

    fn undo_pair(&mut self, depth: usize) {
        self.tiles[depth] += 2;
        self.pairs -= 1;
    }

    fn take_chi(&mut self, depth: usize) {
        self.tiles[depth] -= 1;
        self.tiles[depth + 1] -= 1;
        self.tiles[depth + 2] -= 1;
        self.melds += 1;
    }

    fn undo_chi(&mut self, depth: usize) {
        self.tiles[depth] += 1;
        self.tiles[depth + 1] += 1;
        self.tiles[depth + 2] += 1;
        self.melds -= 1;
    }

    fn take_adjacent(&mut self, depth: usize) {
        self.tiles[depth] -= 1;
        self.tiles[depth + 1] -= 1;
        self.tatsu += 1;
    }

    fn undo_adjacent(&mut self, depth: usize) {
        self.tiles[depth] += 1;
        self.tiles[depth + 1] += 1;
        self.tatsu -= 1;
    }

    fn take_kanchan(&mut self, depth: usize) {
        self.tiles[depth] -= 1;
        self.tiles[depth + 2] -= 1;
        self.tatsu += 1;
    }

    fn undo_kanchan(&mut self, depth: usize) {
        self.tiles[depth] += 1;
        self.tiles[depth + 2] += 1;
        self.tatsu -= 1;
    }

    fn mark_isolated(&mut self, depth: usize) {
        self.tiles[depth] -= 1;
        self.isolated |= 1 << depth;
    }

    fn unmark_isolated(&mut self, depth: usize) {
        self.tiles[depth] += 1;
        self.isolated &= !(1 << depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_hand_counts;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    fn shanten(hand: &str) -> i8 {
        calculate_shanten(&parse_hand_counts(hand, false), true, true).unwrap()
    }

    fn standard(hand: &str) -> i8 {
        calculate_standard_shanten(&parse_hand_counts(hand, false)).unwrap()
    }

    // ===== Complete Hand Tests =====

    #[test]
    fn complete_standard_hand() {
        assert_eq!(shanten("123m456p789s11122z"), -1);
    }

    #[test]
    fn complete_pinfu_shape() {
        assert_eq!(shanten("123m456m789m123p11s"), -1);
    }

    #[test]
    fn complete_chiitoitsu() {
        assert_eq!(shanten("1122m3344p5566s77z"), -1);
        assert_eq!(calculate_chiitoitsu_shanten(&parse_hand_counts("11223344556677m", false)), -1);
    }

    #[test]
    fn complete_kokushi() {
        assert_eq!(shanten("19m19p19s12345677z"), -1);
        assert_eq!(calculate_kokushi_shanten(&parse_hand_counts("19m19p19s12345677z", false)), -1);
    }

    #[test]
    fn kokushi_counts_one_pair_at_most() {
        // two duplicated orphan kinds still credit a single pair
        let counts = parse_hand_counts("1199m19p19s123456z", false);
        assert_eq!(calculate_kokushi_shanten(&counts), 0);
    }

    // ===== Partial Hand Tests =====

    #[test]
    fn pair_alone_is_complete() {
        // remaining sets are implied melded away
        let mut counts = [0u8; 34];
        counts[0] = 2;
        assert_eq!(calculate_shanten(&counts, true, true).unwrap(), -1);
    }

    #[test]
    fn triplet_alone_waits_for_the_head() {
        let mut counts = [0u8; 34];
        counts[0] = 3;
        assert_eq!(calculate_shanten(&counts, true, true).unwrap(), 0);
    }

    // ===== Tenpai and Iishanten Tests =====

    #[test]
    fn tenpai_standard() {
        assert_eq!(shanten("123m456p789s1112z"), 0);
    }

    #[test]
    fn tenpai_chiitoitsu() {
        assert_eq!(shanten("1122m3344p5566s7z"), 0);
    }

    #[test]
    fn six_pairs_and_two_singles() {
        assert_eq!(shanten("11223344556678m"), 0);
    }

    #[test]
    fn tenpai_kokushi_thirteen_sided() {
        assert_eq!(shanten("19m19p19s1234567z"), 0);
    }

    #[test]
    fn iishanten_standard() {
        assert_eq!(shanten("123m456p789s112z"), 1);
    }

    #[test]
    fn iishanten_chiitoitsu() {
        assert_eq!(shanten("1122m3344p5566s"), 1);
    }

    #[test]
    fn fourteen_singles_in_a_row() {
        // 1m-9m plus 1p-5p: four chis and a tatsu, no head
        let hand = "123456789m12345p";
        assert_eq!(standard(hand), 0);
        assert_eq!(shanten(hand), 0);
    }

    #[test]
    fn scattered_hand() {
        assert!(shanten("1379m1379p1379s1z") >= 4);
    }

    // ===== Regular Solver Detail Tests =====

    #[test]
    fn sequences_then_leftover_triplet() {
        // 234m 345m 345m 666m waiting on the 1p head
        assert_eq!(shanten("233344455666m1p"), 0);
    }

    #[test]
    fn chiitoitsu_ignores_extra_copies() {
        // the 1m quad still counts as one pair kind
        assert_eq!(shanten("1111m2233p4455s66z"), 1);
    }

    #[test]
    fn honor_quad_forces_a_swap() {
        // EEEE cannot supply both a set and the head
        assert_eq!(standard("123m456m789m1111z"), 1);
    }

    #[test]
    fn honor_quad_in_full_hand_is_tenpai() {
        assert_eq!(standard("123m456m789m5s1111z"), 0);
    }

    #[test]
    fn same_depth_reentry_finds_nested_chis() {
        // 223344m decomposes as two chis only by re-examining depth 1
        assert_eq!(standard("223344m567p789s11z"), -1);
    }

    // ===== Facade Flag Tests =====

    #[test]
    fn flags_disable_shapes() {
        let counts = parse_hand_counts("1122m3344p5566s77z", false);
        assert_eq!(calculate_shanten(&counts, true, true).unwrap(), -1);
        // without chiitoitsu the same tiles are far from a standard hand
        assert_eq!(calculate_shanten(&counts, false, true).unwrap(), 3);

        // disabling kokushi leaves chiitoitsu as the best shape here
        let kokushi = parse_hand_counts("19m19p19s12345677z", false);
        assert_eq!(calculate_shanten(&kokushi, true, true).unwrap(), -1);
        assert_eq!(calculate_shanten(&kokushi, true, false).unwrap(), 5);
    }

    // ===== Error Tests =====

    #[test]
    fn rejects_too_many_tiles() {
        let counts = parse_hand_counts("111222333444m555p", false);
        assert_eq!(
            calculate_shanten(&counts, true, true),
            Err(HandError::TooManyTiles(15))
        );
        assert_eq!(
            calculate_standard_shanten(&counts),
            Err(HandError::TooManyTiles(15))
        );
    }

    #[test]
    fn rejects_impossible_counts() {
        let mut counts = [0u8; 34];
        counts[5] = 5;
        let result = calculate_shanten(&counts, true, true);
        assert_eq!(
            result,
            Err(HandError::InvalidTileCount {
                tile: Tile::from_index(5).unwrap(),
                count: 5
            })
        );
    }

    #[test]
    fn error_messages_name_the_problem() {
        assert_eq!(
            HandError::TooManyTiles(15).to_string(),
            "hand has too many tiles: 15"
        );
        let error = HandError::InvalidTileCount {
            tile: Tile::from_index(5).unwrap(),
            count: 5,
        };
        assert_eq!(error.to_string(), "tile 6m has 5 copies (max 4)");
    }

    // ===== Property Tests =====

    fn random_hand(rng: &mut StdRng, size: usize) -> TileCounts {
        let mut wall: Vec<u8> = (0..136).collect();
        wall.shuffle(rng);
        let mut counts = [0u8; 34];
        for &id in wall.iter().take(size) {
            counts[(id / 4) as usize] += 1;
        }
        counts
    }

    #[test]
    fn shanten_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..300 {
            let size = rng.random_range(1..=14);
            let counts = random_hand(&mut rng, size);
            let shanten = calculate_shanten(&counts, true, true).unwrap();
            assert!((-1..=8).contains(&shanten), "out of range: {shanten}");
        }
    }

    #[test]
    fn facade_is_minimum_of_shapes() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let counts = random_hand(&mut rng, 13);
            let expected = calculate_standard_shanten(&counts)
                .unwrap()
                .min(calculate_chiitoitsu_shanten(&counts))
                .min(calculate_kokushi_shanten(&counts));
            assert_eq!(calculate_shanten(&counts, true, true).unwrap(), expected);
        }
    }

    #[test]
    fn single_tile_moves_shanten_by_at_most_one() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..100 {
            let counts = random_hand(&mut rng, 13);
            let before = calculate_shanten(&counts, true, true).unwrap();
            for tile in Tile::all() {
                if counts[tile.index()] == 4 {
                    continue;
                }
                let mut grown = counts;
                grown[tile.index()] += 1;
                let after = calculate_shanten(&grown, true, true).unwrap();
                assert!(
                    (before - after).abs() <= 1,
                    "adding {tile} jumped shanten {before} -> {after}"
                );
            }
        }
    }

    #[test]
    fn solver_does_not_mutate_the_hand() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let counts = random_hand(&mut rng, 14);
            let snapshot = counts;
            let _ = calculate_shanten(&counts, true, true).unwrap();
            assert_eq!(counts, snapshot);
        }
    }
}
