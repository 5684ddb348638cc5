//! Zobrist keys, generated at compile time.

use crate::castle_rights::CastleRights;
use crate::piece::Piece;
use crate::square::Square;

const SEED: u64 = 0x5AB2_E0C4_7F1D_9A63;

const PIECE_SQUARE_BASE: usize = 0;
const SIDE_TO_MOVE_INDEX: usize = 12 * 64;
const CASTLING_BASE: usize = SIDE_TO_MOVE_INDEX + 1;
const EN_PASSANT_BASE: usize = CASTLING_BASE + 16;
const KEY_COUNT: usize = EN_PASSANT_BASE + 8;

/// SplitMix64 step: returns the output and the next state.
const fn splitmix64(state: u64) -> (u64, u64) {
    let next = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = next;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (z ^ (z >> 31), next)
}

/// Layout: 768 piece-square keys, side to move, 16 castling sets, 8 en passant files.
static KEYS: [u64; KEY_COUNT] = {
    let mut keys = [0u64; KEY_COUNT];
    let mut state = SEED;
    let mut i = 0;
    while i < KEY_COUNT {
        let (key, next) = splitmix64(state);
        keys[i] = key;
        state = next;
        i += 1;
    }
    keys
};

#[inline]
pub(crate) fn piece_square(piece: Piece, sq: Square) -> u64 {
    KEYS[PIECE_SQUARE_BASE + piece.index() * 64 + sq.index()]
}

#[inline]
pub(crate) fn side_to_move() -> u64 {
    KEYS[SIDE_TO_MOVE_INDEX]
}

#[inline]
pub(crate) fn castling(rights: CastleRights) -> u64 {
    KEYS[CASTLING_BASE + rights.bits() as usize]
}

#[inline]
pub(crate) fn en_passant(file: u8) -> u64 {
    KEYS[EN_PASSANT_BASE + file as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_distinct_and_nonzero() {
        let mut sorted = KEYS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), KEY_COUNT);
        assert!(KEYS.iter().all(|&k| k != 0));
    }
}
