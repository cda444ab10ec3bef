//! Opponent and side selection from the CLOP seed.
//!
//! Seeds come in pairs `(2k, 2k + 1)`. Both seeds of a pair select the same
//! opponent; the even seed puts the tuned engine on the first side and the
//! odd seed on the second. With `Replications = 2` in the CLOP file this plays
//! every opponent once from each side.

/// Index into the opponent pool selected by `seed`.
///
/// `pool_size` must be non-zero.
pub fn opponent_index(seed: u64, pool_size: usize) -> usize {
    debug_assert!(pool_size > 0, "opponent pool must not be empty");
    ((seed >> 1) % pool_size as u64) as usize
}

/// Whether the tuned engine plays as the first `-engine` for `seed`.
pub fn tuned_side_is_first(seed: u64) -> bool {
    seed % 2 == 0
}

/// The opponent and side chosen for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
    /// Index of the opponent in the configured pool.
    pub opponent_index: usize,
    /// `true` if the tuned engine is passed first to cutechess-cli.
    pub tuned_side_is_first: bool,
}

impl Pairing {
    /// Plans the game for `seed` against a pool of `pool_size` opponents.
    pub fn for_seed(seed: u64, pool_size: usize) -> Self {
        Self {
            opponent_index: opponent_index(seed, pool_size),
            tuned_side_is_first: tuned_side_is_first(seed),
        }
    }
}
