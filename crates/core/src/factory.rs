//! Factory module - seeded piece source over a mode's allowed pool
//!
//! Each pool entry maps to a constructor function. The factory is built once
//! per session from the mode's declared pool and draws kinds and colors
//! uniformly from a seeded [`StdRng`], so a seed fully determines the piece
//! sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::piece::Piece;
use crate::types::{ColorId, PieceKind, PoolKind, SpecialKind, PALETTE_LEN};

/// Builds a piece at its spawn position for a board of the given width.
pub type Constructor = fn(usize, ColorId) -> Piece;

/// Constructor registered for a pool entry.
pub fn constructor_for(kind: PoolKind) -> Constructor {
    match kind {
        PoolKind::Standard(PieceKind::I) => |w, c| Piece::standard(PieceKind::I, c, w),
        PoolKind::Standard(PieceKind::O) => |w, c| Piece::standard(PieceKind::O, c, w),
        PoolKind::Standard(PieceKind::T) => |w, c| Piece::standard(PieceKind::T, c, w),
        PoolKind::Standard(PieceKind::S) => |w, c| Piece::standard(PieceKind::S, c, w),
        PoolKind::Standard(PieceKind::Z) => |w, c| Piece::standard(PieceKind::Z, c, w),
        PoolKind::Standard(PieceKind::J) => |w, c| Piece::standard(PieceKind::J, c, w),
        PoolKind::Standard(PieceKind::L) => |w, c| Piece::standard(PieceKind::L, c, w),
        PoolKind::Special(SpecialKind::Rocket) => |w, _| Piece::special(SpecialKind::Rocket, w),
    }
}

fn standard_pool() -> Vec<PoolKind> {
    PieceKind::ALL.iter().copied().map(PoolKind::Standard).collect()
}

/// Random piece source
#[derive(Debug, Clone)]
pub struct PieceFactory {
    entries: Vec<(PoolKind, Constructor)>,
    /// Standard subset used for the first piece of a session.
    standard: Vec<(PoolKind, Constructor)>,
    board_width: usize,
    rng: StdRng,
    seed: u64,
}

impl PieceFactory {
    /// Register every kind of `pool`.
    ///
    /// An empty pool falls back to the seven standard kinds, as does the
    /// standard subset when the pool has no standard kind.
    pub fn new(pool: &[PoolKind], board_width: usize, seed: u64) -> Self {
        let pool = if pool.is_empty() {
            standard_pool()
        } else {
            pool.to_vec()
        };
        let register = |kinds: &[PoolKind]| -> Vec<(PoolKind, Constructor)> {
            kinds.iter().map(|&k| (k, constructor_for(k))).collect()
        };

        let entries = register(&pool);
        let mut standard: Vec<_> = entries
            .iter()
            .copied()
            .filter(|(k, _)| !k.is_special())
            .collect();
        if standard.is_empty() {
            standard = register(&standard_pool());
        }

        Self {
            entries,
            standard,
            board_width,
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Uniform draw over the whole pool.
    pub fn create_random_piece(&mut self) -> Piece {
        let idx = self.rng.random_range(0..self.entries.len());
        let (_, build) = self.entries[idx];
        let color = self.random_color();
        build(self.board_width, color)
    }

    /// Uniform draw over the standard kinds only.
    pub fn create_standard_piece(&mut self) -> Piece {
        let idx = self.rng.random_range(0..self.standard.len());
        let (_, build) = self.standard[idx];
        let color = self.random_color();
        build(self.board_width, color)
    }

    /// Build a specific kind with a random color, whether or not it is in
    /// the pool.
    pub fn create(&mut self, kind: PoolKind) -> Piece {
        let color = self.random_color();
        constructor_for(kind)(self.board_width, color)
    }

    pub fn pool(&self) -> Vec<PoolKind> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Palette index excluding the empty entry.
    fn random_color(&mut self) -> ColorId {
        self.rng.random_range(1..PALETTE_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_seed_same_sequence() {
        let pool = standard_pool();
        let mut a = PieceFactory::new(&pool, 10, 42);
        let mut b = PieceFactory::new(&pool, 10, 42);
        for _ in 0..50 {
            assert_eq!(a.create_random_piece(), b.create_random_piece());
        }
    }

    #[test]
    fn draws_stay_inside_the_pool_and_palette() {
        let pool = vec![
            PoolKind::Standard(PieceKind::I),
            PoolKind::Special(SpecialKind::Rocket),
        ];
        let mut factory = PieceFactory::new(&pool, 10, 7);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let piece = factory.create_random_piece();
            assert!(pool.contains(&piece.kind()));
            if let Some(color) = piece.color() {
                assert!((1..PALETTE_LEN).contains(&color));
            }
            seen.insert(piece.kind());
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn standard_draw_never_yields_a_special() {
        let pool = vec![PoolKind::Special(SpecialKind::Rocket)];
        let mut factory = PieceFactory::new(&pool, 10, 3);
        for _ in 0..50 {
            assert!(!factory.create_standard_piece().is_special());
        }
        assert!(factory.create_random_piece().is_special());
    }

    #[test]
    fn empty_pool_falls_back_to_standard_kinds() {
        let factory = PieceFactory::new(&[], 10, 1);
        assert_eq!(factory.pool(), standard_pool());
    }

    #[test]
    fn constructors_spawn_at_the_top() {
        for kind in standard_pool() {
            let piece = constructor_for(kind)(10, 1);
            assert_eq!(piece.kind(), kind);
            assert_eq!(piece.y(), 0);
        }
    }
}
