//! Score constants for Hex evaluation

/// Score bounds shared by the evaluator and the search.
pub struct Score;

impl Score {
    /// A connected position. Far above any distance differential, which is
    /// bounded by twice the board size.
    pub const WIN: i32 = 1_000_000;

    /// Scores at or beyond this magnitude are decided games
    /// (`WIN` minus at most a few hundred plies).
    pub const DECISIVE: i32 = Self::WIN - 1_000;

    /// Alpha-beta window bound
    pub const INF: i32 = Self::WIN + 1;

    /// Win found `ply` plies below the root; faster wins score higher.
    #[inline]
    pub const fn win_in(ply: i32) -> i32 {
        Self::WIN - ply
    }

    /// Loss suffered `ply` plies below the root; slower losses score higher.
    #[inline]
    pub const fn loss_in(ply: i32) -> i32 {
        -Self::WIN + ply
    }

    #[inline]
    pub const fn is_decisive(score: i32) -> bool {
        score >= Self::DECISIVE || score <= -Self::DECISIVE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_loss_symmetry() {
        for ply in 0..10 {
            assert_eq!(Score::win_in(ply), -Score::loss_in(ply));
            assert!(Score::is_decisive(Score::win_in(ply)));
            assert!(Score::is_decisive(Score::loss_in(ply)));
        }
        assert!(Score::win_in(1) > Score::win_in(3));
        assert!(Score::loss_in(1) < Score::loss_in(3));
    }

    #[test]
    fn test_ordinary_scores_not_decisive() {
        assert!(!Score::is_decisive(0));
        assert!(!Score::is_decisive(38));
        assert!(!Score::is_decisive(-38));
    }
}
