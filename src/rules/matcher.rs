//! The `MatchRules` trait and a closure adapter.

use crate::core::CardId;

/// Matching-set predicate and enumerator, supplied by the embedding game.
///
/// Implementations must be pure with respect to the card ids passed in:
/// the dealer calls `is_valid_set` while holding slot locks, so it must not
/// call back into the engine.
///
/// ## Implementation Notes
///
/// - `is_valid_set` receives the claimant's cards sorted by slot index; the
///   selection may be smaller than the configured feature size if tokens
///   were invalidated concurrently, and implementations should return
///   `false` for selections of the wrong size.
/// - `find_sets` enumerates up to `limit` distinct sets among `cards`; the
///   engine only ever needs `limit == 1` (game-over check) or a large limit
///   (hint logging).
pub trait MatchRules: Send + Sync {
    /// Does this selection of cards form a valid matching set?
    fn is_valid_set(&self, cards: &[CardId]) -> bool;

    /// Enumerate up to `limit` matching sets among the given cards.
    fn find_sets(&self, cards: &[CardId], limit: usize) -> Vec<Vec<CardId>>;
}

/// Adapter wrapping a pair of closures as `MatchRules`.
///
/// Convenient for embedding applications that already have free functions
/// for set detection, and for tests that want scripted verdicts.
///
/// ## Example
///
/// ```
/// use matchboard::core::CardId;
/// use matchboard::rules::{FnRules, MatchRules};
///
/// // Degenerate rules: any single card is a set.
/// let rules = FnRules::new(
///     |cards: &[CardId]| cards.len() == 1,
///     |cards: &[CardId], limit| {
///         cards.iter().take(limit).map(|&c| vec![c]).collect()
///     },
/// );
///
/// assert!(rules.is_valid_set(&[CardId::new(0)]));
/// assert_eq!(rules.find_sets(&[CardId::new(0), CardId::new(1)], 1).len(), 1);
/// ```
pub struct FnRules<V, F> {
    validate: V,
    find: F,
}

impl<V, F> FnRules<V, F>
where
    V: Fn(&[CardId]) -> bool + Send + Sync,
    F: Fn(&[CardId], usize) -> Vec<Vec<CardId>> + Send + Sync,
{
    /// Wrap a validity predicate and a set enumerator.
    pub fn new(validate: V, find: F) -> Self {
        Self { validate, find }
    }
}

impl<V, F> MatchRules for FnRules<V, F>
where
    V: Fn(&[CardId]) -> bool + Send + Sync,
    F: Fn(&[CardId], usize) -> Vec<Vec<CardId>> + Send + Sync,
{
    fn is_valid_set(&self, cards: &[CardId]) -> bool {
        (self.validate)(cards)
    }

    fn find_sets(&self, cards: &[CardId], limit: usize) -> Vec<Vec<CardId>> {
        (self.find)(cards, limit)
    }
}
