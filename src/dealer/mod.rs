//! The dealer: claim arbitration and board rotation.
//!
//! A single coordinator thread owns the deck, the countdown deadline, and
//! the FIFO claim queue. Workers mutate the board under slot locks and hand
//! off claims; the dealer serializes judgment against in-flight mutations
//! by re-reading the claimant's cards under the involved slot locks.

pub mod actor;
pub mod claims;

pub use actor::Dealer;
pub use claims::{Claim, Verdict};
