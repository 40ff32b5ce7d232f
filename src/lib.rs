//! A persistent (immutable, structurally-shared) van Emde Boas tree.
//!
//! `PVeb<V>` stores an ordered key -> value mapping where keys are integers
//! drawn from a fixed interval `[lb, ub]` chosen at construction time.
//! Every mutating operation (`set`, `pop`, `extract_min`, `extract_max`)
//! returns a *new* logical tree that shares as much structure as possible
//! with its predecessor; the predecessor is left valid and unchanged. On
//! top of that, the tree supports membership, point lookup, ordered
//! predecessor/successor queries, min/max access, and ordered iteration,
//! all in `O(log log U)` expected time where `U = ub - lb + 1`.
//!
//! Internally this is a three-layer design:
//!
//! - [`PVeb`] (in `handle.rs`) is the immutable façade: it carries the
//!   tree's configuration and (possibly absent) root, translates external
//!   keys into internal offsets, and exposes the public API.
//! - The node algebra (in `node.rs`) is the recursive vEB structure
//!   itself: each node is either a *branch* (a cluster of child nodes plus
//!   a summary that tracks which clusters are non-empty) or, once a
//!   node's local universe drops to or below a tunable `threshold`, a flat
//!   *leaf*. Every branch keeps its minimum and maximum as a direct
//!   shortcut rather than recursing into them, which is what turns an
//!   `O(log U)` recursion into an `O(log log U)` one.
//! - The persistent map substrate (in `intmap.rs`) is what every branch's
//!   `cluster` and leaf's `map` is built on: an `O(log n)`-update
//!   associative container that shares structure between versions.
//!
//! Values should be cheap to clone - `Copy` types such as small integers
//! are the common case - since every update clones the values sitting at
//! the `min`/`max` shortcuts along the path to the change.
//!
//! # Example
//!
//! ```
//! use pveb::pveb;
//!
//! let t = pveb::<&str>(0, 255, 100).unwrap();
//! let t = t.set(10, "ten").unwrap();
//! let t = t.set(5, "five").unwrap();
//! let t2 = t.set(200, "two hundred").unwrap();
//!
//! assert_eq!(t.len(), 2); // t is unaffected by deriving t2.
//! assert_eq!(t2.items(false), vec![(5, "five"), (10, "ten"), (200, "two hundred")]);
//! assert_eq!(t2.successor(10).unwrap(), Some((200, "two hundred")));
//! ```

mod error;
mod handle;
mod intmap;
mod node;

#[cfg(test)]
mod tests;

pub use error::PVebError;
pub use handle::{Iter, PVeb};

/// Builds an empty [`PVeb`] over `[lb, ub]` with recursion-threshold
/// coefficient `c`. A thin, free-function mirror of [`PVeb::new`] matching
/// the design's factory name; the crate's own documented defaults are
/// `lb = 0`, `ub = 2^32 - 1`, `c = 100` (see [`PVeb::default`]).
pub fn pveb<V: Clone>(lb: u64, ub: u64, c: u64) -> Result<PVeb<V>, PVebError> {
    PVeb::new(lb, ub, c)
}
