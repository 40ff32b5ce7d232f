//! The immutable handle: the outward-facing value bundling
//! `(lb, ub, c, u, threshold, root, len)` and translating external keys
//! (which live in `[lb, ub]`) to the internal offset domain `[0, u - 1]`
//! the node algebra works in.
//!
//! Every operation here is value-semantic: `set`/`pop`/`extract_min`/
//! `extract_max` take `&self` and return a brand new `PVeb`, leaving the
//! receiver untouched. Two handles produced this way may alias arbitrary
//! amounts of node/map structure; that aliasing is exactly the point.

use crate::error::PVebError;
use crate::intmap::threshold_for;
use crate::node::Node;

/// A persistent, structurally-shared van Emde Boas tree mapping integer
/// keys in `[lb, ub]` to values of type `V`.
///
/// Values should be cheap to clone (`Copy` types are ideal): every update
/// clones the `min`/`max` shortcut payload along the path to the change.
#[derive(Debug, Clone)]
pub struct PVeb<V> {
    lb: u64,
    ub: u64,
    c: u64,
    u: u128,
    threshold: u128,
    root: Option<Node<V>>,
    len: usize,
}

impl<V: Clone> PVeb<V> {
    /// Builds an empty tree over the inclusive interval `[lb, ub]`, with
    /// recursion-threshold coefficient `c`.
    ///
    /// `threshold = max(2, ceil(c * log2(log2(u))))` where `u = ub - lb +
    /// 1`; see the crate docs for the tradeoff this tunes.
    pub fn new(lb: u64, ub: u64, c: u64) -> Result<Self, PVebError> {
        if lb > ub {
            return Err(PVebError::InvalidBounds { lb, ub });
        }
        if c < 1 {
            return Err(PVebError::InvalidCoefficient(c as i64));
        }
        let u = (ub as u128) - (lb as u128) + 1;
        let threshold = threshold_for(u, c);
        tracing::trace!(lb, ub, c, u = %u, threshold = %threshold, "new empty pveb");
        Ok(PVeb {
            lb,
            ub,
            c,
            u,
            threshold,
            root: None,
            len: 0,
        })
    }

    /// Inclusive lower bound of the key interval.
    pub fn lb(&self) -> u64 {
        self.lb
    }

    /// Inclusive upper bound of the key interval.
    pub fn ub(&self) -> u64 {
        self.ub
    }

    /// The recursion-threshold coefficient passed to [`PVeb::new`].
    pub fn c(&self) -> u64 {
        self.c
    }

    /// `ub - lb + 1`, the size of the key universe.
    pub fn universe(&self) -> u128 {
        self.u
    }

    /// The node universe at or below which a node becomes a flat leaf.
    pub fn threshold(&self) -> u128 {
        self.threshold
    }

    /// Number of distinct keys currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` iff no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn check_key(&self, x: u64) -> Result<(), PVebError> {
        if x < self.lb || x > self.ub {
            return Err(PVebError::KeyOutOfBounds {
                key: x,
                lb: self.lb,
                ub: self.ub,
            });
        }
        Ok(())
    }

    fn offset(&self, x: u64) -> u128 {
        (x as u128) - (self.lb as u128)
    }

    fn unoffset(&self, x: u128) -> u64 {
        (x + self.lb as u128) as u64
    }

    /// `O(log log U)` membership test.
    pub fn contains(&self, x: u64) -> Result<bool, PVebError> {
        self.check_key(x)?;
        Ok(Node::get(self.root.as_ref(), self.offset(x), self.u, self.threshold).is_some())
    }

    /// `O(log log U)` point lookup. Fails with [`PVebError::NotFound`] if
    /// `x` is absent.
    pub fn get(&self, x: u64) -> Result<V, PVebError> {
        self.check_key(x)?;
        Node::get(self.root.as_ref(), self.offset(x), self.u, self.threshold)
            .cloned()
            .ok_or(PVebError::NotFound(x))
    }

    /// Returns a tree with `x` mapped to `v`. A no-op (returns a clone of
    /// `self`) if `x` is already present: existing keys are never
    /// overwritten (see the crate docs).
    pub fn set(&self, x: u64, v: V) -> Result<Self, PVebError> {
        self.check_key(x)?;
        let x_off = self.offset(x);
        if Node::get(self.root.as_ref(), x_off, self.u, self.threshold).is_some() {
            return Ok(self.clone());
        }
        tracing::trace!(key = x, "pveb set");
        let root = Node::set(self.root.clone(), x_off, self.u, self.threshold, v);
        Ok(PVeb {
            lb: self.lb,
            ub: self.ub,
            c: self.c,
            u: self.u,
            threshold: self.threshold,
            root: Some(root),
            len: self.len + 1,
        })
    }

    /// Returns a tree with `x` removed. A no-op (returns a clone of `self`)
    /// if `x` is absent.
    pub fn pop(&self, x: u64) -> Result<Self, PVebError> {
        self.check_key(x)?;
        let x_off = self.offset(x);
        let Some(root) = self.root.clone() else {
            return Ok(self.clone());
        };
        if Node::get(Some(&root), x_off, self.u, self.threshold).is_none() {
            return Ok(self.clone());
        }
        tracing::trace!(key = x, "pveb pop");
        let root = Node::pop(root, x_off, self.u, self.threshold);
        Ok(PVeb {
            lb: self.lb,
            ub: self.ub,
            c: self.c,
            u: self.u,
            threshold: self.threshold,
            root,
            len: self.len - 1,
        })
    }

    /// Smallest key strictly greater than `x`, with its value.
    pub fn successor(&self, x: u64) -> Result<Option<(u64, V)>, PVebError> {
        self.check_key(x)?;
        Ok(
            Node::successor(self.root.as_ref(), self.offset(x), self.u, self.threshold)
                .map(|(k, v)| (self.unoffset(k), v.clone())),
        )
    }

    /// Largest key strictly less than `x`, with its value.
    pub fn predecessor(&self, x: u64) -> Result<Option<(u64, V)>, PVebError> {
        self.check_key(x)?;
        Ok(
            Node::predecessor(self.root.as_ref(), self.offset(x), self.u, self.threshold)
                .map(|(k, v)| (self.unoffset(k), v.clone())),
        )
    }

    /// Smallest stored key, with its value. `O(1)`.
    pub fn min(&self) -> Option<(u64, V)> {
        self.root
            .as_ref()
            .map(|r| (self.unoffset(r.min_key()), r.min_data().clone()))
    }

    /// Largest stored key, with its value. `O(1)`.
    pub fn max(&self) -> Option<(u64, V)> {
        self.root
            .as_ref()
            .map(|r| (self.unoffset(r.max_key()), r.max_data().clone()))
    }

    /// Equivalent to `pop(min().0)`. A no-op on an empty tree.
    pub fn extract_min(&self) -> Self {
        match self.min() {
            None => self.clone(),
            Some((k, _)) => self.pop(k).expect("min key is always in bounds"),
        }
    }

    /// Equivalent to `pop(max().0)`. A no-op on an empty tree.
    pub fn extract_max(&self) -> Self {
        match self.max() {
            None => self.clone(),
            Some((k, _)) => self.pop(k).expect("max key is always in bounds"),
        }
    }

    /// Lazy ascending (or, if `reverse`, descending) iteration over
    /// `(key, value)` pairs. Each step costs one `successor`/`predecessor`
    /// call; nothing is materialised up front.
    pub fn iter_items(&self, reverse: bool) -> Iter<V> {
        let next = if reverse { self.max() } else { self.min() };
        Iter {
            tree: self.clone(),
            reverse,
            next,
        }
    }

    /// Ascending iteration; shorthand for `iter_items(false)`.
    pub fn iter(&self) -> Iter<V> {
        self.iter_items(false)
    }

    /// Descending iteration; shorthand for `iter_items(true)`.
    pub fn iter_rev(&self) -> Iter<V> {
        self.iter_items(true)
    }

    /// Materialises all `(key, value)` pairs into a `Vec`, in ascending
    /// (or, if `reverse`, descending) key order. A public-facing
    /// convenience, not part of the core recursion.
    pub fn items(&self, reverse: bool) -> Vec<(u64, V)> {
        self.iter_items(reverse).collect()
    }

    /// Materialises all keys into a `Vec`, in ascending (or, if `reverse`,
    /// descending) order. A public-facing convenience, not part of the
    /// core recursion.
    pub fn keys(&self, reverse: bool) -> Vec<u64> {
        self.iter_items(reverse).map(|(k, _)| k).collect()
    }

}

impl<V: Clone> Default for PVeb<V> {
    /// `pveb(0, 2^32 - 1, 100)`, matching [`crate::pveb`]'s defaults.
    fn default() -> Self {
        PVeb::new(0, (1u64 << 32) - 1, 100).expect("default bounds and coefficient are valid")
    }
}

/// Lazy forward/reverse iterator over a [`PVeb`]'s `(key, value)` pairs,
/// produced by [`PVeb::iter_items`]. Advances by exactly one
/// `successor`/`predecessor` call per `next()`, so materialising the whole
/// sequence costs `O(n log log U)` rather than the `O(n)` a cursor-based
/// traversal could give.
pub struct Iter<V> {
    tree: PVeb<V>,
    reverse: bool,
    next: Option<(u64, V)>,
}

impl<V: Clone> Iterator for Iter<V> {
    type Item = (u64, V);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = if self.reverse {
            self.tree
                .predecessor(current.0)
                .expect("iteration key is always in bounds")
        } else {
            self.tree
                .successor(current.0)
                .expect("iteration key is always in bounds")
        };
        Some(current)
    }
}
