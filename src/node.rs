//! The recursive vEB node algebra.
//!
//! A node is polymorphic over exactly two shapes, discriminated by its own
//! local universe `u_node` against the tree-wide `threshold`: a `Branch`
//! (high cluster + summary) above threshold, a `Leaf` (flat key->value map)
//! at or below it. The shape of a node is fixed at construction and never
//! changes, so there is no dynamic rebalancing here beyond what the vEB
//! recursion itself implies.
//!
//! Every routine here is pure: it takes a node (by value, since the caller
//! already owns a cheap structural-sharing clone of it) and returns a new
//! node, never mutating the one it was given. Cloning a `Node` is O(1) plus
//! the cost of cloning two `V`s (`min_data`/`max_data`): `cluster` and `map`
//! are `im::OrdMap`s (Arc-backed, clone is a refcount bump), and `summary`
//! is an `Arc<Node<V>>`.

use std::sync::Arc;

use crate::intmap::{isqrt_ceil, IntMap};

#[derive(Debug, Clone)]
pub(crate) enum Node<V> {
    Branch(Branch<V>),
    Leaf(Leaf<V>),
}

#[derive(Debug, Clone)]
pub(crate) struct Branch<V> {
    min: u128,
    min_data: V,
    max: u128,
    max_data: V,
    cluster: IntMap<Node<V>>,
    summary: Option<Arc<Node<V>>>,
}

#[derive(Debug, Clone)]
pub(crate) struct Leaf<V> {
    min: u128,
    min_data: V,
    max: u128,
    max_data: V,
    map: IntMap<V>,
}

impl<V: Clone> Node<V> {
    fn new_single(x: u128, u_node: u128, threshold: u128, v: V) -> Self {
        if u_node > threshold {
            Node::Branch(Branch {
                min: x,
                min_data: v,
                max: x,
                max_data: v.clone(),
                cluster: IntMap::new(),
                summary: None,
            })
        } else {
            Node::Leaf(Leaf {
                min: x,
                min_data: v.clone(),
                max: x,
                max_data: v.clone(),
                map: IntMap::new().set(x, v),
            })
        }
    }

    pub(crate) fn min_key(&self) -> u128 {
        match self {
            Node::Branch(b) => b.min,
            Node::Leaf(l) => l.min,
        }
    }

    pub(crate) fn max_key(&self) -> u128 {
        match self {
            Node::Branch(b) => b.max,
            Node::Leaf(l) => l.max,
        }
    }

    pub(crate) fn min_data(&self) -> &V {
        match self {
            Node::Branch(b) => &b.min_data,
            Node::Leaf(l) => &l.min_data,
        }
    }

    pub(crate) fn max_data(&self) -> &V {
        match self {
            Node::Branch(b) => &b.max_data,
            Node::Leaf(l) => &l.max_data,
        }
    }

    /// Sets `x` to `v`, returning a new node. Runs in O(lg lg u) time.
    pub(crate) fn set(node: Option<Node<V>>, x: u128, u_node: u128, threshold: u128, v: V) -> Node<V> {
        let node = match node {
            None => return Node::new_single(x, u_node, threshold, v),
            Some(node) => node,
        };

        if x == node.min_key() || x == node.max_key() {
            // existing keys are not overwritten; the old value wins.
            return node;
        }

        match node {
            Node::Branch(b) => Node::Branch(Self::set_branch(b, x, u_node, threshold, v)),
            Node::Leaf(l) => Node::Leaf(Self::set_leaf(l, x, v)),
        }
    }

    fn set_branch(mut b: Branch<V>, mut x: u128, u_node: u128, threshold: u128, mut v: V) -> Branch<V> {
        if x < b.min {
            std::mem::swap(&mut x, &mut b.min);
            std::mem::swap(&mut v, &mut b.min_data);
        } else if x > b.max {
            b.max = x;
            b.max_data = v.clone();
        }

        let new_u = isqrt_ceil(u_node);
        let high = x / new_u;
        let low = x % new_u;

        if !b.cluster.contains(high) {
            b.summary = Some(Arc::new(Node::set(
                b.summary.as_deref().cloned(),
                high,
                new_u,
                threshold,
                v.clone(),
            )));
        }
        let child = b.cluster.get(high).cloned();
        b.cluster = b.cluster.set(high, Node::set(child, low, new_u, threshold, v));
        b
    }

    fn set_leaf(mut l: Leaf<V>, x: u128, v: V) -> Leaf<V> {
        if x < l.min {
            l.min = x;
            l.min_data = v.clone();
        } else if x > l.max {
            l.max = x;
            l.max_data = v.clone();
        }
        l.map = l.map.set(x, v);
        l
    }

    /// Removes `x`, returning the new node (or `None` if it becomes empty).
    /// The caller guarantees `x` is present in `node`.
    pub(crate) fn pop(node: Node<V>, x: u128, u_node: u128, threshold: u128) -> Option<Node<V>> {
        match node {
            Node::Branch(b) => Self::pop_branch(b, x, u_node, threshold),
            Node::Leaf(l) => Self::pop_leaf(l, x),
        }
    }

    fn pop_branch(mut b: Branch<V>, mut x: u128, u_node: u128, threshold: u128) -> Option<Node<V>> {
        let new_u = isqrt_ceil(u_node);

        if x == b.min {
            match b.summary.as_deref().map(Node::min_key) {
                None => return None,
                Some(high_prime) => {
                    let (low_prime, min_data) = {
                        let child = b
                            .cluster
                            .get(high_prime)
                            .expect("cluster for summary min must exist");
                        (child.min_key(), child.min_data().clone())
                    };
                    x = high_prime * new_u + low_prime;
                    b.min = x;
                    b.min_data = min_data;
                }
            }
        }

        let high = x / new_u;
        let low = x % new_u;
        let child = b
            .cluster
            .get(high)
            .cloned()
            .expect("cluster entry for x must exist");
        let popped = Node::pop(child, low, new_u, threshold);
        match popped {
            None => {
                b.cluster = b.cluster.remove(high);
                b.summary = b
                    .summary
                    .map(|s| Node::pop((*s).clone(), high, new_u, threshold))
                    .flatten()
                    .map(Arc::new);
            }
            Some(t) => {
                b.cluster = b.cluster.set(high, t);
            }
        }

        match b.summary.as_deref() {
            None => {
                b.max = b.min;
                b.max_data = b.min_data.clone();
            }
            Some(summary) => {
                let high_pp = summary.max_key();
                let (max_key, max_data) = {
                    let child = b
                        .cluster
                        .get(high_pp)
                        .expect("cluster entry for summary max must exist");
                    (high_pp * new_u + child.max_key(), child.max_data().clone())
                };
                b.max = max_key;
                b.max_data = max_data;
            }
        }

        Some(Node::Branch(b))
    }

    fn pop_leaf(mut l: Leaf<V>, x: u128) -> Option<Node<V>> {
        l.map = l.map.remove(x);
        if l.map.is_empty() {
            return None;
        }
        // both extremes must be refreshed, even when only one changed.
        let new_min = l.map.min_key().expect("non-empty map has a min key");
        let new_max = l.map.max_key().expect("non-empty map has a max key");
        l.min = new_min;
        l.min_data = l.map.get(new_min).expect("min key present in map").clone();
        l.max = new_max;
        l.max_data = l.map.get(new_max).expect("max key present in map").clone();
        Some(Node::Leaf(l))
    }

    /// Looks up `x`. Runs in O(lg lg u) time.
    pub(crate) fn get(node: Option<&Node<V>>, x: u128, u_node: u128, threshold: u128) -> Option<&V> {
        let node = node?;
        if x == node.min_key() {
            return Some(node.min_data());
        }
        if x == node.max_key() {
            return Some(node.max_data());
        }
        match node {
            Node::Branch(b) => {
                let new_u = isqrt_ceil(u_node);
                let high = x / new_u;
                let low = x % new_u;
                Node::get(b.cluster.get(high), low, new_u, threshold)
            }
            Node::Leaf(l) => l.map.get(x),
        }
    }

    /// Smallest key strictly greater than `x`, with its value. Runs in
    /// O(lg lg u) time.
    pub(crate) fn successor(
        node: Option<&Node<V>>,
        x: u128,
        u_node: u128,
        threshold: u128,
    ) -> Option<(u128, &V)> {
        let node = node?;
        match node {
            Node::Branch(b) => {
                if x < b.min {
                    return Some((b.min, &b.min_data));
                }
                let new_u = isqrt_ceil(u_node);
                let high = x / new_u;
                let low = x % new_u;
                if let Some(child) = b.cluster.get(high) {
                    if low < child.max_key() {
                        let (low_p, v) = Node::successor(Some(child), low, new_u, threshold)
                            .expect("successor must exist when low < cluster max");
                        return Some((high * new_u + low_p, v));
                    }
                }
                if let Some((h, _)) = Node::successor(b.summary.as_deref(), high, new_u, threshold) {
                    let next_cluster = b.cluster.get(h).expect("summary entries have a cluster");
                    return Some((h * new_u + next_cluster.min_key(), next_cluster.min_data()));
                }
                if x < b.max {
                    return Some((b.max, &b.max_data));
                }
                None
            }
            Node::Leaf(l) => l.map.successor(x),
        }
    }

    /// Largest key strictly less than `x`, with its value. Runs in
    /// O(lg lg u) time.
    pub(crate) fn predecessor(
        node: Option<&Node<V>>,
        x: u128,
        u_node: u128,
        threshold: u128,
    ) -> Option<(u128, &V)> {
        let node = node?;
        match node {
            Node::Branch(b) => {
                if x > b.max {
                    return Some((b.max, &b.max_data));
                }
                let new_u = isqrt_ceil(u_node);
                let high = x / new_u;
                let low = x % new_u;
                if let Some(child) = b.cluster.get(high) {
                    if low > child.min_key() {
                        let (low_p, v) = Node::predecessor(Some(child), low, new_u, threshold)
                            .expect("predecessor must exist when low > cluster min");
                        return Some((high * new_u + low_p, v));
                    }
                }
                if let Some((h, _)) = Node::predecessor(b.summary.as_deref(), high, new_u, threshold) {
                    let prev_cluster = b.cluster.get(h).expect("summary entries have a cluster");
                    return Some((h * new_u + prev_cluster.max_key(), prev_cluster.max_data()));
                }
                if x > b.min {
                    return Some((b.min, &b.min_data));
                }
                None
            }
            Node::Leaf(l) => l.map.predecessor(x),
        }
    }
}
