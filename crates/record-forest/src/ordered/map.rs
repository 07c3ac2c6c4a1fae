use std::fmt;

use super::types::OrderedNode;
use super::util;
use crate::print::print_subtree;
use crate::types::{default_comparator, CheckError, Link};
use crate::util::{check, check_order, first, last, height, NodeIter};

/// Height-balanced single-value index: exactly one value per key, enumerable
/// in ascending key order.
///
/// Keyed operations are O(log n); enumeration is O(n). The comparator is
/// fixed at construction; [`OrderedIndex::new`] derives one from
/// `PartialOrd`, [`OrderedIndex::with_comparator`] accepts a custom total
/// order.
pub struct OrderedIndex<K, V, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    root: Link<OrderedNode<K, V>>,
    comparator: C,
    length: usize,
}

impl<K, V> OrderedIndex<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, V> Default for OrderedIndex<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> OrderedIndex<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            comparator,
            length: 0,
        }
    }

    /// Inserts `value` under `key`. An existing key keeps its node and has
    /// the value overwritten in place; a new key may restructure the tree.
    pub fn insert(&mut self, key: K, value: V) {
        let (root, created) = util::insert(self.root.take(), key, value, &self.comparator);
        self.root = Some(root);
        if created {
            self.length += 1;
        }
    }

    /// Removes `key` and its value. Returns `false`, leaving the index
    /// untouched, when the key is absent.
    pub fn remove(&mut self, key: &K) -> bool {
        let (root, hit) = util::remove(self.root.take(), key, &self.comparator);
        self.root = root;
        if hit {
            self.length -= 1;
        }
        hit
    }

    /// Exact-match lookup.
    pub fn get(&self, key: &K) -> Option<&V> {
        util::find(&self.root, key, &self.comparator).map(|n| &n.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        util::find_mut(&mut self.root, key, &self.comparator).map(|n| &mut n.value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every node and resets to the empty state.
    pub fn clear(&mut self) {
        self.root = None;
        self.length = 0;
    }

    /// Ascending `(key, value)` pairs over the whole index.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        NodeIter::new(&self.root).map(|n| (&n.key, &n.value))
    }

    pub fn for_each<F: FnMut(&K, &V)>(&self, mut f: F) {
        for (k, v) in self.iter() {
            f(k, v);
        }
    }

    /// Entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        first(&self.root).map(|n| (&n.key, &n.value))
    }

    /// Entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        last(&self.root).map(|n| (&n.key, &n.value))
    }

    /// Tree height; 0 when empty.
    pub fn height(&self) -> usize {
        height(&self.root) as usize
    }

    /// Audits every structural invariant: cached heights, AVL balance, and
    /// strict key ordering. Diagnostic surface for tests and debugging.
    pub fn assert_valid(&self) -> Result<(), CheckError> {
        check(&self.root)?;
        check_order(&self.root, &self.comparator)
    }
}

impl<K, V, C> OrderedIndex<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> i32,
{
    /// Multi-line rendering of the tree shape, one node per line.
    pub fn print(&self) -> String {
        print_subtree(&self.root, &|n: &OrderedNode<K, V>| {
            format!("{:?} [h={}] = {:?}", n.key, n.height, n.value)
        })
    }
}

impl<K, V, C> fmt::Debug for OrderedIndex<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
