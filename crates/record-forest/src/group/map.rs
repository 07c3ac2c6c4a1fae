use std::fmt;

use super::types::GroupNode;
use super::util::{self, Removal};
use crate::print::print_subtree;
use crate::types::{default_comparator, CheckError, Link};
use crate::util::{check, check_order, first, last, height, NodeIter};

/// Height-balanced group index: each key holds the ordered, possibly
/// duplicated references filed under it.
///
/// `R` is the caller's opaque handle into a separately owned record
/// structure; the index compares handles for identity and nothing else.
/// Lookups return the key's node so callers can read the full member list;
/// a node reference must not be held across a later mutation (the borrow
/// checker enforces this).
pub struct GroupIndex<K, R, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    root: Link<GroupNode<K, R>>,
    comparator: C,
    length: usize,
}

impl<K, R> GroupIndex<K, R, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, R> Default for GroupIndex<K, R, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, R, C> GroupIndex<K, R, C>
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

    /// Files `member` under `key`, creating the key's node on first use.
    /// Duplicate members under one key are kept as-is.
    pub fn insert(&mut self, key: K, member: R) {
        let (root, created) = util::insert(self.root.take(), key, member, &self.comparator);
        self.root = Some(root);
        if created {
            self.length += 1;
        }
    }

    /// Removes the first occurrence of `member` under `key`; when that was
    /// the last member, the key's node is pruned from the tree. Returns
    /// `false` only when the key is absent.
    pub fn remove_member(&mut self, key: &K, member: &R) -> bool
    where
        R: PartialEq,
    {
        let (root, outcome) = util::remove_member(self.root.take(), key, member, &self.comparator);
        self.root = root;
        match outcome {
            Removal::Missing => false,
            Removal::Kept => true,
            Removal::Pruned => {
                self.length -= 1;
                true
            }
        }
    }

    /// Exact-match lookup of the key's node, exposing its member list.
    pub fn get(&self, key: &K) -> Option<&GroupNode<K, R>> {
        util::find(&self.root, key, &self.comparator)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Number of keys (not members).
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every node and resets to the empty state. Stored references are
    /// non-owning, so the records they point at are untouched.
    pub fn clear(&mut self) {
        self.root = None;
        self.length = 0;
    }

    /// Ascending `(key, members)` pairs over the whole index.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[R])> + '_ {
        NodeIter::new(&self.root).map(|n| (&n.key, n.members.as_slice()))
    }

    pub fn for_each<F: FnMut(&K, &[R])>(&self, mut f: F) {
        for (k, members) in self.iter() {
            f(k, members);
        }
    }

    /// Entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &[R])> {
        first(&self.root).map(|n| (&n.key, n.members.as_slice()))
    }

    /// Entry with the largest key.
    pub fn last(&self) -> Option<(&K, &[R])> {
        last(&self.root).map(|n| (&n.key, n.members.as_slice()))
    }

    /// Tree height; 0 when empty.
    pub fn height(&self) -> usize {
        height(&self.root) as usize
    }

    /// Audits cached heights, AVL balance, strict key ordering, and the
    /// no-empty-member-list invariant.
    pub fn assert_valid(&self) -> Result<(), CheckError> {
        check(&self.root)?;
        check_order(&self.root, &self.comparator)?;
        for (_, members) in self.iter() {
            if members.is_empty() {
                return Err(CheckError::EmptyMembers);
            }
        }
        Ok(())
    }
}

impl<K, R, C> GroupIndex<K, R, C>
where
    K: fmt::Debug,
    C: Fn(&K, &K) -> i32,
{
    /// Multi-line rendering of the tree shape, one node per line.
    pub fn print(&self) -> String {
        print_subtree(&self.root, &|n: &GroupNode<K, R>| {
            format!("{:?} [h={}] x{}", n.key, n.height, n.members.len())
        })
    }
}

impl<K, R, C> fmt::Debug for GroupIndex<K, R, C>
where
    K: fmt::Debug,
    R: fmt::Debug,
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
