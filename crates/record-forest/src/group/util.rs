//! Keyed operations on the group node graph.

use super::types::GroupNode;
use crate::types::Link;
use crate::util::{rebalance, take_min};

pub(super) type GroupLink<K, R> = Link<GroupNode<K, R>>;

/// Outcome of a member removal, as seen from the key's node.
pub(super) enum Removal {
    /// Key not present anywhere in the subtree.
    Missing,
    /// Key found; the node keeps at least one member.
    Kept,
    /// Key found and its last member removed; the node was pruned.
    Pruned,
}

/// Files `member` under `key`: a new key gets a fresh single-member node, an
/// existing key appends. Returns the new subtree root and whether a node was
/// created.
pub(super) fn insert<K, R, C>(
    link: GroupLink<K, R>,
    key: K,
    member: R,
    cmp: &C,
) -> (Box<GroupNode<K, R>>, bool)
where
    C: Fn(&K, &K) -> i32,
{
    let Some(mut node) = link else {
        return (Box::new(GroupNode::new(key, member)), true);
    };

    let ord = cmp(&key, &node.key);
    if ord == 0 {
        node.members.push(member);
        return (node, false);
    }

    let created;
    if ord < 0 {
        let (child, added) = insert(node.left.take(), key, member, cmp);
        node.left = Some(child);
        created = added;
    } else {
        let (child, added) = insert(node.right.take(), key, member, cmp);
        node.right = Some(child);
        created = added;
    }
    (rebalance(node), created)
}

/// Removes the first identity-equal occurrence of `member` under `key`,
/// pruning the node when its member list empties.
pub(super) fn remove_member<K, R, C>(
    link: GroupLink<K, R>,
    key: &K,
    member: &R,
    cmp: &C,
) -> (GroupLink<K, R>, Removal)
where
    R: PartialEq,
    C: Fn(&K, &K) -> i32,
{
    let Some(mut node) = link else {
        return (None, Removal::Missing);
    };

    let ord = cmp(key, &node.key);
    if ord < 0 {
        let (child, outcome) = remove_member(node.left.take(), key, member, cmp);
        node.left = child;
        return (Some(rebalance(node)), outcome);
    }
    if ord > 0 {
        let (child, outcome) = remove_member(node.right.take(), key, member, cmp);
        node.right = child;
        return (Some(rebalance(node)), outcome);
    }

    if let Some(at) = node.members.iter().position(|m| m == member) {
        node.members.remove(at);
    }
    if node.members.is_empty() {
        (unlink(node), Removal::Pruned)
    } else {
        (Some(node), Removal::Kept)
    }
}

/// Same splice mechanics as the single-value index, donating key and member
/// list from the in-order successor in the two-child case.
fn unlink<K, R>(mut node: Box<GroupNode<K, R>>) -> GroupLink<K, R> {
    match (node.left.take(), node.right.take()) {
        (None, None) => None,
        (Some(child), None) | (None, Some(child)) => Some(child),
        (Some(left), Some(right)) => {
            let (rest, succ) = take_min(right);
            let succ = *succ;
            node.key = succ.key;
            node.members = succ.members;
            node.left = Some(left);
            node.right = rest;
            Some(rebalance(node))
        }
    }
}

/// Exact-match descent.
pub(super) fn find<'a, K, R, C>(
    link: &'a GroupLink<K, R>,
    key: &K,
    cmp: &C,
) -> Option<&'a GroupNode<K, R>>
where
    C: Fn(&K, &K) -> i32,
{
    let mut curr = link.as_deref();
    while let Some(node) = curr {
        let ord = cmp(key, &node.key);
        if ord == 0 {
            return Some(node);
        }
        curr = if ord < 0 {
            node.left.as_deref()
        } else {
            node.right.as_deref()
        };
    }
    None
}
