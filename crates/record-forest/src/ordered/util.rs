//! Keyed operations on the single-value node graph.

use super::types::OrderedNode;
use crate::types::Link;
use crate::util::{rebalance, take_min};

pub(super) type OrderedLink<K, V> = Link<OrderedNode<K, V>>;

/// Inserts `value` under `key`, overwriting in place when the key already
/// exists. Returns the new subtree root and whether a node was created.
pub(super) fn insert<K, V, C>(
    link: OrderedLink<K, V>,
    key: K,
    value: V,
    cmp: &C,
) -> (Box<OrderedNode<K, V>>, bool)
where
    C: Fn(&K, &K) -> i32,
{
    let Some(mut node) = link else {
        return (Box::new(OrderedNode::new(key, value)), true);
    };

    let ord = cmp(&key, &node.key);
    if ord == 0 {
        node.value = value;
        return (node, false);
    }

    let created;
    if ord < 0 {
        let (child, added) = insert(node.left.take(), key, value, cmp);
        node.left = Some(child);
        created = added;
    } else {
        let (child, added) = insert(node.right.take(), key, value, cmp);
        node.right = Some(child);
        created = added;
    }
    (rebalance(node), created)
}

/// Removes `key` from the subtree. Returns the new subtree root and whether
/// the key was found; an absent key leaves the subtree untouched.
pub(super) fn remove<K, V, C>(
    link: OrderedLink<K, V>,
    key: &K,
    cmp: &C,
) -> (OrderedLink<K, V>, bool)
where
    C: Fn(&K, &K) -> i32,
{
    let Some(mut node) = link else {
        return (None, false);
    };

    let ord = cmp(key, &node.key);
    if ord < 0 {
        let (child, hit) = remove(node.left.take(), key, cmp);
        node.left = child;
        return (Some(rebalance(node)), hit);
    }
    if ord > 0 {
        let (child, hit) = remove(node.right.take(), key, cmp);
        node.right = child;
        return (Some(rebalance(node)), hit);
    }
    (unlink(node), true)
}

/// Detaches the matched node. With zero or one child the node is replaced by
/// its sole child; with two, the in-order successor is spliced out of the
/// right subtree and donates its key and value, so the successor's node is
/// the one destroyed.
fn unlink<K, V>(mut node: Box<OrderedNode<K, V>>) -> OrderedLink<K, V> {
    match (node.left.take(), node.right.take()) {
        (None, None) => None,
        (Some(child), None) | (None, Some(child)) => Some(child),
        (Some(left), Some(right)) => {
            let (rest, succ) = take_min(right);
            let succ = *succ;
            node.key = succ.key;
            node.value = succ.value;
            node.left = Some(left);
            node.right = rest;
            Some(rebalance(node))
        }
    }
}

/// Exact-match descent.
pub(super) fn find<'a, K, V, C>(
    link: &'a OrderedLink<K, V>,
    key: &K,
    cmp: &C,
) -> Option<&'a OrderedNode<K, V>>
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

pub(super) fn find_mut<'a, K, V, C>(
    link: &'a mut OrderedLink<K, V>,
    key: &K,
    cmp: &C,
) -> Option<&'a mut OrderedNode<K, V>>
where
    C: Fn(&K, &K) -> i32,
{
    let mut curr = link.as_deref_mut();
    while let Some(node) = curr {
        let ord = cmp(key, &node.key);
        if ord == 0 {
            return Some(node);
        }
        curr = if ord < 0 {
            node.left.as_deref_mut()
        } else {
            node.right.as_deref_mut()
        };
    }
    None
}
