//! Generic AVL machinery shared by both indexes.
//!
//! Everything here operates on owned links ([`Link`]): a structural mutation
//! consumes the subtree root and returns the new one, and the caller re-seats
//! its link from the return value.

use crate::types::{BalancedNode, CheckError, Link};

/// Height of a possibly absent subtree.
#[inline]
pub(crate) fn height<N: BalancedNode>(link: &Link<N>) -> i32 {
    link.as_ref().map_or(0, |n| n.height())
}

#[inline]
pub(crate) fn update_height<N: BalancedNode>(node: &mut N) {
    let h = 1 + height(node.left()).max(height(node.right()));
    node.set_height(h);
}

/// `height(left) - height(right)`.
#[inline]
pub(crate) fn balance_factor<N: BalancedNode>(node: &N) -> i32 {
    height(node.left()) - height(node.right())
}

/// Right rotation around `node`; returns the new local root.
pub(crate) fn rotate_right<N: BalancedNode>(mut node: Box<N>) -> Box<N> {
    let mut pivot = node
        .left_mut()
        .take()
        .expect("left child exists on right rotation");
    *node.left_mut() = pivot.right_mut().take();
    update_height(&mut *node);
    *pivot.right_mut() = Some(node);
    update_height(&mut *pivot);
    pivot
}

/// Left rotation around `node`; returns the new local root.
pub(crate) fn rotate_left<N: BalancedNode>(mut node: Box<N>) -> Box<N> {
    let mut pivot = node
        .right_mut()
        .take()
        .expect("right child exists on left rotation");
    *node.right_mut() = pivot.left_mut().take();
    update_height(&mut *node);
    *pivot.left_mut() = Some(node);
    update_height(&mut *pivot);
    pivot
}

/// Restores the AVL invariant at `node` after a child mutation and returns
/// the new local root. A node already in balance only has its height
/// refreshed.
pub(crate) fn rebalance<N: BalancedNode>(mut node: Box<N>) -> Box<N> {
    update_height(&mut *node);
    let bf = balance_factor(&*node);

    if bf > 1 {
        let left_bf = node
            .left()
            .as_deref()
            .map(|l| balance_factor(l))
            .expect("left child exists when left-heavy");
        if left_bf < 0 {
            let left = node
                .left_mut()
                .take()
                .expect("left child exists when left-heavy");
            *node.left_mut() = Some(rotate_left(left));
        }
        return rotate_right(node);
    }

    if bf < -1 {
        let right_bf = node
            .right()
            .as_deref()
            .map(|r| balance_factor(r))
            .expect("right child exists when right-heavy");
        if right_bf > 0 {
            let right = node
                .right_mut()
                .take()
                .expect("right child exists when right-heavy");
            *node.right_mut() = Some(rotate_right(right));
        }
        return rotate_left(node);
    }

    node
}

/// Splices the minimum node out of a non-empty subtree, rebalancing the
/// descent path. Returns the remaining subtree and the detached node, whose
/// links are cleared.
pub(crate) fn take_min<N: BalancedNode>(mut node: Box<N>) -> (Link<N>, Box<N>) {
    match node.left_mut().take() {
        Some(left) => {
            let (rest, min) = take_min(left);
            *node.left_mut() = rest;
            (Some(rebalance(node)), min)
        }
        None => {
            let rest = node.right_mut().take();
            (rest, node)
        }
    }
}

/// Leftmost node of a subtree.
pub(crate) fn first<N: BalancedNode>(link: &Link<N>) -> Option<&N> {
    let mut curr = link.as_deref()?;
    while let Some(l) = curr.left().as_deref() {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node of a subtree.
pub(crate) fn last<N: BalancedNode>(link: &Link<N>) -> Option<&N> {
    let mut curr = link.as_deref()?;
    while let Some(r) = curr.right().as_deref() {
        curr = r;
    }
    Some(curr)
}

/// Audits heights and balance factors bottom-up; returns the subtree's
/// computed height.
pub(crate) fn check<N: BalancedNode>(link: &Link<N>) -> Result<i32, CheckError> {
    let Some(node) = link.as_deref() else {
        return Ok(0);
    };
    let lh = check(node.left())?;
    let rh = check(node.right())?;
    let computed = 1 + lh.max(rh);
    if node.height() != computed {
        return Err(CheckError::StaleHeight {
            stored: node.height(),
            computed,
        });
    }
    let bf = lh - rh;
    if !(-1..=1).contains(&bf) {
        return Err(CheckError::OutOfBalance(bf));
    }
    Ok(computed)
}

/// Audits strict ascending key order via a full in-order walk.
pub(crate) fn check_order<N, C>(link: &Link<N>, cmp: &C) -> Result<(), CheckError>
where
    N: BalancedNode,
    C: Fn(&N::Key, &N::Key) -> i32,
{
    let mut prev: Option<&N::Key> = None;
    for node in NodeIter::new(link) {
        if let Some(p) = prev {
            if cmp(p, node.key()) >= 0 {
                return Err(CheckError::KeyOrder);
            }
        }
        prev = Some(node.key());
    }
    Ok(())
}

/// In-order node iterator; explicit stack, O(height) space.
pub(crate) struct NodeIter<'a, N> {
    stack: Vec<&'a N>,
}

impl<'a, N: BalancedNode> NodeIter<'a, N> {
    pub(crate) fn new(root: &'a Link<N>) -> Self {
        let mut iter = NodeIter { stack: Vec::new() };
        iter.push_left(root);
        iter
    }

    fn push_left(&mut self, mut link: &'a Link<N>) {
        while let Some(node) = link.as_deref() {
            self.stack.push(node);
            link = node.left();
        }
    }
}

impl<'a, N: BalancedNode> Iterator for NodeIter<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<&'a N> {
        let node = self.stack.pop()?;
        self.push_left(node.right());
        Some(node)
    }
}
