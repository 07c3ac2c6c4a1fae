use crate::types::{BalancedNode, Link};

/// Node of the single-value index.
pub(crate) struct OrderedNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<Self>,
    pub(crate) right: Link<Self>,
    pub(crate) height: i32,
}

impl<K, V> OrderedNode<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        }
    }
}

impl<K, V> BalancedNode for OrderedNode<K, V> {
    type Key = K;

    fn key(&self) -> &K {
        &self.key
    }

    fn left(&self) -> &Link<Self> {
        &self.left
    }

    fn right(&self) -> &Link<Self> {
        &self.right
    }

    fn left_mut(&mut self) -> &mut Link<Self> {
        &mut self.left
    }

    fn right_mut(&mut self) -> &mut Link<Self> {
        &mut self.right
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn set_height(&mut self, height: i32) {
        self.height = height;
    }
}
