use graft_ids::NativeHandle;
use rustc_hash::FxHashMap;

use crate::node::{Node, WeakNode};

/// Native object → wrapper identity map.
///
/// Entries hold weak references: a wrapper nobody holds is dropped and its
/// entry goes stale until [`WrapperRegistry::prune`] or the next lookup
/// replaces it.
#[derive(Default)]
pub struct WrapperRegistry {
    map: FxHashMap<NativeHandle, WeakNode>,
}

impl WrapperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live wrapper registered for `handle`.
    pub fn get(&self, handle: NativeHandle) -> Option<Node> {
        self.map.get(&handle).and_then(WeakNode::upgrade)
    }

    /// The live wrapper for `handle`, or the one `create` builds, which is
    /// then registered.
    pub fn get_or_insert_with(&mut self, handle: NativeHandle, create: impl FnOnce() -> Node) -> Node {
        if let Some(node) = self.get(handle) {
            return node;
        }
        let node = create();
        self.map.insert(handle, node.downgrade());
        node
    }

    /// Registers `node` for `handle`, returning the live wrapper it replaced.
    pub fn insert(&mut self, handle: NativeHandle, node: &Node) -> Option<Node> {
        let previous = self
            .map
            .insert(handle, node.downgrade())
            .and_then(|weak| weak.upgrade())
            .filter(|previous| previous != node);
        if previous.is_some() {
            log::warn!("{handle} was already wrapped; the newer wrapper replaces it");
        }
        previous
    }

    pub fn remove(&mut self, handle: NativeHandle) -> bool {
        self.map.remove(&handle).is_some()
    }

    /// Removes the entry only while it still points at `node`.
    pub fn release(&mut self, handle: NativeHandle, node: &Node) -> bool {
        let registered = self
            .map
            .get(&handle)
            .and_then(WeakNode::upgrade)
            .is_some_and(|current| current == *node);
        if registered {
            self.map.remove(&handle);
        }
        registered
    }

    /// Drops entries whose wrapper is gone or whose native object is no
    /// longer `alive`. Returns how many were dropped.
    pub fn prune(&mut self, alive: impl Fn(NativeHandle) -> bool) -> usize {
        let before = self.map.len();
        self.map
            .retain(|&handle, weak| weak.is_live() && alive(handle));
        let pruned = before - self.map.len();
        if pruned > 0 {
            log::debug!("pruned {pruned} stale wrapper entries");
        }
        pruned
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
