//! Shared tree node
//!
//! A `Node` owns its children through `Arc` and points back to its parent
//! through a `Weak`, so the parent link never keeps a tree alive. All
//! structural invariants are enforced here:
//! - a node is never its own descendant
//! - a node is in at most one parent's child list, and its parent link is
//!   set exactly while it is
//!
//! State sits behind `parking_lot::RwLock`s for memory safety only. Callers
//! serialize structural edits; no lock is held across calls into user code.

use super::properties::PropertySet;
use super::strings::Identifier;
use crate::error::{TreeError, TreeResult};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::{Arc, Weak};

pub(crate) struct Node {
    /// Type tag, fixed for the node's lifetime
    ty: Identifier,
    properties: RwLock<PropertySet>,
    children: RwLock<Vec<Arc<Node>>>,
    /// Back link to the owning node; empty for a root
    parent: RwLock<Weak<Node>>,
}

impl Node {
    pub(crate) fn new(ty: Identifier) -> Arc<Node> {
        Self::with_properties(ty, PropertySet::new())
    }

    pub(crate) fn with_properties(ty: Identifier, properties: PropertySet) -> Arc<Node> {
        Arc::new(Node {
            ty,
            properties: RwLock::new(properties),
            children: RwLock::new(Vec::new()),
            parent: RwLock::new(Weak::new()),
        })
    }

    #[inline]
    pub(crate) fn ty(&self) -> &Identifier {
        &self.ty
    }

    pub(crate) fn properties(&self) -> RwLockReadGuard<'_, PropertySet> {
        self.properties.read()
    }

    pub(crate) fn properties_mut(&self) -> RwLockWriteGuard<'_, PropertySet> {
        self.properties.write()
    }

    pub(crate) fn children(&self) -> RwLockReadGuard<'_, Vec<Arc<Node>>> {
        self.children.read()
    }

    pub(crate) fn num_children(&self) -> usize {
        self.children.read().len()
    }

    pub(crate) fn child(&self, index: usize) -> Option<Arc<Node>> {
        self.children.read().get(index).cloned()
    }

    /// Copy of the child list, taken under a short read lock
    pub(crate) fn children_snapshot(&self) -> Vec<Arc<Node>> {
        self.children.read().clone()
    }

    pub(crate) fn parent(&self) -> Option<Arc<Node>> {
        self.parent.read().upgrade()
    }

    pub(crate) fn reserve_children(&self, additional: usize) {
        self.children.write().reserve(additional);
    }

    /// First direct child with the given type
    pub(crate) fn child_with_type(&self, ty: &str) -> Option<Arc<Node>> {
        self.children
            .read()
            .iter()
            .find(|c| c.ty.as_str() == ty)
            .cloned()
    }

    /// True if `candidate` is found while walking up from this node's parent
    pub(crate) fn is_descendant_of(&self, candidate: &Node) -> bool {
        let mut current = self.parent();
        while let Some(node) = current {
            if std::ptr::eq(Arc::as_ptr(&node), candidate) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Insert `child` at `index`; an index past the end appends.
    pub(crate) fn add_child(self: &Arc<Self>, child: &Arc<Node>, index: usize) -> TreeResult<()> {
        if Arc::ptr_eq(self, child) {
            return Err(TreeError::SelfAttach);
        }
        if self.is_descendant_of(child) {
            return Err(TreeError::WouldCreateCycle);
        }

        let mut parent_slot = child.parent.write();
        if parent_slot.strong_count() > 0 {
            return Err(TreeError::AlreadyAttached);
        }

        {
            let mut children = self.children.write();
            let index = index.min(children.len());
            children.insert(index, child.clone());
        }
        *parent_slot = Arc::downgrade(self);

        Ok(())
    }

    pub(crate) fn append_child(self: &Arc<Self>, child: &Arc<Node>) -> TreeResult<()> {
        self.add_child(child, usize::MAX)
    }

    /// Append a child that was built exclusively for this node (copy, decode).
    pub(crate) fn adopt(self: &Arc<Self>, child: Arc<Node>) {
        *child.parent.write() = Arc::downgrade(self);
        self.children.write().push(child);
    }

    /// Detach the child at `index`, clearing its parent link first
    pub(crate) fn remove_child(&self, index: usize) -> Option<Arc<Node>> {
        let mut children = self.children.write();
        if index >= children.len() {
            return None;
        }
        *children[index].parent.write() = Weak::new();
        Some(children.remove(index))
    }

    pub(crate) fn index_of(&self, child: &Node) -> Option<usize> {
        self.children
            .read()
            .iter()
            .position(|c| std::ptr::eq(Arc::as_ptr(c), child))
    }

    /// Copy with no sharing with the source, built level by level
    pub(crate) fn deep_copy(&self) -> Arc<Node> {
        let copy = self.shallow_copy();
        let mut pending = vec![(self.children_snapshot(), copy.clone())];

        while let Some((sources, target)) = pending.pop() {
            target.reserve_children(sources.len());
            for source in sources {
                let child = source.shallow_copy();
                target.adopt(child.clone());
                pending.push((source.children_snapshot(), child));
            }
        }
        copy
    }

    fn shallow_copy(&self) -> Arc<Node> {
        Self::with_properties(self.ty.clone(), self.properties.read().clone())
    }

    /// Structural equality: type, ordered properties, children in order
    pub(crate) fn is_equivalent_to(&self, other: &Node) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if !self.same_shape(other) {
            return false;
        }

        let mut pending: Vec<(Arc<Node>, Arc<Node>)> = self
            .children_snapshot()
            .into_iter()
            .zip(other.children_snapshot())
            .collect();

        while let Some((a, b)) = pending.pop() {
            if Arc::ptr_eq(&a, &b) {
                continue;
            }
            if !a.same_shape(&b) {
                return false;
            }
            pending.extend(a.children_snapshot().into_iter().zip(b.children_snapshot()));
        }
        true
    }

    /// Type, properties and child count; children themselves are not compared
    fn same_shape(&self, other: &Node) -> bool {
        if self.ty != other.ty || self.num_children() != other.num_children() {
            return false;
        }
        let (props, other_props) = (self.properties.read(), other.properties.read());
        props.len() == other_props.len() && *props == *other_props
    }
}

impl Drop for Node {
    /// Tears the subtree down without recursing: children whose last owner is
    /// this tree hand their own children to the work list before they go.
    fn drop(&mut self) {
        let mut pending = std::mem::take(self.children.get_mut());
        while let Some(child) = pending.pop() {
            *child.parent.write() = Weak::new();
            if Arc::strong_count(&child) == 1 {
                pending.append(&mut child.children.write());
            }
        }
    }
}
