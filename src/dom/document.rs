//! Document handle
//!
//! `Document` is the public, value-typed face of a `Node`. Cloning a handle
//! is cheap and aliases the same node, so an edit made through one handle is
//! visible through every clone. `create_copy` is the explicit deep copy.
//!
//! An empty handle (no node) answers every query with a neutral value:
//! empty identifier, `Value::Void`, zero counts, empty handles.

use super::node::Node;
use super::strings::Identifier;
use crate::error::{TreeError, TreeResult};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct Document {
    node: Option<Arc<Node>>,
}

impl Document {
    /// An empty (invalid) document
    pub const fn empty() -> Self {
        Document { node: None }
    }

    /// Create a fresh document with the given type and no content.
    ///
    /// # Panics
    ///
    /// Panics if `ty` is empty. Use [`Document::try_new`] for untrusted names.
    pub fn new(ty: impl Into<Identifier>) -> Self {
        match Self::try_new(ty) {
            Ok(doc) => doc,
            Err(err) => panic!("Document::new: {err}"),
        }
    }

    pub fn try_new(ty: impl Into<Identifier>) -> TreeResult<Self> {
        let ty = ty.into();
        if ty.is_empty() {
            return Err(TreeError::EmptyType);
        }
        Ok(Self::from_node(Node::new(ty)))
    }

    pub(crate) fn from_node(node: Arc<Node>) -> Self {
        Document { node: Some(node) }
    }

    pub(crate) fn node(&self) -> Option<&Arc<Node>> {
        self.node.as_ref()
    }

    fn valid_node(&self) -> TreeResult<&Arc<Node>> {
        self.node.as_ref().ok_or(TreeError::InvalidHandle)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.node.is_some()
    }

    /// Deep copy sharing nothing with `self`; empty for an empty document
    pub fn create_copy(&self) -> Document {
        Document {
            node: self.node.as_ref().map(|n| n.deep_copy()),
        }
    }

    /// Structural comparison. Aliases of the same node, and two empty
    /// documents, are always equivalent.
    pub fn is_equivalent_to(&self, other: &Document) -> bool {
        match (&self.node, &other.node) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a.is_equivalent_to(b),
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // Type
    // ------------------------------------------------------------------

    pub fn get_type(&self) -> Identifier {
        self.node
            .as_ref()
            .map_or_else(Identifier::null, |n| n.ty().clone())
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.node.as_ref().is_some_and(|n| n.ty().as_str() == name)
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    /// Property value, or `Value::Void` if absent or the document is empty
    pub fn get_property(&self, name: &str) -> Value {
        self.get_property_or(name, Value::Void)
    }

    pub fn get_property_or(&self, name: &str, default: impl Into<Value>) -> Value {
        self.node
            .as_ref()
            .and_then(|n| n.properties().get(name).cloned())
            .unwrap_or_else(|| default.into())
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.node
            .as_ref()
            .is_some_and(|n| n.properties().contains(name))
    }

    /// Set a property, replacing an existing value at its original position.
    /// Returns `self` so calls can be chained with `?`.
    pub fn set_property(
        &self,
        name: impl Into<Identifier>,
        value: impl Into<Value>,
    ) -> TreeResult<&Self> {
        let node = self.valid_node()?;
        let name = name.into();
        if name.is_empty() {
            return Err(TreeError::EmptyPropertyName);
        }
        node.properties_mut().set(name, value.into());
        Ok(self)
    }

    /// Remove a property; returns whether it existed
    pub fn remove_property(&self, name: &str) -> bool {
        self.node
            .as_ref()
            .is_some_and(|n| n.properties_mut().remove(name).is_some())
    }

    pub fn num_properties(&self) -> usize {
        self.node.as_ref().map_or(0, |n| n.properties().len())
    }

    /// Name at `index`, or the empty identifier if out of range
    pub fn property_name(&self, index: usize) -> Identifier {
        self.node
            .as_ref()
            .and_then(|n| n.properties().name_at(index).cloned())
            .unwrap_or_default()
    }

    /// Snapshot of all properties in order
    pub fn properties(&self) -> Vec<(Identifier, Value)> {
        self.node.as_ref().map_or_else(Vec::new, |n| {
            n.properties()
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect()
        })
    }

    // ------------------------------------------------------------------
    // Children
    // ------------------------------------------------------------------

    pub fn num_children(&self) -> usize {
        self.node.as_ref().map_or(0, |n| n.num_children())
    }

    /// Child at `index`, or an empty document if out of range
    pub fn get_child(&self, index: usize) -> Document {
        Document {
            node: self.node.as_ref().and_then(|n| n.child(index)),
        }
    }

    /// First direct child with the given type, or an empty document
    pub fn child_with_type(&self, ty: &str) -> Document {
        Document {
            node: self.node.as_ref().and_then(|n| n.child_with_type(ty)),
        }
    }

    /// Position of `child` among this document's children
    pub fn index_of(&self, child: &Document) -> Option<usize> {
        let (node, child) = (self.node.as_ref()?, child.node.as_ref()?);
        node.index_of(child)
    }

    /// Insert `child` at `index` (past the end appends).
    ///
    /// The child must not already have a parent, must not be this document,
    /// and must not be one of its ancestors. An empty child is ignored.
    pub fn add_child(&self, child: &Document, index: usize) -> TreeResult<()> {
        let node = self.valid_node()?;
        let Some(child) = child.node.as_ref() else {
            return Ok(());
        };
        node.add_child(child, index).inspect_err(|err| {
            tracing::debug!(parent = %node.ty(), child = %child.ty(), %err, "rejected child");
        })
    }

    pub fn append_child(&self, child: &Document) -> TreeResult<()> {
        self.add_child(child, usize::MAX)
    }

    /// Detach and return the child at `index`; empty if out of range
    pub fn remove_child(&self, index: usize) -> Document {
        Document {
            node: self.node.as_ref().and_then(|n| n.remove_child(index)),
        }
    }

    /// Parent document, or empty for a root or an empty document
    pub fn get_parent(&self) -> Document {
        Document {
            node: self.node.as_ref().and_then(|n| n.parent()),
        }
    }

    /// Iterate over direct children.
    ///
    /// The child list is captured when this is called; later structural
    /// edits are not reflected in a running iteration.
    pub fn children(&self) -> Children {
        let snapshot = self
            .node
            .as_ref()
            .map_or_else(Vec::new, |n| n.children_snapshot());
        Children {
            inner: snapshot.into_iter(),
        }
    }
}

/// Identity comparison: true when both handles alias the same node (or both are empty)
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        match (&self.node, &other.node) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Eq for Document {}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            None => f.write_str("Document(empty)"),
            Some(node) => f
                .debug_struct("Document")
                .field("type", node.ty())
                .field("properties", &*node.properties())
                .field("children", &node.num_children())
                .finish(),
        }
    }
}

/// Iterator over a document's children, see [`Document::children`]
pub struct Children {
    inner: std::vec::IntoIter<Arc<Node>>,
}

impl Iterator for Children {
    type Item = Document;

    fn next(&mut self) -> Option<Document> {
        self.inner.next().map(Document::from_node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Children {
    fn next_back(&mut self) -> Option<Document> {
        self.inner.next_back().map(Document::from_node)
    }
}

impl ExactSizeIterator for Children {}

impl<'a> IntoIterator for &'a Document {
    type Item = Document;
    type IntoIter = Children;

    fn into_iter(self) -> Children {
        self.children()
    }
}
