//! Sharing, copying and structural rules

use crate::helpers::{chain, scene};
use rustydoc::{Document, TreeError, Value};

#[test]
fn clones_alias_the_same_node() {
    let doc = Document::new("a");
    let alias = doc.clone();
    alias.set_property("x", 1).unwrap();

    assert_eq!(doc.get_property("x"), Value::Int(1));
    assert_eq!(doc, alias);
}

#[test]
fn copies_are_independent() {
    let original = scene();
    let copy = original.create_copy();

    assert_ne!(copy, original);
    assert!(copy.is_equivalent_to(&original));
    assert!(!copy.get_parent().is_valid());

    copy.get_child(1).get_child(0).set_property("label", "changed").unwrap();
    copy.remove_child(0);

    assert_eq!(original.num_children(), 2);
    assert_eq!(
        original.get_child(1).get_child(0).get_property("label"),
        Value::from("Fade <in> & \"out\"")
    );
    assert!(!copy.is_equivalent_to(&original));
}

#[test]
fn copy_of_a_child_has_no_parent() {
    let root = scene();
    let layer = root.get_child(1);
    let copy = layer.create_copy();

    assert_eq!(layer.get_parent(), root);
    assert!(!copy.get_parent().is_valid());
    assert_eq!(copy.get_child(0).get_parent(), copy);
}

#[test]
fn self_attach_is_rejected() {
    let doc = Document::new("a");
    assert_eq!(doc.append_child(&doc), Err(TreeError::SelfAttach));
    assert_eq!(doc.num_children(), 0);
}

#[test]
fn ancestor_attach_is_rejected() {
    let (root, deepest) = chain(5);
    assert_eq!(deepest.append_child(&root), Err(TreeError::WouldCreateCycle));
    assert!(!root.get_parent().is_valid());
    assert_eq!(deepest.num_children(), 0);
}

#[test]
fn attached_child_must_be_removed_first() {
    let first = Document::new("first");
    let second = Document::new("second");
    let child = Document::new("child");

    first.append_child(&child).unwrap();
    assert_eq!(second.append_child(&child), Err(TreeError::AlreadyAttached));
    assert_eq!(child.get_parent(), first);

    let removed = first.remove_child(0);
    assert_eq!(removed, child);
    assert!(!child.get_parent().is_valid());

    second.append_child(&child).unwrap();
    assert_eq!(child.get_parent(), second);
}

#[test]
fn insert_position_is_clamped() {
    let root = Document::new("root");
    for name in ["a", "b", "c"] {
        root.add_child(&Document::new(name), 100).unwrap();
    }
    root.add_child(&Document::new("first"), 0).unwrap();
    root.add_child(&Document::new("middle"), 2).unwrap();

    let order: Vec<String> = root.children().map(|c| c.get_type().to_string()).collect();
    assert_eq!(order, vec!["first", "a", "middle", "b", "c"]);
}

#[test]
fn dropping_the_parent_clears_back_links() {
    let child = Document::new("child");
    {
        let parent = Document::new("parent");
        parent.append_child(&child).unwrap();
        assert!(child.get_parent().is_valid());
    }
    assert!(!child.get_parent().is_valid());

    let adopter = Document::new("adopter");
    adopter.append_child(&child).unwrap();
    assert_eq!(child.get_parent(), adopter);
}

#[test]
fn children_keep_subtrees_alive() {
    let root = Document::new("root");
    {
        let (sub, deepest) = chain(3);
        deepest.set_property("leaf", true).unwrap();
        root.append_child(&sub).unwrap();
    }
    let leaf = root.get_child(0).get_child(0).get_child(0);
    assert_eq!(leaf.get_property("leaf"), Value::Bool(true));
    assert_eq!(leaf.get_parent().get_parent().get_parent(), root);
}

#[test]
fn empty_documents_are_neutral() {
    let empty = Document::empty();
    assert!(!empty.is_valid());
    assert!(empty.get_type().is_empty());
    assert_eq!(empty.get_property("x"), Value::Void);
    assert_eq!(empty.num_children(), 0);
    assert!(!empty.get_child(0).is_valid());
    assert_eq!(empty.children().count(), 0);
    assert_eq!(empty.set_property("x", 1).err(), Some(TreeError::InvalidHandle));

    let root = Document::new("root");
    root.append_child(&empty).unwrap();
    assert_eq!(root.num_children(), 0);
}

#[test]
fn iteration_uses_a_snapshot() {
    let root = scene();
    let mut seen = 0;
    for child in &root {
        root.append_child(&Document::new("late")).unwrap();
        assert!(child.has_type("layer"));
        seen += 1;
    }
    assert_eq!(seen, 2);
    assert_eq!(root.num_children(), 4);
}
