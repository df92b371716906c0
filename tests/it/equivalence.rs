//! Structural equivalence versus handle identity

use crate::helpers::scene;
use rustydoc::{Document, Value};

#[test]
fn separately_built_trees_are_equivalent_but_not_equal() {
    let a = scene();
    let b = scene();
    assert!(a.is_equivalent_to(&b));
    assert!(b.is_equivalent_to(&a));
    assert_ne!(a, b);
}

#[test]
fn equivalence_is_reflexive_through_aliases() {
    let a = scene();
    assert!(a.is_equivalent_to(&a.clone()));
}

#[test]
fn property_order_matters() {
    let a = Document::new("n");
    a.set_property("x", 1).unwrap();
    a.set_property("y", 2).unwrap();

    let b = Document::new("n");
    b.set_property("y", 2).unwrap();
    b.set_property("x", 1).unwrap();

    assert!(!a.is_equivalent_to(&b));
}

#[test]
fn child_order_matters() {
    let a = Document::new("n");
    a.append_child(&Document::new("p")).unwrap();
    a.append_child(&Document::new("q")).unwrap();

    let b = Document::new("n");
    b.append_child(&Document::new("q")).unwrap();
    b.append_child(&Document::new("p")).unwrap();

    assert!(!a.is_equivalent_to(&b));
}

#[test]
fn types_and_values_are_compared() {
    assert!(!Document::new("a").is_equivalent_to(&Document::new("b")));

    let a = Document::new("n");
    a.set_property("v", 1).unwrap();
    let b = Document::new("n");
    b.set_property("v", 2).unwrap();
    assert!(!a.is_equivalent_to(&b));

    b.set_property("v", Value::Int64(1)).unwrap();
    assert!(a.is_equivalent_to(&b));
}

#[test]
fn deep_differences_are_found() {
    let a = scene();
    let b = scene();
    b.get_child(1).get_child(0).set_property("extra", true).unwrap();
    assert!(!a.is_equivalent_to(&b));
}

#[test]
fn empty_documents() {
    let empty = Document::empty();
    assert!(empty.is_equivalent_to(&Document::empty()));
    assert!(!empty.is_equivalent_to(&Document::new("a")));
    assert!(!Document::new("a").is_equivalent_to(&empty));
    assert_eq!(empty, Document::default());
}
