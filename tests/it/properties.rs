//! Property ordering, uniqueness and replacement

use rustydoc::{Document, Identifier, TreeError, Value};

#[test]
fn replacing_keeps_position() {
    let doc = Document::new("n");
    doc.set_property("a", 1).unwrap();
    doc.set_property("b", 2).unwrap();
    doc.set_property("c", 3).unwrap();
    doc.set_property("b", "two").unwrap();

    assert_eq!(doc.num_properties(), 3);
    let names: Vec<String> = (0..3).map(|i| doc.property_name(i).to_string()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(doc.get_property("b"), Value::from("two"));
}

#[test]
fn chained_setters() -> Result<(), TreeError> {
    let doc = Document::new("n");
    doc.set_property("x", 1)?.set_property("y", 2.5)?;
    assert_eq!(doc.get_property("y"), Value::Double(2.5));
    Ok(())
}

#[test]
fn removal_and_defaults() {
    let doc = Document::new("n");
    doc.set_property("gone", true).unwrap();
    assert!(doc.has_property("gone"));
    assert!(doc.remove_property("gone"));
    assert!(!doc.remove_property("gone"));
    assert!(doc.get_property("gone").is_void());
    assert_eq!(doc.get_property_or("gone", 7), Value::Int(7));
    assert!(doc.property_name(0).is_empty());
}

#[test]
fn empty_names_are_rejected() {
    let doc = Document::new("n");
    assert_eq!(doc.set_property("", 1).err(), Some(TreeError::EmptyPropertyName));
    assert_eq!(doc.num_properties(), 0);
    assert_eq!(Document::try_new("").err(), Some(TreeError::EmptyType));
}

#[test]
fn identifiers_are_interned() {
    let a = Identifier::from("shared-name");
    let b = Identifier::from(String::from("shared-name"));
    assert_eq!(a, b);
    assert_eq!(a, "shared-name");
    assert_eq!(a.as_str(), b.as_str());
}

#[test]
fn snapshot_reflects_order() {
    let doc = Document::new("n");
    doc.set_property("z", 1).unwrap();
    doc.set_property("a", "x").unwrap();
    let props = doc.properties();
    assert_eq!(props.len(), 2);
    assert_eq!(props[0].0, "z");
    assert_eq!(props[1].1, Value::from("x"));
}
