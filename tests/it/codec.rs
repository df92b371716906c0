//! Round trips through the binary and markup forms

use crate::helpers::{chain, mixed, sample_values, scene};
use rustydoc::{DecodeError, Document, MarkupError, Value, WriteOptions, XmlElement};

#[test]
fn binary_round_trip_preserves_value_kinds() {
    let original = scene();
    original.set_property("blob", vec![0u8, 1, 2, 255]).unwrap();

    let decoded = Document::from_bytes(&original.to_bytes()).unwrap();
    assert!(decoded.is_equivalent_to(&original));
    assert!(matches!(decoded.get_property("tempo"), Value::Int(120)));
    assert!(matches!(decoded.get_property("gain"), Value::Double(g) if g == 0.75));
    assert!(matches!(
        decoded.get_child(1).get_child(0).get_property("start"),
        Value::Int64(1_000_000_000_000)
    ));
    assert!(matches!(decoded.get_property("blob"), Value::Binary(ref b) if b == &[0, 1, 2, 255]));
}

#[test]
fn binary_round_trip_of_deep_chain() {
    let (root, _) = chain(64);
    let decoded = Document::from_bytes(&root.to_bytes()).unwrap();
    assert!(decoded.is_equivalent_to(&root));
}

#[test]
fn binary_stream_round_trip() {
    let original = scene();
    let mut buffer = Vec::new();
    original.write_to(&mut buffer).unwrap();

    let mut cursor = std::io::Cursor::new(buffer);
    let decoded = Document::read_from(&mut cursor).unwrap();
    assert!(decoded.is_equivalent_to(&original));
}

#[test]
fn truncated_stream_keeps_complete_children() {
    let original = scene();
    let full = original.to_bytes();
    let second_layer = original.get_child(1).to_bytes();

    let decoded = Document::from_bytes(&full[..full.len() - second_layer.len()]).unwrap();
    assert_eq!(decoded.num_children(), 1);
    assert!(decoded.get_child(0).is_equivalent_to(&original.get_child(0)));

    // Cut inside the clip: the second layer survives without its child
    let decoded = Document::from_bytes(&full[..full.len() - 2]).unwrap();
    assert_eq!(decoded.num_children(), 2);
    assert_eq!(decoded.get_child(1).num_children(), 0);
}

#[test]
fn truncated_root_is_an_error() {
    let full = scene().to_bytes();
    assert!(matches!(
        Document::from_bytes(&full[..10]),
        Err(DecodeError::TruncatedStream)
    ));
}

#[test]
fn markup_round_trip_is_equivalent() {
    let original = scene();
    for options in [WriteOptions::default(), WriteOptions::compact()] {
        let xml = original.to_xml_string(&options).unwrap();
        let decoded = Document::from_xml_str(&xml).unwrap();
        assert!(decoded.is_equivalent_to(&original), "{xml}");
        assert!(decoded.get_property("tempo").is_string());
    }
}

#[test]
fn markup_round_trip_with_binary_values() {
    let original = Document::new("blob");
    original.set_property("data", vec![1u8, 2, 3]).unwrap();

    let xml = original.to_xml().unwrap().unwrap();
    assert!(xml.attribute("data").is_some_and(|d| d.starts_with("base64:")));

    let decoded = Document::from_xml(&xml).unwrap();
    assert!(decoded.is_equivalent_to(&original));
}

#[test]
fn markup_from_external_source() {
    let doc = Document::from_xml_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE project>
<project version="2">
  <!-- tracks follow -->
  <track name="drums" volume="-3.5"/>
  <track name="bass">ignored text<![CDATA[also ignored]]></track>
</project>"#,
    )
    .unwrap();

    assert!(doc.has_type("project"));
    assert_eq!(doc.num_children(), 2);
    assert_eq!(doc.get_child(0).get_property("volume").as_f64(), Some(-3.5));
    assert_eq!(doc.get_child(1).num_children(), 0);
}

#[test]
fn markup_errors() {
    assert!(matches!(
        Document::from_xml_str("<a>"),
        Err(DecodeError::Markup(MarkupError::UnexpectedEof { .. }))
    ));
    assert!(matches!(
        Document::from_xml_str(""),
        Err(DecodeError::Markup(MarkupError::NoRootElement))
    ));
    assert!(matches!(
        Document::from_xml(&XmlElement::text("loose")),
        Err(DecodeError::InvalidRootElement)
    ));
}

#[test]
fn binary_and_markup_agree() {
    let original = scene();
    let via_binary = Document::from_bytes(&original.to_bytes()).unwrap();
    let via_markup =
        Document::from_xml_str(&original.to_xml_string(&WriteOptions::default()).unwrap()).unwrap();
    assert!(via_binary.is_equivalent_to(&via_markup));
}

#[test]
fn mixed_documents_round_trip_through_both_codecs() {
    let values: Vec<Value> = sample_values().into_iter().filter(|v| !v.is_void()).collect();
    for seed in 0..12 {
        let original = mixed(seed, &values);

        let via_binary = Document::from_bytes(&original.to_bytes()).unwrap();
        assert!(via_binary.is_equivalent_to(&original), "binary, seed {seed}");
        assert_eq!(via_binary.to_bytes(), original.to_bytes());

        for options in [WriteOptions::default(), WriteOptions::compact()] {
            let xml = original.to_xml_string(&options).unwrap();
            let via_markup = Document::from_xml_str(&xml).unwrap();
            assert!(via_markup.is_equivalent_to(&original), "markup, seed {seed}: {xml}");
        }
    }
}

#[test]
fn void_properties_survive_both_codecs() {
    let original = Document::new("holder");
    original.set_property("nothing", Value::Void).unwrap();
    original.set_property("after", 1).unwrap();

    let via_binary = Document::from_bytes(&original.to_bytes()).unwrap();
    assert!(via_binary.get_property("nothing").is_void());
    assert!(via_binary.is_equivalent_to(&original));

    let xml = original.to_xml_string(&WriteOptions::compact()).unwrap();
    assert_eq!(xml, r#"<holder nothing="" after="1"/>"#);
    assert!(Document::from_xml_str(&xml).unwrap().is_equivalent_to(&original));
}

#[test]
fn nan_and_negative_zero_round_trip() {
    let original = Document::new("floats");
    original.set_property("nan", f64::NAN).unwrap();
    original.set_property("neg_zero", -0.0).unwrap();

    assert!(original.is_equivalent_to(&original.create_copy()));

    let via_binary = Document::from_bytes(&original.to_bytes()).unwrap();
    assert!(via_binary.is_equivalent_to(&original));
    assert!(matches!(via_binary.get_property("nan"), Value::Double(d) if d.is_nan()));
    assert!(matches!(
        via_binary.get_property("neg_zero"),
        Value::Double(d) if d == 0.0 && d.is_sign_negative()
    ));

    let xml = original.to_xml_string(&WriteOptions::compact()).unwrap();
    assert!(Document::from_xml_str(&xml).unwrap().is_equivalent_to(&original));
}

#[test]
fn deeply_nested_input_decodes_without_crashing() {
    let depth = 100_000;

    let mut bytes = [1, 1, b'a', 0, 1, 1].repeat(depth);
    bytes.extend([1, 1, b'a', 0, 0]);
    let from_binary = Document::from_bytes(&bytes).unwrap();

    let markup = format!("{}{}", "<a>".repeat(depth + 1), "</a>".repeat(depth + 1));
    let from_markup = Document::from_xml_str(&markup).unwrap();

    assert!(from_binary.is_equivalent_to(&from_markup));
    assert_eq!(from_binary.to_bytes(), bytes);
    assert!(from_binary.create_copy().is_equivalent_to(&from_binary));
}

#[test]
fn names_that_cannot_be_markup_are_rejected() {
    let doc = Document::new("my node");
    assert!(matches!(
        doc.to_xml_string(&WriteOptions::default()),
        Err(MarkupError::InvalidName { ref name }) if name == "my node"
    ));

    let doc = Document::new("node");
    doc.set_property("a b", 1).unwrap();
    assert!(matches!(doc.to_xml(), Err(MarkupError::InvalidName { ref name }) if name == "a b"));

    // The binary form carries any name
    let back = Document::from_bytes(&doc.to_bytes()).unwrap();
    assert_eq!(back.get_property("a b"), Value::Int(1));
}
