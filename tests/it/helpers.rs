//! Shared builders for integration tests

use rustydoc::{Document, Value};

/// A small scene: two layers, the second holding a clip
pub fn scene() -> Document {
    let scene = Document::new("scene");
    scene.set_property("name", "intro").unwrap();
    scene.set_property("tempo", 120).unwrap();
    scene.set_property("gain", 0.75).unwrap();

    let layer_a = Document::new("layer");
    layer_a.set_property("id", "a").unwrap();
    layer_a.set_property("muted", false).unwrap();

    let layer_b = Document::new("layer");
    layer_b.set_property("id", "b").unwrap();

    let clip = Document::new("clip");
    clip.set_property("start", 1_000_000_000_000i64).unwrap();
    clip.set_property("label", "Fade <in> & \"out\"").unwrap();
    layer_b.append_child(&clip).unwrap();

    scene.append_child(&layer_a).unwrap();
    scene.append_child(&layer_b).unwrap();
    scene
}

/// A chain `depth` levels deep; returns (root, deepest)
pub fn chain(depth: usize) -> (Document, Document) {
    let root = Document::new("level");
    let mut current = root.clone();
    for i in 1..depth {
        let next = Document::new("level");
        next.set_property("depth", i as i64).unwrap();
        current.append_child(&next).unwrap();
        current = next;
    }
    (root, current)
}

/// One value of every kind, with the awkward cases of each
pub fn sample_values() -> Vec<Value> {
    vec![
        Value::Bool(true),
        Value::Bool(false),
        Value::Int(0),
        Value::Int(-7),
        Value::Int(i32::MAX),
        Value::Int64(i64::MIN),
        Value::Int64(1 << 40),
        Value::Double(0.1 + 0.2),
        Value::Double(-2.5e-8),
        Value::Double(1e300),
        Value::Double(f64::NAN),
        Value::Double(-0.0),
        Value::Double(f64::INFINITY),
        Value::from("plain"),
        Value::from(""),
        Value::from(" padded \t\r\n"),
        Value::from("<&>\"'"),
        Value::from("ünïcødé ✓"),
        Value::Binary(Vec::new()),
        Value::Binary(vec![0, 255, 10, 13]),
    ]
}

/// A few levels of nodes whose properties cycle through `values`
/// starting at `seed`, so each seed gives a different mix
pub fn mixed(seed: usize, values: &[Value]) -> Document {
    const NAMES: [&str; 5] = ["p", "_q", "ns:r", "s.t-u", "ünï"];
    let mut next = seed;
    let mut take = || {
        next += 7;
        values[next % values.len()].clone()
    };

    let root = Document::new("mixed");
    let mut parents = vec![root.clone()];
    for level in 0..3 {
        let mut created = Vec::new();
        for (k, parent) in parents.iter().enumerate() {
            for i in 0..=(seed + level + k) % 3 {
                let child = Document::new(if i % 2 == 0 { "node" } else { "item" });
                for name in &NAMES[..(seed + i) % NAMES.len() + 1] {
                    child.set_property(*name, take()).unwrap();
                }
                parent.append_child(&child).unwrap();
                created.push(child);
            }
        }
        parents = created;
    }
    root
}
