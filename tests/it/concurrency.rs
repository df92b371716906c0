//! Handles shared across threads

use crate::helpers::scene;
use rustydoc::Document;
use std::thread;

#[test]
fn documents_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Document>();
}

#[test]
fn readers_on_many_threads() {
    let doc = scene();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let doc = doc.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    assert_eq!(doc.num_children(), 2);
                    assert!(doc.get_child(1).get_child(0).has_type("clip"));
                }
                doc.to_bytes()
            })
        })
        .collect();

    let expected = doc.to_bytes();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn serialized_writers_see_each_others_edits() {
    let doc = Document::new("counter");
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let doc = doc.clone();
            thread::spawn(move || {
                for i in 0..25 {
                    let child = Document::new("item");
                    child.set_property("id", (t * 100 + i) as i64).unwrap();
                    doc.append_child(&child).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(doc.num_children(), 100);
    assert!(doc.children().all(|c| c.get_parent() == doc));
}
