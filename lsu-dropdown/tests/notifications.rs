//! Tests for change notifications.

use std::sync::{Arc, Mutex};

use lsu_dropdown::prelude::*;
use serde_json::json;

fn colors() -> Vec<Item> {
    ["Green", "Red", "Blue"].into_iter().map(Item::from).collect()
}

#[test]
fn test_pick_notifies_host_and_subscribers() {
    let dropdown = Dropdown::new(DropdownConfig::new().data(colors()));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    dropdown.register_on_change(Arc::new(move |selection: &Selection| {
        sink.lock().unwrap().push(selection.to_json());
    }));
    let mut changes = dropdown.subscribe();

    dropdown.pick(Item::from("Red"));

    assert_eq!(*seen.lock().unwrap(), vec![json!("Red")]);
    assert_eq!(
        changes.try_recv().unwrap(),
        Selection::Single(Some(Item::from("Red")))
    );
}

#[test]
fn test_every_mutation_is_broadcast() {
    let dropdown = Dropdown::new(DropdownConfig::new().data(colors()).multiple());
    let mut changes = dropdown.subscribe();

    dropdown.pick(Item::from("Red"));
    dropdown.pick(Item::from("Blue"));
    dropdown.remove(&Item::from("Red"));

    assert_eq!(changes.try_recv().unwrap().len(), 1);
    assert_eq!(changes.try_recv().unwrap().len(), 2);
    assert_eq!(
        changes.try_recv().unwrap(),
        Selection::Multiple(vec![Item::from("Blue")])
    );
    assert!(changes.try_recv().is_err());
}

#[test]
fn test_last_registered_callback_wins() {
    let dropdown = Dropdown::new(DropdownConfig::new().data(colors()));
    let calls = Arc::new(Mutex::new(Vec::new()));

    let first = Arc::clone(&calls);
    dropdown.register_on_change(Arc::new(move |_: &Selection| {
        first.lock().unwrap().push("first");
    }));
    let second = Arc::clone(&calls);
    dropdown.register_on_change(Arc::new(move |_: &Selection| {
        second.lock().unwrap().push("second");
    }));

    dropdown.pick(Item::from("Green"));
    assert_eq!(*calls.lock().unwrap(), vec!["second"]);
}

#[test]
fn test_callback_may_read_dropdown() {
    let dropdown = Dropdown::new(DropdownConfig::new().data(colors()));
    let handle = dropdown.clone();
    let value = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&value);
    dropdown.register_on_change(Arc::new(move |_: &Selection| {
        *sink.lock().unwrap() = Some(handle.value());
    }));

    dropdown.pick(Item::from("Blue"));
    assert_eq!(*value.lock().unwrap(), Some(json!("Blue")));
}

#[test]
fn test_dirty_tracking() {
    let dropdown = Dropdown::new(DropdownConfig::new().data(colors()));
    assert!(!dropdown.is_dirty());
    dropdown.toggle(None);
    assert!(dropdown.is_dirty());
    dropdown.clear_dirty();
    assert!(!dropdown.is_dirty());
}
