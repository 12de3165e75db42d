//! Tests for the panel state machine and click-outside handling.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use lsu_dropdown::prelude::*;

fn colors() -> Vec<Item> {
    ["Green", "Red", "Blue"].into_iter().map(Item::from).collect()
}

fn dropdown() -> Dropdown {
    Dropdown::new(DropdownConfig::new().data(colors()))
}

#[test]
fn test_toggle_twice_restores_state() {
    let dropdown = dropdown();
    assert_eq!(dropdown.panel_state(), PanelState::Inactive);
    assert_eq!(dropdown.toggle(None), PanelState::Active);
    assert_eq!(dropdown.toggle(None), PanelState::Inactive);
    assert!(!dropdown.is_open());
}

#[test]
fn test_opening_tags_interaction() {
    let dropdown = dropdown();
    let mut click = Interaction::new();
    dropdown.toggle(Some(&mut click));
    assert_eq!(click.origin(), Some(dropdown.id()));
    assert!(click.is_from(dropdown.id()));
}

#[test]
fn test_own_click_keeps_panel_open() {
    let bus = InteractionBus::new();
    let dropdown = dropdown();
    dropdown.listen(&bus);

    let mut click = Interaction::new();
    dropdown.toggle(Some(&mut click));
    assert_eq!(bus.publish(&click), 1);
    assert!(dropdown.is_open());
}

#[test]
fn test_outside_click_closes_panel() {
    let bus = InteractionBus::new();
    let dropdown = dropdown();
    dropdown.listen(&bus);
    dropdown.toggle(None);

    bus.publish(&Interaction::new());
    assert_eq!(dropdown.panel_state(), PanelState::Inactive);
}

#[test]
fn test_opening_one_closes_the_other() {
    let bus = InteractionBus::new();
    let first = dropdown();
    let second = dropdown();
    first.listen(&bus);
    second.listen(&bus);

    let mut click = Interaction::new();
    first.toggle(Some(&mut click));
    bus.publish(&click);

    let mut click = Interaction::new();
    second.toggle(Some(&mut click));
    bus.publish(&click);

    assert!(!first.is_open());
    assert!(second.is_open());
}

#[test]
fn test_item_click_stops_propagation() {
    let bus = InteractionBus::new();
    let dropdown = Dropdown::new(DropdownConfig::new().data(colors()).multiple());
    dropdown.listen(&bus);

    let mut click = Interaction::new();
    dropdown.toggle(Some(&mut click));
    bus.publish(&click);

    let mut click = Interaction::new();
    dropdown.item_click(Item::from("Red"), &mut click);
    assert!(click.is_propagation_stopped());
    assert_eq!(bus.publish(&click), 0);
    assert!(dropdown.is_open());

    let mut click = Interaction::new();
    dropdown.remove_item(&Item::from("Red"), &mut click);
    assert!(click.is_propagation_stopped());
    assert!(dropdown.selection().is_empty());
}

#[test]
fn test_on_document_click() {
    let dropdown = dropdown();
    let mut click = Interaction::new();
    dropdown.toggle(Some(&mut click));

    dropdown.on_document_click(&click);
    assert!(dropdown.is_open());

    dropdown.on_document_click(&Interaction::new());
    assert!(!dropdown.is_open());
}

#[test]
fn test_dropped_dropdown_is_pruned() {
    let bus = InteractionBus::new();
    let kept = dropdown();
    kept.listen(&bus);
    {
        let dropped = dropdown();
        dropped.listen(&bus);
        assert_eq!(bus.listener_count(), 2);
    }
    assert_eq!(bus.listener_count(), 1);
    assert_eq!(bus.publish(&Interaction::new()), 1);
}

#[test]
fn test_clones_share_state() {
    let bus = InteractionBus::new();
    let dropdown = dropdown();
    dropdown.listen(&bus);
    let handle = dropdown.clone();
    drop(dropdown);

    handle.toggle(None);
    assert_eq!(bus.publish(&Interaction::new()), 1);
    assert!(!handle.is_open());
}

#[test]
fn test_touched_fires_when_panel_closes() {
    let bus = InteractionBus::new();
    let dropdown = dropdown();
    dropdown.listen(&bus);
    let touched = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&touched);
    dropdown.register_on_touched(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    dropdown.toggle(None);
    assert_eq!(touched.load(Ordering::SeqCst), 0);
    dropdown.toggle(None);
    assert_eq!(touched.load(Ordering::SeqCst), 1);

    dropdown.toggle(None);
    bus.publish(&Interaction::new());
    assert_eq!(touched.load(Ordering::SeqCst), 2);

    // Already closed: nothing to touch.
    bus.publish(&Interaction::new());
    assert_eq!(touched.load(Ordering::SeqCst), 2);
}

#[test]
fn test_disabled_ignores_toggle() {
    let dropdown = Dropdown::new(DropdownConfig::new().data(colors()).disabled());
    let mut click = Interaction::new();
    assert_eq!(dropdown.toggle(Some(&mut click)), PanelState::Inactive);
    assert_eq!(click.origin(), None);
}

#[test]
fn test_ids_are_unique() {
    let a = dropdown();
    let b = dropdown();
    assert_ne!(a.id(), b.id());
    assert!(a.id_string().starts_with("lsu_dropdown_"));
}
