//! Dropdown Demo
//!
//! Walks through the dropdown core the way the demo page does:
//! - Single select over plain strings, seeded with a value
//! - Single select over records, seeded by id
//! - Multiple select with removal
//! - Multiple select with search
//! - Click-outside closing across several dropdowns
//!
//! Pass a JSON config file to drive an extra dropdown from it:
//!
//! ```text
//! lsu-demo my-dropdown.json
//! ```

use std::fs::File;
use std::sync::Arc;

use log::LevelFilter;
use lsu_dropdown::prelude::*;
use serde_json::json;
use simplelog::{Config, WriteLogger};

fn colors() -> Vec<Item> {
    ["Green", "Red", "Blue", "Yellow", "Black"]
        .into_iter()
        .map(Item::from)
        .collect()
}

fn persons() -> lsu_dropdown::Result<Vec<Item>> {
    let names = ["Tom", "Jerry", "Jim"];
    let ages = [18, 25, 15];
    let records = (0..12)
        .map(|i| json!({ "id": i + 1, "name": names[i % 3], "age": ages[i % 3] }))
        .collect();
    Item::list_from_json(serde_json::Value::Array(records))
}

fn show(title: &str, dropdown: &Dropdown) {
    println!(
        "{title:<18} [{}] {} -> {}",
        dropdown.panel_state(),
        dropdown.display_text(),
        dropdown.value()
    );
}

fn report_changes(name: &'static str, dropdown: &Dropdown) {
    dropdown.register_on_change(Arc::new(move |selection: &Selection| {
        log::info!("{name} changed: {}", selection.to_json());
    }));
    dropdown.register_on_touched(Arc::new(move || {
        log::info!("{name} touched");
    }));
}

fn run() -> lsu_dropdown::Result<()> {
    let bus = InteractionBus::global();
    let persons = persons()?;

    // Single select over strings
    let color = Dropdown::new(
        DropdownConfig::new()
            .data(colors())
            .placeholder("Pick a color"),
    );
    color.listen(bus);
    report_changes("color", &color);
    color.write_value(&json!("Blue"));
    show("color", &color);

    let mut click = Interaction::new();
    color.toggle(Some(&mut click));
    bus.publish(&click);
    show("color (open)", &color);
    let mut click = Interaction::new();
    color.item_click(Item::from("Red"), &mut click);
    bus.publish(&click);
    show("color (picked)", &color);

    // Single select over records, seeded by id
    let person = Dropdown::new(
        DropdownConfig::new()
            .data(persons.clone())
            .text_field("name")
            .placeholder("Pick a person"),
    );
    person.listen(bus);
    report_changes("person", &person);
    person.write_value(&json!({ "id": 2 }));
    show("person", &person);

    // Multiple select
    let team = Dropdown::new(
        DropdownConfig::new()
            .data(persons.clone())
            .text_field("name")
            .multiple(),
    );
    team.listen(bus);
    report_changes("team", &team);
    team.write_value(&json!([{ "id": 3 }]));
    let mut click = Interaction::new();
    team.toggle(Some(&mut click));
    bus.publish(&click);
    for pick in [&persons[0], &persons[4]] {
        let mut click = Interaction::new();
        team.item_click(pick.clone(), &mut click);
        bus.publish(&click);
    }
    show("team", &team);
    let mut click = Interaction::new();
    team.remove_item(&persons[0], &mut click);
    show("team (removed)", &team);

    // A click elsewhere closes every open dropdown
    bus.publish(&Interaction::new());
    show("team (outside)", &team);

    // Multiple select with search
    let searched = Dropdown::new(
        DropdownConfig::new()
            .data(persons)
            .text_field("name")
            .multiple()
            .search(),
    );
    searched.listen(bus);
    report_changes("searched", &searched);
    let visible = searched.filter_search("je");
    println!("search 'je'        {} of {} shown", visible.len(), searched.source().len());
    if let Some(first) = visible.first() {
        searched.pick(first.clone());
    }
    show("searched", &searched);
    println!("search after pick  {:?}", searched.search_text());

    // Optional dropdown from a config file
    if let Some(path) = std::env::args().nth(1) {
        let custom = Dropdown::new(DropdownConfig::from_path(&path)?);
        custom.listen(bus);
        report_changes("custom", &custom);
        custom.toggle(None);
        show(&path, &custom);
    }

    Ok(())
}

fn main() {
    if let Ok(log_file) = File::create("lsu-demo.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    if let Err(err) = run() {
        log::error!("Demo failed: {err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
