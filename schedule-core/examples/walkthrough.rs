//! Drive a store programmatically: add, list, filter, show, update, delete.
//!
//! Run with `cargo run -p schedule-core --example walkthrough`. The data goes to
//! a temporary directory that is removed on exit.

use schedule_core::{Event, EventUpdate, ScheduleResult, ScheduleStore};

fn main() -> ScheduleResult<()> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("example_schedule.json");
    let mut store = ScheduleStore::open(&path)?.store;

    println!("=== Schedule walkthrough ===\n");

    println!("1. Adding events...");
    for event in [
        Event::new("Team Meeting", "2026-01-15", "14:00", "Discuss Q1 project milestones"),
        Event::new("Dentist Appointment", "2026-01-16", "10:30", "Annual checkup"),
        Event::new("Lunch with Client", "2026-01-15", "12:00", "Restaurant meeting"),
    ] {
        println!("   Added: {}", store.add(event)?);
    }

    println!("\n2. All events...");
    for event in store.list(None) {
        println!("   {}", event);
    }

    println!("\n3. Events on 2026-01-15...");
    for event in store.list(Some("2026-01-15")) {
        println!("   {}", event);
    }

    println!("\n4. Event 1...");
    if let Some(event) = store.get(1) {
        println!("   {}", event);
    }

    println!("\n5. Moving event 1 and changing its description...");
    store.update(
        1,
        &EventUpdate {
            time: Some("15:00".to_string()),
            description: Some("Discuss Q1 and Q2 milestones".to_string()),
            ..Default::default()
        },
    )?;
    if let Some(event) = store.get(1) {
        println!("   Updated: {}", event);
    }

    println!("\n6. Deleting event 2...");
    store.delete(2)?;

    println!("\n7. Final list...");
    for event in store.list(None) {
        println!("   {}", event);
    }

    println!("\nData written to: {} (removed on exit)", store.path().display());
    Ok(())
}
