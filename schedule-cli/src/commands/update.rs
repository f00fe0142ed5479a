use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use schedule_core::{EventUpdate, ScheduleStore};

use crate::render::Render;

/// Apply `update` to event `id`. Fields not supplied on the command line are kept.
pub fn run(store: &mut ScheduleStore, id: u64, update: EventUpdate) -> Result<()> {
    if !store.update(id, &update)? {
        bail!("Event with ID {} not found", id);
    }

    if let Some(event) = store.get(id) {
        println!("{} {}", "Event updated successfully:".green(), event.render());
    }

    Ok(())
}
