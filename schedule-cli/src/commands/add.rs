use anyhow::Result;
use owo_colors::OwoColorize;
use schedule_core::{Event, ScheduleStore};

use crate::render::Render;

pub fn run(
    store: &mut ScheduleStore,
    title: String,
    date: String,
    time: String,
    description: String,
) -> Result<()> {
    let event = store.add(Event::new(title, date, time, description))?;

    println!("{} {}", "Event added successfully:".green(), event.render());

    Ok(())
}
