use anyhow::{Result, bail};
use schedule_core::ScheduleStore;

use crate::render::render_event_details;

pub fn run(store: &ScheduleStore, id: u64) -> Result<()> {
    let Some(event) = store.get(id) else {
        bail!("Event with ID {} not found", id);
    };

    for line in render_event_details(event) {
        println!("{}", line);
    }

    Ok(())
}
