use anyhow::Result;
use schedule_core::ScheduleStore;

use crate::render::render_event_list;

/// Print events on `date` in insertion order, or every event by date and time.
pub fn run(store: &ScheduleStore, date: Option<&str>) -> Result<()> {
    let events = store.list(date);

    for line in render_event_list(&events) {
        println!("{}", line);
    }

    Ok(())
}
