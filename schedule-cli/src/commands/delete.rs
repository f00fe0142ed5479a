use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use schedule_core::ScheduleStore;

pub fn run(store: &mut ScheduleStore, id: u64) -> Result<()> {
    if !store.delete(id)? {
        bail!("Event with ID {} not found", id);
    }

    println!("{}", format!("Event {} deleted successfully", id).green());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use schedule_core::Event;

    #[test]
    fn test_delete_then_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ScheduleStore::open(dir.path().join("schedule.json"))
            .unwrap()
            .store;
        store
            .add(Event::new("Dentist", "2026-01-16", "10:30", ""))
            .unwrap();

        run(&mut store, 1).unwrap();
        assert!(store.get(1).is_none());

        let err = run(&mut store, 1).unwrap_err();
        assert_eq!(err.to_string(), "Event with ID 1 not found");
    }
}
