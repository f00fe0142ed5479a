//! Terminal rendering for schedule types.
//!
//! Extension traits that add colored output to schedule-core types using
//! owo_colors. Plain `Display` on [`Event`] stays uncolored.

use owo_colors::OwoColorize;
use schedule_core::Event;

/// Width of the rule printed around event listings.
const RULE_WIDTH: usize = 60;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    /// `[id] title on date at time - description`, with the id dimmed.
    fn render(&self) -> String {
        let id = match self.id {
            Some(id) => format!("[{}]", id),
            None => "[None]".to_string(),
        };
        let mut line = format!(
            "{} {} on {} at {}",
            id.dimmed(),
            self.title.bold(),
            self.date,
            self.time
        );
        if !self.description.is_empty() {
            line.push_str(&format!(" - {}", self.description));
        }
        line
    }
}

/// Lines for `list`: a header, a rule, one line per event, a rule.
pub fn render_event_list(events: &[&Event]) -> Vec<String> {
    if events.is_empty() {
        return vec!["No events found".dimmed().to_string()];
    }

    let rule = "-".repeat(RULE_WIDTH);
    let mut lines = Vec::with_capacity(events.len() + 4);
    lines.push(String::new());
    lines.push(format!("Scheduled Events ({}):", events.len()).bold().to_string());
    lines.push(rule.dimmed().to_string());
    lines.extend(events.iter().map(|e| e.render()));
    lines.push(rule.dimmed().to_string());
    lines
}

/// Lines for `show`.
pub fn render_event_details(event: &Event) -> Vec<String> {
    let id = event
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "None".to_string());

    vec![
        String::new(),
        "Event Details:".bold().to_string(),
        format!("  ID: {}", id),
        format!("  Title: {}", event.title),
        format!("  Date: {}", event.date),
        format!("  Time: {}", event.time),
        format!("  Description: {}", event.description),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                // Skip "[...m"
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    fn event(id: u64, title: &str, date: &str, time: &str, description: &str) -> Event {
        let mut event = Event::new(title, date, time, description);
        event.id = Some(id);
        event
    }

    #[test]
    fn test_render_matches_display_without_colors() {
        let with_desc = event(1, "Team Meeting", "2026-01-15", "14:00", "Q1 milestones");
        assert_eq!(strip_ansi(&with_desc.render()), with_desc.to_string());

        let without_desc = event(3, "Lunch", "2026-01-15", "12:00", "");
        assert_eq!(strip_ansi(&without_desc.render()), without_desc.to_string());
    }

    #[test]
    fn test_render_empty_list() {
        let lines: Vec<String> = render_event_list(&[]).iter().map(|l| strip_ansi(l)).collect();
        assert_eq!(lines, vec!["No events found".to_string()]);
    }

    #[test]
    fn test_render_list_has_header_and_rules() {
        let a = event(1, "A", "2026-01-15", "14:00", "");
        let c = event(3, "C", "2026-01-15", "12:00", "");
        let lines: Vec<String> = render_event_list(&[&c, &a])
            .iter()
            .map(|l| strip_ansi(l))
            .collect();

        let rule = "-".repeat(60);
        assert_eq!(
            lines,
            vec![
                String::new(),
                "Scheduled Events (2):".to_string(),
                rule.clone(),
                "[3] C on 2026-01-15 at 12:00".to_string(),
                "[1] A on 2026-01-15 at 14:00".to_string(),
                rule,
            ]
        );
    }

    #[test]
    fn test_render_details() {
        let e = event(2, "Dentist", "2026-01-16", "10:30", "");
        let lines: Vec<String> = render_event_details(&e)
            .iter()
            .map(|l| strip_ansi(l))
            .collect();

        assert_eq!(
            lines,
            vec![
                "",
                "Event Details:",
                "  ID: 2",
                "  Title: Dentist",
                "  Date: 2026-01-16",
                "  Time: 10:30",
                "  Description: ",
            ]
        );
    }
}
