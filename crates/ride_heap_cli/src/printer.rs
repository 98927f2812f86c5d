//! Console rendering of a heap's backing sequence.
//!
//! Everything here reads `&[Option<Ride>]` and returns a `String`; nothing
//! touches heap state.

use std::fmt::Write;

use ride_heap::Ride;

const EMPTY: &str = "null";

/// Which ride field labels the nodes of a tree diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Id,
    Time,
}

impl Label {
    fn text(self, slot: Option<&Ride>) -> String {
        match (self, slot) {
            (_, None) => EMPTY.to_string(),
            (Label::Id, Some(ride)) => ride.id().to_string(),
            (Label::Time, Some(ride)) => describe_time(ride),
        }
    }
}

/// One line per slot, starting at slot 0.
pub fn render_array(slots: &[Option<Ride>]) -> String {
    let mut out = String::new();
    for (index, slot) in slots.iter().enumerate() {
        let (id, time) = match slot {
            Some(ride) => (ride.id().to_string(), describe_time(ride)),
            None => (EMPTY.to_string(), EMPTY.to_string()),
        };
        let _ = writeln!(out, "{index}: Ride ID = {id}, Ride Timestamp = {time}");
    }
    out
}

/// Level-by-level tree diagram rooted at slot 1.
///
/// Every label is right-aligned to the widest label in the sequence, and each
/// level's spacing halves on the way down so children sit under their parent.
pub fn render_tree(slots: &[Option<Ride>], label: Label) -> String {
    if slots.is_empty() {
        return String::new();
    }
    let labels: Vec<String> = slots.iter().map(|slot| label.text(slot.as_ref())).collect();
    let width = labels.iter().map(String::len).max().unwrap_or(EMPTY.len());
    let levels = (usize::BITS - slots.len().leading_zeros()) as usize;

    let mut out = String::new();
    let mut index = 1;
    for level in 0..levels {
        let subtree_spacing = (width + 2) * (1 << (levels - level - 1)) - 1;
        let child_spacing = subtree_spacing + 1 - width;

        let mut line = " ".repeat(subtree_spacing / 2);
        for _ in 0..1usize << level {
            let Some(text) = labels.get(index) else {
                break;
            };
            index += 1;
            let _ = write!(line, "{text:>width$}{}", " ".repeat(child_spacing));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Every occupied slot's ride block, in slot order.
pub fn render_schedule(slots: &[Option<Ride>]) -> String {
    let mut out = String::new();
    for ride in slots.iter().flatten() {
        let _ = writeln!(out, "{ride}");
    }
    out
}

fn describe_time(ride: &Ride) -> String {
    ride.time()
        .map(|time| time.to_string())
        .unwrap_or_else(|| EMPTY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ride_heap::test_helpers::solo_ride;

    fn small_heap() -> Vec<Option<Ride>> {
        vec![
            None,
            Some(solo_ride(1, "01:00:00")),
            Some(solo_ride(2, "02:00:00")),
            Some(solo_ride(4, "04:00:00")),
            Some(solo_ride(3, "03:00:00")),
        ]
    }

    #[test]
    fn array_lists_every_slot_from_zero() {
        let rendered = render_array(&small_heap());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "0: Ride ID = null, Ride Timestamp = null");
        assert_eq!(lines[3], "3: Ride ID = 4, Ride Timestamp = 04:00:00");
    }

    #[test]
    fn id_tree_places_children_under_parents() {
        let rendered = render_tree(&small_heap(), Label::Id);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                format!("{}1", " ".repeat(14)),
                format!("{}2{}4", " ".repeat(8), " ".repeat(11)),
                format!("{}3", " ".repeat(5)),
            ]
        );
    }

    #[test]
    fn time_tree_uses_widest_label() {
        let rendered = render_tree(&small_heap(), Label::Time);
        let first = rendered.lines().next().unwrap_or_default();
        assert!(first.ends_with("01:00:00"));
        assert!(rendered.contains("02:00:00"));
        assert!(!rendered.contains(EMPTY));
    }

    #[test]
    fn empty_sequence_renders_nothing() {
        assert!(render_tree(&[], Label::Id).is_empty());
        assert!(render_array(&[]).is_empty());
    }

    #[test]
    fn schedule_skips_empty_slots() {
        let rendered = render_schedule(&small_heap());
        assert_eq!(rendered.matches("--- Ride").count(), 4);
        assert!(rendered.starts_with("--- Ride 001 -------"));
    }
}
