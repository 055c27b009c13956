//! Action item extraction from generated markdown

use crate::summary::{ActionItem, UNASSIGNED};

const CHECKBOX_MARKERS: [&str; 2] = ["- [ ]", "* [ ]"];
const FIELD_SEPARATOR: &str = " - ";

/// Collect unchecked checkbox lines as `(task, assignee)` pairs, in order.
///
/// The remainder after the marker is split on `" - "`: the first field is the
/// task, the second the assignee, anything after that is dropped. A line with
/// a single field or a blank second field is assigned to [`UNASSIGNED`].
pub fn parse_action_items(raw: &str) -> Vec<ActionItem> {
    raw.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<ActionItem> {
    let trimmed = line.trim();
    let rest = CHECKBOX_MARKERS
        .iter()
        .find_map(|marker| trimmed.strip_prefix(marker))?
        .trim();

    if rest.is_empty() {
        return None;
    }

    let mut fields = rest.split(FIELD_SEPARATOR).map(str::trim);
    let text = fields.next().unwrap_or(rest);

    match fields.next().filter(|assignee| !assignee.is_empty()) {
        Some(assignee) => Some(ActionItem::new(text, assignee)),
        None => Some(ActionItem::new(text, UNASSIGNED)),
    }
}
