use std::cmp::Reverse;

use super::types::{Notification, RecentNotification};

/// Returns true when the text is empty or whitespace only.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Length in characters, which is what the field limits are expressed in.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Returns the replacement value for a patchable text field.
///
/// Absent and blank values mean "keep the stored value".
pub fn patch_text(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !is_blank(v))
}

/// Sorts notifications newest first by creation time, breaking ties by id.
pub fn sort_most_recent_first(notifications: &mut [Notification]) {
    notifications.sort_by_key(|n| Reverse((n.created_at, n.id)));
}

/// Projects notifications to their list summaries, keeping order.
pub fn to_summaries(notifications: &[Notification]) -> Vec<RecentNotification> {
    notifications.iter().map(RecentNotification::from).collect()
}
