//! Redis-style list index resolution.
//!
//! `LRANGE` and `LTRIM` accept inclusive `start`/`stop` indices where negative
//! values count from the tail (`-1` is the last element). Out-of-range values
//! are clamped rather than rejected.

/// Resolves inclusive Redis-style indices against a list of `len` elements.
///
/// Returns the half-open `(start, end)` range of positions to keep, or `None`
/// when the range selects nothing.
///
/// # Examples
///
/// ```
/// use notifyd_core::cache::resolve_range;
///
/// assert_eq!(resolve_range(5, 0, -1), Some((0, 5)));
/// assert_eq!(resolve_range(5, 0, 9), Some((0, 5)));
/// assert_eq!(resolve_range(5, -2, -1), Some((3, 5)));
/// assert_eq!(resolve_range(5, 3, 1), None);
/// assert_eq!(resolve_range(0, 0, -1), None);
/// ```
pub fn resolve_range(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let len_i = len as isize;

    let start = if start < 0 { len_i + start } else { start }.max(0);
    let stop = if stop < 0 { len_i + stop } else { stop };

    if stop < 0 || start > stop || start >= len_i {
        return None;
    }

    let stop = stop.min(len_i - 1);
    Some((start as usize, stop as usize + 1))
}

/// Applies Redis `LRANGE` semantics to a slice.
pub fn slice_range<T>(items: &[T], start: isize, stop: isize) -> &[T] {
    match resolve_range(items.len(), start, stop) {
        Some((from, to)) => &items[from..to],
        None => &[],
    }
}
