//! Window selection for lists longer than the pool.

use std::ops::Range;

/// Decides which part of a list is bound in windowed mode.
pub trait WindowPolicy: Send + Sync {
    /// Indices of the bound items.
    ///
    /// The result must not be longer than `capacity` nor extend past
    /// `total`; the binder clamps it if it does.
    fn window(&self, total: usize, capacity: usize, start: usize) -> Range<usize>;
}

/// Contiguous window starting at the requested offset.
///
/// The start is pulled back so the last page is full when the list is long
/// enough.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadingWindow;

impl WindowPolicy for LeadingWindow {
    fn window(&self, total: usize, capacity: usize, start: usize) -> Range<usize> {
        let start = start.min(total.saturating_sub(capacity));
        start..(start + capacity).min(total)
    }
}

/// Clamp a policy result into `0..total` and at most `capacity` long.
pub(crate) fn clamp(window: Range<usize>, total: usize, capacity: usize) -> Range<usize> {
    let start = window.start.min(total);
    let end = window.end.clamp(start, total).min(start + capacity);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_window() {
        let policy = LeadingWindow;
        assert_eq!(policy.window(3, 5, 0), 0..3);
        assert_eq!(policy.window(12, 5, 0), 0..5);
        assert_eq!(policy.window(12, 5, 4), 4..9);
        assert_eq!(policy.window(12, 5, 10), 7..12);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(0..20, 12, 5), 0..5);
        assert_eq!(clamp(15..20, 12, 5), 12..12);
        assert_eq!(clamp(3..1, 12, 5), 3..3);
    }
}
