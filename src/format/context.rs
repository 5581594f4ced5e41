//! Shared state threaded through format parsers and appliers.

use super::parts::Format;

/// State available to format parsers during a DOM walk.
#[derive(Debug)]
pub struct ParseContext {
    /// Ratio between rendered and intrinsic size. Size parsers divide pixel
    /// values by this so the model stores intrinsic sizes.
    pub zoom_scale: f32,
    pub list: ListThreads,
}

impl Default for ParseContext {
    fn default() -> Self {
        Self {
            zoom_scale: 1.0,
            list: ListThreads::default(),
        }
    }
}

/// State available to format appliers while materializing DOM nodes.
#[derive(Debug)]
pub struct ApplyContext {
    /// Format already implied by the node being written into (decorator tag
    /// defaults, inherited segment format). Appliers skip values the implicit
    /// format already establishes.
    pub implicit: Format,
    /// When set, margin sides the implicit format implies but the model
    /// leaves unset are written as an explicit `0px`. Paragraph and container
    /// writes enable this; list levels keep their native spacing.
    pub zero_unset_margins: bool,
    pub zoom_scale: f32,
    pub list: ListThreads,
}

impl Default for ApplyContext {
    fn default() -> Self {
        Self {
            implicit: Format::default(),
            zero_unset_margins: false,
            zoom_scale: 1.0,
            list: ListThreads::default(),
        }
    }
}

/// Numbering threads for ordered lists, one counter per nesting depth.
///
/// A counter holds how many items the current thread at that depth has
/// consumed. Sibling lists at the same depth share a thread unless a start
/// override resets it; opening a shallower list drops the deeper counters.
#[derive(Debug, Default)]
pub struct ListThreads {
    counts: Vec<i32>,
    depth: usize,
}

impl ListThreads {
    /// Enter one list nesting level.
    pub fn open_level(&mut self) {
        self.depth += 1;
        self.counts.truncate(self.depth);
        while self.counts.len() < self.depth {
            self.counts.push(0);
        }
    }

    /// Leave the current nesting level. The counter stays so a sibling list
    /// at the same depth continues the thread.
    pub fn close_level(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The number the next item would get by continuing the current thread.
    pub fn natural_start(&self) -> i32 {
        if self.depth == 0 {
            return 1;
        }
        self.counts[self.depth - 1] + 1
    }

    /// Reposition the current thread so the next item gets `start`.
    pub fn set_start(&mut self, start: i32) {
        if self.depth > 0 {
            self.counts[self.depth - 1] = start - 1;
        }
    }

    /// Consume one item number from the current thread.
    pub fn next_item(&mut self) -> i32 {
        if self.depth == 0 {
            return 1;
        }
        self.counts[self.depth - 1] += 1;
        self.counts[self.depth - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_continues_across_siblings() {
        let mut threads = ListThreads::default();
        threads.open_level();
        threads.next_item();
        threads.next_item();
        threads.close_level();

        // Sibling list at the same depth sees the continuation number.
        threads.open_level();
        assert_eq!(threads.natural_start(), 3);
    }

    #[test]
    fn test_deeper_counters_reset() {
        let mut threads = ListThreads::default();
        threads.open_level();
        threads.next_item();
        threads.open_level();
        threads.next_item();
        threads.next_item();
        threads.close_level();
        threads.close_level();

        threads.open_level();
        assert_eq!(threads.natural_start(), 2);
        threads.open_level();
        // Re-entering depth 2 starts a fresh thread.
        assert_eq!(threads.natural_start(), 1);
    }

    #[test]
    fn test_set_start() {
        let mut threads = ListThreads::default();
        threads.open_level();
        threads.set_start(5);
        assert_eq!(threads.next_item(), 5);
        assert_eq!(threads.next_item(), 6);
    }
}
