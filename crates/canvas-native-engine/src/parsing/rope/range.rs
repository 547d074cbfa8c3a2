use serde::{Deserialize, Serialize};

/// A half-open range `[location, location + length)` of UTF-16 code units.
///
/// Every node stores ranges into the backing text rather than copied text, so
/// slicing the backing text with any range reproduces the exact source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub location: usize,
    pub length: usize,
}

impl TextRange {
    pub const fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    /// Builds a range from `[start, end)`. `end` must not precede `start`.
    pub fn from_bounds(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range end {end} precedes start {start}");
        Self {
            location: start,
            length: end.saturating_sub(start),
        }
    }

    /// Exclusive end of the range.
    #[must_use]
    pub const fn max(self) -> usize {
        self.location + self.length
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.length == 0
    }

    /// Whether `point` falls inside the half-open range.
    #[must_use]
    pub const fn contains(self, point: usize) -> bool {
        point >= self.location && point < self.max()
    }

    /// Smallest range covering both ranges.
    #[must_use]
    pub fn union(self, other: TextRange) -> TextRange {
        let start = self.location.min(other.location);
        let end = self.max().max(other.max());
        TextRange::from_bounds(start, end)
    }

    /// Length of the overlap, or `None` when the ranges are disjoint.
    ///
    /// A zero-length `other` intersects when its location lies inside `self`,
    /// in which case the intersection length is `Some(0)`.
    #[must_use]
    pub fn intersection(self, other: TextRange) -> Option<usize> {
        if other.length == 0 {
            return self.contains(other.location).then_some(0);
        }

        let start = self.location.max(other.location);
        let end = self.max().min(other.max());
        (end > start).then(|| end - start)
    }

    /// Shifts the location by `delta`.
    pub fn offset(&mut self, delta: isize) {
        let location = self.location as isize + delta;
        debug_assert!(location >= 0, "offset moved range before 0: {location}");
        self.location = location.max(0) as usize;
    }

    /// Returns a copy shifted by `delta`.
    #[must_use]
    pub fn offset_by(mut self, delta: isize) -> Self {
        self.offset(delta);
        self
    }

    pub fn as_std(self) -> std::ops::Range<usize> {
        self.location..self.max()
    }
}

impl From<std::ops::Range<usize>> for TextRange {
    fn from(r: std::ops::Range<usize>) -> Self {
        TextRange::from_bounds(r.start, r.end)
    }
}
