//! Segment registry
//!
//! Ordered, bounded list of segment labels. A registry always holds at
//! least one segment: empty input falls back to the two-segment default.

use heapless::{String, Vec};

use crate::config::{MAX_LABEL_LEN, MAX_SEGMENTS};

/// A single segment label
pub type Label = String<MAX_LABEL_LEN>;

/// Labels used when the input yields no segments
pub const DEFAULT_LABELS: [&str; 2] = ["0", "1"];

/// Item separator in raw segment input
pub const SEPARATOR: char = ',';

/// What had to be repaired while parsing raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseReport {
    /// Input had no usable items; default labels substituted
    pub substituted_default: bool,
    /// Labels cut to `MAX_LABEL_LEN` bytes
    pub truncated_labels: u16,
    /// Items beyond `MAX_SEGMENTS` that were ignored
    pub dropped_items: u16,
}

impl ParseReport {
    /// Check if the input was used exactly as given
    pub fn is_clean(&self) -> bool {
        !self.substituted_default && self.truncated_labels == 0 && self.dropped_items == 0
    }
}

/// Ordered segment labels, never empty
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentRegistry {
    labels: Vec<Label, MAX_SEGMENTS>,
}

impl Default for SegmentRegistry {
    fn default() -> Self {
        let mut labels = Vec::new();
        for text in DEFAULT_LABELS {
            let mut label = Label::new();
            let _ = label.push_str(text);
            let _ = labels.push(label);
        }
        Self { labels }
    }
}

impl SegmentRegistry {
    /// Parse comma-separated input
    ///
    /// Items are trimmed and empty items dropped. Over-long labels are cut
    /// on a character boundary, surplus items are ignored, and an input with
    /// no items yields the default labels. Never fails.
    pub fn parse(raw: &str) -> (Self, ParseReport) {
        Self::from_labels(raw.split(SEPARATOR))
    }

    /// Build a registry from already-split labels
    ///
    /// Applies the same trimming and fallback rules as [`parse`](Self::parse).
    pub fn from_labels<'a>(items: impl IntoIterator<Item = &'a str>) -> (Self, ParseReport) {
        let mut report = ParseReport::default();
        let mut labels: Vec<Label, MAX_SEGMENTS> = Vec::new();

        for item in items.into_iter().map(str::trim).filter(|s| !s.is_empty()) {
            if labels.is_full() {
                report.dropped_items = report.dropped_items.saturating_add(1);
                continue;
            }

            let (label, truncated) = bounded_label(item);
            if truncated {
                report.truncated_labels = report.truncated_labels.saturating_add(1);
            }
            let _ = labels.push(label);
        }

        if labels.is_empty() {
            report.substituted_default = true;
            return (Self::default(), report);
        }

        (Self { labels }, report)
    }

    /// Number of segments (always at least 1)
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a constructed registry
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label at `index`
    pub fn get(&self, index: usize) -> Option<&Label> {
        self.labels.get(index)
    }

    /// Iterate labels in wheel order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|s| s.as_str())
    }
}

/// Check whether a label counts as zero-valued ("0" or "00")
pub fn is_zero_label(label: &str) -> bool {
    matches!(label, "0" | "00")
}

/// Copy `text` into a bounded label, cutting on a character boundary
fn bounded_label(text: &str) -> (Label, bool) {
    let mut label = Label::new();
    for ch in text.chars() {
        if label.push(ch).is_err() {
            return (label, true);
        }
    }
    (label, false)
}
