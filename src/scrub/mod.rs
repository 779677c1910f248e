//! Detect-and-redact scrubbing delegate
//!
//! The detection engine is a collaborator behind the [`TextScrubber`]
//! trait; the built-in [`RegexScrubber`] replaces detected PII spans with
//! `{{CATEGORY}}` placeholders. Detection rules live in a TOML pattern
//! library and are not part of the cleaning core's contract.

pub mod patterns;

use self::patterns::PatternRegistry;
use anyhow::Result;

pub use self::patterns::ScrubCategory;

/// Text scrubbing engine seam
///
/// Implementations take a text value and return it with detected PII spans
/// replaced by typed placeholder tokens.
pub trait TextScrubber: Send + Sync {
    /// Scrub one text value
    fn scrub(&self, text: &str) -> Result<String>;
}

/// A detected span scheduled for replacement
#[derive(Debug, Clone, Copy)]
struct Detection {
    start: usize,
    end: usize,
    category: ScrubCategory,
}

/// Regex-based scrubbing engine
///
/// Runs every registry pattern at or above the confidence threshold over
/// the input and substitutes `{{CATEGORY}}` for each detected span.
/// Overlapping detections are resolved earliest-start, longest-match first.
pub struct RegexScrubber {
    registry: PatternRegistry,
    confidence_threshold: f32,
}

impl RegexScrubber {
    /// Create a scrubber with the built-in pattern library
    pub fn new() -> Result<Self> {
        Ok(Self {
            registry: PatternRegistry::default_patterns()?,
            confidence_threshold: 0.7,
        })
    }

    /// Create a scrubber with a custom pattern registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            registry,
            confidence_threshold: 0.7,
        }
    }

    /// Set the confidence threshold
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    fn detect(&self, text: &str) -> Vec<Detection> {
        let mut detections = Vec::new();

        for pattern in self.registry.all_patterns() {
            if pattern.confidence < self.confidence_threshold {
                continue;
            }
            for m in pattern.regex.find_iter(text) {
                detections.push(Detection {
                    start: m.start(),
                    end: m.end(),
                    category: pattern.category,
                });
            }
        }

        // Earliest start first; among equal starts, longest match wins.
        detections.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
        detections
    }
}

impl TextScrubber for RegexScrubber {
    fn scrub(&self, text: &str) -> Result<String> {
        let detections = self.detect(text);
        if detections.is_empty() {
            return Ok(text.to_string());
        }

        let mut output = String::with_capacity(text.len());
        let mut cursor = 0;
        for detection in detections {
            // Skip spans swallowed by an earlier, longer match.
            if detection.start < cursor {
                continue;
            }
            output.push_str(&text[cursor..detection.start]);
            output.push_str(&format!("{{{{{}}}}}", detection.category.label()));
            cursor = detection.end;
        }
        output.push_str(&text[cursor..]);

        Ok(output)
    }
}
