//! Running best match across the scale sweep.

use std::cmp::Ordering;

/// Best placement found at one scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleMatch {
    pub scale_pct: u32,
    /// Top-left corner on the canvas.
    pub x: u32,
    pub y: u32,
    /// Scaled template size.
    pub width: u32,
    pub height: u32,
    pub score: f32,
}

/// Highest-scoring scale seen so far.
///
/// Starts at score 0 with no location. It is only replaced by a strictly
/// higher score, so the recorded score never decreases and an equal score at
/// a later scale never overwrites an earlier one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BestMatch {
    pub score: f32,
    pub top_left: Option<(u32, u32)>,
    pub template_size: (u32, u32),
    pub scale_pct: Option<u32>,
}

impl Default for BestMatch {
    fn default() -> Self {
        Self::new()
    }
}

impl BestMatch {
    pub fn new() -> Self {
        Self {
            score: 0.0,
            top_left: None,
            template_size: (0, 0),
            scale_pct: None,
        }
    }

    /// Records `candidate` if it beats the current score. Returns true when
    /// the record changed.
    pub fn offer(&mut self, candidate: ScaleMatch) -> bool {
        if candidate.score.partial_cmp(&self.score) != Some(Ordering::Greater) {
            return false;
        }
        self.score = candidate.score;
        self.top_left = Some((candidate.x, candidate.y));
        self.template_size = (candidate.width, candidate.height);
        self.scale_pct = Some(candidate.scale_pct);
        true
    }

    /// True when a location was recorded and its score reaches `threshold`.
    pub fn passes(&self, threshold: f32) -> bool {
        self.top_left.is_some() && self.score >= threshold
    }

    /// Corner opposite `top_left`: top-left plus the template size.
    pub fn bottom_right(&self) -> Option<(u32, u32)> {
        let (x, y) = self.top_left?;
        let (w, h) = self.template_size;
        Some((x + w, y + h))
    }
}
