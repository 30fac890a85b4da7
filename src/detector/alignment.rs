//! Alignment pattern detection for QR versions 2+
//!
//! Looks for the 1:1:1 white-black-white cross through the center module of
//! the bottom-right alignment pattern, inside a small window around where it
//! is expected.

use super::pattern::LocatablePattern;
use crate::error::{QrError, Result};
use crate::models::{BitMatrix, Point};

/// The 5x5 pattern near the fourth corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentPattern {
    point: Point,
    estimated_module_size: f32,
}

impl AlignmentPattern {
    /// Candidate seen once
    pub fn new(x: f32, y: f32, estimated_module_size: f32) -> Self {
        Self {
            point: Point::new(x, y),
            estimated_module_size,
        }
    }
}

impl LocatablePattern for AlignmentPattern {
    fn position(&self) -> Point {
        self.point
    }

    fn estimated_module_size(&self) -> f32 {
        self.estimated_module_size
    }

    fn combine_estimate(&self, i: f32, j: f32, new_module_size: f32) -> Self {
        Self::new(
            (self.point.x + j) / 2.0,
            (self.point.y + i) / 2.0,
            (self.estimated_module_size + new_module_size) / 2.0,
        )
    }
}

/// Searches one rectangular window of the image
pub struct AlignmentPatternFinder<'a> {
    image: &'a BitMatrix,
    possible_centers: Vec<AlignmentPattern>,
    start_x: usize,
    start_y: usize,
    width: usize,
    height: usize,
    module_size: f32,
}

impl<'a> AlignmentPatternFinder<'a> {
    /// Search the `width` x `height` window at (`start_x`, `start_y`)
    pub fn new(
        image: &'a BitMatrix,
        start_x: usize,
        start_y: usize,
        width: usize,
        height: usize,
        module_size: f32,
    ) -> Self {
        Self {
            image,
            possible_centers: Vec::with_capacity(5),
            start_x,
            start_y,
            width,
            height,
            module_size,
        }
    }

    /// Return the first pattern seen twice, or failing that the first seen once
    pub fn find(&mut self) -> Result<AlignmentPattern> {
        self.possible_centers.clear();
        let max_j = (self.start_x + self.width).min(self.image.width());
        let middle_i = (self.start_y + self.height / 2) as isize;

        for i_gen in 0..self.height {
            // Rows alternate outward from the middle of the window
            let offset = ((i_gen + 1) / 2) as isize;
            let i = if i_gen & 1 == 0 { middle_i + offset } else { middle_i - offset };
            if i < 0 || i as usize >= self.image.height() {
                continue;
            }
            let i = i as usize;

            let mut state_count = [0usize; 3];
            let mut j = self.start_x;
            // A white run cut off by the window edge has no meaningful length
            while j < max_j && !self.image.get(j, i) {
                j += 1;
            }
            let mut current_state = 0;
            while j < max_j {
                if self.image.get(j, i) {
                    if current_state == 1 {
                        state_count[1] += 1;
                    } else if current_state == 2 {
                        if self.found_pattern_cross(&state_count) {
                            if let Some(confirmed) = self.handle_possible_center(&state_count, i, j) {
                                return Ok(confirmed);
                            }
                        }
                        state_count = [state_count[2], 1, 0];
                        current_state = 1;
                    } else {
                        current_state += 1;
                        state_count[current_state] += 1;
                    }
                } else {
                    if current_state == 1 {
                        current_state += 1;
                    }
                    state_count[current_state] += 1;
                }
                j += 1;
            }

            if self.found_pattern_cross(&state_count) {
                if let Some(confirmed) = self.handle_possible_center(&state_count, i, max_j) {
                    return Ok(confirmed);
                }
            }
        }

        self.possible_centers
            .first()
            .copied()
            .ok_or(QrError::NotFound("no alignment pattern in search window"))
    }

    /// All three runs within half a module of the expected module size
    fn found_pattern_cross(&self, state_count: &[usize; 3]) -> bool {
        let max_variance = self.module_size / 2.0;
        state_count
            .iter()
            .all(|&count| (self.module_size - count as f32).abs() < max_variance)
    }

    fn handle_possible_center(
        &mut self,
        state_count: &[usize; 3],
        i: usize,
        j: usize,
    ) -> Option<AlignmentPattern> {
        let total: usize = state_count.iter().sum();
        let center_j = center_from_end(state_count, j);
        let center_i = self.cross_check_vertical(i, center_j as usize, 2 * state_count[1], total)?;
        let estimated_module_size = total as f32 / 3.0;

        if let Some(center) = self
            .possible_centers
            .iter()
            .find(|center| center.about_equals(estimated_module_size, center_i, center_j))
        {
            return Some(center.combine_estimate(center_i, center_j, estimated_module_size));
        }
        self.possible_centers
            .push(AlignmentPattern::new(center_j, center_i, estimated_module_size));
        None
    }

    /// Vertical white-black-white check; every run, the center included, is
    /// capped at `max_count`
    fn cross_check_vertical(
        &self,
        start_i: usize,
        center_j: usize,
        max_count: usize,
        original_state_count_total: usize,
    ) -> Option<f32> {
        let image = self.image;
        let max_i = image.height() as isize;
        let black = |i: isize| image.get(center_j, i as usize);
        let mut state_count = [0usize; 3];

        let mut i = start_i as isize;
        while i >= 0 && black(i) && state_count[1] <= max_count {
            state_count[1] += 1;
            i -= 1;
        }
        if i < 0 || state_count[1] > max_count {
            return None;
        }
        while i >= 0 && !black(i) && state_count[0] <= max_count {
            state_count[0] += 1;
            i -= 1;
        }
        if state_count[0] > max_count {
            return None;
        }

        i = start_i as isize + 1;
        while i < max_i && black(i) && state_count[1] <= max_count {
            state_count[1] += 1;
            i += 1;
        }
        if i == max_i || state_count[1] > max_count {
            return None;
        }
        while i < max_i && !black(i) && state_count[2] <= max_count {
            state_count[2] += 1;
            i += 1;
        }
        if state_count[2] > max_count {
            return None;
        }

        let total: usize = state_count.iter().sum();
        if 5 * total.abs_diff(original_state_count_total) >= 2 * original_state_count_total {
            return None;
        }
        self.found_pattern_cross(&state_count)
            .then(|| center_from_end(&state_count, i as usize))
    }
}

fn center_from_end(state_count: &[usize; 3], end: usize) -> f32 {
    (end - state_count[2]) as f32 - state_count[1] as f32 / 2.0
}
