//! Finder pattern detection using 1:1:3:1:1 ratio scanning with cross-checks

use tracing::debug;

use super::pattern::LocatablePattern;
use crate::config::DecodeHints;
use crate::error::{QrError, Result};
use crate::models::{BitMatrix, Point};

/// Observations needed before a candidate counts as confirmed
const CENTER_QUORUM: u32 = 2;
/// Smallest row stride
const MIN_SKIP: usize = 3;
/// Largest symbol the default stride is sized for (version 10)
const MAX_MODULES: usize = 57;

/// One of the three corner squares
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinderPattern {
    point: Point,
    estimated_module_size: f32,
    count: u32,
}

impl FinderPattern {
    /// Candidate seen once
    pub fn new(x: f32, y: f32, estimated_module_size: f32) -> Self {
        Self::with_count(x, y, estimated_module_size, 1)
    }

    fn with_count(x: f32, y: f32, estimated_module_size: f32, count: u32) -> Self {
        Self {
            point: Point::new(x, y),
            estimated_module_size,
            count,
        }
    }

    /// How many row scans confirmed this pattern
    pub fn count(&self) -> u32 {
        self.count
    }
}

impl LocatablePattern for FinderPattern {
    fn position(&self) -> Point {
        self.point
    }

    fn estimated_module_size(&self) -> f32 {
        self.estimated_module_size
    }

    /// Running average weighted by how many observations each side holds
    fn combine_estimate(&self, i: f32, j: f32, new_module_size: f32) -> Self {
        let combined_count = self.count + 1;
        let weight = self.count as f32;
        let total = combined_count as f32;
        Self::with_count(
            (weight * self.point.x + j) / total,
            (weight * self.point.y + i) / total,
            (weight * self.estimated_module_size + new_module_size) / total,
            combined_count,
        )
    }
}

/// The three finder patterns, ordered by their role in the symbol
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinderPatternInfo {
    /// Corner below the top-left pattern
    pub bottom_left: FinderPattern,
    /// Corner opposite the missing bottom-right one
    pub top_left: FinderPattern,
    /// Corner right of the top-left pattern
    pub top_right: FinderPattern,
}

impl FinderPatternInfo {
    fn from_ordered([bottom_left, top_left, top_right]: [FinderPattern; 3]) -> Self {
        Self {
            bottom_left,
            top_left,
            top_right,
        }
    }
}

/// Row scanner for finder patterns; candidates live only for one `find` call
pub struct FinderPatternFinder<'a> {
    image: &'a BitMatrix,
    possible_centers: Vec<FinderPattern>,
    has_skipped: bool,
}

impl<'a> FinderPatternFinder<'a> {
    /// Scanner over `image`
    pub fn new(image: &'a BitMatrix) -> Self {
        Self {
            image,
            possible_centers: Vec::new(),
            has_skipped: false,
        }
    }

    /// Scan the image and return the best three patterns
    pub fn find(&mut self, hints: &DecodeHints) -> Result<FinderPatternInfo> {
        self.possible_centers.clear();
        self.has_skipped = false;

        let max_i = self.image.height();
        let max_j = self.image.width();
        // Assume the symbol covers at least a quarter of the image height
        let mut i_skip = (3 * max_i) / (4 * MAX_MODULES);
        if i_skip < MIN_SKIP || hints.try_harder {
            i_skip = MIN_SKIP;
        }

        let mut done = false;
        let mut i = i_skip - 1;
        while i < max_i && !done {
            let mut state_count = [0usize; 5];
            let mut current_state = 0;
            let mut j = 0;
            while j < max_j {
                if self.image.get(j, i) {
                    // Black pixel
                    if current_state & 1 == 1 {
                        current_state += 1;
                    }
                    state_count[current_state] += 1;
                } else if current_state & 1 == 0 {
                    // White pixel ending a black run
                    if current_state == 4 {
                        if found_pattern_cross(&state_count) {
                            if self.handle_possible_center(&state_count, i, j, hints.pure_barcode) {
                                i_skip = 2;
                                if self.has_skipped {
                                    done = self.have_multiply_confirmed_centers();
                                } else {
                                    let row_skip = self.find_row_skip();
                                    if row_skip > state_count[2] {
                                        // Jump to just above where the third pattern should start
                                        i = i + row_skip - state_count[2] - i_skip;
                                        j = max_j - 1;
                                    }
                                }
                                current_state = 0;
                                state_count = [0; 5];
                            } else {
                                shift_counts2(&mut state_count);
                                current_state = 3;
                            }
                        } else {
                            shift_counts2(&mut state_count);
                            current_state = 3;
                        }
                    } else {
                        current_state += 1;
                        state_count[current_state] += 1;
                    }
                } else {
                    state_count[current_state] += 1;
                }
                j += 1;
            }

            // A pattern touching the right edge
            if found_pattern_cross(&state_count)
                && self.handle_possible_center(&state_count, i, max_j, hints.pure_barcode)
            {
                i_skip = state_count[0];
                if self.has_skipped {
                    done = self.have_multiply_confirmed_centers();
                }
            }
            i += i_skip;
        }

        debug!(candidates = self.possible_centers.len(), "finder scan complete");
        let best = self.select_best_patterns()?;
        Ok(FinderPatternInfo::from_ordered(Point::order_best_patterns(
            best,
            FinderPattern::position,
        )))
    }

    /// Cross-check a horizontal hit and merge it into the candidate list.
    /// Returns true when the hit survives every check.
    fn handle_possible_center(
        &mut self,
        state_count: &[usize; 5],
        i: usize,
        j: usize,
        pure_barcode: bool,
    ) -> bool {
        let total: usize = state_count.iter().sum();
        let center_j = center_from_end(state_count, j);
        let Some(center_i) = self.cross_check_vertical(i, center_j as usize, state_count[2], total)
        else {
            return false;
        };
        // Re-cross check the horizontal through the refined row
        let Some(center_j) =
            self.cross_check_horizontal(center_j as usize, center_i as usize, state_count[2], total)
        else {
            return false;
        };
        if pure_barcode
            && !self.cross_check_diagonal(center_i as usize, center_j as usize, state_count[2], total)
        {
            return false;
        }

        let estimated_module_size = total as f32 / 7.0;
        match self
            .possible_centers
            .iter_mut()
            .find(|center| center.about_equals(estimated_module_size, center_i, center_j))
        {
            Some(center) => {
                *center = center.combine_estimate(center_i, center_j, estimated_module_size);
            }
            None => {
                self.possible_centers
                    .push(FinderPattern::new(center_j, center_i, estimated_module_size));
            }
        }
        true
    }

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
        let mut state_count = [0usize; 5];

        // Up from the center
        let mut i = start_i as isize;
        while i >= 0 && black(i) {
            state_count[2] += 1;
            i -= 1;
        }
        if i < 0 {
            return None;
        }
        while i >= 0 && !black(i) && state_count[1] <= max_count {
            state_count[1] += 1;
            i -= 1;
        }
        if i < 0 || state_count[1] > max_count {
            return None;
        }
        while i >= 0 && black(i) && state_count[0] <= max_count {
            state_count[0] += 1;
            i -= 1;
        }
        if state_count[0] > max_count {
            return None;
        }

        // Down from the center
        i = start_i as isize + 1;
        while i < max_i && black(i) {
            state_count[2] += 1;
            i += 1;
        }
        if i == max_i {
            return None;
        }
        while i < max_i && !black(i) && state_count[3] < max_count {
            state_count[3] += 1;
            i += 1;
        }
        if i == max_i || state_count[3] >= max_count {
            return None;
        }
        while i < max_i && black(i) && state_count[4] < max_count {
            state_count[4] += 1;
            i += 1;
        }
        if state_count[4] >= max_count {
            return None;
        }

        // Within 40% of the horizontal run
        let total: usize = state_count.iter().sum();
        if 5 * total.abs_diff(original_state_count_total) >= 2 * original_state_count_total {
            return None;
        }
        found_pattern_cross(&state_count).then(|| center_from_end(&state_count, i as usize))
    }

    fn cross_check_horizontal(
        &self,
        start_j: usize,
        center_i: usize,
        max_count: usize,
        original_state_count_total: usize,
    ) -> Option<f32> {
        let image = self.image;
        let max_j = image.width() as isize;
        let black = |j: isize| image.get(j as usize, center_i);
        let mut state_count = [0usize; 5];

        let mut j = start_j as isize;
        while j >= 0 && black(j) {
            state_count[2] += 1;
            j -= 1;
        }
        if j < 0 {
            return None;
        }
        while j >= 0 && !black(j) && state_count[1] <= max_count {
            state_count[1] += 1;
            j -= 1;
        }
        if j < 0 || state_count[1] > max_count {
            return None;
        }
        while j >= 0 && black(j) && state_count[0] <= max_count {
            state_count[0] += 1;
            j -= 1;
        }
        if state_count[0] > max_count {
            return None;
        }

        j = start_j as isize + 1;
        while j < max_j && black(j) {
            state_count[2] += 1;
            j += 1;
        }
        if j == max_j {
            return None;
        }
        while j < max_j && !black(j) && state_count[3] < max_count {
            state_count[3] += 1;
            j += 1;
        }
        if j == max_j || state_count[3] >= max_count {
            return None;
        }
        while j < max_j && black(j) && state_count[4] < max_count {
            state_count[4] += 1;
            j += 1;
        }
        if state_count[4] >= max_count {
            return None;
        }

        // Within 20% of the first horizontal run
        let total: usize = state_count.iter().sum();
        if 5 * total.abs_diff(original_state_count_total) >= original_state_count_total {
            return None;
        }
        found_pattern_cross(&state_count).then(|| center_from_end(&state_count, j as usize))
    }

    /// Walk the top-left to bottom-right diagonal through the center
    fn cross_check_diagonal(
        &self,
        start_i: usize,
        center_j: usize,
        max_count: usize,
        original_state_count_total: usize,
    ) -> bool {
        let image = self.image;
        let max_i = image.height();
        let max_j = image.width();
        let mut state_count = [0usize; 5];

        // Up and to the left
        let in_upper = |k: usize| start_i >= k && center_j >= k;
        let upper = |k: usize| image.get(center_j - k, start_i - k);
        let mut k = 0;
        while in_upper(k) && upper(k) {
            state_count[2] += 1;
            k += 1;
        }
        if !in_upper(k) {
            return false;
        }
        while in_upper(k) && !upper(k) && state_count[1] <= max_count {
            state_count[1] += 1;
            k += 1;
        }
        if !in_upper(k) || state_count[1] > max_count {
            return false;
        }
        while in_upper(k) && upper(k) && state_count[0] <= max_count {
            state_count[0] += 1;
            k += 1;
        }
        if state_count[0] > max_count {
            return false;
        }

        // Down and to the right
        let in_lower = |k: usize| start_i + k < max_i && center_j + k < max_j;
        let lower = |k: usize| image.get(center_j + k, start_i + k);
        k = 1;
        while in_lower(k) && lower(k) {
            state_count[2] += 1;
            k += 1;
        }
        if !in_lower(k) {
            return false;
        }
        while in_lower(k) && !lower(k) && state_count[3] < max_count {
            state_count[3] += 1;
            k += 1;
        }
        if !in_lower(k) || state_count[3] >= max_count {
            return false;
        }
        while in_lower(k) && lower(k) && state_count[4] < max_count {
            state_count[4] += 1;
            k += 1;
        }
        if state_count[4] >= max_count {
            return false;
        }

        let total: usize = state_count.iter().sum();
        5 * total.abs_diff(original_state_count_total) < 2 * original_state_count_total
            && found_pattern_cross(&state_count)
    }

    /// Rows that can be skipped once two confirmed patterns are known, so the
    /// scan lands just above the third
    fn find_row_skip(&mut self) -> usize {
        if self.possible_centers.len() <= 1 {
            return 0;
        }
        let mut first_confirmed: Option<Point> = None;
        for center in &self.possible_centers {
            if center.count < CENTER_QUORUM {
                continue;
            }
            match first_confirmed {
                None => first_confirmed = Some(center.point),
                Some(first) => {
                    self.has_skipped = true;
                    let skip = ((first.x - center.point.x).abs() - (first.y - center.point.y).abs()) / 2.0;
                    return skip.max(0.0) as usize;
                }
            }
        }
        0
    }

    /// At least three confirmed patterns whose module sizes agree within 5%
    fn have_multiply_confirmed_centers(&self) -> bool {
        let confirmed: Vec<f32> = self
            .possible_centers
            .iter()
            .filter(|center| center.count >= CENTER_QUORUM)
            .map(|center| center.estimated_module_size)
            .collect();
        if confirmed.len() < 3 {
            return false;
        }
        let total_module_size: f32 = confirmed.iter().sum();
        let average = total_module_size / confirmed.len() as f32;
        let total_deviation: f32 = confirmed.iter().map(|size| (size - average).abs()).sum();
        total_deviation <= 0.05 * total_module_size
    }

    /// Drop module-size outliers, then keep the three most confirmed candidates
    fn select_best_patterns(&mut self) -> Result<[FinderPattern; 3]> {
        let candidates = &mut self.possible_centers;
        let start_size = candidates.len();
        if start_size < 3 {
            return Err(QrError::NotFound("fewer than three finder patterns"));
        }

        if start_size > 3 {
            let (total, square) = candidates.iter().fold((0.0f32, 0.0f32), |(t, s), c| {
                let size = c.estimated_module_size;
                (t + size, s + size * size)
            });
            let average = total / start_size as f32;
            let std_dev = (square / start_size as f32 - average * average).max(0.0).sqrt();
            let deviation = |c: &FinderPattern| (c.estimated_module_size - average).abs();

            // Furthest from the average first
            candidates.sort_by(|a, b| deviation(b).total_cmp(&deviation(a)));
            let limit = (0.2 * average).max(std_dev);
            let mut idx = 0;
            while idx < candidates.len() && candidates.len() > 3 {
                if deviation(&candidates[idx]) > limit {
                    candidates.remove(idx);
                } else {
                    idx += 1;
                }
            }
        }

        if candidates.len() > 3 {
            let total: f32 = candidates.iter().map(|c| c.estimated_module_size).sum();
            let average = total / candidates.len() as f32;
            let deviation = |c: &FinderPattern| (c.estimated_module_size - average).abs();
            candidates.sort_by(|a, b| {
                b.count
                    .cmp(&a.count)
                    .then_with(|| deviation(a).total_cmp(&deviation(b)))
            });
            candidates.truncate(3);
        }

        Ok([candidates[0], candidates[1], candidates[2]])
    }
}

/// Run lengths close enough to 1:1:3:1:1
fn found_pattern_cross(state_count: &[usize; 5]) -> bool {
    if state_count.contains(&0) {
        return false;
    }
    let total: usize = state_count.iter().sum();
    if total < 7 {
        return false;
    }
    let module_size = total as f32 / 7.0;
    let max_variance = module_size / 2.0;
    let off = |count: usize, modules: f32| (modules * module_size - count as f32).abs();
    off(state_count[0], 1.0) < max_variance
        && off(state_count[1], 1.0) < max_variance
        && off(state_count[2], 3.0) < 3.0 * max_variance
        && off(state_count[3], 1.0) < max_variance
        && off(state_count[4], 1.0) < max_variance
}

/// Center of the run sequence that ended just before `end`
fn center_from_end(state_count: &[usize; 5], end: usize) -> f32 {
    (end - state_count[4] - state_count[3]) as f32 - state_count[2] as f32 / 2.0
}

fn shift_counts2(state_count: &mut [usize; 5]) {
    state_count[0] = state_count[2];
    state_count[1] = state_count[3];
    state_count[2] = state_count[4];
    state_count[3] = 1;
    state_count[4] = 0;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Draw a 7x7 finder pattern with its top-left module at (x, y)
    fn draw_finder(image: &mut BitMatrix, x: usize, y: usize, module: usize) {
        for my in 0..7 {
            for mx in 0..7 {
                let ring = mx.min(my).min(6 - mx).min(6 - my);
                if ring != 1 {
                    image.set_region(x + mx * module, y + my * module, module, module);
                }
            }
        }
    }

    fn three_finders(module: usize) -> BitMatrix {
        let size = 40 * module;
        let mut image = BitMatrix::square(size);
        draw_finder(&mut image, 4 * module, 4 * module, module);
        draw_finder(&mut image, 25 * module, 4 * module, module);
        draw_finder(&mut image, 4 * module, 25 * module, module);
        image
    }

    #[test]
    fn test_found_pattern_cross() {
        assert!(found_pattern_cross(&[1, 1, 3, 1, 1]));
        assert!(found_pattern_cross(&[4, 4, 12, 4, 4]));
        assert!(found_pattern_cross(&[3, 4, 13, 5, 4]));
        assert!(!found_pattern_cross(&[4, 4, 4, 4, 4]));
        assert!(!found_pattern_cross(&[4, 0, 12, 4, 4]));
        assert!(!found_pattern_cross(&[1, 1, 1, 1, 1]));
    }

    #[test]
    fn test_center_from_end() {
        // Runs 4,4,12,4,4 ending at column 28 put the center at column 14
        assert_eq!(center_from_end(&[4, 4, 12, 4, 4], 28), 14.0);
    }

    #[test]
    fn test_finds_three_patterns() {
        let image = three_finders(4);
        let mut finder = FinderPatternFinder::new(&image);
        let info = finder.find(&DecodeHints::none()).unwrap();

        let near = |p: &FinderPattern, x: f32, y: f32| {
            let c = p.position();
            (c.x - x).abs() < 1.0 && (c.y - y).abs() < 1.0
        };
        assert!(near(&info.top_left, 30.0, 30.0), "{:?}", info.top_left);
        assert!(near(&info.top_right, 114.0, 30.0), "{:?}", info.top_right);
        assert!(near(&info.bottom_left, 30.0, 114.0), "{:?}", info.bottom_left);
        assert!((info.top_left.estimated_module_size() - 4.0).abs() < 0.5);
    }

    #[test]
    fn test_pure_barcode_diagonal_check() {
        let image = three_finders(5);
        let mut finder = FinderPatternFinder::new(&image);
        let hints = DecodeHints::none().with_pure_barcode(true).with_try_harder(true);
        assert!(finder.find(&hints).is_ok());
    }

    #[test]
    fn test_two_patterns_not_found() {
        let mut image = BitMatrix::square(160);
        draw_finder(&mut image, 16, 16, 4);
        draw_finder(&mut image, 100, 16, 4);
        let mut finder = FinderPatternFinder::new(&image);
        assert!(matches!(
            finder.find(&DecodeHints::none()),
            Err(QrError::NotFound(_))
        ));
    }

    #[test]
    fn test_state_reset_between_calls() {
        let image = three_finders(4);
        let mut finder = FinderPatternFinder::new(&image);
        finder.find(&DecodeHints::none()).unwrap();
        let first = finder.possible_centers.len();
        finder.find(&DecodeHints::none()).unwrap();
        assert_eq!(finder.possible_centers.len(), first);
    }

    #[test]
    fn test_combine_estimate_weights_by_count() {
        let pattern = FinderPattern::new(10.0, 10.0, 4.0);
        let combined = pattern.combine_estimate(12.0, 12.0, 6.0);
        assert_eq!(combined.count(), 2);
        assert_eq!(combined.position(), Point::new(11.0, 11.0));
        let again = combined.combine_estimate(14.0, 14.0, 8.0);
        assert_eq!(again.count(), 3);
        assert_eq!(again.position(), Point::new(12.0, 12.0));
        assert_eq!(again.estimated_module_size(), 6.0);
    }

    #[test]
    fn test_blank_image_not_found() {
        let image = BitMatrix::square(100);
        let mut finder = FinderPatternFinder::new(&image);
        assert!(finder.find(&DecodeHints::none()).is_err());
    }
}
