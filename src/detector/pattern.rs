//! Behavior shared by finder and alignment pattern candidates

use crate::models::Point;

/// A located pattern: a center plus the module size measured around it
pub trait LocatablePattern: Copy {
    /// Estimated center in image coordinates
    fn position(&self) -> Point;

    /// Estimated width of one module in pixels
    fn estimated_module_size(&self) -> f32;

    /// Merge a new observation into a fresh candidate
    fn combine_estimate(&self, i: f32, j: f32, new_module_size: f32) -> Self;

    /// True when an observation at row `i`, column `j` plausibly hits this
    /// pattern: both axes within one module size, and a module size that
    /// agrees to within a pixel or a 100% margin, whichever is larger.
    fn about_equals(&self, module_size: f32, i: f32, j: f32) -> bool {
        let center = self.position();
        if (i - center.y).abs() <= module_size && (j - center.x).abs() <= module_size {
            let estimated = self.estimated_module_size();
            let module_size_diff = (module_size - estimated).abs();
            return module_size_diff <= 1.0 || module_size_diff <= estimated;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy)]
    struct Candidate(Point, f32);

    impl LocatablePattern for Candidate {
        fn position(&self) -> Point {
            self.0
        }

        fn estimated_module_size(&self) -> f32 {
            self.1
        }

        fn combine_estimate(&self, i: f32, j: f32, new_module_size: f32) -> Self {
            Candidate(Point::new(j, i), new_module_size)
        }
    }

    #[test]
    fn test_about_equals() {
        let candidate = Candidate(Point::new(50.0, 40.0), 4.0);
        assert!(candidate.about_equals(4.0, 42.0, 53.0));
        assert!(candidate.about_equals(4.0, 44.0, 46.0));
        assert!(!candidate.about_equals(4.0, 45.0, 50.0));
        // Module size more than double off
        assert!(!candidate.about_equals(9.0, 40.0, 50.0));
        // Small sizes tolerate a one pixel difference
        let tiny = Candidate(Point::new(10.0, 10.0), 0.5);
        assert!(tiny.about_equals(1.5, 10.0, 10.0));
    }
}
