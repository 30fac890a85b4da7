//! QR code detection
//!
//! Locates a symbol in a bi-level image and samples its module grid:
//! - Finder pattern detection (the three corner squares)
//! - Alignment pattern detection (for version 2 and above)
//! - Module size and dimension estimation
//! - Perspective transform and grid sampling

/// Alignment pattern detection for QR versions 2+
pub mod alignment;
/// Finder pattern detection using 1:1:3:1:1 ratio scanning
pub mod finder;
/// Shared behavior of located patterns
pub mod pattern;
/// Sample grid extraction and perspective correction
pub mod transform;

use tracing::debug;

use self::alignment::{AlignmentPattern, AlignmentPatternFinder};
use self::finder::{FinderPattern, FinderPatternFinder, FinderPatternInfo};
use self::pattern::LocatablePattern;
use crate::config::DecodeHints;
use crate::decoder::version::Version;
use crate::error::{QrError, Result};
use crate::models::{BitMatrix, Point};
use crate::utils::geometry::PerspectiveTransform;

/// Sampled module grid plus the image points it was located from
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorResult {
    /// Square module matrix, true = dark
    pub bits: BitMatrix,
    /// bottom-left, top-left and top-right finder centers, then the alignment
    /// center when one was found
    pub points: Vec<Point>,
}

/// Locates a symbol in one image
pub struct Detector<'a> {
    image: &'a BitMatrix,
}

impl<'a> Detector<'a> {
    /// Detector over a bi-level image
    pub fn new(image: &'a BitMatrix) -> Self {
        Self { image }
    }

    /// Detect a symbol and sample its module grid
    pub fn detect(&self, hints: &DecodeHints) -> Result<DetectorResult> {
        let info = FinderPatternFinder::new(self.image).find(hints)?;
        self.process_finder_pattern_info(&info)
    }

    /// Sample the grid framed by three already located finder patterns
    pub fn process_finder_pattern_info(&self, info: &FinderPatternInfo) -> Result<DetectorResult> {
        let top_left = info.top_left;
        let top_right = info.top_right;
        let bottom_left = info.bottom_left;

        let module_size = self.calculate_module_size(&top_left, &top_right, &bottom_left)?;
        let dimension = compute_dimension(&top_left, &top_right, &bottom_left, module_size)?;
        let provisional_version = Version::provisional_for_dimension(dimension)?;
        let modules_between_fp_centers = provisional_version.dimension_for_version() - 7;
        debug!(
            module_size,
            dimension,
            version = provisional_version.version_number(),
            "finder patterns located"
        );

        let mut alignment_pattern = None;
        // Anything above version 1 has an alignment pattern
        if !provisional_version.alignment_pattern_centers().is_empty() {
            let (tl, tr, bl) = (top_left.position(), top_right.position(), bottom_left.position());
            // Guess where a "bottom right" finder pattern would have been
            let bottom_right_x = tr.x - tl.x + bl.x;
            let bottom_right_y = tr.y - tl.y + bl.y;

            // The alignment center sits three modules in from the bottom-right corner
            let correction_to_top_left = 1.0 - 3.0 / modules_between_fp_centers as f32;
            let est_alignment_x = (tl.x + correction_to_top_left * (bottom_right_x - tl.x)) as i64;
            let est_alignment_y = (tl.y + correction_to_top_left * (bottom_right_y - tl.y)) as i64;

            // Widen the search window until something turns up
            for allowance_factor in [4.0, 8.0, 16.0] {
                match self.find_alignment_in_region(
                    module_size,
                    est_alignment_x,
                    est_alignment_y,
                    allowance_factor,
                ) {
                    Ok(pattern) => {
                        alignment_pattern = Some(pattern);
                        break;
                    }
                    Err(QrError::NotFound(_)) => continue,
                    Err(e) => return Err(e),
                }
            }
            debug!(found = alignment_pattern.is_some(), "alignment search");
        }

        let transform = create_transform(
            &top_left,
            &top_right,
            &bottom_left,
            alignment_pattern.as_ref(),
            dimension,
        );
        let bits = transform::sample_grid(self.image, dimension, &transform)?;

        let mut points = vec![bottom_left.position(), top_left.position(), top_right.position()];
        if let Some(pattern) = alignment_pattern {
            points.push(pattern.position());
        }
        Ok(DetectorResult { bits, points })
    }

    /// Average module size measured along the top and left edges
    fn calculate_module_size(
        &self,
        top_left: &FinderPattern,
        top_right: &FinderPattern,
        bottom_left: &FinderPattern,
    ) -> Result<f32> {
        let module_size = (self.calculate_module_size_one_way(top_left, top_right)?
            + self.calculate_module_size_one_way(top_left, bottom_left)?)
            / 2.0;
        if module_size < 1.0 {
            return Err(QrError::NotFound("module size below one pixel"));
        }
        Ok(module_size)
    }

    /// Measure the 7-module finder width from each pattern toward the other
    fn calculate_module_size_one_way(&self, pattern: &FinderPattern, other: &FinderPattern) -> Result<f32> {
        let (p, o) = (pattern.position(), other.position());
        let from_pattern =
            self.size_of_black_white_black_run_both_ways(p.x as i64, p.y as i64, o.x as i64, o.y as i64);
        let from_other =
            self.size_of_black_white_black_run_both_ways(o.x as i64, o.y as i64, p.x as i64, p.y as i64);
        match (from_pattern, from_other) {
            (Some(a), Some(b)) => Ok((a + b) / 14.0),
            (Some(a), None) | (None, Some(a)) => Ok(a / 7.0),
            (None, None) => Err(QrError::NotFound("finder pattern width not measurable")),
        }
    }

    /// Run length through the center of a finder pattern, measured toward
    /// `to` and away from it, clipped to the image
    fn size_of_black_white_black_run_both_ways(
        &self,
        from_x: i64,
        from_y: i64,
        to_x: i64,
        to_y: i64,
    ) -> Option<f32> {
        let width = self.image.width() as i64;
        let height = self.image.height() as i64;
        let toward = self.size_of_black_white_black_run(from_x, from_y, to_x, to_y);

        // Now count the other way, without running off the image
        let mut scale = 1.0f32;
        let mut other_to_x = from_x - (to_x - from_x);
        if other_to_x < 0 {
            scale = from_x as f32 / (from_x - other_to_x) as f32;
            other_to_x = 0;
        } else if other_to_x >= width {
            scale = (width - 1 - from_x) as f32 / (other_to_x - from_x) as f32;
            other_to_x = width - 1;
        }
        let mut other_to_y = (from_y as f32 - (to_y - from_y) as f32 * scale) as i64;

        scale = 1.0;
        if other_to_y < 0 {
            scale = from_y as f32 / (from_y - other_to_y) as f32;
            other_to_y = 0;
        } else if other_to_y >= height {
            scale = (height - 1 - from_y) as f32 / (other_to_y - from_y) as f32;
            other_to_y = height - 1;
        }
        other_to_x = (from_x as f32 + (other_to_x - from_x) as f32 * scale) as i64;

        let away = self.size_of_black_white_black_run(from_x, from_y, other_to_x, other_to_y);
        // The center pixel is counted by both runs
        Some(toward? + away? - 1.0)
    }

    /// Bresenham walk from (from_x, from_y) through black, white, black;
    /// returns the distance to the first pixel past the second black run
    fn size_of_black_white_black_run(
        &self,
        mut from_x: i64,
        mut from_y: i64,
        mut to_x: i64,
        mut to_y: i64,
    ) -> Option<f32> {
        // Mild variant of Bresenham's algorithm
        let steep = (to_y - from_y).abs() > (to_x - from_x).abs();
        if steep {
            std::mem::swap(&mut from_x, &mut from_y);
            std::mem::swap(&mut to_x, &mut to_y);
        }

        let dx = (to_x - from_x).abs();
        let dy = (to_y - from_y).abs();
        let mut error = -dx / 2;
        let x_step = if from_x < to_x { 1 } else { -1 };
        let y_step = if from_y < to_y { 1 } else { -1 };
        let origin = Point::new(from_x as f32, from_y as f32);
        let distance = |x: i64, y: i64| Point::new(x as f32, y as f32).distance(&origin);

        // State 0 and 2 scan black pixels, state 1 white
        let mut state = 0;
        let x_limit = to_x + x_step;
        let mut x = from_x;
        let mut y = from_y;
        while x != x_limit {
            let (real_x, real_y) = if steep { (y, x) } else { (x, y) };
            let black = self.image.try_get(real_x, real_y).ok()?;
            if (state == 1) == black {
                if state == 2 {
                    return Some(distance(x, y));
                }
                state += 1;
            }

            error += dy;
            if error > 0 {
                if y == to_y {
                    break;
                }
                y += y_step;
                error -= dx;
            }
            x += x_step;
        }

        // Reached the end inside the last black run; treat the next pixel as white
        (state == 2).then(|| distance(to_x + x_step, to_y))
    }

    fn find_alignment_in_region(
        &self,
        overall_est_module_size: f32,
        est_alignment_x: i64,
        est_alignment_y: i64,
        allowance_factor: f32,
    ) -> Result<AlignmentPattern> {
        let allowance = (allowance_factor * overall_est_module_size) as i64;
        let max_x = self.image.width() as i64 - 1;
        let max_y = self.image.height() as i64 - 1;

        let left = (est_alignment_x - allowance).max(0);
        let right = (est_alignment_x + allowance).min(max_x);
        if ((right - left) as f32) < overall_est_module_size * 3.0 {
            return Err(QrError::NotFound("alignment window too narrow"));
        }
        let top = (est_alignment_y - allowance).max(0);
        let bottom = (est_alignment_y + allowance).min(max_y);
        if ((bottom - top) as f32) < overall_est_module_size * 3.0 {
            return Err(QrError::NotFound("alignment window too short"));
        }

        AlignmentPatternFinder::new(
            self.image,
            left as usize,
            top as usize,
            (right - left) as usize,
            (bottom - top) as usize,
            overall_est_module_size,
        )
        .find()
    }
}

/// Symbol dimension from the finder center distances, snapped to 1 mod 4
fn compute_dimension(
    top_left: &FinderPattern,
    top_right: &FinderPattern,
    bottom_left: &FinderPattern,
    module_size: f32,
) -> Result<usize> {
    let tl = top_left.position();
    let tltr_centers_dimension = (tl.distance(&top_right.position()) / module_size).round() as usize;
    let tlbl_centers_dimension = (tl.distance(&bottom_left.position()) / module_size).round() as usize;
    let mut dimension = (tltr_centers_dimension + tlbl_centers_dimension) / 2 + 7;
    match dimension & 0x03 {
        0 => dimension += 1,
        2 => dimension -= 1,
        3 => return Err(QrError::NotFound("dimension is 3 mod 4")),
        _ => {}
    }
    Ok(dimension)
}

/// Map module space onto the image: finder centers sit 3.5 modules in from
/// their corners, the alignment center 3 modules further in.
fn create_transform(
    top_left: &FinderPattern,
    top_right: &FinderPattern,
    bottom_left: &FinderPattern,
    alignment_pattern: Option<&AlignmentPattern>,
    dimension: usize,
) -> PerspectiveTransform {
    let dim_minus_three = dimension as f32 - 3.5;
    let (tl, tr, bl) = (top_left.position(), top_right.position(), bottom_left.position());

    let (bottom_right, source_bottom_right) = match alignment_pattern {
        Some(pattern) => (pattern.position(), dim_minus_three - 3.0),
        None => (
            // Don't have an alignment pattern, just make up the bottom-right point
            Point::new(tr.x - tl.x + bl.x, tr.y - tl.y + bl.y),
            dim_minus_three,
        ),
    };

    PerspectiveTransform::quadrilateral_to_quadrilateral(
        &[
            Point::new(3.5, 3.5),
            Point::new(dim_minus_three, 3.5),
            Point::new(source_bottom_right, source_bottom_right),
            Point::new(3.5, dim_minus_three),
        ],
        &[tl, tr, bottom_right, bl],
    )
}
