//! Sample grid extraction through a perspective transform

use crate::error::{QrError, Result};
use crate::models::BitMatrix;
use crate::utils::geometry::PerspectiveTransform;

/// Sample a `dimension` x `dimension` module grid.
///
/// `transform` maps module-space coordinates to image coordinates; each
/// module is read at its center, `(x + 0.5, y + 0.5)`.
pub fn sample_grid(
    image: &BitMatrix,
    dimension: usize,
    transform: &PerspectiveTransform,
) -> Result<BitMatrix> {
    if dimension == 0 {
        return Err(QrError::NotFound("empty sampling grid"));
    }
    let mut bits = BitMatrix::square(dimension);
    let mut points = vec![0.0f32; 2 * dimension];
    for y in 0..dimension {
        let i_value = y as f32 + 0.5;
        for (x, pair) in points.chunks_exact_mut(2).enumerate() {
            pair[0] = x as f32 + 0.5;
            pair[1] = i_value;
        }
        transform.transform_points(&mut points);
        // Quick check to see if points transformed to something inside the image
        check_and_nudge_points(image, &mut points)?;
        for (x, pair) in points.chunks_exact(2).enumerate() {
            let black = image
                .try_get(pair[0] as i64, pair[1] as i64)
                .map_err(|_| QrError::NotFound("sample point outside image"))?;
            if black {
                bits.set(x, y, true);
            }
        }
    }
    Ok(bits)
}

/// Pull points lying at most one pixel outside the image back onto its edge.
///
/// Only the runs of points at either end of the row are checked, since the
/// row is a straight line through the image; anything further out fails
/// with `NotFound`.
pub fn check_and_nudge_points(image: &BitMatrix, points: &mut [f32]) -> Result<()> {
    let width = image.width() as i64;
    let height = image.height() as i64;
    let pairs = points.len() / 2;

    for offset in 0..pairs {
        if !nudge(&mut points[2 * offset..2 * offset + 2], width, height)? {
            break;
        }
    }
    for offset in (0..pairs).rev() {
        if !nudge(&mut points[2 * offset..2 * offset + 2], width, height)? {
            break;
        }
    }
    Ok(())
}

/// Returns whether the point needed nudging
fn nudge(pair: &mut [f32], width: i64, height: i64) -> Result<bool> {
    let x = pair[0] as i64;
    let y = pair[1] as i64;
    if x < -1 || x > width || y < -1 || y > height {
        return Err(QrError::NotFound("transformed point outside image"));
    }
    let mut nudged = false;
    if x == -1 {
        pair[0] = 0.0;
        nudged = true;
    } else if x == width {
        pair[0] = (width - 1) as f32;
        nudged = true;
    }
    if y == -1 {
        pair[1] = 0.0;
        nudged = true;
    } else if y == height {
        pair[1] = (height - 1) as f32;
        nudged = true;
    }
    Ok(nudged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;

    fn scale_transform(dimension: usize, module: f32) -> PerspectiveTransform {
        let size = dimension as f32;
        let modules = [
            Point::new(0.0, 0.0),
            Point::new(size, 0.0),
            Point::new(size, size),
            Point::new(0.0, size),
        ];
        let pixels = modules.map(|p| Point::new(p.x * module, p.y * module));
        PerspectiveTransform::quadrilateral_to_quadrilateral(&modules, &pixels)
    }

    #[test]
    fn test_sample_scaled_checkerboard() {
        let image = BitMatrix::from_fn(84, 84, |x, y| (x / 4 + y / 4) % 2 == 0);
        let bits = sample_grid(&image, 21, &scale_transform(21, 4.0)).unwrap();
        for y in 0..21 {
            for x in 0..21 {
                assert_eq!(bits.get(x, y), (x + y) % 2 == 0, "module ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_nudges_points_just_outside() {
        let image = BitMatrix::square(10);
        let mut points = [-1.5, 5.0, 5.0, 5.0, 10.2, 5.0];
        check_and_nudge_points(&image, &mut points).unwrap();
        assert_eq!(points[0], 0.0);
        assert_eq!(points[4], 9.0);
    }

    #[test]
    fn test_far_outside_fails() {
        let image = BitMatrix::square(10);
        let mut points = [-5.0, 5.0, 5.0, 5.0];
        assert!(matches!(
            check_and_nudge_points(&image, &mut points),
            Err(QrError::NotFound(_))
        ));
        let too_big = scale_transform(21, 6.0);
        assert!(matches!(
            sample_grid(&image, 21, &too_big),
            Err(QrError::NotFound(_))
        ));
    }
}
