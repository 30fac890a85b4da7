//! Projective transforms between quadrilaterals

use crate::models::Point;

/// 3x3 projective matrix applied to row vectors `[x y 1]`.
///
/// `a13`, `a23` and `a33` form the homogeneous column; a transform with
/// `a13 == a23 == 0` is affine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveTransform {
    a11: f32,
    a12: f32,
    a13: f32,
    a21: f32,
    a22: f32,
    a23: f32,
    a31: f32,
    a32: f32,
    a33: f32,
}

impl PerspectiveTransform {
    /// Map quadrilateral `from` onto quadrilateral `to`, corner for corner
    pub fn quadrilateral_to_quadrilateral(from: &[Point; 4], to: &[Point; 4]) -> Self {
        let q_to_s = Self::quadrilateral_to_square(from);
        let s_to_q = Self::square_to_quadrilateral(to);
        s_to_q.times(&q_to_s)
    }

    /// Map the unit square (0,0) (1,0) (1,1) (0,1) onto `quad`
    pub fn square_to_quadrilateral(quad: &[Point; 4]) -> Self {
        let [p0, p1, p2, p3] = *quad;
        let dx3 = p0.x - p1.x + p2.x - p3.x;
        let dy3 = p0.y - p1.y + p2.y - p3.y;

        if dx3 == 0.0 && dy3 == 0.0 {
            // Affine
            return Self {
                a11: p1.x - p0.x,
                a21: p2.x - p1.x,
                a31: p0.x,
                a12: p1.y - p0.y,
                a22: p2.y - p1.y,
                a32: p0.y,
                a13: 0.0,
                a23: 0.0,
                a33: 1.0,
            };
        }

        let dx1 = p1.x - p2.x;
        let dx2 = p3.x - p2.x;
        let dy1 = p1.y - p2.y;
        let dy2 = p3.y - p2.y;
        let denominator = dx1 * dy2 - dx2 * dy1;
        let a13 = (dx3 * dy2 - dx2 * dy3) / denominator;
        let a23 = (dx1 * dy3 - dx3 * dy1) / denominator;

        Self {
            a11: p1.x - p0.x + a13 * p1.x,
            a21: p3.x - p0.x + a23 * p3.x,
            a31: p0.x,
            a12: p1.y - p0.y + a13 * p1.y,
            a22: p3.y - p0.y + a23 * p3.y,
            a32: p0.y,
            a13,
            a23,
            a33: 1.0,
        }
    }

    /// Map `quad` onto the unit square
    pub fn quadrilateral_to_square(quad: &[Point; 4]) -> Self {
        // The adjoint is the inverse up to a scale factor, which cancels out
        Self::square_to_quadrilateral(quad).build_adjoint()
    }

    /// Adjugate matrix
    pub fn build_adjoint(&self) -> Self {
        Self {
            a11: self.a22 * self.a33 - self.a23 * self.a32,
            a21: self.a23 * self.a31 - self.a21 * self.a33,
            a31: self.a21 * self.a32 - self.a22 * self.a31,
            a12: self.a13 * self.a32 - self.a12 * self.a33,
            a22: self.a11 * self.a33 - self.a13 * self.a31,
            a32: self.a12 * self.a31 - self.a11 * self.a32,
            a13: self.a12 * self.a23 - self.a13 * self.a22,
            a23: self.a13 * self.a21 - self.a11 * self.a23,
            a33: self.a11 * self.a22 - self.a12 * self.a21,
        }
    }

    /// Composition: apply `other` first, then `self`
    pub fn times(&self, other: &Self) -> Self {
        Self {
            a11: self.a11 * other.a11 + self.a21 * other.a12 + self.a31 * other.a13,
            a21: self.a11 * other.a21 + self.a21 * other.a22 + self.a31 * other.a23,
            a31: self.a11 * other.a31 + self.a21 * other.a32 + self.a31 * other.a33,
            a12: self.a12 * other.a11 + self.a22 * other.a12 + self.a32 * other.a13,
            a22: self.a12 * other.a21 + self.a22 * other.a22 + self.a32 * other.a23,
            a32: self.a12 * other.a31 + self.a22 * other.a32 + self.a32 * other.a33,
            a13: self.a13 * other.a11 + self.a23 * other.a12 + self.a33 * other.a13,
            a23: self.a13 * other.a21 + self.a23 * other.a22 + self.a33 * other.a23,
            a33: self.a13 * other.a31 + self.a23 * other.a32 + self.a33 * other.a33,
        }
    }

    /// Transform interleaved `x, y` pairs in place
    pub fn transform_points(&self, points: &mut [f32]) {
        for pair in points.chunks_exact_mut(2) {
            let (x, y) = (pair[0], pair[1]);
            let denominator = self.a13 * x + self.a23 * y + self.a33;
            pair[0] = (self.a11 * x + self.a21 * y + self.a31) / denominator;
            pair[1] = (self.a12 * x + self.a22 * y + self.a32) / denominator;
        }
    }

    /// Transform a single point
    pub fn transform(&self, p: &Point) -> Point {
        let mut xy = [p.x, p.y];
        self.transform_points(&mut xy);
        Point::new(xy[0], xy[1])
    }
}
