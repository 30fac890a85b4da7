/// 2D point with floating point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point
    pub fn distance(&self, other: &Point) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Calculate squared distance (faster, no sqrt)
    pub fn distance_squared(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Z component of the cross product of (a - b) and (c - b).
    pub fn cross_product_z(a: &Point, b: &Point, c: &Point) -> f32 {
        (c.x - b.x) * (a.y - b.y) - (c.y - b.y) * (a.x - b.x)
    }

    /// Order three corner points as `[bottom_left, top_left, top_right]`.
    ///
    /// The point opposite the longest side is the top-left corner; the sign of
    /// the cross product fixes which of the other two is top-right.
    pub fn order_best_patterns<T: Copy>(patterns: [T; 3], position: impl Fn(&T) -> Point) -> [T; 3] {
        let p = [
            position(&patterns[0]),
            position(&patterns[1]),
            position(&patterns[2]),
        ];
        let zero_one = p[0].distance(&p[1]);
        let one_two = p[1].distance(&p[2]);
        let zero_two = p[0].distance(&p[2]);

        let (mut a, b, mut c) = if one_two >= zero_one && one_two >= zero_two {
            (1, 0, 2)
        } else if zero_two >= one_two && zero_two >= zero_one {
            (0, 1, 2)
        } else {
            (0, 2, 1)
        };

        if Self::cross_product_z(&p[a], &p[b], &p[c]) < 0.0 {
            std::mem::swap(&mut a, &mut c);
        }

        [patterns[a], patterns[b], patterns[c]]
    }
}
