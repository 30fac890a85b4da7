//! Reserved function modules: finder, separator, timing, alignment, format and version

use super::version::Version;
use crate::models::BitMatrix;

/// Function module mask for a specific QR version.
/// true = function module (not data), false = data module.
pub struct FunctionMask {
    mask: BitMatrix,
}

impl FunctionMask {
    /// Reserved modules of `version`
    pub fn for_version(version: &Version) -> Self {
        let dimension = version.dimension_for_version();
        let mut mask = BitMatrix::square(dimension);

        // Top left finder pattern + separator + format
        mask.set_region(0, 0, 9, 9);
        // Top right finder pattern + separator + format
        mask.set_region(dimension - 8, 0, 8, 9);
        // Bottom left finder pattern + separator + format, including the dark module
        mask.set_region(0, dimension - 8, 9, 8);

        let centers = version.alignment_pattern_centers();
        let max = centers.len();
        for x in 0..max {
            let i = centers[x] - 2;
            for y in 0..max {
                let finder_corner = (x == 0 && (y == 0 || y == max - 1)) || (x == max - 1 && y == 0);
                if !finder_corner {
                    mask.set_region(centers[y] - 2, i, 5, 5);
                }
            }
        }

        // Vertical and horizontal timing patterns
        mask.set_region(6, 9, 1, dimension - 17);
        mask.set_region(9, 6, dimension - 17, 1);

        if version.version_number() > 6 {
            // Version info, top right and bottom left
            mask.set_region(dimension - 11, 0, 3, 6);
            mask.set_region(0, dimension - 11, 6, 3);
        }

        Self { mask }
    }

    /// True when the module at column `x`, row `y` carries no data
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_modules(mask: &FunctionMask, dimension: usize) -> usize {
        (0..dimension)
            .flat_map(|y| (0..dimension).map(move |x| (x, y)))
            .filter(|&(x, y)| !mask.is_function(x, y))
            .count()
    }

    #[test]
    fn test_version1_function_modules() {
        let mask = Version::for_number(1).unwrap().build_function_pattern();
        // 26 codewords fill exactly 208 data modules
        assert_eq!(data_modules(&mask, 21), 208);
        assert!(mask.is_function(8, 13)); // dark module
        assert!(mask.is_function(6, 10)); // timing
        assert!(!mask.is_function(9, 9));
    }

    #[test]
    fn test_data_module_capacity() {
        for number in 1..=40 {
            let version = Version::for_number(number).unwrap();
            let mask = version.build_function_pattern();
            let capacity = data_modules(&mask, version.dimension_for_version());
            assert_eq!(capacity / 8, version.total_codewords(), "version {number}");
            assert!(capacity % 8 <= 7);
        }
    }

    #[test]
    fn test_alignment_and_version_regions() {
        let version = Version::for_number(7).unwrap();
        let mask = version.build_function_pattern();
        // Center alignment pattern at (22, 22)
        assert!(mask.is_function(22, 22));
        assert!(mask.is_function(20, 24));
        // Alignment patterns on the timing lines
        assert!(mask.is_function(22, 6));
        assert!(mask.is_function(6, 22));
        // Version information blocks
        assert!(mask.is_function(34, 5));
        assert!(mask.is_function(5, 34));
        assert!(!mask.is_function(34, 9));
    }
}
