// src/grid/geometry.rs
//! Pure axial-to-pixel transforms for a pointy-top hex lattice

/// A point in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &PixelPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Pixel-space center of an axial coordinate.
///
/// Standard pointy-top transform: `x = size·(√3·q + (√3/2)·r)`,
/// `y = size·(3/2)·r`. `size` is the hex outer radius. Total over all inputs.
pub fn axial_to_pixel(q: i32, r: i32, size: f64) -> PixelPoint {
    let sqrt3 = 3.0_f64.sqrt();
    let x = size * (sqrt3 * q as f64 + (sqrt3 / 2.0) * r as f64);
    let y = size * (3.0 / 2.0) * r as f64;
    PixelPoint { x, y }
}

/// The six corners of a pointy-top hex around `center`.
///
/// Corner `i` sits at angle `60·i − 30` degrees, distance `size`, so the
/// ordering is clockwise-consistent starting from the upper-right vertex.
pub fn hex_corners(center: PixelPoint, size: f64) -> [PixelPoint; 6] {
    std::array::from_fn(|i| {
        let angle_deg = 60.0 * i as f64 - 30.0;
        let angle_rad = angle_deg.to_radians();
        PixelPoint {
            x: center.x + size * angle_rad.cos(),
            y: center.y + size * angle_rad.sin(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_origin() {
        for size in [1.0, 28.0, 500.0] {
            let p = axial_to_pixel(0, 0, size);
            assert_eq!(p.x, 0.0);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn test_adjacent_centers_are_sqrt3_apart() {
        let size = 28.0;
        let expected = size * 3.0_f64.sqrt();
        // All six neighbors of a few sample hexes sit exactly one edge away.
        for (q, r) in [(0, 0), (3, -2), (-4, 1)] {
            let center = axial_to_pixel(q, r, size);
            for (dq, dr) in super::super::DIRECTIONS {
                let n = axial_to_pixel(q + dq, r + dr, size);
                assert!(
                    (center.distance(&n) - expected).abs() < 1e-9,
                    "neighbor ({},{}) of ({},{}) at wrong distance",
                    q + dq,
                    r + dr,
                    q,
                    r
                );
            }
        }
    }

    #[test]
    fn test_corners_lie_on_outer_radius() {
        let center = PixelPoint::new(10.0, -4.0);
        let size = 28.0;
        let corners = hex_corners(center, size);
        for c in &corners {
            assert!((center.distance(c) - size).abs() < 1e-9);
        }
    }

    #[test]
    fn test_first_corner_is_upper_right() {
        // Corner 0 at -30 degrees: positive x, negative y in screen space.
        let corners = hex_corners(PixelPoint::default(), 1.0);
        assert!(corners[0].x > 0.0);
        assert!(corners[0].y < 0.0);
    }
}
