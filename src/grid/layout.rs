// src/grid/layout.rs
//! Grid cell enumeration and viewport fitting

use super::{axial_to_id, axial_to_pixel, Axial, PixelPoint};

/// Safety margin applied after aspect-preserving fit
pub const MARGIN_FACTOR: f64 = 0.9;

/// One laid-out cell of the hex grid.
///
/// Cells are rebuilt in full on every layout pass and never mutated in place.
#[derive(Debug, Clone)]
pub struct GridCell {
    pub coord: Axial,
    pub id: String,
    pub center: PixelPoint,
}

/// Uniform scale + translation fitting a cell set into a viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl FitTransform {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Map a content-space point into viewport space
    pub fn apply(&self, p: PixelPoint) -> PixelPoint {
        PixelPoint {
            x: p.x * self.scale + self.offset_x,
            y: p.y * self.scale + self.offset_y,
        }
    }
}

/// All axial coordinates within a hexagonal range of `radius` around origin.
///
/// Exactly the coordinates with `max(|q|, |r|, |-q-r|) ≤ radius`, that is
/// `(2·radius+1)² − radius·(radius+1)` cells. Enumeration runs `q` ascending
/// with `r` ascending inside, which keeps layout passes reproducible.
pub fn enumerate_hexes(radius: i32) -> Vec<Axial> {
    let mut list = Vec::new();
    for q in -radius..=radius {
        let r_min = (-radius).max(-q - radius);
        let r_max = radius.min(-q + radius);
        for r in r_min..=r_max {
            list.push(Axial::new(q, r));
        }
    }
    list
}

/// Build the full cell list for one layout pass
pub fn build_grid(radius: i32, size: f64) -> Vec<GridCell> {
    enumerate_hexes(radius)
        .into_iter()
        .map(|coord| GridCell {
            coord,
            id: axial_to_id(coord.q, coord.r, radius),
            center: axial_to_pixel(coord.q, coord.r, size),
        })
        .collect()
}

/// Compute the transform that centers the padded bounding box of all cell
/// centers within the viewport, preserving aspect ratio.
///
/// Deterministic for a given cell set and viewport. An empty cell set yields
/// the identity transform.
pub fn layout_fit(
    cells: &[GridCell],
    viewport_w: f64,
    viewport_h: f64,
    padding: f64,
) -> FitTransform {
    if cells.is_empty() {
        return FitTransform::identity();
    }

    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for cell in cells {
        min_x = min_x.min(cell.center.x);
        max_x = max_x.max(cell.center.x);
        min_y = min_y.min(cell.center.y);
        max_y = max_y.max(cell.center.y);
    }
    min_x -= padding;
    max_x += padding;
    min_y -= padding;
    max_y += padding;

    let content_w = max_x - min_x;
    let content_h = max_y - min_y;
    let scale = (viewport_w / content_w).min(viewport_h / content_h) * MARGIN_FACTOR;

    FitTransform {
        scale,
        offset_x: viewport_w / 2.0 - (min_x + max_x) / 2.0 * scale,
        offset_y: viewport_h / 2.0 - (min_y + max_y) / 2.0 * scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerate_counts() {
        assert_eq!(enumerate_hexes(0), vec![Axial::new(0, 0)]);
        assert_eq!(enumerate_hexes(5).len(), 91);
        // (2r+1)^2 - r(r+1) across a few radii
        for r in 0..=6 {
            let expected = (2 * r + 1) * (2 * r + 1) - r * (r + 1);
            assert_eq!(enumerate_hexes(r).len(), expected as usize);
        }
    }

    #[test]
    fn test_enumerate_respects_range() {
        for coord in enumerate_hexes(5) {
            assert!(coord.in_range(5), "{:?} out of range", coord);
        }
    }

    #[test]
    fn test_enumerate_order_is_q_then_r() {
        let cells = enumerate_hexes(2);
        let mut sorted = cells.clone();
        sorted.sort_by_key(|a| (a.q, a.r));
        assert_eq!(cells, sorted);
    }

    #[test]
    fn test_build_grid_matches_enumeration() {
        let cells = build_grid(3, 28.0);
        assert_eq!(cells.len(), enumerate_hexes(3).len());
        let origin = cells.iter().find(|c| c.coord == Axial::new(0, 0)).unwrap();
        assert_eq!(origin.center, PixelPoint::new(0.0, 0.0));
        assert_eq!(origin.id, "E5");
    }

    #[test]
    fn test_layout_fit_centers_content() {
        let cells = build_grid(5, 28.0);
        let fit = layout_fit(&cells, 800.0, 600.0, 28.0 * 1.2);

        // The bounding-box midpoint must land on the viewport center.
        let xs: Vec<f64> = cells.iter().map(|c| c.center.x).collect();
        let ys: Vec<f64> = cells.iter().map(|c| c.center.y).collect();
        let mid = PixelPoint::new(
            (xs.iter().cloned().fold(f64::INFINITY, f64::min)
                + xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max))
                / 2.0,
            (ys.iter().cloned().fold(f64::INFINITY, f64::min)
                + ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max))
                / 2.0,
        );
        let projected = fit.apply(mid);
        assert!((projected.x - 400.0).abs() < 1e-9);
        assert!((projected.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_layout_fit_is_deterministic() {
        let cells = build_grid(4, 28.0);
        let a = layout_fit(&cells, 640.0, 480.0, 10.0);
        let b = layout_fit(&cells, 640.0, 480.0, 10.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_layout_fit_empty_is_identity() {
        assert_eq!(layout_fit(&[], 640.0, 480.0, 10.0), FitTransform::identity());
    }
}
