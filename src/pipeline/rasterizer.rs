use glam::IVec2;

/// Scanline polygon fill using the even-odd rule, sampled at pixel centers.
///
/// Calls `span(y, x_start, x_end)` for every horizontal run of covered pixels,
/// with `x_end` exclusive. Runs are clipped to `width` x `height`, so points may
/// lie far outside the surface. Works for concave and self-intersecting
/// polygons; fewer than three points fill nothing.
pub fn fill_polygon<F>(points: &[IVec2], width: usize, height: usize, mut span: F)
where
    F: FnMut(usize, usize, usize),
{
    if points.len() < 3 || width == 0 || height == 0 {
        return;
    }

    let (min_y, max_y) = points
        .iter()
        .fold((i32::MAX, i32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    let first_row = min_y.max(0) as usize;
    let last_row = (max_y.max(0) as usize).min(height);

    let mut crossings: Vec<f64> = Vec::with_capacity(points.len());
    for y in first_row..last_row {
        let cy = y as f64 + 0.5;
        crossings.clear();

        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            let (ay, by) = (a.y as f64, b.y as f64);
            // Half-open in y so shared vertices are counted once.
            if (ay <= cy && cy < by) || (by <= cy && cy < ay) {
                let t = (cy - ay) / (by - ay);
                crossings.push(a.x as f64 + t * (b.x as f64 - a.x as f64));
            }
        }
        crossings.sort_by(f64::total_cmp);

        for pair in crossings.chunks_exact(2) {
            let start = pixel_column(pair[0], width);
            let end = pixel_column(pair[1], width);
            if start < end {
                span(y, start, end);
            }
        }
    }
}

/// First pixel column whose center lies at or right of `x`, clamped to `0..=width`.
fn pixel_column(x: f64, width: usize) -> usize {
    (x - 0.5).ceil().clamp(0.0, width as f64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covered(points: &[IVec2], width: usize, height: usize) -> Vec<(usize, usize)> {
        let mut pixels = Vec::new();
        fill_polygon(points, width, height, |y, x0, x1| {
            pixels.extend((x0..x1).map(|x| (x, y)));
        });
        pixels
    }

    fn square(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<IVec2> {
        vec![
            IVec2::new(x0, y0),
            IVec2::new(x1, y0),
            IVec2::new(x1, y1),
            IVec2::new(x0, y1),
        ]
    }

    #[test]
    fn fills_axis_aligned_square() {
        let pixels = covered(&square(1, 1, 5, 5), 10, 10);
        assert_eq!(pixels.len(), 16);
        assert!(pixels.contains(&(1, 1)));
        assert!(pixels.contains(&(4, 4)));
        assert!(!pixels.contains(&(5, 5)));
    }

    #[test]
    fn fills_triangle_rows() {
        let tri = [IVec2::new(0, 0), IVec2::new(8, 0), IVec2::new(0, 8)];
        let pixels = covered(&tri, 10, 10);
        // Row y covers centers with x + 0.5 < 8 - (y + 0.5).
        for y in 0..8 {
            let row = pixels.iter().filter(|p| p.1 == y).count();
            assert_eq!(row, 7 - y, "row {y}");
        }
    }

    #[test]
    fn clips_to_bounds() {
        let pixels = covered(&square(-50, -50, 50, 50), 4, 3);
        assert_eq!(pixels.len(), 12);
        assert!(pixels.iter().all(|&(x, y)| x < 4 && y < 3));
    }

    #[test]
    fn off_screen_and_degenerate_polygons_fill_nothing() {
        assert!(covered(&square(20, 20, 30, 30), 10, 10).is_empty());
        assert!(covered(&square(-30, -30, -20, -20), 10, 10).is_empty());
        assert!(covered(&[IVec2::new(0, 0), IVec2::new(5, 5)], 10, 10).is_empty());
        assert!(covered(&square(2, 2, 2, 8), 10, 10).is_empty());
    }

    #[test]
    fn winding_does_not_matter() {
        let mut ccw = square(0, 0, 4, 4);
        let cw = covered(&ccw, 8, 8);
        ccw.reverse();
        assert_eq!(covered(&ccw, 8, 8), cw);
    }
}
