// =============================================================================
// GEOMETRY.RS: Grid and vector helpers shared by the AI and the renderer
//
// - Distance calculations (path heuristics, capture range)
// - Ray marching (line-of-sight between continuous positions)
// - Guarded vector normalisation and stepping
// =============================================================================

use glam::Vec2;

/// Vectors shorter than this are treated as zero-length.
pub const EPSILON: f32 = 1e-4;

/// Calculate Manhattan distance between two cells.
/// Also known as "taxicab distance": the distance traveling only
/// along grid axes (no diagonals).
///
/// Use for: 4-directional path costs and the A* heuristic.
#[inline]
pub fn distance_manhattan(x1: i32, y1: i32, x2: i32, y2: i32) -> i32 {
    (x1 - x2).abs() + (y1 - y2).abs()
}

/// The 4 cardinal directions as (dx, dy) offsets.
pub const CARDINALS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Normalise `v`, or `None` when it is too short to have a direction.
#[inline]
pub fn normalize_or_none(v: Vec2) -> Option<Vec2> {
    let len = v.length();
    if len < EPSILON { None } else { Some(v / len) }
}

/// Move from `from` toward `to` by at most `max_step`, never overshooting.
pub fn step_toward(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist <= max_step || dist < EPSILON {
        return to;
    }
    from + delta / dist * max_step
}

/// Unit vector for a facing angle in radians.
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

// =============================================================================
// LINE OF SIGHT
// =============================================================================

/// March from `from` toward `to` in increments of `step`, sampling the cell
/// under each point. Returns false as soon as `is_blocking` reports a
/// sampled cell as solid.
///
/// Samples start at `from` itself (t = 0) and stop before reaching `to`.
pub fn line_of_sight(
    from: Vec2,
    to: Vec2,
    step: f32,
    is_blocking: impl Fn(i32, i32) -> bool,
) -> bool {
    let delta = to - from;
    let length = delta.length();
    let Some(dir) = normalize_or_none(delta) else {
        return true;
    };
    let step = step.max(EPSILON);

    let mut t = 0.0;
    while t < length {
        let p = from + dir * t;
        if is_blocking(p.x as i32, p.y as i32) {
            return false;
        }
        t += step;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(distance_manhattan(0, 0, 3, 4), 7);
        assert_eq!(distance_manhattan(0, 0, 0, 0), 0);
        assert_eq!(distance_manhattan(-1, -1, 1, 1), 4);
    }

    #[test]
    fn test_step_toward_clamps() {
        let p = step_toward(Vec2::ZERO, Vec2::new(1.0, 0.0), 5.0);
        assert_eq!(p, Vec2::new(1.0, 0.0));
        let p = step_toward(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0);
        assert!((p.x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero() {
        assert!(normalize_or_none(Vec2::ZERO).is_none());
    }
}
