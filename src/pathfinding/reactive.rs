use glam::Vec2;

use crate::map::LevelMap;

/// Length of one reactive step in cells.
pub const STEP_LENGTH: f32 = 0.5;
/// How much farther from the goal a detour step may end up.
pub const MAX_DETOUR: f32 = 2.0;

// =============================================================================
// REACTIVE STEPPER
// =============================================================================
///
/// One greedy step from `from` toward `to` that avoids solid cells.
///
/// Tries, in order: straight at the goal, the right-hand perpendicular, the
/// left-hand perpendicular, then the four diagonal blends
/// (forward±side, backward±side). The first candidate that lands on floor
/// and is not more than `MAX_DETOUR` farther from the goal wins.
///
/// Returns `from` unchanged when already at the goal or when every
/// candidate is blocked.
pub fn reactive_step(map: &LevelMap, from: Vec2, to: Vec2) -> Vec2 {
    let direct = to - from;
    let dist = direct.length();
    if dist < 0.1 {
        return from;
    }

    let forward = direct / dist;
    let right = Vec2::new(-forward.y, forward.x);
    let left = -right;

    let candidates = [
        forward,
        right,
        left,
        (forward + right).normalize_or_zero(),
        (forward + left).normalize_or_zero(),
        (-forward + right).normalize_or_zero(),
        (-forward + left).normalize_or_zero(),
    ];

    for dir in candidates {
        let probe = from + dir * STEP_LENGTH;
        if !map.is_walkable_at(probe) {
            continue;
        }
        if probe.distance(to) <= dist + MAX_DETOUR {
            return probe;
        }
    }

    from // Stuck
}
