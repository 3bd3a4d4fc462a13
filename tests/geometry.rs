use glam::Vec2;
use mazekiller::geometry::*;

#[test]
fn test_manhattan_distance() {
    assert_eq!(distance_manhattan(0, 0, 3, 4), 7);
    assert_eq!(distance_manhattan(2, 2, 2, 2), 0);
    assert_eq!(distance_manhattan(-1, -1, 1, 1), 4);
}

#[test]
fn test_cardinals_are_unit_steps() {
    for (dx, dy) in CARDINALS {
        assert_eq!(dx.abs() + dy.abs(), 1);
    }
}

#[test]
fn test_direction_from_angle() {
    let d = direction_from_angle(std::f32::consts::FRAC_PI_2);
    assert!(d.x.abs() < 1e-6);
    assert!((d.y - 1.0).abs() < 1e-6);
}

#[test]
fn test_step_toward_never_overshoots() {
    let p = step_toward(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.5), 2.0);
    assert_eq!(p, Vec2::new(1.0, 1.5));
    let p = step_toward(Vec2::ZERO, Vec2::new(0.0, 4.0), 1.0);
    assert!((p.y - 1.0).abs() < 1e-6);
}

#[test]
fn test_line_of_sight_clear() {
    let clear = line_of_sight(Vec2::new(0.5, 0.5), Vec2::new(4.5, 0.5), 0.1, |_, _| false);
    assert!(clear);
}

#[test]
fn test_line_of_sight_blocked() {
    let blocked = line_of_sight(Vec2::new(0.5, 0.5), Vec2::new(4.5, 0.5), 0.1, |x, _| x == 2);
    assert!(!blocked);
}

#[test]
fn test_line_of_sight_stops_short_of_blocker() {
    let clear = line_of_sight(Vec2::new(0.5, 0.5), Vec2::new(1.95, 0.5), 0.1, |x, _| x == 2);
    assert!(clear);
}

#[test]
fn test_line_of_sight_zero_length() {
    assert!(line_of_sight(Vec2::ONE, Vec2::ONE, 0.1, |_, _| true));
}
