use glam::Vec2;
use mazekiller::camera::Camera;
use mazekiller::map::LevelMap;
use mazekiller::renderer::raycast::{DepthBuffer, VisibilityCaster};
use mazekiller::renderer::sprite::*;

const FOV: f32 = std::f32::consts::FRAC_PI_3;
const W: u32 = 800;
const H: u32 = 600;

fn camera_at_origin() -> Camera {
    Camera::new(Vec2::ZERO, 0.0, FOV)
}

fn open_depth() -> DepthBuffer {
    // A map large enough that no wall is closer than the sprites tested.
    let map = LevelMap::bordered(64, 64).unwrap();
    let mut caster = VisibilityCaster::new(W);
    caster.cast(&map, &Camera::new(Vec2::new(2.5, 32.5), 0.0, FOV));
    caster.depth().clone()
}

#[test]
fn coin_dimensions_follow_depth() {
    let p = project(&camera_at_origin(), Vec2::new(2.0, 0.0), SpriteKind::Coin, W, H).unwrap();
    assert_eq!(p.height, 150);
    assert_eq!(p.width, 150);
    assert_eq!((p.start_x, p.end_x), (325, 475));
    assert_eq!((p.start_y, p.end_y), (225, 375));
}

#[test]
fn pursuer_is_taller_than_wide() {
    let p = project(&camera_at_origin(), Vec2::new(2.0, 0.0), SpriteKind::Pursuer, W, H).unwrap();
    assert!((p.height - 540).abs() <= 1, "{}", p.height);
    assert!((p.width - 270).abs() <= 1, "{}", p.width);
    assert!(p.height > p.width);
}

#[test]
fn offset_to_the_right_lands_right_of_centre() {
    let camera = camera_at_origin();
    let right = project(&camera, Vec2::new(4.0, 1.0), SpriteKind::Coin, W, H).unwrap();
    let left = project(&camera, Vec2::new(4.0, -1.0), SpriteKind::Coin, W, H).unwrap();
    assert!(right.screen_x > 400);
    assert!(left.screen_x < 400);
    assert!(((right.screen_x - 400) - (400 - left.screen_x)).abs() <= 1);
}

#[test]
fn sprite_lines_up_with_wall_column() {
    // The column whose ray passes through the point must be the sprite's
    // screen centre.
    let camera = Camera::new(Vec2::new(1.0, 1.0), 0.3, FOV);
    let point = camera.position + (camera.forward() + camera.plane() * 0.5) * 3.0;
    let p = project(&camera, point, SpriteKind::Coin, W, H).unwrap();
    assert!((p.screen_x - 600).abs() <= 1, "{}", p.screen_x);
    assert!((p.transform.y - 3.0).abs() < 1e-4);
}

#[test]
fn too_close_is_not_visible() {
    let camera = camera_at_origin();
    assert!(project(&camera, Vec2::new(0.15, 0.0), SpriteKind::Coin, W, H).is_none());
    assert!(project(&camera, Vec2::new(0.25, 0.0), SpriteKind::Coin, W, H).is_some());
}

#[test]
fn behind_viewer_is_not_visible() {
    let camera = camera_at_origin();
    assert!(project(&camera, Vec2::new(-2.0, 0.5), SpriteKind::Pursuer, W, H).is_none());
}

#[test]
fn entirely_off_screen_is_not_visible() {
    let camera = camera_at_origin();
    assert!(project(&camera, Vec2::new(1.0, 5.0), SpriteKind::Coin, W, H).is_none());
    assert!(project(&camera, Vec2::new(1.0, -5.0), SpriteKind::Coin, W, H).is_none());
}

#[test]
fn occluded_sprite_is_never_visible() {
    let map = LevelMap::from_rows(&[
        "#########",
        "#.......#",
        "#...#...#",
        "#.......#",
        "#########",
    ])
    .unwrap();
    let camera = Camera::new(Vec2::new(1.5, 2.5), 0.0, FOV);
    let mut caster = VisibilityCaster::new(W);
    caster.cast(&map, &camera);

    let hidden = Vec2::new(6.5, 2.5);
    assert!(project(&camera, hidden, SpriteKind::Coin, W, H).is_some());
    assert!(project_visible(&camera, hidden, SpriteKind::Coin, caster.depth(), H).is_none());

    let in_front = Vec2::new(2.5, 2.5);
    assert!(project_visible(&camera, in_front, SpriteKind::Coin, caster.depth(), H).is_some());
}

#[test]
fn visible_in_open_space() {
    let depth = open_depth();
    let camera = Camera::new(Vec2::new(2.5, 32.5), 0.0, FOV);
    let p = project_visible(&camera, Vec2::new(8.5, 32.5), SpriteKind::Pursuer, &depth, H);
    assert!(p.is_some());
}

#[test]
fn two_of_five_samples_suffice() {
    let p = project(&camera_at_origin(), Vec2::new(2.0, 0.0), SpriteKind::Coin, W, H).unwrap();
    // Samples land on 325, 362, 400, 437, 475.
    let mut depth = DepthBuffer::new(W);
    for x in 0..W as usize {
        depth.set(x, 1.0);
    }
    assert!(!p.is_visible(&depth));

    depth.set(325, 5.0);
    assert!(!p.is_visible(&depth));
    depth.set(362, 5.0);
    assert!(p.is_visible(&depth));
}

#[test]
fn off_screen_samples_do_not_count() {
    let camera = camera_at_origin();
    // Straddles the left edge: only part of the samples are on screen.
    let p = project(&camera, Vec2::new(2.0, -1.15), SpriteKind::Coin, W, H).unwrap();
    assert!(p.start_x < 0 && p.end_x >= 0);
    let depth = DepthBuffer::new(W);
    let on_screen = (0..OCCLUSION_SAMPLES)
        .map(|i| p.start_x + (p.end_x - p.start_x) * i / (OCCLUSION_SAMPLES - 1))
        .filter(|&x| x >= 0)
        .count();
    assert_eq!(p.is_visible(&depth), on_screen >= 2);
}
