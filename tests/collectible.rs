use glam::Vec2;
use mazekiller::collectible::*;
use mazekiller::levels::LevelTable;
use mazekiller::map::{cell_of, LevelMap};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn coins(items: &[Collectible]) -> Vec<&Collectible> {
    items.iter().filter(|c| c.kind == CollectibleKind::Coin).collect()
}

fn boosts(items: &[Collectible]) -> Vec<&Collectible> {
    items.iter().filter(|c| c.kind == CollectibleKind::SpeedBoost).collect()
}

#[test]
fn placement_respects_spacing_and_margins() {
    let table = LevelTable::builtin().unwrap();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        for number in 1..=table.len() {
            let map = table.load(number).unwrap().map;
            let items = generate(&map, &mut rng);

            for item in &items {
                assert!(map.is_walkable_at(item.position));
                assert!(!item.collected);
                let (x, y) = cell_of(item.position);
                assert_eq!(item.position, Vec2::new(x as f32 + 0.5, y as f32 + 0.5));
            }

            let coin_list = coins(&items);
            assert!(coin_list.len() <= 24);
            for (i, a) in coin_list.iter().enumerate() {
                let (x, y) = cell_of(a.position);
                assert!(x >= 2 && y >= 2 && x < map.width() - 2 && y < map.height() - 2);
                assert_eq!(a.value, COIN_VALUE);
                for b in &coin_list[i + 1..] {
                    assert!(a.position.distance(b.position) >= 2.0);
                }
            }

            let boost_list = boosts(&items);
            assert!(boost_list.len() <= 2);
            for boost in &boost_list {
                let (x, y) = cell_of(boost.position);
                assert!(x >= 3 && y >= 3 && x < map.width() - 3 && y < map.height() - 3);
                for other in items.iter().filter(|o| o.position != boost.position) {
                    assert!(boost.position.distance(other.position) >= 3.0);
                }
            }
        }
    }
}

#[test]
fn open_room_gets_plenty_of_coins() {
    let map = LevelMap::bordered(24, 24).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let items = generate(&map, &mut rng);
    assert!(coins(&items).len() >= 10);
}

#[test]
fn tiny_map_gets_nothing() {
    let map = LevelMap::bordered(4, 4).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    assert!(generate(&map, &mut rng).is_empty());
}

#[test]
fn same_seed_same_layout() {
    let map = LevelMap::bordered(20, 20).unwrap();
    let a = generate(&map, &mut StdRng::seed_from_u64(42));
    let b = generate(&map, &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
}

#[test]
fn pickup_within_radius_only() {
    let mut items = vec![
        Collectible::coin(Vec2::new(2.5, 2.5)),
        Collectible::coin(Vec2::new(5.5, 2.5)),
        Collectible::speed_boost(Vec2::new(2.5, 3.0)),
    ];
    let pickups = collect_nearby(&mut items, Vec2::new(2.5, 2.7), 0.7, 1.0);
    assert_eq!(pickups, vec![Pickup::Gold(10), Pickup::SpeedBoost]);
    assert!(items[0].collected);
    assert!(!items[1].collected);
    assert!(items[2].collected);
    assert_eq!(remaining(&items), 1);
}

#[test]
fn collected_items_are_not_picked_twice() {
    let mut items = vec![Collectible::coin(Vec2::new(2.5, 2.5))];
    assert_eq!(collect_nearby(&mut items, Vec2::new(2.5, 2.5), 0.7, 1.0).len(), 1);
    assert!(collect_nearby(&mut items, Vec2::new(2.5, 2.5), 0.7, 1.0).is_empty());
    assert_eq!(items.len(), 1);
}

#[test]
fn gold_multiplier_is_floored() {
    let mut items = vec![Collectible::coin(Vec2::ZERO), Collectible::coin(Vec2::new(0.1, 0.0))];
    let pickups = collect_nearby(&mut items, Vec2::ZERO, 0.7, 1.55);
    assert_eq!(pickups, vec![Pickup::Gold(15), Pickup::Gold(15)]);
}
