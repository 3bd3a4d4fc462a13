use rand::Rng;

/// Offers shown in the shop between levels.
pub const OFFER_COUNT: usize = 3;
/// Enemy Radar only shows up from this level onward.
const RADAR_MIN_LEVEL: u32 = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PerkKind {
    GoldMultiplier,
    Speed,
    BoostDuration,
    EnemyRadar,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Perk {
    pub name: &'static str,
    pub description: &'static str,
    pub cost: u32,
    pub kind: PerkKind,
    pub value: f32,
}

/// Roll this visit's three offers. The third slot is Enemy Radar when the
/// player reaches level 3 without owning it, Long Boost otherwise.
pub fn generate_offers(level: u32, has_radar: bool, rng: &mut impl Rng) -> [Perk; OFFER_COUNT] {
    let third = if !has_radar && level >= RADAR_MIN_LEVEL {
        Perk {
            name: "Enemy Radar",
            description: "Reveals enemy on minimap",
            cost: rng.gen_range(40..60),
            kind: PerkKind::EnemyRadar,
            value: 1.0,
        }
    } else {
        Perk {
            name: "Long Boost",
            description: "Speed boosts last +5s",
            cost: rng.gen_range(25..40),
            kind: PerkKind::BoostDuration,
            value: 5.0,
        }
    };

    [
        Perk {
            name: "Gold Collector",
            description: "Collect +50% more gold",
            cost: rng.gen_range(30..50),
            kind: PerkKind::GoldMultiplier,
            value: 0.5,
        },
        Perk {
            name: "Speed Runner",
            description: "+1.0 movement speed",
            cost: rng.gen_range(20..35),
            kind: PerkKind::Speed,
            value: 1.0,
        },
        third,
    ]
}
