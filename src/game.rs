// =============================================================================
// GAME.RS: Session state machine
//
// `Game` owns everything that changes while playing: the player, the current
// level's map, collectibles and pursuer, gold and perks, and the mode the
// session is in. `Game::update` is the only mutator; it consumes one frame of
// input and reports what happened as `GameEvent`s for the front end (sound,
// UI) to react to.
// =============================================================================

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::camera::Camera;
use crate::collectible::{self, Collectible, Pickup};
use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::geometry::{direction_from_angle, normalize_or_none};
use crate::input::{Action, ActionMap, InputState};
use crate::levels::{Level, LevelTable};
use crate::map::{LevelMap, Tile};
use crate::pursuer::Pursuer;
use crate::shop::{self, Perk, PerkKind, OFFER_COUNT};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameMode {
    MainMenu,
    Playing,
    /// Between levels, right after walking through the exit door.
    Loading,
    Shop,
    Won,
    Lost,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuItem {
    Start,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GameEvent {
    LevelStarted { level: u32 },
    CoinCollected { gold: u32 },
    BoostCollected,
    /// The pursuer came within the proximity alert distance.
    PursuerNear,
    /// The pursuer left the proximity alert distance.
    PursuerFar,
    /// The pursuer reached the player and started its attack.
    Attacked,
    LevelCompleted { level: u32 },
    PerkPurchased { kind: PerkKind, cost: u32 },
    Won,
    Lost,
    QuitRequested,
}

/// The player's body and the upgrades carried between levels.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub position: Vec2,
    /// Facing angle in radians.
    pub angle: f32,
    pub base_speed: f32,
    pub mouse_sensitivity: f32,
    pub gold_multiplier: f32,
    pub boosted: bool,
    pub boost_timer: f32,
    /// Extra seconds added to every speed boost.
    pub boost_bonus: f32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            position: Vec2::ZERO,
            angle: 0.0,
            base_speed: config.player.base_speed,
            mouse_sensitivity: config.player.mouse_sensitivity,
            gold_multiplier: 1.0,
            boosted: false,
            boost_timer: 0.0,
            boost_bonus: 0.0,
        }
    }

    #[inline]
    pub fn forward(&self) -> Vec2 {
        direction_from_angle(self.angle)
    }

    /// Unit vector pointing to the player's right (the strafe direction
    /// of `D`).
    #[inline]
    pub fn right(&self) -> Vec2 {
        direction_from_angle(self.angle + std::f32::consts::FRAC_PI_2)
    }
}

pub struct Game {
    config: GameConfig,
    levels: Vec<Level>,
    actions: ActionMap<Action>,
    rng: StdRng,

    mode: GameMode,
    menu_selection: MenuItem,
    player: Player,
    gold: u32,
    /// Seconds since the session started; drives sprite bobbing.
    anim_time: f32,

    /// Level the session is on, 1-based. Runs one past the last level while
    /// loading after the final door.
    current_level: u32,
    /// Index into `levels` of the map being played.
    active: usize,
    collectibles: Vec<Collectible>,
    pursuer: Pursuer,
    pursuer_near: bool,

    loading_timer: f32,
    offers: Vec<Perk>,
    selected_perk: Option<usize>,
    continue_armed: bool,
    has_radar: bool,

    attacked: bool,
    stab_timer: f32,
}

impl Game {
    /// A session over the built-in campaign.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_levels(config, &LevelTable::builtin()?, seed)
    }

    /// A session over `table`. Every level is parsed up front, so a broken
    /// table fails here rather than mid-run.
    pub fn with_levels(config: GameConfig, table: &LevelTable, seed: u64) -> Result<Self> {
        let levels = (1..=table.len()).map(|n| table.load(n)).collect::<Result<Vec<_>>>()?;
        if levels.is_empty() {
            return Err(Error::Level { level: 0, reason: "no levels to play".into() });
        }
        info!(levels = levels.len(), seed, "session created");

        let player = Player::new(&config);
        let pursuer = Pursuer::inactive(&config.pursuer);
        Ok(Self {
            actions: ActionMap::default_bindings(),
            rng: StdRng::seed_from_u64(seed),
            mode: GameMode::MainMenu,
            menu_selection: MenuItem::Start,
            player,
            gold: 0,
            anim_time: 0.0,
            current_level: 1,
            active: 0,
            collectibles: Vec::new(),
            pursuer,
            pursuer_near: false,
            loading_timer: 0.0,
            offers: Vec::new(),
            selected_perk: None,
            continue_armed: false,
            has_radar: false,
            attacked: false,
            stab_timer: 0.0,
            levels,
            config,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig { &self.config }
    pub fn mode(&self) -> GameMode { self.mode }
    pub fn menu_selection(&self) -> MenuItem { self.menu_selection }
    pub fn player(&self) -> &Player { &self.player }
    pub fn gold(&self) -> u32 { self.gold }
    pub fn anim_time(&self) -> f32 { self.anim_time }
    pub fn current_level(&self) -> u32 { self.current_level }
    pub fn level_count(&self) -> u32 { self.levels.len() as u32 }
    pub fn collectibles(&self) -> &[Collectible] { &self.collectibles }
    pub fn pursuer(&self) -> &Pursuer { &self.pursuer }
    pub fn offers(&self) -> &[Perk] { &self.offers }
    pub fn selected_perk(&self) -> Option<usize> { self.selected_perk }
    pub fn has_radar(&self) -> bool { self.has_radar }
    pub fn is_attacked(&self) -> bool { self.attacked }
    pub fn stab_timer(&self) -> f32 { self.stab_timer }

    /// The level whose map is loaded.
    pub fn level(&self) -> &Level {
        &self.levels[self.active]
    }

    pub fn map(&self) -> &LevelMap {
        &self.level().map
    }

    pub fn door_cost(&self) -> u32 {
        self.level().door_cost
    }

    /// The exit door opens once the player carries enough gold.
    pub fn door_open(&self) -> bool {
        self.gold >= self.door_cost()
    }

    /// Fraction of the loading screen elapsed, `0..=1`.
    pub fn loading_progress(&self) -> f32 {
        (self.loading_timer / self.config.loading_duration).clamp(0.0, 1.0)
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.player.position, self.player.angle, self.config.fov_radians())
    }

    /// Overwrite the player's gold. Used by scripted setups and tests.
    pub fn set_gold(&mut self, gold: u32) {
        self.gold = gold;
    }

    /// Place the player directly. Used by scripted setups and tests.
    pub fn set_player_pose(&mut self, position: Vec2, angle: f32) {
        self.player.position = position;
        self.player.angle = angle;
    }

    pub fn pursuer_mut(&mut self) -> &mut Pursuer {
        &mut self.pursuer
    }

    // ── Level flow ────────────────────────────────────────────────────────

    /// Load 1-based level `number` and switch to `Playing`. Gold and perks
    /// carry over; collectibles and the pursuer are rebuilt.
    pub fn start_level(&mut self, number: u32) -> Result<()> {
        let index = number
            .checked_sub(1)
            .map(|i| i as usize)
            .filter(|&i| i < self.levels.len())
            .ok_or_else(|| Error::Level {
                level: number,
                reason: format!("only {} levels exist", self.levels.len()),
            })?;

        self.active = index;
        self.current_level = number;
        self.attacked = false;
        self.stab_timer = 0.0;
        self.pursuer_near = false;

        let level = &self.levels[index];
        self.player.position = level.player_start;
        self.collectibles = collectible::generate(&level.map, &mut self.rng);
        self.pursuer =
            Pursuer::spawn(&level.map, level.player_start, level.spawn, &self.config.pursuer);
        self.mode = GameMode::Playing;

        info!(
            level = number,
            name = %level.name,
            door_cost = level.door_cost,
            collectibles = self.collectibles.len(),
            pursuer = ?self.pursuer.state,
            "level started"
        );
        Ok(())
    }

    /// Back to the main menu with a fresh player, as after a win or loss.
    pub fn reset(&mut self) {
        self.player = Player::new(&self.config);
        self.gold = 0;
        self.anim_time = 0.0;
        self.current_level = 1;
        self.active = 0;
        self.collectibles.clear();
        self.pursuer = Pursuer::inactive(&self.config.pursuer);
        self.pursuer_near = false;
        self.loading_timer = 0.0;
        self.offers.clear();
        self.selected_perk = None;
        self.continue_armed = false;
        self.has_radar = false;
        self.attacked = false;
        self.stab_timer = 0.0;
        self.menu_selection = MenuItem::Start;
        self.set_mode(GameMode::MainMenu);
    }

    fn set_mode(&mut self, mode: GameMode) {
        if self.mode != mode {
            info!(from = ?self.mode, to = ?mode, level = self.current_level, "mode change");
        }
        self.mode = mode;
    }

    fn begin_level(&mut self, number: u32, events: &mut Vec<GameEvent>) {
        match self.start_level(number) {
            Ok(()) => events.push(GameEvent::LevelStarted { level: number }),
            Err(err) => {
                warn!(%err, "could not start level; returning to menu");
                self.reset();
            }
        }
    }

    // ── Frame update ──────────────────────────────────────────────────────

    /// Advance the session by `dt` seconds using this frame's `input`.
    pub fn update(&mut self, dt: f32, input: &InputState) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.anim_time += dt;

        match self.mode {
            GameMode::MainMenu => self.update_menu(input, &mut events),
            GameMode::Won => {
                if self.actions.is_pressed(Action::Restart, input) {
                    self.reset();
                }
            }
            GameMode::Lost => {
                if self.actions.is_pressed(Action::Continue, input) {
                    self.reset();
                }
            }
            GameMode::Loading => self.update_loading(dt, &mut events),
            GameMode::Shop => self.update_shop(input, &mut events),
            GameMode::Playing => self.update_playing(dt, input, &mut events),
        }

        events
    }

    fn update_menu(&mut self, input: &InputState, events: &mut Vec<GameEvent>) {
        if self.actions.is_pressed(Action::MenuUp, input) {
            self.menu_selection = MenuItem::Start;
        }
        if self.actions.is_pressed(Action::MenuDown, input) {
            self.menu_selection = MenuItem::Quit;
        }
        let confirmed = self.actions.is_pressed(Action::Confirm, input)
            || self.actions.is_pressed(Action::Continue, input);
        if !confirmed {
            return;
        }
        match self.menu_selection {
            MenuItem::Start => self.begin_level(1, events),
            MenuItem::Quit => events.push(GameEvent::QuitRequested),
        }
    }

    fn update_loading(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        self.loading_timer += dt;
        if self.loading_timer < self.config.loading_duration {
            return;
        }
        self.loading_timer = 0.0;

        if self.current_level > self.level_count() {
            info!(gold = self.gold, "campaign won");
            self.set_mode(GameMode::Won);
            events.push(GameEvent::Won);
        } else {
            self.offers = shop::generate_offers(self.current_level, self.has_radar, &mut self.rng)
                .into_iter()
                .collect();
            self.selected_perk = None;
            self.continue_armed = false;
            self.set_mode(GameMode::Shop);
        }
    }

    fn update_shop(&mut self, input: &InputState, events: &mut Vec<GameEvent>) {
        let picks = [Action::SelectPerk1, Action::SelectPerk2, Action::SelectPerk3];
        for (slot, action) in picks.into_iter().enumerate().take(OFFER_COUNT) {
            if self.actions.is_pressed(action, input) {
                self.selected_perk = Some(slot);
            }
        }

        if self.actions.is_pressed(Action::Confirm, input) {
            if let Some(slot) = self.selected_perk {
                self.buy(slot, events);
            }
        }

        if self.actions.is_pressed(Action::Continue, input) {
            if self.continue_armed {
                self.continue_armed = false;
                self.begin_level(self.current_level, events);
            } else {
                self.continue_armed = true;
            }
        }
    }

    /// Buy the offer in `slot` if the player can afford it. Offers stay on
    /// the shelf after purchase.
    fn buy(&mut self, slot: usize, events: &mut Vec<GameEvent>) {
        let Some(perk) = self.offers.get(slot).cloned() else {
            return;
        };
        if self.gold < perk.cost {
            debug!(perk = perk.name, cost = perk.cost, gold = self.gold, "cannot afford perk");
            return;
        }

        self.gold -= perk.cost;
        match perk.kind {
            PerkKind::GoldMultiplier => self.player.gold_multiplier += perk.value,
            PerkKind::Speed => self.player.base_speed += perk.value,
            PerkKind::BoostDuration => self.player.boost_bonus += perk.value,
            PerkKind::EnemyRadar => self.has_radar = true,
        }
        self.selected_perk = None;

        info!(perk = perk.name, cost = perk.cost, gold = self.gold, "perk purchased");
        events.push(GameEvent::PerkPurchased { kind: perk.kind, cost: perk.cost });
    }

    fn update_playing(&mut self, dt: f32, input: &InputState, events: &mut Vec<GameEvent>) {
        if self.stab_timer > 0.0 {
            self.stab_timer -= dt;
            if self.stab_timer <= 0.0 {
                self.attacked = false;
            }
        }

        let map = &self.levels[self.active].map;
        self.pursuer.update(map, self.player.position, dt);

        if self.pursuer.is_active() {
            let near = self.pursuer.position.distance(self.player.position)
                < self.config.pursuer.proximity_alert;
            if near != self.pursuer_near {
                self.pursuer_near = near;
                events.push(if near { GameEvent::PursuerNear } else { GameEvent::PursuerFar });
            }
        }

        if self.pursuer.is_caught(map, self.player.position) {
            if !self.attacked {
                self.attacked = true;
                self.stab_timer = self.config.stab_duration;
                info!(position = %self.player.position, "player attacked");
                events.push(GameEvent::Attacked);
            }
            // The attack lands half a second into the stab effect.
            if self.stab_timer < self.config.stab_duration - 0.5 {
                info!(level = self.current_level, gold = self.gold, "player killed");
                self.set_mode(GameMode::Lost);
                events.push(GameEvent::Lost);
                return;
            }
        }

        if self.player.boosted {
            self.player.boost_timer -= dt;
            if self.player.boost_timer <= 0.0 {
                self.player.boosted = false;
                self.player.boost_timer = 0.0;
            }
        }

        self.player.angle += input.mouse_delta_x * self.player.mouse_sensitivity;

        if self.move_player(dt, input) {
            let finished = self.current_level;
            self.current_level += 1;
            self.loading_timer = 0.0;
            info!(level = finished, gold = self.gold, "exit door reached");
            self.set_mode(GameMode::Loading);
            events.push(GameEvent::LevelCompleted { level: finished });
            return;
        }

        let pickups = collectible::collect_nearby(
            &mut self.collectibles,
            self.player.position,
            self.config.player.pickup_radius,
            self.player.gold_multiplier,
        );
        for pickup in pickups {
            match pickup {
                Pickup::Gold(amount) => {
                    self.gold += amount;
                    events.push(GameEvent::CoinCollected { gold: amount });
                }
                Pickup::SpeedBoost => {
                    self.player.boosted = true;
                    self.player.boost_timer =
                        self.config.player.boost_duration + self.player.boost_bonus;
                    events.push(GameEvent::BoostCollected);
                }
            }
        }
    }

    /// WASD movement with independent x and y collision. Returns true when
    /// the player stepped into an open exit door.
    fn move_player(&mut self, dt: f32, input: &InputState) -> bool {
        let forward = self.player.forward();
        let right = self.player.right();

        let mut wish = Vec2::ZERO;
        if self.actions.is_held(Action::MoveForward, input) { wish += forward; }
        if self.actions.is_held(Action::MoveBack, input) { wish -= forward; }
        if self.actions.is_held(Action::StrafeLeft, input) { wish -= right; }
        if self.actions.is_held(Action::StrafeRight, input) { wish += right; }

        let Some(dir) = normalize_or_none(wish) else {
            return false;
        };

        let boost = if self.player.boosted { self.config.player.boost_multiplier } else { 1.0 };
        let delta = dir * self.player.base_speed * boost * dt;
        let door_open = self.door_open();
        let map = &self.levels[self.active].map;

        let pos = self.player.position;
        let next_x = pos.x + delta.x;
        match map.tile(next_x as i32, pos.y as i32) {
            Tile::Door if door_open => return true,
            Tile::Floor => self.player.position.x = next_x,
            _ => {}
        }

        let pos = self.player.position;
        let next_y = pos.y + delta.y;
        match map.tile(pos.x as i32, next_y as i32) {
            Tile::Door if door_open => return true,
            Tile::Floor => self.player.position.y = next_y,
            _ => {}
        }

        false
    }
}
