use glam::Vec2;
use serde::{Deserialize, Serialize};
use wolfcast_common::{EngineConfig, Player};
use wolfcast_input::{Action, InputState};

use crate::map::Map;

/// How player movement interacts with wall cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MovementPolicy {
    /// Movement ignores the map; the player can walk through walls.
    #[default]
    Free,
    /// Each axis of a move is rejected if it would end inside a wall cell,
    /// so the player slides along walls instead of stopping dead.
    BlockWalls,
}

/// The simulation state: a static map and the player walking through it.
#[derive(Debug, Clone)]
pub struct World {
    map: Map,
    player: Player,
    movement: MovementPolicy,
    tick: u64,
}

impl World {
    pub fn new(map: Map, player: Player) -> Self {
        Self {
            map,
            player,
            movement: MovementPolicy::default(),
            tick: 0,
        }
    }

    /// World on `map` with spawn pose and collision policy from `config`.
    pub fn from_config(map: Map, config: &EngineConfig) -> Self {
        let movement = if config.collide_with_walls {
            MovementPolicy::BlockWalls
        } else {
            MovementPolicy::Free
        };
        Self::new(map, config.spawn).with_movement(movement)
    }

    pub fn with_movement(mut self, movement: MovementPolicy) -> Self {
        self.movement = movement;
        self
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn movement(&self) -> MovementPolicy {
        self.movement
    }

    /// Number of fixed updates applied so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Advance one fixed step. `dt` is always the fixed step length, in
    /// seconds; turning is one radian per second and walking one cell per
    /// second.
    pub fn update(&mut self, dt: f32, input: &InputState) {
        self.tick += 1;

        if input.is_key_down(Action::TurnLeft) {
            self.player.angle -= dt;
        }
        if input.is_key_down(Action::TurnRight) {
            self.player.angle += dt;
        }
        if input.is_key_down(Action::MoveForward) {
            let delta = self.player.forward() * dt;
            self.player.position = self.resolve_move(self.player.position, delta);
        }
    }

    fn resolve_move(&self, from: Vec2, delta: Vec2) -> Vec2 {
        match self.movement {
            MovementPolicy::Free => from + delta,
            MovementPolicy::BlockWalls => {
                let mut to = from;
                if !self.map.is_wall_at(Vec2::new(from.x + delta.x, from.y)) {
                    to.x += delta.x;
                }
                if !self.map.is_wall_at(Vec2::new(to.x, from.y + delta.y)) {
                    to.y += delta.y;
                }
                if to != from + delta {
                    tracing::trace!(x = to.x, y = to.y, "movement clipped by wall");
                }
                to
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Map::level_one(), Player::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn holding(actions: &[Action]) -> InputState {
        let mut input = InputState::new();
        for action in actions {
            input.set_key_down(*action);
        }
        input
    }

    #[test]
    fn idle_update_only_advances_tick() {
        let mut world = World::default();
        world.update(DT, &InputState::new());
        assert_eq!(world.tick(), 1);
        assert_eq!(*world.player(), Player::default());
    }

    #[test]
    fn turn_right_adds_one_step() {
        let mut world = World::default();
        world.update(DT, &holding(&[Action::TurnRight]));
        assert_eq!(world.player().angle, DT);
    }

    #[test]
    fn turn_left_subtracts_one_step() {
        let mut world = World::default();
        world.update(DT, &holding(&[Action::TurnLeft]));
        assert_eq!(world.player().angle, -DT);
    }

    #[test]
    fn opposing_turns_cancel() {
        let mut world = World::default();
        world.update(DT, &holding(&[Action::TurnLeft, Action::TurnRight]));
        assert_eq!(world.player().angle, 0.0);
    }

    #[test]
    fn forward_moves_along_facing() {
        let mut world = World::default();
        world.update(DT, &holding(&[Action::MoveForward]));
        let p = world.player();
        assert_eq!(p.position.x, 3.0 + DT);
        assert_eq!(p.position.y, 3.0);
    }

    #[test]
    fn turn_applies_before_move() {
        let mut world = World::default();
        world.update(DT, &holding(&[Action::TurnRight, Action::MoveForward]));
        let p = world.player();
        assert!((p.position.x - (3.0 + DT.cos() * DT)).abs() < 1e-6);
        assert!((p.position.y - (3.0 + DT.sin() * DT)).abs() < 1e-6);
    }

    #[test]
    fn free_movement_walks_through_walls() {
        // Facing the pillar at x = 5 from (4.99, 2.5).
        let mut world = World::new(Map::level_one(), Player::new(4.99, 2.5, 0.0));
        let input = holding(&[Action::MoveForward]);
        for _ in 0..6 {
            world.update(DT, &input);
        }
        assert!(world.player().position.x > 5.0);
        assert!(world.map().is_wall_at(world.player().position));
    }

    #[test]
    fn blocking_movement_stops_at_walls() {
        let mut world = World::new(Map::level_one(), Player::new(4.99, 2.5, 0.0))
            .with_movement(MovementPolicy::BlockWalls);
        let input = holding(&[Action::MoveForward]);
        for _ in 0..60 {
            world.update(DT, &input);
        }
        assert!(world.player().position.x < 5.0);
        assert!(!world.map().is_wall_at(world.player().position));
    }

    #[test]
    fn blocking_movement_slides_along_walls() {
        // Heading diagonally into the pillar's west face: x is blocked, y keeps moving.
        let start = Player::new(4.99, 2.5, std::f32::consts::FRAC_PI_4);
        let mut world = World::new(Map::level_one(), start).with_movement(MovementPolicy::BlockWalls);
        let input = holding(&[Action::MoveForward]);
        for _ in 0..10 {
            world.update(DT, &input);
        }
        let p = world.player().position;
        assert_eq!(p.x, 4.99);
        assert!(p.y > 2.5);
    }

    #[test]
    fn from_config_applies_spawn_and_policy() {
        let config = EngineConfig {
            collide_with_walls: true,
            spawn: Player::new(1.5, 1.5, 0.5),
            ..EngineConfig::default()
        };
        let world = World::from_config(Map::level_one(), &config);
        assert_eq!(world.movement(), MovementPolicy::BlockWalls);
        assert_eq!(*world.player(), Player::new(1.5, 1.5, 0.5));
    }
}
