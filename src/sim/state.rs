//! Game state and core simulation types
//!
//! Everything a round needs lives in [`GameState`]; the loop driver owns it
//! and threads it through each component once per tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::Rect;
use super::feedback::{MilestoneText, VisualFlags};
use crate::consts::*;
use crate::settings::GameSettings;

/// Round-level state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundPhase {
    /// Waiting for the first jump, character bobbing in place
    Idle,
    /// Physics, obstacles, scoring and collision all running
    Active,
    /// Collision happened; only the character keeps falling
    Over,
}

/// Drawable area, queried from the host every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Lowest y the character can occupy (top of the ground strip)
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.height - GROUND_HEIGHT
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(400.0, 720.0)
    }
}

/// The player-controlled character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Character {
    pub x: f32,
    pub y: f32,
    /// Vertical velocity (positive = falling)
    pub vel: f32,
    /// Visual tilt in degrees, derived from velocity
    pub rotation: f32,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            x: CHARACTER_X,
            y: CHARACTER_START_Y,
            vel: 0.0,
            rotation: 0.0,
        }
    }
}

impl Character {
    /// Bounding box
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + CHARACTER_SIZE, self.y + CHARACTER_SIZE)
    }

    /// Centre of the bounding box (particle origin)
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + CHARACTER_SIZE / 2.0, self.y + CHARACTER_SIZE / 2.0)
    }

    /// True once the character has reached the ground
    #[inline]
    pub fn is_grounded(&self, floor_y: f32) -> bool {
        self.y >= floor_y
    }
}

/// A pair of pipes with a passable gap between them
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Obstacle {
    pub id: u32,
    /// Wall-clock time of the spawn (ms)
    pub spawned_at_ms: f64,
    /// Left edge
    pub x: f32,
    /// Top of the gap
    pub gap_y: f32,
    /// Gap height, fixed at spawn time
    pub gap: f32,
    /// Set once the character has cleared this obstacle
    pub passed: bool,
}

impl Obstacle {
    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.x + PIPE_WIDTH
    }

    /// Solid segment from the top of the screen to the gap
    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.right_edge(), self.gap_y)
    }

    /// Solid segment from the gap down to the floor
    pub fn bottom_rect(&self, floor_y: f32) -> Rect {
        Rect::new(self.x, self.gap_y + self.gap, self.right_edge(), floor_y)
    }
}

/// A cosmetic particle. Never read by collision or scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub alpha: f32,
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Random source for gap placement, particles and phrases
    pub rng: Pcg32,
    /// Round generation, bumped on every reset
    pub round: u32,
    /// Current phase
    pub phase: RoundPhase,
    /// Settings snapshot for this round
    pub settings: GameSettings,
    pub character: Character,
    /// Obstacles, leftmost first
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub score: u32,
    /// Time of the most recent spawn (ms)
    pub last_spawn_ms: f64,
    /// Transient visual flags
    pub flags: VisualFlags,
    /// Milestone phrase currently shown
    pub milestone: Option<MilestoneText>,
    /// Simulation tick counter for this round
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given settings and seed
    pub fn new(settings: GameSettings, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            round: 1,
            phase: RoundPhase::Idle,
            settings,
            character: Character::default(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            score: 0,
            last_spawn_ms: 0.0,
            flags: VisualFlags::default(),
            milestone: None,
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Start a fresh round in `Idle`. The RNG stream continues.
    pub fn reset(&mut self, settings: GameSettings) {
        self.round += 1;
        self.phase = RoundPhase::Idle;
        self.settings = settings;
        self.character = Character::default();
        self.obstacles.clear();
        self.particles.clear();
        self.score = 0;
        self.last_spawn_ms = 0.0;
        self.flags = VisualFlags::default();
        self.milestone = None;
        self.time_ticks = 0;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::Active
    }
}
