//! Level plans and static terrain
//!
//! A level plan is a rectangular block of characters, one per tile. The
//! [`Legend`] maps each character either to a terrain tile or to an actor
//! spawn; actor cells become empty terrain.

use std::collections::HashMap;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::actor::{Actor, ActorId, HazardKind};
use super::collision::Rect;

/// Terrain classification of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    #[default]
    Empty,
    Wall,
    /// Static lava: touching it loses the level
    Hazard,
}

/// Actor produced by a plan character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Spawn {
    Player,
    Coin,
    Hazard(HazardKind),
}

/// What a plan character stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Glyph {
    Tile(TileKind),
    Actor(Spawn),
}

/// Character lookup table used when parsing plans
#[derive(Debug, Clone)]
pub struct Legend {
    glyphs: HashMap<char, Glyph>,
}

impl Default for Legend {
    fn default() -> Self {
        let glyphs = [
            ('.', Glyph::Tile(TileKind::Empty)),
            ('#', Glyph::Tile(TileKind::Wall)),
            ('+', Glyph::Tile(TileKind::Hazard)),
            ('@', Glyph::Actor(Spawn::Player)),
            ('o', Glyph::Actor(Spawn::Coin)),
            ('=', Glyph::Actor(Spawn::Hazard(HazardKind::Horizontal))),
            ('|', Glyph::Actor(Spawn::Hazard(HazardKind::Vertical))),
            ('v', Glyph::Actor(Spawn::Hazard(HazardKind::Dripping))),
        ];
        Self {
            glyphs: glyphs.into_iter().collect(),
        }
    }
}

impl Legend {
    /// Legend with no characters mapped
    pub fn empty() -> Self {
        Self {
            glyphs: HashMap::new(),
        }
    }

    pub fn get(&self, ch: char) -> Option<Glyph> {
        self.glyphs.get(&ch).copied()
    }

    /// Map a character, returning the glyph it replaced
    pub fn insert(&mut self, ch: char, glyph: Glyph) -> Option<Glyph> {
        self.glyphs.insert(ch, glyph)
    }
}

/// Reasons a plan cannot be turned into a level
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level plan is empty")]
    Empty,
    #[error("row {row} is {found} tiles wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unrecognized character {ch:?} at column {x}, row {y}")]
    UnknownGlyph { ch: char, x: usize, y: usize },
    #[error("level has no player start")]
    MissingPlayer,
    #[error("level has {count} player starts, expected exactly one")]
    MultiplePlayers { count: usize },
}

/// Immutable terrain grid plus the actors it starts with
#[derive(Debug, Clone)]
pub struct Level {
    width: usize,
    height: usize,
    /// Row-major tiles
    tiles: Vec<TileKind>,
    start_actors: Vec<Actor>,
}

impl Level {
    /// Parse a plan with the default legend and seed 0
    pub fn from_plan(plan: &str) -> Result<Self, LevelError> {
        Self::parse(plan, &Legend::default(), 0)
    }

    /// Parse a plan
    ///
    /// Surrounding whitespace is trimmed; rows must already be equal width.
    /// Actors are created in row-major scan order and numbered in that order.
    /// `seed` only drives cosmetic coin wobble phases.
    pub fn parse(plan: &str, legend: &Legend, seed: u64) -> Result<Self, LevelError> {
        let plan = plan.trim();
        if plan.is_empty() {
            return Err(LevelError::Empty);
        }

        let mut rng = Pcg32::seed_from_u64(seed);
        let rows: Vec<Vec<char>> = plan.lines().map(|line| line.chars().collect()).collect();
        let width = rows[0].len();
        let height = rows.len();

        let mut tiles = Vec::with_capacity(width * height);
        let mut start_actors = Vec::new();
        let mut players = 0;

        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(LevelError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &ch) in row.iter().enumerate() {
                match legend.get(ch) {
                    Some(Glyph::Tile(kind)) => tiles.push(kind),
                    Some(Glyph::Actor(spawn)) => {
                        if spawn == Spawn::Player {
                            players += 1;
                        }
                        let id = ActorId(start_actors.len() as u32);
                        let cell = Vec2::new(x as f32, y as f32);
                        start_actors.push(Actor::create(spawn, id, cell, &mut rng));
                        tiles.push(TileKind::Empty);
                    }
                    None => return Err(LevelError::UnknownGlyph { ch, x, y }),
                }
            }
        }

        match players {
            0 => return Err(LevelError::MissingPlayer),
            1 => {}
            count => return Err(LevelError::MultiplePlayers { count }),
        }

        log::debug!(
            "Parsed {}x{} level with {} actors",
            width,
            height,
            start_actors.len()
        );

        Ok(Self {
            width,
            height,
            tiles,
            start_actors,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Actors present when the level starts, in scan order
    pub fn start_actors(&self) -> &[Actor] {
        &self.start_actors
    }

    /// Tile at a cell; everything outside the grid is wall
    pub fn tile(&self, x: i64, y: i64) -> TileKind {
        let outside = x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64;
        if outside {
            TileKind::Wall
        } else {
            self.tiles[y as usize * self.width + x as usize]
        }
    }

    /// Whether the rectangle `[pos, pos + size)` covers any cell of `kind`
    pub fn touches(&self, pos: Vec2, size: Vec2, kind: TileKind) -> bool {
        let (xs, mut ys) = Rect::new(pos, size).cell_span();
        ys.any(|y| xs.clone().any(|x| self.tile(x, y) == kind))
    }

    /// Iterate rows of tiles, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[TileKind]> {
        self.tiles.chunks(self.width)
    }
}
