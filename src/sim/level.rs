//! Level representation and tile-grid parsing
//!
//! A level file is rows of whitespace-separated tile codes:
//! 0 = empty, 1 = solid (indestructible), 2-5 = colored destructible bricks,
//! any other positive code = destructible with the fallback color. Brick
//! size comes from dividing the field dimensions by the grid dimensions.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::{Entity, SpriteKey};

/// The four built-in levels, embedded at compile time
pub const BUILTIN_LEVELS: [&str; 4] = [
    include_str!("../../assets/levels/one.lvl"),
    include_str!("../../assets/levels/two.lvl"),
    include_str!("../../assets/levels/three.lvl"),
    include_str!("../../assets/levels/four.lvl"),
];

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level file contains no rows")]
    Empty,
    #[error("level rows have unequal lengths (expected {expected}, row {row} has {found})")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("failed to read level file")]
    Io(#[from] std::io::Error),
}

/// An ordered collection of bricks, row-major tile order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Level {
    pub bricks: Vec<Entity>,
}

impl Level {
    /// Parse a tile grid into bricks sized for the given field dimensions.
    ///
    /// Malformed tokens are logged and skipped, matching the original
    /// tutorial behavior, but a grid whose rows end up with unequal lengths
    /// is rejected outright rather than silently truncated.
    pub fn parse(text: &str, level_width: u32, level_height: u32) -> Result<Self, LevelError> {
        let mut tile_data: Vec<Vec<u32>> = Vec::new();
        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let mut row = Vec::new();
            for token in line.split_whitespace() {
                match token.parse::<u32>() {
                    Ok(code) => row.push(code),
                    Err(err) => {
                        log::warn!("skipping malformed tile code {token:?}: {err}");
                    }
                }
            }
            tile_data.push(row);
        }

        if tile_data.is_empty() {
            return Err(LevelError::Empty);
        }
        let expected = tile_data[0].len();
        for (row, data) in tile_data.iter().enumerate() {
            if data.len() != expected {
                return Err(LevelError::RaggedRows {
                    row,
                    expected,
                    found: data.len(),
                });
            }
        }

        Ok(Self::from_tiles(&tile_data, level_width, level_height))
    }

    /// Read and parse a level file from disk. A missing or unreadable file
    /// is a packaging error; callers abort startup on it.
    pub fn load(
        path: &std::path::Path,
        level_width: u32,
        level_height: u32,
    ) -> Result<Self, LevelError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, level_width, level_height)
    }

    fn from_tiles(tile_data: &[Vec<u32>], level_width: u32, level_height: u32) -> Self {
        let height = tile_data.len() as u32;
        let width = tile_data[0].len() as u32;
        // Integer division keeps brick edges on whole pixels
        let unit_width = level_width / width;
        let unit_height = level_height / height;
        let size = Vec2::new(unit_width as f32, unit_height as f32);

        let mut bricks = Vec::new();
        for (y, row) in tile_data.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                if code == 0 {
                    continue;
                }
                let position = Vec2::new(
                    (unit_width * x as u32) as f32,
                    (unit_height * y as u32) as f32,
                );
                let brick = if code == 1 {
                    let mut brick = Entity::new(position, size, SpriteKey::BlockSolid)
                        .with_color(Vec3::new(0.8, 0.8, 0.7));
                    brick.is_solid = true;
                    brick
                } else {
                    Entity::new(position, size, SpriteKey::Block).with_color(brick_color(code))
                };
                bricks.push(brick);
            }
        }
        Self { bricks }
    }

    /// All non-solid bricks destroyed; solid bricks never block completion
    pub fn is_completed(&self) -> bool {
        self.bricks
            .iter()
            .all(|brick| brick.is_solid || brick.destroyed)
    }
}

fn brick_color(code: u32) -> Vec3 {
    match code {
        2 => Vec3::new(0.2, 0.6, 1.0),
        3 => Vec3::new(0.0, 0.7, 0.0),
        4 => Vec3::new(0.8, 0.8, 0.4),
        5 => Vec3::new(1.0, 0.5, 0.0),
        _ => Vec3::ONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_grid() {
        let level = Level::parse("1 1 1 1\n2 3 4 5\n0 0 0 0\n", 800, 300).unwrap();
        // Row of four solids, row of four colored bricks, empty row
        assert_eq!(level.bricks.len(), 8);
        assert!(level.bricks[0].is_solid);
        assert!(!level.bricks[4].is_solid);
        // Brick size: 800/4 x 300/3
        assert_eq!(level.bricks[0].size, Vec2::new(200.0, 100.0));
        // Row-major order: second row starts at y = 100
        assert_eq!(level.bricks[4].position, Vec2::new(0.0, 100.0));
    }

    #[test]
    fn test_parse_colors() {
        let level = Level::parse("2 3 4 5 9", 500, 100).unwrap();
        assert_eq!(level.bricks[0].color, Vec3::new(0.2, 0.6, 1.0));
        assert_eq!(level.bricks[1].color, Vec3::new(0.0, 0.7, 0.0));
        assert_eq!(level.bricks[2].color, Vec3::new(0.8, 0.8, 0.4));
        assert_eq!(level.bricks[3].color, Vec3::new(1.0, 0.5, 0.0));
        // Unknown positive code falls back to white, still destructible
        assert_eq!(level.bricks[4].color, Vec3::ONE);
        assert!(!level.bricks[4].is_solid);
    }

    #[test]
    fn test_malformed_token_makes_row_ragged() {
        // "x" is skipped with a warning, leaving row 0 short: strict reject
        let result = Level::parse("1 x 1\n2 2 2\n", 800, 300);
        assert!(matches!(
            result,
            Err(LevelError::RaggedRows {
                row: 1,
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(Level::parse("", 800, 300), Err(LevelError::Empty)));
        assert!(matches!(
            Level::parse("\n  \n", 800, 300),
            Err(LevelError::Empty)
        ));
    }

    #[test]
    fn test_completion() {
        let mut level = Level::parse("1 2\n1 3\n", 800, 300).unwrap();
        assert!(!level.is_completed());

        // Destroy every non-solid brick; solids stay untouched
        for brick in level.bricks.iter_mut().filter(|b| !b.is_solid) {
            brick.destroyed = true;
        }
        assert!(level.is_completed());
    }

    #[test]
    fn test_completion_blocked_by_single_brick() {
        let mut level = Level::parse("2 2", 800, 300).unwrap();
        level.bricks[0].destroyed = true;
        assert!(!level.is_completed());
        level.bricks[1].destroyed = true;
        assert!(level.is_completed());
    }

    #[test]
    fn test_builtin_levels_parse() {
        for (i, text) in BUILTIN_LEVELS.iter().enumerate() {
            let level = Level::parse(text, 800, 300)
                .unwrap_or_else(|e| panic!("builtin level {i} failed: {e}"));
            assert!(!level.bricks.is_empty(), "builtin level {i} has no bricks");
            assert!(!level.is_completed());
        }
    }
}
