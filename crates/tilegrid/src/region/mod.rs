// Region collision map
// Per-tile directional clipping for one 104x104 region over 3 planes.
//
// Raw masks come from the world data as 32-bit flag words. They are narrowed
// to one signed byte per tile on load: anything flagged BLOCKED or INVALID
// becomes the SOLID sentinel, everything else keeps its low byte. Reads
// sign-extend the byte back to i32, so a tile whose west wall bit (0x80) is
// set also tests positive against BLOCKED | INVALID.

pub mod flags;
mod tile_map;

use std::fmt;

use tracing::debug;

use crate::error::RegionError;
use crate::{PLANE_COUNT, REGION_SIZE};
use flags::*;

pub use tile_map::{Step, TileBasedMap, walkable_neighbours};

const TILES_PER_PLANE: usize = (REGION_SIZE * REGION_SIZE) as usize;

/// The upper coordinate bound checked by orthogonal/diagonal moves. It never
/// binds; destinations past the region edge are rejected as out of range.
const UPPER_BOUND: i32 = i32::MAX;

/// Step cost between orthogonal neighbours
pub const ORTHOGONAL_COST: f32 = 1.0;

/// Step cost between diagonal neighbours (fixed approximation of sqrt 2)
pub const DIAGONAL_COST: f32 = 1.4;

/// Three-state reading of a tile's clipping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    /// No directional bit and no composite flag
    Free,
    /// Walls on some sides only
    Partial,
    /// Sentinel, flagged, or walled on all eight sides
    Solid,
}

/// Map an offset to its direction bit.
/// Anything but one of the eight unit offsets yields 0.
pub fn get_direction(dx: i32, dy: i32) -> i32 {
    match (dx, dy) {
        (0, -1) => DIRECTION_SOUTH,
        (-1, 0) => DIRECTION_WEST,
        (0, 1) => DIRECTION_NORTH,
        (1, 0) => DIRECTION_EAST,
        (-1, -1) => DIRECTION_SOUTHWEST,
        (-1, 1) => DIRECTION_NORTHWEST,
        (1, -1) => DIRECTION_SOUTHEAST,
        (1, 1) => DIRECTION_NORTHEAST,
        _ => 0,
    }
}

/// Cost of a single step from (sx, sy) to (tx, ty).
///
/// The absolute offset is classified through [`get_direction`], which only
/// separates orthogonal from everything else: orthogonal steps cost 1.0 and
/// every other input, including a zero or non-adjacent offset, costs 1.4.
pub fn get_cost(sx: i32, sy: i32, tx: i32, ty: i32) -> f32 {
    match get_direction((sx - tx).abs(), (sy - ty).abs()) {
        DIRECTION_NORTH | DIRECTION_SOUTH | DIRECTION_EAST | DIRECTION_WEST => ORTHOGONAL_COST,
        _ => DIAGONAL_COST,
    }
}

/// Clipping data and search markers for one region
#[derive(Clone)]
pub struct RegionMap {
    clipping: Vec<i8>,
    visited: Vec<bool>,
}

impl RegionMap {
    /// A region with every tile open on every plane
    pub fn empty() -> Self {
        RegionMap {
            clipping: vec![0; TILES_PER_PLANE * PLANE_COUNT as usize],
            visited: vec![false; TILES_PER_PLANE * PLANE_COUNT as usize],
        }
    }

    /// Build a region from one plane of raw masks indexed `[x][y]`.
    /// Columns or rows shorter than 104 leave the remaining tiles open.
    pub fn new<M: AsRef<[i32]>>(plane: i32, masks: &[M]) -> Result<Self, RegionError> {
        Self::empty().with_plane(plane, masks)
    }

    /// Load another plane of raw masks into this region before it is shared.
    /// Tiles not covered by `masks` keep their current value.
    pub fn with_plane<M: AsRef<[i32]>>(mut self, plane: i32, masks: &[M]) -> Result<Self, RegionError> {
        if !(0..PLANE_COUNT).contains(&plane) {
            return Err(RegionError::PlaneOutOfRange(plane));
        }

        let columns = masks.len();
        let rows = masks.iter().map(|column| column.as_ref().len()).max().unwrap_or(0);
        if columns > REGION_SIZE as usize || rows > REGION_SIZE as usize {
            return Err(RegionError::MaskDimensions { columns, rows });
        }

        let base = plane as usize * TILES_PER_PLANE;
        let mut collapsed = 0usize;
        for (x, column) in masks.iter().enumerate() {
            for (y, &mask) in column.as_ref().iter().enumerate() {
                let value = if mask & IMPASSABLE != 0 {
                    collapsed += 1;
                    SOLID
                } else {
                    mask as i8
                };
                self.clipping[base + x * REGION_SIZE as usize + y] = value;
            }
        }

        debug!(plane, columns, rows, collapsed, "Loaded region clipping plane");
        Ok(self)
    }

    fn index(plane: i32, x: i32, y: i32) -> Result<usize, RegionError> {
        if !(0..PLANE_COUNT).contains(&plane)
            || !(0..REGION_SIZE).contains(&x)
            || !(0..REGION_SIZE).contains(&y)
        {
            return Err(RegionError::OutOfRange { plane, x, y });
        }
        Ok(((plane * REGION_SIZE + x) * REGION_SIZE + y) as usize)
    }

    /// Raw clipping byte of a tile, sign-extended
    pub fn get_block(&self, plane: i32, x: i32, y: i32) -> Result<i32, RegionError> {
        Ok(i32::from(self.clipping[Self::index(plane, x, y)?]))
    }

    /// True if any bit of `direction` is set on the tile
    pub fn blocked(&self, plane: i32, x: i32, y: i32, direction: i32) -> Result<bool, RegionError> {
        Ok(self.get_block(plane, x, y)? & direction != 0)
    }

    /// Nothing enters or leaves the tile
    pub fn solid(&self, plane: i32, x: i32, y: i32) -> Result<bool, RegionError> {
        let block = self.get_block(plane, x, y)?;
        Ok(block & IMPASSABLE != 0
            || block == i32::from(SOLID)
            || block & ALL_DIRECTIONS == ALL_DIRECTIONS)
    }

    /// The tile carries no wall and no flag at all.
    /// Not the complement of [`solid`](Self::solid): a partly walled tile is neither.
    pub fn free(&self, plane: i32, x: i32, y: i32) -> Result<bool, RegionError> {
        let block = self.get_block(plane, x, y)?;
        Ok(!(block & IMPASSABLE != 0
            || block == i32::from(SOLID)
            || block & ALL_DIRECTIONS != 0))
    }

    pub fn tile_state(&self, plane: i32, x: i32, y: i32) -> Result<TileState, RegionError> {
        if self.solid(plane, x, y)? {
            Ok(TileState::Solid)
        } else if self.free(plane, x, y)? {
            Ok(TileState::Free)
        } else {
            Ok(TileState::Partial)
        }
    }

    /// Can an agent step from (x, y) to the neighbouring tile (x2, y2)?
    ///
    /// Non-adjacent pairs, including the tile itself, are never walkable.
    /// Destinations with a negative coordinate are denied; destinations past
    /// the far edge of the region are reported as out of range.
    pub fn is_walkable(&self, plane: i32, x: i32, y: i32, x2: i32, y2: i32) -> Result<bool, RegionError> {
        let here = self.get_block(plane, x, y)?;
        if x2 < 0 || y2 < 0 {
            return Ok(false);
        }
        let there = self.get_block(plane, x2, y2)?;
        if here == i32::from(SOLID) || there == i32::from(SOLID) {
            return Ok(false);
        }

        // Tile at (x + dx, y + dy) carries none of `mask`
        let clear = |dx: i32, dy: i32, mask: i32| -> Result<bool, RegionError> {
            Ok(self.get_block(plane, x + dx, y + dy)? & mask == 0)
        };

        let walkable = match (x2 - x, y2 - y) {
            (0, -1) => y > 0 && here & WALL_SOUTH == 0 && clear(0, -1, IMPASSABLE)?,
            (-1, 0) => x > 0 && here & WALL_WEST == 0 && clear(-1, 0, IMPASSABLE)?,
            (0, 1) => y < UPPER_BOUND && here & WALL_NORTH == 0 && clear(0, 1, IMPASSABLE)?,
            (1, 0) => x < UPPER_BOUND && here & WALL_EAST == 0 && clear(1, 0, IMPASSABLE)?,
            (-1, -1) => {
                x > 0
                    && y > 0
                    && here & (WALL_SOUTH_WEST | WALL_SOUTH | WALL_WEST) == 0
                    && clear(-1, -1, IMPASSABLE)?
                    && clear(0, -1, IMPASSABLE | WALL_WEST)?
                    && clear(-1, 0, IMPASSABLE | WALL_SOUTH)?
            }
            (-1, 1) => {
                x > 0
                    && y < UPPER_BOUND
                    && here & (WALL_NORTH_WEST | WALL_NORTH | WALL_WEST) == 0
                    && clear(-1, 1, IMPASSABLE)?
                    && clear(0, 1, IMPASSABLE | WALL_WEST)?
                    && clear(-1, 0, IMPASSABLE | WALL_NORTH)?
            }
            (1, -1) => {
                x < UPPER_BOUND
                    && y > 0
                    && here & (WALL_SOUTH_EAST | WALL_SOUTH | WALL_EAST) == 0
                    && clear(1, -1, IMPASSABLE)?
                    && clear(0, -1, IMPASSABLE | WALL_EAST)?
                    && clear(1, 0, IMPASSABLE | WALL_SOUTH)?
            }
            (1, 1) => {
                x < UPPER_BOUND
                    && y < UPPER_BOUND
                    && here & (WALL_NORTH_EAST | WALL_NORTH | WALL_EAST) == 0
                    && clear(1, 1, IMPASSABLE)?
                    && clear(0, 1, IMPASSABLE | WALL_EAST)?
                    && clear(1, 0, IMPASSABLE | WALL_NORTH)?
            }
            _ => false,
        };

        Ok(walkable)
    }

    /// Record that a search has expanded this tile
    pub fn path_finder_visited(&mut self, plane: i32, x: i32, y: i32) -> Result<(), RegionError> {
        let index = Self::index(plane, x, y)?;
        self.visited[index] = true;
        Ok(())
    }

    pub fn is_visited(&self, plane: i32, x: i32, y: i32) -> Result<bool, RegionError> {
        Ok(self.visited[Self::index(plane, x, y)?])
    }

    /// Forget every search marker so the map can serve another search
    pub fn clear_visited(&mut self) {
        self.visited.fill(false);
    }
}

impl Default for RegionMap {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for RegionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let solid = self.clipping.iter().filter(|&&b| b == SOLID).count();
        let visited = self.visited.iter().filter(|&&v| v).count();
        f.debug_struct("RegionMap")
            .field("solid", &solid)
            .field("visited", &visited)
            .finish()
    }
}
