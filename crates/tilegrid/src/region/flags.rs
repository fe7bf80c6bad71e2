// Clipping flags
// Direction bits double as wall-segment bits: a set bit on a tile means the
// tile has a wall on that side. +y is north, +x is east.

pub const DIRECTION_NORTHWEST: i32 = 0x1;
pub const DIRECTION_NORTH: i32 = 0x2;
pub const DIRECTION_NORTHEAST: i32 = 0x4;
pub const DIRECTION_EAST: i32 = 0x8;
pub const DIRECTION_SOUTHEAST: i32 = 0x10;
pub const DIRECTION_SOUTH: i32 = 0x20;
pub const DIRECTION_SOUTHWEST: i32 = 0x40;
pub const DIRECTION_WEST: i32 = 0x80;

/// Every directional bit; a tile carrying all of them cannot be entered or left
pub const ALL_DIRECTIONS: i32 = 0xFF;

pub const WALL_NORTH_WEST: i32 = DIRECTION_NORTHWEST;
pub const WALL_NORTH: i32 = DIRECTION_NORTH;
pub const WALL_NORTH_EAST: i32 = DIRECTION_NORTHEAST;
pub const WALL_EAST: i32 = DIRECTION_EAST;
pub const WALL_SOUTH_EAST: i32 = DIRECTION_SOUTHEAST;
pub const WALL_SOUTH: i32 = DIRECTION_SOUTH;
pub const WALL_SOUTH_WEST: i32 = DIRECTION_SOUTHWEST;
pub const WALL_WEST: i32 = DIRECTION_WEST;

pub const BLOCKED: i32 = 0x100;
pub const INVALID: i32 = 0x200000 | 0x40000;

/// Either composite flag
pub const IMPASSABLE: i32 = BLOCKED | INVALID;

/// Stored byte for tiles that are fully solid; finer directional data is discarded
pub const SOLID: i8 = -128;
