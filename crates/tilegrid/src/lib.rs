// tilegrid - Tile-based spatial reasoning core
//
// Two independent components:
// - RegionMap: directional clipping for one 104x104 region over 3 planes,
//   answering walkability and step cost questions for a grid search
// - Area: a polygon with a plane range, answering containment, bounds,
//   center and random-sample questions

pub mod area;
pub mod error;
pub mod region;
pub mod tile;

pub use area::{Area, Bounds};
pub use error::{RegionError, TileParseError};
pub use region::{RegionMap, Step, TileBasedMap, TileState, get_direction, walkable_neighbours};
pub use tile::{Locatable, Tile};

/// Width and height of a region in tiles
pub const REGION_SIZE: i32 = 104;

/// Number of planes a region map carries
pub const PLANE_COUNT: i32 = 3;
