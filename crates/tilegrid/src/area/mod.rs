// Area - polygonal region of the world spanning a range of planes
//
// Vertices are kept in insertion order and close back onto the first one.
// Containment is an odd-crossing test on the x/y polygon combined with an
// inclusive plane range check.

use rand::Rng;
use tracing::trace;

use crate::tile::{Locatable, Tile};

/// Vertex storage starts with room for a quad
const MINIMUM_LENGTH: usize = 4;

/// Rejection samples tried by [`Area::random`] before giving up
pub const RANDOM_ATTEMPTS: usize = 100;

/// Axis-aligned bounding box: origin plus extent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    /// Half-open: the far edges are outside
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (x0, y0) = (f64::from(self.x), f64::from(self.y));
        x >= x0 && y >= y0 && x < x0 + f64::from(self.width) && y < y0 + f64::from(self.height)
    }

    pub fn center_x(&self) -> f64 {
        f64::from(self.x) + f64::from(self.width) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        f64::from(self.y) + f64::from(self.height) / 2.0
    }
}

/// A polygon on the x/y grid plus the planes it occupies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    vertices: Vec<(i32, i32)>,
    planes: Option<(i32, i32)>,
}

impl Area {
    pub fn new() -> Self {
        Area {
            vertices: Vec::with_capacity(MINIMUM_LENGTH),
            planes: None,
        }
    }

    /// Build an area from its outline.
    /// Exactly two tiles are taken as opposite corners of a rectangle.
    pub fn from_tiles(tiles: &[Tile]) -> Self {
        if let [a, b] = tiles {
            return Self::rectangle(*a, *b);
        }

        let mut area = Self::new();
        area.extend(tiles.iter().copied());
        area
    }

    /// Axis-aligned rectangle with `a` and `b` at opposite corners.
    /// The two southern corners take `a`'s plane, the northern ones `b`'s.
    pub fn rectangle(a: Tile, b: Tile) -> Self {
        let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
        let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));

        let mut area = Self::new();
        area.add_tile(min_x, min_y, a.z);
        area.add_tile(max_x, min_y, a.z);
        area.add_tile(max_x, max_y, b.z);
        area.add_tile(min_x, max_y, b.z);
        area
    }

    /// Append a vertex and widen the plane range to cover `z`
    pub fn add_tile(&mut self, x: i32, y: i32, z: i32) {
        self.vertices.push((x, y));
        self.planes = Some(match self.planes {
            Some((min, max)) => (min.min(z), max.max(z)),
            None => (z, z),
        });
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[(i32, i32)] {
        &self.vertices
    }

    /// Lowest plane covered, -1 while the area has no vertex
    pub fn min_plane(&self) -> i32 {
        self.planes.map_or(-1, |(min, _)| min)
    }

    /// Highest plane covered, -1 while the area has no vertex
    pub fn max_plane(&self) -> i32 {
        self.planes.map_or(-1, |(_, max)| max)
    }

    /// Bounding box of all vertices
    pub fn bounds(&self) -> Option<Bounds> {
        let (&(first_x, first_y), rest) = self.vertices.split_first()?;

        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first_x, first_x, first_y, first_y);
        for &(x, y) in rest {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }

        Some(Bounds {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }

    /// Center of the bounding box, rounded half-up, on the middle plane
    pub fn center(&self) -> Option<Tile> {
        let bounds = self.bounds()?;
        Some(Tile {
            x: round_half_up(bounds.center_x()),
            y: round_half_up(bounds.center_y()),
            z: (self.min_plane() + self.max_plane()) / 2,
        })
    }

    /// A random tile inside the area, or `None` if sampling missed every time
    pub fn random(&self) -> Option<Tile> {
        self.random_with(&mut rand::thread_rng())
    }

    /// [`random`](Self::random) with a caller-supplied generator
    pub fn random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Tile> {
        let bounds = self.bounds()?;
        let (min_plane, max_plane) = self.planes?;

        for _ in 0..RANDOM_ATTEMPTS {
            let tile = Tile {
                x: rng.gen_range(bounds.x..=bounds.x + bounds.width),
                y: rng.gen_range(bounds.y..=bounds.y + bounds.height),
                z: rng.gen_range(min_plane..=max_plane),
            };
            if self.contains_tile(&tile) {
                return Some(tile);
            }
        }

        trace!(vertices = self.len(), "No random tile found in area after {} attempts", RANDOM_ATTEMPTS);
        None
    }

    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        self.contains_point(f64::from(x), f64::from(y), f64::from(z))
    }

    pub fn contains_tile(&self, tile: &Tile) -> bool {
        self.contains(tile.x, tile.y, tile.z)
    }

    pub fn contains_locatable<L: Locatable + ?Sized>(&self, item: &L) -> bool {
        self.contains_tile(&item.location())
    }

    /// Point-in-area test for arbitrary, possibly fractional, coordinates.
    ///
    /// Boundary ownership follows from the edge walk: points on a left or
    /// bottom edge are usually inside, points on a right or top edge outside.
    pub fn contains_point(&self, x: f64, y: f64, z: f64) -> bool {
        if self.vertices.len() <= 2 {
            return false;
        }
        match self.bounds() {
            Some(bounds) if bounds.contains(x, y) => {}
            _ => return false,
        }

        let (mut last_x, mut last_y) = self.vertices[self.vertices.len() - 1];
        let mut hits = 0u32;

        for &(cur_x, cur_y) in &self.vertices {
            let (prev_x, prev_y) = (last_x, last_y);
            (last_x, last_y) = (cur_x, cur_y);

            if cur_y == prev_y {
                continue;
            }

            let left_x = if cur_x < prev_x {
                if x >= f64::from(prev_x) {
                    continue;
                }
                cur_x
            } else {
                if x >= f64::from(cur_x) {
                    continue;
                }
                prev_x
            };

            // Offset of the point from the edge's lower end
            let (test_x, test_y) = if cur_y < prev_y {
                if y < f64::from(cur_y) || y >= f64::from(prev_y) {
                    continue;
                }
                if x < f64::from(left_x) {
                    hits += 1;
                    continue;
                }
                (x - f64::from(cur_x), y - f64::from(cur_y))
            } else {
                if y < f64::from(prev_y) || y >= f64::from(cur_y) {
                    continue;
                }
                if x < f64::from(left_x) {
                    hits += 1;
                    continue;
                }
                (x - f64::from(prev_x), y - f64::from(prev_y))
            };

            if test_x < test_y / f64::from(prev_y - cur_y) * f64::from(prev_x - cur_x) {
                hits += 1;
            }
        }

        let Some((min_plane, max_plane)) = self.planes else {
            return false;
        };
        hits & 1 != 0 && z >= f64::from(min_plane) && z <= f64::from(max_plane)
    }
}

impl Default for Area {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Tile> for Area {
    fn extend<I: IntoIterator<Item = Tile>>(&mut self, tiles: I) {
        for tile in tiles {
            self.add_tile(tile.x, tile.y, tile.z);
        }
    }
}

impl FromIterator<Tile> for Area {
    fn from_iter<I: IntoIterator<Item = Tile>>(tiles: I) -> Self {
        let mut area = Self::new();
        area.extend(tiles);
        area
    }
}

/// Round to nearest, ties toward positive infinity
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
