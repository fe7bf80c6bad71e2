// Tile map seam consumed by grid searches

use crate::error::RegionError;
use crate::REGION_SIZE;

use super::{RegionMap, get_cost};

/// Neighbour offsets in expansion order: S, W, N, E, SW, NW, SE, NE
const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (-1, 0),
    (0, 1),
    (1, 0),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// What a grid search needs from the map it walks
pub trait TileBasedMap {
    fn width_in_tiles(&self) -> i32;

    fn height_in_tiles(&self) -> i32;

    fn is_walkable(&self, plane: i32, x: i32, y: i32, x2: i32, y2: i32) -> Result<bool, RegionError>;

    fn cost(&self, plane: i32, sx: i32, sy: i32, tx: i32, ty: i32) -> f32;

    fn path_finder_visited(&mut self, plane: i32, x: i32, y: i32) -> Result<(), RegionError>;
}

impl TileBasedMap for RegionMap {
    fn width_in_tiles(&self) -> i32 {
        REGION_SIZE
    }

    fn height_in_tiles(&self) -> i32 {
        REGION_SIZE
    }

    fn is_walkable(&self, plane: i32, x: i32, y: i32, x2: i32, y2: i32) -> Result<bool, RegionError> {
        RegionMap::is_walkable(self, plane, x, y, x2, y2)
    }

    fn cost(&self, _plane: i32, sx: i32, sy: i32, tx: i32, ty: i32) -> f32 {
        get_cost(sx, sy, tx, ty)
    }

    fn path_finder_visited(&mut self, plane: i32, x: i32, y: i32) -> Result<(), RegionError> {
        RegionMap::path_finder_visited(self, plane, x, y)
    }
}

/// One legal step out of a tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub x: i32,
    pub y: i32,
    pub cost: f32,
}

/// Walkable neighbours of (x, y) with their step cost.
/// Neighbours past the map edge are skipped; a source outside the map is an error.
pub fn walkable_neighbours<M: TileBasedMap + ?Sized>(
    map: &M,
    plane: i32,
    x: i32,
    y: i32,
) -> Result<Vec<Step>, RegionError> {
    let width = map.width_in_tiles();
    let height = map.height_in_tiles();
    if !(0..width).contains(&x) || !(0..height).contains(&y) {
        return Err(RegionError::OutOfRange { plane, x, y });
    }

    let mut steps = Vec::with_capacity(NEIGHBOUR_OFFSETS.len());
    for (dx, dy) in NEIGHBOUR_OFFSETS {
        let (nx, ny) = (x + dx, y + dy);
        if !(0..width).contains(&nx) || !(0..height).contains(&ny) {
            continue;
        }
        if map.is_walkable(plane, x, y, nx, ny)? {
            steps.push(Step {
                x: nx,
                y: ny,
                cost: map.cost(plane, x, y, nx, ny),
            });
        }
    }

    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::flags::{BLOCKED, WALL_NORTH};

    fn region_with(entries: &[(usize, usize, i32)]) -> RegionMap {
        let mut masks = vec![vec![0; REGION_SIZE as usize]; REGION_SIZE as usize];
        for &(x, y, mask) in entries {
            masks[x][y] = mask;
        }
        RegionMap::new(0, &masks).unwrap()
    }

    #[test]
    fn test_open_tile_has_eight_steps() {
        let region = RegionMap::empty();
        let steps = walkable_neighbours(&region, 0, 40, 40).unwrap();

        assert_eq!(steps.len(), 8);
        assert_eq!(steps[0], Step { x: 40, y: 39, cost: 1.0 });
        assert_eq!(steps[7], Step { x: 41, y: 41, cost: 1.4 });
        assert_eq!(steps.iter().filter(|s| s.cost == 1.0).count(), 4);
        assert_eq!(steps.iter().filter(|s| s.cost == 1.4).count(), 4);
    }

    #[test]
    fn test_corner_tiles_skip_outside() {
        let region = RegionMap::empty();
        let origin = walkable_neighbours(&region, 0, 0, 0).unwrap();
        assert_eq!(
            origin.iter().map(|s| (s.x, s.y)).collect::<Vec<_>>(),
            vec![(0, 1), (1, 0), (1, 1)]
        );

        let far = walkable_neighbours(&region, 0, 103, 103).unwrap();
        assert_eq!(
            far.iter().map(|s| (s.x, s.y)).collect::<Vec<_>>(),
            vec![(103, 102), (102, 103), (102, 102)]
        );
    }

    #[test]
    fn test_walls_and_blocks_prune_steps() {
        let region = region_with(&[(40, 40, WALL_NORTH), (41, 40, BLOCKED)]);
        let steps: Vec<_> = walkable_neighbours(&region, 0, 40, 40)
            .unwrap()
            .into_iter()
            .map(|s| (s.x, s.y))
            .collect();

        // North wall removes N, NW and NE; the blocked tile removes E and SE
        assert_eq!(steps, vec![(40, 39), (39, 40), (39, 39)]);
    }

    #[test]
    fn test_source_outside_map() {
        let region = RegionMap::empty();
        assert_eq!(
            walkable_neighbours(&region, 0, 104, 3),
            Err(RegionError::OutOfRange { plane: 0, x: 104, y: 3 })
        );
    }

    #[test]
    fn test_visited_through_trait() {
        fn mark<M: TileBasedMap>(map: &mut M) {
            map.path_finder_visited(2, 5, 6).unwrap();
        }

        let mut region = RegionMap::empty();
        mark(&mut region);
        assert!(region.is_visited(2, 5, 6).unwrap());
        assert_eq!(region.width_in_tiles(), 104);
        assert_eq!(region.height_in_tiles(), 104);
    }
}
