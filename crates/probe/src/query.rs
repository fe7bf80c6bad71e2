// query.rs - answers probe questions against loaded regions and areas

use std::io::Write;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use tilegrid::{Area, RegionMap, Tile, walkable_neighbours};
use tilegrid::region::get_cost;

/// What to ask of an area
#[derive(Debug, Clone)]
pub enum AreaQuery {
    Contains(Tile),
    Bounds,
    Center,
    Random { seed: Option<u64> },
}

pub fn describe_tile<W: Write>(out: &mut W, region: &RegionMap, plane: i32, at: Tile) -> anyhow::Result<()> {
    writeln!(
        out,
        "tile ({}, {}) plane {}: block={} solid={} free={} state={:?}",
        at.x,
        at.y,
        plane,
        region.get_block(plane, at.x, at.y)?,
        region.solid(plane, at.x, at.y)?,
        region.free(plane, at.x, at.y)?,
        region.tile_state(plane, at.x, at.y)?,
    )?;
    Ok(())
}

pub fn describe_walk<W: Write>(
    out: &mut W,
    region: &RegionMap,
    plane: i32,
    from: Tile,
    to: Tile,
) -> anyhow::Result<()> {
    let walkable = region.is_walkable(plane, from.x, from.y, to.x, to.y)?;
    debug!("walk {} -> {} on plane {}: {}", from, to, plane, walkable);

    if walkable {
        writeln!(
            out,
            "walk ({}, {}) -> ({}, {}) plane {}: walkable cost={:.1}",
            from.x,
            from.y,
            to.x,
            to.y,
            plane,
            get_cost(from.x, from.y, to.x, to.y)
        )?;
    } else {
        writeln!(
            out,
            "walk ({}, {}) -> ({}, {}) plane {}: blocked",
            from.x, from.y, to.x, to.y, plane
        )?;
    }
    Ok(())
}

pub fn describe_neighbours<W: Write>(out: &mut W, region: &RegionMap, plane: i32, at: Tile) -> anyhow::Result<()> {
    let steps = walkable_neighbours(region, plane, at.x, at.y)?;
    writeln!(out, "tile ({}, {}) plane {}: {} walkable neighbours", at.x, at.y, plane, steps.len())?;
    for step in steps {
        writeln!(out, "  ({}, {}) cost={:.1}", step.x, step.y, step.cost)?;
    }
    Ok(())
}

pub fn describe_area<W: Write>(out: &mut W, area: &Area, query: &AreaQuery) -> anyhow::Result<()> {
    match query {
        AreaQuery::Contains(tile) => {
            writeln!(out, "contains {}: {}", tile, area.contains_tile(tile))?;
        }
        AreaQuery::Bounds => match area.bounds() {
            Some(b) => writeln!(out, "bounds x={} y={} width={} height={}", b.x, b.y, b.width, b.height)?,
            None => writeln!(out, "bounds: area has no vertices")?,
        },
        AreaQuery::Center => match area.center() {
            Some(center) => writeln!(out, "center {}", center)?,
            None => writeln!(out, "center: area has no vertices")?,
        },
        AreaQuery::Random { seed } => {
            let tile = match seed {
                Some(seed) => area.random_with(&mut StdRng::seed_from_u64(*seed)),
                None => area.random(),
            };
            match tile {
                Some(tile) => writeln!(out, "random {}", tile)?,
                None => writeln!(out, "random: no tile found")?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilegrid::region::flags::WALL_EAST;

    fn output<F: FnOnce(&mut Vec<u8>) -> anyhow::Result<()>>(f: F) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn walled_region() -> RegionMap {
        let mut masks = vec![vec![0; 104]; 104];
        masks[10][10] = WALL_EAST;
        RegionMap::new(0, &masks).unwrap()
    }

    #[test]
    fn test_describe_tile() {
        let region = walled_region();
        let text = output(|out| describe_tile(out, &region, 0, Tile::new(10, 10, 0)));
        assert_eq!(text, "tile (10, 10) plane 0: block=8 solid=false free=false state=Partial\n");
    }

    #[test]
    fn test_describe_walk() {
        let region = walled_region();
        let text = output(|out| describe_walk(out, &region, 0, Tile::new(10, 10, 0), Tile::new(11, 10, 0)));
        assert_eq!(text, "walk (10, 10) -> (11, 10) plane 0: blocked\n");

        let text = output(|out| describe_walk(out, &region, 0, Tile::new(10, 10, 0), Tile::new(9, 9, 0)));
        assert_eq!(text, "walk (10, 10) -> (9, 9) plane 0: walkable cost=1.4\n");
    }

    #[test]
    fn test_describe_walk_out_of_range() {
        let region = walled_region();
        let mut out = Vec::new();
        assert!(describe_walk(&mut out, &region, 0, Tile::new(103, 0, 0), Tile::new(104, 0, 0)).is_err());
    }

    #[test]
    fn test_describe_neighbours() {
        let region = walled_region();
        let text = output(|out| describe_neighbours(out, &region, 0, Tile::new(0, 0, 0)));
        assert_eq!(
            text,
            "tile (0, 0) plane 0: 3 walkable neighbours\n  (0, 1) cost=1.0\n  (1, 0) cost=1.0\n  (1, 1) cost=1.4\n"
        );
    }

    #[test]
    fn test_describe_area() {
        let area = Area::rectangle(Tile::new(0, 0, 0), Tile::new(10, 10, 0));

        let text = output(|out| describe_area(out, &area, &AreaQuery::Contains(Tile::new(5, 5, 0))));
        assert_eq!(text, "contains (5, 5, 0): true\n");

        let text = output(|out| describe_area(out, &area, &AreaQuery::Bounds));
        assert_eq!(text, "bounds x=0 y=0 width=10 height=10\n");

        let text = output(|out| describe_area(out, &area, &AreaQuery::Center));
        assert_eq!(text, "center (5, 5, 0)\n");

        let text = output(|out| describe_area(out, &area, &AreaQuery::Random { seed: Some(3) }));
        assert!(text.starts_with("random ("));

        let empty = Area::new();
        let text = output(|out| describe_area(out, &empty, &AreaQuery::Random { seed: None }));
        assert_eq!(text, "random: no tile found\n");
    }
}
