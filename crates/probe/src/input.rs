// input.rs - region and area loaders
//
// Region dumps come in two shapes:
// - JSON: { "planes": [ { "plane": 0, "masks": [[...], ...] } ] }
// - .clip binary: repeated [u8 plane][104 * 104 i32 masks, x-major], little-endian
// Area definitions are JSON: { "tiles": [ { "x": 1, "y": 2, "z": 0 }, ... ] }

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use anyhow::{Context, bail};
use byteorder::{LittleEndian, ReadBytesExt};
use serde::Deserialize;
use tracing::{debug, info};

use tilegrid::{Area, REGION_SIZE, RegionMap, Tile};

/// Extension selecting the binary region reader
pub const CLIP_EXTENSION: &str = "clip";

#[derive(Debug, Deserialize)]
struct RegionDump {
    planes: Vec<PlaneDump>,
}

#[derive(Debug, Deserialize)]
struct PlaneDump {
    plane: i32,
    masks: Vec<Vec<i32>>,
}

#[derive(Debug, Deserialize)]
struct AreaDump {
    tiles: Vec<TileDump>,
}

#[derive(Debug, Deserialize)]
struct TileDump {
    x: i32,
    y: i32,
    #[serde(default)]
    z: i32,
}

impl From<TileDump> for Tile {
    fn from(dump: TileDump) -> Self {
        Tile::new(dump.x, dump.y, dump.z)
    }
}

/// Load a region from a `.clip` or JSON dump, chosen by extension
pub fn load_region(path: &Path) -> anyhow::Result<RegionMap> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open region file {}", path.display()))?;
    let reader = BufReader::new(file);

    let is_clip = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CLIP_EXTENSION));

    let region = if is_clip {
        read_region_clip(reader)
    } else {
        read_region_json(reader)
    }
    .with_context(|| format!("Invalid region file {}", path.display()))?;

    info!("Loaded region {:?} from {}", region, path.display());
    Ok(region)
}

pub fn read_region_json<R: Read>(reader: R) -> anyhow::Result<RegionMap> {
    let dump: RegionDump = serde_json::from_reader(reader)?;
    if dump.planes.is_empty() {
        bail!("region dump has no planes");
    }

    let mut region = RegionMap::empty();
    for plane in &dump.planes {
        region = region.with_plane(plane.plane, &plane.masks)?;
    }
    Ok(region)
}

pub fn read_region_clip<R: Read>(mut reader: R) -> anyhow::Result<RegionMap> {
    let size = REGION_SIZE as usize;
    let mut region = RegionMap::empty();
    let mut planes = 0;

    loop {
        let plane = match reader.read_u8() {
            Ok(plane) => plane,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        };

        let mut masks = vec![vec![0i32; size]; size];
        for column in masks.iter_mut() {
            reader
                .read_i32_into::<LittleEndian>(column)
                .with_context(|| format!("Truncated masks for plane {}", plane))?;
        }

        debug!("Read clipping plane {}", plane);
        region = region.with_plane(i32::from(plane), &masks)?;
        planes += 1;
    }

    if planes == 0 {
        bail!("region dump has no planes");
    }
    Ok(region)
}

/// Load an area outline; two tiles describe a rectangle
pub fn load_area(path: &Path) -> anyhow::Result<Area> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open area file {}", path.display()))?;
    let area = read_area_json(BufReader::new(file))
        .with_context(|| format!("Invalid area file {}", path.display()))?;

    info!("Loaded area with {} vertices from {}", area.len(), path.display());
    Ok(area)
}

pub fn read_area_json<R: Read>(reader: R) -> anyhow::Result<Area> {
    let dump: AreaDump = serde_json::from_reader(reader)?;
    let tiles: Vec<Tile> = dump.tiles.into_iter().map(Tile::from).collect();
    Ok(Area::from_tiles(&tiles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use tilegrid::region::flags::{BLOCKED, DIRECTION_NORTH};

    fn clip_plane(out: &mut Vec<u8>, plane: u8, entries: &[(usize, usize, i32)]) {
        let size = REGION_SIZE as usize;
        let mut masks = vec![vec![0i32; size]; size];
        for &(x, y, mask) in entries {
            masks[x][y] = mask;
        }
        out.write_u8(plane).unwrap();
        for column in &masks {
            for &mask in column {
                out.write_i32::<LittleEndian>(mask).unwrap();
            }
        }
    }

    #[test]
    fn test_read_region_json() {
        let json = r#"{ "planes": [
            { "plane": 0, "masks": [[0, 256], [2]] },
            { "plane": 2, "masks": [[0, 0, 32]] }
        ] }"#;

        let region = read_region_json(json.as_bytes()).unwrap();
        assert!(region.free(0, 0, 0).unwrap());
        assert!(region.solid(0, 0, 1).unwrap());
        assert!(region.blocked(0, 1, 0, DIRECTION_NORTH).unwrap());
        assert_eq!(region.get_block(2, 0, 2).unwrap(), 32);
        assert!(region.free(1, 0, 1).unwrap());
    }

    #[test]
    fn test_read_region_json_rejects_bad_plane() {
        let json = r#"{ "planes": [ { "plane": 5, "masks": [] } ] }"#;
        assert!(read_region_json(json.as_bytes()).is_err());
        assert!(read_region_json(r#"{ "planes": [] }"#.as_bytes()).is_err());
    }

    #[test]
    fn test_read_region_clip() {
        let mut data = Vec::new();
        clip_plane(&mut data, 0, &[(3, 4, BLOCKED)]);
        clip_plane(&mut data, 1, &[(103, 103, DIRECTION_NORTH)]);

        let region = read_region_clip(data.as_slice()).unwrap();
        assert!(region.solid(0, 3, 4).unwrap());
        assert!(region.free(1, 3, 4).unwrap());
        assert_eq!(region.get_block(1, 103, 103).unwrap(), DIRECTION_NORTH);
    }

    #[test]
    fn test_read_region_clip_truncated() {
        let mut data = Vec::new();
        clip_plane(&mut data, 0, &[]);
        data.truncate(data.len() - 3);
        assert!(read_region_clip(data.as_slice()).is_err());
        assert!(read_region_clip(std::io::empty()).is_err());
    }

    #[test]
    fn test_read_area_json() {
        let json = r#"{ "tiles": [ { "x": 0, "y": 0 }, { "x": 10, "y": 10, "z": 1 } ] }"#;
        let area = read_area_json(json.as_bytes()).unwrap();
        assert_eq!(area.len(), 4);
        assert_eq!((area.min_plane(), area.max_plane()), (0, 1));
        assert!(area.contains(5, 5, 1));
    }
}
