// Tile - a single world tile on a plane

use std::fmt;
use std::str::FromStr;

use crate::error::TileParseError;

/// A world tile: x/y on the grid, z is the plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Tile {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Tile { x, y, z }
    }
}

/// Anything that sits on a single tile (scene objects, players, markers)
pub trait Locatable {
    fn location(&self) -> Tile;
}

impl Locatable for Tile {
    fn location(&self) -> Tile {
        *self
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Parses "x,y" (plane 0) or "x,y,z"
impl FromStr for Tile {
    type Err = TileParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parts = input.split(',').map(str::trim);

        let mut axis = |name: &'static str, required: bool| -> Result<Option<i32>, TileParseError> {
            match parts.next() {
                Some(value) => value.parse::<i32>().map(Some).map_err(|_| TileParseError::Invalid {
                    axis: name,
                    value: value.to_string(),
                }),
                None if required => Err(TileParseError::Missing(name)),
                None => Ok(None),
            }
        };

        let x = axis("X", true)?.unwrap_or_default();
        let y = axis("Y", true)?.unwrap_or_default();
        let z = axis("Z", false)?.unwrap_or_default();

        if parts.next().is_some() {
            return Err(TileParseError::TooMany(input.to_string()));
        }

        Ok(Tile { x, y, z })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_components() {
        assert_eq!("12,40".parse::<Tile>().unwrap(), Tile::new(12, 40, 0));
    }

    #[test]
    fn test_parse_three_components() {
        assert_eq!(" 3, 4 , 2".parse::<Tile>().unwrap(), Tile::new(3, 4, 2));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("7".parse::<Tile>(), Err(TileParseError::Missing("Y")));
        assert_eq!(
            "a,1".parse::<Tile>(),
            Err(TileParseError::Invalid { axis: "X", value: "a".to_string() })
        );
        assert!(matches!("1,2,3,4".parse::<Tile>(), Err(TileParseError::TooMany(_))));
    }

    #[test]
    fn test_display() {
        assert_eq!(Tile::new(1, -2, 3).to_string(), "(1, -2, 3)");
    }
}
