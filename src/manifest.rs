use std::{
    collections::BTreeMap,
    io::{self, Write},
};

use serde::{Deserialize, Serialize};

use crate::tile_name::TileName;

/// Records where every source image ended up inside the combined
/// tileset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TilesetManifest {
    /// The image file the tiles were combined into.
    pub image: String,

    /// The final width of that image, in pixels.
    pub width: u32,

    /// The final height of that image, in pixels.
    pub height: u32,

    /// The extent of each source image within the combined one.
    pub tiles: BTreeMap<TileName, TileExtent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileExtent {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TilesetManifest {
    /// Serializes the manifest as pretty-printed JSON.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample() -> TilesetManifest {
        let mut tiles = BTreeMap::new();
        tiles.insert(
            TileName::from_path("player.png"),
            TileExtent {
                x: 0,
                y: 0,
                width: 16,
                height: 16,
            },
        );
        tiles.insert(
            TileName::from_path("enemy.png"),
            TileExtent {
                x: 16,
                y: 0,
                width: 8,
                height: 8,
            },
        );

        TilesetManifest {
            image: "tileset.png".to_owned(),
            width: 24,
            height: 16,
            tiles,
        }
    }

    #[test]
    fn writes_ordered_json() {
        let mut buffer = Vec::new();
        sample().write_to(&mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();

        assert!(text.ends_with('\n'));

        // The BTreeMap keeps tiles sorted by name in the output.
        let enemy = text.find("enemy.png").unwrap();
        let player = text.find("player.png").unwrap();
        assert!(enemy < player);
    }

    #[test]
    fn readable_back_by_other_tools() {
        let mut buffer = Vec::new();
        sample().write_to(&mut buffer).unwrap();

        let parsed: TilesetManifest = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(parsed.image, "tileset.png");
        assert_eq!(parsed.tiles, sample().tiles);
    }
}
