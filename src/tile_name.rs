use std::{
    fmt,
    path::{self, Path},
    sync::Arc,
};

use serde::{Deserialize, Serialize};

/// Identifies one source image within a tileset.
///
/// This is really just a cleaned-up version of the path the image was
/// loaded from, but by making it an explicit type with known conversions
/// it can be carried from discovery all the way to metadata emission
/// without caring which in-memory image it originally belonged to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileName(Arc<str>);

impl TileName {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let displayed = format!("{}", path.as_ref().display());

        // In order to make names behave cross-platform, fix the path
        // separator to always be / on platforms where it isn't the main
        // separator.
        let displayed = if path::MAIN_SEPARATOR == '/' {
            displayed
        } else {
            displayed.replace(path::MAIN_SEPARATOR, "/")
        };

        TileName(displayed.into())
    }
}

impl AsRef<str> for TileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileName {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn keeps_relative_paths() {
        let name = TileName::from_path("tiles/grass.png");

        assert_eq!(name.as_ref(), "tiles/grass.png");
    }

    #[test]
    fn displays_as_the_cleaned_path() {
        let name = TileName::from_path("player.png");

        assert_eq!(format!("{}", name), "player.png");
    }
}
