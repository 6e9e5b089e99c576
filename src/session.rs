use std::{
    collections::{BTreeMap, HashMap},
    ffi::OsStr,
    io::{self, BufReader, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use fs_err as fs;
use holepack::{HolePacker, Id, InputItem, PackOutput};
use walkdir::WalkDir;

use crate::{
    image::Image,
    manifest::{TileExtent, TilesetManifest},
    options::Options,
    tile_name::TileName,
    tileset,
};

/// Runs one full pack: discover the source images, load them, fit them
/// into a single tileset, then write the image and its metadata.
pub fn pack(options: Options) -> anyhow::Result<()> {
    if options.inputs.is_empty() {
        bail!("no source images were specified; pass --help to display usage");
    }

    let mut session = PackSession::new(options);

    session.discover_inputs()?;
    session.load_images()?;

    let (output, sources) = session.pack_images()?;

    session.write_tileset(&output, &sources)?;
    session.write_manifest(&output, &sources)?;

    Ok(())
}

/// Holds all of the state for a single run of tilepack.
struct PackSession {
    options: Options,

    /// Every image file named by the command line arguments, in a
    /// deterministic order.
    discovered: Vec<PathBuf>,

    /// The sources that actually decoded into usable images.
    tiles: Vec<SourceTile>,
}

struct SourceTile {
    name: TileName,
    image: Image,
}

impl PackSession {
    fn new(options: Options) -> Self {
        Self {
            options,
            discovered: Vec::new(),
            tiles: Vec::new(),
        }
    }

    /// Expands the command line inputs into a flat list of image files.
    ///
    /// Directories are searched recursively with their entries sorted,
    /// so the same invocation always yields the same file order.
    fn discover_inputs(&mut self) -> anyhow::Result<()> {
        for input in &self.options.inputs {
            let meta = fs::metadata(input)?;

            if meta.is_dir() {
                let walker =
                    WalkDir::new(input).sort_by(|a, b| a.file_name().cmp(b.file_name()));

                for entry in walker {
                    let entry = entry?;

                    if entry.file_type().is_file() && is_png(entry.path()) {
                        self.discovered.push(entry.path().to_owned());
                    }
                }
            } else {
                self.discovered.push(input.clone());
            }
        }

        if self.discovered.is_empty() {
            bail!("no image files were found in the given inputs");
        }

        Ok(())
    }

    /// Decodes every discovered file. Files that fail to decode are
    /// skipped with a warning so that one bad image doesn't spoil the
    /// whole batch.
    fn load_images(&mut self) -> anyhow::Result<()> {
        for path in &self.discovered {
            log::info!("Reading {}", path.display());

            let file = BufReader::new(fs::File::open(path)?);

            match Image::decode_png(file) {
                Ok(image) => self.tiles.push(SourceTile {
                    name: TileName::from_path(path),
                    image,
                }),
                Err(err) => log::warn!("Skipping {}: {}", path.display(), err),
            }
        }

        if self.tiles.is_empty() {
            bail!("none of the source images could be decoded");
        }

        Ok(())
    }

    /// Packs the decoded images into the smallest container no wider
    /// than the configured maximum, remembering which id the packer
    /// minted for which source.
    fn pack_images(&self) -> anyhow::Result<(PackOutput, HashMap<Id, usize>)> {
        let mut items = Vec::with_capacity(self.tiles.len());
        let mut sources = HashMap::with_capacity(self.tiles.len());

        for (index, tile) in self.tiles.iter().enumerate() {
            let item = InputItem::new(tile.image.size());
            sources.insert(item.id(), index);
            items.push(item);
        }

        log::info!(
            "Packing {} images into a tileset at most {} pixels wide",
            items.len(),
            self.options.max_width
        );

        let output = HolePacker::new()
            .max_width(self.options.max_width)
            .pack(items)
            .context("could not pack the source images")?;

        log::info!("Packed tileset is {}x{}", output.width(), output.height());

        Ok((output, sources))
    }

    /// Draws every source image at its packed position and writes the
    /// combined image out.
    fn write_tileset(
        &self,
        output: &PackOutput,
        sources: &HashMap<Id, usize>,
    ) -> anyhow::Result<()> {
        let placed = output.items().iter().map(|item| {
            let index = sources[&item.id()];
            (&self.tiles[index].image, item.position())
        });

        let sheet = tileset::composite(output.size(), placed);

        let file = BufWriter::new(fs::File::create(&self.options.output)?);
        sheet
            .encode_png(file)
            .with_context(|| format!("could not encode {}", self.options.output.display()))?;

        log::info!("Wrote {}", self.options.output.display());

        Ok(())
    }

    /// Emits the placement metadata, either to stdout or to the path
    /// given on the command line.
    fn write_manifest(
        &self,
        output: &PackOutput,
        sources: &HashMap<Id, usize>,
    ) -> anyhow::Result<()> {
        let mut tiles = BTreeMap::new();

        for item in output.items() {
            let name = self.tiles[sources[&item.id()]].name.clone();
            let (x, y) = item.position();
            let (width, height) = item.size();

            tiles.insert(
                name,
                TileExtent {
                    x,
                    y,
                    width,
                    height,
                },
            );
        }

        let manifest = TilesetManifest {
            image: self.options.output.display().to_string(),
            width: output.width(),
            height: output.height(),
            tiles,
        };

        match &self.options.manifest {
            Some(path) => {
                manifest
                    .write_to(BufWriter::new(fs::File::create(path)?))
                    .with_context(|| format!("could not write {}", path.display()))?;
            }
            None => {
                let stdout = io::stdout();
                manifest.write_to(stdout.lock())?;
            }
        }

        Ok(())
    }
}

fn is_png(path: &Path) -> bool {
    match path.extension().and_then(OsStr::to_str) {
        Some(extension) => extension.eq_ignore_ascii_case("png"),
        None => false,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn png_extension_is_case_insensitive() {
        assert!(is_png(Path::new("a.png")));
        assert!(is_png(Path::new("b.PNG")));
        assert!(!is_png(Path::new("notes.txt")));
        assert!(!is_png(Path::new("extensionless")));
    }
}
