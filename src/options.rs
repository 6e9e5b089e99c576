use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(about = "A tool that combines separate image files into a single tileset")]
pub struct Options {
    /// Where to write the combined tileset image.
    #[structopt(long, short, default_value = "tileset.png")]
    pub output: PathBuf,

    /// The maximum width of the combined image, in pixels. Packing fails
    /// if any single source image is wider than this.
    #[structopt(long = "max-width", short = "w", default_value = "1024")]
    pub max_width: u32,

    /// Write placement metadata to this file instead of stdout.
    #[structopt(long)]
    pub manifest: Option<PathBuf>,

    /// The images to combine. Directories are searched recursively for
    /// PNG files.
    pub inputs: Vec<PathBuf>,
}
