mod image;
mod manifest;
mod options;
mod session;
mod tile_name;
mod tileset;

use std::process;

use structopt::StructOpt;

use crate::options::Options;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::from_args();

    match session::pack(options) {
        Ok(_) => {}
        Err(err) => {
            eprintln!("Error: {:?}", err);
            process::exit(1);
        }
    }
}
