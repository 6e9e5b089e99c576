//! Holepack is a small library for packing rectangles into a single
//! container of minimal area. It was built for
//! [tilepack](https://github.com/saphum/tilepack), a tool that combines
//! separate image files into one tileset image.
//!
//! The packer keeps an explicit list of the rectangular "holes" of free
//! space left in the container and always places the next rectangle into
//! the first hole it fits in, scanning top to bottom and left to right.
//! An outer search tries every permissible container width and keeps the
//! one producing the smallest total area, breaking ties towards the
//! squarest result.
//!
//! ## Example
//! ```
//! use holepack::{HolePacker, InputItem};
//!
//! // First, transform the rectangles you want to pack into the Holepack
//! // InputItem type, remembering which id belongs to what.
//! let my_items = vec![
//!     InputItem::new((128, 64)),
//!     InputItem::new((64, 64)),
//!     InputItem::new((1, 300)),
//! ];
//!
//! // Construct a packer and configure it with your constraints.
//! let packer = HolePacker::new().max_width(512);
//!
//! // Compute a solution.
//! let output = packer.pack(my_items)?;
//!
//! for item in output.items() {
//!     println!("{:?} was placed at {:?}", item.id(), item.position());
//! }
//! # Ok::<(), holepack::PackError>(())
//! ```

mod geometry;
mod holes;
mod packer;
mod types;

pub use packer::*;
pub use types::*;
