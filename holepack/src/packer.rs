use std::cmp::{Ordering, Reverse};

use rayon::prelude::*;
use thiserror::Error;

use crate::{
    geometry::Rect,
    holes,
    types::{Id, InputItem, OutputItem, PackOutput},
};

/// Height of the virtual container before anything is placed. Big enough
/// that no input runs out of room below, small enough that edge and area
/// arithmetic stays in range.
const OPEN_HEIGHT: u32 = u32::MAX >> 1;

/// Packs rectangles into a single container of bounded width, searching
/// for the width that yields the smallest total area.
///
/// The container's height is unbounded: it grows to fit, and the reported
/// height is exactly flush with the lowest placed item. Placement itself
/// is a greedy first-fit over explicitly tracked free-space holes, with
/// larger items placed first.
pub struct HolePacker {
    max_width: u32,
}

impl HolePacker {
    pub fn new() -> Self {
        Self { max_width: 1024 }
    }

    /// Sets the maximum width the packed container may have.
    pub fn max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width;
        self
    }

    /// Computes a placement for every item.
    ///
    /// On success the placements come back in the same order the items
    /// were supplied in. Packing an empty set of items succeeds with an
    /// empty, zero-sized output.
    pub fn pack<I>(&self, items: I) -> Result<PackOutput, PackError>
    where
        I: IntoIterator<Item = InputItem>,
    {
        let items: Vec<InputItem> = items.into_iter().collect();

        if self.max_width == 0 {
            return Err(PackError::MaxWidthZero);
        }

        for item in &items {
            if item.size.0 == 0 || item.size.1 == 0 {
                return Err(PackError::EmptyItem {
                    id: item.id,
                    width: item.size.0,
                    height: item.size.1,
                });
            }

            if item.size.0 > self.max_width {
                return Err(PackError::ItemTooWide {
                    id: item.id,
                    width: item.size.0,
                    max_width: self.max_width,
                });
            }
        }

        if items.is_empty() {
            return Ok(PackOutput {
                size: (0, 0),
                items: Vec::new(),
            });
        }

        log::trace!("Packing {} items", items.len());

        // Place big items first. The sort is stable, so items of equal
        // area keep their submission order.
        let mut order: Vec<usize> = (0..items.len()).collect();
        order.sort_by_key(|&index| Reverse(items[index].area()));

        // No container narrower than the widest single item can work.
        let min_width = items.iter().map(|item| item.size.0).max().unwrap_or(0);

        // Candidate widths are tried independently; the trials share
        // nothing, so rayon may spread them over as many threads as it
        // likes. `compare_candidates` is a total order, which keeps the
        // winner independent of evaluation order.
        let best = (min_width..=self.max_width)
            .into_par_iter()
            .filter_map(|width| {
                let fit = Self::arrange_for_width(&items, &order, width)?;
                Some((width, fit.area))
            })
            .min_by(|a, b| Self::compare_candidates(*a, *b));

        let (best_width, _) = match best {
            Some(best) => best,
            None => {
                return Err(PackError::NoFit {
                    max_width: self.max_width,
                })
            }
        };

        log::trace!("Settled on a container {} pixels wide", best_width);

        // Lay the items out once more at the winning width. Every trial
        // starts from a fresh hole set, so this reproduces the winning
        // trial exactly and yields the authoritative positions.
        let fit = match Self::arrange_for_width(&items, &order, best_width) {
            Some(fit) => fit,
            None => {
                return Err(PackError::NoFit {
                    max_width: self.max_width,
                })
            }
        };

        let height = (fit.area / i64::from(best_width)) as u32;
        let placed = items
            .iter()
            .zip(fit.placements)
            .map(|(item, rect)| OutputItem { id: item.id, rect })
            .collect();

        Ok(PackOutput {
            size: (best_width, height),
            items: placed,
        })
    }

    /// Tries to lay every item out in a container of the given width.
    ///
    /// Returns the consumed area and the footprint of each item, indexed
    /// by submission order, or `None` if some item found no hole to fit
    /// in at this width.
    fn arrange_for_width(items: &[InputItem], order: &[usize], width: u32) -> Option<WidthFit> {
        // The container starts as one giant hole; every placement carves
        // the holes it overlaps into smaller ones.
        let mut open = vec![Rect::new((0, 0), (width, OPEN_HEIGHT))];
        let mut placements = vec![Rect::new((0, 0), (0, 0)); items.len()];
        let mut max_height = 0;

        for &index in order {
            let item = &items[index];

            // First fit: the holes are sorted top row first, leftmost
            // within a row, so the scan lands as high and as far left as
            // the item can go.
            let slot = open
                .iter()
                .position(|hole| hole.size.0 >= item.size.0 && hole.size.1 >= item.size.1)?;
            let footprint = Rect::new(open[slot].pos, item.size);

            let mut next = Vec::with_capacity(open.len() + 3);
            for hole in &open {
                if hole.intersects(&footprint) {
                    next.extend(holes::carve(hole, &footprint));
                } else {
                    next.push(*hole);
                }
            }
            open = holes::collapse(next);

            placements[index] = footprint;
            max_height = max_height.max(footprint.bottom());
        }

        Some(WidthFit {
            area: i64::from(width) * i64::from(max_height),
            placements,
        })
    }

    /// Candidate-width comparator: the smaller area wins; areas that tie
    /// are separated by perimeter, then by height, preferring the wider
    /// and shorter of two otherwise equivalent containers. Distinct
    /// widths never compare equal, so the order is total.
    fn compare_candidates(a: (u32, i64), b: (u32, i64)) -> Ordering {
        let (a_width, a_area) = a;
        let (b_width, b_area) = b;

        let a_height = a_area / i64::from(a_width);
        let b_height = b_area / i64::from(b_width);

        a_area
            .cmp(&b_area)
            .then((i64::from(a_width) + a_height).cmp(&(i64::from(b_width) + b_height)))
            .then(a_height.cmp(&b_height))
    }
}

struct WidthFit {
    area: i64,
    placements: Vec<Rect>,
}

/// Ways packing can fail. All of them are input problems; once the inputs
/// validate, packing always produces a result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PackError {
    /// The requested maximum width leaves no room for anything.
    #[error("maximum container width must be at least 1 pixel")]
    MaxWidthZero,

    /// An item has no area.
    #[error("item {id:?} has size {width}x{height}; every item needs a positive width and height")]
    EmptyItem { id: Id, width: u32, height: u32 },

    /// An item is wider than the widest permissible container, so no
    /// arrangement can ever hold it.
    #[error(
        "item {id:?} is {width} pixels wide, which exceeds the maximum container width of {max_width}"
    )]
    ItemTooWide { id: Id, width: u32, max_width: u32 },

    /// No candidate width could hold every item.
    #[error("no container width up to {max_width} pixels could hold every item")]
    NoFit { max_width: u32 },
}
