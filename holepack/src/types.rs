use std::{
    num::NonZeroU64,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::geometry::Rect;

static LAST_ID: AtomicU64 = AtomicU64::new(1);

/// An opaque token tying a packed output back to the input it was created
/// from.
///
/// Ids are unique within the process. Consumers are expected to remember
/// which of their own objects each id was minted for and use that mapping
/// to reassociate results, instead of relying on input order or identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU64);

impl Id {
    pub(crate) fn new() -> Self {
        let id = LAST_ID.fetch_add(1, Ordering::SeqCst);
        Id(NonZeroU64::new(id).unwrap())
    }
}

/// An input to the packer: a 2D size plus a freshly minted [`Id`].
///
/// [`Id`]: struct.Id.html
#[derive(Debug, Clone, Copy)]
pub struct InputItem {
    pub(crate) id: Id,
    pub(crate) size: (u32, u32),
}

impl InputItem {
    #[inline]
    pub fn new(size: (u32, u32)) -> Self {
        Self {
            id: Id::new(),
            size,
        }
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    pub(crate) fn area(&self) -> i64 {
        i64::from(self.size.0) * i64::from(self.size.1)
    }
}

/// An item the packer assigned a position to.
///
/// `OutputItem`s correspond 1:1 to the `InputItem`s that went in and carry
/// the same ids.
#[derive(Debug, Clone, Copy)]
pub struct OutputItem {
    pub(crate) id: Id,
    pub(crate) rect: Rect,
}

impl OutputItem {
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// The top-left corner the item was placed at.
    #[inline]
    pub fn position(&self) -> (u32, u32) {
        self.rect.pos
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.rect.size
    }

    #[inline]
    pub fn min(&self) -> (u32, u32) {
        self.rect.pos
    }

    #[inline]
    pub fn max(&self) -> (u32, u32) {
        (self.rect.right(), self.rect.bottom())
    }
}

/// The result of a successful pack: the final container size plus one
/// placement per input.
#[derive(Debug, Clone)]
pub struct PackOutput {
    pub(crate) size: (u32, u32),
    pub(crate) items: Vec<OutputItem>,
}

impl PackOutput {
    /// The width of the packed container.
    #[inline]
    pub fn width(&self) -> u32 {
        self.size.0
    }

    /// The height of the packed container, flush with the bottom edge of
    /// the lowest item.
    #[inline]
    pub fn height(&self) -> u32 {
        self.size.1
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Placements, in the order their inputs were supplied.
    #[inline]
    pub fn items(&self) -> &[OutputItem] {
        &self.items
    }
}
