//! Bookkeeping for the free space of a container.
//!
//! The placement engine models unoccupied space as a list of rectangular
//! holes. Placing an item carves every hole it overlaps into smaller
//! fragments, and the regenerated list is then collapsed back into a
//! canonical, sorted form.

use crate::geometry::Rect;

/// Splits a hole around the footprint of a newly placed rectangle,
/// returning the free space left on each side.
///
/// The caller must have checked that `placed` overlaps `hole`. Side
/// fragments keep the hole's full height and the fragments above and
/// below keep its full width, so the results overlap each other; that is
/// fine, `collapse` runs on the combined list afterwards.
pub(crate) fn carve(hole: &Rect, placed: &Rect) -> Vec<Rect> {
    let mut fragments = Vec::new();

    // Free space above the placed rectangle.
    if hole.pos.1 < placed.pos.1 {
        fragments.push(Rect::new(hole.pos, (hole.size.0, placed.pos.1 - hole.pos.1)));
    }

    // Free space to the left.
    if hole.pos.0 < placed.pos.0 {
        fragments.push(Rect::new(hole.pos, (placed.pos.0 - hole.pos.0, hole.size.1)));
    }

    // Free space to the right.
    if hole.right() > placed.right() {
        fragments.push(Rect::new(
            (placed.right(), hole.pos.1),
            (hole.right() - placed.right(), hole.size.1),
        ));
    }

    // Free space below.
    if hole.bottom() > placed.bottom() {
        fragments.push(Rect::new(
            (hole.pos.0, placed.bottom()),
            (hole.size.0, hole.bottom() - placed.bottom()),
        ));
    }

    fragments
}

/// Prunes a candidate list of holes down to a canonical set.
///
/// Any hole that duplicates another, is contained in it, or lines up with
/// it flush along a full shared edge is replaced by the union of the
/// pair. Survivors come back sorted by ascending `y`, ties broken by
/// ascending `x`, which is the order the placement engine scans holes in.
pub(crate) fn collapse(candidates: Vec<Rect>) -> Vec<Rect> {
    // Dead entries become `None` so merging never shifts the indices of
    // candidates still under consideration.
    let mut slots: Vec<Option<Rect>> = candidates.into_iter().map(Some).collect();

    // The fragment lists the placement engine produces settle in a single
    // pass, but merging two holes can make a third absorbable, so keep
    // going until a pass changes nothing.
    loop {
        let mut merged = false;

        for i in 0..slots.len() {
            for j in (i + 1)..slots.len() {
                let (a, b) = match (slots[i], slots[j]) {
                    (Some(a), Some(b)) => (a, b),
                    _ => continue,
                };

                let union = a.union(&b);
                let intersection = a.intersection(&b);

                // Holes that cover no more area together than apart are
                // equal, nested, or flush along a shared edge.
                if union.area() <= a.area() + b.area() - intersection.area() {
                    slots[i] = Some(union);
                    slots[j] = None;
                    merged = true;
                }
            }
        }

        if !merged {
            break;
        }
    }

    let mut live: Vec<Rect> = slots.into_iter().flatten().collect();
    live.sort_by_key(|hole| (hole.pos.1, hole.pos.0));
    live
}

#[cfg(test)]
mod test {
    use super::*;

    fn rect(x: u32, y: u32, width: u32, height: u32) -> Rect {
        Rect::new((x, y), (width, height))
    }

    #[test]
    fn contained_hole_is_absorbed() {
        let holes = vec![rect(0, 0, 100, 100), rect(10, 10, 5, 5)];

        assert_eq!(collapse(holes), vec![rect(0, 0, 100, 100)]);
    }

    #[test]
    fn duplicates_collapse_to_one() {
        let holes = vec![rect(5, 5, 20, 20), rect(5, 5, 20, 20)];

        assert_eq!(collapse(holes), vec![rect(5, 5, 20, 20)]);
    }

    #[test]
    fn flush_edges_merge() {
        // Same rows, adjacent columns.
        let holes = vec![rect(0, 0, 40, 30), rect(40, 0, 60, 30)];

        assert_eq!(collapse(holes), vec![rect(0, 0, 100, 30)]);
    }

    #[test]
    fn partial_overlap_is_kept_apart() {
        let holes = vec![rect(0, 0, 50, 50), rect(25, 25, 50, 50)];

        assert_eq!(
            collapse(holes),
            vec![rect(0, 0, 50, 50), rect(25, 25, 50, 50)]
        );
    }

    #[test]
    fn disjoint_holes_are_kept_apart() {
        let holes = vec![rect(0, 0, 10, 10), rect(50, 50, 10, 10)];

        assert_eq!(
            collapse(holes),
            vec![rect(0, 0, 10, 10), rect(50, 50, 10, 10)]
        );
    }

    #[test]
    fn merging_continues_until_settled() {
        // The first and third merge into a run that can then absorb the
        // second, which needs a second pass.
        let holes = vec![
            rect(0, 0, 10, 10),
            rect(20, 0, 10, 10),
            rect(10, 0, 10, 10),
        ];

        assert_eq!(collapse(holes), vec![rect(0, 0, 30, 10)]);
    }

    #[test]
    fn output_is_sorted_by_row_then_column() {
        let holes = vec![
            rect(40, 80, 10, 10),
            rect(0, 80, 10, 10),
            rect(20, 10, 10, 10),
        ];

        assert_eq!(
            collapse(holes),
            vec![
                rect(20, 10, 10, 10),
                rect(0, 80, 10, 10),
                rect(40, 80, 10, 10),
            ]
        );
    }

    #[test]
    fn collapse_is_idempotent() {
        let holes = vec![
            rect(0, 0, 50, 50),
            rect(25, 25, 50, 50),
            rect(10, 10, 5, 5),
            rect(75, 0, 25, 25),
        ];

        let once = collapse(holes);
        let twice = collapse(once.clone());

        assert_eq!(once, twice);
    }

    #[test]
    fn carve_centered_leaves_four_sides() {
        let hole = rect(0, 0, 100, 100);
        let placed = rect(25, 25, 50, 50);

        assert_eq!(
            carve(&hole, &placed),
            vec![
                rect(0, 0, 100, 25),
                rect(0, 0, 25, 100),
                rect(75, 0, 25, 100),
                rect(0, 75, 100, 25),
            ]
        );
    }

    #[test]
    fn carve_corner_leaves_two_sides() {
        let hole = rect(0, 0, 100, 100);
        let placed = rect(0, 0, 40, 60);

        assert_eq!(
            carve(&hole, &placed),
            vec![rect(40, 0, 60, 100), rect(0, 60, 100, 40)]
        );
    }

    #[test]
    fn carve_exact_cover_leaves_nothing() {
        let hole = rect(10, 10, 30, 30);

        assert_eq!(carve(&hole, &hole), Vec::new());
    }

    #[test]
    fn carve_against_overhanging_footprint() {
        // A footprint placed in a neighboring hole juts into this one.
        let hole = rect(0, 50, 100, 50);
        let placed = rect(60, 30, 40, 40);

        assert_eq!(
            carve(&hole, &placed),
            vec![rect(0, 50, 60, 50), rect(0, 70, 100, 30)]
        );
    }
}
