use crate::geometry::Position;
use crate::style::Direction;
use crate::tree::{BoxId, Tree};

/// Counters produced by one solver run, for metrics and diagnostics.
#[derive(Debug, Default, Clone, Copy)]
pub struct SolveReport {
    /// Boxes visited (the whole tree).
    pub boxes: usize,
    /// Iterations of the grow-distribution loop summed over all parents.
    pub grow_rounds: u64,
}

/// Solve the tree in place: distribute leftover space into `Grow` boxes,
/// then assign absolute positions.
///
/// The tree must be fully built (`TreeBuilder::finish` enforces the
/// matching open/close protocol). After this returns, every box's `size`
/// and `position` are final and the tree may be read concurrently.
///
/// # Panics
/// Panics if the tree is empty; that is a caller defect, not a runtime
/// condition.
pub fn solve(tree: &mut Tree) -> SolveReport {
    assert!(!tree.is_empty(), "layout requested for an empty tree");

    let mut report = SolveReport {
        boxes: tree.len(),
        grow_rounds: 0,
    };

    let root = tree.root();
    grow_children(tree, root, &mut report);

    tree.node_mut(root).position = Position::default();
    place_children(tree, root);

    report
}

/// Pass A: hand this box's leftover primary-axis space to its `Grow`
/// children round by round, match cross-axis `Grow` children to the
/// available extent, then recurse.
fn grow_children(tree: &mut Tree, id: BoxId, report: &mut SolveReport) {
    let children = tree.node(id).children.clone();
    if children.is_empty() {
        return;
    }

    let parent = tree.node(id);
    let direction = parent.style.direction;
    let gap_total = parent
        .style
        .gap
        .saturating_mul(children.len().saturating_sub(1) as u16);
    let (axis_extent, axis_padding, cross_extent, cross_padding) = match direction {
        Direction::Row => (
            parent.size.width,
            parent.style.padding.horizontal(),
            parent.size.height,
            parent.style.padding.vertical(),
        ),
        Direction::Column => (
            parent.size.height,
            parent.style.padding.vertical(),
            parent.size.width,
            parent.style.padding.horizontal(),
        ),
    };

    let mut occupied: u16 = 0;
    let mut growable: Vec<BoxId> = Vec::new();
    for child in &children {
        occupied = occupied.saturating_add(on_axis(tree, *child, direction));
        if axis_sizing_grows(tree, *child, direction) {
            growable.push(*child);
        }
    }
    let mut remaining = axis_extent
        .saturating_sub(axis_padding)
        .saturating_sub(gap_total)
        .saturating_sub(occupied);

    // Raise the smallest growable children first so siblings converge to
    // equal size before any round lifts them together. Each round strictly
    // decreases `remaining`, so the loop terminates.
    while remaining > 0 && !growable.is_empty() {
        report.grow_rounds += 1;

        let mut smallest = u16::MAX;
        let mut second_smallest = u16::MAX;
        for child in &growable {
            let size = on_axis(tree, *child, direction);
            if size < smallest {
                second_smallest = smallest;
                smallest = size;
            } else if size > smallest {
                second_smallest = second_smallest.min(size);
            }
        }

        let headroom = second_smallest.saturating_sub(smallest);
        let fair_share = remaining / growable.len() as u16;
        let add = headroom.min(fair_share);

        if add == 0 {
            // Indivisible remainder: one cell each to the children at the
            // minimum until the space runs out.
            for child in &growable {
                if remaining == 0 {
                    break;
                }
                if on_axis(tree, *child, direction) == smallest {
                    bump_axis(tree, *child, direction, 1);
                    remaining -= 1;
                }
            }
            continue;
        }

        for child in &growable {
            if on_axis(tree, *child, direction) == smallest {
                bump_axis(tree, *child, direction, add);
                remaining -= add;
            }
        }
    }

    // Cross axis is a single assignment: one extent to match, no sharing.
    let cross_avail = cross_extent.saturating_sub(cross_padding);
    for child in &children {
        if cross_sizing_grows(tree, *child, direction) {
            let node = tree.node_mut(*child);
            match direction {
                Direction::Row => node.size.height = cross_avail,
                Direction::Column => node.size.width = cross_avail,
            }
        }
    }

    for child in children {
        grow_children(tree, child, report);
    }
}

/// Pass B: stack children along the parent's primary axis from the padded
/// origin, then recurse with each child's position fixed.
fn place_children(tree: &mut Tree, id: BoxId) {
    let parent = tree.node(id);
    let children = parent.children.clone();
    let origin = parent.position;
    let padding = parent.style.padding;
    let gap = parent.style.gap;
    let direction = parent.style.direction;

    let mut offset = match direction {
        Direction::Row => origin.x.saturating_add(padding.left),
        Direction::Column => origin.y.saturating_add(padding.top),
    };

    for child in children {
        let advance = on_axis(tree, child, direction);
        let node = tree.node_mut(child);
        node.position = match direction {
            Direction::Row => Position::new(offset, origin.y.saturating_add(padding.top)),
            Direction::Column => Position::new(origin.x.saturating_add(padding.left), offset),
        };
        offset = offset.saturating_add(advance).saturating_add(gap);

        place_children(tree, child);
    }
}

fn on_axis(tree: &Tree, id: BoxId, axis: Direction) -> u16 {
    let size = tree.node(id).size;
    match axis {
        Direction::Row => size.width,
        Direction::Column => size.height,
    }
}

fn bump_axis(tree: &mut Tree, id: BoxId, axis: Direction, amount: u16) {
    let node = tree.node_mut(id);
    match axis {
        Direction::Row => node.size.width = node.size.width.saturating_add(amount),
        Direction::Column => node.size.height = node.size.height.saturating_add(amount),
    }
}

fn axis_sizing_grows(tree: &Tree, id: BoxId, axis: Direction) -> bool {
    let style = &tree.node(id).style;
    match axis {
        Direction::Row => style.width.is_grow(),
        Direction::Column => style.height.is_grow(),
    }
}

fn cross_sizing_grows(tree: &Tree, id: BoxId, axis: Direction) -> bool {
    let style = &tree.node(id).style;
    match axis {
        Direction::Row => style.height.is_grow(),
        Direction::Column => style.width.is_grow(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::style::{BoxStyle, Padding, Sizing};
    use crate::tree::TreeBuilder;

    fn leaf(width: u16, height: u16) -> BoxStyle {
        BoxStyle::new().with_fixed(width, height)
    }

    #[test]
    fn grow_fills_fixed_parent_exactly() {
        let mut builder = TreeBuilder::new();
        builder.open(
            BoxStyle::row()
                .with_fixed(60, 10)
                .with_gap(2)
                .with_padding(Padding::uniform(1)),
        );
        for _ in 0..3 {
            builder.open(BoxStyle::new().with_width(Sizing::Grow).with_height(Sizing::Grow));
            builder.close().unwrap();
        }
        builder.close().unwrap();

        let mut tree = builder.finish();
        solve(&mut tree);

        let root = tree.root();
        let widths: Vec<u16> = tree
            .node(root)
            .children
            .iter()
            .map(|id| tree.node(*id).size.width)
            .collect();
        // 60 - 2 padding - 4 gaps = 54 distributable over three children.
        assert_eq!(widths.iter().sum::<u16>(), 54);
        assert_eq!(widths, vec![18, 18, 18]);
        for id in &tree.node(root).children.clone() {
            assert_eq!(tree.node(*id).size.height, 8);
        }
    }

    #[test]
    fn grow_tops_up_unequal_children_before_splitting() {
        let mut builder = TreeBuilder::new();
        builder.open(BoxStyle::row().with_fixed(30, 5));
        builder.open(BoxStyle::new().with_width(Sizing::Grow).with_height(Sizing::Fixed(5)));
        builder.open(leaf(4, 1));
        builder.close().unwrap();
        builder.close().unwrap();
        builder.open(BoxStyle::new().with_width(Sizing::Grow).with_height(Sizing::Fixed(5)));
        builder.open(leaf(10, 1));
        builder.close().unwrap();
        builder.close().unwrap();
        builder.close().unwrap();

        let mut tree = builder.finish();
        solve(&mut tree);

        let root = tree.root();
        let children = tree.node(root).children.clone();
        // 30 cells over fit sizes 4 and 10: the smaller child catches up
        // first, then both split the rest evenly.
        assert_eq!(tree.node(children[0]).size.width, 15);
        assert_eq!(tree.node(children[1]).size.width, 15);
    }

    #[test]
    fn indivisible_remainder_spreads_without_panic() {
        let mut builder = TreeBuilder::new();
        builder.open(BoxStyle::row().with_fixed(11, 3));
        for _ in 0..3 {
            builder.open(BoxStyle::new().with_width(Sizing::Grow).with_height(Sizing::Fixed(3)));
            builder.close().unwrap();
        }
        builder.close().unwrap();

        let mut tree = builder.finish();
        solve(&mut tree);

        let root = tree.root();
        let widths: Vec<u16> = tree
            .node(root)
            .children
            .iter()
            .map(|id| tree.node(*id).size.width)
            .collect();
        assert_eq!(widths.iter().sum::<u16>(), 11);
        assert_eq!(widths.iter().max().unwrap() - widths.iter().min().unwrap(), 1);
    }

    #[test]
    fn leftover_space_without_growables_stays_unused() {
        let mut builder = TreeBuilder::new();
        builder.open(BoxStyle::row().with_fixed(50, 5));
        builder.open(leaf(10, 5));
        builder.close().unwrap();
        builder.close().unwrap();

        let mut tree = builder.finish();
        let report = solve(&mut tree);

        let root = tree.root();
        let child = tree.node(root).children[0];
        assert_eq!(tree.node(child).size.width, 10);
        assert_eq!(report.grow_rounds, 0);
    }

    #[test]
    fn padding_beyond_fixed_size_clamps_to_zero() {
        let mut builder = TreeBuilder::new();
        builder.open(
            BoxStyle::row()
                .with_fixed(4, 2)
                .with_padding(Padding::uniform(10)),
        );
        builder.open(BoxStyle::new().with_width(Sizing::Grow).with_height(Sizing::Grow));
        builder.close().unwrap();
        builder.close().unwrap();

        let mut tree = builder.finish();
        solve(&mut tree);

        let root = tree.root();
        let child = tree.node(root).children[0];
        assert_eq!(tree.node(child).size, Size::new(0, 0));
    }

    #[test]
    fn nested_grow_chains_resolve_top_down() {
        let mut builder = TreeBuilder::new();
        builder.open(BoxStyle::column().with_fixed(20, 20));
        builder.open(BoxStyle::row().with_width(Sizing::Grow).with_height(Sizing::Grow));
        builder.open(BoxStyle::new().with_width(Sizing::Grow).with_height(Sizing::Grow));
        builder.close().unwrap();
        builder.close().unwrap();
        builder.close().unwrap();

        let mut tree = builder.finish();
        solve(&mut tree);

        let root = tree.root();
        let middle = tree.node(root).children[0];
        let inner = tree.node(middle).children[0];
        assert_eq!(tree.node(middle).size, Size::new(20, 20));
        assert_eq!(tree.node(inner).size, Size::new(20, 20));
    }

    #[test]
    fn positions_stack_along_primary_axis() {
        let mut builder = TreeBuilder::new();
        builder.open(
            BoxStyle::column()
                .with_fixed(10, 12)
                .with_gap(1)
                .with_padding(Padding::new(2, 0, 1, 0)),
        );
        builder.open(leaf(5, 3));
        builder.close().unwrap();
        builder.open(leaf(5, 3));
        builder.close().unwrap();
        builder.close().unwrap();

        let mut tree = builder.finish();
        solve(&mut tree);

        let root = tree.root();
        let children = tree.node(root).children.clone();
        assert_eq!(tree.node(children[0]).position, Position::new(2, 1));
        assert_eq!(tree.node(children[1]).position, Position::new(2, 5));
    }

    #[test]
    fn children_stay_inside_their_parent() {
        let mut builder = TreeBuilder::new();
        builder.open(
            BoxStyle::row()
                .with_fixed(40, 16)
                .with_gap(1)
                .with_padding(Padding::uniform(2)),
        );
        builder.open(BoxStyle::new().with_width(Sizing::Grow).with_height(Sizing::Grow));
        builder.close().unwrap();
        builder.open(BoxStyle::column().with_width(Sizing::Grow).with_height(Sizing::Grow));
        builder.open(leaf(3, 3));
        builder.close().unwrap();
        builder.close().unwrap();
        builder.close().unwrap();

        let mut tree = builder.finish();
        solve(&mut tree);

        for id in tree.post_order().collect::<Vec<_>>() {
            let node = tree.node(id);
            if let Some(parent) = node.parent {
                let parent_rect = tree.node(parent).rect();
                assert!(
                    parent_rect.contains(&node.rect()),
                    "{:?} escapes {:?}",
                    node.rect(),
                    parent_rect
                );
            }
        }
    }

    #[test]
    fn editor_shell_splits_rows_around_fixed_status_line() {
        // Root 80x24 column: grow pane, one-row status line, grow pane.
        let mut builder = TreeBuilder::new();
        builder.open(BoxStyle::column().with_fixed(80, 24));
        builder.open(BoxStyle::new().with_width(Sizing::Fixed(80)).with_height(Sizing::Grow));
        builder.close().unwrap();
        builder.open(BoxStyle::new().with_width(Sizing::Fixed(80)).with_height(Sizing::Fixed(1)));
        builder.close().unwrap();
        builder.open(BoxStyle::new().with_width(Sizing::Fixed(80)).with_height(Sizing::Grow));
        builder.close().unwrap();
        builder.close().unwrap();

        let mut tree = builder.finish();
        solve(&mut tree);

        let root = tree.root();
        let children = tree.node(root).children.clone();
        let heights: Vec<u16> = children.iter().map(|id| tree.node(*id).size.height).collect();
        assert_eq!(heights.iter().sum::<u16>(), 24);
        assert_eq!(heights[1], 1);
        // (24 - 1) cells split across the two grow panes.
        assert_eq!(heights[0] + heights[2], 23);
        assert!(heights[0].abs_diff(heights[2]) <= 1);

        assert_eq!(tree.node(root).position, Position::new(0, 0));
        assert_eq!(tree.node(children[0]).position, Position::new(0, 0));
        assert_eq!(tree.node(children[1]).position.y, heights[0]);
        assert_eq!(tree.node(children[2]).position.y, heights[0] + 1);
    }

    #[test]
    #[should_panic(expected = "no boxes")]
    fn layout_before_building_anything_is_fatal() {
        let mut tree = TreeBuilder::new().finish();
        solve(&mut tree);
    }
}
