use crate::error::{LayoutError, Result};
use crate::geometry::{Position, Rect, Size};
use crate::style::{BoxStyle, Direction, Sizing};

/// Arena index of a box inside its [`Tree`]. Only meaningful for the tree
/// that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxId(usize);

impl BoxId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// One styled box in the tree.
///
/// `size` and `position` hold meaningful values only after the solver has
/// run; until then they carry the fit accumulators and zeroes.
#[derive(Debug, Clone)]
pub struct BoxNode {
    pub style: BoxStyle,
    pub size: Size,
    pub position: Position,
    pub parent: Option<BoxId>,
    pub children: Vec<BoxId>,
}

impl BoxNode {
    fn new(style: BoxStyle, parent: Option<BoxId>) -> Self {
        // Fixed dimensions are final from the start; Fit and Grow begin at
        // zero and accumulate as descendants close.
        let size = Size::new(
            match style.width {
                Sizing::Fixed(width) => width,
                _ => 0,
            },
            match style.height {
                Sizing::Fixed(height) => height,
                _ => 0,
            },
        );
        Self {
            style,
            size,
            position: Position::default(),
            parent,
            children: Vec::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }

    pub fn name(&self) -> Option<&str> {
        self.style.name.as_deref()
    }
}

/// Exclusive owner of every box reachable from one root.
///
/// Boxes live in a single arena and reference each other by [`BoxId`];
/// dropping the tree drops them all at once.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<BoxNode>,
    post_order: Vec<BoxId>,
}

impl Tree {
    pub fn node(&self, id: BoxId) -> &BoxNode {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: BoxId) -> &mut BoxNode {
        &mut self.nodes[id.index()]
    }

    /// The root box: the last box closed during construction.
    pub fn root(&self) -> BoxId {
        *self
            .post_order
            .last()
            .expect("tree invariant: at least one closed box")
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Boxes in close order (children before parents, root last).
    pub fn post_order(&self) -> impl Iterator<Item = BoxId> + '_ {
        self.post_order.iter().copied()
    }

    /// Look up a box by the name given in its style. Declaration order
    /// wins when names collide.
    pub fn find(&self, name: &str) -> Option<BoxId> {
        self.nodes
            .iter()
            .position(|node| node.name() == Some(name))
            .map(BoxId)
    }

    pub fn rect_of(&self, name: &str) -> Result<Rect> {
        self.find(name)
            .map(|id| self.node(id).rect())
            .ok_or_else(|| LayoutError::BoxNotFound(name.to_string()))
    }
}

/// Stack-based builder producing a [`Tree`].
///
/// Every `open` pushes a new box under the currently open one; every
/// `close` pops back to its parent and folds the closed box's final size
/// into the parent's fit accumulators. Once the last `close` has matched
/// the first `open`, `finish` hands the tree over for solving.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<BoxNode>,
    post_order: Vec<BoxId>,
    open: Option<BoxId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new box under the currently open one (or as the root) and
    /// make it the open box.
    pub fn open(&mut self, style: BoxStyle) -> BoxId {
        let id = BoxId(self.nodes.len());
        self.nodes.push(BoxNode::new(style, self.open));
        self.open = Some(id);
        id
    }

    /// Finalize the currently open box and return the cursor to its
    /// parent, accumulating fit sizes bottom-up.
    pub fn close(&mut self) -> Result<BoxId> {
        let id = self.open.ok_or(LayoutError::NoOpenBox)?;
        self.post_order.push(id);

        let node = &mut self.nodes[id.index()];
        self.open = node.parent;

        // Own padding, plus inter-child gaps on the primary axis, land on
        // every non-Fixed dimension.
        let gap_total = node
            .style
            .gap
            .saturating_mul(node.children.len().saturating_sub(1) as u16);
        if !node.style.width.is_fixed() {
            node.size.width = node.size.width.saturating_add(node.style.padding.horizontal());
            if node.style.direction == Direction::Row {
                node.size.width = node.size.width.saturating_add(gap_total);
            }
        }
        if !node.style.height.is_fixed() {
            node.size.height = node.size.height.saturating_add(node.style.padding.vertical());
            if node.style.direction == Direction::Column {
                node.size.height = node.size.height.saturating_add(gap_total);
            }
        }

        let closed_size = node.size;
        if let Some(parent_id) = node.parent {
            let parent = &mut self.nodes[parent_id.index()];
            parent.children.push(id);

            // Sum on the parent's primary axis, running max on the cross
            // axis, skipping any Fixed dimension.
            match parent.style.direction {
                Direction::Row => {
                    if !parent.style.width.is_fixed() {
                        parent.size.width = parent.size.width.saturating_add(closed_size.width);
                    }
                    if !parent.style.height.is_fixed() {
                        parent.size.height = parent.size.height.max(closed_size.height);
                    }
                }
                Direction::Column => {
                    if !parent.style.height.is_fixed() {
                        parent.size.height = parent.size.height.saturating_add(closed_size.height);
                    }
                    if !parent.style.width.is_fixed() {
                        parent.size.width = parent.size.width.max(closed_size.width);
                    }
                }
            }
        }

        Ok(id)
    }

    /// The most recently closed box; once the whole tree is built this is
    /// the root. `None` while nothing has closed yet.
    pub fn root(&self) -> Option<BoxId> {
        self.post_order.last().copied()
    }

    /// Whether a box is still waiting for its matching `close`.
    pub fn has_open_box(&self) -> bool {
        self.open.is_some()
    }

    /// Hand the completed tree over for solving.
    ///
    /// # Panics
    /// Panics if a box is still open or nothing was ever built; both are
    /// builder-protocol violations on the caller's side.
    pub fn finish(self) -> Tree {
        assert!(
            self.open.is_none(),
            "tree finished while a box is still open"
        );
        assert!(!self.nodes.is_empty(), "tree finished with no boxes");
        Tree {
            nodes: self.nodes,
            post_order: self.post_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Padding;

    #[test]
    fn close_without_open_is_an_error() {
        let mut builder = TreeBuilder::new();
        assert!(matches!(builder.close(), Err(LayoutError::NoOpenBox)));
    }

    #[test]
    fn fixed_dimensions_prefill_size() {
        let mut builder = TreeBuilder::new();
        let id = builder.open(BoxStyle::row().with_fixed(40, 12));
        builder.close().unwrap();
        let tree = builder.finish();
        assert_eq!(tree.node(id).size, Size::new(40, 12));
    }

    #[test]
    fn fit_width_sums_children_and_gaps() {
        let mut builder = TreeBuilder::new();
        builder.open(
            BoxStyle::row()
                .with_gap(2)
                .with_padding(Padding::new(1, 3, 0, 0)),
        );
        for _ in 0..3 {
            builder.open(BoxStyle::new().with_fixed(10, 4));
            builder.close().unwrap();
        }
        builder.close().unwrap();

        let tree = builder.finish();
        let root = tree.node(tree.root());
        // 3 * 10 content + 2 * 2 gaps + 1 + 3 padding
        assert_eq!(root.size.width, 38);
        // Cross axis: max child height plus no vertical padding.
        assert_eq!(root.size.height, 4);
    }

    #[test]
    fn fit_cross_axis_takes_running_max() {
        let mut builder = TreeBuilder::new();
        builder.open(BoxStyle::column().with_padding(Padding::new(0, 0, 1, 1)));
        builder.open(BoxStyle::new().with_fixed(7, 2));
        builder.close().unwrap();
        builder.open(BoxStyle::new().with_fixed(19, 3));
        builder.close().unwrap();
        builder.close().unwrap();

        let tree = builder.finish();
        let root = tree.node(tree.root());
        assert_eq!(root.size.width, 19);
        assert_eq!(root.size.height, 2 + 3 + 2);
    }

    #[test]
    fn fixed_parent_ignores_child_accumulation() {
        let mut builder = TreeBuilder::new();
        builder.open(BoxStyle::column().with_fixed(80, 24));
        builder.open(BoxStyle::new().with_fixed(100, 50));
        builder.close().unwrap();
        builder.close().unwrap();

        let tree = builder.finish();
        assert_eq!(tree.node(tree.root()).size, Size::new(80, 24));
    }

    #[test]
    fn gap_only_applies_on_primary_axis() {
        let mut builder = TreeBuilder::new();
        builder.open(BoxStyle::column().with_gap(5));
        builder.open(BoxStyle::new().with_fixed(10, 1));
        builder.close().unwrap();
        builder.open(BoxStyle::new().with_fixed(10, 1));
        builder.close().unwrap();
        builder.close().unwrap();

        let tree = builder.finish();
        let root = tree.node(tree.root());
        assert_eq!(root.size.height, 1 + 5 + 1);
        assert_eq!(root.size.width, 10);
    }

    #[test]
    fn post_order_ends_with_root() {
        let mut builder = TreeBuilder::new();
        let root = builder.open(BoxStyle::column());
        let child = builder.open(BoxStyle::new());
        builder.close().unwrap();
        builder.close().unwrap();

        let tree = builder.finish();
        let order: Vec<_> = tree.post_order().collect();
        assert_eq!(order, vec![child, root]);
        assert_eq!(tree.root(), root);
    }

    #[test]
    fn find_resolves_named_boxes() {
        let mut builder = TreeBuilder::new();
        builder.open(BoxStyle::column().with_name("root"));
        let status = builder.open(BoxStyle::new().with_name("status"));
        builder.close().unwrap();
        builder.close().unwrap();

        let tree = builder.finish();
        assert_eq!(tree.find("status"), Some(status));
        assert!(tree.find("missing").is_none());
        assert!(matches!(
            tree.rect_of("missing"),
            Err(LayoutError::BoxNotFound(_))
        ));
    }

    #[test]
    #[should_panic(expected = "still open")]
    fn finish_with_open_box_panics() {
        let mut builder = TreeBuilder::new();
        builder.open(BoxStyle::new());
        builder.finish();
    }

    #[test]
    #[should_panic(expected = "no boxes")]
    fn finish_empty_panics() {
        TreeBuilder::new().finish();
    }
}
