//! Arena-backed quad-tree over a power-of-two square mass grid.
//!
//! Nodes are stored in a flat `Vec` and refer to their children by
//! [`NodeIndex`]. Children are pushed before their parent, so the root is
//! always the last node. Regions without mass get no node at all.

use glam::DVec2;
use gravfield_core::{FieldError, Grid};

/// Position of a node in the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Raw arena position.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A square region of the grid summarized as a point mass.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    mass: f64,
    center_of_mass: DVec2,
    width: usize,
    children: [Option<NodeIndex>; 4],
}

impl Node {
    /// Total mass in the region.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Mass-weighted centroid in `(row, col)` grid coordinates.
    pub fn center_of_mass(&self) -> DVec2 {
        self.center_of_mass
    }

    /// Side length of the region in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// True for single-cell regions.
    pub fn is_leaf(&self) -> bool {
        self.width == 1
    }

    /// Quadrant slots: top-left, top-right, bottom-left, bottom-right.
    pub fn child_slots(&self) -> &[Option<NodeIndex>; 4] {
        &self.children
    }

    /// Existing children.
    pub fn children(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.children.iter().flatten().copied()
    }
}

/// Quad-tree of a square mass grid whose side is a power of two.
#[derive(Debug, Clone)]
pub struct QuadTree {
    nodes: Vec<Node>,
    root: Option<NodeIndex>,
    side: usize,
}

impl QuadTree {
    /// Builds the tree of a power-of-two square grid.
    ///
    /// Returns `FieldError::NotPowerOfTwoSquare` for any other shape.
    pub fn build(grid: &Grid) -> Result<Self, FieldError> {
        let (rows, cols) = grid.shape();
        if rows != cols || !rows.is_power_of_two() {
            return Err(FieldError::NotPowerOfTwoSquare { rows, cols });
        }
        let mut tree = Self {
            nodes: Vec::new(),
            root: None,
            side: rows,
        };
        tree.root = tree.build_region(grid, 0, 0, rows);
        log::trace!("quad-tree over {rows}x{rows}: {} nodes", tree.nodes.len());
        Ok(tree)
    }

    /// Zero-pads `grid` on the bottom and right to the next power-of-two
    /// square and builds its tree.
    pub fn from_mass(grid: &Grid) -> Result<Self, FieldError> {
        let side = padded_side(grid.rows(), grid.cols())?;
        if grid.shape() == (side, side) {
            return Self::build(grid);
        }
        Self::build(&grid.padded_square(side)?)
    }

    fn build_region(
        &mut self,
        grid: &Grid,
        row: usize,
        col: usize,
        width: usize,
    ) -> Option<NodeIndex> {
        if width == 1 {
            let mass = grid.get(row, col);
            if mass == 0.0 {
                return None;
            }
            return Some(self.push(Node {
                mass,
                center_of_mass: DVec2::new(row as f64, col as f64),
                width,
                children: [None; 4],
            }));
        }

        let half = width / 2;
        let children = [
            self.build_region(grid, row, col, half),
            self.build_region(grid, row, col + half, half),
            self.build_region(grid, row + half, col, half),
            self.build_region(grid, row + half, col + half, half),
        ];
        if children.iter().all(Option::is_none) {
            return None;
        }

        let (mass, moment) = children
            .iter()
            .flatten()
            .map(|&i| &self.nodes[i.0])
            .fold((0.0, DVec2::ZERO), |(m, s), n| {
                (m + n.mass, s + n.center_of_mass * n.mass)
            });
        Some(self.push(Node {
            mass,
            center_of_mass: moment / mass,
            width,
            children,
        }))
    }

    fn push(&mut self, node: Node) -> NodeIndex {
        self.nodes.push(node);
        NodeIndex(self.nodes.len() - 1)
    }

    /// Root node, or `None` if the grid holds no mass.
    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` came from a different tree and is out of range.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.0]
    }

    /// All nodes in construction order (children before parents).
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the grid held no mass.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Side of the (padded) square grid.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Total mass of the grid.
    pub fn total_mass(&self) -> f64 {
        self.root.map_or(0.0, |r| self.node(r).mass)
    }

    /// Centroid of all mass, or `None` for an empty tree.
    pub fn center_of_mass(&self) -> Option<DVec2> {
        self.root.map(|r| self.node(r).center_of_mass)
    }

    /// Approximate inverse-square pull on a point at `location` (grid
    /// coordinates), pointing toward the mass.
    ///
    /// A node is treated as a point mass when it is a single cell or when
    /// `width / distance < theta`; otherwise its children are visited. A
    /// point mass coincident with `location` contributes nothing.
    pub fn force_at(&self, location: DVec2, theta: f64) -> DVec2 {
        self.root
            .map_or(DVec2::ZERO, |root| self.accumulate(root, location, theta))
    }

    fn accumulate(&self, index: NodeIndex, location: DVec2, theta: f64) -> DVec2 {
        let node = self.node(index);
        let v = node.center_of_mass - location;
        let d = v.length();
        if node.is_leaf() || (d > 0.0 && node.width as f64 / d < theta) {
            if d == 0.0 {
                return DVec2::ZERO;
            }
            return v * (node.mass / (d * d * d));
        }
        node.children()
            .map(|child| self.accumulate(child, location, theta))
            .fold(DVec2::ZERO, |acc, f| acc + f)
    }
}

/// Smallest power of two that is at least `max(rows, cols)`.
pub fn padded_side(rows: usize, cols: usize) -> Result<usize, FieldError> {
    if rows == 0 || cols == 0 {
        return Err(FieldError::InvalidDimensions);
    }
    rows.max(cols)
        .checked_next_power_of_two()
        .ok_or(FieldError::InvalidDimensions)
}
