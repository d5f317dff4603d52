//! Growth nodes stored in an index arena.
//!
//! Every node lives in `Tree::nodes`; children are listed by [`NodeId`] and
//! the parent link is a plain index, so the tree owns its nodes strictly
//! top-down and never forms reference cycles.

use std::fmt::Write as _;

use glam::Vec3;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::config::GrowthConfig;
use crate::error::Result;
use crate::math::{UP, try_unit};
use crate::types::{NodeId, NodeSerial, next_serial};

/// Arena index of the root node.
pub const ROOT: NodeId = 0;

/// Role a node plays relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    /// Main continuation of the parent, carrying `energy - 1`.
    Trunk,
    /// Side shoot carrying `(energy - 1) * branch_energy_ratio`.
    Branch,
}

#[derive(Debug)]
pub struct GrowthNode {
    /// Process-wide serial, see [`NodeSerial`].
    pub serial: NodeSerial,
    pub kind: NodeKind,
    pub origin: Vec3,
    /// Unit growth direction.
    pub direction: Vec3,
    pub width: f32,
    pub length: f32,
    pub energy: f32,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

#[derive(Debug)]
pub struct Tree {
    pub nodes: Vec<GrowthNode>,
}

impl GrowthNode {
    /// Root node: full energy, growing up from the coordinate origin.
    pub fn new_root(cfg: &GrowthConfig) -> Self {
        Self {
            serial: next_serial(),
            kind: NodeKind::Root,
            origin: Vec3::ZERO,
            direction: UP,
            width: 0.0,
            length: 0.0,
            energy: cfg.max_energy,
            parent: None,
            children: Vec::with_capacity(2),
        }
    }

    /// Child of `parent`, pulled out `length` units along `direction`.
    ///
    /// `direction` need not be normalized. Length is
    /// `log10(energy) * base_length` and width is `length * width_height_ratio`.
    ///
    /// ### Errors
    /// [`crate::Error::ZeroLengthVector`] if `direction` is zero.
    pub fn new_child(
        cfg: &GrowthConfig,
        parent: &GrowthNode,
        parent_id: NodeId,
        kind: NodeKind,
        direction: Vec3,
        energy: f32,
    ) -> Result<Self> {
        let direction = try_unit(direction, "child growth direction")?;
        let length = energy.log10() * cfg.base_length;

        Ok(Self {
            serial: next_serial(),
            kind,
            origin: parent.origin + direction * length,
            direction,
            width: length * cfg.width_height_ratio,
            length,
            energy,
            parent: Some(parent_id),
            children: Vec::with_capacity(2),
        })
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl Tree {
    /// A tree holding only its root.
    pub fn new(cfg: &GrowthConfig) -> Self {
        Self {
            nodes: vec![GrowthNode::new_root(cfg)],
        }
    }

    pub fn root(&self) -> &GrowthNode {
        &self.nodes[ROOT]
    }

    pub fn node(&self, id: NodeId) -> &GrowthNode {
        &self.nodes[id]
    }

    /// Grows a new child under `parent` and appends it to the parent's
    /// child list.
    ///
    /// ### Returns
    /// The [`NodeId`] of the new node.
    pub fn add_child(
        &mut self,
        cfg: &GrowthConfig,
        parent: NodeId,
        kind: NodeKind,
        direction: Vec3,
        energy: f32,
    ) -> Result<NodeId> {
        let id = self.nodes.len();
        let node = GrowthNode::new_child(cfg, &self.nodes[parent], parent, kind, direction, energy)?;
        self.nodes.push(node);
        self.nodes[parent].children.push(id);
        Ok(id)
    }

    /// Number of nodes below `id`, at any depth.
    pub fn count_descendants(&self, id: NodeId) -> usize {
        let mut count = 0;
        let mut stack = self.nodes[id].children.clone();
        while let Some(child) = stack.pop() {
            count += 1;
            stack.extend_from_slice(&self.nodes[child].children);
        }
        count
    }

    /// Root plus all of its descendants.
    pub fn node_count(&self) -> usize {
        self.count_descendants(ROOT) + 1
    }

    /// Number of parent links between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cur = self.nodes[id].parent;
        while let Some(p) = cur {
            depth += 1;
            cur = self.nodes[p].parent;
        }
        depth
    }

    /// Pre-order walk: a node, then each child subtree in stored order.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![ROOT],
        }
    }

    /// Calls `f` on every node in pre-order.
    pub fn visit(&self, mut f: impl FnMut(NodeId, &GrowthNode)) {
        for (id, node) in self.preorder() {
            f(id, node);
        }
    }

    /// Serializable view of the subtree rooted at `id`.
    pub fn view(&self, id: NodeId) -> NodeView<'_> {
        NodeView { tree: self, id }
    }

    /// Indented human-readable dump of the whole tree.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.outline_node(ROOT, 0, &mut out);
        out
    }

    fn outline_node(&self, id: NodeId, indent: usize, out: &mut String) {
        let pad = " ".repeat(indent * 2);
        let n = &self.nodes[id];
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{pad}{{");
        let _ = writeln!(out, "{pad}  id: {}", n.serial);
        let _ = writeln!(
            out,
            "{pad}  origin: [{:.2}, {:.2}, {:.2}]",
            n.origin.x, n.origin.y, n.origin.z
        );
        let _ = writeln!(out, "{pad}  length: {:.6}", n.length);
        let _ = writeln!(out, "{pad}  energy: {:.6}", n.energy);
        let _ = writeln!(out, "{pad}  children: [");
        for &child in &n.children {
            self.outline_node(child, indent + 1, out);
        }
        let _ = writeln!(out, "{pad}  ]");
        let _ = writeln!(out, "{pad}}}");
    }
}

/// Iterator returned by [`Tree::preorder`].
pub struct Preorder<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (NodeId, &'a GrowthNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.nodes.get(id)?;
        // Reversed so the first stored child is popped first.
        self.stack.extend(node.children.iter().rev());
        Some((id, node))
    }
}

/// Borrowed subtree that serializes as
/// `{id, origin: [x, y, z], length, width, children: [...]}`.
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let node = &self.tree.nodes[self.id];
        let children: Vec<NodeView<'_>> = node
            .children
            .iter()
            .map(|&id| self.tree.view(id))
            .collect();

        let mut s = serializer.serialize_struct("GrowthNode", 5)?;
        s.serialize_field("id", &node.serial)?;
        s.serialize_field("origin", &node.origin.to_array())?;
        s.serialize_field("length", &node.length)?;
        s.serialize_field("width", &node.width)?;
        s.serialize_field("children", &children)?;
        s.end()
    }
}
