//! The two phases of building a tree.
//!
//! 1. [`growth_phase`] — expands the root into a full binary tree of
//!    growth nodes, spending one unit of energy per generation.
//! 2. [`mesh_phase`] — walks the finished tree and emits one box per node
//!    into a single [`Mesh`].

use glam::Vec3;
use rand::Rng;

use crate::{
    config::GrowthConfig,
    error::Result,
    math::{UP, random_vector},
    mesh::Mesh,
    tree::{NodeKind, ROOT, Tree},
    types::NodeId,
};

/// Expands the root of `tree` until every path runs out of energy.
///
/// For each node with energy `e`:
///
/// 1. `child_energy = e - 1`. If `child_energy <= 1` the node stays a leaf.
/// 2. The reference direction is the displacement actually realized from
///    the parent (`origin - parent.origin`), or [`UP`] for the root.
/// 3. A trunk child continues along the reference direction with
///    `child_energy`.
/// 4. A branch child grows along `reference × r`, where `r` is drawn by
///    [`random_vector`], with `child_energy * branch_energy_ratio`.
/// 5. The branch subtree is expanded completely before the trunk.
///
/// Energy drops by at least one unit per generation, so depth is bounded
/// by `ceil(max_energy)`. A work stack replaces native recursion; ids and
/// random draws come out in the same order as a depth-first recursion.
///
/// ### Parameters
/// - `tree` - Tree holding only its root; children are appended.
/// - `cfg` - Growth parameters, validated by the caller.
/// - `rng` - Source of the branch perturbations.
///
/// ### Returns
/// The number of nodes created.
///
/// ### Errors
/// [`crate::Error::ZeroLengthVector`] if a branch perturbation comes out
/// parallel to its reference direction.
pub fn growth_phase(tree: &mut Tree, cfg: &GrowthConfig, rng: &mut impl Rng) -> Result<usize> {
    let before = tree.nodes.len();
    let mut pending: Vec<(NodeId, f32)> = vec![(ROOT, tree.root().energy)];

    while let Some((id, energy)) = pending.pop() {
        let child_energy = energy - 1.0;
        if child_energy <= 1.0 {
            continue;
        }

        let node = tree.node(id);
        let reference = match node.parent {
            Some(parent) => node.origin - tree.node(parent).origin,
            None => UP,
        };

        let trunk = tree.add_child(cfg, id, NodeKind::Trunk, reference, child_energy)?;

        let branch_dir = reference.cross(random_vector(rng));
        let branch_energy = child_energy * cfg.branch_energy_ratio;
        let branch = tree.add_child(cfg, id, NodeKind::Branch, branch_dir, branch_energy)?;

        // Popped in reverse: the branch subtree finishes before the trunk.
        pending.push((trunk, child_energy));
        pending.push((branch, branch_energy));
    }

    let grown = tree.nodes.len() - before;
    log::debug!("growth phase created {grown} nodes");
    Ok(grown)
}

/// Converts every node of `tree` into a box, in pre-order.
///
/// Each box is centered halfway along the node (`origin + direction *
/// length / 2`) and sized `(width, length, width)`. Boxes stay
/// axis-aligned; the direction is handed to [`Mesh::add_cube`] as the
/// nominal up vector only.
///
/// Nodes with less than one unit of energy have a negative length. The
/// absolute size is used so such boxes still wind outward.
///
/// ### Errors
/// [`crate::Error::VertexIndexOverflow`] if the boxes outgrow 32-bit vertex
/// indices.
pub fn mesh_phase(tree: &Tree) -> Result<Mesh> {
    let mut mesh = Mesh::new();

    for (_, node) in tree.preorder() {
        let centre = node.origin + node.direction * (node.length / 2.0);
        let scale = Vec3::new(node.width, node.length, node.width).abs();
        mesh.add_cube(centre, node.direction, scale)?;
    }

    log::debug!(
        "mesh phase emitted {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, is_unit};
    use rand::{SeedableRng, rngs::StdRng};

    fn grow(cfg: &GrowthConfig, seed: u64) -> Tree {
        let mut tree = Tree::new(cfg);
        let mut rng = StdRng::seed_from_u64(seed);
        growth_phase(&mut tree, cfg, &mut rng).unwrap();
        tree
    }

    #[test]
    fn root_children_split_energy_into_trunk_and_branch() {
        let cfg = GrowthConfig::default();
        let tree = grow(&cfg, 1);

        let root = tree.root();
        assert_eq!(root.energy, 10.0);
        assert_eq!(root.children.len(), 2);

        let trunk = tree.node(root.children[0]);
        let branch = tree.node(root.children[1]);
        assert_eq!(trunk.kind, NodeKind::Trunk);
        assert_eq!(branch.kind, NodeKind::Branch);
        assert_eq!(trunk.energy, 9.0);
        assert_eq!(branch.energy, 4.5);

        // The first trunk continues straight up from the root.
        assert_eq!(trunk.direction, UP);
        assert!(approx_eq(trunk.origin.y, 9.0f32.log10()));
        // The branch is perpendicular to it.
        assert!(approx_eq(branch.direction.dot(UP), 0.0));
    }

    #[test]
    fn every_internal_node_has_trunk_then_branch() {
        let cfg = GrowthConfig::default();
        let tree = grow(&cfg, 2);

        for node in &tree.nodes {
            match node.children.as_slice() {
                [] => assert!(node.energy - 1.0 <= 1.0),
                [t, b] => {
                    assert!(node.energy - 1.0 > 1.0);
                    assert_eq!(tree.node(*t).kind, NodeKind::Trunk);
                    assert_eq!(tree.node(*b).kind, NodeKind::Branch);
                }
                other => panic!("unexpected child count {}", other.len()),
            }
        }
    }

    #[test]
    fn energy_and_direction_invariants_hold() {
        let cfg = GrowthConfig::default();
        let tree = grow(&cfg, 3);

        for (id, node) in tree.preorder() {
            let Some(parent) = node.parent else {
                assert_eq!(id, ROOT);
                continue;
            };
            let parent = tree.node(parent);
            assert!(is_unit(node.direction));

            let base = parent.energy - 1.0;
            match node.kind {
                NodeKind::Trunk => assert!(node.energy <= parent.energy - 1.0),
                NodeKind::Branch => assert_eq!(node.energy, base * cfg.branch_energy_ratio),
                NodeKind::Root => panic!("root below the root"),
            }

            let expected_length = node.energy.log10() * cfg.base_length;
            assert!(approx_eq(node.length, expected_length));
            assert!(approx_eq(node.width, node.length * cfg.width_height_ratio));
            let expected_origin = parent.origin + node.direction * node.length;
            assert!(node.origin.abs_diff_eq(expected_origin, 1e-4));
        }
    }

    #[test]
    fn depth_is_bounded_by_max_energy() {
        let cfg = GrowthConfig::default();
        let tree = grow(&cfg, 4);
        let max_depth = (0..tree.nodes.len()).map(|id| tree.depth(id)).max().unwrap();
        assert!(max_depth <= cfg.max_depth());
        // Trunk chain: 10, 9, ..., 2 is eight generations below the root.
        assert_eq!(max_depth, 8);
    }

    #[test]
    fn branch_subtree_is_grown_before_trunk() {
        let cfg = GrowthConfig::default();
        let tree = grow(&cfg, 5);
        let root = tree.root();
        let (trunk, branch) = (root.children[0], root.children[1]);

        // Ids are handed out in creation order: the root's branch subtree
        // is populated before the trunk gets any children.
        let first_trunk_child = tree.node(trunk).children[0];
        let last_branch_descendant = tree
            .preorder()
            .filter(|(id, _)| {
                let mut cur = Some(*id);
                while let Some(c) = cur {
                    if c == branch {
                        return true;
                    }
                    cur = tree.node(c).parent;
                }
                false
            })
            .map(|(id, _)| id)
            .max()
            .unwrap();
        assert!(last_branch_descendant < first_trunk_child);
    }

    #[test]
    fn node_count_grows_with_max_energy() {
        let mut last = 0;
        for max_energy in [1.0, 2.5, 4.0, 6.0, 8.0, 10.0] {
            let cfg = GrowthConfig {
                max_energy,
                ..GrowthConfig::default()
            };
            let count = grow(&cfg, 6).node_count();
            assert!(count >= last, "{max_energy}: {count} < {last}");
            last = count;
        }
    }

    #[test]
    fn low_energy_roots_stay_leaves() {
        for max_energy in [0.5, 1.0, 2.0] {
            let cfg = GrowthConfig {
                max_energy,
                ..GrowthConfig::default()
            };
            let mut tree = Tree::new(&cfg);
            let mut rng = StdRng::seed_from_u64(0);
            assert_eq!(growth_phase(&mut tree, &cfg, &mut rng).unwrap(), 0);
            assert_eq!(tree.node_count(), 1);
        }
    }

    #[test]
    fn same_seed_grows_same_shape() {
        let cfg = GrowthConfig::default();
        let a = grow(&cfg, 42);
        let b = grow(&cfg, 42);
        assert_eq!(a.nodes.len(), b.nodes.len());
        for (x, y) in a.nodes.iter().zip(&b.nodes) {
            assert_eq!(x.origin, y.origin);
            assert_eq!(x.children, y.children);
        }
    }

    #[test]
    fn mesh_phase_emits_one_box_per_node() {
        let cfg = GrowthConfig::default();
        let tree = grow(&cfg, 7);
        let mesh = mesh_phase(&tree).unwrap();

        let n = tree.node_count();
        assert_eq!(mesh.vertex_count(), 8 * n);
        assert_eq!(mesh.triangle_count(), 12 * n);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn mesh_boxes_follow_node_placement() {
        let cfg = GrowthConfig::default();
        let tree = grow(&cfg, 8);
        let mesh = mesh_phase(&tree).unwrap();

        for (box_index, (_, node)) in tree.preorder().enumerate() {
            let corners = &mesh.vertices()[box_index * 8..box_index * 8 + 8];
            let centre = corners.iter().copied().sum::<Vec3>() / 8.0;
            let expected = node.origin + node.direction * (node.length / 2.0);
            assert!(centre.abs_diff_eq(expected, 1e-4));

            let min = corners.iter().copied().reduce(Vec3::min).unwrap();
            let max = corners.iter().copied().reduce(Vec3::max).unwrap();
            let size = max - min;
            assert!(approx_eq(size.x, node.width.abs()));
            assert!(approx_eq(size.y, node.length.abs()));
            assert!(approx_eq(size.z, node.width.abs()));
        }
    }

    #[test]
    fn mesh_faces_wind_outward_even_for_short_branches() {
        let cfg = GrowthConfig::default();
        let tree = grow(&cfg, 9);
        assert!(tree.nodes.iter().any(|n| n.length < 0.0));
        let mesh = mesh_phase(&tree).unwrap();

        for (box_index, tris) in mesh.surfaces().chunks(12).enumerate() {
            let corners = &mesh.vertices()[box_index * 8..box_index * 8 + 8];
            let centre = corners.iter().copied().sum::<Vec3>() / 8.0;
            for tri in tris {
                let [a, b, c] = tri.0.map(|i| mesh.vertices()[i as usize]);
                let normal = (b - a).cross(c - a);
                if normal.length_squared() < 1e-12 {
                    continue;
                }
                assert!(normal.dot((a + b + c) / 3.0 - centre) > 0.0);
            }
        }
    }
}
