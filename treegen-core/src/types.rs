use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier for a node in a [`crate::tree::Tree`].
///
/// This is an index into `Tree::nodes`, and is only meaningful within
/// the lifetime of a given `Tree` instance.
pub type NodeId = usize;

/// Process-wide serial number carried by every growth node.
///
/// Unlike [`NodeId`], serials are never reused: they come from a single
/// counter shared by every tree generated in the process, so two nodes of
/// different trees never share a serial.
pub type NodeSerial = u64;

static NEXT_SERIAL: AtomicU64 = AtomicU64::new(1);

/// Hands out the next [`NodeSerial`].
pub(crate) fn next_serial() -> NodeSerial {
    NEXT_SERIAL.fetch_add(1, Ordering::Relaxed)
}

/// Index of one vertex inside a [`crate::mesh::Mesh`].
pub type VertexIndex = u32;
