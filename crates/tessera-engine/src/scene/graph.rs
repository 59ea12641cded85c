use super::SceneNode;

/// Handle to a node appended to a [`SceneGraph`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

/// Retained list of scene nodes in painter order.
///
/// Performance characteristics:
/// - `append()` is O(1)
/// - `remove()` is O(n)
/// - `clear()` keeps allocated capacity for the next frame
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<(NodeId, SceneNode)>,
    next_id: u64,
}

impl SceneGraph {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `node` on top of everything already in the graph.
    #[inline]
    pub fn append(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.nodes.push((id, node));
        id
    }

    /// Removes the node with `id`, keeping the order of the others.
    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        let index = self.nodes.iter().position(|(node_id, _)| *node_id == id)?;
        Some(self.nodes.remove(index).1)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|(node_id, _)| *node_id == id).map(|(_, node)| node)
    }

    /// Iterates nodes back to front.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().map(|(_, node)| node)
    }

    #[inline]
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|(id, _)| *id)
    }
}
