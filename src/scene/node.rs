use std::borrow::Cow;

use crate::scene::NodeHandle;
use crate::scene::transform::Transform;

/// A scene node: hierarchy links, a transform and a visibility flag.
///
/// Meshes and cameras are attached through the component maps on
/// [`Scene`](crate::scene::Scene), keyed by the node handle.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: Cow<'static, str>,

    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub transform: Transform,

    /// Hides this node and its whole subtree when `false`.
    pub visible: bool,

    // `visible` combined with every ancestor, refreshed by
    // `Scene::update_matrix_world`.
    pub(crate) world_visible: bool,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
            world_visible: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Whether this node and all its ancestors are visible, as of the last
    /// world matrix update.
    #[inline]
    #[must_use]
    pub fn is_world_visible(&self) -> bool {
        self.world_visible
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("Node")
    }
}
