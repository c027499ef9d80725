use glam::{Affine3A, Vec3};
use slotmap::{SecondaryMap, SlotMap};

use crate::resources::Mesh;
use crate::scene::background::{AmbientLight, Background};
use crate::scene::camera::Camera;
use crate::scene::node::Node;
use crate::scene::NodeHandle;

/// A retained-mode scene graph.
///
/// Nodes live in a slot map; meshes and cameras are components keyed by the
/// node that owns them.
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    pub meshes: SecondaryMap<NodeHandle, Mesh>,
    pub cameras: SecondaryMap<NodeHandle, Camera>,

    pub background: Background,
    pub ambient_light: Option<AmbientLight>,

    pub active_camera: Option<NodeHandle>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SecondaryMap::new(),
            cameras: SecondaryMap::new(),
            background: Background::default(),
            ambient_light: None,
            active_camera: None,
        }
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Adds a root node.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Adds a node under `parent`. Falls back to a root node when `parent`
    /// does not exist.
    pub fn add_to_parent(&mut self, mut node: Node, parent: NodeHandle) -> NodeHandle {
        if !self.nodes.contains_key(parent) {
            log::warn!("Parent node {parent:?} not found, adding '{}' as root", node.name);
            return self.add_node(node);
        }
        node.parent = Some(parent);
        let handle = self.nodes.insert(node);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
        }
        handle
    }

    /// Re-parents `child` under `parent`, keeping both sides in sync.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent || !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            return;
        }

        self.detach(child);
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        self.root_nodes.retain(|&h| h != child);
    }

    /// Makes `node` a root node.
    pub fn detach(&mut self, node: NodeHandle) {
        let Some(parent) = self.nodes.get(node).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|&h| h != node);
        }
        if let Some(n) = self.nodes.get_mut(node) {
            n.parent = None;
        }
        self.root_nodes.push(node);
    }

    /// Removes `node` and its whole subtree together with their components.
    pub fn remove_node(&mut self, node: NodeHandle) {
        if !self.nodes.contains_key(node) {
            return;
        }
        self.detach(node);
        self.root_nodes.retain(|&h| h != node);

        let mut stack = vec![node];
        while let Some(handle) = stack.pop() {
            if let Some(removed) = self.nodes.remove(handle) {
                stack.extend(removed.children);
            }
            self.meshes.remove(handle);
            self.cameras.remove(handle);
            if self.active_camera == Some(handle) {
                self.active_camera = None;
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    /// First node with the given name, depth first from the roots.
    #[must_use]
    pub fn find_node_by_name(&self, name: &str) -> Option<NodeHandle> {
        let mut stack: Vec<NodeHandle> = self.root_nodes.iter().rev().copied().collect();
        while let Some(handle) = stack.pop() {
            let node = self.nodes.get(handle)?;
            if node.name == name {
                return Some(handle);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    // ========================================================================
    // Components
    // ========================================================================

    /// Adds a root node carrying `mesh`.
    pub fn add_mesh(&mut self, name: &'static str, mesh: Mesh) -> NodeHandle {
        let handle = self.add_node(Node::new(name));
        self.meshes.insert(handle, mesh);
        handle
    }

    pub fn add_mesh_to_parent(&mut self, node: Node, mesh: Mesh, parent: NodeHandle) -> NodeHandle {
        let handle = self.add_to_parent(node, parent);
        self.meshes.insert(handle, mesh);
        handle
    }

    /// Adds a camera node at `position`; it becomes the active camera if
    /// there was none.
    pub fn add_camera(&mut self, camera: Camera, position: Vec3) -> NodeHandle {
        let mut node = Node::new("Camera");
        node.transform.position = position;
        let handle = self.add_node(node);
        self.cameras.insert(handle, camera);
        if self.active_camera.is_none() {
            self.active_camera = Some(handle);
        }
        handle
    }

    #[must_use]
    pub fn get_mesh(&self, handle: NodeHandle) -> Option<&Mesh> {
        self.meshes.get(handle)
    }

    /// Active camera together with its node's world matrix.
    #[must_use]
    pub fn active_camera(&self) -> Option<(&Camera, &Affine3A)> {
        let handle = self.active_camera?;
        let camera = self.cameras.get(handle)?;
        let node = self.nodes.get(handle)?;
        Some((camera, node.transform.world_matrix()))
    }

    /// Active camera and its node's transform, for controls.
    pub fn active_camera_bundle(&mut self) -> Option<(&mut crate::scene::Transform, &mut Camera)> {
        let handle = self.active_camera?;
        let camera = self.cameras.get_mut(handle)?;
        let node = self.nodes.get_mut(handle)?;
        Some((&mut node.transform, camera))
    }

    // ========================================================================
    // Per-frame update
    // ========================================================================

    /// Propagates local matrices and visibility from the roots down.
    pub fn update_matrix_world(&mut self) {
        let mut stack: Vec<(NodeHandle, Affine3A, bool)> = self
            .root_nodes
            .iter()
            .map(|&h| (h, Affine3A::IDENTITY, true))
            .collect();

        while let Some((handle, parent_world, parent_visible)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(handle) else {
                continue;
            };
            node.transform.update_local_matrix();
            let world = parent_world * *node.transform.local_matrix();
            node.transform.set_world_matrix(world);
            node.world_visible = parent_visible && node.visible;

            let visible = node.world_visible;
            stack.extend(node.children.iter().map(|&c| (c, world, visible)));
        }
    }

    /// Meshes whose node and ancestors are visible, with their world matrices.
    pub fn visible_meshes(&self) -> impl Iterator<Item = (NodeHandle, &Mesh, &Affine3A)> {
        self.meshes.iter().filter_map(|(handle, mesh)| {
            let node = self.nodes.get(handle)?;
            node.world_visible
                .then_some((handle, mesh, node.transform.world_matrix()))
        })
    }
}
