//! Scene graph.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Each node carries
//! a local translation and uniform scale, an optional tint that applies to
//! its whole subtree, and an optional mesh.

use glam::{Mat4, Quat, Vec3, Vec4};
use thiserror::Error;

use crate::assets::{Assets, MeshHandle};
use crate::camera::Camera;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("the root node cannot be reparented")]
    RootReparent,
    #[error("node {child:?} cannot be placed under its own descendant {parent:?}")]
    Cycle { child: NodeId, parent: NodeId },
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    position: Vec3,
    scale: f32,
    color: Option<Vec4>,
    mesh: Option<MeshHandle>,
}

impl Node {
    fn new(name: &str, parent: Option<NodeId>) -> Self {
        Self {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            position: Vec3::ZERO,
            scale: 1.0,
            color: None,
            mesh: None,
        }
    }

    fn local_transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), Quat::IDENTITY, self.position)
    }
}

/// A mesh instance ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderable {
    pub transform: Mat4,
    pub color: Vec4,
    pub mesh: MeshHandle,
}

#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("render", None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // the root always exists
        false
    }

    pub fn attach_new_node(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(name, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn attach_model(&mut self, parent: NodeId, name: &str, mesh: MeshHandle) -> NodeId {
        let id = self.attach_new_node(parent, name);
        self.nodes[id.0].mesh = Some(mesh);
        id
    }

    pub fn reparent(&mut self, node: NodeId, parent: NodeId) -> Result<(), SceneError> {
        let Some(old_parent) = self.nodes[node.0].parent else {
            return Err(SceneError::RootReparent);
        };
        if self.ancestors(parent).any(|a| a == node) {
            return Err(SceneError::Cycle { child: node, parent });
        }
        self.nodes[old_parent.0].children.retain(|&c| c != node);
        self.nodes[parent.0].children.push(node);
        self.nodes[node.0].parent = Some(parent);
        Ok(())
    }

    /// `node` itself followed by each of its ancestors up to the root.
    fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(node), move |id| self.nodes[id.0].parent)
    }

    pub fn name(&self, node: NodeId) -> &str {
        &self.nodes[node.0].name
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    pub fn pos(&self, node: NodeId) -> Vec3 {
        self.nodes[node.0].position
    }

    pub fn set_pos(&mut self, node: NodeId, position: Vec3) {
        self.nodes[node.0].position = position;
    }

    pub fn scale(&self, node: NodeId) -> f32 {
        self.nodes[node.0].scale
    }

    pub fn set_scale(&mut self, node: NodeId, scale: f32) {
        self.nodes[node.0].scale = scale;
    }

    pub fn color(&self, node: NodeId) -> Option<Vec4> {
        self.nodes[node.0].color
    }

    pub fn set_color(&mut self, node: NodeId, color: Vec4) {
        self.nodes[node.0].color = Some(color);
    }

    pub fn clear_color(&mut self, node: NodeId) {
        self.nodes[node.0].color = None;
    }

    pub fn mesh(&self, node: NodeId) -> Option<MeshHandle> {
        self.nodes[node.0].mesh
    }

    pub fn world_transform(&self, node: NodeId) -> Mat4 {
        self.ancestors(node)
            .fold(Mat4::IDENTITY, |acc, id| self.nodes[id.0].local_transform() * acc)
    }

    /// Position of `node` in world space.
    pub fn world_pos(&self, node: NodeId) -> Vec3 {
        self.world_transform(node).w_axis.truncate()
    }

    /// All mesh nodes reachable from the root, depth first.
    pub fn renderables(&self) -> Vec<Renderable> {
        let mut out = Vec::new();
        let mut stack = vec![(self.root(), Mat4::IDENTITY, Vec4::ONE)];
        while let Some((id, parent_transform, inherited)) = stack.pop() {
            let node = &self.nodes[id.0];
            let transform = parent_transform * node.local_transform();
            let color = node.color.unwrap_or(inherited);
            if let Some(mesh) = node.mesh {
                out.push(Renderable { transform, color, mesh });
            }
            for &child in node.children.iter().rev() {
                stack.push((child, transform, color));
            }
        }
        out
    }
}

/// Everything a game touches during a frame.
#[derive(Debug, Default)]
pub struct World {
    pub scene: SceneGraph,
    pub camera: Camera,
    pub assets: Assets,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root of the rendered scene.
    pub fn render(&self) -> NodeId {
        self.scene.root()
    }
}
