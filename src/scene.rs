//! Render proxies
//!
//! The game pushes visual placements into a [`RenderService`] and never reads
//! them back. [`SceneGraph`] keeps the latest placement of every proxy for the
//! renderer to draw.

use glam::{Quat, Vec3};

use crate::tuning::GoalBounds;

/// Handle to a spawned render proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProxyId(pub usize);

/// What a proxy looks like
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProxyDesc {
    Ball { radius: f32 },
    Goal { bounds: GoalBounds },
    Goalkeeper { height: f32 },
    Ground { size: f32 },
}

/// Where a proxy is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPose {
    pub position: Vec3,
    pub orientation: Quat,
    /// Draw mirrored along X (keeper facing the other way)
    pub mirror_x: bool,
}

impl Default for RenderPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            mirror_x: false,
        }
    }
}

impl RenderPose {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// One-way sink for visual placements
pub trait RenderService {
    fn spawn(&mut self, desc: ProxyDesc) -> ProxyId;
    fn place(&mut self, id: ProxyId, pose: RenderPose);
}

/// A proxy and its latest placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneNode {
    pub desc: ProxyDesc,
    pub pose: RenderPose,
}

/// In-memory scene the renderer draws from
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn get(&self, id: ProxyId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    /// First node matching a predicate on its description
    pub fn find(&self, pred: impl Fn(&ProxyDesc) -> bool) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| pred(&n.desc))
    }
}

impl RenderService for SceneGraph {
    fn spawn(&mut self, desc: ProxyDesc) -> ProxyId {
        self.nodes.push(SceneNode {
            desc,
            pose: RenderPose::default(),
        });
        ProxyId(self.nodes.len() - 1)
    }

    fn place(&mut self, id: ProxyId, pose: RenderPose) {
        match self.nodes.get_mut(id.0) {
            Some(node) => node.pose = pose,
            None => log::warn!("Placing unknown proxy {:?}", id),
        }
    }
}
