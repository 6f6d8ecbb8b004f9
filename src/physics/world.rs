//! Rapier-backed rigid-body world

use glam::{Quat, Vec3};
use rapier3d::prelude::*;

use super::{BodyDesc, BodyHandle, BodyKind, BodyPose, PhysicsService, Shape, Surface};
use crate::consts::*;

/// Half size of the slab standing in for an infinite plane
const PLANE_HALF_EXTENT: f32 = 500.0;
const PLANE_HALF_DEPTH: f32 = 1.0;

fn vector(v: Vec3) -> Vector {
    Vector::new(v.x, v.y, v.z)
}

/// Physics world
pub struct PhysicsWorld {
    gravity: Vector,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    /// Index = `BodyHandle.0`
    handles: Vec<RigidBodyHandle>,
    accumulator: f32,
    /// Internal steps run since creation
    steps: u64,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("bodies", &self.handles.len())
            .field("colliders", &self.collider_set.len())
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::with_gravity(GRAVITY)
    }

    pub fn with_gravity(gravity: Vec3) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: SIM_DT,
            ..Default::default()
        };

        Self {
            gravity: vector(gravity),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            handles: Vec::new(),
            accumulator: 0.0,
            steps: 0,
        }
    }

    pub fn body_count(&self) -> usize {
        self.handles.len()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        let body = self
            .handles
            .get(handle.0)
            .and_then(|h| self.rigid_body_set.get(*h));
        if body.is_none() {
            log::warn!("Unknown physics body {:?}", handle);
        }
        body
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        let body = self
            .handles
            .get(handle.0)
            .and_then(|h| self.rigid_body_set.get_mut(*h));
        if body.is_none() {
            log::warn!("Unknown physics body {:?}", handle);
        }
        body
    }

    /// One fixed internal step
    fn internal_step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
        self.steps += 1;
    }
}

/// Rapier collider for one of our shapes, mass split evenly over the body
fn build_collider(shape: Shape, offset: Vec3, surface: Surface, mass: Option<f32>) -> Collider {
    let builder = match shape {
        Shape::Sphere { radius } => ColliderBuilder::ball(radius).translation(vector(offset)),
        Shape::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
                .translation(vector(offset))
        }
        // Solid slab whose top face is the plane
        Shape::Plane => ColliderBuilder::cuboid(
            PLANE_HALF_EXTENT,
            PLANE_HALF_EXTENT,
            PLANE_HALF_DEPTH,
        )
        .translation(vector(offset - Vec3::Z * PLANE_HALF_DEPTH)),
    };

    // Min-combine: a pair only gets the pitch values when both sides carry them
    let builder = builder
        .friction(surface.friction)
        .restitution(surface.restitution)
        .friction_combine_rule(CoefficientCombineRule::Min)
        .restitution_combine_rule(CoefficientCombineRule::Min);

    match mass {
        Some(mass) => builder.mass(mass).build(),
        None => builder.build(),
    }
}

impl PhysicsService for PhysicsWorld {
    fn add_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let builder = match desc.kind {
            BodyKind::Static => RigidBodyBuilder::fixed(),
            BodyKind::Dynamic { .. } => RigidBodyBuilder::dynamic(),
        };
        let mut builder = builder
            .translation(vector(desc.position))
            .rotation(vector(desc.orientation.to_scaled_axis()))
            .ccd_enabled(desc.ccd);
        if desc.fixed_rotation {
            builder = builder.lock_rotations();
        }
        let parent = self.rigid_body_set.insert(builder.build());

        let collider_mass = match desc.kind {
            BodyKind::Dynamic { mass } if !desc.colliders.is_empty() => {
                Some(mass / desc.colliders.len() as f32)
            }
            _ => None,
        };
        for collider in &desc.colliders {
            let collider =
                build_collider(collider.shape, collider.offset, desc.surface, collider_mass);
            self.collider_set
                .insert_with_parent(collider, parent, &mut self.rigid_body_set);
        }

        let handle = BodyHandle(self.handles.len());
        self.handles.push(parent);
        log::debug!("Added body {:?} ({:?})", handle, desc.kind);
        handle
    }

    fn step(&mut self, fixed_dt: f32, real_dt: f32, max_substeps: u32) -> u32 {
        if fixed_dt <= 0.0 {
            return 0;
        }
        if real_dt.is_finite() && real_dt > 0.0 {
            self.accumulator += real_dt;
        }

        let mut substeps = 0;
        while self.accumulator >= fixed_dt && substeps < max_substeps {
            self.internal_step(fixed_dt);
            self.accumulator -= fixed_dt;
            substeps += 1;
        }

        // Drop whole steps we had no budget for
        if self.accumulator >= fixed_dt {
            log::trace!("Dropping {:.3}s of physics catch-up", self.accumulator);
            self.accumulator %= fixed_dt;
        }

        substeps
    }

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec3, world_point: Vec3) {
        let Some(body) = self.body_mut(body) else { return };
        if body.is_dynamic() {
            body.apply_impulse_at_point(vector(impulse), vector(world_point), true);
        }
    }

    fn pose(&self, body: BodyHandle) -> BodyPose {
        let Some(body) = self.body(body) else {
            return BodyPose::default();
        };
        let t = body.translation();
        let r = body.rotation();
        let v = body.linvel();
        let w = body.angvel();
        BodyPose {
            position: Vec3::new(t.x, t.y, t.z),
            orientation: Quat::from_xyzw(r.x, r.y, r.z, r.w),
            velocity: Vec3::new(v.x, v.y, v.z),
            angular_velocity: Vec3::new(w.x, w.y, w.z),
        }
    }

    fn set_pose(&mut self, body: BodyHandle, pose: BodyPose) {
        let Some(body) = self.body_mut(body) else { return };
        let q = pose.orientation;
        body.set_translation(vector(pose.position), true);
        body.set_rotation(Rotation::from_xyzw(q.x, q.y, q.z, q.w), true);
        body.set_linvel(vector(pose.velocity), true);
        body.set_angvel(vector(pose.angular_velocity), true);
    }

    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec3) {
        if let Some(body) = self.body_mut(body) {
            body.set_linvel(vector(velocity), true);
        }
    }

    fn wake(&mut self, body: BodyHandle) {
        if let Some(body) = self.body_mut(body) {
            body.wake_up(true);
        }
    }

    fn sleep(&mut self, body: BodyHandle) {
        if let Some(body) = self.body_mut(body) {
            if body.is_dynamic() {
                body.sleep();
            }
        }
    }

    fn is_sleeping(&self, body: BodyHandle) -> bool {
        self.handles
            .get(body.0)
            .and_then(|h| self.rigid_body_set.get(*h))
            .is_some_and(|b| b.is_dynamic() && b.is_sleeping())
    }
}
