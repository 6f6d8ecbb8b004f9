//! Goalkeeper
//!
//! A free-running lateral patrol across the goal mouth. It does not watch the
//! ball; it only shares the frame tick with the shot logic.

use glam::Vec3;

use crate::consts::*;
use crate::physics::{BodyDesc, BodyHandle, PhysicsService, Shape};
use crate::scene::{ProxyDesc, ProxyId, RenderPose, RenderService};
use crate::tuning::KeeperTuning;

#[derive(Debug, Clone)]
pub struct Goalkeeper {
    pub body: BodyHandle,
    proxy: ProxyId,
    tuning: KeeperTuning,
    /// +1 moving right, -1 moving left
    direction: f32,
}

impl Goalkeeper {
    pub fn spawn(
        tuning: KeeperTuning,
        physics: &mut impl PhysicsService,
        scene: &mut impl RenderService,
    ) -> Self {
        let torso = KEEPER_TORSO_HALF_EXTENTS;
        let body = physics.add_body(
            BodyDesc::dynamic(KEEPER_MASS)
                .at(KEEPER_SPAWN)
                .with_shape(Shape::Cuboid {
                    half_extents: torso,
                })
                .with_shape_at(
                    Shape::Sphere {
                        radius: KEEPER_HEAD_RADIUS,
                    },
                    Vec3::new(0.0, torso.y + KEEPER_HEAD_RADIUS, 0.0),
                )
                // Never tips over
                .with_fixed_rotation(),
        );
        let proxy = scene.spawn(ProxyDesc::Goalkeeper {
            height: torso.y * 2.0 + KEEPER_HEAD_RADIUS * 2.0,
        });
        scene.place(proxy, RenderPose::at(KEEPER_SPAWN));

        Self {
            body,
            proxy,
            tuning,
            direction: 1.0,
        }
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    /// Turn around past the patrol limit and re-apply the lateral speed
    pub fn update(&mut self, physics: &mut impl PhysicsService) {
        let pose = physics.pose(self.body);
        let limit = self.tuning.patrol_limit;
        if pose.position.x > limit {
            self.direction = -1.0;
        }
        if pose.position.x < -limit {
            self.direction = 1.0;
        }

        let velocity = Vec3::new(
            self.direction * self.tuning.patrol_speed,
            pose.velocity.y,
            pose.velocity.z,
        );
        physics.set_velocity(self.body, velocity);
    }

    /// Copy position onto the proxy, mirrored when walking left
    pub fn sync(&self, physics: &impl PhysicsService, scene: &mut impl RenderService) {
        let pose = physics.pose(self.body);
        scene.place(
            self.proxy,
            RenderPose {
                position: pose.position,
                orientation: pose.orientation,
                mirror_x: self.direction < 0.0,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Ground;
    use crate::physics::{BodyPose, PhysicsWorld};
    use crate::scene::SceneGraph;

    #[test]
    fn test_turns_around_at_limits() {
        let mut world = PhysicsWorld::new();
        let mut scene = SceneGraph::new();
        let mut keeper = Goalkeeper::spawn(KeeperTuning::default(), &mut world, &mut scene);

        keeper.update(&mut world);
        assert_eq!(keeper.direction(), 1.0);
        assert_eq!(world.pose(keeper.body).velocity.x, KEEPER_PATROL_SPEED);

        world.set_pose(keeper.body, BodyPose::at_rest(Vec3::new(2.6, 0.7, 0.0)));
        keeper.update(&mut world);
        assert_eq!(keeper.direction(), -1.0);
        assert_eq!(world.pose(keeper.body).velocity.x, -KEEPER_PATROL_SPEED);

        // Inside the band the direction holds
        world.set_pose(keeper.body, BodyPose::at_rest(Vec3::new(0.0, 0.7, 0.0)));
        keeper.update(&mut world);
        assert_eq!(keeper.direction(), -1.0);

        world.set_pose(keeper.body, BodyPose::at_rest(Vec3::new(-2.6, 0.7, 0.0)));
        keeper.update(&mut world);
        assert_eq!(keeper.direction(), 1.0);
    }

    #[test]
    fn test_patrol_stays_near_band() {
        let mut world = PhysicsWorld::new();
        let mut scene = SceneGraph::new();
        Ground::spawn(&mut world, &mut scene);
        let mut keeper = Goalkeeper::spawn(KeeperTuning::default(), &mut world, &mut scene);

        let mut saw_left = false;
        for _ in 0..240 {
            world.step(SIM_DT, SIM_DT, MAX_SUBSTEPS);
            keeper.update(&mut world);
            let x = world.pose(keeper.body).position.x;
            // One step of overshoot past the turnaround point at most
            let slack = KEEPER_PATROL_SPEED * SIM_DT + 0.01;
            assert!(x.abs() <= KEEPER_PATROL_LIMIT + slack, "x = {x}");
            saw_left |= keeper.direction() < 0.0;
        }
        assert!(saw_left);
    }

    #[test]
    fn test_sync_mirrors_when_moving_left() {
        let mut world = PhysicsWorld::new();
        let mut scene = SceneGraph::new();
        let mut keeper = Goalkeeper::spawn(KeeperTuning::default(), &mut world, &mut scene);

        world.set_pose(keeper.body, BodyPose::at_rest(Vec3::new(3.0, 0.7, 0.0)));
        keeper.update(&mut world);
        keeper.sync(&world, &mut scene);

        let node = scene
            .find(|d| matches!(d, ProxyDesc::Goalkeeper { .. }))
            .unwrap();
        assert!(node.pose.mirror_x);
        assert_eq!(node.pose.position.x, 3.0);
    }
}
