//! The match ball

use glam::{Quat, Vec3};

use crate::consts::*;
use crate::physics::{BodyDesc, BodyHandle, BodyPose, PhysicsService, Shape, Surface};
use crate::scene::{ProxyDesc, ProxyId, RenderPose, RenderService};

/// A dynamic sphere resting on the penalty spot between shots
#[derive(Debug, Clone)]
pub struct Ball {
    pub body: BodyHandle,
    proxy: ProxyId,
    pub radius: f32,
    spawn: Vec3,
}

impl Ball {
    pub fn spawn(physics: &mut impl PhysicsService, scene: &mut impl RenderService) -> Self {
        let body = physics.add_body(
            BodyDesc::dynamic(BALL_MASS)
                .at(BALL_SPAWN)
                .with_shape(Shape::Sphere {
                    radius: BALL_RADIUS,
                })
                .with_surface(Surface::PITCH)
                // Shots reach 15 m/s against 2 cm net panels
                .with_ccd(),
        );
        let proxy = scene.spawn(ProxyDesc::Ball {
            radius: BALL_RADIUS,
        });
        scene.place(proxy, RenderPose::at(BALL_SPAWN));

        Self {
            body,
            proxy,
            radius: BALL_RADIUS,
            spawn: BALL_SPAWN,
        }
    }

    pub fn spawn_point(&self) -> Vec3 {
        self.spawn
    }

    pub fn position(&self, physics: &impl PhysicsService) -> Vec3 {
        physics.pose(self.body).position
    }

    /// Back to the spot: teleport, kill all motion, sleep
    pub fn reset(&self, physics: &mut impl PhysicsService) {
        physics.set_pose(
            self.body,
            BodyPose {
                position: self.spawn,
                orientation: Quat::IDENTITY,
                velocity: Vec3::ZERO,
                angular_velocity: Vec3::ZERO,
            },
        );
        physics.sleep(self.body);
    }

    /// Copy the physics pose onto the render proxy
    pub fn sync(&self, physics: &impl PhysicsService, scene: &mut impl RenderService) {
        let pose = physics.pose(self.body);
        scene.place(
            self.proxy,
            RenderPose {
                position: pose.position,
                orientation: pose.orientation,
                mirror_x: false,
            },
        );
    }
}
