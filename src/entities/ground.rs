//! Pitch surface

use glam::Quat;

use crate::physics::{BodyDesc, BodyHandle, PhysicsService, Shape, Surface};
use crate::scene::{ProxyDesc, RenderPose, RenderService};

/// Side length of the drawn pitch
const PITCH_SIZE: f32 = 100.0;

#[derive(Debug, Clone)]
pub struct Ground {
    pub body: BodyHandle,
}

impl Ground {
    pub fn spawn(physics: &mut impl PhysicsService, scene: &mut impl RenderService) -> Self {
        // Plane normals are local +Z; tip it so the normal points up
        let body = physics.add_body(
            BodyDesc::fixed()
                .rotated(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2))
                .with_shape(Shape::Plane)
                .with_surface(Surface::PITCH),
        );
        let proxy = scene.spawn(ProxyDesc::Ground { size: PITCH_SIZE });
        scene.place(proxy, RenderPose::default());
        Self { body }
    }
}
