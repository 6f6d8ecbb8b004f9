//! Goal frame and net
//!
//! The goal line sits on z = 0 with the net extending toward -z. The frame is
//! one static compound body (crossbar + posts); each net panel is its own thin
//! static box.

use glam::Vec3;

use crate::consts::*;
use crate::physics::{BodyDesc, BodyHandle, PhysicsService, Shape};
use crate::scene::{ProxyDesc, ProxyId, RenderPose, RenderService};
use crate::tuning::GoalBounds;

#[derive(Debug, Clone)]
pub struct Goal {
    bounds: GoalBounds,
    pub frame: BodyHandle,
    pub nets: Vec<BodyHandle>,
    proxy: ProxyId,
}

impl Goal {
    pub fn build(
        bounds: GoalBounds,
        physics: &mut impl PhysicsService,
        scene: &mut impl RenderService,
    ) -> Self {
        let GoalBounds {
            width: w,
            height: h,
            depth: d,
        } = bounds;
        let t = POST_HALF_THICKNESS;

        let frame = physics.add_body(
            BodyDesc::fixed()
                // Crossbar
                .with_shape_at(
                    Shape::Cuboid {
                        half_extents: Vec3::new(w / 2.0, t, d / 2.0),
                    },
                    Vec3::new(0.0, h, 0.0),
                )
                // Left post
                .with_shape_at(
                    Shape::Cuboid {
                        half_extents: Vec3::new(t, h / 2.0, d / 2.0),
                    },
                    Vec3::new(-w / 2.0, h / 2.0, 0.0),
                )
                // Right post
                .with_shape_at(
                    Shape::Cuboid {
                        half_extents: Vec3::new(t, h / 2.0, d / 2.0),
                    },
                    Vec3::new(w / 2.0, h / 2.0, 0.0),
                ),
        );

        let n = NET_HALF_THICKNESS;
        let panels = [
            // Back
            (Vec3::new(0.0, h / 2.0, -d), Vec3::new(w / 2.0, h / 2.0, n)),
            // Left
            (Vec3::new(-w / 2.0, h / 2.0, -d / 2.0), Vec3::new(n, h / 2.0, d / 2.0)),
            // Right
            (Vec3::new(w / 2.0, h / 2.0, -d / 2.0), Vec3::new(n, h / 2.0, d / 2.0)),
            // Top
            (Vec3::new(0.0, h, -d / 2.0), Vec3::new(w / 2.0, n, d / 2.0)),
        ];
        let nets = panels
            .into_iter()
            .map(|(position, half_extents)| {
                physics.add_body(
                    BodyDesc::fixed()
                        .at(position)
                        .with_shape(Shape::Cuboid { half_extents }),
                )
            })
            .collect();

        let proxy = scene.spawn(ProxyDesc::Goal { bounds });
        scene.place(proxy, RenderPose::default());

        Self {
            bounds,
            frame,
            nets,
            proxy,
        }
    }

    pub fn bounds(&self) -> GoalBounds {
        self.bounds
    }

    pub fn proxy(&self) -> ProxyId {
        self.proxy
    }
}
