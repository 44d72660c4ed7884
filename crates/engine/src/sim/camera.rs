use super::config::CameraConfig;
use super::geometry::Vec2;

/// Deadzone-follow camera. `target` moves only as far as needed to keep the followed point
/// inside the deadzone; `position` chases `target` exponentially. Both are top-left corners of
/// the view in world pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    pub target: Vec2,
}

impl Camera {
    pub fn centered_on(focus: Vec2, world_size: Vec2, config: &CameraConfig) -> Self {
        let mut camera = Self::default();
        camera.snap_to(focus, world_size, config);
        camera
    }

    /// Puts both `position` and `target` on `focus`, bypassing smoothing.
    pub fn snap_to(&mut self, focus: Vec2, world_size: Vec2, config: &CameraConfig) {
        let max = max_corner(world_size, config);
        let corner = Vec2::new(
            clamp_axis(focus.x - config.view_width * 0.5, max.x),
            clamp_axis(focus.y - config.view_height * 0.5, max.y),
        );
        self.position = corner;
        self.target = corner;
    }

    pub fn update(&mut self, focus: Vec2, world_size: Vec2, config: &CameraConfig, dt: f32) {
        let view_center = Vec2::new(
            self.target.x + config.view_width * 0.5,
            self.target.y + config.view_height * 0.5,
        );
        self.target.x += deadzone_excess(focus.x, view_center.x, config.deadzone_x);
        self.target.y += deadzone_excess(focus.y, view_center.y, config.deadzone_y);

        let max = max_corner(world_size, config);
        self.target.x = clamp_axis(self.target.x, max.x);
        self.target.y = clamp_axis(self.target.y, max.y);

        let blend = config.smoothing_rate * dt;
        self.position.x += (self.target.x - self.position.x) * blend;
        self.position.y += (self.target.y - self.position.y) * blend;

        self.position.x = clamp_axis(self.position.x, max.x);
        self.position.y = clamp_axis(self.position.y, max.y);
    }
}

fn deadzone_excess(focus: f32, center: f32, half_width: f32) -> f32 {
    if focus > center + half_width {
        focus - (center + half_width)
    } else if focus < center - half_width {
        focus - (center - half_width)
    } else {
        0.0
    }
}

fn max_corner(world_size: Vec2, config: &CameraConfig) -> Vec2 {
    Vec2::new(
        (world_size.x - config.view_width).max(0.0),
        (world_size.y - config.view_height).max(0.0),
    )
}

fn clamp_axis(value: f32, max: f32) -> f32 {
    value.max(0.0).min(max)
}
