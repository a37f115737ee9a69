use cgmath::{InnerSpace, Quaternion, Rad, Rotation, Rotation3};
use cube_core::Vector3;

const DEFAULT_ZOOM: f32 = 0.9;
const DEFAULT_FOV_3D: f32 = 30.0;
const DEFAULT_PITCH: f32 = 0.5;
const DEFAULT_YAW: f32 = -std::f32::consts::FRAC_PI_4;

/// Factor by which lattice coordinates are scaled before projection, so that
/// the whole puzzle fits in the unit cube centered on the origin.
const MODEL_SCALE: f32 = 1.0 / 3.0;

/// Perspective camera looking at the puzzle from the +Z side.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    /// Width and height of the draw target in pixels.
    pub target_size: [u32; 2],
    /// Rotation to apply to the puzzle before drawing it.
    rot: Quaternion<f32>,
    /// Linear factor by which to scale the puzzle before drawing it.
    pub zoom: f32,
    /// Field of view in degrees. May be negative for reverse perspective.
    pub fov_3d: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            target_size: [1, 1],
            rot: default_rot(),
            zoom: DEFAULT_ZOOM,
            fov_3d: DEFAULT_FOV_3D,
        }
    }
}

fn default_rot() -> Quaternion<f32> {
    Quaternion::from_angle_x(Rad(DEFAULT_PITCH)) * Quaternion::from_angle_y(Rad(DEFAULT_YAW))
}

impl Camera {
    /// Constructs a camera for a draw target of the given size.
    pub fn new(target_size: [u32; 2]) -> Self {
        Self {
            target_size,
            ..Self::default()
        }
    }
    /// Constructs a camera that first turns the puzzle by `yaw` around Y and
    /// then tilts it by `pitch` around X. Angles are in radians.
    pub fn with_yaw_pitch(target_size: [u32; 2], yaw: f32, pitch: f32) -> Self {
        let mut ret = Self::new(target_size);
        ret.rot = Quaternion::from_angle_x(Rad(pitch)) * Quaternion::from_angle_y(Rad(yaw));
        ret
    }

    /// Resets the camera rotation and zoom.
    pub fn reset(&mut self) {
        self.rot = default_rot();
        self.zoom = DEFAULT_ZOOM;
    }

    /// Returns the current camera rotation.
    pub fn rot(&self) -> Quaternion<f32> {
        self.rot
    }
    /// Sets the camera rotation.
    pub fn set_rot(&mut self, new_rot: Quaternion<f32>) {
        self.rot = new_rot.normalize();
    }
    /// Applies a delta to the left of the camera rotation.
    pub fn rot_by(&mut self, delta: Quaternion<f32>) {
        self.set_rot(delta * self.rot);
    }
    /// Orbits the camera in response to a pointer drag of `delta` pixels.
    pub fn orbit_by(&mut self, delta: [f32; 2], sensitivity: f32) {
        let [dx, dy] = delta;
        self.rot_by(
            Quaternion::from_angle_x(Rad(dy * sensitivity))
                * Quaternion::from_angle_y(Rad(dx * sensitivity)),
        );
    }

    /// Returns the number of pixels in 1 screen space unit.
    fn compute_pixel_scale(target_size: [u32; 2], zoom: f32) -> Option<f32> {
        let w = target_size[0] as f32;
        let h = target_size[1] as f32;
        let min_dimen = f32::min(w, h);
        if min_dimen == 0.0 {
            return None;
        }
        Some(min_dimen * zoom)
    }
    /// Returns the X and Y scale factors to convert screen space to NDC.
    /// Returns `None` if either the width or height is zero.
    pub fn xy_scale(&self) -> Option<cgmath::Vector2<f32>> {
        let pixel_scale = Self::compute_pixel_scale(self.target_size, self.zoom)?;
        let w = self.target_size[0] as f32;
        let h = self.target_size[1] as f32;
        Some(cgmath::vec2(pixel_scale / w, pixel_scale / h))
    }

    /// Returns the factor by which the Z coordinate affects the XY coordinates
    /// during 3D projection.
    pub fn w_factor_3d(&self) -> f32 {
        (self.fov_3d.to_radians() * 0.5).tan()
    }
    /// Returns the 3D perspective divisor based on the Z coordinate of a point.
    pub fn z_divisor(&self, z: f32) -> f32 {
        // Offset the model along Z and keep the new Z=0 plane fixed with
        // respect to FOV changes.
        1.0 + (self.fov_3d.signum() - z) * self.w_factor_3d()
    }

    /// Rotates and scales a world-space point into camera space.
    fn to_camera_space(&self, p: Vector3) -> cgmath::Vector3<f32> {
        let p = cgmath::vec3(p.x as f32, p.y as f32, p.z as f32) * MODEL_SCALE;
        self.rot.rotate_vector(p)
    }

    /// Projects a world-space point to normalized device coordinates, with +Y
    /// pointing up.
    pub fn project_point_to_ndc(&self, p: Vector3) -> Option<cgmath::Point2<f32>> {
        let p = self.to_camera_space(p);
        let divisor = self.z_divisor(p.z);
        if divisor <= 0.0 {
            return None;
        }
        let xy_scale = self.xy_scale()?;
        Some(cgmath::point2(
            p.x / divisor * xy_scale.x,
            p.y / divisor * xy_scale.y,
        ))
    }
    /// Projects a world-space point to pixel coordinates, with the origin at
    /// the top left of the draw target and +Y pointing down.
    pub fn project_point_to_screen(&self, p: Vector3) -> Option<cgmath::Point2<f32>> {
        let ndc = self.project_point_to_ndc(p)?;
        let w = self.target_size[0] as f32;
        let h = self.target_size[1] as f32;
        Some(cgmath::point2(
            (ndc.x + 1.0) * 0.5 * w,
            (1.0 - ndc.y) * 0.5 * h,
        ))
    }

    /// Returns the position of the eye in camera space.
    fn eye_pos(&self) -> cgmath::Vector3<f32> {
        cgmath::vec3(0.0, 0.0, self.fov_3d.signum() + 1.0 / self.w_factor_3d())
    }
    /// Returns whether a surface at world-space point `p` with outward normal
    /// `normal` is facing the camera.
    pub fn is_facing_camera(&self, p: Vector3, normal: Vector3) -> bool {
        let p = self.to_camera_space(p);
        let n = self
            .rot
            .rotate_vector(cgmath::vec3(normal.x as f32, normal.y as f32, normal.z as f32));
        if !self.w_factor_3d().is_normal() {
            // Orthographic
            return n.z > 0.0;
        }
        n.dot(self.eye_pos() - p) > 0.0
    }
}
