pub mod free_flight;
pub mod map;
pub mod orbit;

use crate::{
    bookmark::Bookmark,
    config::{Config, Fov},
    error::{Error, Result},
    plane_3d::{Plane3D, Ray3D},
};
use serde::{Deserialize, Serialize};

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Orbit = 0,
    Map = 1,
    FreeFlight = 2,
}

impl TryFrom<i32> for Mode {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Mode::Orbit),
            1 => Ok(Mode::Map),
            2 => Ok(Mode::FreeFlight),
            _ => Err(Error::InvalidMode(value)),
        }
    }
}

/// Movement keys, only consumed in free-flight mode.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward = 0,
    Left = 1,
    Backward = 2,
    Right = 3,
    Up = 4,
    Down = 5,
}

impl Key {
    pub const COUNT: usize = 6;
}

impl TryFrom<i32> for Key {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Key::Forward),
            1 => Ok(Key::Left),
            2 => Ok(Key::Backward),
            3 => Ok(Key::Right),
            4 => Ok(Key::Up),
            5 => Ok(Key::Down),
            _ => Err(Error::InvalidKey(value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAt {
    pub eye: glam::Vec3,
    pub target: glam::Vec3,
    pub upward: glam::Vec3,
}

/// State and viewport math shared by every mode.
#[derive(Debug, Clone)]
pub struct ManipulatorBase {
    pub mode: Mode,
    pub config: Config,
    pub eye: glam::Vec3,
    pub target: glam::Vec3,
}

impl ManipulatorBase {
    pub fn new(mode: Mode, config: Config) -> ManipulatorBase {
        ManipulatorBase {
            mode,
            config,
            eye: glam::Vec3::ZERO,
            target: glam::Vec3::NEG_Z,
        }
    }

    pub fn gaze(&self) -> glam::Vec3 {
        (self.target - self.eye)
            .try_normalize()
            .unwrap_or(glam::Vec3::NEG_Z)
    }

    /// Returns `(gaze, right, upward)`.
    ///
    /// When the gaze is parallel to the up vector, `right` is any unit vector
    /// perpendicular to the gaze.
    pub fn view_basis(&self) -> (glam::Vec3, glam::Vec3, glam::Vec3) {
        let gaze = self.gaze();
        let right = match gaze.cross(self.config.up_vector).try_normalize() {
            Some(right) => right,
            None => gaze.any_orthonormal_pair().0,
        };
        let upward = right.cross(gaze);
        (gaze, right, upward)
    }

    pub fn look_at(&self) -> LookAt {
        let (_, _, upward) = self.view_basis();
        LookAt {
            eye: self.eye,
            target: self.target,
            upward,
        }
    }

    /// Offsets of the pixel center from the gaze, in units of the gaze length.
    ///
    /// `y` grows upward from the bottom row. A viewport without area maps
    /// every pixel onto the gaze.
    fn pixel_offsets(&self, x: i32, y: i32) -> (f32, f32) {
        let width = self.config.viewport[0] as f32;
        let height = self.config.viewport[1] as f32;
        if width <= 0.0 || height <= 0.0 {
            return (0.0, 0.0);
        }
        let u = 2.0 * (0.5 + x as f32) / width - 1.0;
        let v = 2.0 * (0.5 + y as f32) / height - 1.0;
        let tangent = (self.config.fov_radians() / 2.0).tan();
        let aspect = width / height;
        match self.config.fov_direction {
            Fov::Horizontal => (tangent * u, tangent * v / aspect),
            Fov::Vertical => (tangent * u * aspect, tangent * v),
        }
    }

    fn unnormalized_ray_direction(&self, x: i32, y: i32) -> glam::Vec3 {
        let (gaze, right, upward) = self.view_basis();
        let (dx, dy) = self.pixel_offsets(x, y);
        gaze + right * dx + upward * dy
    }

    pub fn get_ray(&self, x: i32, y: i32) -> Ray3D {
        Ray3D::new(self.eye, self.unnormalized_ray_direction(x, y).normalize())
    }

    pub fn raycast(&self, x: i32, y: i32) -> Option<glam::Vec3> {
        let plane = Plane3D::from_equation(self.config.ground_plane);
        plane.intersection_ray(&self.get_ray(x, y))
    }

    /// The point where the ray through a pixel meets the far plane.
    pub fn raycast_far_plane(&self, x: i32, y: i32) -> glam::Vec3 {
        self.eye + self.unnormalized_ray_direction(x, y) * self.config.far_plane
    }

    /// Distance from the eye to the ground plane along the gaze.
    pub fn distance_to_ground(&self) -> Option<f32> {
        let plane = Plane3D::from_equation(self.config.ground_plane);
        plane.intersection_distance(&Ray3D::new(self.eye, self.gaze()))
    }

    /// Orthonormal axes spanning the ground plane, derived from the up vector.
    pub fn ground_axes(&self) -> (glam::Vec3, glam::Vec3) {
        let normal = self.config.ground_normal().normalize();
        let uvec = self.config.up_vector.cross(normal);
        if uvec.length_squared() <= f32::EPSILON {
            return normal.any_orthonormal_pair();
        }
        let uvec = uvec.normalize();
        let vvec = normal.cross(uvec).normalize();
        (uvec, vvec)
    }

    /// Distance from which a region of `extent` fills the fov.
    pub fn distance_for_extent(&self, extent: f32) -> f32 {
        extent / 2.0 / (self.config.fov_radians() / 2.0).tan()
    }

    pub fn extent_at_distance(&self, distance: f32) -> f32 {
        distance * (self.config.fov_radians() / 2.0).tan() * 2.0
    }
}

pub trait Manipulator: Send {
    fn base(&self) -> &ManipulatorBase;

    fn base_mut(&mut self) -> &mut ManipulatorBase;

    fn get_mode(&self) -> Mode {
        self.base().mode
    }

    fn get_config(&self) -> &Config {
        &self.base().config
    }

    fn set_viewport(&mut self, width: i32, height: i32) {
        self.base_mut().config.set_viewport(width, height);
    }

    /// Gets the current orthonormal basis. This is usually called once per frame.
    fn get_look_at(&self) -> LookAt {
        self.base().look_at()
    }

    /// Given a viewport coordinate, picks a point in the ground plane.
    fn raycast(&self, x: i32, y: i32) -> Option<glam::Vec3> {
        self.base().raycast(x, y)
    }

    fn grab_begin(&mut self, x: i32, y: i32, strafe: bool);

    fn grab_update(&mut self, x: i32, y: i32);

    fn grab_end(&mut self);

    fn key_down(&mut self, _key: Key) {}

    fn key_up(&mut self, _key: Key) {}

    /// Positive `delta` zooms in.
    fn scroll(&mut self, x: i32, y: i32, delta: f32);

    fn update(&mut self, _delta_time: f32) {}

    fn get_current_bookmark(&self) -> Bookmark;

    fn get_home_bookmark(&self) -> Bookmark;

    fn jump_to_bookmark(&mut self, bookmark: &Bookmark);
}

pub fn create(mode: Mode, config: &Config) -> Box<dyn Manipulator> {
    log::trace!("Create manipulator, mode: {:?}", mode);
    match mode {
        Mode::Orbit => Box::new(orbit::OrbitManipulator::new(config.clone())),
        Mode::Map => Box::new(map::MapManipulator::new(config.clone())),
        Mode::FreeFlight => Box::new(free_flight::FreeFlightManipulator::new(config.clone())),
    }
}

#[cfg(test)]
mod test {
    use super::{create, Key, ManipulatorBase, Mode};
    use crate::config::{Config, Fov};

    fn make_base() -> ManipulatorBase {
        let mut config = Config::default();
        config.set_viewport(200, 100);
        let mut base = ManipulatorBase::new(Mode::Orbit, config);
        base.eye = glam::vec3(0.0, 0.0, 10.0);
        base.target = glam::Vec3::ZERO;
        base
    }

    #[test]
    fn test_mode_try_from() {
        assert_eq!(Mode::try_from(0).unwrap(), Mode::Orbit);
        assert_eq!(Mode::try_from(1).unwrap(), Mode::Map);
        assert_eq!(Mode::try_from(2).unwrap(), Mode::FreeFlight);
        assert!(Mode::try_from(3).is_err());
        assert!(Mode::try_from(-1).is_err());
    }

    #[test]
    fn test_key_try_from() {
        assert_eq!(Key::try_from(5).unwrap(), Key::Down);
        assert!(Key::try_from(6).is_err());
    }

    #[test]
    fn test_center_ray_follows_gaze() {
        let base = make_base();
        let ray = base.get_ray(99, 49);
        assert!(ray
            .direction
            .abs_diff_eq(glam::Vec3::NEG_Z, 0.02));
        assert_eq!(ray.origin, base.eye);
    }

    #[test]
    fn test_raycast_center_hits_origin() {
        let base = make_base();
        let hit = base.raycast(99, 49).unwrap();
        assert!(hit.abs_diff_eq(glam::Vec3::ZERO, 0.1), "{hit}");
    }

    #[test]
    fn test_raycast_right_edge_vertical_fov() {
        let base = make_base();
        let hit = base.raycast(199, 49).unwrap();
        let expected_x = 10.0 * (33.0_f32.to_radians() / 2.0).tan() * 2.0;
        assert!((hit.x - expected_x).abs() < 0.1, "{hit}");
    }

    #[test]
    fn test_raycast_top_edge_horizontal_fov() {
        let mut base = make_base();
        base.config.fov_direction = Fov::Horizontal;
        let hit = base.raycast(99, 99).unwrap();
        let expected_y = 10.0 * (33.0_f32.to_radians() / 2.0).tan() / 2.0;
        assert!((hit.y - expected_y).abs() < 0.1, "{hit}");
    }

    #[test]
    fn test_raycast_empty_viewport_uses_gaze() {
        let mut base = make_base();
        base.config.set_viewport(0, 0);
        assert_eq!(base.raycast(10, 10), Some(glam::Vec3::ZERO));
    }

    #[test]
    fn test_far_plane_point() {
        let base = make_base();
        let far = base.raycast_far_plane(99, 49);
        assert!((far.z - (10.0 - 5000.0)).abs() < 1.0);
    }

    #[test]
    fn test_look_at_upward_is_orthogonal() {
        let mut base = make_base();
        base.eye = glam::vec3(0.0, 5.0, 5.0);
        let look_at = base.look_at();
        let gaze = (look_at.target - look_at.eye).normalize();
        assert!(look_at.upward.dot(gaze).abs() < 1e-5);
        assert!((look_at.upward.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_view_basis_gaze_parallel_to_up() {
        let mut base = make_base();
        base.config.up_vector = glam::Vec3::Z;
        let (gaze, right, upward) = base.view_basis();
        assert!(gaze.abs_diff_eq(glam::Vec3::NEG_Z, 1e-6));
        assert!(right.is_finite() && upward.is_finite());
        assert!((right.length() - 1.0).abs() < 1e-5);
        assert!((upward.length() - 1.0).abs() < 1e-5);
        assert!(right.dot(gaze).abs() < 1e-5);
        assert!(upward.dot(gaze).abs() < 1e-5);

        let hit = base.raycast(99, 49).unwrap();
        assert!(hit.abs_diff_eq(glam::Vec3::ZERO, 0.1), "{hit}");
    }

    #[test]
    fn test_gaze_with_eye_on_target() {
        let mut base = make_base();
        base.target = base.eye;
        assert_eq!(base.gaze(), glam::Vec3::NEG_Z);
        assert!(base.look_at().upward.is_finite());
    }

    #[test]
    fn test_create_keeps_mode_and_viewport() {
        let mut config = Config::default();
        config.set_viewport(1920, 1080);
        for mode in [Mode::Orbit, Mode::Map, Mode::FreeFlight] {
            let manipulator = create(mode, &config);
            assert_eq!(manipulator.get_mode(), mode);
            assert_eq!(manipulator.get_config().viewport, [1920, 1080]);
        }
    }

    #[test]
    fn test_set_viewport_on_instance() {
        let mut manipulator = create(Mode::Map, &Config::default());
        manipulator.set_viewport(640, 480);
        assert_eq!(manipulator.get_config().viewport, [640, 480]);
    }
}
