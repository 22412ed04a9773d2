use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The FOV axis that's held constant when the viewport changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Fov {
    #[default]
    Vertical,
    Horizontal,
}

impl TryFrom<i32> for Fov {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Fov::Vertical),
            1 => Ok(Fov::Horizontal),
            _ => Err(Error::InvalidFov(value)),
        }
    }
}

/// Construction parameters of a manipulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Width and height of the viewing area in pixels.
    pub viewport: [i32; 2],
    /// World-space position of interest.
    pub target_position: glam::Vec3,
    /// Orientation for the home position.
    pub up_vector: glam::Vec3,
    /// Multiplied with scroll delta.
    pub zoom_speed: f32,
    /// Initial eye position in world space.
    pub orbit_home_position: glam::Vec3,
    /// Multiplied with viewport delta.
    pub orbit_speed: glam::Vec2,
    pub fov_direction: Fov,
    /// The full FOV, not the half-angle.
    pub fov_degrees: f32,
    pub far_plane: f32,
    /// The ground plane size used to compute the home position.
    pub map_extent: glam::Vec2,
    /// Constrains the zoom-in level.
    pub map_min_distance: f32,
    /// Plane equation `a * x + b * y + c * z + d = 0`.
    pub ground_plane: glam::Vec4,
    /// Allows strafe grabs in orbit mode.
    pub panning: bool,
    pub flight_start_position: glam::Vec3,
    pub flight_start_pitch: f32,
    pub flight_start_yaw: f32,
    /// World units per second at the top of the speed range.
    pub flight_max_move_speed: f32,
    pub flight_speed_steps: i32,
    pub flight_pan_speed: glam::Vec2,
    pub flight_move_damping: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport: [0, 0],
            target_position: glam::Vec3::ZERO,
            up_vector: glam::Vec3::Y,
            zoom_speed: 0.01,
            orbit_home_position: glam::Vec3::Z,
            orbit_speed: glam::vec2(0.01, 0.01),
            fov_direction: Fov::Vertical,
            fov_degrees: 33.0,
            far_plane: 5000.0,
            map_extent: glam::vec2(512.0, 512.0),
            map_min_distance: 0.0,
            ground_plane: glam::vec4(0.0, 0.0, 1.0, 0.0),
            panning: true,
            flight_start_position: glam::Vec3::ZERO,
            flight_start_pitch: 0.0,
            flight_start_yaw: 0.0,
            flight_max_move_speed: 10.0,
            flight_speed_steps: 80,
            flight_pan_speed: glam::vec2(0.01, 0.01),
            flight_move_damping: 15.0,
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Config> {
        serde_json::from_str(json).map_err(Error::Json)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|err| Error::IO(err, Some(path.to_string_lossy().to_string())))?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::Json)
    }

    pub fn set_viewport(&mut self, width: i32, height: i32) {
        self.viewport[0] = width;
        self.viewport[1] = height;
    }

    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }

    pub fn ground_normal(&self) -> glam::Vec3 {
        self.ground_plane.truncate()
    }
}

#[cfg(test)]
mod test {
    use super::{Config, Fov};

    #[test]
    fn test_default_is_zero_viewport() {
        let config = Config::default();
        assert_eq!(config.viewport, [0, 0]);
        assert_eq!(config.fov_direction, Fov::Vertical);
        assert_eq!(config.ground_normal(), glam::Vec3::Z);
    }

    #[test]
    fn test_set_viewport_is_exact() {
        let mut config = Config::default();
        config.set_viewport(-3, 0);
        assert_eq!(config.viewport, [-3, 0]);
        config.set_viewport(1920, 1080);
        assert_eq!(config.viewport, [1920, 1080]);
    }

    #[test]
    fn test_from_json_str_partial() {
        let config =
            Config::from_json_str(r#"{ "viewport": [800, 600], "fov_direction": "Horizontal" }"#)
                .unwrap();
        assert_eq!(config.viewport, [800, 600]);
        assert_eq!(config.fov_direction, Fov::Horizontal);
        assert_eq!(config.far_plane, 5000.0);
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(Config::from_json_str("{ viewport").is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = Config::default();
        config.target_position = glam::vec3(1.0, 2.0, 3.0);
        let json = config.to_json_string().unwrap();
        assert_eq!(Config::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file("./this_file_does_not_exist.json");
        assert!(matches!(result, Err(crate::error::Error::IO(_, Some(_)))));
    }

    #[test]
    fn test_fov_try_from() {
        assert_eq!(Fov::try_from(1).unwrap(), Fov::Horizontal);
        assert!(Fov::try_from(2).is_err());
    }
}
