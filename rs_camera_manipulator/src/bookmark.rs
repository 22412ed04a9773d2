use crate::manipulator::Mode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct OrbitBookmark {
    /// Elevation of the pivot-to-eye direction, in radians.
    pub phi: f32,
    /// Azimuth of the pivot-to-eye direction, in radians.
    pub theta: f32,
    /// Negative when the eye has been dollied past the pivot.
    pub distance: f32,
    pub pivot: glam::Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MapBookmark {
    /// Size of the visible ground area along the fov axis.
    pub extent: f32,
    /// Offset of the view center from the target position, in the ground plane.
    pub center: glam::Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct FlightBookmark {
    pub position: glam::Vec3,
    pub pitch: f32,
    pub yaw: f32,
}

/// A snapshot of a manipulator's camera that can be restored later.
///
/// Orbit and map manipulators fill both the orbit and the map parts so a
/// bookmark taken in one of these modes is meaningful in the other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub mode: Mode,
    pub orbit: OrbitBookmark,
    pub map: MapBookmark,
    pub flight: FlightBookmark,
}

impl Bookmark {
    pub fn new(mode: Mode) -> Bookmark {
        Bookmark {
            mode,
            orbit: OrbitBookmark::default(),
            map: MapBookmark::default(),
            flight: FlightBookmark::default(),
        }
    }
}
