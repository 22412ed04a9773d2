use super::{orbit::orbit_angles, Manipulator, ManipulatorBase, Mode};
use crate::{
    bookmark::Bookmark,
    config::{Config, Fov},
    plane_3d::Plane3D,
};

/// Looks down onto the ground plane, pans with the cursor and zooms toward it.
pub struct MapManipulator {
    base: ManipulatorBase,
    grabbing: bool,
    grab_scene: glam::Vec3,
    grab_far: glam::Vec3,
    grab_eye: glam::Vec3,
    grab_target: glam::Vec3,
}

impl MapManipulator {
    pub fn new(config: Config) -> MapManipulator {
        let base = ManipulatorBase::new(Mode::Map, config);
        let mut manipulator = MapManipulator {
            base,
            grabbing: false,
            grab_scene: glam::Vec3::ZERO,
            grab_far: glam::Vec3::ZERO,
            grab_eye: glam::Vec3::ZERO,
            grab_target: glam::Vec3::ZERO,
        };
        let home = manipulator.get_home_bookmark();
        manipulator.jump_to_bookmark(&home);
        manipulator
    }

    fn home_extent(&self) -> f32 {
        let extent = self.base.config.map_extent;
        match self.base.config.fov_direction {
            Fov::Horizontal => extent.x,
            Fov::Vertical => extent.y,
        }
    }

    fn ground_normal(&self) -> glam::Vec3 {
        self.base.config.ground_normal().normalize()
    }

    /// Applies the move unless it brings the eye under the minimum height.
    fn move_with_constraints(&mut self, eye: glam::Vec3, target: glam::Vec3) -> bool {
        let plane = Plane3D::from_equation(self.base.config.ground_plane);
        let height = plane.signed_distance(eye);
        if height <= 0.0 || height < self.base.config.map_min_distance {
            log::trace!("Reject map move, height: {}", height);
            return false;
        }
        self.base.eye = eye;
        self.base.target = target;
        true
    }

    fn make_bookmark(&self, center_on_ground: glam::Vec3, distance: f32) -> Bookmark {
        let (uvec, vvec) = self.base.ground_axes();
        let center_to_target = center_on_ground - self.base.config.target_position;
        let mut bookmark = Bookmark::new(Mode::Map);
        bookmark.map.extent = self.base.extent_at_distance(distance);
        bookmark.map.center = glam::vec2(uvec.dot(center_to_target), vvec.dot(center_to_target));

        let (phi, theta, _) = orbit_angles(self.ground_normal());
        bookmark.orbit.phi = phi;
        bookmark.orbit.theta = theta;
        bookmark.orbit.distance = distance;
        bookmark.orbit.pivot = center_on_ground;
        bookmark
    }
}

impl Manipulator for MapManipulator {
    fn base(&self) -> &ManipulatorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ManipulatorBase {
        &mut self.base
    }

    fn grab_begin(&mut self, x: i32, y: i32, strafe: bool) {
        if strafe {
            return;
        }
        let Some(grab_scene) = self.base.raycast(x, y) else {
            return;
        };
        self.grab_scene = grab_scene;
        self.grab_far = self.base.raycast_far_plane(x, y);
        self.grab_eye = self.base.eye;
        self.grab_target = self.base.target;
        self.grabbing = true;
    }

    fn grab_update(&mut self, x: i32, y: i32) {
        if !self.grabbing {
            return;
        }
        let far = self.grab_eye + (self.base.raycast_far_plane(x, y) - self.base.eye);
        let ulen = self.grab_scene.distance(self.grab_eye);
        let vlen = self.grab_far.distance(self.grab_eye);
        if vlen <= f32::EPSILON {
            return;
        }
        let translation = (self.grab_far - far) * ulen / vlen;
        self.move_with_constraints(self.grab_eye + translation, self.grab_target + translation);
    }

    fn grab_end(&mut self) {
        self.grabbing = false;
    }

    fn scroll(&mut self, x: i32, y: i32, delta: f32) {
        let Some(grab_scene) = self.base.raycast(x, y) else {
            return;
        };
        let zoom_speed = self.base.config.zoom_speed;

        // Not normalized: the dolly is faster when further away.
        let mut u = grab_scene - self.base.eye;

        // Keep a minimum step so zooming in never gets stuck near the surface.
        if delta > 0.0 {
            let distance_to_surface = u.length();
            if distance_to_surface < zoom_speed && distance_to_surface > 0.0 {
                u *= zoom_speed / distance_to_surface;
            }
        }
        u *= delta * zoom_speed;
        self.move_with_constraints(self.base.eye + u, self.base.target + u);
    }

    fn get_current_bookmark(&self) -> Bookmark {
        let gaze = self.base.gaze();
        let distance = self
            .base
            .distance_to_ground()
            .unwrap_or_else(|| self.base.eye.distance(self.base.target));
        self.make_bookmark(self.base.eye + gaze * distance, distance)
    }

    fn get_home_bookmark(&self) -> Bookmark {
        let distance = self.base.distance_for_extent(self.home_extent());
        self.make_bookmark(self.base.config.target_position, distance)
    }

    fn jump_to_bookmark(&mut self, bookmark: &Bookmark) {
        let map = &bookmark.map;
        let is_usable = bookmark.mode != Mode::FreeFlight
            && map.extent.is_finite()
            && map.extent > 0.0
            && map.center.is_finite();
        if !is_usable {
            log::warn!("Ignore map jump to bookmark: {:?}", bookmark);
            return;
        }
        let (uvec, vvec) = self.base.ground_axes();
        let distance = self
            .base
            .distance_for_extent(map.extent)
            .max(self.base.config.map_min_distance);
        let target = self.base.config.target_position + uvec * map.center.x + vvec * map.center.y;
        self.base.target = target;
        self.base.eye = target + self.ground_normal() * distance;
        log::trace!("Map jump, {:?}", map);
    }
}
