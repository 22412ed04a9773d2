use super::{Manipulator, ManipulatorBase, Mode};
use crate::{bookmark::Bookmark, config::Config};

const PHI_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EGrabState {
    Inactive,
    Grabbing,
    Panning,
}

/// Returns `(phi, theta, distance)` of a pivot-to-eye vector.
pub(crate) fn orbit_angles(pivot_to_eye: glam::Vec3) -> (f32, f32, f32) {
    let distance = pivot_to_eye.length();
    if distance <= f32::EPSILON {
        return (0.0, 0.0, 0.0);
    }
    let direction = pivot_to_eye / distance;
    let phi = direction.y.clamp(-1.0, 1.0).asin();
    let theta = direction.x.atan2(direction.z);
    (phi, theta, distance)
}

pub(crate) fn orbit_direction(phi: f32, theta: f32) -> glam::Vec3 {
    glam::vec3(theta.sin() * phi.cos(), phi.sin(), theta.cos() * phi.cos())
}

/// Rotates around a pivot, strafes in the view plane, and dollies along the gaze.
pub struct OrbitManipulator {
    base: ManipulatorBase,
    pivot: glam::Vec3,
    flipped: bool,
    grab_state: EGrabState,
    grab_win: glam::IVec2,
    grab_pivot: glam::Vec3,
    grab_eye: glam::Vec3,
    grab_target: glam::Vec3,
    grab_scene: glam::Vec3,
    grab_far: glam::Vec3,
    grab_bookmark: Bookmark,
}

impl OrbitManipulator {
    pub fn new(config: Config) -> OrbitManipulator {
        let mut base = ManipulatorBase::new(Mode::Orbit, config);
        base.eye = base.config.orbit_home_position;
        base.target = base.config.target_position;
        let pivot = base.target;
        OrbitManipulator {
            base,
            pivot,
            flipped: false,
            grab_state: EGrabState::Inactive,
            grab_win: glam::IVec2::ZERO,
            grab_pivot: pivot,
            grab_eye: glam::Vec3::ZERO,
            grab_target: glam::Vec3::ZERO,
            grab_scene: glam::Vec3::ZERO,
            grab_far: glam::Vec3::ZERO,
            grab_bookmark: Bookmark::new(Mode::Orbit),
        }
    }

    pub fn get_pivot(&self) -> glam::Vec3 {
        self.pivot
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    fn make_bookmark(&self, pivot: glam::Vec3, eye: glam::Vec3, flipped: bool) -> Bookmark {
        let (phi, theta, distance) = orbit_angles(eye - pivot);
        let mut bookmark = Bookmark::new(Mode::Orbit);
        bookmark.orbit.phi = phi;
        bookmark.orbit.theta = theta;
        bookmark.orbit.distance = if flipped { -distance } else { distance };
        bookmark.orbit.pivot = pivot;

        let (uvec, vvec) = self.base.ground_axes();
        let center_to_pivot = pivot - self.base.config.target_position;
        bookmark.map.extent = self.base.extent_at_distance(distance);
        bookmark.map.center = glam::vec2(uvec.dot(center_to_pivot), vvec.dot(center_to_pivot));
        bookmark
    }
}

impl Manipulator for OrbitManipulator {
    fn base(&self) -> &ManipulatorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ManipulatorBase {
        &mut self.base
    }

    fn grab_begin(&mut self, x: i32, y: i32, strafe: bool) {
        self.grab_state = if strafe && self.base.config.panning {
            EGrabState::Panning
        } else {
            EGrabState::Grabbing
        };
        self.grab_win = glam::ivec2(x, y);
        self.grab_pivot = self.pivot;
        self.grab_eye = self.base.eye;
        self.grab_target = self.base.target;
        self.grab_bookmark = self.get_current_bookmark();
        self.grab_far = self.base.raycast_far_plane(x, y);
        self.grab_scene = self.base.raycast(x, y).unwrap_or(self.pivot);
    }

    fn grab_update(&mut self, x: i32, y: i32) {
        match self.grab_state {
            EGrabState::Inactive => {}
            EGrabState::Grabbing => {
                let delta = self.grab_win - glam::ivec2(x, y);
                let speed = self.base.config.orbit_speed;
                let sign = if self.flipped { -1.0 } else { 1.0 };
                let mut bookmark = self.grab_bookmark;
                bookmark.orbit.theta += sign * speed.x * delta.x as f32;
                bookmark.orbit.phi =
                    (bookmark.orbit.phi + speed.y * delta.y as f32).clamp(-PHI_LIMIT, PHI_LIMIT);
                self.jump_to_bookmark(&bookmark);
            }
            EGrabState::Panning => {
                // The gaze does not change while panning, so the far plane point
                // can be measured from the grab-time eye.
                let far = self.grab_eye + (self.base.raycast_far_plane(x, y) - self.base.eye);
                let ulen = self.grab_scene.distance(self.grab_eye);
                let vlen = self.grab_far.distance(self.grab_eye);
                if vlen <= f32::EPSILON {
                    return;
                }
                let translation = (self.grab_far - far) * ulen / vlen;
                self.pivot = self.grab_pivot + translation;
                self.base.eye = self.grab_eye + translation;
                self.base.target = self.grab_target + translation;
            }
        }
    }

    fn grab_end(&mut self) {
        self.grab_state = EGrabState::Inactive;
    }

    fn scroll(&mut self, _x: i32, _y: i32, delta: f32) {
        let gaze = self.base.gaze();
        let movement = gaze * self.base.config.zoom_speed * delta;
        let v0 = self.pivot - self.base.eye;
        self.base.eye += movement;
        self.base.target += movement;
        let v1 = self.pivot - self.base.eye;
        if v0.dot(v1) < 0.0 {
            self.flipped = !self.flipped;
        }
    }

    fn get_current_bookmark(&self) -> Bookmark {
        self.make_bookmark(self.pivot, self.base.eye, self.flipped)
    }

    fn get_home_bookmark(&self) -> Bookmark {
        self.make_bookmark(
            self.base.config.target_position,
            self.base.config.orbit_home_position,
            false,
        )
    }

    fn jump_to_bookmark(&mut self, bookmark: &Bookmark) {
        let direction = orbit_direction(bookmark.orbit.phi, bookmark.orbit.theta);
        self.pivot = bookmark.orbit.pivot;
        self.flipped = bookmark.orbit.distance < 0.0;
        self.base.eye = self.pivot + direction * bookmark.orbit.distance.abs();
        self.base.target = self.base.eye + direction * if self.flipped { 1.0 } else { -1.0 };
    }
}

#[cfg(test)]
mod test {
    use super::{OrbitManipulator, PHI_LIMIT};
    use crate::{config::Config, manipulator::Manipulator};

    fn make_manipulator() -> OrbitManipulator {
        let mut config = Config::default();
        config.set_viewport(200, 200);
        OrbitManipulator::new(config)
    }

    #[test]
    fn test_home_look_at() {
        let manipulator = make_manipulator();
        let look_at = manipulator.get_look_at();
        assert_eq!(look_at.eye, glam::Vec3::Z);
        assert_eq!(look_at.target, glam::Vec3::ZERO);
        assert!(look_at.upward.abs_diff_eq(glam::Vec3::Y, 1e-6));
    }

    #[test]
    fn test_home_bookmark_matches_initial_state() {
        let manipulator = make_manipulator();
        let home = manipulator.get_home_bookmark();
        let current = manipulator.get_current_bookmark();
        assert_eq!(home, current);
        assert_eq!(home.orbit.distance, 1.0);
        assert_eq!(home.orbit.phi, 0.0);
        assert_eq!(home.orbit.theta, 0.0);
    }

    #[test]
    fn test_jump_to_bookmark() {
        let mut manipulator = make_manipulator();
        let mut bookmark = manipulator.get_current_bookmark();
        bookmark.orbit.phi = 0.3;
        bookmark.orbit.theta = 1.0;
        bookmark.orbit.distance = 5.0;
        bookmark.orbit.pivot = glam::vec3(1.0, 2.0, 3.0);
        manipulator.jump_to_bookmark(&bookmark);

        let current = manipulator.get_current_bookmark();
        assert!((current.orbit.phi - 0.3).abs() < 1e-4);
        assert!((current.orbit.theta - 1.0).abs() < 1e-4);
        assert!((current.orbit.distance - 5.0).abs() < 1e-4);
        assert_eq!(current.orbit.pivot, glam::vec3(1.0, 2.0, 3.0));
        let gaze = (manipulator.base.target - manipulator.base.eye).normalize();
        let to_pivot = (current.orbit.pivot - manipulator.base.eye).normalize();
        assert!(gaze.abs_diff_eq(to_pivot, 1e-4));
    }

    #[test]
    fn test_grab_rotates_around_pivot() {
        let mut manipulator = make_manipulator();
        manipulator.grab_begin(100, 100, false);
        manipulator.grab_update(90, 100);
        let bookmark = manipulator.get_current_bookmark();
        assert!((bookmark.orbit.theta - 0.1).abs() < 1e-4);
        assert!((bookmark.orbit.distance - 1.0).abs() < 1e-4);
        manipulator.grab_end();

        manipulator.grab_update(0, 0);
        assert_eq!(manipulator.get_current_bookmark(), bookmark);
    }

    #[test]
    fn test_grab_clamps_phi() {
        let mut manipulator = make_manipulator();
        manipulator.grab_begin(100, 100, false);
        manipulator.grab_update(100, 100_000);
        let bookmark = manipulator.get_current_bookmark();
        assert!(bookmark.orbit.phi >= -PHI_LIMIT - 1e-4);
        assert!(manipulator.get_look_at().upward.is_finite());
    }

    #[test]
    fn test_strafe_keeps_scene_under_cursor() {
        let mut manipulator = make_manipulator();
        let grabbed = manipulator.raycast(100, 100).unwrap();
        manipulator.grab_begin(100, 100, true);
        manipulator.grab_update(150, 120);
        let under_cursor = manipulator.raycast(150, 120).unwrap();
        assert!(under_cursor.abs_diff_eq(grabbed, 1e-4), "{under_cursor} {grabbed}");
        assert_ne!(manipulator.get_pivot(), glam::Vec3::ZERO);
    }

    #[test]
    fn test_strafe_without_panning_rotates() {
        let mut config = Config::default();
        config.set_viewport(200, 200);
        config.panning = false;
        let mut manipulator = OrbitManipulator::new(config);
        manipulator.grab_begin(100, 100, true);
        manipulator.grab_update(90, 100);
        assert_eq!(manipulator.get_pivot(), glam::Vec3::ZERO);
        assert!((manipulator.get_current_bookmark().orbit.theta - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_home_straight_above_target() {
        let mut config = Config::default();
        config.set_viewport(200, 200);
        config.orbit_home_position = glam::vec3(0.0, 10.0, 0.0);
        config.ground_plane = glam::vec4(0.0, 1.0, 0.0, 0.0);
        let manipulator = OrbitManipulator::new(config);
        let look_at = manipulator.get_look_at();
        assert!(look_at.upward.is_finite());
        let hit = manipulator.raycast(100, 100).unwrap();
        assert!(hit.abs_diff_eq(glam::Vec3::ZERO, 0.1), "{hit}");
    }

    #[test]
    fn test_scroll_dollies_along_gaze() {
        let mut manipulator = make_manipulator();
        manipulator.scroll(100, 100, 10.0);
        assert!(manipulator
            .get_look_at()
            .eye
            .abs_diff_eq(glam::vec3(0.0, 0.0, 0.9), 1e-6));
        assert!(!manipulator.is_flipped());
    }

    #[test]
    fn test_scroll_past_pivot_flips() {
        let mut manipulator = make_manipulator();
        manipulator.scroll(100, 100, 150.0);
        assert!(manipulator.is_flipped());
        let bookmark = manipulator.get_current_bookmark();
        assert!(bookmark.orbit.distance < 0.0);

        let look_at = manipulator.get_look_at();
        manipulator.jump_to_bookmark(&manipulator.get_home_bookmark());
        manipulator.jump_to_bookmark(&bookmark);
        let restored = manipulator.get_look_at();
        assert!(restored.eye.abs_diff_eq(look_at.eye, 1e-4));
        assert!(restored.target.abs_diff_eq(look_at.target, 1e-4));
    }
}
