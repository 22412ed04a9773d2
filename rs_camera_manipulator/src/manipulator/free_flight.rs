use super::{Key, Manipulator, ManipulatorBase, Mode};
use crate::{bookmark::Bookmark, config::Config};
use std::f32::consts::{FRAC_PI_2, TAU};

const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.001;

/// First-person camera: drags look around, keys move, the scroll wheel picks the speed.
pub struct FreeFlightManipulator {
    base: ManipulatorBase,
    pitch: f32,
    yaw: f32,
    grabbing: bool,
    grab_win: glam::IVec2,
    grab_pitch: f32,
    grab_yaw: f32,
    key_down: [bool; Key::COUNT],
    scroll_wheel: f32,
    move_speed: f32,
    eye_velocity: glam::Vec3,
}

impl FreeFlightManipulator {
    pub fn new(config: Config) -> FreeFlightManipulator {
        let base = ManipulatorBase::new(Mode::FreeFlight, config);
        let mut manipulator = FreeFlightManipulator {
            base,
            pitch: 0.0,
            yaw: 0.0,
            grabbing: false,
            grab_win: glam::IVec2::ZERO,
            grab_pitch: 0.0,
            grab_yaw: 0.0,
            key_down: [false; Key::COUNT],
            scroll_wheel: 0.0,
            move_speed: 1.0,
            eye_velocity: glam::Vec3::ZERO,
        };
        let home = manipulator.get_home_bookmark();
        manipulator.jump_to_bookmark(&home);
        manipulator
    }

    pub fn get_move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn get_pitch(&self) -> f32 {
        self.pitch
    }

    pub fn get_yaw(&self) -> f32 {
        self.yaw
    }

    fn rotation(&self) -> glam::Mat3 {
        glam::Mat3::from_euler(glam::EulerRot::ZYX, 0.0, self.yaw, self.pitch)
    }

    fn update_target(&mut self) {
        self.base.target = self.base.eye + self.rotation() * glam::Vec3::NEG_Z;
    }

    fn local_force(&self) -> glam::Vec3 {
        let mut force = glam::Vec3::ZERO;
        let is_down = |key: Key| self.key_down[key as usize];
        if is_down(Key::Forward) {
            force += glam::Vec3::NEG_Z;
        }
        if is_down(Key::Left) {
            force += glam::Vec3::NEG_X;
        }
        if is_down(Key::Backward) {
            force += glam::Vec3::Z;
        }
        if is_down(Key::Right) {
            force += glam::Vec3::X;
        }
        if is_down(Key::Up) {
            force += glam::Vec3::Y;
        }
        if is_down(Key::Down) {
            force += glam::Vec3::NEG_Y;
        }
        force
    }
}

impl Manipulator for FreeFlightManipulator {
    fn base(&self) -> &ManipulatorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ManipulatorBase {
        &mut self.base
    }

    fn grab_begin(&mut self, x: i32, y: i32, _strafe: bool) {
        self.grab_win = glam::ivec2(x, y);
        self.grabbing = true;
        self.grab_pitch = self.pitch;
        self.grab_yaw = self.yaw;
    }

    fn grab_update(&mut self, x: i32, y: i32) {
        if !self.grabbing {
            return;
        }
        let delta = (self.grab_win - glam::ivec2(x, y)).as_vec2();
        let pan_speed = self.base.config.flight_pan_speed;
        self.pitch = (self.grab_pitch - delta.y * pan_speed.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw = (self.grab_yaw + delta.x * pan_speed.x) % TAU;
        self.update_target();
    }

    fn grab_end(&mut self) {
        self.grabbing = false;
    }

    fn key_down(&mut self, key: Key) {
        self.key_down[key as usize] = true;
    }

    fn key_up(&mut self, key: Key) {
        self.key_down[key as usize] = false;
    }

    fn scroll(&mut self, _x: i32, _y: i32, delta: f32) {
        let max_move_speed = self.base.config.flight_max_move_speed;
        let half_speed_steps = self.base.config.flight_speed_steps as f32 / 2.0;
        if half_speed_steps <= 0.0 {
            self.move_speed = max_move_speed;
            return;
        }
        self.scroll_wheel = (self.scroll_wheel + delta).clamp(-half_speed_steps, half_speed_steps);
        let normalized = self.scroll_wheel / half_speed_steps;
        self.move_speed = max_move_speed.powf(normalized);
    }

    fn update(&mut self, delta_time: f32) {
        let world_force = self.rotation() * self.local_force();

        let damping = self.base.config.flight_move_damping;
        if damping == 0.0 {
            self.eye_velocity = world_force * self.move_speed;
        } else {
            let force = world_force * self.move_speed * damping;
            self.eye_velocity += delta_time * (force - damping * self.eye_velocity);
        }

        let position_delta = self.eye_velocity * delta_time;
        self.base.eye += position_delta;
        self.base.target += position_delta;
    }

    fn get_current_bookmark(&self) -> Bookmark {
        let mut bookmark = Bookmark::new(Mode::FreeFlight);
        bookmark.flight.position = self.base.eye;
        bookmark.flight.pitch = self.pitch;
        bookmark.flight.yaw = self.yaw;
        bookmark
    }

    fn get_home_bookmark(&self) -> Bookmark {
        let config = &self.base.config;
        let mut bookmark = Bookmark::new(Mode::FreeFlight);
        bookmark.flight.position = config.flight_start_position;
        bookmark.flight.pitch = config.flight_start_pitch;
        bookmark.flight.yaw = config.flight_start_yaw;
        bookmark
    }

    fn jump_to_bookmark(&mut self, bookmark: &Bookmark) {
        self.base.eye = bookmark.flight.position;
        self.pitch = bookmark.flight.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw = bookmark.flight.yaw;
        self.eye_velocity = glam::Vec3::ZERO;
        self.update_target();
    }
}

#[cfg(test)]
mod test {
    use super::{FreeFlightManipulator, PITCH_LIMIT};
    use crate::{
        config::Config,
        manipulator::{Key, Manipulator},
    };

    fn make_manipulator(damping: f32) -> FreeFlightManipulator {
        let mut config = Config::default();
        config.set_viewport(200, 200);
        config.flight_move_damping = damping;
        FreeFlightManipulator::new(config)
    }

    #[test]
    fn test_home_looks_down_negative_z() {
        let manipulator = make_manipulator(15.0);
        let look_at = manipulator.get_look_at();
        assert_eq!(look_at.eye, glam::Vec3::ZERO);
        assert!(look_at.target.abs_diff_eq(glam::Vec3::NEG_Z, 1e-6));
        assert_eq!(manipulator.get_move_speed(), 1.0);
    }

    #[test]
    fn test_grab_turns() {
        let mut manipulator = make_manipulator(15.0);
        manipulator.grab_begin(0, 0, false);
        manipulator.grab_update(-100, 0);
        assert!((manipulator.get_yaw() - 1.0).abs() < 1e-6);
        let forward = manipulator.get_look_at().target - manipulator.get_look_at().eye;
        assert!(forward.abs_diff_eq(glam::vec3(-1.0_f32.sin(), 0.0, -1.0_f32.cos()), 1e-5));
    }

    #[test]
    fn test_grab_clamps_pitch() {
        let mut manipulator = make_manipulator(15.0);
        manipulator.grab_begin(0, 0, false);
        manipulator.grab_update(0, -100_000);
        assert_eq!(manipulator.get_pitch(), -PITCH_LIMIT);
        manipulator.grab_update(0, 100_000);
        assert_eq!(manipulator.get_pitch(), PITCH_LIMIT);
        assert!(manipulator.get_look_at().upward.is_finite());
    }

    #[test]
    fn test_scroll_speed_steps() {
        let mut manipulator = make_manipulator(15.0);
        manipulator.scroll(0, 0, 40.0);
        assert!((manipulator.get_move_speed() - 10.0).abs() < 1e-4);
        manipulator.scroll(0, 0, 1000.0);
        assert!((manipulator.get_move_speed() - 10.0).abs() < 1e-4);
        manipulator.scroll(0, 0, -80.0);
        assert!((manipulator.get_move_speed() - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_update_without_damping() {
        let mut manipulator = make_manipulator(0.0);
        manipulator.key_down(Key::Forward);
        manipulator.update(0.5);
        let look_at = manipulator.get_look_at();
        assert!(look_at.eye.abs_diff_eq(glam::vec3(0.0, 0.0, -0.5), 1e-6));
        assert!(look_at.target.abs_diff_eq(glam::vec3(0.0, 0.0, -1.5), 1e-6));

        manipulator.key_up(Key::Forward);
        manipulator.update(0.5);
        assert_eq!(manipulator.get_look_at(), look_at);
    }

    #[test]
    fn test_update_with_damping() {
        let mut manipulator = make_manipulator(15.0);
        manipulator.key_down(Key::Right);
        manipulator.update(0.01);
        let eye = manipulator.get_look_at().eye;
        assert!(eye.x > 0.0 && eye.x < 0.01, "{eye}");
        assert_eq!(eye.z, 0.0);
    }

    #[test]
    fn test_idle_update_with_z_up_stays_finite() {
        let mut config = Config::default();
        config.set_viewport(200, 200);
        config.up_vector = glam::Vec3::Z;
        let mut manipulator = FreeFlightManipulator::new(config);
        let before = manipulator.get_look_at();
        assert!(before.upward.is_finite());

        manipulator.update(0.016);
        assert_eq!(manipulator.get_look_at(), before);

        manipulator.key_down(Key::Forward);
        manipulator.update(0.016);
        let eye = manipulator.get_look_at().eye;
        assert!(eye.is_finite() && eye.z < 0.0, "{eye}");
    }

    #[test]
    fn test_move_follows_yaw() {
        let mut manipulator = make_manipulator(0.0);
        manipulator.grab_begin(0, 0, false);
        manipulator.grab_update(-100, 0);
        manipulator.grab_end();
        manipulator.key_down(Key::Forward);
        manipulator.update(1.0);
        let look_at = manipulator.get_look_at();
        let forward = (look_at.target - look_at.eye).normalize();
        assert!(look_at.eye.normalize().abs_diff_eq(forward, 1e-5));
    }

    #[test]
    fn test_bookmark_round_trip() {
        let mut manipulator = make_manipulator(15.0);
        let mut bookmark = manipulator.get_home_bookmark();
        bookmark.flight.position = glam::vec3(1.0, 2.0, 3.0);
        bookmark.flight.pitch = 0.5;
        bookmark.flight.yaw = -0.25;
        manipulator.jump_to_bookmark(&bookmark);
        assert_eq!(manipulator.get_current_bookmark(), bookmark);
        manipulator.jump_to_bookmark(&manipulator.get_home_bookmark());
        assert_eq!(manipulator.get_look_at().eye, glam::Vec3::ZERO);
    }

    #[test]
    fn test_keys_ignored_by_other_modes() {
        let mut orbit = crate::manipulator::create(
            crate::manipulator::Mode::Orbit,
            &Config::default(),
        );
        let before = orbit.get_look_at();
        orbit.key_down(Key::Forward);
        orbit.update(1.0);
        assert_eq!(orbit.get_look_at(), before);
    }
}
