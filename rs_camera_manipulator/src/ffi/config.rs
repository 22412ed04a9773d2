use super::{configs, ffi_to_rs_string, report};
use crate::{
    config::{Config, Fov},
    error::Result,
    handle::Handle,
};

fn with_config_mut<R>(handle: u64, f: impl FnOnce(&mut Config) -> R) -> Result<R> {
    let handle = Handle::from_raw(handle)?;
    let mut configs = configs();
    let config = configs.get_mut(handle)?;
    Ok(f(config))
}

fn with_config<R>(handle: u64, f: impl FnOnce(&Config) -> R) -> Result<R> {
    let handle = Handle::from_raw(handle)?;
    let configs = configs();
    let config = configs.get(handle)?;
    Ok(f(config))
}

pub fn config_create() -> Result<u64> {
    let handle = configs().insert(Config::default())?.to_raw();
    log::trace!("Create config: {:#x}", handle);
    Ok(handle)
}

pub fn config_create_from_json(json: &str) -> Result<u64> {
    let config = Config::from_json_str(json)?;
    let handle = configs().insert(config)?.to_raw();
    log::trace!("Create config from json: {:#x}", handle);
    Ok(handle)
}

pub fn config_destroy(handle: u64) -> Result<()> {
    let raw = handle;
    let handle = Handle::from_raw(handle)?;
    configs().remove(handle)?;
    log::trace!("Destroy config: {:#x}", raw);
    Ok(())
}

pub fn config_get(handle: u64) -> Result<Config> {
    with_config(handle, |config| config.clone())
}

pub fn config_get_viewport(handle: u64) -> Result<[i32; 2]> {
    with_config(handle, |config| config.viewport)
}

pub fn config_set_viewport(handle: u64, width: i32, height: i32) -> Result<()> {
    with_config_mut(handle, |config| config.set_viewport(width, height))
}

pub fn config_set_target_position(handle: u64, position: glam::Vec3) -> Result<()> {
    with_config_mut(handle, |config| config.target_position = position)
}

pub fn config_set_up_vector(handle: u64, up_vector: glam::Vec3) -> Result<()> {
    with_config_mut(handle, |config| config.up_vector = up_vector)
}

pub fn config_set_zoom_speed(handle: u64, zoom_speed: f32) -> Result<()> {
    with_config_mut(handle, |config| config.zoom_speed = zoom_speed)
}

pub fn config_set_orbit_home_position(handle: u64, position: glam::Vec3) -> Result<()> {
    with_config_mut(handle, |config| config.orbit_home_position = position)
}

pub fn config_set_orbit_speed(handle: u64, speed: glam::Vec2) -> Result<()> {
    with_config_mut(handle, |config| config.orbit_speed = speed)
}

pub fn config_set_fov_direction(handle: u64, fov_direction: i32) -> Result<()> {
    let fov_direction = Fov::try_from(fov_direction)?;
    with_config_mut(handle, |config| config.fov_direction = fov_direction)
}

pub fn config_set_fov_degrees(handle: u64, fov_degrees: f32) -> Result<()> {
    with_config_mut(handle, |config| config.fov_degrees = fov_degrees)
}

pub fn config_set_far_plane(handle: u64, far_plane: f32) -> Result<()> {
    with_config_mut(handle, |config| config.far_plane = far_plane)
}

pub fn config_set_map_extent(handle: u64, extent: glam::Vec2) -> Result<()> {
    with_config_mut(handle, |config| config.map_extent = extent)
}

pub fn config_set_map_min_distance(handle: u64, min_distance: f32) -> Result<()> {
    with_config_mut(handle, |config| config.map_min_distance = min_distance)
}

pub fn config_set_ground_plane(handle: u64, plane: glam::Vec4) -> Result<()> {
    with_config_mut(handle, |config| config.ground_plane = plane)
}

pub fn config_set_panning(handle: u64, panning: bool) -> Result<()> {
    with_config_mut(handle, |config| config.panning = panning)
}

pub fn config_set_flight_start_position(handle: u64, position: glam::Vec3) -> Result<()> {
    with_config_mut(handle, |config| config.flight_start_position = position)
}

pub fn config_set_flight_start_orientation(handle: u64, pitch: f32, yaw: f32) -> Result<()> {
    with_config_mut(handle, |config| {
        config.flight_start_pitch = pitch;
        config.flight_start_yaw = yaw;
    })
}

pub fn config_set_flight_max_move_speed(handle: u64, speed: f32) -> Result<()> {
    with_config_mut(handle, |config| config.flight_max_move_speed = speed)
}

pub fn config_set_flight_speed_steps(handle: u64, steps: i32) -> Result<()> {
    with_config_mut(handle, |config| config.flight_speed_steps = steps)
}

pub fn config_set_flight_pan_speed(handle: u64, speed: glam::Vec2) -> Result<()> {
    with_config_mut(handle, |config| config.flight_pan_speed = speed)
}

pub fn config_set_flight_move_damping(handle: u64, damping: f32) -> Result<()> {
    with_config_mut(handle, |config| config.flight_move_damping = damping)
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_create() -> u64 {
    report("Config_create", config_create()).unwrap_or(0)
}

/// # Safety
/// `json` must be null or point to a nul-terminated string.
#[no_mangle]
pub unsafe extern "C" fn rs_camera_manipulator_Config_create_from_json(
    json: *const std::ffi::c_char,
) -> u64 {
    let result = ffi_to_rs_string(json).and_then(|json| config_create_from_json(&json));
    report("Config_create_from_json", result).unwrap_or(0)
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_destroy(config: u64) -> bool {
    report("Config_destroy", config_destroy(config)).is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_set_viewport(
    config: u64,
    width: i32,
    height: i32,
) -> bool {
    report(
        "Config_set_viewport",
        config_set_viewport(config, width, height),
    )
    .is_some()
}

/// # Safety
/// `viewport` must be null or valid for writes of two `i32`.
#[no_mangle]
pub unsafe extern "C" fn rs_camera_manipulator_Config_get_viewport(
    config: u64,
    viewport: *mut i32,
) -> bool {
    if viewport.is_null() {
        return false;
    }
    match report("Config_get_viewport", config_get_viewport(config)) {
        Some(value) => {
            std::ptr::copy_nonoverlapping(value.as_ptr(), viewport, 2);
            true
        }
        None => false,
    }
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_set_target_position(
    config: u64,
    x: f32,
    y: f32,
    z: f32,
) -> bool {
    report(
        "Config_set_target_position",
        config_set_target_position(config, glam::vec3(x, y, z)),
    )
    .is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_set_up_vector(
    config: u64,
    x: f32,
    y: f32,
    z: f32,
) -> bool {
    report(
        "Config_set_up_vector",
        config_set_up_vector(config, glam::vec3(x, y, z)),
    )
    .is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_set_zoom_speed(config: u64, speed: f32) -> bool {
    report("Config_set_zoom_speed", config_set_zoom_speed(config, speed)).is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_set_orbit_home_position(
    config: u64,
    x: f32,
    y: f32,
    z: f32,
) -> bool {
    report(
        "Config_set_orbit_home_position",
        config_set_orbit_home_position(config, glam::vec3(x, y, z)),
    )
    .is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_set_orbit_speed(
    config: u64,
    x: f32,
    y: f32,
) -> bool {
    report(
        "Config_set_orbit_speed",
        config_set_orbit_speed(config, glam::vec2(x, y)),
    )
    .is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_set_fov_direction(
    config: u64,
    fov_direction: i32,
) -> bool {
    report(
        "Config_set_fov_direction",
        config_set_fov_direction(config, fov_direction),
    )
    .is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_set_fov_degrees(config: u64, degrees: f32) -> bool {
    report(
        "Config_set_fov_degrees",
        config_set_fov_degrees(config, degrees),
    )
    .is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_set_far_plane(config: u64, distance: f32) -> bool {
    report("Config_set_far_plane", config_set_far_plane(config, distance)).is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_set_map_extent(
    config: u64,
    width: f32,
    height: f32,
) -> bool {
    report(
        "Config_set_map_extent",
        config_set_map_extent(config, glam::vec2(width, height)),
    )
    .is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_set_map_min_distance(
    config: u64,
    min_distance: f32,
) -> bool {
    report(
        "Config_set_map_min_distance",
        config_set_map_min_distance(config, min_distance),
    )
    .is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_set_ground_plane(
    config: u64,
    a: f32,
    b: f32,
    c: f32,
    d: f32,
) -> bool {
    report(
        "Config_set_ground_plane",
        config_set_ground_plane(config, glam::vec4(a, b, c, d)),
    )
    .is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_set_panning(config: u64, panning: bool) -> bool {
    report("Config_set_panning", config_set_panning(config, panning)).is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_set_flight_start_position(
    config: u64,
    x: f32,
    y: f32,
    z: f32,
) -> bool {
    report(
        "Config_set_flight_start_position",
        config_set_flight_start_position(config, glam::vec3(x, y, z)),
    )
    .is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_set_flight_start_orientation(
    config: u64,
    pitch: f32,
    yaw: f32,
) -> bool {
    report(
        "Config_set_flight_start_orientation",
        config_set_flight_start_orientation(config, pitch, yaw),
    )
    .is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_set_flight_max_move_speed(
    config: u64,
    speed: f32,
) -> bool {
    report(
        "Config_set_flight_max_move_speed",
        config_set_flight_max_move_speed(config, speed),
    )
    .is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_set_flight_speed_steps(
    config: u64,
    steps: i32,
) -> bool {
    report(
        "Config_set_flight_speed_steps",
        config_set_flight_speed_steps(config, steps),
    )
    .is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_set_flight_pan_speed(
    config: u64,
    x: f32,
    y: f32,
) -> bool {
    report(
        "Config_set_flight_pan_speed",
        config_set_flight_pan_speed(config, glam::vec2(x, y)),
    )
    .is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_set_flight_move_damping(
    config: u64,
    damping: f32,
) -> bool {
    report(
        "Config_set_flight_move_damping",
        config_set_flight_move_damping(config, damping),
    )
    .is_some()
}
