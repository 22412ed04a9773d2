use super::{bookmarks, configs, manipulators, report, write_vec3};
use crate::{
    config::Config,
    error::Result,
    handle::Handle,
    manipulator::{create, Key, LookAt, Manipulator, Mode},
};

fn with_manipulator_mut<R>(handle: u64, f: impl FnOnce(&mut dyn Manipulator) -> R) -> Result<R> {
    let handle = Handle::from_raw(handle)?;
    let mut manipulators = manipulators();
    let manipulator = manipulators.get_mut(handle)?;
    Ok(f(&mut **manipulator))
}

fn with_manipulator<R>(handle: u64, f: impl FnOnce(&dyn Manipulator) -> R) -> Result<R> {
    let handle = Handle::from_raw(handle)?;
    let manipulators = manipulators();
    let manipulator = manipulators.get(handle)?;
    Ok(f(&**manipulator))
}

/// Builds a manipulator from a copy of the configuration; the configuration stays owned by the caller.
pub fn manipulator_build(config: u64, mode: i32) -> Result<u64> {
    let mode = Mode::try_from(mode)?;
    let config = {
        let handle = Handle::from_raw(config)?;
        configs().get(handle)?.clone()
    };
    let manipulator = create(mode, &config);
    let handle = manipulators().insert(manipulator)?.to_raw();
    log::trace!("Build manipulator: {:#x}, mode: {:?}", handle, mode);
    Ok(handle)
}

pub fn manipulator_destroy(handle: u64) -> Result<()> {
    let raw = handle;
    let handle = Handle::from_raw(handle)?;
    manipulators().remove(handle)?;
    log::trace!("Destroy manipulator: {:#x}", raw);
    Ok(())
}

pub fn manipulator_get_mode(handle: u64) -> Result<Mode> {
    with_manipulator(handle, |manipulator| manipulator.get_mode())
}

pub fn manipulator_get_config(handle: u64) -> Result<Config> {
    with_manipulator(handle, |manipulator| manipulator.get_config().clone())
}

pub fn manipulator_set_viewport(handle: u64, width: i32, height: i32) -> Result<()> {
    with_manipulator_mut(handle, |manipulator| {
        manipulator.set_viewport(width, height)
    })
}

pub fn manipulator_get_look_at(handle: u64) -> Result<LookAt> {
    with_manipulator(handle, |manipulator| manipulator.get_look_at())
}

pub fn manipulator_raycast(handle: u64, x: i32, y: i32) -> Result<Option<glam::Vec3>> {
    with_manipulator(handle, |manipulator| manipulator.raycast(x, y))
}

pub fn manipulator_grab_begin(handle: u64, x: i32, y: i32, strafe: bool) -> Result<()> {
    with_manipulator_mut(handle, |manipulator| manipulator.grab_begin(x, y, strafe))
}

pub fn manipulator_grab_update(handle: u64, x: i32, y: i32) -> Result<()> {
    with_manipulator_mut(handle, |manipulator| manipulator.grab_update(x, y))
}

pub fn manipulator_grab_end(handle: u64) -> Result<()> {
    with_manipulator_mut(handle, |manipulator| manipulator.grab_end())
}

pub fn manipulator_scroll(handle: u64, x: i32, y: i32, delta: f32) -> Result<()> {
    with_manipulator_mut(handle, |manipulator| manipulator.scroll(x, y, delta))
}

pub fn manipulator_key_down(handle: u64, key: i32) -> Result<()> {
    let key = Key::try_from(key)?;
    with_manipulator_mut(handle, |manipulator| manipulator.key_down(key))
}

pub fn manipulator_key_up(handle: u64, key: i32) -> Result<()> {
    let key = Key::try_from(key)?;
    with_manipulator_mut(handle, |manipulator| manipulator.key_up(key))
}

pub fn manipulator_update(handle: u64, delta_time: f32) -> Result<()> {
    with_manipulator_mut(handle, |manipulator| manipulator.update(delta_time))
}

/// Returns a bookmark handle, destroyed with `bookmark_destroy`.
pub fn manipulator_get_current_bookmark(handle: u64) -> Result<u64> {
    let bookmark = with_manipulator(handle, |manipulator| manipulator.get_current_bookmark())?;
    Ok(bookmarks().insert(bookmark)?.to_raw())
}

/// Returns a bookmark handle, destroyed with `bookmark_destroy`.
pub fn manipulator_get_home_bookmark(handle: u64) -> Result<u64> {
    let bookmark = with_manipulator(handle, |manipulator| manipulator.get_home_bookmark())?;
    Ok(bookmarks().insert(bookmark)?.to_raw())
}

pub fn manipulator_jump_to_bookmark(handle: u64, bookmark: u64) -> Result<()> {
    let bookmark = {
        let bookmark = Handle::from_raw(bookmark)?;
        *bookmarks().get(bookmark)?
    };
    with_manipulator_mut(handle, |manipulator| {
        manipulator.jump_to_bookmark(&bookmark)
    })
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Config_build(config: u64, mode: i32) -> u64 {
    report("Config_build", manipulator_build(config, mode)).unwrap_or(0)
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Manipulator_destroy(manipulator: u64) -> bool {
    report("Manipulator_destroy", manipulator_destroy(manipulator)).is_some()
}

/// Returns the mode ordinal, or -1 for a rejected handle.
#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Manipulator_get_mode(manipulator: u64) -> i32 {
    report("Manipulator_get_mode", manipulator_get_mode(manipulator))
        .map(|mode| mode as i32)
        .unwrap_or(-1)
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Manipulator_set_viewport(
    manipulator: u64,
    width: i32,
    height: i32,
) -> bool {
    report(
        "Manipulator_set_viewport",
        manipulator_set_viewport(manipulator, width, height),
    )
    .is_some()
}

/// # Safety
/// Each pointer must be null or valid for writes of three `f32`.
#[no_mangle]
pub unsafe extern "C" fn rs_camera_manipulator_Manipulator_get_look_at(
    manipulator: u64,
    eye: *mut f32,
    target: *mut f32,
    upward: *mut f32,
) -> bool {
    if eye.is_null() || target.is_null() || upward.is_null() {
        return false;
    }
    match report(
        "Manipulator_get_look_at",
        manipulator_get_look_at(manipulator),
    ) {
        Some(look_at) => {
            write_vec3(eye, look_at.eye)
                && write_vec3(target, look_at.target)
                && write_vec3(upward, look_at.upward)
        }
        None => false,
    }
}

/// Returns `false` when the ray misses the ground plane; `result` is left untouched then.
///
/// # Safety
/// `result` must be null or valid for writes of three `f32`.
#[no_mangle]
pub unsafe extern "C" fn rs_camera_manipulator_Manipulator_raycast(
    manipulator: u64,
    x: i32,
    y: i32,
    result: *mut f32,
) -> bool {
    match report(
        "Manipulator_raycast",
        manipulator_raycast(manipulator, x, y),
    ) {
        Some(Some(hit)) => write_vec3(result, hit),
        _ => false,
    }
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Manipulator_grab_begin(
    manipulator: u64,
    x: i32,
    y: i32,
    strafe: bool,
) -> bool {
    report(
        "Manipulator_grab_begin",
        manipulator_grab_begin(manipulator, x, y, strafe),
    )
    .is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Manipulator_grab_update(
    manipulator: u64,
    x: i32,
    y: i32,
) -> bool {
    report(
        "Manipulator_grab_update",
        manipulator_grab_update(manipulator, x, y),
    )
    .is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Manipulator_grab_end(manipulator: u64) -> bool {
    report("Manipulator_grab_end", manipulator_grab_end(manipulator)).is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Manipulator_scroll(
    manipulator: u64,
    x: i32,
    y: i32,
    delta: f32,
) -> bool {
    report(
        "Manipulator_scroll",
        manipulator_scroll(manipulator, x, y, delta),
    )
    .is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Manipulator_key_down(manipulator: u64, key: i32) -> bool {
    report("Manipulator_key_down", manipulator_key_down(manipulator, key)).is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Manipulator_key_up(manipulator: u64, key: i32) -> bool {
    report("Manipulator_key_up", manipulator_key_up(manipulator, key)).is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Manipulator_update(
    manipulator: u64,
    delta_time: f32,
) -> bool {
    report(
        "Manipulator_update",
        manipulator_update(manipulator, delta_time),
    )
    .is_some()
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Manipulator_get_current_bookmark(manipulator: u64) -> u64 {
    report(
        "Manipulator_get_current_bookmark",
        manipulator_get_current_bookmark(manipulator),
    )
    .unwrap_or(0)
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Manipulator_get_home_bookmark(manipulator: u64) -> u64 {
    report(
        "Manipulator_get_home_bookmark",
        manipulator_get_home_bookmark(manipulator),
    )
    .unwrap_or(0)
}

#[no_mangle]
pub extern "C" fn rs_camera_manipulator_Manipulator_jump_to_bookmark(
    manipulator: u64,
    bookmark: u64,
) -> bool {
    report(
        "Manipulator_jump_to_bookmark",
        manipulator_jump_to_bookmark(manipulator, bookmark),
    )
    .is_some()
}
