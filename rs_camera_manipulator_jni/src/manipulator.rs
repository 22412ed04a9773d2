use crate::{error::Result, report_handle, throw_on_error, to_handle, write_vec3};
use jni::{
    objects::{JClass, JFloatArray, JObject},
    sys::{jfloat, jint, jlong},
    JNIEnv,
};
use rs_camera_manipulator::ffi::manipulator::*;

/// Unboxes a `java.lang.Boolean`. A null reference reads as `false`.
fn boolean_value(env: &mut JNIEnv, value: &JObject) -> Result<bool> {
    if value.is_null() {
        return Ok(false);
    }
    let value = env.call_method(value, "booleanValue", "()Z", &[])?.z()?;
    Ok(value)
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nDestroyManipulator(mut env: JNIEnv, _: JClass, manipulator: jlong) {
    let result = manipulator_destroy(to_handle(manipulator)).map_err(Into::into);
    throw_on_error(&mut env, "nDestroyManipulator", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nGetMode(mut env: JNIEnv, _: JClass, manipulator: jlong) -> jint {
    let result = manipulator_get_mode(to_handle(manipulator)).map_err(Into::into);
    throw_on_error(&mut env, "nGetMode", result)
        .map(|mode| mode as jint)
        .unwrap_or(-1)
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nSetViewport(mut env: JNIEnv, _: JClass, manipulator: jlong, width: jint, height: jint) {
    let result =
        manipulator_set_viewport(to_handle(manipulator), width, height).map_err(Into::into);
    throw_on_error(&mut env, "nSetViewport", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nGetLookAt(
    mut env: JNIEnv,
    _: JClass,
    manipulator: jlong,
    eye_position: JFloatArray,
    target_position: JFloatArray,
    upward: JFloatArray,
) {
    let result = (|| -> Result<()> {
        let look_at = manipulator_get_look_at(to_handle(manipulator))?;
        write_vec3(&mut env, &eye_position, look_at.eye)?;
        write_vec3(&mut env, &target_position, look_at.target)?;
        write_vec3(&mut env, &upward, look_at.upward)?;
        Ok(())
    })();
    throw_on_error(&mut env, "nGetLookAt", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nRaycast(
    mut env: JNIEnv,
    _: JClass,
    manipulator: jlong,
    x: jint,
    y: jint,
    result: JFloatArray,
) {
    let outcome = (|| -> Result<()> {
        match manipulator_raycast(to_handle(manipulator), x, y)? {
            Some(hit) => write_vec3(&mut env, &result, hit),
            None => {
                log::trace!("nRaycast: miss at ({x}, {y})");
                Ok(())
            }
        }
    })();
    throw_on_error(&mut env, "nRaycast", outcome);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nGrabBegin(
    mut env: JNIEnv,
    _: JClass,
    manipulator: jlong,
    x: jint,
    y: jint,
    strafe: JObject,
) {
    let result = (|| -> Result<()> {
        let strafe = boolean_value(&mut env, &strafe)?;
        manipulator_grab_begin(to_handle(manipulator), x, y, strafe)?;
        Ok(())
    })();
    throw_on_error(&mut env, "nGrabBegin", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nGrabUpdate(mut env: JNIEnv, _: JClass, manipulator: jlong, x: jint, y: jint) {
    let result = manipulator_grab_update(to_handle(manipulator), x, y).map_err(Into::into);
    throw_on_error(&mut env, "nGrabUpdate", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nGrabEnd(mut env: JNIEnv, _: JClass, manipulator: jlong, _x: jint, _y: jint) {
    let result = manipulator_grab_end(to_handle(manipulator)).map_err(Into::into);
    throw_on_error(&mut env, "nGrabEnd", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nZoom(mut env: JNIEnv, _: JClass, manipulator: jlong, x: jint, y: jint, delta: jfloat) {
    let result = manipulator_scroll(to_handle(manipulator), x, y, delta).map_err(Into::into);
    throw_on_error(&mut env, "nZoom", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nKeyDown(mut env: JNIEnv, _: JClass, manipulator: jlong, key: jint) {
    let result = manipulator_key_down(to_handle(manipulator), key).map_err(Into::into);
    throw_on_error(&mut env, "nKeyDown", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nKeyUp(mut env: JNIEnv, _: JClass, manipulator: jlong, key: jint) {
    let result = manipulator_key_up(to_handle(manipulator), key).map_err(Into::into);
    throw_on_error(&mut env, "nKeyUp", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nUpdate(mut env: JNIEnv, _: JClass, manipulator: jlong, delta_time: jfloat) {
    let result = manipulator_update(to_handle(manipulator), delta_time).map_err(Into::into);
    throw_on_error(&mut env, "nUpdate", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nGetCurrentBookmark(_: JNIEnv, _: JClass, manipulator: jlong) -> jlong {
    report_handle(
        "nGetCurrentBookmark",
        manipulator_get_current_bookmark(to_handle(manipulator)).map_err(Into::into),
    )
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nGetHomeBookmark(_: JNIEnv, _: JClass, manipulator: jlong) -> jlong {
    report_handle(
        "nGetHomeBookmark",
        manipulator_get_home_bookmark(to_handle(manipulator)).map_err(Into::into),
    )
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nJumpToBookmark(mut env: JNIEnv, _: JClass, manipulator: jlong, bookmark: jlong) {
    let result = manipulator_jump_to_bookmark(to_handle(manipulator), to_handle(bookmark))
        .map_err(Into::into);
    throw_on_error(&mut env, "nJumpToBookmark", result);
}
