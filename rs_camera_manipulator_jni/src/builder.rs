use crate::{report_handle, throw_on_error, to_handle};
use jni::{
    objects::JClass,
    sys::{jboolean, jfloat, jint, jlong, JNI_FALSE},
    JNIEnv,
};
use rs_camera_manipulator::ffi::{config::*, manipulator::manipulator_build};

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nCreateBuilder(_: JNIEnv, _: JClass) -> jlong {
    report_handle("nCreateBuilder", config_create().map_err(Into::into))
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nDestroyBuilder(mut env: JNIEnv, _: JClass, builder: jlong) {
    let result = config_destroy(to_handle(builder)).map_err(Into::into);
    throw_on_error(&mut env, "nDestroyBuilder", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderViewport(mut env: JNIEnv, _: JClass, builder: jlong, width: jint, height: jint) {
    let result = config_set_viewport(to_handle(builder), width, height).map_err(Into::into);
    throw_on_error(&mut env, "nBuilderViewport", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderTargetPosition(
    mut env: JNIEnv,
    _: JClass,
    builder: jlong,
    x: jfloat,
    y: jfloat,
    z: jfloat,
) {
    let result =
        config_set_target_position(to_handle(builder), glam::vec3(x, y, z)).map_err(Into::into);
    throw_on_error(&mut env, "nBuilderTargetPosition", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderUpVector(mut env: JNIEnv, _: JClass, builder: jlong, x: jfloat, y: jfloat, z: jfloat) {
    let result = config_set_up_vector(to_handle(builder), glam::vec3(x, y, z)).map_err(Into::into);
    throw_on_error(&mut env, "nBuilderUpVector", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderZoomSpeed(mut env: JNIEnv, _: JClass, builder: jlong, speed: jfloat) {
    let result = config_set_zoom_speed(to_handle(builder), speed).map_err(Into::into);
    throw_on_error(&mut env, "nBuilderZoomSpeed", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderOrbitHomePosition(
    mut env: JNIEnv,
    _: JClass,
    builder: jlong,
    x: jfloat,
    y: jfloat,
    z: jfloat,
) {
    let result =
        config_set_orbit_home_position(to_handle(builder), glam::vec3(x, y, z)).map_err(Into::into);
    throw_on_error(&mut env, "nBuilderOrbitHomePosition", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderOrbitSpeed(mut env: JNIEnv, _: JClass, builder: jlong, x: jfloat, y: jfloat) {
    let result = config_set_orbit_speed(to_handle(builder), glam::vec2(x, y)).map_err(Into::into);
    throw_on_error(&mut env, "nBuilderOrbitSpeed", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderFovDirection(mut env: JNIEnv, _: JClass, builder: jlong, direction: jint) {
    let result = config_set_fov_direction(to_handle(builder), direction).map_err(Into::into);
    throw_on_error(&mut env, "nBuilderFovDirection", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderFovDegrees(mut env: JNIEnv, _: JClass, builder: jlong, degrees: jfloat) {
    let result = config_set_fov_degrees(to_handle(builder), degrees).map_err(Into::into);
    throw_on_error(&mut env, "nBuilderFovDegrees", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderFarPlane(mut env: JNIEnv, _: JClass, builder: jlong, distance: jfloat) {
    let result = config_set_far_plane(to_handle(builder), distance).map_err(Into::into);
    throw_on_error(&mut env, "nBuilderFarPlane", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderMapExtent(mut env: JNIEnv, _: JClass, builder: jlong, width: jfloat, height: jfloat) {
    let result =
        config_set_map_extent(to_handle(builder), glam::vec2(width, height)).map_err(Into::into);
    throw_on_error(&mut env, "nBuilderMapExtent", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderMapMinDistance(mut env: JNIEnv, _: JClass, builder: jlong, distance: jfloat) {
    let result = config_set_map_min_distance(to_handle(builder), distance).map_err(Into::into);
    throw_on_error(&mut env, "nBuilderMapMinDistance", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderGroundPlane(
    mut env: JNIEnv,
    _: JClass,
    builder: jlong,
    a: jfloat,
    b: jfloat,
    c: jfloat,
    d: jfloat,
) {
    let result =
        config_set_ground_plane(to_handle(builder), glam::vec4(a, b, c, d)).map_err(Into::into);
    throw_on_error(&mut env, "nBuilderGroundPlane", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderPanning(mut env: JNIEnv, _: JClass, builder: jlong, enabled: jboolean) {
    let result = config_set_panning(to_handle(builder), enabled != JNI_FALSE).map_err(Into::into);
    throw_on_error(&mut env, "nBuilderPanning", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderFlightStartPosition(
    mut env: JNIEnv,
    _: JClass,
    builder: jlong,
    x: jfloat,
    y: jfloat,
    z: jfloat,
) {
    let result = config_set_flight_start_position(to_handle(builder), glam::vec3(x, y, z))
        .map_err(Into::into);
    throw_on_error(&mut env, "nBuilderFlightStartPosition", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderFlightStartOrientation(
    mut env: JNIEnv,
    _: JClass,
    builder: jlong,
    pitch: jfloat,
    yaw: jfloat,
) {
    let result =
        config_set_flight_start_orientation(to_handle(builder), pitch, yaw).map_err(Into::into);
    throw_on_error(&mut env, "nBuilderFlightStartOrientation", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderFlightMaxMoveSpeed(mut env: JNIEnv, _: JClass, builder: jlong, speed: jfloat) {
    let result = config_set_flight_max_move_speed(to_handle(builder), speed).map_err(Into::into);
    throw_on_error(&mut env, "nBuilderFlightMaxMoveSpeed", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderFlightSpeedSteps(mut env: JNIEnv, _: JClass, builder: jlong, steps: jint) {
    let result = config_set_flight_speed_steps(to_handle(builder), steps).map_err(Into::into);
    throw_on_error(&mut env, "nBuilderFlightSpeedSteps", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderFlightPanSpeed(mut env: JNIEnv, _: JClass, builder: jlong, x: jfloat, y: jfloat) {
    let result =
        config_set_flight_pan_speed(to_handle(builder), glam::vec2(x, y)).map_err(Into::into);
    throw_on_error(&mut env, "nBuilderFlightPanSpeed", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderFlightMoveDamping(mut env: JNIEnv, _: JClass, builder: jlong, damping: jfloat) {
    let result = config_set_flight_move_damping(to_handle(builder), damping).map_err(Into::into);
    throw_on_error(&mut env, "nBuilderFlightMoveDamping", result);
}

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Manipulator")]
pub fn nBuilderBuild(_: JNIEnv, _: JClass, builder: jlong, mode: jint) -> jlong {
    report_handle(
        "nBuilderBuild",
        manipulator_build(to_handle(builder), mode).map_err(Into::into),
    )
}
