use crate::{throw_on_error, to_handle};
use jni::{objects::JClass, sys::jlong, JNIEnv};
use rs_camera_manipulator::ffi::bookmark::bookmark_destroy;

#[jni_fn::jni_fn("com.google.android.filament.gltfio.Bookmark")]
pub fn nDestroyBookmark(mut env: JNIEnv, _: JClass, bookmark: jlong) {
    let result = bookmark_destroy(to_handle(bookmark)).map_err(Into::into);
    throw_on_error(&mut env, "nDestroyBookmark", result);
}
