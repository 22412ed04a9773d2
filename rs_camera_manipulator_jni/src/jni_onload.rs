use crate::logger::{self, LoggerConfiguration};

#[no_mangle]
extern "C" fn JNI_OnLoad(_vm: jni::JavaVM, _reserved: *mut std::os::raw::c_void) -> jni::sys::jint {
    logger::init(LoggerConfiguration::default());
    log::trace!("JNI_OnLoad");
    jni::JNIVersion::V6.into()
}
