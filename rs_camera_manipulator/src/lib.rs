//! Camera manipulator (orbit, map and free-flight modes) behind an opaque-handle binding layer.
//!
//! Clients feed mouse or touch events to a [`manipulator::Manipulator`] and
//! periodically read its look-at basis to place their camera.

pub mod bookmark;
pub mod config;
pub mod error;
pub mod ffi;
pub mod handle;
pub mod manipulator;
pub mod plane_3d;
