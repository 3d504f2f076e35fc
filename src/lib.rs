//! Exposes the modules that make up the android host layer of the
//! Brightside shell: the activity adapter, the engine seam and the JNI
//! bindings that connect the two on device

/// contains the JNI bindings that the android host activity calls into
#[cfg(target_os = "android")]
pub mod android;
/// common functionality used by the host adapter and the android bindings
pub mod common;
/// data structures for loading the optional host configuration file
pub mod config_host;
/// seam to the managed runtime's engine API
pub mod engine;
/// responsible for configuring a freshly attached engine and for
///  defensively (re)starting the managed runtime's entrypoint
pub mod host;
