//! JNI bindings for the android host activity. The Java side owns the
//! activity and the engine; this module receives the lifecycle callbacks,
//! keeps per-engine attachment state and drives the host adapter.

/// JNI-backed implementation of the engine seam
pub mod bridge;
/// small JNI helper for reaching the android context that hosts the shell
pub mod util;

use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use jni::objects::{JObject, JValue};
use jni::JNIEnv;
use log::{debug, error};

use crate::android::bridge::JniEngineHandle;
use crate::common::{init_logging, panic_message, DEFAULT_LOG_LEVEL};
use crate::config_host::{get_conf_dir, ConfigHost};
use crate::host::HostActivity;

// One adapter per live engine. The platform can hand the same engine over
// again after a surface recreation, so attachment state is keyed by the
// engine's identity.
static ATTACHMENTS: LazyLock<Mutex<BTreeMap<i32, HostActivity>>> =
    LazyLock::new(|| Mutex::new(BTreeMap::new()));

// The attachment map stays usable even after a panic poisoned the lock.
fn lock_attachments() -> MutexGuard<'static, BTreeMap<i32, HostActivity>> {
    ATTACHMENTS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Called by app.brightside.host.HostActivity once the platform has
/// finished constructing the engine for this activity.
#[no_mangle]
pub extern "system" fn Java_app_brightside_host_HostActivity_nativeEngineReady<'local>(
    mut env: JNIEnv<'local>,
    _activity: JObject<'local>,
    engine: JObject<'local>,
) {
    match catch_unwind(AssertUnwindSafe(|| engine_ready(&mut env, &engine))) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            error!("Could not configure engine: {e}");
            throw(&mut env, "java/lang/IllegalStateException", &e);
        }
        // Unwinding across the JNI boundary is undefined behavior.
        Err(panic) => {
            let msg = panic_message(panic.as_ref());
            error!("Panic while configuring engine: {msg}");
            throw(&mut env, "java/lang/RuntimeException", &msg);
        }
    }
}

/// Called when the activity detaches from its engine for good; drops the
/// attachment state kept for that engine.
#[no_mangle]
pub extern "system" fn Java_app_brightside_host_HostActivity_nativeEngineDetached<'local>(
    mut env: JNIEnv<'local>,
    _activity: JObject<'local>,
    engine: JObject<'local>,
) {
    let _ = catch_unwind(AssertUnwindSafe(|| match engine_detached(&mut env, &engine) {
        Ok(()) => {}
        Err(e) => error!("Could not detach engine: {e}"),
    }));
}

fn engine_ready<'local>(env: &mut JNIEnv<'local>, engine: &JObject<'local>) -> Result<(), String> {
    init_logging(DEFAULT_LOG_LEVEL);
    if engine.as_raw().is_null() {
        return Err("Engine handle is null".to_string());
    }

    let config = ConfigHost::load_or_default(&get_conf_dir());
    init_logging(&config.log_level);

    let key = identity_hash_code(env, engine)?;
    // The adapter is taken out of the registry while the callback runs. The
    // engine call can dispatch further lifecycle callbacks synchronously,
    // and those must not find the lock held.
    let mut host = match lock_attachments().remove(&key) {
        Some(mut host) => {
            debug!("Engine {key} handed over again, reconfiguring");
            host.update_config(config);
            host
        }
        None => HostActivity::create(config),
    };

    let result = host.on_engine_ready(&mut JniEngineHandle::create(env, engine));
    lock_attachments().insert(key, host);
    result
}

fn engine_detached(env: &mut JNIEnv, engine: &JObject) -> Result<(), String> {
    let key = identity_hash_code(env, engine)?;
    if lock_attachments().remove(&key).is_some() {
        debug!("Engine {key} detached");
    }
    Ok(())
}

fn identity_hash_code(env: &mut JNIEnv, obj: &JObject) -> Result<i32, String> {
    let result = env
        .call_static_method(
            "java/lang/System",
            "identityHashCode",
            "(Ljava/lang/Object;)I",
            &[JValue::from(obj)],
        )
        .and_then(|value| value.i());

    result.map_err(|e| {
        clear_pending_exception(env);
        format!("Could not get the engine identity: {e}")
    })
}

// A failed JNI call can leave a java exception pending, which must be
// cleared before the next JNI call and before control returns to the VM.
pub(crate) fn clear_pending_exception(env: &JNIEnv) {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_clear();
    }
}

fn throw(env: &mut JNIEnv, class: &str, msg: &str) {
    clear_pending_exception(env);
    if env.throw_new(class, msg).is_err() {
        error!("Could not throw {class}: {msg}");
    }
}
