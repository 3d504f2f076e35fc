#![cfg(target_os = "android")]

use jni::objects::{GlobalRef, JObject, JString};
use jni::{AttachGuard, JavaVM};
use std::ops::Deref;
use std::path::PathBuf;

const J_STRING: &str = "()Ljava/lang/String;";
const J_FILE: &str = "()Ljava/io/File;";

/// Handle to the android context that hosts the shell, resolved through the
/// ndk context the activity publishes on startup.
pub(crate) struct ActivityContext {
    ctx: JObject<'static>,
    vm: JavaVM,
}

impl ActivityContext {
    pub(crate) fn create() -> Result<ActivityContext, String> {
        let ctx = ndk_context::android_context();
        let obj = unsafe { JObject::from_raw(ctx.context().cast()) };
        let vm = (unsafe { JavaVM::from_raw(ctx.vm().cast()) })
            .map_err(|e| format!("Could not get JavaVM from raw: {e}"))?;
        Ok(ActivityContext { ctx: obj, vm })
    }

    /// Returns the app-private files directory, where the host keeps its
    /// configuration file.
    pub(crate) fn files_dir(&self) -> Result<PathBuf, String> {
        let files_dir_obj = self.call_ctx_method("getFilesDir", J_FILE)?;
        let abs_path_ref = self.call_method(files_dir_obj, "getAbsolutePath", J_STRING)?;
        Ok(PathBuf::from(self.global_ref_to_string(abs_path_ref)?))
    }

    fn call_ctx_method(&self, name: &str, sig: &str) -> Result<GlobalRef, String> {
        self.call_method(&self.ctx, name, sig)
    }

    fn call_method<'a, O>(&self, obj: O, name: &str, sig: &str) -> Result<GlobalRef, String>
    where
        O: AsRef<JObject<'a>>,
    {
        let mut env = self.get_env()?;
        let call_result = env.call_method(obj, name, sig, &[]);
        let result = call_result
            .map_err(|e| {
                crate::android::clear_pending_exception(&env);
                format!("Could not call {name}: {e}")
            })?
            .l()
            .map_err(|e| format!("Could not unwrap result of {name}: {e}"))?;
        env.new_global_ref(result).map_err(|e| {
            crate::android::clear_pending_exception(&env);
            format!("Could not create global ref: {e}")
        })
    }

    fn global_ref_to_string(&self, global_ref: GlobalRef) -> Result<String, String> {
        let mut env = self.get_env()?;
        let j_str: &JString = global_ref
            .deref()
            .try_into()
            .map_err(|e| format!("Could not convert global ref to java string: {e:?}"))?;
        let string = env.get_string(j_str).map_err(|e| {
            crate::android::clear_pending_exception(&env);
            format!("Could not get java string: {e}")
        })?;
        Ok(string.into())
    }

    fn get_env(&self) -> Result<AttachGuard, String> {
        self.vm
            .attach_current_thread()
            .map_err(|e| format!("Could not attach vm to current thread: {e}"))
    }
}
