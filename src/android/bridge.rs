#![cfg(target_os = "android")]

use jni::objects::{JObject, JString, JValue, JValueOwned};
use jni::JNIEnv;

use crate::android::clear_pending_exception;
use crate::engine::{EngineHandle, EntrypointDescriptor, ExecutionBridge};

const DESCRIPTOR_CLASS: &str = "app/brightside/runtime/EntrypointDescriptor";

const J_GET_EXECUTION_BRIDGE: &str = "()Lapp/brightside/runtime/ExecutionBridge;";
const J_RUN_ENTRYPOINT: &str = "(Lapp/brightside/runtime/EntrypointDescriptor;)V";
const J_CREATE_DEFAULT: &str = "()Lapp/brightside/runtime/EntrypointDescriptor;";
const J_DESCRIPTOR_CTOR: &str = "(Ljava/lang/String;Ljava/lang/String;)V";
const J_VOID: &str = "()V";

/// Engine handle that forwards every call to the java engine object the
/// activity was handed. Only valid for the duration of one JNI callback.
pub(crate) struct JniEngineHandle<'a, 'local> {
    env: &'a mut JNIEnv<'local>,
    engine: &'a JObject<'local>,
}

impl<'a, 'local> JniEngineHandle<'a, 'local> {
    pub(crate) fn create(
        env: &'a mut JNIEnv<'local>,
        engine: &'a JObject<'local>,
    ) -> JniEngineHandle<'a, 'local> {
        JniEngineHandle { env, engine }
    }

    fn call_engine_method(&mut self, name: &str, sig: &str) -> Result<JValueOwned<'local>, String> {
        let result = self.env.call_method(self.engine, name, sig, &[]);
        result.map_err(|e| self.jni_error(&format!("call {name}"), e))
    }

    fn new_descriptor(
        &mut self,
        entrypoint: &EntrypointDescriptor,
    ) -> Result<JObject<'local>, String> {
        if entrypoint.is_default() {
            return self
                .env
                .call_static_method(DESCRIPTOR_CLASS, "createDefault", J_CREATE_DEFAULT, &[])
                .and_then(|value| value.l())
                .map_err(|e| self.jni_error("call createDefault", e));
        }

        let name = self.new_string(entrypoint.name())?;
        let library = match entrypoint.library() {
            Some(library) => self.new_string(library)?.into(),
            None => JObject::null(),
        };

        let ctor_result = self.env.new_object(
            DESCRIPTOR_CLASS,
            J_DESCRIPTOR_CTOR,
            &[JValue::from(&name), JValue::from(&library)],
        );
        ctor_result.map_err(|e| self.jni_error("create the entrypoint descriptor", e))
    }

    fn new_string(&self, string: &str) -> Result<JString<'local>, String> {
        self.env.new_string(string).map_err(|e| {
            clear_pending_exception(&*self.env);
            format!("Could not create java string: {e}")
        })
    }

    fn jni_error(&mut self, action: &str, err: jni::errors::Error) -> String {
        clear_pending_exception(self.env);
        format!("Could not {action}: {err}")
    }
}

impl EngineHandle for JniEngineHandle<'_, '_> {
    fn configure_defaults(&mut self) -> Result<(), String> {
        self.call_engine_method("applyDefaultConfiguration", J_VOID).map(|_| ())
    }

    fn execution_bridge(&mut self) -> &mut dyn ExecutionBridge {
        self
    }
}

impl ExecutionBridge for JniEngineHandle<'_, '_> {
    fn run_entrypoint(&mut self, entrypoint: &EntrypointDescriptor) -> Result<(), String> {
        let bridge = self
            .call_engine_method("getExecutionBridge", J_GET_EXECUTION_BRIDGE)?
            .l()
            .map_err(|e| format!("Could not unwrap the execution bridge: {e}"))?;
        if bridge.as_raw().is_null() {
            return Err("Engine returned no execution bridge".to_string());
        }

        let descriptor = self.new_descriptor(entrypoint)?;
        let call_result = self.env.call_method(
            &bridge,
            "runEntrypoint",
            J_RUN_ENTRYPOINT,
            &[JValue::from(&descriptor)],
        );
        call_result.map(|_| ()).map_err(|e| self.jni_error("call runEntrypoint", e))
    }
}
