//! This module integrates the native activity with the engine lifecycle:
//! once the platform reports an engine as ready, the host runs the standard
//! configuration sequence and then defensively (re)starts the managed
//! runtime's entrypoint.

use log::debug;

use crate::config_host::ConfigHost;
use crate::engine::EngineHandle;

/// Lifecycle state of one engine attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    Uninitialized,
    Configured,
}

/// Adapter between the android host activity and the managed runtime's
/// execution engine.
#[derive(Debug)]
pub struct HostActivity {
    config: ConfigHost,
    state: HostState,
}

impl HostActivity {
    pub fn create(config: ConfigHost) -> HostActivity {
        HostActivity {
            config,
            state: HostState::Uninitialized,
        }
    }

    /// Invoked on the main thread once the platform has finished
    /// constructing the engine for this activity. The standard
    /// configuration sequence always runs first; a failure there is
    /// returned and the entrypoint is not requested. The entrypoint request
    /// itself is best effort: some devices tear down and recreate the
    /// surface while the engine keeps running, so a rejected redundant
    /// start is expected and gets discarded.
    pub fn on_engine_ready(&mut self, engine: &mut dyn EngineHandle) -> Result<(), String> {
        engine.configure_defaults()?;

        let entrypoint = self.config.entrypoint_descriptor();
        debug!("Requesting execution of entrypoint {:?}", entrypoint.name());
        // No-op if already started.
        let _ = engine.execution_bridge().run_entrypoint(&entrypoint);

        self.state = HostState::Configured;
        Ok(())
    }

    /// Replaces the configuration used for subsequent engine handovers.
    pub fn update_config(&mut self, config: ConfigHost) {
        self.config = config;
    }

    pub fn state(&self) -> HostState {
        self.state
    }

    pub fn is_configured(&self) -> bool {
        self.state == HostState::Configured
    }
}
