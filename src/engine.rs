//! This module defines the seam to the managed runtime's engine API. The
//! host layer only ever reaches the engine through the two capabilities
//! declared here: applying the platform's default configuration and asking
//! the execution bridge to run an entrypoint.

pub const DEFAULT_ENTRYPOINT: &str = "main";

/// Opaque token identifying which managed-runtime entry function to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrypointDescriptor {
    name: String,
    library: Option<String>,
}

impl EntrypointDescriptor {
    /// Descriptor for the runtime's default entry function.
    pub fn create_default() -> EntrypointDescriptor {
        EntrypointDescriptor {
            name: DEFAULT_ENTRYPOINT.to_string(),
            library: None,
        }
    }

    pub fn create(name: &str, library: Option<&str>) -> EntrypointDescriptor {
        EntrypointDescriptor {
            name: name.to_string(),
            library: library.map(str::to_string),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn library(&self) -> Option<&str> {
        self.library.as_deref()
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_ENTRYPOINT && self.library.is_none()
    }
}

/// The engine's interface for starting or resuming managed code execution.
pub trait ExecutionBridge {
    /// Begin or resume executing the given entrypoint. Fails if the engine
    /// rejects the request, e.g. because the entrypoint is already running.
    fn run_entrypoint(&mut self, entrypoint: &EntrypointDescriptor) -> Result<(), String>;
}

/// Live handle to the managed runtime's execution engine, handed over by the
/// platform for the duration of one lifecycle callback.
pub trait EngineHandle {
    /// The platform's standard configuration sequence for a freshly
    /// attached engine.
    fn configure_defaults(&mut self) -> Result<(), String>;

    fn execution_bridge(&mut self) -> &mut dyn ExecutionBridge;
}

#[cfg(test)]
mod tests {
    use crate::engine::{EntrypointDescriptor, DEFAULT_ENTRYPOINT};

    #[test]
    fn test_create_default() {
        let descriptor = EntrypointDescriptor::create_default();

        assert_eq!(descriptor.name(), DEFAULT_ENTRYPOINT);
        assert_eq!(descriptor.library(), None);
        assert!(descriptor.is_default());
    }

    #[test]
    fn test_create_with_library() {
        let descriptor =
            EntrypointDescriptor::create("backgroundSync", Some("package:brightside/sync"));

        assert_eq!(descriptor.name(), "backgroundSync");
        assert_eq!(descriptor.library(), Some("package:brightside/sync"));
        assert!(!descriptor.is_default());
    }

    #[test]
    fn test_default_name_with_library_is_not_default() {
        let descriptor =
            EntrypointDescriptor::create(DEFAULT_ENTRYPOINT, Some("package:brightside/dev"));

        assert!(!descriptor.is_default());
    }
}
