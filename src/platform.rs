use crate::config::ExportConfig;
use crate::permission::{BrowserPermission, LibraryPermission, PermissionGate};

/// Capability flag deciding how the composite is exported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Desktop build, exports into the photo library
    Native,
    /// Web build, exports as a file download
    Browser,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Platform::Browser
        } else {
            Platform::Native
        }
    }

    /// Whether the composite can be written to a local file and the photo library
    pub fn has_native_capture(self) -> bool {
        self == Platform::Native
    }

    /// The permission gate matching this platform's export path
    pub fn permission_gate(self, config: &ExportConfig) -> Box<dyn PermissionGate> {
        if self.has_native_capture() {
            Box::new(LibraryPermission::new(config.resolve_library_dir()))
        } else {
            Box::new(BrowserPermission)
        }
    }
}
