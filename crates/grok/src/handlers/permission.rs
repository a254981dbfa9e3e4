use crate::error::GrokError;
use crate::factory::Instance;
use crate::grokker::{ModuleGrokker, ScanContext};
use grok_domain::interface::Interface;
use std::sync::Arc;

/// Permissions declared with the module-level `define_permission` annotation,
/// registered as utilities named after their id.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionGrokker;

impl ModuleGrokker for PermissionGrokker {
    fn grok(&self, cx: &mut ScanContext<'_>) -> Result<(), GrokError> {
        let module = cx.module;
        for permission in &module.settings().permissions {
            let instance: Instance = Arc::new(permission.clone());
            cx.provide_utility(instance, Interface::PERMISSION, permission.id())?;
        }
        Ok(())
    }
}
