use crate::error::GrokError;
use crate::grokker::{InstanceGrokker, ModuleGrokker, ScanContext};
use crate::template::{BoundTemplate, PageTemplate};
use std::sync::Arc;
use tracing::debug;

/// Templates bound in the module namespace, registered under their binding name.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineTemplateGrokker;

impl InstanceGrokker for InlineTemplateGrokker {
    fn grok(&self, cx: &mut ScanContext<'_>, name: &str, template: &Arc<PageTemplate>) -> Result<(), GrokError> {
        let bound = BoundTemplate::inline(name, Arc::clone(template));
        cx.templates.register(name, Arc::new(bound))
    }
}

/// Template files in the module's resource directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemTemplateGrokker;

impl ModuleGrokker for FilesystemTemplateGrokker {
    fn grok(&self, cx: &mut ScanContext<'_>) -> Result<(), GrokError> {
        let config = cx.config;
        let found = cx.templates.find_filesystem(cx.module, cx.resources, &config.template_extension)?;
        if found > 0 {
            debug!(found, "Templates loaded from resource directory");
        }
        Ok(())
    }
}
