use crate::components::{ComponentFactory, DirectoryResource};
use crate::error::GrokError;
use crate::grokker::{ModuleGrokker, ScanContext};
use grok_domain::interface::Interface;
use std::sync::Arc;
use tracing::trace;

/// Serves a package's `static` directory under the package's dotted name.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticResourcesGrokker;

impl ModuleGrokker for StaticResourcesGrokker {
    fn grok(&self, cx: &mut ScanContext<'_>) -> Result<(), GrokError> {
        let module = cx.module;
        if !module.is_package() {
            return Ok(());
        }

        let directory = cx.config.static_directory.clone();
        if !cx.resources.is_directory(module, &directory) {
            trace!(directory = %directory, "No static resource directory");
            return Ok(());
        }

        if let Some(submodule) = module.submodule(&directory) {
            let message = if submodule.is_package() {
                format!("The '{directory}' resource directory must not be a package.")
            } else {
                format!(
                    "A package can not contain both a '{directory}' resource directory \
                     and a module named '{directory}'."
                )
            };
            return Err(GrokError::conflict(message));
        }

        let name = module.dotted_name();
        let resource = DirectoryResource { name: name.to_owned(), path: cx.resources.location(module, &directory) };
        cx.provide_adapter(
            ComponentFactory::Directory(Arc::new(resource)),
            vec![Interface::DEFAULT_BROWSER_LAYER.into()],
            Interface::BASE,
            name,
        )
    }
}
