use super::{component_name, provided_interface};
use crate::error::GrokError;
use crate::factory::Factory;
use crate::grokker::{ClassGrokker, ModuleGrokker, ScanContext};
use grok_domain::markers::Markers;
use std::sync::Arc;

/// Global utility classes: instantiated once and registered under their provided interface.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalUtilityGrokker;

impl ClassGrokker for GlobalUtilityGrokker {
    fn marker(&self) -> Markers {
        Markers::GLOBAL_UTILITY
    }

    fn grok(&self, cx: &mut ScanContext<'_>, _name: &str, factory: &Arc<Factory>) -> Result<(), GrokError> {
        let provides = provided_interface(factory)?;
        let name = component_name(factory, "");
        cx.provide_utility(factory.instantiate()?, provides, name)
    }
}

/// Utilities declared with the module-level `global_utility` annotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalUtilityDirectiveGrokker;

impl ModuleGrokker for GlobalUtilityDirectiveGrokker {
    fn grok(&self, cx: &mut ScanContext<'_>) -> Result<(), GrokError> {
        let module = cx.module;
        for info in &module.settings().global_utilities {
            cx.provide_utility(info.constructor.construct(), info.provides.clone(), &info.name)?;
        }
        Ok(())
    }
}
