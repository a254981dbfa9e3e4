use super::{component_name, provided_interface};
use crate::components::ComponentFactory;
use crate::context;
use crate::error::GrokError;
use crate::factory::Factory;
use crate::grokker::{ClassGrokker, ScanContext};
use grok_domain::markers::Markers;
use std::sync::Arc;

/// Single adapters: adapt the resolved context to the provided interface.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdapterGrokker;

impl ClassGrokker for AdapterGrokker {
    fn marker(&self) -> Markers {
        Markers::ADAPTER
    }

    fn grok(&self, cx: &mut ScanContext<'_>, _name: &str, factory: &Arc<Factory>) -> Result<(), GrokError> {
        let adapter_context = context::determine_class_context(factory, &cx.context)?;
        let provides = provided_interface(factory)?;
        let name = component_name(factory, "");
        cx.provide_adapter(ComponentFactory::Class(Arc::clone(factory)), vec![adapter_context], provides, name)
    }
}

/// Multi-adapters: adapt the declared `adapts` list, ignoring any context.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiAdapterGrokker;

impl ClassGrokker for MultiAdapterGrokker {
    fn marker(&self) -> Markers {
        Markers::MULTI_ADAPTER
    }

    fn grok(&self, cx: &mut ScanContext<'_>, _name: &str, factory: &Arc<Factory>) -> Result<(), GrokError> {
        let provides = provided_interface(factory)?;
        if factory.adapts.is_empty() {
            return Err(GrokError::configuration(format!(
                "{factory} must specify which contexts it adapts (use the adapts annotation to specify)."
            )));
        }
        let name = component_name(factory, "");
        cx.provide_adapter(ComponentFactory::Class(Arc::clone(factory)), factory.adapts.clone(), provides, name)
    }
}

#[cfg(test)]
mod tests {
    use super::super::provided_interface;
    use crate::factory::{Factory, FactorySettings};
    use grok_domain::interface::Interface;
    use grok_domain::markers::FactoryKind;

    fn adapter(implements: Vec<Interface>) -> Factory {
        Factory::builder().name("Sized").module("app").kind(FactoryKind::Adapter).implements(implements).build()
    }

    #[test]
    fn test_provided_interface_inference() {
        assert_eq!(provided_interface(&adapter(vec![Interface::new("ISized")])).unwrap(), Interface::new("ISized"));
        assert_eq!(provided_interface(&adapter(vec![])).unwrap_err().kind(), "Configuration");

        let two = adapter(vec![Interface::new("ISized"), Interface::new("IOther")]);
        assert_eq!(provided_interface(&two).unwrap_err().kind(), "Conflict");

        let mut explicit = two;
        explicit.settings = FactorySettings::builder().provides(Interface::new("IOther")).build();
        assert_eq!(provided_interface(&explicit).unwrap(), Interface::new("IOther"));
    }
}
