use crate::components::ComponentFactory;
use crate::context;
use crate::error::GrokError;
use crate::factory::Factory;
use crate::grokker::{ClassGrokker, ScanContext};
use grok_domain::interface::Interface;
use grok_domain::markers::Markers;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default)]
pub struct TraverserGrokker;

impl ClassGrokker for TraverserGrokker {
    fn marker(&self) -> Markers {
        Markers::TRAVERSER
    }

    fn grok(&self, cx: &mut ScanContext<'_>, _name: &str, factory: &Arc<Factory>) -> Result<(), GrokError> {
        let traverser_context = context::determine_class_context(factory, &cx.context)?;
        cx.provide_adapter(
            ComponentFactory::Class(Arc::clone(factory)),
            vec![traverser_context, Interface::BROWSER_REQUEST.into()],
            Interface::BROWSER_PUBLISHER,
            "",
        )
    }
}
