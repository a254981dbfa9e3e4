use crate::components::{ComponentFactory, MethodView};
use crate::context;
use crate::error::GrokError;
use crate::factory::Factory;
use crate::grokker::{ClassGrokker, ScanContext};
use crate::registry::Checker;
use grok_domain::constants::INVOKE;
use grok_domain::interface::Interface;
use grok_domain::markers::Markers;
use std::borrow::Cow;
use std::sync::Arc;

/// Publishes every public method of an XML-RPC class as a view of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlRpcGrokker;

impl ClassGrokker for XmlRpcGrokker {
    fn marker(&self) -> Markers {
        Markers::XMLRPC
    }

    fn grok(&self, cx: &mut ScanContext<'_>, _name: &str, factory: &Arc<Factory>) -> Result<(), GrokError> {
        let view_context = context::determine_class_context(factory, &cx.context)?;
        let permission = factory.settings.require.clone().unwrap_or_default();

        for method in factory.public_methods() {
            let view = ComponentFactory::Method(Arc::new(MethodView {
                factory: Arc::clone(factory),
                method: method.to_owned(),
            }));
            cx.provide_adapter(
                view.clone(),
                vec![view_context.clone(), Interface::XMLRPC_REQUEST.into()],
                Interface::BASE,
                method,
            )?;
            let checker = Checker::Names { names: vec![Cow::Borrowed(INVOKE)], permission: permission.clone() };
            cx.define_checker(&view, checker)?;
        }
        Ok(())
    }
}
