use crate::components::ComponentFactory;
use crate::error::GrokError;
use crate::factory::Factory;
use crate::grokker::{ClassGrokker, ScanContext};
use crate::registry::Checker;
use grok_domain::markers::Markers;
use std::sync::Arc;

/// Models are trusted: their instances are never wrapped in security proxies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelGrokker;

impl ClassGrokker for ModelGrokker {
    fn marker(&self) -> Markers {
        Markers::MODEL
    }

    fn grok(&self, cx: &mut ScanContext<'_>, _name: &str, factory: &Arc<Factory>) -> Result<(), GrokError> {
        cx.define_checker(&ComponentFactory::Class(Arc::clone(factory)), Checker::NoProxy)
    }
}
