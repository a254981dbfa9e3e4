use crate::error::GrokError;
use crate::grokker::{ModuleGrokker, ScanContext};

/// Handlers declared with the module-level `subscribe` annotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubscriberGrokker;

impl ModuleGrokker for SubscriberGrokker {
    fn grok(&self, cx: &mut ScanContext<'_>) -> Result<(), GrokError> {
        let module = cx.module;
        for subscriber in &module.settings().subscribers {
            cx.provide_handler(subscriber.handler.clone(), subscriber.adapts.clone())?;
        }
        Ok(())
    }
}
