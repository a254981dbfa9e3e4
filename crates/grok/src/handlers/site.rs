use crate::error::GrokError;
use crate::factory::Factory;
use crate::grokker::{ClassGrokker, ScanContext};
use crate::site::LocalUtilitySubscriber;
use grok_domain::interface::Interface;
use grok_domain::markers::Markers;
use std::sync::Arc;
use tracing::debug;

/// Defers local utility installation until a site instance is added to a container.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteGrokker;

impl ClassGrokker for SiteGrokker {
    fn marker(&self) -> Markers {
        Markers::SITE
    }

    fn grok(&self, cx: &mut ScanContext<'_>, _name: &str, factory: &Arc<Factory>) -> Result<(), GrokError> {
        let infos = &factory.settings.local_utilities;
        if infos.is_empty() {
            debug!(site = %factory, "Site without local utilities");
            return Ok(());
        }
        let subscriber = LocalUtilitySubscriber::new(infos);
        cx.provide_handler(subscriber.into_handler(), vec![factory.type_ref(), Interface::OBJECT_ADDED_EVENT.into()])
    }
}
