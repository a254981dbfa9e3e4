//! The scan engine: runs every grokker over a module's members.

use crate::components::{ComponentFactory, ViewFactory};
use crate::context;
use crate::error::GrokError;
use crate::grokker::{GrokkerKind, GrokkerRegistry, ScanContext};
use crate::module::{MemberValue, ModuleInfo, ModuleLoader};
use crate::registry::{Checker, ComponentRegistry, SecurityChecker};
use crate::resources::{FsResources, ResourceProvider};
use crate::template::TemplateRegistry;
use grok_domain::config::ScanConfig;
use grok_domain::constants::MODEL_CLASS;
use grok_domain::interface::{Interface, TypeRef};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, info, info_span};
use typed_builder::TypedBuilder;

/// What a module scan registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub module: String,
    pub adapters: usize,
    pub utilities: usize,
    pub handlers: usize,
    pub checkers: usize,
    pub templates: usize,
    /// Views synthesized from templates no view class claimed.
    pub template_views: usize,
}

/// Scans modules against a component registry.
///
/// ```rust
/// use grok::registry::MemoryRegistry;
/// use grok::scan::ScanEngine;
/// use std::sync::Arc;
///
/// let registry = MemoryRegistry::new();
/// let engine = ScanEngine::builder()
///     .registry(Arc::new(registry.clone()))
///     .checker(Arc::new(registry.clone()))
///     .build();
/// engine.setup().unwrap();
/// assert_eq!(registry.adapter_count(), 1);
/// ```
#[derive(Debug, TypedBuilder)]
pub struct ScanEngine {
    registry: Arc<dyn ComponentRegistry>,
    checker: Arc<dyn SecurityChecker>,
    #[builder(default = Arc::new(FsResources))]
    resources: Arc<dyn ResourceProvider>,
    #[builder(default)]
    grokkers: GrokkerRegistry,
    #[builder(default)]
    config: ScanConfig,
}

impl ScanEngine {
    #[must_use]
    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Registers the default view name: models without an explicit view are published
    /// through the view named by [`ScanConfig::default_view_name`].
    ///
    /// # Errors
    /// Whatever the registry returns.
    pub fn setup(&self) -> Result<(), GrokError> {
        setup(self.registry.as_ref(), &self.config)
    }

    /// Resolves `dotted_name` and scans it, its submodules included when configured.
    ///
    /// # Errors
    /// [`GrokError::Import`] for an unknown name, plus every scan error.
    pub fn grok(&self, dotted_name: &str, loader: &dyn ModuleLoader) -> Result<Vec<ScanReport>, GrokError> {
        let module = loader.resolve(dotted_name)?;
        self.scan_tree(&module)
    }

    /// Scans `module`, then, if it is a package and scanning is recursive, every
    /// submodule depth-first in name order.
    ///
    /// # Errors
    /// The first failing module stops the walk.
    pub fn scan_tree(&self, module: &ModuleInfo) -> Result<Vec<ScanReport>, GrokError> {
        let mut reports = vec![self.scan(module)?];
        if self.config.recursive && module.is_package() {
            let mut submodules: Vec<_> = module.submodules().iter().collect();
            submodules.sort_by(|a, b| a.dotted_name().cmp(b.dotted_name()));
            for submodule in submodules {
                reports.extend(self.scan_tree(submodule)?);
            }
        }
        Ok(reports)
    }

    /// Scans the members defined in `module`.
    ///
    /// Grokkers run by descending priority. A member matched by a grokker is
    /// not offered to later ones unless that grokker continues scanning.
    /// Templates no view claimed become views of their own afterwards.
    ///
    /// # Errors
    /// The first grokker error aborts the module; earlier registrations stay.
    pub fn scan(&self, module: &ModuleInfo) -> Result<ScanReport, GrokError> {
        let span = info_span!("grok", module = module.dotted_name());
        let _enter = span.enter();

        let members = module.local_members();
        let mut claimed = vec![false; members.len()];
        let mut cx = ScanContext {
            module,
            context: context::determine_module_context(module),
            templates: TemplateRegistry::default(),
            registry: self.registry.as_ref(),
            checker: self.checker.as_ref(),
            resources: self.resources.as_ref(),
            config: &self.config,
            report: ScanReport { module: module.dotted_name().to_owned(), ..ScanReport::default() },
        };
        debug!(context = ?cx.context, members = members.len(), "Module context determined");

        for grokker in self.grokkers.ordered() {
            match &grokker.kind {
                GrokkerKind::Module(handler) => handler.grok(&mut cx)?,
                GrokkerKind::Class(handler) => {
                    let marker = handler.marker();
                    for (member, taken) in members.iter().zip(claimed.iter_mut()) {
                        let MemberValue::Factory(factory) = &member.value else { continue };
                        if *taken || !factory.markers().is_a(marker) {
                            continue;
                        }
                        handler.grok(&mut cx, &member.name, factory)?;
                        *taken = !grokker.continue_scanning;
                    }
                },
                GrokkerKind::Instance(handler) => {
                    for (member, taken) in members.iter().zip(claimed.iter_mut()) {
                        let MemberValue::Template(template) = &member.value else { continue };
                        if *taken {
                            continue;
                        }
                        handler.grok(&mut cx, &member.name, template)?;
                        *taken = !grokker.continue_scanning;
                    }
                },
            }
        }

        register_template_views(&mut cx)?;
        cx.report.templates = cx.templates.len();

        let unmatched = members
            .iter()
            .zip(&claimed)
            .filter(|(m, taken)| !**taken && !matches!(m.value, MemberValue::Other { .. }))
            .count();
        if unmatched > 0 {
            debug!(unmatched, "Members left without a matching grokker");
        }
        info!(
            adapters = cx.report.adapters,
            utilities = cx.report.utilities,
            handlers = cx.report.handlers,
            templates = cx.report.templates,
            "Module grokked"
        );
        Ok(cx.report)
    }
}

/// Registers the adapter naming the view models are published through by default.
///
/// # Errors
/// Whatever the registry returns.
pub fn setup(registry: &dyn ComponentRegistry, config: &ScanConfig) -> Result<(), GrokError> {
    let default_view = Cow::Owned(config.default_view_name.clone());
    registry.provide_adapter(
        ComponentFactory::Value(default_view),
        vec![TypeRef::class(MODEL_CLASS), Interface::BROWSER_REQUEST.into()],
        Interface::DEFAULT_VIEW_NAME,
        "",
    )?;
    info!(view = %config.default_view_name, "Default view name registered");
    Ok(())
}

/// Registers a view for each template no view claimed, named after the template.
fn register_template_views(cx: &mut ScanContext<'_>) -> Result<(), GrokError> {
    for (name, template) in cx.templates.list_unassociated() {
        let context = context::check(&template, &cx.context)?.clone();
        let view = ViewFactory::for_template(cx.module.dotted_name(), template);
        let view = ComponentFactory::View(Arc::new(view));
        cx.templates.mark_associated(&name);
        let adapts = vec![context, Interface::DEFAULT_BROWSER_LAYER.into()];
        cx.provide_adapter(view.clone(), adapts, Interface::BASE, &name)?;
        cx.define_checker(&view, Checker::NoProxy)?;
        cx.report.template_views += 1;
    }
    Ok(())
}
