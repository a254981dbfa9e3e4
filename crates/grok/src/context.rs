//! Context inference: which model class a component is bound to.
//!
//! A module's context is its single locally defined model, unless the module
//! annotation names one. A class annotation overrides the module context.

use crate::error::GrokError;
use crate::factory::Factory;
use crate::module::{MemberValue, ModuleInfo};
use grok_domain::context::Context;
use grok_domain::interface::TypeRef;
use grok_domain::markers::Markers;
use std::fmt::Display;

/// The module-level context.
#[must_use]
pub fn determine_module_context(module: &ModuleInfo) -> Context {
    if let Some(explicit) = &module.settings().context {
        return Context::Bound(explicit.clone());
    }

    let models = module.local_members().into_iter().filter_map(|member| match &member.value {
        MemberValue::Factory(factory) if factory.markers().is_a(Markers::MODEL) => Some(factory.type_ref()),
        _ => None,
    });
    Context::from_candidates(models)
}

/// The class annotation if present, the module context otherwise.
#[must_use]
pub fn resolve(factory: &Factory, module_context: &Context) -> Context {
    factory.settings.context.clone().map_or_else(|| module_context.clone(), Context::Bound)
}

/// Demands a bound context for `component`.
///
/// # Errors
/// [`GrokError::Configuration`] for [`Context::None`] and [`Context::Ambiguous`].
pub fn check<'a>(component: &dyn Display, context: &'a Context) -> Result<&'a TypeRef, GrokError> {
    match context {
        Context::Bound(type_ref) => Ok(type_ref),
        Context::None => Err(GrokError::configuration(format!(
            "No module-level context for {component}, please use the context annotation."
        ))),
        Context::Ambiguous => Err(GrokError::configuration(format!(
            "Ambiguous context: multiple possible contexts for {component}, \
             please use the context annotation."
        ))),
    }
}

/// [`resolve`] followed by [`check`].
///
/// # Errors
/// See [`check`].
pub fn determine_class_context(factory: &Factory, module_context: &Context) -> Result<TypeRef, GrokError> {
    let context = resolve(factory, module_context);
    check(factory, &context).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::FactorySettings;
    use crate::module::{Member, ModuleSettings};
    use grok_domain::markers::FactoryKind;
    use std::sync::Arc;

    fn factory(name: &str, module: &str, kind: FactoryKind) -> Factory {
        Factory::builder().name(name).module(module).kind(kind).build()
    }

    #[test]
    fn test_single_local_model_binds() {
        let module = ModuleInfo::builder()
            .dotted_name("app")
            .members(vec![
                Member::factory(factory("Page", "app", FactoryKind::Container)),
                Member::factory(factory("Index", "app", FactoryKind::View)),
            ])
            .build();
        assert_eq!(determine_module_context(&module), Context::Bound(TypeRef::class("app.Page")));
    }

    #[test]
    fn test_imported_models_do_not_count() {
        let foreign = Arc::new(factory("Page", "lib", FactoryKind::Model));
        let module = ModuleInfo::builder()
            .dotted_name("app")
            .members(vec![Member::alias("Page", foreign), Member::factory(factory("Note", "app", FactoryKind::Model))])
            .build();
        assert_eq!(determine_module_context(&module), Context::Bound(TypeRef::class("app.Note")));
    }

    #[test]
    fn test_module_annotation_wins_over_ambiguity() {
        let module = ModuleInfo::builder()
            .dotted_name("app")
            .settings(ModuleSettings::builder().context(TypeRef::class("app.B")).build())
            .members(vec![
                Member::factory(factory("A", "app", FactoryKind::Model)),
                Member::factory(factory("B", "app", FactoryKind::Model)),
            ])
            .build();
        assert_eq!(determine_module_context(&module), Context::Bound(TypeRef::class("app.B")));
    }

    #[test]
    fn test_class_annotation_overrides_module_context() {
        let mut view = factory("Index", "app", FactoryKind::View);
        view.settings = FactorySettings::builder().context(TypeRef::class("app.Other")).build();
        let bound = determine_class_context(&view, &Context::Ambiguous).unwrap();
        assert_eq!(bound, TypeRef::class("app.Other"));
    }

    #[test]
    fn test_check_rejects_sentinels() {
        let view = factory("Index", "app", FactoryKind::View);
        let none = determine_class_context(&view, &Context::None).unwrap_err();
        assert!(none.to_string().contains("No module-level context for app.Index,"));
        let ambiguous = determine_class_context(&view, &Context::Ambiguous).unwrap_err();
        assert!(ambiguous.to_string().contains("Ambiguous context"));
        assert_eq!(ambiguous.kind(), "Configuration");
    }
}
