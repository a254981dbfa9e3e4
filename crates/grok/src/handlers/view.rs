use super::component_name;
use crate::components::{ComponentFactory, RenderStrategy, ViewFactory};
use crate::context;
use crate::error::GrokError;
use crate::factory::Factory;
use crate::grokker::{ClassGrokker, ScanContext};
use crate::registry::Checker;
use crate::template::{default_display_form, default_edit_form};
use grok_domain::constants::INVOKE;
use grok_domain::interface::Interface;
use grok_domain::markers::{FactoryKind, Markers};
use std::borrow::Cow;
use std::sync::Arc;

/// Browser views and forms.
///
/// A view renders either through its own `render` method or through a template
/// named after it (lowercased class name, or the `template` annotation). Forms
/// never define `render` and fall back to a built-in form template.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewGrokker;

impl ClassGrokker for ViewGrokker {
    fn marker(&self) -> Markers {
        Markers::VIEW
    }

    fn grok(&self, cx: &mut ScanContext<'_>, _name: &str, factory: &Arc<Factory>) -> Result<(), GrokError> {
        let view_context = context::determine_class_context(factory, &cx.context)?;
        let strategy = render_strategy(cx, factory)?;
        let factory_name = factory.name.to_lowercase();
        let view_name = component_name(factory, &factory_name).to_owned();

        let view = ComponentFactory::View(Arc::new(ViewFactory::for_class(
            Arc::clone(factory),
            view_name.clone(),
            strategy,
        )));
        cx.provide_adapter(
            view.clone(),
            vec![view_context, Interface::DEFAULT_BROWSER_LAYER.into()],
            Interface::BASE,
            &view_name,
        )?;

        let permission = factory.settings.require.clone().unwrap_or_default();
        cx.define_checker(&view, Checker::Names { names: vec![Cow::Borrowed(INVOKE)], permission })
    }
}

/// Picks the template or `render` method and marks a used template as associated.
fn render_strategy(cx: &mut ScanContext<'_>, factory: &Factory) -> Result<RenderStrategy, GrokError> {
    let factory_name = factory.name.to_lowercase();
    let template_name = factory.settings.template.clone().unwrap_or_else(|| factory_name.clone());

    let shadowed = (template_name != factory_name).then(|| cx.templates.get(&factory_name)).flatten();
    if let Some(shadowed) = shadowed {
        return Err(GrokError::conflict(format!(
            "Multiple possible templates for view {factory}. It uses template('{template_name}'), \
             but there is also a template called '{}'.",
            shadowed.name
        )));
    }

    if factory.kind.is_form() && factory.render {
        return Err(GrokError::configuration(format!(
            "It is not allowed to specify a custom 'render' method for form {factory}. \
             Forms either use the default template or a custom-supplied one."
        )));
    }

    if let Some(template) = cx.templates.get(&template_name).cloned() {
        if factory.render {
            return Err(GrokError::configuration(format!(
                "Multiple possible ways to render view {factory}. \
                 It has both a 'render' method as well as an associated template."
            )));
        }
        cx.templates.mark_associated(&template_name);
        return Ok(RenderStrategy::Template(template));
    }

    if factory.render {
        return Ok(RenderStrategy::Render);
    }

    match factory.kind {
        FactoryKind::EditForm | FactoryKind::AddForm => Ok(RenderStrategy::Template(default_edit_form())),
        FactoryKind::DisplayForm => Ok(RenderStrategy::Template(default_display_form())),
        _ => Err(GrokError::configuration(format!(
            "View {factory} has no associated template or 'render' method."
        ))),
    }
}
