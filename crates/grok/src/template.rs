//! Page templates and the per-module template registry.

use crate::error::{GrokError, GrokErrorExt};
use crate::module::ModuleInfo;
use crate::resources::{ResourceProvider, stays_inside};
use fxhash::FxHashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};
use tracing::{debug, trace};

const DEFAULT_EDIT_FORM: &str = r#"<form action="." method="post" enctype="multipart/form-data">
  <h1 tal:condition="view/label" tal:content="view/label">Label</h1>
  <div tal:repeat="widget view/widgets">
    <label tal:attributes="for widget/name" tal:content="widget/label">Label</label>
    <div tal:replace="structure widget">Widget</div>
  </div>
  <div class="actions">
    <span tal:repeat="action view/actions" tal:replace="structure action/render">Action</span>
  </div>
</form>
"#;

const DEFAULT_DISPLAY_FORM: &str = r#"<table class="listing">
  <tr tal:repeat="widget view/widgets">
    <td class="label" tal:content="widget/label">Label</td>
    <td class="field" tal:content="structure widget">Value</td>
  </tr>
</table>
"#;

static EDIT_FORM_TEMPLATE: LazyLock<Arc<BoundTemplate>> =
    LazyLock::new(|| builtin("default_edit_form", DEFAULT_EDIT_FORM));
static DISPLAY_FORM_TEMPLATE: LazyLock<Arc<BoundTemplate>> =
    LazyLock::new(|| builtin("default_display_form", DEFAULT_DISPLAY_FORM));

fn builtin(name: &str, source: &str) -> Arc<BoundTemplate> {
    Arc::new(BoundTemplate {
        name: name.to_owned(),
        origin: TemplateOrigin::Builtin,
        template: Arc::new(PageTemplate::new(source, "grok")),
    })
}

/// Template used by edit and add forms without one of their own.
#[must_use]
pub fn default_edit_form() -> Arc<BoundTemplate> {
    Arc::clone(&EDIT_FORM_TEMPLATE)
}

/// Template used by display forms without one of their own.
#[must_use]
pub fn default_display_form() -> Arc<BoundTemplate> {
    Arc::clone(&DISPLAY_FORM_TEMPLATE)
}

/// Template markup, kept as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTemplate {
    source: String,
    module: String,
}

impl PageTemplate {
    pub fn new(source: impl Into<String>, module: impl Into<String>) -> Self {
        Self { source: source.into(), module: module.into() }
    }

    /// Decodes a template read from a resource directory.
    ///
    /// # Errors
    /// [`GrokError::Configuration`] if the bytes are not valid UTF-8.
    pub fn from_bytes(bytes: &[u8], module: impl Into<String>) -> Result<Self, GrokError> {
        let module = module.into();
        let source = std::str::from_utf8(bytes).map_err(|e| GrokError::Configuration {
            message: format!("Template is not valid UTF-8: {e}").into(),
            context: Some(module.clone().into()),
        })?;
        Ok(Self { source: source.to_owned(), module })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Dotted name of the module the template was defined in.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    Inline { module: String },
    Filesystem { module: String, directory: String, path: PathBuf },
    Builtin,
}

/// A template annotated with the name and location it was found under.
#[derive(Debug, Clone)]
pub struct BoundTemplate {
    pub name: String,
    pub origin: TemplateOrigin,
    pub template: Arc<PageTemplate>,
}

impl BoundTemplate {
    #[must_use]
    pub fn inline(name: impl Into<String>, template: Arc<PageTemplate>) -> Self {
        let module = template.module().to_owned();
        Self { name: name.into(), origin: TemplateOrigin::Inline { module }, template }
    }

    #[must_use]
    pub const fn is_inline(&self) -> bool {
        matches!(self.origin, TemplateOrigin::Inline { .. })
    }
}

impl fmt::Display for BoundTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            TemplateOrigin::Inline { module } => write!(f, "template '{}' in {module}", self.name),
            TemplateOrigin::Filesystem { path, .. } => {
                write!(f, "template '{}' in {}", self.name, path.display())
            },
            TemplateOrigin::Builtin => write!(f, "builtin template '{}'", self.name),
        }
    }
}

#[derive(Debug)]
struct TemplateEntry {
    template: Arc<BoundTemplate>,
    associated: bool,
}

/// Name to template map for one module scan.
///
/// Each entry tracks whether some view claimed it; unclaimed entries become
/// default template views at the end of the scan.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    entries: FxHashMap<String, TemplateEntry>,
}

impl TemplateRegistry {
    /// Adds a template under `name`.
    ///
    /// # Errors
    /// [`GrokError::Conflict`] when an inline template and a file template share a name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        template: Arc<BoundTemplate>,
    ) -> Result<(), GrokError> {
        let name = name.into();
        let clash = self.entries.get(&name).filter(|e| e.template.is_inline() != template.is_inline());
        if let Some(existing) = clash {
            return Err(conflict(&name, &existing.template.origin, &template.origin));
        }

        debug!(name = %name, template = %template, "Registered template");
        self.entries.insert(name, TemplateEntry { template, associated: false });
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<BoundTemplate>> {
        self.entries.get(name).map(|entry| &entry.template)
    }

    pub fn mark_associated(&mut self, name: &str) {
        if let Some(entry) = self.entries.get_mut(name) {
            entry.associated = true;
        }
    }

    /// Unclaimed templates, sorted by name.
    #[must_use]
    pub fn list_unassociated(&self) -> Vec<(String, Arc<BoundTemplate>)> {
        let mut unassociated: Vec<_> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.associated)
            .map(|(name, entry)| (name.clone(), Arc::clone(&entry.template)))
            .collect();
        unassociated.sort_by(|a, b| a.0.cmp(&b.0));
        unassociated
    }

    /// Loads every `<name>.<extension>` file in the module's resource directory.
    ///
    /// The directory is the module's `resources` annotation, or its short name.
    /// A missing directory is not an error. Returns the number of templates found.
    ///
    /// # Errors
    /// A `resources` annotation leaving the module directory, conflicts with
    /// inline templates, unreadable or undecodable files.
    pub fn find_filesystem(
        &mut self,
        module: &ModuleInfo,
        resources: &dyn ResourceProvider,
        extension: &str,
    ) -> Result<usize, GrokError> {
        let directory = match &module.settings().resources {
            Some(annotated) if !stays_inside(annotated) => {
                return Err(GrokError::configuration(format!(
                    "Invalid resources annotation '{annotated}' on module '{}': \
                     expected a directory inside the module.",
                    module.dotted_name()
                )));
            }
            Some(annotated) => annotated.clone(),
            None => module.short_name().to_owned(),
        };
        if !resources.is_directory(module, &directory) {
            trace!(module = module.dotted_name(), directory = %directory, "No template directory");
            return Ok(0);
        }

        let suffix = format!(".{extension}");
        let mut found = 0;
        for file in resources.list_resources(module, &directory)? {
            let Some(stem) = file.strip_suffix(&suffix).filter(|stem| !stem.is_empty()) else {
                continue;
            };
            let relative = format!("{directory}/{file}");
            let bytes = resources.read_resource(module, &relative)?;
            let template = PageTemplate::from_bytes(&bytes, module.dotted_name())
                .context(relative.clone())?;
            let bound = BoundTemplate {
                name: stem.to_owned(),
                origin: TemplateOrigin::Filesystem {
                    module: module.dotted_name().to_owned(),
                    directory: directory.clone(),
                    path: resources.location(module, &relative),
                },
                template: Arc::new(template),
            };
            self.register(stem, Arc::new(bound))?;
            found += 1;
        }
        Ok(found)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn conflict(name: &str, first: &TemplateOrigin, second: &TemplateOrigin) -> GrokError {
    let (module, directory) = match (first, second) {
        (TemplateOrigin::Filesystem { module, directory, .. }, _)
        | (_, TemplateOrigin::Filesystem { module, directory, .. }) => {
            (module.as_str(), directory.as_str())
        },
        _ => ("?", "?"),
    };
    GrokError::conflict(format!(
        "Conflicting templates found for name '{name}' in module '{module}', \
         both inline and in resource directory '{directory}'."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(name: &str) -> Arc<BoundTemplate> {
        Arc::new(BoundTemplate::inline(name, Arc::new(PageTemplate::new("<p/>", "app"))))
    }

    fn file(name: &str) -> Arc<BoundTemplate> {
        Arc::new(BoundTemplate {
            name: name.to_owned(),
            origin: TemplateOrigin::Filesystem {
                module: "app".to_owned(),
                directory: "app_templates".to_owned(),
                path: PathBuf::from("app_templates").join(format!("{name}.pt")),
            },
            template: Arc::new(PageTemplate::new("<p/>", "app")),
        })
    }

    #[test]
    fn test_inline_then_file_conflicts() {
        let mut registry = TemplateRegistry::default();
        registry.register("index", inline("index")).unwrap();
        let err = registry.register("index", file("index")).unwrap_err();
        assert_eq!(err.kind(), "Conflict");
        assert!(err.to_string().contains("'app_templates'"));
    }

    #[test]
    fn test_file_then_inline_conflicts() {
        let mut registry = TemplateRegistry::default();
        registry.register("index", file("index")).unwrap();
        let err = registry.register("index", inline("index")).unwrap_err();
        assert_eq!(err.kind(), "Conflict");
    }

    #[test]
    fn test_unassociated_is_sorted_and_tracks_claims() {
        let mut registry = TemplateRegistry::default();
        registry.register("zeta", inline("zeta")).unwrap();
        registry.register("alpha", inline("alpha")).unwrap();
        registry.register("mid", inline("mid")).unwrap();
        registry.mark_associated("mid");

        let names: Vec<_> = registry.list_unassociated().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_from_bytes_rejects_invalid_utf8() {
        let err = PageTemplate::from_bytes(&[0xff, 0xfe], "app").unwrap_err();
        assert_eq!(err.kind(), "Configuration");
    }

    #[test]
    fn test_builtin_form_templates() {
        assert!(default_edit_form().template.source().contains("<form"));
        assert_eq!(default_display_form().origin, TemplateOrigin::Builtin);
    }
}
