// View name looked up when a model is published without an explicit view.
pub const DEFAULT_VIEW_NAME: &str = "index";
// Resource subdirectory served for package modules.
pub const STATIC_DIRECTORY: &str = "static";
pub const TEMPLATE_EXTENSION: &str = "pt";

pub const PUBLIC_PERMISSION: &str = "grok.Public";
// Attribute name guarded by view and method checkers.
pub const INVOKE: &str = "call";

// Site manager folder that receives hidden local utilities.
pub const DEFAULT_FOLDER: &str = "default";
// Class every model kind derives from.
pub const MODEL_CLASS: &str = "grok.Model";
