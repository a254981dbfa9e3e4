//! Interfaces and type references used as adaptation keys.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A named capability interface, identified by its dotted name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Interface(Cow<'static, str>);

impl Interface {
    /// The root interface every component provides.
    pub const BASE: Self = Self::from_static("Interface");
    /// Default skin layer browser views are registered for.
    pub const DEFAULT_BROWSER_LAYER: Self = Self::from_static("IDefaultBrowserLayer");
    pub const BROWSER_REQUEST: Self = Self::from_static("IBrowserRequest");
    pub const BROWSER_PUBLISHER: Self = Self::from_static("IBrowserPublisher");
    pub const XMLRPC_REQUEST: Self = Self::from_static("IXMLRPCRequest");
    pub const OBJECT_ADDED_EVENT: Self = Self::from_static("IObjectAddedEvent");
    pub const DEFAULT_VIEW_NAME: Self = Self::from_static("IDefaultViewName");
    pub const PERMISSION: Self = Self::from_static("IPermission");

    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Interface {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

/// Anything an adapter can be registered for: a concrete class or an interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeRef {
    /// A class, by its fully qualified dotted name (`app.blog.Page`).
    Class(Arc<str>),
    Interface(Interface),
}

impl TypeRef {
    #[must_use]
    pub fn class(dotted_name: impl AsRef<str>) -> Self {
        Self::Class(Arc::from(dotted_name.as_ref()))
    }

    #[must_use]
    pub const fn as_interface(&self) -> Option<&Interface> {
        match self {
            Self::Interface(iface) => Some(iface),
            Self::Class(_) => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Class(name) => name,
            Self::Interface(iface) => iface.name(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(name) => write!(f, "<class {name}>"),
            Self::Interface(iface) => write!(f, "<interface {iface}>"),
        }
    }
}

impl From<Interface> for TypeRef {
    fn from(iface: Interface) -> Self {
        Self::Interface(iface)
    }
}
