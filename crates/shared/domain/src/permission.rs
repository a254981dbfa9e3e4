use crate::constants::PUBLIC_PERMISSION;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A permission id guarding access to a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    /// Unrestricted access.
    pub const PUBLIC: Self = Self(Cow::Borrowed(PUBLIC_PERMISSION));

    #[must_use]
    pub fn new(id: impl Into<Cow<'static, str>>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_public(&self) -> bool {
        self.0 == PUBLIC_PERMISSION
    }
}

impl Default for Permission {
    fn default() -> Self {
        Self::PUBLIC
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Permission {
    fn from(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }
}

impl From<String> for Permission {
    fn from(id: String) -> Self {
        Self(Cow::Owned(id))
    }
}
