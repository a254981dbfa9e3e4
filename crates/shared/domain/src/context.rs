use crate::interface::TypeRef;

/// What a component is bound to.
///
/// `None` and `Ambiguous` are sentinels; only [`Context::Bound`] can be registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Context {
    /// No candidate was found.
    #[default]
    None,
    /// More than one candidate was found and nothing disambiguates them.
    Ambiguous,
    Bound(TypeRef),
}

impl Context {
    /// Builds a context from the candidate types found in a module.
    ///
    /// Zero candidates yield [`Context::None`], exactly one is bound, more are ambiguous.
    pub fn from_candidates<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = TypeRef>,
    {
        let mut iter = candidates.into_iter();
        match (iter.next(), iter.next()) {
            (None, _) => Self::None,
            (Some(only), None) => Self::Bound(only),
            (Some(_), Some(_)) => Self::Ambiguous,
        }
    }

    #[must_use]
    pub const fn bound(&self) -> Option<&TypeRef> {
        match self {
            Self::Bound(type_ref) => Some(type_ref),
            Self::None | Self::Ambiguous => None,
        }
    }

    #[must_use]
    pub const fn is_bound(&self) -> bool {
        matches!(self, Self::Bound(_))
    }
}

impl From<TypeRef> for Context {
    fn from(type_ref: TypeRef) -> Self {
        Self::Bound(type_ref)
    }
}
