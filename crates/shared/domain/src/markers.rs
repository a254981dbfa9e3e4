use bitflags::bitflags;
use strum_macros::{AsRefStr, Display, EnumIter};

bitflags! {
    /// Classification markers carried by a factory.
    ///
    /// A derived marker contains every bit of its base, so an "is-a" test is
    /// `factory.contains(base)`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Markers: u32 {
        const MODEL = 1 << 0;
        const CONTAINER = (1 << 1) | Self::MODEL.bits();
        const LOCAL_UTILITY = (1 << 2) | Self::MODEL.bits();
        const SITE = 1 << 3;
        const ADAPTER = 1 << 4;
        const MULTI_ADAPTER = 1 << 5;
        const GLOBAL_UTILITY = 1 << 6;
        const VIEW = 1 << 7;
        const FORM = (1 << 8) | Self::VIEW.bits();
        const EDIT_FORM = (1 << 9) | Self::FORM.bits();
        const DISPLAY_FORM = (1 << 10) | Self::FORM.bits();
        const ADD_FORM = (1 << 11) | Self::FORM.bits();
        const TRAVERSER = 1 << 12;
        const XMLRPC = 1 << 13;
    }
}

impl Markers {
    /// Whether a factory carrying `self` is-a `base`.
    #[must_use]
    pub const fn is_a(self, base: Self) -> bool {
        self.contains(base)
    }
}

/// The closed set of factory kinds a module can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
pub enum FactoryKind {
    Model,
    Container,
    LocalUtility,
    Adapter,
    MultiAdapter,
    GlobalUtility,
    View,
    EditForm,
    DisplayForm,
    AddForm,
    Traverser,
    #[strum(serialize = "XMLRPC")]
    XmlRpc,
}

impl FactoryKind {
    #[must_use]
    pub const fn markers(self) -> Markers {
        match self {
            Self::Model => Markers::MODEL,
            Self::Container => Markers::CONTAINER,
            Self::LocalUtility => Markers::LOCAL_UTILITY,
            Self::Adapter => Markers::ADAPTER,
            Self::MultiAdapter => Markers::MULTI_ADAPTER,
            Self::GlobalUtility => Markers::GLOBAL_UTILITY,
            Self::View => Markers::VIEW,
            Self::EditForm => Markers::EDIT_FORM,
            Self::DisplayForm => Markers::DISPLAY_FORM,
            Self::AddForm => Markers::ADD_FORM,
            Self::Traverser => Markers::TRAVERSER,
            Self::XmlRpc => Markers::XMLRPC,
        }
    }

    #[must_use]
    pub const fn is_model(self) -> bool {
        self.markers().is_a(Markers::MODEL)
    }

    #[must_use]
    pub const fn is_form(self) -> bool {
        self.markers().is_a(Markers::FORM)
    }
}
