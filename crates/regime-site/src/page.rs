//! Page catalogue.

use regime_core::Locale;

use crate::error::{SiteError, SiteResult};

/// A marketing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    About,
    Methods,
    Product,
    Proposal,
    Contact,
}

impl Page {
    /// Pages in navigation order.
    pub const ALL: [Page; 6] = [
        Self::Home,
        Self::About,
        Self::Methods,
        Self::Product,
        Self::Proposal,
        Self::Contact,
    ];

    /// URL slug ("" for the home page).
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Home => "",
            Self::About => "about",
            Self::Methods => "methods",
            Self::Product => "product",
            Self::Proposal => "proposal",
            Self::Contact => "contact",
        }
    }

    pub fn from_slug(slug: &str) -> SiteResult<Self> {
        let slug = slug.trim_matches('/');
        Self::ALL
            .into_iter()
            .find(|p| p.slug() == slug)
            .ok_or_else(|| SiteError::UnknownPage(slug.to_string()))
    }

    /// Absolute URL path of this page in `locale`.
    pub fn path(&self, locale: Locale) -> String {
        match (locale.path_prefix(), self.slug()) {
            ("", "") => "/".to_string(),
            (prefix, "") => prefix.to_string(),
            (prefix, slug) => format!("{prefix}/{slug}"),
        }
    }

    /// Navigation label and document title.
    pub fn title(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Home, Locale::En) => "Regime Diagnosis",
            (Self::About, Locale::En) => "About",
            (Self::Methods, Locale::En) => "Methods",
            (Self::Product, Locale::En) => "Product",
            (Self::Proposal, Locale::En) => "Proposal",
            (Self::Contact, Locale::En) => "Contact",
            (Self::Home, Locale::Ja) => "レジーム診断",
            (Self::About, Locale::Ja) => "概要",
            (Self::Methods, Locale::Ja) => "手法",
            (Self::Product, Locale::Ja) => "プロダクト",
            (Self::Proposal, Locale::Ja) => "ご提案",
            (Self::Contact, Locale::Ja) => "お問い合わせ",
        }
    }
}
