//! Page bodies, one HTML fragment per page and locale.

use regime_core::Locale;

use crate::page::Page;

pub(crate) fn body(page: Page, locale: Locale) -> &'static str {
    match (locale, page) {
        (Locale::En, Page::Home) => include_str!("../static/pages/en/home.html"),
        (Locale::En, Page::About) => include_str!("../static/pages/en/about.html"),
        (Locale::En, Page::Methods) => include_str!("../static/pages/en/methods.html"),
        (Locale::En, Page::Product) => include_str!("../static/pages/en/product.html"),
        (Locale::En, Page::Proposal) => include_str!("../static/pages/en/proposal.html"),
        (Locale::En, Page::Contact) => include_str!("../static/pages/en/contact.html"),
        (Locale::Ja, Page::Home) => include_str!("../static/pages/ja/home.html"),
        (Locale::Ja, Page::About) => include_str!("../static/pages/ja/about.html"),
        (Locale::Ja, Page::Methods) => include_str!("../static/pages/ja/methods.html"),
        (Locale::Ja, Page::Product) => include_str!("../static/pages/ja/product.html"),
        (Locale::Ja, Page::Proposal) => include_str!("../static/pages/ja/proposal.html"),
        (Locale::Ja, Page::Contact) => include_str!("../static/pages/ja/contact.html"),
    }
}
