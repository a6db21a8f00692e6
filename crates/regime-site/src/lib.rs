//! Marketing pages of the regime diagnosis site.
//!
//! Pages are static HTML fragments compiled into the binary, one per page
//! and locale, wrapped in a shared layout at render time.

mod content;
pub mod error;
pub mod page;
pub mod render;

pub use error::{SiteError, SiteResult};
pub use page::Page;
pub use render::{render_not_found, render_page};
