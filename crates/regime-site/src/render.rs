//! HTML rendering with the shared site layout.

use regime_core::Locale;

use crate::content;
use crate::page::Page;

const STYLESHEET: &str = include_str!("../static/site.css");

fn nav(current: Option<Page>, locale: Locale) -> String {
    let mut links = String::new();
    for page in Page::ALL {
        let aria = if Some(page) == current {
            r#" aria-current="page""#
        } else {
            ""
        };
        links.push_str(&format!(
            r#"<li><a href="{}"{aria}>{}</a></li>"#,
            page.path(locale),
            page.title(locale)
        ));
    }
    let dashboard_label = match locale {
        Locale::En => "Dashboard",
        Locale::Ja => "ダッシュボード",
    };
    links.push_str(&format!(r#"<li><a href="/dashboard">{dashboard_label}</a></li>"#));
    format!(r#"<nav class="site-nav"><ul>{links}</ul></nav>"#)
}

fn locale_switch(target: Page, locale: Locale) -> String {
    let alternate = locale.alternate();
    let label = match alternate {
        Locale::En => "English",
        Locale::Ja => "日本語",
    };
    format!(
        r#"<a class="locale-switch" hreflang="{code}" href="{href}">{label}</a>"#,
        code = alternate.code(),
        href = target.path(alternate),
    )
}

fn footer(locale: Locale) -> &'static str {
    match locale {
        Locale::En => {
            "<footer><p>Regime classifications are research output, not investment advice.</p></footer>"
        }
        Locale::Ja => "<footer><p>レジーム分類は研究成果であり、投資助言ではありません。</p></footer>",
    }
}

fn layout(title: &str, locale: Locale, nav: &str, switch: &str, main: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLESHEET}</style>
</head>
<body>
<header class="site-header">{nav}{switch}</header>
<main>
{main}
</main>
{footer}
</body>
</html>
"#,
        lang = locale.code(),
        footer = footer(locale),
    )
}

/// Render a full HTML document for `page` in `locale`.
pub fn render_page(page: Page, locale: Locale) -> String {
    let title = match page {
        Page::Home => page.title(locale).to_string(),
        _ => format!("{} | {}", page.title(locale), Page::Home.title(locale)),
    };
    layout(
        &title,
        locale,
        &nav(Some(page), locale),
        &locale_switch(page, locale),
        content::body(page, locale),
    )
}

/// Render the 404 page; its language switch points at the other home page.
pub fn render_not_found(locale: Locale) -> String {
    let (heading, text) = match locale {
        Locale::En => ("Page not found", "The page you requested does not exist."),
        Locale::Ja => ("ページが見つかりません", "お探しのページは存在しません。"),
    };
    let main = format!(
        r#"<section class="not-found"><h1>{heading}</h1><p>{text}</p><p><a href="{home}">{home_title}</a></p></section>"#,
        home = Page::Home.path(locale),
        home_title = Page::Home.title(locale),
    );
    layout(
        heading,
        locale,
        &nav(None, locale),
        &locale_switch(Page::Home, locale),
        &main,
    )
}
