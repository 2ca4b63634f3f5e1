/*
 * header.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The page header bar.
 */

//! The page header bar.
//!
//! The header is the first element of `<body>`: a skip link to `#main`, the
//! logos, a banner message, and links to the abstract page, the keyboard
//! commands in the footer, and the color-scheme toggle. Submissions get
//! different banner wording and no abstract link.

use ltx_html::{HtmlDocument, HtmlElement, HtmlNode};

use crate::Result;
use crate::config::AddonsConfig;
use crate::context::{DecorateContext, PaperInfo};
use crate::transform::DocumentTransform;

const HEADER_CLASS: &str = "ltx_addons_header";

const PUBLISHED_MESSAGE: &str = "Welcome to <strong>Experimental HTML</strong>. We invite you to \
    report rendering errors. <a href=\"#footer\">Reference all keyboard commands</a> in the footer.";

const SUBMISSION_MESSAGE: &str = "Welcome to <strong>Experimental HTML</strong>. We invite you to \
    report rendering errors. Use Alt+Y to enable accessible section reporting links and \
    Alt+Shift+Y to disable.";

pub struct HeaderTransform;

impl HeaderTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeaderTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTransform for HeaderTransform {
    fn name(&self) -> &str {
        "header"
    }

    fn transform(&self, doc: &mut HtmlDocument, ctx: &mut DecorateContext<'_>) -> Result<()> {
        if doc.find(|e| e.name == "header" && e.has_class(HEADER_CLASS)).is_some() {
            return Ok(());
        }
        let Some(body_path) = doc.body_path() else {
            ctx.target_missing(self.name(), "`<body>`");
            return Ok(());
        };
        if let Some(body) = doc.element_at_mut(&body_path) {
            body.insert_child(0, build_header(ctx.config, ctx.paper));
        }
        Ok(())
    }
}

pub(crate) fn color_scheme_toggle() -> HtmlElement {
    HtmlElement::new("a")
        .with_class("ar5iv-toggle-color-scheme")
        .with_attr("href", "javascript:toggleColorScheme()")
        .with_attr("title", "Toggle ar5iv color scheme")
        .with_child(HtmlElement::new("span").with_class("color-scheme-icon"))
}

fn logo(config: &AddonsConfig, file: &str, class: &str) -> HtmlElement {
    HtmlElement::new("img")
        .with_attr("src", format!("{}/{}", config.assets_base.trim_end_matches('/'), file))
        .with_attr("alt", "logo")
        .with_attr("role", "presentation")
        .with_class(class)
}

fn build_header(config: &AddonsConfig, paper: &PaperInfo) -> HtmlElement {
    let message = if paper.is_submission {
        SUBMISSION_MESSAGE
    } else {
        PUBLISHED_MESSAGE
    };

    let banner = HtmlElement::new("div")
        .with_class("logo-banner")
        .with_child(logo(config, &config.header.logo, "logo"))
        .with_child(logo(config, &config.header.logomark, "logomark"))
        .with_child(
            HtmlElement::new("div")
                .with_class("header-message")
                .with_attr("role", "banner")
                .with_child(HtmlNode::raw_text(message)),
        );

    let mut links = HtmlElement::new("div").with_class("header-links");
    if let Some(abs_url) = paper.abs_url(&config.abs_url_base) {
        links.append_child(
            HtmlElement::new("a")
                .with_class("back-to-abstract")
                .with_attr("href", abs_url)
                .with_text("Back to Abstract"),
        );
    }
    links.append_child(
        HtmlElement::new("a")
            .with_class("ar5iv-footer-button")
            .with_class("hover-effect")
            .with_attr("href", "#footer")
            .with_text("Keyboard Commands"),
    );
    links.append_child(color_scheme_toggle());

    HtmlElement::new("header")
        .with_class(HEADER_CLASS)
        .with_child(
            HtmlElement::new("a")
                .with_attr("href", "#main")
                .with_class("skip")
                .with_text("Skip to main content"),
        )
        .with_child(banner)
        .with_child(links)
}
