/*
 * footer.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Page footer transform.
 */

//! Keyboard glossary and page footer.

use ltx_html::{HtmlDocument, HtmlElement, HtmlNode};

use crate::Result;
use crate::config::FooterConfig;
use crate::context::DecorateContext;
use crate::transform::DocumentTransform;
use crate::transforms::header::color_scheme_toggle;

/// Appends the `#footer` keyboard glossary and the page footer to `<body>`.
pub struct FooterTransform;

impl FooterTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FooterTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTransform for FooterTransform {
    fn name(&self) -> &str {
        "footer"
    }

    fn transform(&self, doc: &mut HtmlDocument, ctx: &mut DecorateContext<'_>) -> Result<()> {
        let Some(body_path) = doc.body_path() else {
            ctx.target_missing(self.name(), "`<body>`");
            return Ok(());
        };
        let config = &ctx.config.footer;
        let glossary = config.keyboard_glossary && doc.find_by_id("footer").is_none();

        let Some(body) = doc.element_at_mut(&body_path) else {
            return Ok(());
        };
        // Keep the citation dialog last in <body>.
        let mut index = body
            .children
            .iter()
            .rposition(|node| node.as_element().is_some_and(|e| e.has_class("ltx_cite_modal")))
            .unwrap_or(body.children.len());
        if glossary {
            body.insert_child(index, keyboard_glossary());
            index += 1;
        }
        body.insert_child(index, page_footer(config));
        Ok(())
    }
}

fn keyboard_glossary() -> HtmlElement {
    let items = [
        "Use <strong>Tab</strong> and <strong>Shift+Tab</strong> to move between citation ranges, and <strong>Enter</strong> to list the references a range covers.",
        "While the reference list is open, <strong>Tab</strong> cycles through its links and <strong>Escape</strong> closes it.",
        "Each bibliography entry links back to where it was first cited.",
    ];

    HtmlElement::new("footer")
        .with_attr("id", "footer")
        .with_class("ltx_document")
        .with_child(
            HtmlElement::new("div")
                .with_class("keyboard-glossary")
                .with_class("ltx_page_content")
                .with_child(
                    HtmlElement::new("h2")
                        .with_text("Keyboard commands and instructions for reporting errors"),
                )
                .with_child(HtmlElement::new("p").with_text(
                    "HTML versions of papers are experimental and a step towards improving \
                     accessibility and mobile device support. We appreciate feedback on errors \
                     in the HTML that will help us improve the conversion and rendering.",
                ))
                .with_child(HtmlElement::new("ul").with_children(items.iter().map(|item| {
                    HtmlNode::Element(HtmlElement::new("li").with_child(HtmlNode::raw_text(*item)))
                })))
                .with_child(HtmlElement::new("p").with_text(
                    "We appreciate your time reviewing and reporting rendering errors in the \
                     HTML. It will help us improve the HTML versions for all readers and make \
                     papers more accessible, because disability should not be a barrier to \
                     accessing the research in your field.",
                )),
        )
}

fn footer_link(href: &str, label: &str) -> HtmlElement {
    HtmlElement::new("a")
        .with_class("ar5iv-footer-button")
        .with_attr("href", href)
        .with_attr("target", "_blank")
        .with_text(label)
}

fn latexml_logo(href: &str) -> HtmlElement {
    HtmlElement::new("a")
        .with_attr("href", href)
        .with_class("ltx_LaTeXML_logo")
        .with_child(
            HtmlElement::new("span")
                .with_attr("style", "letter-spacing:-0.2em; margin-right:0.1em;")
                .with_text("L")
                .with_child(
                    HtmlElement::new("span")
                        .with_attr("style", "font-size:70%;position:relative; bottom:2.2pt;")
                        .with_text("A"),
                )
                .with_text("T")
                .with_child(
                    HtmlElement::new("span")
                        .with_attr("style", "position:relative; bottom:-0.4ex;")
                        .with_text("E"),
                ),
        )
        .with_child(
            HtmlElement::new("span")
                .with_class("ltx_font_smallcaps")
                .with_text("xml"),
        )
}

fn page_footer(config: &FooterConfig) -> HtmlElement {
    let generated = match &config.generated_on {
        Some(date) => format!("Generated on {} by ", date),
        None => "Generated by ".to_string(),
    };

    HtmlElement::new("footer")
        .with_class("ltx_page_footer")
        .with_child(color_scheme_toggle())
        .with_child(footer_link(&config.copyright_url, "Copyright"))
        .with_child(footer_link(&config.privacy_policy_url, "Privacy Policy"))
        .with_child(footer_link(&config.why_html_url, "Why HTML?"))
        .with_child(
            HtmlElement::new("div")
                .with_class("ltx_page_logo")
                .with_text(&generated)
                .with_child(latexml_logo(&config.latexml_url)),
        )
}
