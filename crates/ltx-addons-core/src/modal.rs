/*
 * modal.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The citation modal: one shared dialog listing the bibliography entries
 * behind an activated range token.
 */

//! Citation modal controller.
//!
//! The dialog is installed hidden, once per document, by
//! [`install_dialog`]. A [`ModalController`] owns the open/closed state and
//! applies each transition to the document the way the page script does to
//! the live DOM: populating the dialog, hiding the rest of the page from
//! assistive technology, and trapping keyboard focus.
//!
//! ```text
//! Closed --Activate(r)--> Open(r)
//! Open(r) --Activate(r2)--> Open(r2)      (re-populated in place)
//! Open --Escape | CloseButton | Dismiss | click outside--> Closed
//! ```
//!
//! # Example
//!
//! ```rust
//! use ltx_addons_core::modal::{Key, ModalController, ModalEvent, ModalOptions, ModalState, install_dialog};
//!
//! let mut doc = ltx_html::parse(
//!     r#"<body><ul><li id="bib.3">Three</li><li id="bib.5">Five</li></ul></body>"#,
//! ).unwrap();
//! let options = ModalOptions::default();
//! install_dialog(&mut doc, &options);
//!
//! let mut modal = ModalController::new(options);
//! modal.handle(&mut doc, ModalEvent::Activate("3-5".into())).unwrap();
//! assert_eq!(modal.rendered_entries(), ["bib.3", "bib.5"]);
//!
//! modal.handle(&mut doc, ModalEvent::Key(Key::Escape)).unwrap();
//! assert_eq!(modal.state(), &ModalState::Closed);
//! ```

use ltx_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder};
use ltx_html::{HtmlDocument, HtmlElement, HtmlNode, NodePath};

use crate::citations::{CitationNumber, CitationRange};
use crate::error::{AddonsError, Result};

/// Missing entries are reported individually up to this many per open.
const MAX_REPORTED_MISSING: usize = 16;

/// Where the dialog lives and how bibliography entries are found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalOptions {
    pub dialog_id: String,
    pub bib_id_prefix: String,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            dialog_id: "cite-modal".to_string(),
            bib_id_prefix: "bib.".to_string(),
        }
    }
}

impl ModalOptions {
    /// Id of the dialog's heading.
    pub fn title_id(&self) -> String {
        format!("{}-title", self.dialog_id)
    }

    fn close_id(&self) -> String {
        format!("{}-close", self.dialog_id)
    }

    /// The citation number of a bibliography entry id, if it is one.
    fn entry_number(&self, id: &str) -> Option<CitationNumber> {
        crate::citations::parse_label(id.strip_prefix(&self.bib_id_prefix)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    /// Showing the entries behind `range`, exactly as activated.
    Open { range: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    ShiftTab,
    Escape,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    /// A range token was clicked or activated from the keyboard.
    Activate(String),
    Key(Key),
    /// The dialog's close control.
    CloseButton,
    /// A click on the element at the given path.
    Click(NodePath),
    /// Programmatic close, e.g. on navigation.
    Dismiss,
}

/// What an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Opened { range: String },
    Repopulated { range: String },
    Closed,
    /// Focus moved to the focusable element at this position in tab order.
    FocusMoved { index: usize },
    Ignored,
}

/// Install the hidden dialog at the end of `<body>`.
///
/// Installing twice is a no-op that returns the existing dialog. Returns
/// `None` when the document has no `<body>`.
pub fn install_dialog(doc: &mut HtmlDocument, options: &ModalOptions) -> Option<NodePath> {
    if let Some(existing) = doc.find_path_by_id(&options.dialog_id) {
        return Some(existing);
    }

    let body_path = doc.body_path()?;
    let body = doc.element_at_mut(&body_path)?;
    body.append_child(build_dialog(options));
    Some(body_path.child(body.children.len() - 1))
}

fn build_dialog(options: &ModalOptions) -> HtmlElement {
    let close = HtmlElement::new("button")
        .with_attr("type", "button")
        .with_attr("id", options.close_id())
        .with_class("ltx_cite_modal_close")
        .with_attr("aria-label", "Close")
        .with_text("\u{d7}");
    let title = HtmlElement::new("h2")
        .with_attr("id", options.title_id())
        .with_class("ltx_cite_modal_title");
    let body = HtmlElement::new("div").with_class("ltx_cite_modal_body");

    HtmlElement::new("div")
        .with_attr("id", options.dialog_id.as_str())
        .with_class("ltx_cite_modal")
        .with_attr("role", "dialog")
        .with_attr("aria-modal", "true")
        .with_attr("aria-labelledby", options.title_id())
        .with_attr("hidden", "")
        .with_child(
            HtmlElement::new("div")
                .with_class("ltx_cite_modal_content")
                .with_child(close)
                .with_child(title)
                .with_child(body),
        )
}

/// Owns the modal's state for one document.
#[derive(Debug)]
pub struct ModalController {
    options: ModalOptions,
    state: ModalState,

    /// Position in the dialog's tab order of the focused element.
    focus: Option<usize>,

    /// Body children this controller marked `aria-hidden`.
    hidden_by_modal: Vec<NodePath>,

    /// Ids of the entries currently shown.
    rendered: Vec<String>,

    diagnostics: Vec<DiagnosticMessage>,
}

impl ModalController {
    pub fn new(options: ModalOptions) -> Self {
        Self {
            options,
            state: ModalState::Closed,
            focus: None,
            hidden_by_modal: Vec::new(),
            rendered: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    /// Tab and Escape belong to the dialog while it is open.
    pub fn is_intercepting_keys(&self) -> bool {
        self.is_open()
    }

    /// Bibliography ids shown in the dialog, ascending.
    pub fn rendered_entries(&self) -> &[String] {
        &self.rendered
    }

    pub fn focus_index(&self) -> Option<usize> {
        self.focus
    }

    /// The element holding keyboard focus, if the dialog has it.
    pub fn focused<'d>(&self, doc: &'d HtmlDocument) -> Option<&'d HtmlElement> {
        let index = self.focus?;
        let dialog_path = doc.find_path_by_id(&self.options.dialog_id)?;
        let dialog = doc.element_at(&dialog_path)?;
        let relative = dialog.focusable_descendants().into_iter().nth(index)?;
        dialog.descendant_at(&relative)
    }

    /// Take the warnings collected while opening.
    pub fn take_diagnostics(&mut self) -> Vec<DiagnosticMessage> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Apply one event.
    ///
    /// # Errors
    ///
    /// Fails only when the dialog is needed and the document has no `<body>`
    /// to install it in.
    pub fn handle(&mut self, doc: &mut HtmlDocument, event: ModalEvent) -> Result<Transition> {
        match event {
            ModalEvent::Activate(range) => self.open(doc, &range),
            ModalEvent::Key(key) => Ok(self.key(doc, key)),
            ModalEvent::CloseButton | ModalEvent::Dismiss => Ok(self.close(doc)),
            ModalEvent::Click(target) => Ok(self.click(doc, &target)),
        }
    }

    /// Show the entries behind `range_text`.
    ///
    /// Unparseable range text and missing entries are warnings; the dialog
    /// still opens, possibly empty.
    pub fn open(&mut self, doc: &mut HtmlDocument, range_text: &str) -> Result<Transition> {
        let dialog_path = install_dialog(doc, &self.options).ok_or_else(|| {
            AddonsError::Transform("cannot open the citation modal: no <body>".to_string())
        })?;

        let range = match range_text.parse::<CitationRange>() {
            Ok(range) => Some(range),
            Err(err) => {
                self.diagnostics.push(
                    DiagnosticMessageBuilder::warning("Unparseable Citation Range")
                        .with_code("L-3-2")
                        .problem(err.to_string())
                        .add_hint("Range text is a number or two numbers joined by `-`?")
                        .build(),
                );
                None
            }
        };

        let entries = match range {
            Some(range) => self.lookup_entries(doc, range),
            None => Vec::new(),
        };
        self.rendered = entries
            .iter()
            .filter_map(|e| e.id().map(str::to_string))
            .collect();

        let heading = match range {
            Some(range) => format!("References {}", range),
            None => format!("References {}", range_text.trim()),
        };
        self.populate(doc, &dialog_path, &heading, entries);

        let reopened = self.is_open();
        if !reopened {
            self.hide_background(doc, &dialog_path);
        }
        if let Some(dialog) = doc.element_at_mut(&dialog_path) {
            dialog.remove_attribute("hidden");
        }

        let focusable = doc
            .element_at(&dialog_path)
            .map(|d| d.focusable_descendants().len())
            .unwrap_or(0);
        self.focus = (focusable > 0).then_some(0);

        self.state = ModalState::Open {
            range: range_text.to_string(),
        };
        tracing::debug!(range = range_text, entries = self.rendered.len(), "Citation modal open");

        let range = range_text.to_string();
        Ok(if reopened {
            Transition::Repopulated { range }
        } else {
            Transition::Opened { range }
        })
    }

    /// Hide the dialog and give the page back to assistive technology.
    pub fn close(&mut self, doc: &mut HtmlDocument) -> Transition {
        if !self.is_open() {
            return Transition::Ignored;
        }

        for path in self.hidden_by_modal.drain(..) {
            if let Some(element) = doc.element_at_mut(&path) {
                if element.get_attribute("aria-hidden") == Some("true") {
                    element.remove_attribute("aria-hidden");
                }
            }
        }

        if let Some(dialog_path) = doc.find_path_by_id(&self.options.dialog_id) {
            self.populate(doc, &dialog_path, "", Vec::new());
            if let Some(dialog) = doc.element_at_mut(&dialog_path) {
                dialog.set_attribute("hidden", "");
            }
        }

        self.state = ModalState::Closed;
        self.focus = None;
        self.rendered.clear();
        tracing::debug!("Citation modal closed");
        Transition::Closed
    }

    fn key(&mut self, doc: &mut HtmlDocument, key: Key) -> Transition {
        if !self.is_intercepting_keys() {
            return Transition::Ignored;
        }
        match key {
            Key::Escape => self.close(doc),
            Key::Tab | Key::ShiftTab => {
                let count = doc
                    .find_by_id(&self.options.dialog_id)
                    .map(|d| d.focusable_descendants().len())
                    .unwrap_or(0);
                if count == 0 {
                    return Transition::Ignored;
                }
                let index = match (key, self.focus) {
                    (Key::Tab, Some(i)) => (i + 1) % count,
                    (Key::Tab, None) => 0,
                    (_, Some(i)) => (i + count - 1) % count,
                    (_, None) => count - 1,
                };
                self.focus = Some(index);
                Transition::FocusMoved { index }
            }
            Key::Other => Transition::Ignored,
        }
    }

    fn click(&mut self, doc: &mut HtmlDocument, target: &NodePath) -> Transition {
        if !self.is_open() {
            return Transition::Ignored;
        }
        let Some(dialog_path) = doc.find_path_by_id(&self.options.dialog_id) else {
            return self.close(doc);
        };
        let content_path = doc
            .element_at(&dialog_path)
            .and_then(|d| d.element_child_index(0))
            .map(|index| dialog_path.child(index));

        match content_path {
            Some(content) if content.contains(target) => Transition::Ignored,
            _ => self.close(doc),
        }
    }

    /// Present entries in `range`, ascending by number.
    fn lookup_entries(&mut self, doc: &HtmlDocument, range: CitationRange) -> Vec<HtmlElement> {
        let mut found: Vec<(CitationNumber, HtmlElement)> = Vec::new();
        for path in doc.find_all_paths(|e| {
            e.id()
                .and_then(|id| self.options.entry_number(id))
                .is_some_and(|n| range.contains(n))
        }) {
            if let Some(element) = doc.element_at(&path) {
                if let Some(n) = element.id().and_then(|id| self.options.entry_number(id)) {
                    found.push((n, element.clone()));
                }
            }
        }
        found.sort_by_key(|(n, _)| *n);
        found.dedup_by_key(|(n, _)| *n);

        let missing: Vec<CitationNumber> = range
            .numbers()
            .filter(|n| found.binary_search_by_key(n, |(m, _)| *m).is_err())
            .take(MAX_REPORTED_MISSING + 1)
            .collect();
        if !missing.is_empty() {
            let mut builder = DiagnosticMessageBuilder::warning("Missing Bibliography Entry")
                .with_code("L-3-1")
                .problem(format!("Range `{}` refers to entries that do not exist", range));
            for n in missing.iter().take(MAX_REPORTED_MISSING) {
                builder = builder.add_detail(format!("No element has id `{}{}`", self.options.bib_id_prefix, n));
            }
            if missing.len() > MAX_REPORTED_MISSING {
                builder = builder.add_info("Further missing entries are not listed");
            }
            self.diagnostics.push(builder.build());
        }

        found.into_iter().map(|(_, element)| element).collect()
    }

    /// Replace the dialog's heading and entry list.
    fn populate(&self, doc: &mut HtmlDocument, dialog_path: &NodePath, heading: &str, entries: Vec<HtmlElement>) {
        let Some(dialog) = doc.element_at_mut(dialog_path) else {
            return;
        };
        let title_id = self.options.title_id();

        let list = HtmlElement::new("ul").with_class("ltx_biblist").with_children(
            entries.into_iter().map(|mut entry| {
                let bib_id = entry.remove_attribute("id").unwrap_or_default();
                // Clones must not duplicate ids already in the page.
                entry.for_each_element_mut(&mut |e| {
                    e.remove_attribute("id");
                });
                entry.set_attribute("data-bib-id", bib_id);
                HtmlNode::Element(entry)
            }),
        );

        dialog.for_each_element_mut(&mut |e| {
            if e.id() == Some(title_id.as_str()) {
                let text = if heading.is_empty() {
                    Vec::new()
                } else {
                    vec![HtmlNode::text(heading)]
                };
                e.replace_children(text);
            } else if e.has_class("ltx_cite_modal_body") {
                let children = if heading.is_empty() {
                    Vec::new()
                } else {
                    vec![HtmlNode::Element(list.clone())]
                };
                e.replace_children(children);
            }
        });
    }

    /// Mark every other body child `aria-hidden`, remembering which were changed.
    fn hide_background(&mut self, doc: &mut HtmlDocument, dialog_path: &NodePath) {
        let Some(body_path) = dialog_path.parent() else {
            return;
        };
        let Some(body) = doc.element_at_mut(&body_path) else {
            return;
        };
        for (index, child) in body.children.iter_mut().enumerate() {
            let path = body_path.child(index);
            if &path == dialog_path {
                continue;
            }
            if let HtmlNode::Element(element) = child {
                if element.get_attribute("aria-hidden") != Some("true") {
                    element.set_attribute("aria-hidden", "true");
                    self.hidden_by_modal.push(path);
                }
            }
        }
    }
}
