/*
 * tests/decorate_page.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end decoration of a LaTeXML article page.
 */

use std::path::{Path, PathBuf};

use ltx_addons_core::{
    AddonsConfig, DecorateOutput, Key, ModalController, ModalEvent, ModalState, Transition,
    decorate_file,
};
use ltx_html::{HtmlDocument, NodePath};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/2401.00001v1/paper.html")
}

fn decorate_fixture() -> (AddonsConfig, DecorateOutput) {
    let path = fixture_path();
    let (config, found) = AddonsConfig::discover(&path, None).unwrap();
    assert!(found.is_some_and(|p| p.ends_with("fixtures/_addons.yml")));
    let output = decorate_file(&path, &config).unwrap();
    (config, output)
}

fn cite_markers(doc: &HtmlDocument) -> Vec<String> {
    doc.find_all_paths(|e| e.name == "cite")
        .iter()
        .filter_map(|p| doc.element_at(p))
        .map(|e| e.text_content())
        .collect()
}

fn body_elements(doc: &HtmlDocument) -> Vec<String> {
    let body = doc.element_at(&doc.body_path().unwrap()).unwrap();
    body.child_elements()
        .map(|e| match e.classes().next() {
            Some(class) => format!("{}.{}", e.name, class),
            None => e.name.clone(),
        })
        .collect()
}

#[test]
fn test_citation_markers_are_compressed() {
    let (_, output) = decorate_fixture();
    let doc = ltx_html::parse(&output.html).unwrap();

    assert_eq!(cite_markers(&doc), vec!["[3-5]", "[1-2,7]"]);
    let ranges: Vec<&str> = doc
        .find_all_paths(|e| e.has_class("ltx_cite_range"))
        .iter()
        .filter_map(|p| doc.element_at(p).and_then(|e| e.get_attribute("data-range")))
        .collect();
    assert_eq!(ranges, vec!["3-5", "1-2", "7"]);
}

#[test]
fn test_page_structure() {
    let (_, output) = decorate_fixture();
    let doc = ltx_html::parse(&output.html).unwrap();

    assert_eq!(
        body_elements(&doc),
        vec![
            "header.ltx_addons_header",
            "div.ltx_page_main",
            "footer.ltx_document",
            "footer.ltx_page_footer",
            "div.ltx_cite_modal",
        ]
    );

    // The table of contents moved into #main, labelled.
    let main = doc.find_by_id("main").unwrap();
    let first = main.child_elements().next().unwrap();
    assert_eq!(first.name, "nav");
    assert_eq!(first.get_attribute("aria-labelledby"), Some("toc_header"));
    assert!(doc.find(|e| e.has_class("ltx_page_navbar")).is_none());

    // LaTeXML's own footer is gone and the configured date is shown.
    let text = doc.text_content();
    assert!(!text.contains("by LaTeXML"));
    assert!(text.contains("Generated on Wed Jan 10 12:00:00 2024 by"));

    // The paper identifier comes from the directory name.
    let abs = doc.find(|e| e.has_class("back-to-abstract")).unwrap();
    assert_eq!(abs.get_attribute("href"), Some("https://arxiv.org/abs/2401.00001v1"));
}

#[test]
fn test_markup_outside_decorations_is_preserved() {
    let (_, output) = decorate_fixture();
    assert!(output.html.starts_with("<!DOCTYPE html>"));
    assert!(output.html.contains(r#"<mspace width="0.2em"/>"#));
    assert!(output.html.contains(
        r#"<script src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>"#
    ));
    assert!(output.html.contains(r#"href="https://example.org/paper?id=5&amp;format=pdf""#));
    assert!(!output.html.contains("&amp;amp;"));
}

#[test]
fn test_back_references_point_at_first_token() {
    let (_, output) = decorate_fixture();
    let doc = ltx_html::parse(&output.html).unwrap();

    let back_ref = |id: &str| {
        doc.find_by_id(id)
            .and_then(|entry| entry.find(|e| e.has_class("ltx_back_ref")))
            .and_then(|a| a.get_attribute("href"))
            .map(str::to_string)
    };
    assert_eq!(back_ref("bib.bib3").as_deref(), Some("#cite-ref-1"));
    assert_eq!(back_ref("bib.bib5").as_deref(), Some("#cite-ref-1"));
    assert_eq!(back_ref("bib.bib1").as_deref(), Some("#cite-ref-2"));
    assert_eq!(back_ref("bib.bib7").as_deref(), Some("#cite-ref-3"));
}

#[test]
fn test_diagnostics_are_non_fatal() {
    let (_, output) = decorate_fixture();
    assert!(output.diagnostics.iter().all(|d| !d.is_error()));
}

#[test]
fn test_modal_session() {
    let (config, output) = decorate_fixture();
    let mut doc = ltx_html::parse(&output.html).unwrap();
    let mut modal = ModalController::new(config.modal_options());

    // bib.bib4 does not exist: two entries, no error.
    let opened = modal
        .handle(&mut doc, ModalEvent::Activate("3-5".to_string()))
        .unwrap();
    assert_eq!(opened, Transition::Opened { range: "3-5".to_string() });
    assert_eq!(modal.rendered_entries(), ["bib.bib3", "bib.bib5"]);
    let dialog = doc.find(|e| e.has_class("ltx_cite_modal")).unwrap().to_string();
    assert!(dialog.contains(r#"href="https://example.org/paper?id=5&amp;format=pdf""#));
    assert!(!dialog.contains("&amp;amp;"));
    let warnings = modal.take_diagnostics();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code.as_deref(), Some("L-3-1"));

    let title = doc.find_by_id("cite-modal-title").unwrap();
    assert_eq!(title.text_content(), "References 3-5");

    // Everything but the dialog is hidden from assistive technology.
    let body = doc.element_at(&doc.body_path().unwrap()).unwrap();
    for element in body.child_elements() {
        let hidden = element.get_attribute("aria-hidden") == Some("true");
        assert_eq!(hidden, !element.has_class("ltx_cite_modal"), "{}", element.name);
    }

    // Focus starts on the close control and wraps both ways.
    assert_eq!(modal.focused(&doc).and_then(|e| e.id()), Some("cite-modal-close"));
    let Transition::FocusMoved { index: last } = modal.handle(&mut doc, ModalEvent::Key(Key::ShiftTab)).unwrap() else {
        panic!("focus did not move");
    };
    assert!(last > 0);
    assert_eq!(
        modal.handle(&mut doc, ModalEvent::Key(Key::Tab)).unwrap(),
        Transition::FocusMoved { index: 0 }
    );

    // A second activation re-populates the open dialog.
    assert_eq!(
        modal.handle(&mut doc, ModalEvent::Activate("7".to_string())).unwrap(),
        Transition::Repopulated { range: "7".to_string() }
    );
    assert_eq!(modal.rendered_entries(), ["bib.bib7"]);
    assert_eq!(doc.find_all_paths(|e| e.has_class("ltx_cite_modal")).len(), 1);

    assert_eq!(
        modal.handle(&mut doc, ModalEvent::Key(Key::Escape)).unwrap(),
        Transition::Closed
    );
    assert_eq!(modal.state(), &ModalState::Closed);
    assert!(!modal.is_intercepting_keys());
    assert_eq!(doc.to_string(), output.html);
}

#[test]
fn test_click_outside_closes() {
    let (config, output) = decorate_fixture();
    let mut doc = ltx_html::parse(&output.html).unwrap();
    let mut modal = ModalController::new(config.modal_options());

    modal
        .handle(&mut doc, ModalEvent::Activate("1-2".to_string()))
        .unwrap();
    let inside = doc.find_path_by_id("cite-modal-title").unwrap();
    assert_eq!(
        modal.handle(&mut doc, ModalEvent::Click(inside)).unwrap(),
        Transition::Ignored
    );

    let overlay = doc.find_path_by_id("cite-modal").unwrap();
    assert_eq!(
        modal.handle(&mut doc, ModalEvent::Click(overlay)).unwrap(),
        Transition::Closed
    );
    assert_eq!(
        modal.handle(&mut doc, ModalEvent::Click(NodePath::root(0))).unwrap(),
        Transition::Ignored
    );
}
