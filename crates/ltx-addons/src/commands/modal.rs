//! Modal command: replay citation modal events against a page.
//!
//! Prints one line per event with the resulting transition, then the final
//! state. Useful for checking a decorated page's bibliography ids and the
//! dialog's focus order without a browser.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use ltx_addons_core::{
    AddonsConfig, Key, ModalController, ModalEvent, ModalOptions, ModalState, Transition,
};
use ltx_html::{HtmlDocument, NodePath};

/// Arguments for the modal command
#[derive(Debug)]
pub struct ModalArgs {
    pub input: PathBuf,
    pub events: Vec<String>,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Execute the modal command
pub fn execute(args: ModalArgs) -> Result<()> {
    let (config, _) = AddonsConfig::discover(&args.input, args.config.as_deref())?;
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let mut doc = ltx_html::parse(&source)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    let options = config.modal_options();
    let mut modal = ModalController::new(options.clone());
    for name in &args.events {
        let event = parse_event(name, &doc, &options)?;
        let transition = modal
            .handle(&mut doc, event)
            .with_context(|| format!("Event `{}` failed", name))?;
        println!("{} -> {}", name, describe(&transition, &modal, &doc));
        super::report(&modal.take_diagnostics(), None, false);
    }

    match modal.state() {
        ModalState::Closed => println!("state: closed"),
        ModalState::Open { range } => println!("state: open {}", range),
    }

    if let Some(output) = &args.output {
        fs::write(output, doc.to_string())
            .with_context(|| format!("Failed to write {}", output.display()))?;
    }
    Ok(())
}

/// Parse an event name given on the command line.
fn parse_event(name: &str, doc: &HtmlDocument, options: &ModalOptions) -> Result<ModalEvent> {
    if let Some(range) = name.strip_prefix("open:") {
        return Ok(ModalEvent::Activate(range.to_string()));
    }
    Ok(match name {
        "tab" => ModalEvent::Key(Key::Tab),
        "shift-tab" => ModalEvent::Key(Key::ShiftTab),
        "escape" => ModalEvent::Key(Key::Escape),
        "close" => ModalEvent::CloseButton,
        "dismiss" => ModalEvent::Dismiss,
        // Without a dialog nothing is open, and any click is ignored.
        "click-inside" => ModalEvent::Click(
            doc.find_path_by_id(&options.title_id())
                .unwrap_or_else(|| NodePath::root(0)),
        ),
        // The dialog element itself is the backdrop around its content.
        "click-outside" => ModalEvent::Click(
            doc.find_path_by_id(&options.dialog_id)
                .unwrap_or_else(|| NodePath::root(0)),
        ),
        other => anyhow::bail!(
            "Unknown event `{}` (expected open:<RANGE>, tab, shift-tab, escape, close, dismiss, click-inside or click-outside)",
            other
        ),
    })
}

fn describe(transition: &Transition, modal: &ModalController, doc: &HtmlDocument) -> String {
    let shown = |verb: &str, range: &str| {
        format!(
            "{} {} [{}]{}",
            verb,
            range,
            modal.rendered_entries().join(", "),
            focus_suffix(modal, doc)
        )
    };
    match transition {
        Transition::Opened { range } => shown("opened", range),
        Transition::Repopulated { range } => shown("repopulated", range),
        Transition::Closed => "closed".to_string(),
        Transition::FocusMoved { index } => format!("focus {}{}", index, focus_suffix(modal, doc)),
        Transition::Ignored => "ignored".to_string(),
    }
}

fn focus_suffix(modal: &ModalController, doc: &HtmlDocument) -> String {
    match modal.focused(doc) {
        Some(element) => match element.id() {
            Some(id) => format!(" (focus: {}#{})", element.name, id),
            None => format!(" (focus: {})", element.name),
        },
        None => String::new(),
    }
}
