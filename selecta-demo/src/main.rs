mod form;
mod paths;
mod screen;
mod view;

use std::collections::VecDeque;
use std::env;
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use selecta::prelude::*;
use selecta::{DropdownEvent, SelectaError};
use selecta_dom::{Cancellable, DomError};
use simplelog::{Config, LevelFilter, WriteLogger};
use thiserror::Error;

use crate::screen::Screen;
use crate::view::Frame;

const STATUS_LINES: usize = 4;

#[derive(Debug, Error)]
enum DemoError {
    #[error("terminal: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Selecta(#[from] SelectaError),

    #[error("building the form: {0}")]
    Dom(#[from] DomError),
}

fn init_logging() {
    let path = paths::log_file().unwrap_or_else(|| PathBuf::from("selecta-demo.log"));
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
                eprintln!("Failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", path.display(), e),
    }
}

/// Config from the first argument, else the user config file, else demo
/// defaults sized for a terminal.
fn load_config() -> Result<SelectaConfig, DemoError> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| paths::config_file().filter(|p| p.exists()));

    match path {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            Ok(SelectaConfig::from_json(&fs::read_to_string(path)?)?)
        }
        None => Ok(SelectaConfig::new().trigger_padding(0).wrapper_height(6)),
    }
}

/// Recent notifications shown under the form.
#[derive(Default)]
struct Status {
    lines: VecDeque<String>,
}

impl Status {
    fn push(&mut self, line: String) {
        if self.lines.len() == STATUS_LINES {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    fn record(&mut self, dropdowns: &mut DomDropdowns) {
        for event in dropdowns.take_events() {
            match event {
                DropdownEvent::Changed { control, index, value } => {
                    self.push(format!("{} picked #{} ({:?})", control, index, value));
                }
                other => log::debug!("{:?}", other),
            }
        }
        for change in dropdowns.document_mut().take_changes() {
            let field = dropdowns
                .document()
                .attr(change.target, "id")
                .unwrap_or_else(|| change.target.to_string());
            self.push(format!("change on #{} -> {}", field, change.value));
        }
    }

    fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
}

/// Natives of managed controls, in page order.
fn fields(dropdowns: &DomDropdowns) -> Vec<NodeId> {
    dropdowns
        .control_ids()
        .into_iter()
        .filter_map(|id| dropdowns.control(id).map(|c| *c.native()))
        .collect()
}

/// Move native focus forward or back, like the browser's tab order.
fn step_focus(dropdowns: &mut DomDropdowns, forward: bool) {
    let fields = fields(dropdowns);
    if fields.is_empty() {
        return;
    }
    let current = dropdowns
        .document()
        .focused()
        .and_then(|f| fields.iter().position(|n| *n == f));
    let next = match (current, forward) {
        (None, true) => 0,
        (None, false) => fields.len() - 1,
        (Some(i), true) => (i + 1) % fields.len(),
        (Some(i), false) => (i + fields.len() - 1) % fields.len(),
    };

    if let Some(old) = current.map(|i| fields[i]) {
        dropdowns.handle_blur(&old);
    }
    let target = fields[next];
    if let Err(e) = dropdowns.document_mut().focus(target) {
        log::warn!("focus {}: {}", target, e);
        return;
    }
    dropdowns.handle_focus(&target);
}

fn on_key(dropdowns: &mut DomDropdowns, code: KeyCode) {
    let mut event = KeyboardEvent::new(Key::from(code));
    if dropdowns.handle_key(&mut event).is_handled() || event.is_stopped() {
        return;
    }

    // Nothing open, or Tab passed through: the page's own behaviour.
    match event.key {
        Key::Tab => step_focus(dropdowns, true),
        Key::BackTab => step_focus(dropdowns, false),
        Key::Enter | Key::Down | Key::Char(' ') => {
            if let Some(native) = dropdowns.document().focused() {
                dropdowns.handle_focus(&native);
            }
        }
        _ => {}
    }
}

fn on_mouse(
    dropdowns: &mut DomDropdowns,
    frame: &Frame,
    kind: MouseEventKind,
    row: u16,
    hovered: &mut Option<NodeId>,
) {
    let target = frame.node_at(row);
    match kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let mut click = MouseEvent::new(target);
            dropdowns.dispatch_click(&mut click);
        }
        MouseEventKind::Moved if target != *hovered => {
            if let Some(old) = hovered.take() {
                dropdowns.handle_mouse_leave(&old);
            }
            if let Some(new) = target {
                dropdowns.handle_mouse_move(&new);
            }
            *hovered = target;
        }
        _ => {}
    }
}

fn run(dropdowns: &mut DomDropdowns) -> Result<(), DemoError> {
    let mut screen = Screen::new()?;
    let mut status = Status::default();
    let mut hovered = None;

    loop {
        let frame = Frame::build(dropdowns);
        screen.draw(&frame, &status.lines())?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if is_quit(&key) {
                    break;
                }
                on_key(dropdowns, key.code);
            }
            Event::Mouse(mouse) => {
                on_mouse(dropdowns, &frame, mouse.kind, mouse.row, &mut hovered);
            }
            _ => {}
        }
        status.record(dropdowns);
    }
    Ok(())
}

fn start() -> Result<(), DemoError> {
    let config = load_config()?;
    let mut dropdowns = DomDropdowns::with_document(form::sample_form()?, config);
    let ids = dropdowns.init()?;
    log::info!("Converted {} control(s)", ids.len());
    run(&mut dropdowns)
}

fn main() {
    init_logging();
    if let Err(e) = start() {
        eprintln!("Error: {}", e);
    }
}
