//! The windowed editor: a tao event loop hosting a single wry webview.
//!
//! The webview page (see `shell`) is a thin projection surface. Every piece
//! of state that matters lives here: the document text, the slide navigator,
//! the rate limiters, the image cache and the file watcher. The page posts
//! IPC messages; this module decides and pushes the result back with
//! `evaluate_script`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context as _;
use serde::Deserialize;
use tao::dpi::LogicalSize;
use tao::event::{Event, StartCause, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use tao::window::{Fullscreen, Window, WindowBuilder};
use wry::{WebView, WebViewBuilder};

use crate::assets;
use crate::commands::export;
use crate::config::Config;
use crate::images::ImageCache;
use crate::input::{self, NavCommand};
use crate::limiter::{Debouncer, WheelGate};
use crate::navigator::{Navigator, ViewMode};
use crate::render;
use crate::shell;
use crate::watcher::DocumentWatcher;

const WIDTH: f64 = 1280.0;
const HEIGHT: f64 = 800.0;

const WELCOME: &str = "\
# Welcome to mdpress

Type markdown on the left, see it rendered on the right.

Separate slides with a line of dashes:

---

## Presenting

- **Present** runs the deck fullscreen
- **Mini Present** keeps the editor beside a slide strip
- Arrow keys, Space, PageUp/PageDown and the mouse wheel navigate
- `F` toggles fullscreen, `Escape` leaves

---

## Files

Open a file to edit it with live reload on external changes,
then **Export** a print-ready deck.
";

/// Events crossing from other threads into the event loop.
pub enum UserEvent {
    /// Raw IPC payload from the webview, decoded on the main thread.
    Ipc(String),
    /// The watched document changed on disk. The stamp identifies which
    /// document load the watch belongs to; stale stamps are dropped.
    FileChanged { generation: u64 },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum IpcMessage {
    Ready,
    TextChanged { text: String },
    Key { key: String },
    Wheel { delta_y: f64 },
    OpenFile,
    TogglePreview,
    TogglePresentation,
    ToggleCompact,
    Export,
    PrevSlide,
    NextSlide,
}

struct EditorApp {
    window: Arc<Window>,
    webview: WebView,
    proxy: EventLoopProxy<UserEvent>,
    document: String,
    document_path: Option<PathBuf>,
    pending_file: Option<PathBuf>,
    navigator: Navigator,
    render_debounce: Debouncer,
    wheel_gate: WheelGate,
    images: ImageCache,
    watcher: DocumentWatcher,
    preview_visible: bool,
    // tao reports fullscreen asynchronously on some platforms; only treat a
    // non-fullscreen resize as "the host kicked us out" once we have actually
    // observed the window in fullscreen.
    entered_os_fullscreen: bool,
}

impl EditorApp {
    fn handle_ipc(&mut self, raw: &str) {
        let message: IpcMessage = match serde_json::from_str(raw) {
            Ok(message) => message,
            Err(err) => {
                eprintln!("mdpress: bad ipc message: {err}");
                return;
            }
        };

        match message {
            IpcMessage::Ready => self.on_ready(),
            IpcMessage::TextChanged { text } => {
                self.document = text;
                self.render_debounce.poke(Instant::now());
            }
            IpcMessage::Key { key } => {
                if let Some(command) = input::command_for_key(&key) {
                    self.apply_command(command);
                }
            }
            IpcMessage::Wheel { delta_y } => {
                if !self.navigator.mode().is_presenting() {
                    return;
                }
                if let Some(command) = input::command_for_wheel(delta_y) {
                    if self.wheel_gate.accept(Instant::now()) {
                        self.apply_command(command);
                    }
                }
            }
            IpcMessage::OpenFile => self.open_file_dialog(),
            IpcMessage::TogglePreview => {
                self.preview_visible = !self.preview_visible;
                self.set_preview_visible();
                if self.preview_visible {
                    self.refresh_preview();
                }
            }
            IpcMessage::TogglePresentation => self.toggle_mode(ViewMode::Fullscreen),
            IpcMessage::ToggleCompact => self.toggle_mode(ViewMode::Compact),
            IpcMessage::Export => self.export_deck(),
            IpcMessage::PrevSlide => {
                if self.navigator.previous() {
                    self.project_slide();
                }
            }
            IpcMessage::NextSlide => {
                if self.navigator.next() {
                    self.project_slide();
                }
            }
        }
    }

    /// The page finished loading; push the initial state into it.
    fn on_ready(&mut self) {
        self.set_preview_visible();
        match self.pending_file.take() {
            Some(path) => self.load_document(path),
            None => {
                self.document = WELCOME.to_string();
                self.set_editor(WELCOME);
                self.refresh_preview();
            }
        }
    }

    fn apply_command(&mut self, command: NavCommand) {
        if !self.navigator.mode().is_presenting() {
            return;
        }
        let moved = match command {
            NavCommand::Next => self.navigator.next(),
            NavCommand::Previous => self.navigator.previous(),
            NavCommand::First => self.navigator.first(),
            NavCommand::Last => self.navigator.last(),
            NavCommand::Exit => {
                self.leave_presentation();
                return;
            }
            NavCommand::ToggleFullscreen => {
                // Leaves fullscreen, or promotes the compact strip to it.
                self.toggle_mode(ViewMode::Fullscreen);
                return;
            }
        };
        if moved {
            self.project_slide();
        }
    }

    /// Enter `mode` if it is not active, otherwise leave it. Fullscreen and
    /// compact replace each other; the window follows the navigator.
    fn toggle_mode(&mut self, mode: ViewMode) {
        if self.navigator.mode() == mode {
            self.leave_presentation();
            return;
        }
        if !self.navigator.enter(mode, &self.document) {
            self.toast("Nothing to present");
            return;
        }
        match mode {
            ViewMode::Fullscreen => {
                self.window
                    .set_fullscreen(Some(Fullscreen::Borderless(None)));
            }
            _ => {
                self.window.set_fullscreen(None);
                self.entered_os_fullscreen = false;
            }
        }
        self.set_mode();
        self.project_slide();
    }

    fn leave_presentation(&mut self) {
        if self.navigator.mode() == ViewMode::Fullscreen {
            self.window.set_fullscreen(None);
        }
        self.entered_os_fullscreen = false;
        self.navigator.exit();
        self.set_mode();
        if self.preview_visible {
            self.refresh_preview();
        }
    }

    /// The platform can revoke fullscreen on its own (another app grabs the
    /// screen, the user hits the system shortcut). Fold that back into our
    /// state so the webview and the navigator agree with reality.
    fn host_state_changed(&mut self) {
        match self.window.fullscreen() {
            Some(_) => {
                if self.navigator.mode() == ViewMode::Fullscreen {
                    self.entered_os_fullscreen = true;
                }
            }
            None => {
                if self.navigator.mode() == ViewMode::Fullscreen && self.entered_os_fullscreen {
                    self.leave_presentation();
                }
            }
        }
    }

    fn open_file_dialog(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("Markdown", &["md", "markdown", "txt"])
            .pick_file();
        if let Some(path) = picked {
            self.load_document(path);
        }
    }

    fn load_document(&mut self, path: PathBuf) {
        let content = match assets::read_document(&path) {
            Ok(content) => content,
            Err(err) => {
                // Blocking notice; the previous document stays in place.
                self.alert(&format!("Could not open file:\n{err:#}"));
                return;
            }
        };

        self.document = content;
        self.document_path = Some(path.clone());
        let generation = self.images.retarget(Some(path.clone()));

        let proxy = self.proxy.clone();
        if let Err(err) = self.watcher.watch(&path, move || {
            let _ = proxy.send_event(UserEvent::FileChanged { generation });
        }) {
            eprintln!("mdpress: {err:#}");
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        self.window.set_title(&format!("mdpress - {name}"));

        let text = self.document.clone();
        self.set_editor(&text);
        self.rerender();
    }

    /// The watched file changed on disk. A stamp from a superseded document
    /// load is ignored; by the time the event arrives the cache already
    /// belongs to someone else.
    fn reload_changed(&mut self, generation: u64) {
        if !self.images.is_current(generation) {
            return;
        }
        let Some(path) = self.document_path.clone() else {
            return;
        };
        match assets::read_document(&path) {
            Ok(content) => {
                self.document = content;
                self.images.invalidate();
                let text = self.document.clone();
                self.set_editor(&text);
                self.rerender();
                self.toast("Reloaded from disk");
            }
            Err(err) => {
                // Usually the file was deleted or replaced; the watch on the
                // old inode is dead either way.
                self.watcher.unwatch();
                eprintln!("mdpress: reload failed: {err:#}");
                self.toast("File changed on disk but could not be re-read");
            }
        }
    }

    fn export_deck(&mut self) {
        let (suggested, base) = match &self.document_path {
            Some(path) => {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| "slides".to_string());
                (format!("{stem}.deck.html"), Some(path.clone()))
            }
            None => ("slides.deck.html".to_string(), None),
        };

        let Some(output) = rfd::FileDialog::new()
            .add_filter("HTML deck", &["html"])
            .set_file_name(&suggested)
            .save_file()
        else {
            return;
        };

        let title = output
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "slides".to_string());
        match export::write_deck(&self.document, base, &output, &title) {
            Ok(count) => self.toast(&format!("Exported {count} slides")),
            Err(err) => self.alert(&format!("Export failed:\n{err:#}")),
        }
    }

    /// Run the pending debounced render if its quiet window has elapsed.
    fn tick(&mut self, now: Instant) {
        if self.render_debounce.fire(now) {
            self.rerender();
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.render_debounce.deadline()
    }

    /// Route the current document to whichever surface is active.
    fn rerender(&mut self) {
        if self.navigator.mode().is_presenting() {
            let document = std::mem::take(&mut self.document);
            self.navigator.document_changed(&document);
            self.document = document;
            self.project_slide();
        } else if self.preview_visible {
            self.refresh_preview();
        }
    }

    fn refresh_preview(&mut self) {
        let document = std::mem::take(&mut self.document);
        let html = render::render_markdown_to_html(&document, &mut self.images);
        self.document = document;
        self.call("setPreview", &[js_str(&html)]);
    }

    fn project_slide(&mut self) {
        let index = self.navigator.current_index();
        let total = self.navigator.slide_count();
        let html = match self.navigator.current_slide().map(str::to_string) {
            Some(slide) => render::render_markdown_to_html(&slide, &mut self.images),
            None => String::new(),
        };
        self.call(
            "showSlide",
            &[js_str(&html), index.to_string(), total.to_string()],
        );
    }

    fn set_mode(&self) {
        let mode = match self.navigator.mode() {
            ViewMode::Inline => "inline",
            ViewMode::Fullscreen => "fullscreen",
            ViewMode::Compact => "compact",
        };
        self.call("setMode", &[js_str(mode)]);
    }

    fn set_editor(&self, text: &str) {
        self.call("setEditor", &[js_str(text)]);
    }

    fn set_preview_visible(&self) {
        self.call("setPreviewVisible", &[self.preview_visible.to_string()]);
    }

    fn toast(&self, message: &str) {
        self.call("toast", &[js_str(message)]);
    }

    fn alert(&self, message: &str) {
        self.call("alertError", &[js_str(message)]);
    }

    fn call(&self, function: &str, args: &[String]) {
        let script = format!("window.mdpress.{}({})", function, args.join(", "));
        if let Err(err) = self.webview.evaluate_script(&script) {
            eprintln!("mdpress: script error in {function}: {err}");
        }
    }
}

/// JSON string literals are valid JavaScript string literals.
fn js_str(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Launch the editor window, optionally loading `file`, and run until the
/// window closes.
pub fn run(file: Option<PathBuf>) -> anyhow::Result<()> {
    let config = Config::load_or_default();

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title("mdpress")
        .with_inner_size(LogicalSize::new(WIDTH, HEIGHT))
        .build(&event_loop)
        .context("failed to create window")?;
    let window = Arc::new(window);

    let ipc_proxy = proxy.clone();
    let webview = WebViewBuilder::new()
        .with_html(shell::index_html())
        .with_ipc_handler(move |req| {
            let _ = ipc_proxy.send_event(UserEvent::Ipc(req.body().clone()));
        })
        .build(&window)
        .context("failed to create webview")?;

    let mut app = EditorApp {
        window,
        webview,
        proxy,
        document: String::new(),
        document_path: None,
        pending_file: file,
        navigator: Navigator::new(),
        render_debounce: Debouncer::new(config.render_debounce()),
        wheel_gate: WheelGate::new(config.wheel_debounce()),
        images: ImageCache::new(),
        watcher: DocumentWatcher::new(),
        preview_visible: config.show_preview(),
        entered_os_fullscreen: false,
    };

    event_loop.run(move |event, _target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(UserEvent::Ipc(raw)) => app.handle_ipc(&raw),
            Event::UserEvent(UserEvent::FileChanged { generation }) => {
                app.reload_changed(generation)
            }
            Event::NewEvents(StartCause::ResumeTimeReached { .. }) => app.tick(Instant::now()),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                *control_flow = ControlFlow::Exit;
                return;
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } => app.host_state_changed(),
            _ => {}
        }

        if let Some(deadline) = app.next_deadline() {
            *control_flow = ControlFlow::WaitUntil(deadline);
        }
    });
}
