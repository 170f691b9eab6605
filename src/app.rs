use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError};

use arboard::Clipboard;
use tracing::{info, warn};

use crate::action::Action;
use crate::backend::{self, Framework, GenClient, GenError, GenerateRequest};
use crate::command::{CommandParser, COMMANDS};
use crate::config::Config;
use crate::editor::CodeEditor;
use crate::extract;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Workbench,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Prompt,
    Framework,
    Output,
}

/// Lifecycle of the output panel. `Empty` is the initial state and is never
/// re-entered on its own; a failed request falls back to whatever state was
/// active when the request was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Source,
    Preview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Transient footer notification, expired by the tick counter.
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    ticks_left: u64,
}

/// Transient state of the preview surface. `generation` only ever grows;
/// bumping it discards the surface (scroll and all) without touching the
/// underlying code.
#[derive(Default)]
pub struct PreviewState {
    pub generation: u64,
    pub scroll: usize,
}

impl PreviewState {
    pub fn refresh(&mut self) {
        self.generation += 1;
        self.scroll = 0;
    }
}

pub struct App {
    pub config: Config,
    client: GenClient,
    pub screen: Screen,
    pub focus: Focus,
    pub phase: Phase,
    prior_phase: Phase,
    pub view: View,
    pub prompt: String,
    pub framework_idx: usize,
    pub code: CodeEditor,
    pub preview: PreviewState,
    pub notice: Option<Notice>,
    pub command_selection: Option<usize>,
    pub help_visible: bool,
    pub should_quit: bool,
    pub animation_frame: usize,
    pending: Option<Receiver<Result<String, GenError>>>,
}

impl App {
    pub fn new(config: Config) -> Result<Self, GenError> {
        let client = GenClient::new(&config)?;
        Ok(Self {
            config,
            client,
            screen: Screen::Splash,
            focus: Focus::Prompt,
            phase: Phase::Empty,
            prior_phase: Phase::Empty,
            view: View::Source,
            prompt: String::new(),
            framework_idx: 0,
            code: CodeEditor::new(),
            preview: PreviewState::default(),
            notice: None,
            command_selection: None,
            help_visible: false,
            should_quit: false,
            animation_frame: 0,
            pending: None,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    pub fn framework(&self) -> Framework {
        Framework::ALL[self.framework_idx]
    }

    pub fn framework_up(&mut self) {
        self.framework_idx = self
            .framework_idx
            .checked_sub(1)
            .unwrap_or(Framework::ALL.len() - 1);
    }

    pub fn framework_down(&mut self) {
        self.framework_idx = (self.framework_idx + 1) % Framework::ALL.len();
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Code edits are accepted only with the source view focused and no
    /// request in flight, so a completing generation can never clobber
    /// concurrent hand edits.
    pub fn editing_enabled(&self) -> bool {
        self.phase == Phase::Ready && self.view == View::Source && self.focus == Focus::Output
    }

    pub fn tick(&mut self) {
        self.animation_frame = (self.animation_frame + 1) % self.config.animation_frame_mod;

        if let Some(notice) = &mut self.notice {
            notice.ticks_left = notice.ticks_left.saturating_sub(1);
            if notice.ticks_left == 0 {
                self.notice = None;
            }
        }

        self.poll_pending();
    }

    pub fn notify(&mut self, kind: NoticeKind, text: &str) {
        self.notice = Some(Notice {
            text: text.to_string(),
            kind,
            ticks_left: self.config.status_timeout_ticks,
        });
    }

    // ── Generation ───────────────────────────────────────────────

    /// Validate and dispatch the prompt. A request already in flight makes
    /// this a no-op; that is the only concurrency guard in the program.
    pub fn submit(&mut self) {
        if self.phase == Phase::Loading {
            return;
        }

        let request = match GenerateRequest::new(&self.prompt, self.framework()) {
            Ok(request) => request,
            Err(_) => {
                self.notify(NoticeKind::Error, "Please describe your component first.");
                return;
            }
        };

        self.prior_phase = self.phase;
        self.phase = Phase::Loading;
        self.pending = Some(backend::spawn_generate(self.client.clone(), request));
    }

    /// Enter on the prompt: apply a popup selection, run a slash command, or
    /// dispatch the prompt to the backend.
    pub fn submit_input(&mut self) {
        if self.showing_command_popup() && self.command_selection.is_some() {
            self.apply_command_selection();
            return;
        }
        if self.prompt.trim_start().starts_with('/') {
            self.run_command();
            return;
        }
        self.submit();
    }

    fn run_command(&mut self) {
        match CommandParser::parse(&self.prompt) {
            Ok(action) => {
                self.prompt.clear();
                self.reset_command_selection();
                self.handle_action(action);
            }
            // Keep the input so a typo can be fixed in place.
            Err(message) => self.notify(NoticeKind::Error, &message),
        }
    }

    fn poll_pending(&mut self) {
        let outcome = match &self.pending {
            None => return,
            Some(rx) => match rx.try_recv() {
                Ok(outcome) => Some(outcome),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => Some(Err(GenError::Transport(
                    "worker thread disappeared".to_string(),
                ))),
            },
        };
        let Some(outcome) = outcome else { return };
        self.pending = None;

        match outcome {
            Ok(raw) => self.finish_generation(&raw),
            Err(error) => {
                warn!(%error, "generation failed");
                self.phase = self.prior_phase;
                self.notify(NoticeKind::Error, "Failed to generate code. Please try again.");
            }
        }
    }

    fn finish_generation(&mut self, raw: &str) {
        let markup = if self.config.strip_fences {
            extract::extract_markup(raw)
        } else {
            extract::verbatim(raw)
        };
        info!(bytes = markup.len(), "generation complete");
        self.code.set_text(&markup);
        self.phase = Phase::Ready;
        self.view = View::Source;
        self.preview.refresh();
    }

    // ── Actions ──────────────────────────────────────────────────

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::CopyCode => self.copy_code(),
            Action::ExportCode => self.export_code(),
            Action::RefreshPreview => self.refresh_preview(),
            Action::ShowSource => self.show_view(View::Source),
            Action::ShowPreview => self.show_view(View::Preview),
            Action::ToggleRawResult => {
                self.config.strip_fences = !self.config.strip_fences;
                let text = if self.config.strip_fences {
                    "Stripping fenced blocks from responses"
                } else {
                    "Taking responses verbatim"
                };
                self.notify(NoticeKind::Info, text);
            }
            Action::ClearPrompt => {
                self.prompt.clear();
                self.reset_command_selection();
            }
            Action::Help => self.help_visible = !self.help_visible,
            Action::Quit => self.should_quit = true,
        }
    }

    pub fn show_view(&mut self, view: View) {
        if self.phase == Phase::Ready {
            self.view = view;
        }
    }

    pub fn toggle_view(&mut self) {
        match self.view {
            View::Source => self.show_view(View::Preview),
            View::Preview => self.show_view(View::Source),
        }
    }

    /// Remount the preview surface; the code underneath is untouched.
    pub fn refresh_preview(&mut self) {
        if self.phase == Phase::Ready {
            self.preview.refresh();
        }
    }

    fn copy_code(&mut self) {
        if self.phase != Phase::Ready {
            self.notify(NoticeKind::Error, "Nothing to copy yet");
            return;
        }
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(self.code.text())) {
            Ok(()) => self.notify(NoticeKind::Success, "Code copied to clipboard"),
            Err(error) => {
                warn!(%error, "clipboard write failed");
                self.notify(NoticeKind::Error, "Failed to copy");
            }
        }
    }

    fn export_code(&mut self) {
        if self.phase != Phase::Ready {
            self.notify(NoticeKind::Error, "Nothing to export yet");
            return;
        }
        match self.export_to(Path::new(".")) {
            Ok(path) => {
                info!(path = %path.display(), "component exported");
                self.notify(NoticeKind::Success, "File downloaded");
            }
            Err(error) => {
                warn!(%error, "export failed");
                self.notify(NoticeKind::Error, "Failed to export file");
            }
        }
    }

    /// Write the current code to `<dir>/<export_filename>`.
    pub fn export_to(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(&self.config.export_filename);
        fs::write(&path, self.code.text())?;
        Ok(path)
    }

    // ── Prompt input ─────────────────────────────────────────────

    pub fn prompt_insert(&mut self, c: char) {
        self.prompt.push(c);
        self.reset_command_selection();
    }

    pub fn prompt_backspace(&mut self) {
        self.prompt.pop();
        self.reset_command_selection();
    }

    /// Paste into the prompt; the box is a single wrapped field, so embedded
    /// newlines become spaces.
    pub fn prompt_paste(&mut self, text: &str) {
        let filtered: String = text
            .chars()
            .filter(|c| *c != '\r')
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        self.prompt.push_str(&filtered);
        self.reset_command_selection();
    }

    // ── Focus and escape ─────────────────────────────────────────

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Prompt => Focus::Framework,
            Focus::Framework => Focus::Output,
            Focus::Output => Focus::Prompt,
        };
    }

    pub fn cycle_focus_back(&mut self) {
        self.focus = match self.focus {
            Focus::Prompt => Focus::Output,
            Focus::Framework => Focus::Prompt,
            Focus::Output => Focus::Framework,
        };
    }

    /// Esc closes overlays first, then clears the prompt, then quits.
    pub fn escape(&mut self) {
        if self.help_visible {
            self.help_visible = false;
        } else if self.focus == Focus::Prompt && !self.prompt.is_empty() {
            self.prompt.clear();
            self.reset_command_selection();
        } else {
            self.should_quit = true;
        }
    }

    // ── Command popup ────────────────────────────────────────────

    pub fn showing_command_popup(&self) -> bool {
        self.focus == Focus::Prompt && self.prompt.starts_with('/') && !self.prompt.contains(' ')
    }

    pub fn get_filtered_commands(&self) -> Vec<(&'static str, &'static str)> {
        if !self.prompt.starts_with('/') {
            return vec![];
        }
        let filter = &self.prompt[1..];
        COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd[1..].starts_with(filter))
            .copied()
            .collect()
    }

    pub fn command_select_up(&mut self) {
        let filtered = self.get_filtered_commands();
        if filtered.is_empty() {
            return;
        }
        // Cycle: None -> last command -> ... -> 0 -> None
        self.command_selection = match self.command_selection {
            None => Some(filtered.len() - 1),
            Some(0) => None,
            Some(n) => Some(n - 1),
        };
    }

    pub fn command_select_down(&mut self) {
        let filtered = self.get_filtered_commands();
        if filtered.is_empty() {
            return;
        }
        // Cycle: None -> 0 -> 1 -> ... -> last -> None
        self.command_selection = match self.command_selection {
            None => Some(0),
            Some(n) if n >= filtered.len() - 1 => None,
            Some(n) => Some(n + 1),
        };
    }

    pub fn apply_command_selection(&mut self) {
        if let Some(idx) = self.command_selection {
            let filtered = self.get_filtered_commands();
            if let Some((cmd, _)) = filtered.get(idx) {
                self.prompt = cmd.to_string();
            }
        }
        self.command_selection = None;
    }

    pub fn reset_command_selection(&mut self) {
        self.command_selection = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn offline_app() -> App {
        // Port 9 (discard) so an accidental dispatch fails fast.
        let config = Config {
            api_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        };
        App::new(config).unwrap()
    }

    fn inject_completion(app: &mut App, outcome: Result<String, GenError>) {
        let (tx, rx) = mpsc::channel();
        app.prior_phase = app.phase;
        app.phase = Phase::Loading;
        app.pending = Some(rx);
        tx.send(outcome).unwrap();
        app.tick();
    }

    #[test]
    fn blank_prompt_dispatches_nothing() {
        let mut app = offline_app();
        app.prompt = "   \t ".to_string();
        app.submit();

        assert!(app.pending.is_none());
        assert_eq!(app.phase, Phase::Empty);
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
    }

    #[test]
    fn submit_enters_loading_with_one_request_in_flight() {
        let mut app = offline_app();
        app.prompt = "a pricing card".to_string();
        app.submit();

        assert_eq!(app.phase, Phase::Loading);
        assert!(app.pending.is_some());

        // A second click while in flight is a no-op.
        app.submit();
        assert_eq!(app.phase, Phase::Loading);
    }

    #[test]
    fn successful_generation_lands_on_source_view() {
        let mut app = offline_app();
        inject_completion(&mut app, Ok("```html\n<div>hi</div>\n```".to_string()));

        assert_eq!(app.phase, Phase::Ready);
        assert_eq!(app.view, View::Source);
        assert_eq!(app.code.text(), "<div>hi</div>");
        assert_eq!(app.preview.generation, 1);
    }

    #[test]
    fn verbatim_mode_keeps_fences() {
        let mut app = offline_app();
        app.config.strip_fences = false;
        inject_completion(&mut app, Ok("```html\n<div>hi</div>\n```".to_string()));

        assert_eq!(app.code.text(), "```html\n<div>hi</div>\n```");
    }

    #[test]
    fn failure_keeps_code_and_restores_prior_phase() {
        let mut app = offline_app();
        app.code.set_text("<p>previous</p>");
        app.phase = Phase::Ready;

        inject_completion(&mut app, Err(GenError::Transport("boom".to_string())));

        assert_eq!(app.phase, Phase::Ready);
        assert_eq!(app.code.text(), "<p>previous</p>");
        assert!(app.pending.is_none());
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
    }

    #[test]
    fn failure_before_first_generation_stays_empty() {
        let mut app = offline_app();
        inject_completion(&mut app, Err(GenError::Transport("boom".to_string())));

        assert_eq!(app.phase, Phase::Empty);
        assert!(app.code.is_empty());
    }

    #[test]
    fn dead_worker_counts_as_failure() {
        let mut app = offline_app();
        app.code.set_text("<p>kept</p>");
        app.phase = Phase::Ready;

        let (tx, rx) = mpsc::channel::<Result<String, GenError>>();
        app.prior_phase = app.phase;
        app.phase = Phase::Loading;
        app.pending = Some(rx);
        drop(tx);
        app.tick();

        assert_eq!(app.phase, Phase::Ready);
        assert_eq!(app.code.text(), "<p>kept</p>");
        assert!(app.notice.is_some());
    }

    #[test]
    fn view_toggles_never_touch_the_code() {
        let mut app = offline_app();
        inject_completion(&mut app, Ok("<div>stable</div>".to_string()));

        app.toggle_view();
        assert_eq!(app.view, View::Preview);
        app.toggle_view();
        assert_eq!(app.view, View::Source);
        assert_eq!(app.code.text(), "<div>stable</div>");
    }

    #[test]
    fn view_switch_is_inert_before_first_generation() {
        let mut app = offline_app();
        app.show_view(View::Preview);
        assert_eq!(app.view, View::Source);
    }

    #[test]
    fn refresh_remounts_preview_without_touching_code() {
        let mut app = offline_app();
        inject_completion(&mut app, Ok("<div>x</div>".to_string()));
        app.preview.scroll = 7;
        let before = app.preview.generation;

        app.refresh_preview();

        assert_eq!(app.preview.generation, before + 1);
        assert_eq!(app.preview.scroll, 0);
        assert_eq!(app.code.text(), "<div>x</div>");
    }

    #[test]
    fn export_reads_the_buffer_at_invocation_time() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = offline_app();
        inject_completion(&mut app, Ok("<p>v1</p>".to_string()));

        let path = app.export_to(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>v1</p>");

        // Hand edits land in the next export, not a stale snapshot.
        app.code.set_text("<p>v2</p>");
        app.export_to(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>v2</p>");
    }

    #[test]
    fn notices_expire_with_the_tick_counter() {
        let mut app = offline_app();
        app.notify(NoticeKind::Info, "hello");
        for _ in 0..app.config.status_timeout_ticks {
            app.tick();
        }
        assert!(app.notice.is_none());
    }

    #[test]
    fn command_popup_filters_by_prefix() {
        let mut app = offline_app();
        app.prompt = "/c".to_string();
        let filtered = app.get_filtered_commands();
        let names: Vec<&str> = filtered.iter().map(|(cmd, _)| *cmd).collect();
        assert_eq!(names, vec!["/copy", "/code", "/clear"]);
        assert!(app.showing_command_popup());
    }

    #[test]
    fn command_selection_cycles_through_none() {
        let mut app = offline_app();
        app.prompt = "/e".to_string();
        assert_eq!(app.get_filtered_commands().len(), 1);

        app.command_select_down();
        assert_eq!(app.command_selection, Some(0));
        app.command_select_down();
        assert_eq!(app.command_selection, None);
        app.command_select_up();
        assert_eq!(app.command_selection, Some(0));
    }

    #[test]
    fn unknown_command_leaves_prompt_for_editing() {
        let mut app = offline_app();
        app.prompt = "/frob".to_string();
        app.submit_input();

        assert_eq!(app.prompt, "/frob");
        assert!(app.pending.is_none());
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
    }

    #[test]
    fn clear_command_empties_the_prompt() {
        let mut app = offline_app();
        app.prompt = "/clear".to_string();
        app.submit_input();
        assert!(app.prompt.is_empty());
        assert!(app.pending.is_none());
    }

    #[test]
    fn raw_toggle_flips_normalizer_policy() {
        let mut app = offline_app();
        assert!(app.config.strip_fences);
        app.handle_action(Action::ToggleRawResult);
        assert!(!app.config.strip_fences);
        app.handle_action(Action::ToggleRawResult);
        assert!(app.config.strip_fences);
    }

    #[test]
    fn editing_is_locked_while_loading() {
        let mut app = offline_app();
        app.phase = Phase::Ready;
        app.view = View::Source;
        app.focus = Focus::Output;
        assert!(app.editing_enabled());

        app.phase = Phase::Loading;
        assert!(!app.editing_enabled());
    }

    #[test]
    fn paste_into_prompt_flattens_newlines() {
        let mut app = offline_app();
        app.prompt_paste("a\r\nmulti\nline prompt");
        assert_eq!(app.prompt, "a multi line prompt");
    }
}
