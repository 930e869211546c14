// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use promptdeck_app::{
    AppCommand, AppState, DraftField, EscapeOutcome, Prompt, PromptDraft, PromptId, PromptList,
    QueryMode, SearchFocus, SearchOverlay, SearchRequest, TabKind, TokenInput, TokenKeyOutcome,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::format_description::well_known::Rfc3339;

const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);
const CONTENT_PREVIEW_CHARS: usize = 64;

/// Write-only clipboard seam; the system implementation uses arboard.
pub trait ClipboardSink {
    fn copy_text(&mut self, text: &str) -> Result<()>;
}

pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("open system clipboard")?;
        clipboard
            .set_text(text.to_owned())
            .context("write to system clipboard")?;
        Ok(())
    }
}

/// Completed or failed filter request, stamped with the sequence number the
/// overlay issued. Stale stamps are dropped by the overlay itself.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    Completed { seq: u64, results: Vec<Prompt> },
    Failed { seq: u64, error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    Search(SearchEvent),
}

/// The seam the UI drives. One implementation wraps the remote store; the
/// testkit store backs tests and demo mode.
pub trait AppRuntime {
    fn health_check(&mut self) -> Result<()>;
    fn load_prompt_list(&mut self) -> Result<Vec<Prompt>>;
    fn run_search(&mut self, mode: &QueryMode) -> Result<Vec<Prompt>>;
    /// Dispatch a filter request without blocking the event loop. The
    /// default runs inline and posts the result; real runtimes spawn.
    fn spawn_search(
        &mut self,
        seq: u64,
        mode: QueryMode,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let event = match self.run_search(&mode) {
            Ok(results) => InternalEvent::Search(SearchEvent::Completed { seq, results }),
            Err(error) => InternalEvent::Search(SearchEvent::Failed {
                seq,
                error: error.to_string(),
            }),
        };
        tx.send(event)
            .map_err(|_| anyhow::anyhow!("search event channel closed"))?;
        Ok(())
    }
    fn create_prompt(&mut self, draft: &PromptDraft) -> Result<Prompt>;
    fn update_prompt(&mut self, id: &PromptId, draft: &PromptDraft) -> Result<Prompt>;
    fn set_favorite(&mut self, id: &PromptId, favorite: bool) -> Result<Prompt>;
    fn delete_prompt(&mut self, id: &PromptId) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FormUiState {
    title: String,
    content: String,
    tags: TokenInput,
    models: TokenInput,
    field: DraftField,
    target: Option<PromptId>,
}

impl Default for FormUiState {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            tags: TokenInput::default(),
            models: TokenInput::default(),
            field: DraftField::Title,
            target: None,
        }
    }
}

impl FormUiState {
    fn for_edit(prompt: &Prompt) -> Self {
        Self {
            title: prompt.title.clone(),
            content: prompt.content.clone(),
            tags: TokenInput::with_tokens(prompt.tags.clone()),
            models: TokenInput::with_tokens(prompt.models.clone()),
            field: DraftField::Title,
            target: Some(prompt.id.clone()),
        }
    }

    /// Leftover staged token text is committed rather than dropped.
    fn draft(&self) -> PromptDraft {
        PromptDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            tags: self.tags.clone().into_tokens(),
            models: self.models.clone().into_tokens(),
        }
    }

    fn shift_field(&mut self, delta: isize) {
        let fields = DraftField::ALL;
        let current = fields
            .iter()
            .position(|field| *field == self.field)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(fields.len() as isize) as usize;
        self.field = fields[next];
    }
}

#[derive(Debug, Default)]
struct ViewData {
    list: PromptList,
    search: SearchOverlay,
    compose: FormUiState,
    edit: Option<FormUiState>,
    confirm_delete: Option<PromptId>,
    help_visible: bool,
    connection_error: Option<String>,
    load_error: Option<String>,
    status_token: u64,
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut clipboard = SystemClipboard;
    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Err(error) = runtime.health_check() {
        view_data.connection_error = Some(error.to_string());
    }
    if refresh_prompt_list(runtime, &mut view_data).is_err() {
        state.dispatch(AppCommand::SetStatus("initial load failed -- press r to retry".to_owned()));
    }

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_tx, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(
                        state,
                        runtime,
                        &mut clipboard,
                        &mut view_data,
                        &internal_tx,
                        key,
                    ) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::Search(SearchEvent::Completed { seq, results }) => {
                view_data.search.apply_response(seq, results);
            }
            InternalEvent::Search(SearchEvent::Failed { seq, error }) => {
                if view_data.search.fail_response(seq) {
                    emit_status(state, view_data, tx, format!("search failed: {error}"));
                }
            }
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn refresh_prompt_list<R: AppRuntime>(runtime: &mut R, view_data: &mut ViewData) -> Result<()> {
    match runtime.load_prompt_list() {
        Ok(prompts) => {
            view_data.list.replace(prompts);
            view_data.load_error = None;
            Ok(())
        }
        Err(error) => {
            view_data.load_error = Some(error.to_string());
            Err(error)
        }
    }
}

/// One dispatch path for every key. Priority is an explicit stack: confirm
/// modal, then help, then the edit modal, then the search overlay, then the
/// active tab. Returns true to quit.
fn handle_key_event<R: AppRuntime, C: ClipboardSink>(
    state: &mut AppState,
    runtime: &mut R,
    clipboard: &mut C,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.confirm_delete.is_some() {
        handle_confirm_delete_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
        }
        return false;
    }

    if view_data.edit.is_some() {
        handle_edit_modal_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    if view_data.search.is_open() {
        handle_search_overlay_key(state, runtime, clipboard, view_data, internal_tx, key);
        return false;
    }

    if key.code == KeyCode::Char('k') && key.modifiers.contains(KeyModifiers::CONTROL) {
        let request = view_data.search.open();
        dispatch_search(state, runtime, view_data, internal_tx, request);
        return false;
    }

    match state.active_tab {
        TabKind::Library => {
            handle_library_key(state, runtime, clipboard, view_data, internal_tx, key)
        }
        TabKind::Compose => handle_compose_key(state, runtime, view_data, internal_tx, key),
    }

    false
}

fn handle_library_key<R: AppRuntime, C: ClipboardSink>(
    state: &mut AppState,
    runtime: &mut R,
    clipboard: &mut C,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match (key.code, key.modifiers) {
        (KeyCode::Left, _) => {
            state.dispatch(AppCommand::PrevTab);
        }
        (KeyCode::Right, _) => {
            state.dispatch(AppCommand::NextTab);
        }
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => {
            view_data.list.move_down();
        }
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => {
            view_data.list.move_up();
        }
        (KeyCode::Enter, _) => {
            copy_selected_from_list(state, clipboard, view_data, internal_tx);
        }
        (KeyCode::Char('e'), KeyModifiers::NONE) => {
            if let Some(prompt) = view_data.list.selected() {
                view_data.edit = Some(FormUiState::for_edit(prompt));
            } else {
                emit_status(state, view_data, internal_tx, "no prompt selected");
            }
        }
        (KeyCode::Char('f'), KeyModifiers::NONE) => {
            toggle_selected_favorite(state, runtime, view_data, internal_tx);
        }
        (KeyCode::Char('d'), KeyModifiers::NONE) => {
            if let Some(prompt) = view_data.list.selected() {
                view_data.confirm_delete = Some(prompt.id.clone());
            } else {
                emit_status(state, view_data, internal_tx, "no prompt selected");
            }
        }
        (KeyCode::Char('r'), KeyModifiers::NONE) => {
            retry_connection(state, runtime, view_data, internal_tx);
        }
        (KeyCode::Char('?'), _) => {
            view_data.help_visible = true;
        }
        _ => {}
    }
}

fn copy_selected_from_list<C: ClipboardSink>(
    state: &mut AppState,
    clipboard: &mut C,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(prompt) = view_data.list.selected() else {
        emit_status(state, view_data, internal_tx, "no prompt selected");
        return;
    };
    let content = prompt.content.clone();
    match clipboard.copy_text(&content) {
        Ok(()) => emit_status(state, view_data, internal_tx, "copied to clipboard"),
        Err(error) => emit_status(
            state,
            view_data,
            internal_tx,
            format!("copy failed: {error}"),
        ),
    }
}

/// Optimistic flip, then reconcile by merging the single confirmed record
/// instead of re-fetching the whole collection. Rolled back on failure.
fn toggle_selected_favorite<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(prompt) = view_data.list.selected() else {
        emit_status(state, view_data, internal_tx, "no prompt selected");
        return;
    };
    let id = prompt.id.clone();
    let Some(next) = view_data.list.flip_favorite(&id) else {
        return;
    };

    match runtime.set_favorite(&id, next) {
        Ok(confirmed) => {
            view_data.list.merge_confirmed(confirmed);
            let status = if next { "added to favorites" } else { "removed from favorites" };
            emit_status(state, view_data, internal_tx, status);
        }
        Err(error) => {
            view_data.list.flip_favorite(&id);
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("favorite update failed: {error}"),
            );
        }
    }
}

fn retry_connection<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    match runtime.health_check() {
        Ok(()) => view_data.connection_error = None,
        Err(error) => {
            view_data.connection_error = Some(error.to_string());
        }
    }
    match refresh_prompt_list(runtime, view_data) {
        Ok(()) => emit_status(state, view_data, internal_tx, "prompts reloaded"),
        Err(error) => emit_status(
            state,
            view_data,
            internal_tx,
            format!("load failed: {error}"),
        ),
    }
}

fn handle_confirm_delete_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            let Some(id) = view_data.confirm_delete.take() else {
                return;
            };
            match runtime.delete_prompt(&id) {
                Ok(()) => {
                    view_data.list.remove(&id);
                    if let Err(error) = refresh_prompt_list(runtime, view_data) {
                        emit_status(
                            state,
                            view_data,
                            internal_tx,
                            format!("reload failed: {error}"),
                        );
                    } else {
                        emit_status(state, view_data, internal_tx, "prompt deleted");
                    }
                }
                Err(error) => {
                    emit_status(
                        state,
                        view_data,
                        internal_tx,
                        format!("delete failed: {error}"),
                    );
                }
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            view_data.confirm_delete = None;
        }
        _ => {}
    }
}

fn handle_search_overlay_key<R: AppRuntime, C: ClipboardSink>(
    state: &mut AppState,
    runtime: &mut R,
    clipboard: &mut C,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => {
            if view_data.search.escape() == EscapeOutcome::Closed {
                state.dispatch(AppCommand::ClearStatus);
            }
        }
        (KeyCode::Up, _) => view_data.search.move_up(),
        (KeyCode::Char('p'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            view_data.search.move_up();
        }
        (KeyCode::Down, _) => view_data.search.move_down(),
        (KeyCode::Char('n'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            view_data.search.move_down();
        }
        (KeyCode::Backspace, _) => {
            if let Some(request) = view_data.search.backspace() {
                dispatch_search(state, runtime, view_data, internal_tx, request);
            }
        }
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(request) = view_data.search.clear_query() {
                dispatch_search(state, runtime, view_data, internal_tx, request);
            }
        }
        (KeyCode::Enter, _) => {
            let Some(prompt) = view_data.search.selected() else {
                return;
            };
            let content = prompt.content.clone();
            view_data.search.close();
            match clipboard.copy_text(&content) {
                Ok(()) => emit_status(state, view_data, internal_tx, "copied to clipboard"),
                Err(error) => emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("copy failed: {error}"),
                ),
            }
        }
        (KeyCode::Char(ch), modifiers)
            if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT =>
        {
            let request = view_data.search.input_char(ch);
            dispatch_search(state, runtime, view_data, internal_tx, request);
        }
        _ => {}
    }
}

fn dispatch_search<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    request: SearchRequest,
) {
    let seq = request.seq;
    if let Err(error) = runtime.spawn_search(seq, request.mode, internal_tx.clone())
        && view_data.search.fail_response(seq)
    {
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("search failed: {error}"),
        );
    }
}

fn handle_compose_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    if key.code == KeyCode::Esc {
        state.dispatch(AppCommand::SetActiveTab(TabKind::Library));
        return;
    }

    let outcome = apply_form_key(&mut view_data.compose, key);
    match outcome {
        FormKeyOutcome::Submit => submit_compose(state, runtime, view_data, internal_tx),
        FormKeyOutcome::FieldChanged => {
            let label = view_data.compose.field.label();
            emit_status(state, view_data, internal_tx, format!("field: {label}"));
        }
        FormKeyOutcome::Edited | FormKeyOutcome::Ignored => {}
    }
}

fn handle_edit_modal_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    if key.code == KeyCode::Esc {
        view_data.edit = None;
        return;
    }

    let Some(form) = view_data.edit.as_mut() else {
        return;
    };
    let outcome = apply_form_key(form, key);
    match outcome {
        FormKeyOutcome::Submit => submit_edit(state, runtime, view_data, internal_tx),
        FormKeyOutcome::FieldChanged => {
            if let Some(form) = &view_data.edit {
                let label = form.field.label();
                emit_status(state, view_data, internal_tx, format!("field: {label}"));
            }
        }
        FormKeyOutcome::Edited | FormKeyOutcome::Ignored => {}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormKeyOutcome {
    Edited,
    FieldChanged,
    Submit,
    Ignored,
}

/// Shared key table for the compose form and the edit modal. Enter commits a
/// staged token in the token fields (suppressing submit), inserts a newline
/// in the content field, and submits from the title field. Ctrl+S always
/// submits.
fn apply_form_key(form: &mut FormUiState, key: KeyEvent) -> FormKeyOutcome {
    if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return FormKeyOutcome::Submit;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Tab, KeyModifiers::NONE) => {
            form.shift_field(1);
            FormKeyOutcome::FieldChanged
        }
        (KeyCode::BackTab, _) => {
            form.shift_field(-1);
            FormKeyOutcome::FieldChanged
        }
        (KeyCode::Enter, _) => match form.field {
            DraftField::Title => FormKeyOutcome::Submit,
            DraftField::Content => {
                form.content.push('\n');
                FormKeyOutcome::Edited
            }
            DraftField::Tags => match form.tags.press_enter() {
                TokenKeyOutcome::Committed => FormKeyOutcome::Edited,
                _ => FormKeyOutcome::Submit,
            },
            DraftField::Models => match form.models.press_enter() {
                TokenKeyOutcome::Committed => FormKeyOutcome::Edited,
                _ => FormKeyOutcome::Submit,
            },
        },
        (KeyCode::Backspace, _) => {
            match form.field {
                DraftField::Title => {
                    form.title.pop();
                }
                DraftField::Content => {
                    form.content.pop();
                }
                // Empty staging removes the most recent committed token.
                DraftField::Tags => {
                    if form.tags.staged().is_empty() {
                        let count = form.tags.tokens().len();
                        if count > 0 {
                            form.tags.remove_token(count - 1);
                        }
                    } else {
                        form.tags.backspace();
                    }
                }
                DraftField::Models => {
                    if form.models.staged().is_empty() {
                        let count = form.models.tokens().len();
                        if count > 0 {
                            form.models.remove_token(count - 1);
                        }
                    } else {
                        form.models.backspace();
                    }
                }
            }
            FormKeyOutcome::Edited
        }
        (KeyCode::Char(ch), modifiers)
            if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT =>
        {
            match form.field {
                DraftField::Title => form.title.push(ch),
                DraftField::Content => form.content.push(ch),
                DraftField::Tags => {
                    form.tags.push_char(ch);
                }
                DraftField::Models => {
                    form.models.push_char(ch);
                }
            }
            FormKeyOutcome::Edited
        }
        _ => FormKeyOutcome::Ignored,
    }
}

fn submit_compose<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let draft = view_data.compose.draft();
    if let Err(error) = draft.validate() {
        emit_status(state, view_data, internal_tx, format!("form invalid: {error}"));
        return;
    }

    match runtime.create_prompt(&draft) {
        Ok(created) => {
            view_data.compose = FormUiState::default();
            state.dispatch(AppCommand::SetActiveTab(TabKind::Library));
            if let Err(error) = refresh_prompt_list(runtime, view_data) {
                emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("reload failed: {error}"),
                );
            } else {
                view_data.list.select_id(&created.id);
                emit_status(state, view_data, internal_tx, "prompt created");
            }
        }
        Err(error) => {
            emit_status(state, view_data, internal_tx, format!("save failed: {error}"));
        }
    }
}

fn submit_edit<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(form) = &view_data.edit else {
        return;
    };
    let Some(id) = form.target.clone() else {
        view_data.edit = None;
        return;
    };
    let draft = form.draft();
    if let Err(error) = draft.validate() {
        emit_status(state, view_data, internal_tx, format!("form invalid: {error}"));
        return;
    }

    match runtime.update_prompt(&id, &draft) {
        Ok(_) => {
            view_data.edit = None;
            if let Err(error) = refresh_prompt_list(runtime, view_data) {
                emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("reload failed: {error}"),
                );
            } else {
                view_data.list.select_id(&id);
                emit_status(state, view_data, internal_tx, "prompt updated");
            }
        }
        Err(error) => {
            emit_status(state, view_data, internal_tx, format!("save failed: {error}"));
        }
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let banner = banner_text(state, view_data);
    let mut constraints = vec![Constraint::Length(3)];
    if banner.is_some() {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(1));
    constraints.push(Constraint::Length(2));

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    let selected = TabKind::ALL
        .iter()
        .position(|tab| *tab == state.active_tab)
        .unwrap_or(0);
    let tab_titles = TabKind::ALL
        .iter()
        .map(|tab| format!(" {} ", tab.label()))
        .collect::<Vec<String>>();
    let tabs = Tabs::new(tab_titles)
        .block(Block::default().title("promptdeck").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    let mut next_area = 1;
    if let Some((text, color)) = banner {
        let widget = Paragraph::new(text)
            .style(Style::default().fg(color))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(widget, layout[next_area]);
        next_area += 1;
    }

    let body = layout[next_area];
    match state.active_tab {
        TabKind::Library => render_library(frame, body, view_data),
        TabKind::Compose => {
            let form = Paragraph::new(render_form_text(&view_data.compose))
                .block(Block::default().title("compose").borders(Borders::ALL));
            frame.render_widget(form, body);
        }
    }

    let status = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[next_area + 1]);

    if view_data.search.is_open() {
        let area = centered_rect(72, 66, frame.area());
        frame.render_widget(Clear, area);
        let search = Paragraph::new(render_search_overlay_text(&view_data.search))
            .block(Block::default().title("search").borders(Borders::ALL));
        frame.render_widget(search, area);
    }

    if let Some(form) = &view_data.edit {
        let area = centered_rect(72, 66, frame.area());
        frame.render_widget(Clear, area);
        let edit = Paragraph::new(render_form_text(form))
            .block(Block::default().title("edit prompt").borders(Borders::ALL));
        frame.render_widget(edit, area);
    }

    if view_data.confirm_delete.is_some() {
        let area = centered_rect(48, 22, frame.area());
        frame.render_widget(Clear, area);
        let confirm = Paragraph::new(
            "Delete this prompt? This cannot be undone.\n\ny/enter delete | n/esc cancel",
        )
        .style(Style::default().fg(Color::Red))
        .block(Block::default().title("confirm delete").borders(Borders::ALL));
        frame.render_widget(confirm, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 68, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn banner_text(state: &AppState, view_data: &ViewData) -> Option<(String, Color)> {
    if let Some(error) = &view_data.connection_error {
        return Some((
            format!("cannot reach the prompt store: {error} -- press r to retry"),
            Color::Red,
        ));
    }
    if state.demo_banner {
        return Some((
            "demo mode: sample data, nothing is persisted".to_owned(),
            Color::Yellow,
        ));
    }
    None
}

fn render_library(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    if let Some(error) = &view_data.load_error {
        let widget = Paragraph::new(format!("load failed: {error}\n\npress r to retry"))
            .style(Style::default().fg(Color::Red))
            .block(Block::default().title("library").borders(Borders::ALL));
        frame.render_widget(widget, area);
        return;
    }

    if view_data.list.is_empty() {
        let widget = Paragraph::new("no prompts yet -- switch to compose (→) to add one")
            .block(Block::default().title("library").borders(Borders::ALL));
        frame.render_widget(widget, area);
        return;
    }

    let header = Row::new(vec!["", "title", "tags", "models", "updated"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = view_data
        .list
        .prompts()
        .iter()
        .enumerate()
        .map(|(index, prompt)| {
            let star = if prompt.favorite { "★" } else { " " };
            let updated = prompt
                .updated_at
                .format(&Rfc3339)
                .unwrap_or_default()
                .chars()
                .take(10)
                .collect::<String>();
            let row = Row::new(vec![
                Cell::from(star),
                Cell::from(truncate_label(&prompt.title, 32)),
                Cell::from(prompt.tags.join(", ")),
                Cell::from(prompt.models.join(", ")),
                Cell::from(updated),
            ]);
            if Some(index) == view_data.list.cursor() {
                row.style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                row
            }
        })
        .collect::<Vec<Row>>();

    let widths = [
        Constraint::Length(2),
        Constraint::Percentage(34),
        Constraint::Percentage(26),
        Constraint::Percentage(24),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title("library").borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn render_search_overlay_text(search: &SearchOverlay) -> String {
    let mut lines = Vec::new();
    let caret = if search.focus() == SearchFocus::Input {
        "_"
    } else {
        ""
    };
    lines.push(format!("search: {}{caret}", search.query()));
    lines.push("(tag:<name> filters by tag)".to_owned());
    lines.push(String::new());

    if search.is_loading() {
        lines.push("searching...".to_owned());
    } else if search.results().is_empty() {
        lines.push("no matching prompts".to_owned());
    } else {
        for (index, prompt) in search.results().iter().enumerate() {
            let marker = if index == search.cursor() { ">" } else { " " };
            let star = if prompt.favorite { "★" } else { " " };
            lines.push(format!(
                "{marker} {star} {}",
                truncate_label(&prompt.title, 48)
            ));
            lines.push(format!(
                "     {}",
                truncate_label(first_line(&prompt.content), CONTENT_PREVIEW_CHARS)
            ));
            let mut labels = Vec::new();
            labels.extend(prompt.tags.iter().map(|tag| format!("#{tag}")));
            labels.extend(prompt.models.iter().map(|model| format!("@{model}")));
            if !labels.is_empty() {
                lines.push(format!("     {}", labels.join(" ")));
            }
        }
    }

    lines.push(String::new());
    let escape_hint = if search.focus() == SearchFocus::Input {
        "esc close"
    } else {
        "esc back to input"
    };
    lines.push(format!("enter copy | ↑/↓ select | {escape_hint}"));
    lines.join("\n")
}

fn render_form_text(form: &FormUiState) -> String {
    let mut lines = Vec::new();
    for field in DraftField::ALL {
        let marker = if field == form.field { ">" } else { " " };
        match field {
            DraftField::Title => {
                lines.push(format!("{marker} title: {}", form.title));
            }
            DraftField::Content => {
                lines.push(format!("{marker} content:"));
                if form.content.is_empty() {
                    lines.push("    (empty)".to_owned());
                } else {
                    for content_line in form.content.lines() {
                        lines.push(format!("    {content_line}"));
                    }
                }
            }
            DraftField::Tags => {
                lines.push(format!(
                    "{marker} tags: {} +{}",
                    join_tokens(form.tags.tokens()),
                    form.tags.staged()
                ));
            }
            DraftField::Models => {
                lines.push(format!(
                    "{marker} models: {} +{}",
                    join_tokens(form.models.tokens()),
                    form.models.staged()
                ));
            }
        }
    }
    lines.push(String::new());
    lines.push("comma/enter commits a tag or model token".to_owned());
    lines.push("tab next field | ctrl+s save | esc back".to_owned());
    lines.join("\n")
}

fn join_tokens(tokens: &[String]) -> String {
    if tokens.is_empty() {
        return "(none)".to_owned();
    }
    tokens
        .iter()
        .map(|token| format!("[{token}]"))
        .collect::<Vec<String>>()
        .join(" ")
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

fn truncate_label(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_owned();
    }
    let mut out: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    let hints = if view_data.search.is_open() {
        "typing filters | enter copy | esc back/close"
    } else if view_data.edit.is_some() {
        "tab field | ctrl+s save | esc cancel"
    } else {
        match state.active_tab {
            TabKind::Library => {
                "↑/↓ select | enter copy | e edit | f fav | d delete | ctrl+k search | ←/→ tabs | ? help | ctrl+q quit"
            }
            TabKind::Compose => "tab field | ctrl+s save | esc back | ctrl+k search | ctrl+q quit",
        }
    };
    match &state.status_line {
        Some(status) => format!("{status} | {hints}"),
        None => hints.to_owned(),
    }
}

fn help_overlay_text() -> &'static str {
    "promptdeck\n\
     \n\
     ctrl+k        open search\n\
     ←/→           switch tabs\n\
     ↑/↓ (j/k)     move selection\n\
     enter         copy selected prompt\n\
     e             edit selected prompt\n\
     f             toggle favorite\n\
     d             delete (asks to confirm)\n\
     r             reload / retry connection\n\
     ?             this help\n\
     ctrl+q        quit\n\
     \n\
     search: type to filter; tag:<name> matches a tag exactly.\n\
     up from the first result returns to the input; esc backs out."
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        AppRuntime, ClipboardSink, FormUiState, InternalEvent, ViewData, handle_key_event,
        process_internal_events,
    };
    use anyhow::Result;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use promptdeck_app::{
        AppState, Prompt, PromptDraft, PromptId, QueryMode, RECENT_LIMIT, TabKind,
    };
    use promptdeck_client::{NewPrompt, PromptStore, PromptUpdate};
    use promptdeck_testkit::MemoryStore;
    use std::sync::mpsc::{self, Receiver, Sender};

    struct TestRuntime {
        store: MemoryStore,
        list_loads: usize,
        fail_searches: bool,
    }

    impl TestRuntime {
        fn new(store: MemoryStore) -> Self {
            Self {
                store,
                list_loads: 0,
                fail_searches: false,
            }
        }
    }

    impl AppRuntime for TestRuntime {
        fn health_check(&mut self) -> Result<()> {
            self.store.health_check()
        }

        fn load_prompt_list(&mut self) -> Result<Vec<Prompt>> {
            self.list_loads += 1;
            self.store.list_prompts()
        }

        fn run_search(&mut self, mode: &QueryMode) -> Result<Vec<Prompt>> {
            if self.fail_searches {
                anyhow::bail!("store unreachable");
            }
            match mode {
                QueryMode::Recent => self.store.recent_prompts(RECENT_LIMIT),
                QueryMode::Tag(tag) => self.store.prompts_with_tag(tag),
                QueryMode::Text(text) => self.store.prompts_matching(text),
            }
        }

        fn create_prompt(&mut self, draft: &PromptDraft) -> Result<Prompt> {
            self.store.insert_prompt(&NewPrompt {
                title: draft.title.clone(),
                content: draft.content.clone(),
                tags: draft.tags.clone(),
                models: draft.models.clone(),
            })
        }

        fn update_prompt(&mut self, id: &PromptId, draft: &PromptDraft) -> Result<Prompt> {
            self.store.update_prompt(
                id,
                &PromptUpdate::stamped_now(
                    draft.title.clone(),
                    draft.content.clone(),
                    draft.tags.clone(),
                    draft.models.clone(),
                ),
            )
        }

        fn set_favorite(&mut self, id: &PromptId, favorite: bool) -> Result<Prompt> {
            self.store.set_favorite(id, favorite)
        }

        fn delete_prompt(&mut self, id: &PromptId) -> Result<()> {
            self.store.delete_prompt(id)
        }
    }

    #[derive(Default)]
    struct CaptureClipboard {
        copies: Vec<String>,
    }

    impl ClipboardSink for CaptureClipboard {
        fn copy_text(&mut self, text: &str) -> Result<()> {
            self.copies.push(text.to_owned());
            Ok(())
        }
    }

    struct Harness {
        state: AppState,
        runtime: TestRuntime,
        clipboard: CaptureClipboard,
        view_data: ViewData,
        tx: Sender<InternalEvent>,
        rx: Receiver<InternalEvent>,
    }

    impl Harness {
        fn new(store: MemoryStore) -> Self {
            let (tx, rx) = mpsc::channel();
            let mut runtime = TestRuntime::new(store);
            let mut view_data = ViewData::default();
            let prompts = runtime.load_prompt_list().expect("initial load");
            view_data.list.replace(prompts);
            Self {
                state: AppState::default(),
                runtime,
                clipboard: CaptureClipboard::default(),
                view_data,
                tx,
                rx,
            }
        }

        fn key(&mut self, code: KeyCode) {
            self.key_with(code, KeyModifiers::NONE);
        }

        fn key_with(&mut self, code: KeyCode, modifiers: KeyModifiers) {
            handle_key_event(
                &mut self.state,
                &mut self.runtime,
                &mut self.clipboard,
                &mut self.view_data,
                &self.tx,
                KeyEvent::new(code, modifiers),
            );
        }

        fn type_text(&mut self, text: &str) {
            for ch in text.chars() {
                self.key(KeyCode::Char(ch));
            }
        }

        /// Deliver queued search responses, as the event loop would.
        fn pump(&mut self) {
            process_internal_events(&mut self.state, &mut self.view_data, &self.tx, &self.rx);
        }
    }

    fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        for (title, content, tags) in [
            ("Code review", "Review the diff", vec!["coding"]),
            ("Commit message", "Write a commit message", vec!["coding", "git"]),
            ("Summarize", "Summarize these notes", vec!["writing"]),
        ] {
            store
                .insert_prompt(&NewPrompt {
                    title: title.to_owned(),
                    content: content.to_owned(),
                    tags: tags.into_iter().map(str::to_owned).collect(),
                    models: Vec::new(),
                })
                .expect("seed prompt");
        }
        store
    }

    #[test]
    fn ctrl_k_opens_search_with_recent_results() {
        let mut harness = Harness::new(seeded_store());
        harness.key_with(KeyCode::Char('k'), KeyModifiers::CONTROL);
        assert!(harness.view_data.search.is_open());

        harness.pump();
        assert_eq!(harness.view_data.search.results().len(), 3);
        // Newest created first.
        assert_eq!(harness.view_data.search.results()[0].title, "Summarize");
    }

    #[test]
    fn search_enter_copies_once_and_closes() {
        let mut harness = Harness::new(seeded_store());
        harness.key_with(KeyCode::Char('k'), KeyModifiers::CONTROL);
        harness.pump();

        harness.type_text("commit");
        harness.pump();
        assert_eq!(harness.view_data.search.results().len(), 1);

        harness.key(KeyCode::Enter);
        assert!(!harness.view_data.search.is_open());
        assert_eq!(harness.clipboard.copies, vec!["Write a commit message"]);
        assert_eq!(
            harness.state.status_line.as_deref(),
            Some("copied to clipboard")
        );
    }

    #[test]
    fn search_keys_do_not_leak_into_the_list() {
        let mut harness = Harness::new(seeded_store());
        harness.key(KeyCode::Down);
        let selected_before = harness.view_data.list.cursor();

        harness.key_with(KeyCode::Char('k'), KeyModifiers::CONTROL);
        harness.type_text("j");
        harness.pump();

        assert_eq!(harness.view_data.list.cursor(), selected_before);
        assert_eq!(harness.view_data.search.query(), "j");
    }

    #[test]
    fn search_failure_keeps_previous_results_and_reports() {
        let mut harness = Harness::new(seeded_store());
        harness.key_with(KeyCode::Char('k'), KeyModifiers::CONTROL);
        harness.pump();
        assert_eq!(harness.view_data.search.results().len(), 3);

        harness.runtime.fail_searches = true;
        harness.type_text("x");
        harness.pump();

        assert_eq!(harness.view_data.search.results().len(), 3);
        assert!(
            harness
                .state
                .status_line
                .as_deref()
                .unwrap_or_default()
                .contains("search failed")
        );
    }

    #[test]
    fn tag_query_matches_exactly() {
        let mut harness = Harness::new(seeded_store());
        harness.key_with(KeyCode::Char('k'), KeyModifiers::CONTROL);
        harness.type_text("tag:git");
        harness.pump();

        let titles: Vec<&str> = harness
            .view_data
            .search
            .results()
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Commit message"]);
    }

    #[test]
    fn list_enter_copies_selected_content() {
        let mut harness = Harness::new(seeded_store());
        harness.key(KeyCode::Down);
        harness.key(KeyCode::Enter);
        assert_eq!(harness.clipboard.copies.len(), 1);
    }

    #[test]
    fn favorite_toggle_merges_without_full_refetch() {
        let mut harness = Harness::new(seeded_store());
        let loads_before = harness.runtime.list_loads;

        harness.key(KeyCode::Down);
        let id = harness
            .view_data
            .list
            .selected()
            .expect("selection")
            .id
            .clone();
        harness.key(KeyCode::Char('f'));

        assert_eq!(harness.runtime.list_loads, loads_before);
        // Favorites sort first, and the highlight follows the record.
        assert_eq!(harness.view_data.list.cursor(), Some(0));
        let selected = harness.view_data.list.selected().expect("selection");
        assert_eq!(selected.id, id);
        assert!(selected.favorite);
    }

    #[test]
    fn failed_favorite_toggle_rolls_back_the_optimistic_flip() {
        let store = seeded_store();
        let mut harness = Harness::new(store.clone());
        harness.key(KeyCode::Down);
        let id = harness
            .view_data
            .list
            .selected()
            .expect("selection")
            .id
            .clone();
        store.delete_prompt(&id).expect("delete behind the UI");

        harness.key(KeyCode::Char('f'));
        let selected = harness.view_data.list.selected().expect("selection");
        assert!(!selected.favorite, "optimistic flip must roll back");
        assert!(
            harness
                .state
                .status_line
                .as_deref()
                .unwrap_or_default()
                .contains("favorite update failed")
        );
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut harness = Harness::new(seeded_store());
        harness.key(KeyCode::Down);
        harness.key(KeyCode::Char('d'));
        assert!(harness.view_data.confirm_delete.is_some());

        harness.key(KeyCode::Char('n'));
        assert!(harness.view_data.confirm_delete.is_none());
        assert_eq!(harness.view_data.list.len(), 3);

        harness.key(KeyCode::Char('d'));
        harness.key(KeyCode::Char('y'));
        assert_eq!(harness.view_data.list.len(), 2);
        assert_eq!(
            harness.state.status_line.as_deref(),
            Some("prompt deleted")
        );
    }

    #[test]
    fn compose_submit_validates_locally_before_any_store_call() {
        let mut harness = Harness::new(MemoryStore::new());
        harness.key(KeyCode::Right);
        assert_eq!(harness.state.active_tab, TabKind::Compose);

        harness.key_with(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(
            harness
                .state
                .status_line
                .as_deref()
                .unwrap_or_default()
                .contains("form invalid")
        );
        assert!(harness.runtime.store.list_prompts().expect("list").is_empty());
    }

    #[test]
    fn compose_create_switches_back_to_library() {
        let mut harness = Harness::new(MemoryStore::new());
        harness.key(KeyCode::Right);

        harness.type_text("Greet");
        harness.key(KeyCode::Tab);
        harness.type_text("Say hello politely");
        harness.key(KeyCode::Tab);
        harness.type_text("tone,writing");
        harness.key_with(KeyCode::Char('s'), KeyModifiers::CONTROL);

        assert_eq!(harness.state.active_tab, TabKind::Library);
        assert_eq!(harness.view_data.list.len(), 1);
        let created = &harness.view_data.list.prompts()[0];
        assert_eq!(created.title, "Greet");
        assert_eq!(created.tags, vec!["tone", "writing"]);
        assert_eq!(harness.view_data.list.cursor(), Some(0));
    }

    #[test]
    fn enter_in_tag_field_commits_instead_of_submitting() {
        let mut harness = Harness::new(MemoryStore::new());
        harness.key(KeyCode::Right);

        harness.type_text("Title");
        harness.key(KeyCode::Tab);
        harness.type_text("Content");
        harness.key(KeyCode::Tab);
        harness.type_text("rust");
        harness.key(KeyCode::Enter);

        assert_eq!(harness.state.active_tab, TabKind::Compose, "still composing");
        assert_eq!(harness.view_data.compose.tags.tokens(), ["rust"]);

        // Nothing staged now, so Enter falls through to submit.
        harness.key(KeyCode::Enter);
        assert_eq!(harness.state.active_tab, TabKind::Library);
        assert_eq!(harness.view_data.list.len(), 1);
    }

    #[test]
    fn edit_modal_updates_and_refetches() {
        let mut harness = Harness::new(seeded_store());
        harness.key(KeyCode::Down);
        let id = harness
            .view_data
            .list
            .selected()
            .expect("selection")
            .id
            .clone();

        harness.key(KeyCode::Char('e'));
        assert!(harness.view_data.edit.is_some());

        harness.type_text("!");
        let loads_before = harness.runtime.list_loads;
        harness.key_with(KeyCode::Char('s'), KeyModifiers::CONTROL);

        assert!(harness.view_data.edit.is_none());
        assert_eq!(harness.runtime.list_loads, loads_before + 1);
        let edited = harness
            .view_data
            .list
            .prompts()
            .iter()
            .find(|p| p.id == id)
            .expect("edited prompt");
        assert!(edited.title.ends_with('!'));
        // Selection follows identity through the refresh.
        assert_eq!(
            harness.view_data.list.selected().map(|p| p.id.clone()),
            Some(id)
        );
    }

    #[test]
    fn confirm_modal_outranks_the_search_shortcut() {
        let mut harness = Harness::new(seeded_store());
        harness.key(KeyCode::Down);
        harness.key(KeyCode::Char('d'));

        harness.key_with(KeyCode::Char('k'), KeyModifiers::CONTROL);
        assert!(!harness.view_data.search.is_open());
        assert!(harness.view_data.confirm_delete.is_some());
    }

    #[test]
    fn late_response_after_close_is_ignored() {
        let mut harness = Harness::new(seeded_store());
        harness.key_with(KeyCode::Char('k'), KeyModifiers::CONTROL);
        // Close before the queued recent response is processed.
        harness.key(KeyCode::Esc);
        assert!(!harness.view_data.search.is_open());

        harness.pump();
        assert!(!harness.view_data.search.is_open());
        assert!(harness.view_data.search.results().is_empty());
    }

    #[test]
    fn tabs_switch_with_arrows_only_from_the_library() {
        let mut harness = Harness::new(seeded_store());
        harness.key(KeyCode::Right);
        assert_eq!(harness.state.active_tab, TabKind::Compose);

        // On compose, Left is form input, not tab navigation; Esc returns.
        harness.key(KeyCode::Left);
        assert_eq!(harness.state.active_tab, TabKind::Compose);
        harness.key(KeyCode::Esc);
        assert_eq!(harness.state.active_tab, TabKind::Library);
    }

    #[test]
    fn form_draft_commits_leftover_staged_tokens() {
        let mut form = FormUiState::default();
        form.title = "t".to_owned();
        form.content = "c".to_owned();
        form.field = promptdeck_app::DraftField::Tags;
        super::apply_form_key(
            &mut form,
            KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE),
        );

        let draft = form.draft();
        assert_eq!(draft.tags, vec!["x"]);
    }
}
