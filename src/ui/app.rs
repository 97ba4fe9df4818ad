use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};
use ratatui::Terminal;
use tui_widgets::popup::PopupState;

use crate::config::{Config, TopBarAction, TopBarButton, UiColors};
use crate::dataset::{DatasetKind, FieldKey, ValueKind};
use crate::error::DashboardError;
use crate::store::{CellRef, DatasetStore};
use crate::summary::Summary;

use super::draw;
use super::edit::{EditOutcome, EditableValue};
use super::panes::Card;

/// Screen area of a rendered value, recorded by the draw pass for mouse hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRegion {
    pub area: Rect,
    pub cell: CellRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Reset,
}

#[derive(Debug, Clone)]
pub struct ConfirmModal {
    pub title: String,
    pub message: String,
    pub action: ConfirmAction,
}

/// State for the scrollable help modal
#[derive(Debug, Clone)]
pub struct HelpModal {
    /// Current scroll offset (line index at top of viewport)
    pub scroll: usize,
    /// Total number of content lines
    pub total_lines: usize,
    /// Viewport height (set during rendering)
    pub viewport_height: usize,
}

impl HelpModal {
    pub fn new(total_lines: usize) -> Self {
        Self {
            scroll: 0,
            total_lines,
            viewport_height: 0,
        }
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let max_scroll = self.total_lines.saturating_sub(self.viewport_height);
        self.scroll = (self.scroll + lines).min(max_scroll);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn can_scroll_up(&self) -> bool {
        self.scroll > 0
    }

    pub fn can_scroll_down(&self) -> bool {
        self.scroll + self.viewport_height < self.total_lines
    }
}

/// A section of help content
pub struct HelpSection {
    pub title: &'static str,
    pub entries: Vec<HelpEntry>,
}

/// A single help entry (action name + key bindings)
pub struct HelpEntry {
    pub action: &'static str,
    pub keys: String,
}

pub struct App<'a> {
    config: &'a Config,
    pub store: DatasetStore,
    pub focused: Card,
    pub row: usize,
    pub column: usize,
    pub editor: EditableValue,
    pub status: Option<String>,
    pub help_modal: Option<HelpModal>,
    pub confirm_modal: Option<ConfirmModal>,
    pub modal_popup: PopupState,
    pub hit_regions: Vec<HitRegion>,
    pub card_regions: Vec<(Rect, Card)>,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            store: DatasetStore::seeded(),
            focused: Card::Channel,
            row: 0,
            column: 0,
            editor: EditableValue::new(config.edit.commit),
            status: None,
            help_modal: None,
            confirm_modal: None,
            modal_popup: PopupState::default(),
            hit_regions: Vec::new(),
            card_regions: Vec::new(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        stdout.execute(EnableFocusChange)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        terminal.backend_mut().execute(DisableFocusChange)?;
        terminal.backend_mut().execute(DisableMouseCapture)?;
        terminal.backend_mut().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop<B>(&mut self, terminal: &mut Terminal<B>) -> Result<()>
    where
        B: ratatui::backend::Backend,
    {
        loop {
            draw::render(terminal, self)?;

            if event::poll(Duration::from_millis(250))? && self.handle_event(event::read()?) {
                break;
            }
        }
        Ok(())
    }

    /// Process one terminal event. Returns true when the app should quit.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                false
            }
            Event::FocusLost => {
                self.blur_editor();
                false
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits (hardcoded for safety)
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            return true;
        }

        if self.help_modal.is_some() {
            self.handle_help_modal_key(key);
            return false;
        }

        if self.confirm_modal.is_some() {
            self.handle_confirm_modal_key(key);
            return false;
        }

        if self.editor.is_editing() {
            self.handle_editor_key(key);
            return false;
        }

        if let Some(action) = self.top_bar_action_for_key(&key) {
            self.handle_top_bar_action(action);
            return false;
        }

        self.handle_navigation_key(key)
    }

    /// Handle keys in navigation context (moving between cards and cells)
    fn handle_navigation_key(&mut self, key: KeyEvent) -> bool {
        let nav = &self.config.keys.navigation;
        let global = &self.config.keys.global;

        if self.key_matches_any(&key, &global.quit) {
            return true;
        }
        if self.key_matches_any(&key, &global.help) {
            self.show_help();
        } else if self.key_matches_any(&key, &nav.card_next) {
            self.focus_card(self.focused.next());
        } else if self.key_matches_any(&key, &nav.card_prev) {
            self.focus_card(self.focused.prev());
        } else if self.key_matches_any(&key, &nav.next) {
            self.move_row(1);
        } else if self.key_matches_any(&key, &nav.prev) {
            self.move_row(-1);
        } else if self.key_matches_any(&key, &nav.right) {
            self.move_column(1);
        } else if self.key_matches_any(&key, &nav.left) {
            self.move_column(-1);
        } else if self.key_matches_any(&key, &nav.edit) {
            self.begin_edit();
        } else if let KeyCode::Char(digit) = key.code {
            if let Some(card) = Card::from_digit(digit) {
                self.focus_card(card);
            }
        }
        false
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        if self.key_matches_any(&key, &self.config.keys.editor.blur) {
            self.blur_editor();
            return;
        }

        let store = &mut self.store;
        let outcome = self
            .editor
            .handle_key_event(key, |cell, value| store.update(cell, value).map(|_| ()));
        self.apply_outcome(outcome);
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }
        if self.help_modal.is_some() || self.confirm_modal.is_some() {
            return;
        }

        let position = Position::new(mouse.column, mouse.row);
        let hit = self
            .hit_regions
            .iter()
            .find(|region| region.area.contains(position))
            .map(|region| region.cell);

        if self.editor.is_editing() {
            if hit.is_some() && hit == self.editor.target() {
                return;
            }
            self.blur_editor();
        }

        match hit {
            Some(cell) => self.begin_edit_at(cell),
            None => {
                let card = self
                    .card_regions
                    .iter()
                    .find(|(area, _)| area.contains(position))
                    .map(|(_, card)| *card);
                if let Some(card) = card {
                    self.focus_card(card);
                }
            }
        }
    }

    fn apply_outcome(&mut self, outcome: EditOutcome) {
        match outcome {
            EditOutcome::Unchanged => {}
            EditOutcome::Pending => self.set_status("Value is applied when the editor closes"),
            EditOutcome::Emitted(value) => {
                if let Some(cell) = self.editor.target().or_else(|| self.selected_cell()) {
                    self.set_status(format!("{} = {}", self.cell_label(cell), value));
                }
            }
            EditOutcome::Rejected(err) => {
                tracing::warn!(error = %err, "edit rejected");
                let message = match &err {
                    DashboardError::NotANumber { .. } => format!("{}; keeping last value", err),
                    _ => err.to_string(),
                };
                self.set_status(message);
            }
        }
    }

    /// Leave edit mode. In blur commit mode this is when the value lands.
    pub fn blur_editor(&mut self) {
        if !self.editor.is_editing() {
            return;
        }
        let target = self.editor.target();
        let store = &mut self.store;
        let outcome = self
            .editor
            .blur(|cell, value| store.update(cell, value).map(|_| ()));

        match outcome {
            EditOutcome::Emitted(value) => {
                if let Some(cell) = target {
                    self.set_status(format!("{} = {}", self.cell_label(cell), value));
                }
            }
            EditOutcome::Unchanged => self.set_status("Edit finished"),
            other => self.apply_outcome(other),
        }
    }

    fn begin_edit(&mut self) {
        match self.selected_cell() {
            Some(cell) => self.begin_edit_at(cell),
            None => self.set_status("Nothing to edit"),
        }
    }

    /// Switch the value at `cell` into edit mode and select it.
    pub fn begin_edit_at(&mut self, cell: CellRef) {
        if !cell.dataset.is_editable(cell.field) {
            self.set_status("Field not editable");
            return;
        }
        let Some(current) = self.store.number(cell) else {
            self.set_status("Nothing to edit");
            return;
        };

        self.focused = Card::from_dataset(cell.dataset);
        self.row = cell.index;
        self.column = editable_columns(cell.dataset)
            .iter()
            .position(|field| *field == cell.field)
            .unwrap_or(0);

        self.editor.start(&current.to_string(), cell, ValueKind::Number);
        self.set_status(format!("Editing {}", self.cell_label(cell)));
    }

    /// Currently selected value in the focused card
    pub fn selected_cell(&self) -> Option<CellRef> {
        let dataset = self.focused.dataset();
        let field = *editable_columns(dataset).get(self.column)?;
        (self.row < self.store.len(dataset)).then(|| CellRef::new(dataset, self.row, field))
    }

    fn focus_card(&mut self, card: Card) {
        if card == self.focused {
            return;
        }
        self.focused = card;
        let dataset = card.dataset();
        self.row = self.row.min(self.store.len(dataset).saturating_sub(1));
        self.column = self.column.min(editable_columns(dataset).len().saturating_sub(1));
    }

    fn move_row(&mut self, delta: isize) {
        let len = self.store.len(self.focused.dataset());
        if len == 0 {
            return;
        }
        self.row = (self.row as isize + delta).clamp(0, len as isize - 1) as usize;
    }

    fn move_column(&mut self, delta: isize) {
        let len = editable_columns(self.focused.dataset()).len();
        if len == 0 {
            return;
        }
        self.column = (self.column as isize + delta).clamp(0, len as isize - 1) as usize;
    }

    fn cell_label(&self, cell: CellRef) -> String {
        let name = self.store.record_name(cell.dataset, cell.index).unwrap_or("?");
        format!("{} / {} / {}", cell.dataset.name().to_uppercase(), name, cell.field.label())
    }

    fn set_status<S: Into<String>>(&mut self, message: S) {
        self.status = Some(message.into());
    }

    pub fn summary(&self) -> Summary {
        Summary::compute(&self.store)
    }

    pub fn ui_colors(&self) -> &UiColors {
        &self.config.ui.colors
    }

    pub fn top_bar_buttons(&self) -> &[TopBarButton] {
        &self.config.top_bar.buttons
    }

    /// Check if the key event matches any of the bindings in the list
    fn key_matches_any(&self, event: &KeyEvent, bindings: &[String]) -> bool {
        bindings.iter().any(|b| key_matches_single(event, b))
    }

    // =========================================================================
    // Modals
    // =========================================================================

    fn handle_confirm_modal_key(&mut self, key: KeyEvent) {
        let Some(modal) = self.confirm_modal.as_ref() else {
            return;
        };
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                let action = modal.action;
                self.confirm_modal = None;
                match action {
                    ConfirmAction::Reset => {
                        self.store.reset();
                        self.set_status("Datasets reset to seed values");
                    }
                }
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') => {
                self.confirm_modal = None;
                self.set_status("Cancelled");
            }
            _ => {}
        }
    }

    /// Generate help content from current keybindings configuration
    pub fn help_entries(&self) -> Vec<HelpSection> {
        let keys = &self.config.keys;

        vec![
            HelpSection {
                title: "Global",
                entries: vec![
                    HelpEntry {
                        action: "Quit",
                        keys: keys.global.quit.join(", "),
                    },
                    HelpEntry {
                        action: "Help",
                        keys: keys.global.help.join(", "),
                    },
                    HelpEntry {
                        action: "Focus card",
                        keys: "1-4".to_string(),
                    },
                ],
            },
            HelpSection {
                title: "Navigation",
                entries: vec![
                    HelpEntry {
                        action: "Next row",
                        keys: keys.navigation.next.join(", "),
                    },
                    HelpEntry {
                        action: "Previous row",
                        keys: keys.navigation.prev.join(", "),
                    },
                    HelpEntry {
                        action: "Next column",
                        keys: keys.navigation.right.join(", "),
                    },
                    HelpEntry {
                        action: "Previous column",
                        keys: keys.navigation.left.join(", "),
                    },
                    HelpEntry {
                        action: "Next card",
                        keys: keys.navigation.card_next.join(", "),
                    },
                    HelpEntry {
                        action: "Previous card",
                        keys: keys.navigation.card_prev.join(", "),
                    },
                    HelpEntry {
                        action: "Edit value",
                        keys: keys.navigation.edit.join(", "),
                    },
                ],
            },
            HelpSection {
                title: "Editor",
                entries: vec![HelpEntry {
                    action: "Finish editing",
                    keys: keys.editor.blur.join(", "),
                }],
            },
            HelpSection {
                title: "Mouse",
                entries: vec![
                    HelpEntry {
                        action: "Edit value",
                        keys: "Click value".to_string(),
                    },
                    HelpEntry {
                        action: "Finish editing",
                        keys: "Click elsewhere".to_string(),
                    },
                ],
            },
        ]
    }

    fn help_total_lines(&self) -> usize {
        self.help_entries()
            .iter()
            .map(|section| section.entries.len() + 2)
            .sum()
    }

    pub fn show_help(&mut self) {
        let total_lines = self.help_total_lines();
        self.help_modal = Some(HelpModal::new(total_lines));
    }

    fn handle_help_modal_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
            self.help_modal = None;
            return;
        }

        let Some(modal) = self.help_modal.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => modal.scroll_down(1),
            KeyCode::Char('k') | KeyCode::Up => modal.scroll_up(1),
            KeyCode::PageDown => {
                let page = modal.viewport_height.saturating_sub(1).max(1);
                modal.scroll_down(page);
            }
            KeyCode::PageUp => {
                let page = modal.viewport_height.saturating_sub(1).max(1);
                modal.scroll_up(page);
            }
            _ => {}
        }
    }

    // =========================================================================
    // Top Bar Actions
    // =========================================================================

    fn top_bar_action_for_key(&self, key: &KeyEvent) -> Option<TopBarAction> {
        let KeyCode::F(number) = key.code else {
            return None;
        };
        self.config
            .top_bar
            .buttons
            .iter()
            .find(|button| button.function_key_number() == Some(number))
            .map(|button| button.action)
    }

    fn handle_top_bar_action(&mut self, action: TopBarAction) {
        match action {
            TopBarAction::Help => self.show_help(),
            TopBarAction::Edit => self.begin_edit(),
            TopBarAction::Reset => {
                self.modal_popup = PopupState::default();
                self.confirm_modal = Some(ConfirmModal {
                    title: "RESET".to_string(),
                    message: "Restore all datasets to their seed values?".to_string(),
                    action: ConfirmAction::Reset,
                });
            }
        }
    }
}

/// Editable fields of `dataset`, in column order
pub fn editable_columns(dataset: DatasetKind) -> Vec<FieldKey> {
    dataset
        .columns()
        .iter()
        .copied()
        .filter(|field| dataset.is_editable(*field))
        .collect()
}

/// Check if the key event matches a single binding string
fn key_matches_single(event: &KeyEvent, binding: &str) -> bool {
    let trimmed = binding.trim();
    if trimmed.is_empty() {
        return false;
    }

    // Disallow Ctrl/Alt/Super modifiers (we don't support them)
    let disallowed = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER;
    if event.modifiers.intersects(disallowed) {
        return false;
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "enter" => matches!(event.code, KeyCode::Enter),
        "tab" => matches!(event.code, KeyCode::Tab),
        "backtab" | "shift+tab" => matches!(event.code, KeyCode::BackTab),
        "backspace" => matches!(event.code, KeyCode::Backspace),
        "esc" | "escape" => matches!(event.code, KeyCode::Esc),
        "space" => matches!(event.code, KeyCode::Char(' ')),
        "up" => matches!(event.code, KeyCode::Up),
        "down" => matches!(event.code, KeyCode::Down),
        "left" => matches!(event.code, KeyCode::Left),
        "right" => matches!(event.code, KeyCode::Right),
        "pageup" | "page_up" => matches!(event.code, KeyCode::PageUp),
        "pagedown" | "page_down" => matches!(event.code, KeyCode::PageDown),
        "home" => matches!(event.code, KeyCode::Home),
        "end" => matches!(event.code, KeyCode::End),
        named if named.len() > 1 && named.starts_with('f') => named[1..]
            .parse::<u8>()
            .map(|n| matches!(event.code, KeyCode::F(code) if code == n))
            .unwrap_or(false),
        // Single character - case-sensitive (m != M, since M requires Shift)
        _ => {
            let mut chars = trimmed.chars();
            if let (Some(first), None) = (chars.next(), chars.next()) {
                matches!(event.code, KeyCode::Char(c) if c == first)
            } else {
                false
            }
        }
    }
}
