use crossterm::event::{Event, KeyEvent};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::config::CommitMode;
use crate::dataset::{FieldValue, ValueKind};
use crate::error::DashboardError;
use crate::store::CellRef;

/// Inline editor for a single dashboard value.
///
/// Display mode is `editing == false`. While editing, the change callback
/// receives the coerced input on every text change (or once on blur with
/// [`CommitMode::Blur`]). Input that fails numeric coercion is never passed
/// on.
#[derive(Default)]
pub struct EditableValue {
    editing: bool,
    kind: ValueKind,
    commit: CommitMode,
    target: Option<CellRef>,
    input: Input,
}

/// What a key press did to the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// Key did not change the text (cursor movement, or editor idle)
    Unchanged,
    /// Text changed but the callback was deferred until blur
    Pending,
    /// Callback ran with this value
    Emitted(FieldValue),
    /// Text changed but could not be coerced; callback suppressed
    Rejected(DashboardError),
}

impl EditableValue {
    pub fn new(commit: CommitMode) -> Self {
        Self {
            commit,
            ..Self::default()
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn target(&self) -> Option<CellRef> {
        self.target
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn visual_cursor(&self) -> usize {
        self.input.visual_cursor()
    }

    /// Leading characters hidden when the input is shown in `width` cells.
    pub fn visual_scroll(&self, width: usize) -> usize {
        self.input.visual_scroll(width)
    }

    /// Enter edit mode on `target`, pre-filled with `current`.
    pub fn start(&mut self, current: &str, target: CellRef, kind: ValueKind) {
        self.editing = true;
        self.kind = kind;
        self.target = Some(target);
        self.input = Input::new(current.to_string());
    }

    pub fn handle_key_event<F>(&mut self, key: KeyEvent, on_change: F) -> EditOutcome
    where
        F: FnOnce(CellRef, &FieldValue) -> Result<(), DashboardError>,
    {
        let Some(target) = self.target.filter(|_| self.editing) else {
            return EditOutcome::Unchanged;
        };

        let changed = self
            .input
            .handle_event(&Event::Key(key))
            .map(|change| change.value)
            .unwrap_or(false);
        if !changed {
            return EditOutcome::Unchanged;
        }

        match self.commit {
            CommitMode::Blur => EditOutcome::Pending,
            CommitMode::Keystroke => self.emit(target, on_change),
        }
    }

    /// Leave edit mode. Only [`CommitMode::Blur`] fires the callback here.
    pub fn blur<F>(&mut self, on_change: F) -> EditOutcome
    where
        F: FnOnce(CellRef, &FieldValue) -> Result<(), DashboardError>,
    {
        let target = self.target.take().filter(|_| self.editing);
        self.editing = false;

        let outcome = match (target, self.commit) {
            (Some(target), CommitMode::Blur) => self.emit(target, on_change),
            _ => EditOutcome::Unchanged,
        };
        self.input.reset();
        outcome
    }

    fn emit<F>(&self, target: CellRef, on_change: F) -> EditOutcome
    where
        F: FnOnce(CellRef, &FieldValue) -> Result<(), DashboardError>,
    {
        let value = match FieldValue::coerce(self.input.value(), self.kind) {
            Ok(value) => value,
            Err(err) => return EditOutcome::Rejected(err),
        };
        match on_change(target, &value) {
            Ok(()) => EditOutcome::Emitted(value),
            Err(err) => EditOutcome::Rejected(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DatasetKind, FieldKey};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn cell() -> CellRef {
        CellRef::new(DatasetKind::Channel, 0, FieldKey::Mtd)
    }

    fn type_text(editor: &mut EditableValue, text: &str, seen: &mut Vec<FieldValue>) {
        for c in text.chars() {
            editor.handle_key_event(key(KeyCode::Char(c)), |_, value| {
                seen.push(value.clone());
                Ok(())
            });
        }
    }

    fn clear(editor: &mut EditableValue) {
        while !editor.value().is_empty() {
            editor.handle_key_event(key(KeyCode::Backspace), |_, _| Ok(()));
        }
    }

    #[test]
    fn starts_in_display_mode() {
        let editor = EditableValue::default();
        assert!(!editor.is_editing());
        assert_eq!(editor.target(), None);
    }

    #[test]
    fn typing_a_number_emits_numbers_on_each_keystroke() {
        let mut editor = EditableValue::new(CommitMode::Keystroke);
        editor.start("", cell(), ValueKind::Number);
        assert!(editor.is_editing());

        let mut seen = Vec::new();
        type_text(&mut editor, "42", &mut seen);

        assert_eq!(seen, vec![FieldValue::Number(4.0), FieldValue::Number(42.0)]);
    }

    #[test]
    fn text_kind_passes_input_through() {
        let mut editor = EditableValue::new(CommitMode::Keystroke);
        editor.start("", cell(), ValueKind::Text);

        let mut seen = Vec::new();
        type_text(&mut editor, "42", &mut seen);
        assert_eq!(seen.last(), Some(&FieldValue::Text("42".into())));
    }

    #[test]
    fn blur_without_typing_does_not_fire() {
        let mut editor = EditableValue::new(CommitMode::Keystroke);
        editor.start("10", cell(), ValueKind::Number);

        let mut calls = 0;
        let outcome = editor.blur(|_, _| {
            calls += 1;
            Ok(())
        });

        assert_eq!(outcome, EditOutcome::Unchanged);
        assert_eq!(calls, 0);
        assert!(!editor.is_editing());
        assert_eq!(editor.target(), None);
    }

    #[test]
    fn non_numeric_input_is_suppressed() {
        let mut editor = EditableValue::new(CommitMode::Keystroke);
        editor.start("", cell(), ValueKind::Number);

        let mut calls = 0;
        let outcome = editor.handle_key_event(key(KeyCode::Char('x')), |_, _| {
            calls += 1;
            Ok(())
        });

        assert!(matches!(outcome, EditOutcome::Rejected(DashboardError::NotANumber { .. })));
        assert_eq!(calls, 0);
    }

    #[test]
    fn clearing_the_input_is_suppressed() {
        let mut editor = EditableValue::new(CommitMode::Keystroke);
        editor.start("7", cell(), ValueKind::Number);

        let outcome = editor.handle_key_event(key(KeyCode::Backspace), |_, _| {
            panic!("empty input must not reach the store")
        });
        assert!(matches!(outcome, EditOutcome::Rejected(_)));
    }

    #[test]
    fn cursor_keys_do_not_fire() {
        let mut editor = EditableValue::new(CommitMode::Keystroke);
        editor.start("12", cell(), ValueKind::Number);

        let outcome = editor.handle_key_event(key(KeyCode::Left), |_, _| {
            panic!("cursor movement is not a change")
        });
        assert_eq!(outcome, EditOutcome::Unchanged);
    }

    #[test]
    fn callback_errors_are_reported() {
        let mut editor = EditableValue::new(CommitMode::Keystroke);
        editor.start("", cell(), ValueKind::Number);

        let outcome = editor.handle_key_event(key(KeyCode::Char('1')), |target, _| {
            Err(DashboardError::IndexOutOfRange {
                dataset: target.dataset,
                index: target.index,
                len: 0,
            })
        });
        assert!(matches!(outcome, EditOutcome::Rejected(DashboardError::IndexOutOfRange { .. })));
    }

    #[test]
    fn blur_mode_defers_until_blur() {
        let mut editor = EditableValue::new(CommitMode::Blur);
        editor.start("10", cell(), ValueKind::Number);
        clear(&mut editor);

        let mut seen = Vec::new();
        for c in "25".chars() {
            let outcome = editor.handle_key_event(key(KeyCode::Char(c)), |_, value| {
                seen.push(value.clone());
                Ok(())
            });
            assert_eq!(outcome, EditOutcome::Pending);
        }
        assert!(seen.is_empty());

        let outcome = editor.blur(|target, value| {
            assert_eq!(target, cell());
            seen.push(value.clone());
            Ok(())
        });
        assert_eq!(outcome, EditOutcome::Emitted(FieldValue::Number(25.0)));
        assert_eq!(seen, vec![FieldValue::Number(25.0)]);
    }

    #[test]
    fn idle_editor_ignores_keys() {
        let mut editor = EditableValue::new(CommitMode::Keystroke);
        let outcome = editor.handle_key_event(key(KeyCode::Char('1')), |_, _| {
            panic!("not editing")
        });
        assert_eq!(outcome, EditOutcome::Unchanged);
    }
}
