use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use task_core::{Field, Notice, Task, TaskApi, TaskView, STATUS_FILTERS};

/// How long a notice stays in the footer.
const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Table,
    Form,
    Confirm,
}

/// Work that has to reach the task store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Reload,
    Submit,
    ConfirmDelete,
}

pub struct App<A> {
    pub view: TaskView<A>,
    pub source: String,
    pub selected: usize,
    pub focus: Field,
    notice: Option<(Notice, Instant)>,
}

impl<A: TaskApi> App<A> {
    pub fn new(view: TaskView<A>, source: String) -> Self {
        Self {
            view,
            source,
            selected: 0,
            focus: Field::Title,
            notice: None,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.view.pending_delete().is_some() {
            Mode::Confirm
        } else if self.view.modal().is_some() {
            Mode::Form
        } else {
            Mode::Table
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.view.visible_rows().get(self.selected).copied()
    }

    /// The most recent notice, while it is still fresh.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice
            .as_ref()
            .filter(|(_, at)| at.elapsed() < NOTICE_TTL)
            .map(|(notice, _)| notice)
    }

    /// Move notices out of the view into the footer slot.
    pub fn collect_notices(&mut self) {
        for notice in self.view.take_notices() {
            tracing::debug!(level = ?notice.level, text = %notice.text, "notice");
            self.notice = Some((notice, Instant::now()));
        }
        self.clamp_selection();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        match self.mode() {
            Mode::Table => self.handle_table_key(key),
            Mode::Form => self.handle_form_key(key),
            Mode::Confirm => self.handle_confirm_key(key),
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char('r') => return Action::Reload,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected += 1;
                self.clamp_selection();
            }
            KeyCode::Left => {
                self.view.prev_page();
                self.selected = 0;
            }
            KeyCode::Right => {
                self.view.next_page();
                self.selected = 0;
            }
            KeyCode::Char('n') => {
                self.view.open_modal(None);
                self.focus = Field::Title;
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(id) = self.selected_task().map(|t| t.id) {
                    self.view.open_edit(id);
                    self.focus = Field::Title;
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_task().map(|t| t.id) {
                    self.view.request_delete(id);
                }
            }
            KeyCode::Char('s') => self.view.table_mut().cycle_sort(),
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                self.view.table_mut().toggle_status_filter(STATUS_FILTERS[index]);
                self.selected = 0;
            }
            KeyCode::Char('0') => {
                self.view.table_mut().clear_status_filters();
                self.selected = 0;
            }
            KeyCode::Char('x') => self.view.dismiss_error(),
            _ => {}
        }
        Action::None
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => self.view.close_modal(),
            KeyCode::Enter => {
                if !self.view.is_submitting() {
                    return Action::Submit;
                }
            }
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Backspace => {
                let focus = self.focus;
                if let Some(form) = self.view.form_mut() {
                    form.value_mut(focus).pop();
                }
            }
            KeyCode::Char(c) => {
                let focus = self.focus;
                if let Some(form) = self.view.form_mut() {
                    form.value_mut(focus).push(c);
                }
            }
            _ => {}
        }
        Action::None
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::ConfirmDelete,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.view.cancel_delete();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn clamp_selection(&mut self) {
        let rows = self.view.visible_rows().len();
        self.selected = self.selected.min(rows.saturating_sub(1));
    }
}
