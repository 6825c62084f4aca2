use super::form::{FormAction, FormState};
use crate::db::store::ExpenseStore;
use crate::error::AppError;
use crate::models::period::Period;
use crate::models::transaction::Transaction;
use crate::operations::{add, edit, remove, report};
use crate::operations::report::{ReportData, ReportOutcome};
use crate::session::Session;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::warn;
use ratatui::widgets::TableState;
use std::cmp::max;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Add,
    List,
    Reports,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Add, Tab::List, Tab::Reports];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Add => "Add Expense",
            Tab::List => "View Expenses",
            Tab::Reports => "Reports",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Add => 0,
            Tab::List => 1,
            Tab::Reports => 2,
        }
    }

    fn next(self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn prev(self) -> Self {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub title: String,
    pub body: String,
}

impl Message {
    fn info(title: &str, body: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            title: title.to_string(),
            body: body.into(),
        }
    }

    fn error(body: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            title: "Error".to_string(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Edit,
    Delete,
}

impl MenuItem {
    pub const ALL: [MenuItem; 2] = [MenuItem::Edit, MenuItem::Delete];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Edit => "Edit",
            MenuItem::Delete => "Delete",
        }
    }
}

/// Modal dialogs of the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    ContextMenu { selected: usize },
    Edit { id: i64, state: FormState },
    ConfirmDelete { id: i64 },
}

pub struct App<S: ExpenseStore> {
    pub store: S,
    pub session: Session,
    pub tab: Tab,
    pub add_form: FormState,
    pub table_state: TableState,
    pub report: Option<ReportData>,
    pub dialog: Option<Dialog>,
    /// Drawn above everything else and takes every key until dismissed.
    pub message: Option<Message>,
    pub last_page_size: usize,
    pub should_quit: bool,
    today: NaiveDate,
}

impl<S: ExpenseStore> App<S> {
    pub fn new(store: S, today: NaiveDate) -> Self {
        let mut app = Self {
            store,
            session: Session::new(Period::containing(today)),
            tab: Tab::Add,
            add_form: FormState::blank(&today.format("%Y-%m-%d").to_string()),
            table_state: TableState::default(),
            report: None,
            dialog: None,
            message: None,
            last_page_size: 10,
            should_quit: false,
            today,
        };
        app.reload_list();
        app
    }

    pub fn selected_transaction(&self) -> Option<&Transaction> {
        let idx = self.table_state.selected()?;
        self.session.listing.transactions.get(idx)
    }

    fn reload_list(&mut self) {
        self.session.reload(&self.store);
        let len = self.session.listing.transactions.len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            let selected = self.table_state.selected().unwrap_or(0).min(len - 1);
            self.table_state.select(Some(selected));
        }
    }

    fn move_selection(&mut self, delta: i32) {
        let len = self.session.listing.transactions.len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as i32;
        let next = (current + delta).clamp(0, len as i32 - 1) as usize;
        self.table_state.select(Some(next));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Many terminals emit both a Press and a Release event. Only act on Press/Repeat.
        if key.kind == KeyEventKind::Release {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.should_quit = true;
            return;
        }

        if self.message.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.message = None;
            }
            return;
        }

        if let Some(dialog) = self.dialog.take() {
            self.dialog = self.handle_dialog_key(dialog, key);
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.tab = self.tab.next();
                return;
            }
            KeyCode::BackTab => {
                self.tab = self.tab.prev();
                return;
            }
            KeyCode::F(n @ 1..=3) => {
                self.tab = Tab::ALL[(n - 1) as usize];
                return;
            }
            _ => {}
        }

        match self.tab {
            Tab::Add => self.handle_add_key(key),
            Tab::List => self.handle_list_key(key),
            Tab::Reports => self.handle_report_key(key),
        }
    }

    fn handle_add_key(&mut self, key: KeyEvent) {
        match self.add_form.handle_key(key) {
            FormAction::Submit => self.submit_add_form(),
            FormAction::Clear => self.clear_add_form(),
            FormAction::Cancel | FormAction::None => {}
        }
    }

    fn clear_add_form(&mut self) {
        self.add_form = FormState::blank(&self.today.format("%Y-%m-%d").to_string());
    }

    fn submit_add_form(&mut self) {
        match add::add_expense(&mut self.store, &self.add_form.form) {
            Ok(_) => {
                self.message = Some(Message::info("Success", "Expense added successfully!"));
                self.clear_add_form();
                self.reload_list();
            }
            Err(AppError::Validation(e)) => self.message = Some(Message::error(e.to_string())),
            Err(e) => {
                self.message = Some(Message::error(format!(
                    "Failed to add expense to database: {}",
                    e
                )))
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-(max(1, self.last_page_size) as i32)),
            KeyCode::PageDown => self.move_selection(max(1, self.last_page_size) as i32),
            KeyCode::Home => self.move_selection(i32::MIN / 2),
            KeyCode::End => self.move_selection(i32::MAX / 2),
            KeyCode::Left => self.session.list_period = self.session.list_period.with_month_offset(-1),
            KeyCode::Right => self.session.list_period = self.session.list_period.with_month_offset(1),
            KeyCode::Char('-') => self.session.list_period = self.session.list_period.with_year_offset(-1),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.session.list_period = self.session.list_period.with_year_offset(1)
            }
            KeyCode::Char('f') => self.reload_list(),
            KeyCode::Enter | KeyCode::Char('m') => {
                if self.selected_transaction().is_some() {
                    self.dialog = Some(Dialog::ContextMenu { selected: 0 });
                }
            }
            KeyCode::Char('e') => self.open_menu_item(MenuItem::Edit),
            KeyCode::Char('d') | KeyCode::Delete => self.open_menu_item(MenuItem::Delete),
            _ => {}
        }
    }

    fn open_menu_item(&mut self, item: MenuItem) {
        let Some(tx) = self.selected_transaction() else {
            return;
        };
        let dialog = match item {
            MenuItem::Edit => Dialog::Edit {
                id: tx.id,
                state: FormState::new(edit::form_for(tx)),
            },
            MenuItem::Delete => Dialog::ConfirmDelete { id: tx.id },
        };
        self.dialog = Some(dialog);
    }

    /// Returns the dialog that stays open after `key`, if any.
    fn handle_dialog_key(&mut self, dialog: Dialog, key: KeyEvent) -> Option<Dialog> {
        match dialog {
            Dialog::ContextMenu { selected } => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => None,
                KeyCode::Up => Some(Dialog::ContextMenu {
                    selected: selected.saturating_sub(1),
                }),
                KeyCode::Down => Some(Dialog::ContextMenu {
                    selected: (selected + 1).min(MenuItem::ALL.len() - 1),
                }),
                KeyCode::Enter => {
                    self.open_menu_item(MenuItem::ALL[selected]);
                    self.dialog.take()
                }
                _ => Some(Dialog::ContextMenu { selected }),
            },
            Dialog::Edit { id, mut state } => match state.handle_key(key) {
                FormAction::Cancel => None,
                FormAction::Submit => self.save_edit(id, state),
                FormAction::Clear | FormAction::None => Some(Dialog::Edit { id, state }),
            },
            Dialog::ConfirmDelete { id } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.delete(id);
                    None
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => None,
                _ => Some(Dialog::ConfirmDelete { id }),
            },
        }
    }

    fn save_edit(&mut self, id: i64, state: FormState) -> Option<Dialog> {
        match edit::update_expense(&mut self.store, id, &state.form) {
            Ok(()) => {
                self.message = Some(Message::info("Success", "Expense updated successfully!"));
                self.reload_list();
                None
            }
            Err(AppError::Validation(e)) => {
                self.message = Some(Message::error(e.to_string()));
                Some(Dialog::Edit { id, state })
            }
            Err(e) => {
                self.message = Some(Message::error(format!("Failed to update expense: {}", e)));
                Some(Dialog::Edit { id, state })
            }
        }
    }

    fn delete(&mut self, id: i64) {
        match remove::delete_expense(&mut self.store, id) {
            Ok(()) => {
                self.message = Some(Message::info("Success", "Expense deleted successfully!"));
                self.reload_list();
            }
            Err(e) => {
                self.message = Some(Message::error(format!("Failed to delete expense: {}", e)));
            }
        }
    }

    fn handle_report_key(&mut self, key: KeyEvent) {
        let period = &mut self.session.report_period;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left => *period = period.with_month_offset(-1),
            KeyCode::Right => *period = period.with_month_offset(1),
            KeyCode::Char('-') => *period = period.with_year_offset(-1),
            KeyCode::Char('+') | KeyCode::Char('=') => *period = period.with_year_offset(1),
            KeyCode::Char('g') => self.generate_report(),
            _ => {}
        }
    }

    fn generate_report(&mut self) {
        self.report = None;
        let period = self.session.report_period;
        match report::build_report(&self.store, period) {
            Ok(ReportOutcome::Report(data)) => self.report = Some(data),
            Ok(ReportOutcome::NoData(period)) => {
                self.message = Some(Message::info(
                    "No Data",
                    format!("No expenses found for {}", period),
                ));
            }
            Err(e) => {
                warn!("Error building report for {}: {}", period, e);
                self.message = Some(Message::error(format!("Failed to generate report: {}", e)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_store::MemoryExpenseStore;
    use crate::fmt::money;
    use crate::operations::add::ExpenseForm;
    use crate::tui::form::Field;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App<MemoryExpenseStore>, text: &str) {
        for ch in text.chars() {
            app.handle_key(key(KeyCode::Char(ch)));
        }
    }

    fn app_with(rows: &[(&str, &str, &str)]) -> App<MemoryExpenseStore> {
        let mut store = MemoryExpenseStore::new();
        for (amount, category, date) in rows {
            add::add_expense(&mut store, &ExpenseForm::new(amount, category, date, "")).unwrap();
        }
        App::new(store, today())
    }

    #[test]
    fn test_starts_on_current_month() {
        let app = app_with(&[("5", "Food", "2024-03-01"), ("6", "Food", "2024-02-01")]);
        assert_eq!(app.session.list_period, Period::new(2024, 3).unwrap());
        assert_eq!(app.session.listing.transactions.len(), 1);
        assert_eq!(app.add_form.form.date, "2024-03-20");
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn test_add_valid_expense_clears_form_and_refreshes_list() {
        let mut app = app_with(&[]);
        type_text(&mut app, "45.00");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "Food");
        app.handle_key(ctrl('s'));

        let message = app.message.clone().unwrap();
        assert_eq!(message.kind, MessageKind::Info);
        assert_eq!(message.body, "Expense added successfully!");
        assert_eq!(app.add_form, FormState::blank("2024-03-20"));
        assert_eq!(app.session.listing.transactions.len(), 1);
        assert_eq!(money(app.session.listing.total), "$45.00");
    }

    #[test]
    fn test_add_invalid_expense_keeps_input() {
        let mut app = app_with(&[]);
        type_text(&mut app, "0");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "Food");
        app.handle_key(ctrl('s'));

        assert_eq!(app.message.as_ref().unwrap().kind, MessageKind::Error);
        assert_eq!(app.add_form.form.amount, "0");
        assert_eq!(app.add_form.form.category, "Food");
        assert!(app.store.all().is_empty());

        // The modal swallows keys until dismissed.
        app.handle_key(key(KeyCode::Char('9')));
        assert_eq!(app.add_form.form.amount, "0");
        app.handle_key(key(KeyCode::Enter));
        assert!(app.message.is_none());
    }

    #[test]
    fn test_add_storage_failure_is_reported() {
        let mut app = app_with(&[]);
        app.store.offline = true;
        app.add_form.form = ExpenseForm::new("3", "Food", "2024-03-01", "");
        app.handle_key(ctrl('s'));

        let message = app.message.unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert!(message.body.starts_with("Failed to add expense"));
        assert_eq!(app.add_form.form.amount, "3");
    }

    #[test]
    fn test_clear_form_resets_to_today() {
        let mut app = app_with(&[]);
        type_text(&mut app, "12");
        app.add_form.focus = Field::Description;
        type_text(&mut app, "note");
        app.handle_key(ctrl('x'));
        assert_eq!(app.add_form, FormState::blank("2024-03-20"));
    }

    #[test]
    fn test_tab_switching() {
        let mut app = app_with(&[]);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.tab, Tab::List);
        app.handle_key(key(KeyCode::F(3)));
        assert_eq!(app.tab, Tab::Reports);
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.tab, Tab::List);
    }

    #[test]
    fn test_filter_reloads_selected_period() {
        let mut app = app_with(&[("5", "Food", "2024-03-01"), ("6", "Food", "2024-02-01")]);
        app.tab = Tab::List;
        app.handle_key(key(KeyCode::Left));
        // Changing the selector alone does not reload.
        assert_eq!(app.session.listing.period, Period::new(2024, 3).unwrap());
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.session.listing.period, Period::new(2024, 2).unwrap());
        assert_eq!(money(app.session.listing.total), "$6.00");
    }

    #[test]
    fn test_empty_period_shows_zero_total() {
        let mut app = app_with(&[("5", "Food", "2024-03-01")]);
        app.tab = Tab::List;
        app.handle_key(key(KeyCode::Char('-')));
        app.handle_key(key(KeyCode::Char('f')));
        assert!(app.session.listing.transactions.is_empty());
        assert_eq!(money(app.session.listing.total), "$0.00");
        assert_eq!(app.table_state.selected(), None);
    }

    #[test]
    fn test_edit_through_context_menu() {
        let mut app = app_with(&[("5", "Food", "2024-03-01")]);
        app.tab = Tab::List;
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.dialog, Some(Dialog::ContextMenu { selected: 0 }));

        app.handle_key(key(KeyCode::Enter));
        let Some(Dialog::Edit { state, .. }) = &app.dialog else {
            panic!("expected edit dialog");
        };
        assert_eq!(state.form.amount, "5.00");
        assert_eq!(state.form.category, "Food");

        for _ in 0..4 {
            app.handle_key(key(KeyCode::Backspace));
        }
        type_text(&mut app, "7.5");
        app.handle_key(ctrl('s'));

        assert!(app.dialog.is_none());
        assert_eq!(app.message.as_ref().unwrap().body, "Expense updated successfully!");
        assert_eq!(money(app.session.listing.total), "$7.50");
    }

    #[test]
    fn test_edit_validation_error_keeps_dialog_open() {
        let mut app = app_with(&[("5", "Food", "2024-03-01")]);
        app.tab = Tab::List;
        app.handle_key(key(KeyCode::Char('e')));
        if let Some(Dialog::Edit { state, .. }) = &mut app.dialog {
            state.form.date = "2024-13-01".to_string();
        }
        app.handle_key(ctrl('s'));

        assert_eq!(app.message.as_ref().unwrap().kind, MessageKind::Error);
        assert!(matches!(app.dialog, Some(Dialog::Edit { .. })));
        assert_eq!(app.store.all()[0].amount, rust_decimal::Decimal::from(5));
    }

    #[test]
    fn test_edit_cancel_changes_nothing() {
        let mut app = app_with(&[("5", "Food", "2024-03-01")]);
        app.tab = Tab::List;
        app.handle_key(key(KeyCode::Char('e')));
        type_text(&mut app, "9");
        app.handle_key(key(KeyCode::Esc));
        assert!(app.dialog.is_none());
        assert_eq!(app.store.writes, 1);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = app_with(&[("5", "Food", "2024-03-01"), ("6", "Bills", "2024-03-02")]);
        app.tab = Tab::List;
        let target = app.selected_transaction().unwrap().id;

        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.store.all().len(), 2);

        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.dialog, Some(Dialog::ConfirmDelete { id: target }));
        app.handle_key(key(KeyCode::Char('y')));

        assert_eq!(app.store.all().len(), 1);
        assert!(app.store.all().iter().all(|t| t.id != target));
        assert_eq!(app.message.as_ref().unwrap().body, "Expense deleted successfully!");
        assert_eq!(app.session.listing.transactions.len(), 1);
    }

    #[test]
    fn test_context_menu_needs_a_selection() {
        let mut app = app_with(&[]);
        app.tab = Tab::List;
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('e')));
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_generate_report() {
        let mut app = app_with(&[("45.00", "Food", "2024-03-05")]);
        app.tab = Tab::Reports;
        app.handle_key(key(KeyCode::Char('g')));

        let report = app.report.as_ref().unwrap();
        assert_eq!(report.slices.len(), 1);
        assert_eq!(report.slices[0].category, "Food");
        assert_eq!(money(report.slices[0].total), "$45.00");
        assert!(app.message.is_none());
    }

    #[test]
    fn test_report_for_empty_month_is_informational() {
        let mut app = app_with(&[("45.00", "Food", "2024-03-05")]);
        app.tab = Tab::Reports;
        app.handle_key(key(KeyCode::Char('g')));
        assert!(app.report.is_some());

        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char('g')));

        assert!(app.report.is_none());
        let message = app.message.unwrap();
        assert_eq!(message.kind, MessageKind::Info);
        assert_eq!(message.body, "No expenses found for April 2024");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app_with(&[]);
        type_text(&mut app, "q");
        assert!(!app.should_quit);
        assert_eq!(app.add_form.form.amount, "q");

        app.handle_key(ctrl('c'));
        assert!(app.should_quit);
    }
}
