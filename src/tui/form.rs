use crate::models::transaction::SUGGESTED_CATEGORIES;
use crate::operations::add::ExpenseForm;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Amount,
    Category,
    Date,
    Description,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Amount,
        Field::Category,
        Field::Date,
        Field::Description,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Amount => "Amount",
            Field::Category => "Category",
            Field::Date => "Date (YYYY-MM-DD)",
            Field::Description => "Description",
        }
    }

    fn next(self) -> Self {
        match self {
            Field::Amount => Field::Category,
            Field::Category => Field::Date,
            Field::Date => Field::Description,
            Field::Description => Field::Amount,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::Amount => Field::Description,
            Field::Category => Field::Amount,
            Field::Date => Field::Category,
            Field::Description => Field::Date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Clear,
    Cancel,
}

/// Editable expense form shared by the add tab and the edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub form: ExpenseForm,
    pub focus: Field,
}

impl FormState {
    pub fn new(form: ExpenseForm) -> Self {
        Self {
            form,
            focus: Field::Amount,
        }
    }

    /// Empty form with the date defaulted to `today`.
    pub fn blank(today: &str) -> Self {
        Self::new(ExpenseForm::new("", "", today, ""))
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Amount => &self.form.amount,
            Field::Category => &self.form.category,
            Field::Date => &self.form.date,
            Field::Description => &self.form.description,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Amount => &mut self.form.amount,
            Field::Category => &mut self.form.category,
            Field::Date => &mut self.form.date,
            Field::Description => &mut self.form.description,
        }
    }

    /// Step through the suggestion list from whatever is typed now.
    fn cycle_category(&mut self, delta: isize) {
        let count = SUGGESTED_CATEGORIES.len() as isize;
        let current = SUGGESTED_CATEGORIES
            .iter()
            .position(|c| c.eq_ignore_ascii_case(self.form.category.trim()));
        let next = match current {
            Some(idx) => (idx as isize + delta).rem_euclid(count),
            None if delta >= 0 => 0,
            None => count - 1,
        };
        self.form.category = SUGGESTED_CATEGORIES[next as usize].to_string();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => FormAction::Submit,
                KeyCode::Char('x') => FormAction::Clear,
                _ => FormAction::None,
            };
        }

        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Up | KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Down | KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::Enter => {
                if self.focus == Field::Description {
                    self.form.description.push('\n');
                } else {
                    self.focus = self.focus.next();
                }
            }
            KeyCode::Left if self.focus == Field::Category => self.cycle_category(-1),
            KeyCode::Right if self.focus == Field::Category => self.cycle_category(1),
            KeyCode::Backspace => {
                self.value_mut(self.focus).pop();
            }
            KeyCode::Char(ch) => self.value_mut(self.focus).push(ch),
            _ => {}
        }
        FormAction::None
    }
}
