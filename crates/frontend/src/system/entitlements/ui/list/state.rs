use contracts::system::entitlements::EntitlementRecord;
use leptos::prelude::*;

use crate::shared::list_utils::sort_list;
use crate::system::entitlements::model::{EntitlementRow, DEFAULT_SORT_COLUMN};
use crate::system::entitlements::ui::form::EntitlementFormKind;

/// Состояние сортировки таблицы.
///
/// Пока колонка не выбрана, таблица сортируется по `DEFAULT_SORT_COLUMN`
/// в текущем направлении (изначально по убыванию).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<String>,
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: None,
            ascending: false,
        }
    }
}

impl SortState {
    pub fn effective_column(&self) -> &str {
        self.column.as_deref().unwrap_or(DEFAULT_SORT_COLUMN)
    }

    /// Клик по заголовку: повторный клик по той же колонке меняет направление
    pub fn set_sort(&mut self, column: &str) {
        if self.column.as_deref() == Some(column) {
            self.ascending = !self.ascending;
        }
        self.column = Some(column.to_string());
    }

    pub fn sort_rows(&self, rows: &mut [EntitlementRow]) {
        sort_list(rows, Some(self.effective_column()), self.ascending);
    }
}

/// Какая форма открыта; переиздание всегда несёт свою запись
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FormState {
    #[default]
    Hidden,
    Create,
    Reissue(EntitlementRecord),
}

impl FormState {
    pub fn is_hidden(&self) -> bool {
        matches!(self, FormState::Hidden)
    }

    pub fn kind(&self) -> Option<EntitlementFormKind> {
        match self {
            FormState::Hidden => None,
            FormState::Create => Some(EntitlementFormKind::Create),
            FormState::Reissue(_) => Some(EntitlementFormKind::Reissue),
        }
    }

    pub fn target(&self) -> Option<&EntitlementRecord> {
        match self {
            FormState::Reissue(record) => Some(record),
            _ => None,
        }
    }

    pub fn open_create(&mut self) {
        *self = FormState::Create;
    }

    pub fn open_reissue(&mut self, record: EntitlementRecord) {
        *self = FormState::Reissue(record);
    }

    pub fn close(&mut self) {
        *self = FormState::Hidden;
    }
}

/// Сортировка и форма живут в разных сигналах: смена сортировки не должна
/// пересоздавать открытую форму.
#[derive(Clone, Copy)]
pub struct EntitlementsViewState {
    pub sort: RwSignal<SortState>,
    pub form: RwSignal<FormState>,
}

pub fn create_state() -> EntitlementsViewState {
    EntitlementsViewState {
        sort: RwSignal::new(SortState::default()),
        form: RwSignal::new(FormState::default()),
    }
}
