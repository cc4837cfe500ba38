//! Компонент сортируемой ячейки заголовка таблицы
//!
//! # Пример
//!
//! ```ignore
//! <SortableHeaderCell
//!     label="Created"
//!     sort_field="created"
//!     current_sort_field=Signal::derive(move || sort.with(|s| s.effective_column().to_string()))
//!     sort_ascending=Signal::derive(move || sort.with(|s| s.ascending))
//!     on_sort=Callback::new(move |field| sort.update(|s| s.set_sort(&field)))
//! />
//! ```

use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use leptos::prelude::*;
use thaw::*;

/// Ячейка заголовка с индикатором сортировки (▲▼); клик передаёт поле в `on_sort`
#[component]
pub fn SortableHeaderCell(
    /// Текст заголовка
    #[prop(into)]
    label: String,

    /// Поле для сортировки
    #[prop(into)]
    sort_field: String,

    /// Текущее поле сортировки из state
    #[prop(into)]
    current_sort_field: Signal<String>,

    /// Направление сортировки из state
    #[prop(into)]
    sort_ascending: Signal<bool>,

    /// Callback при клике на заголовок
    on_sort: Callback<String>,

    /// Минимальная ширина колонки
    #[prop(optional, default = 100.0)]
    min_width: f64,
) -> impl IntoView {
    let sort_field_for_click = sort_field.clone();
    let sort_field_for_indicator = sort_field.clone();
    let sort_field_for_class = sort_field;

    let handle_click = move |_| {
        on_sort.run(sort_field_for_click.clone());
    };

    view! {
        <TableHeaderCell resizable=false min_width=min_width>
            <div
                class="table__sortable-header"
                style="cursor: pointer; padding-right: 12px;"
                on:click=handle_click
            >
                {label}
                <span class=move || {
                    get_sort_class(&current_sort_field.get(), &sort_field_for_class)
                }>
                    {move || {
                        get_sort_indicator(
                            &current_sort_field.get(),
                            &sort_field_for_indicator,
                            sort_ascending.get()
                        )
                    }}
                </span>
            </div>
        </TableHeaderCell>
    }
}
