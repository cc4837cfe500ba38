mod state;

use contracts::system::entitlements::EntitlementList;
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::collapsible::Collapsible;
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::icons::icon;
use crate::system::entitlements::model::{project_rows, EntitlementRow, COLUMNS};
use crate::system::entitlements::ui::form::{EntitlementForm, EntitlementSubmission};
pub use state::{create_state, EntitlementsViewState, FormState, SortState};

const TABLE_ID: &str = "sys-entitlements-table";

/// Обработчик заявки по умолчанию: только журналирует её
fn log_submission(submission: EntitlementSubmission) {
    match serde_json::to_string(&submission) {
        Ok(json) => log::info!("Entitlement submission: {}", json),
        Err(_) => log::info!("Entitlement submission: {:?}", submission),
    }
}

/// Таблица прав пользователя с сортировкой и формой создания/переиздания
#[component]
pub fn Entitlements(
    /// Ответ API; `None` — данных нет, таблица пуста
    #[prop(into)]
    data: Signal<Option<EntitlementList>>,
    /// Вызывается формой после успешного сохранения
    change_handler: Callback<()>,
    #[prop(into)] user: String,
    /// Префикс ссылок на заказы
    #[prop(into)]
    ecommerce_base_url: String,
    #[prop(optional)] submit_handler: Option<Callback<EntitlementSubmission>>,
) -> impl IntoView {
    let state = create_state();
    let submit_handler = submit_handler.unwrap_or_else(|| Callback::new(log_submission));
    let user = StoredValue::new(user);

    let rows = Memo::new(move |_| {
        data.with(|d| project_rows(d.as_ref(), &ecommerce_base_url))
    });

    let sorted_rows = move || {
        let mut items: Vec<EntitlementRow> = rows.get();
        state.sort.with(|s| s.sort_rows(&mut items));
        items
    };

    let current_sort_field =
        Signal::derive(move || state.sort.with(|s| s.effective_column().to_string()));
    let sort_ascending = Signal::derive(move || state.sort.with(|s| s.ascending));
    let on_sort = Callback::new(move |field: String| {
        log::debug!("Entitlements: sort by {}", field);
        state.sort.update(|s| s.set_sort(&field));
    });

    let close_handler = Callback::new(move |_| {
        log::debug!("Entitlements: form closed");
        state.form.update(|f| f.close());
    });

    let title = Signal::derive(move || format!("Entitlements ({})", rows.with(|r| r.len())));

    view! {
        <section class="entitlements" style="margin-bottom: 16px;">
            <div class="page__header">
                <div class="page__header-left">
                    <h3 class="page__title">"Entitlements"</h3>
                </div>
                <div class="page__header-right">
                    {move || state.form.with(|f| f.is_hidden()).then(|| view! {
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| {
                                log::debug!("Entitlements: open create form");
                                state.form.update(|f| f.open_create());
                            }
                        >
                            {icon("plus")}
                            " Create New Entitlement"
                        </Button>
                    })}
                </div>
            </div>

            {move || {
                let form = state.form.get();
                form.kind().map(|kind| view! {
                    <EntitlementForm
                        user=user.get_value()
                        entitlement=form.target().cloned()
                        form_kind=kind
                        change_handler=change_handler
                        submit_handler=submit_handler
                        close_handler=close_handler
                    />
                })
            }}

            <Collapsible title=title>
                <div class="table-wrapper">
                    <Table attr:id=TABLE_ID attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {COLUMNS
                                    .iter()
                                    .map(|(field, label)| view! {
                                        <SortableHeaderCell
                                            label=*label
                                            sort_field=*field
                                            current_sort_field=current_sort_field
                                            sort_ascending=sort_ascending
                                            on_sort=on_sort
                                            min_width=110.0
                                        />
                                    })
                                    .collect_view()}
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=sorted_rows
                                key=|row| row.key.clone()
                                children=move |row: EntitlementRow| {
                                    let record = row.source.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{row.user}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{row.course_uuid}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{row.mode}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{row.enrollment}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{row.expired_at}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{row.created}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{row.modified}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a href=row.order_url>{row.order_number}</a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Secondary
                                                    disabled=!row.reissue_enabled
                                                    on_click=move |_| {
                                                        log::debug!("Entitlements: reissue {:?}", record.uuid);
                                                        state.form.update(|f| f.open_reissue(record.clone()));
                                                    }
                                                >
                                                    "Reissue"
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </Collapsible>
        </section>
    }
}
