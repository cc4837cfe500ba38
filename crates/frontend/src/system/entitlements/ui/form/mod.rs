pub mod model;

use contracts::system::entitlements::{EntitlementMode, EntitlementRecord};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::config::use_app_config;
use crate::shared::icons::icon;
use crate::system::entitlements::api;
pub use model::{build_submission, EntitlementFormInput, EntitlementFormKind, EntitlementSubmission};

/// Форма создания/переиздания права.
///
/// После проверки отдаёт заявку в `submit_handler`, выполняет запрос и при
/// успехе вызывает `change_handler` и `close_handler`.
#[component]
pub fn EntitlementForm(
    #[prop(into)] user: String,
    entitlement: Option<EntitlementRecord>,
    form_kind: EntitlementFormKind,
    change_handler: Callback<()>,
    submit_handler: Callback<EntitlementSubmission>,
    close_handler: Callback<()>,
) -> impl IntoView {
    let course_uuid = RwSignal::new(String::new());
    let mode = RwSignal::new(EntitlementMode::default().code().to_string());
    let comments = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let api_base = StoredValue::new(use_app_config().api_base_url);
    let target = StoredValue::new(entitlement);
    let user = StoredValue::new(user);

    let on_submit = move |_| {
        let input = EntitlementFormInput {
            course_uuid: course_uuid.get_untracked(),
            mode: mode.get_untracked(),
            comments: comments.get_untracked(),
        };
        let submission = target.with_value(|record| {
            user.with_value(|user| build_submission(form_kind, user, record.as_ref(), &input))
        });
        let submission = match submission {
            Ok(s) => s,
            Err(e) => {
                set_error.set(Some(e.message));
                return;
            }
        };

        set_error.set(None);
        set_saving.set(true);
        submit_handler.run(submission.clone());

        let base = api_base.get_value();
        spawn_local(async move {
            let result = match submission {
                EntitlementSubmission::Create(dto) => api::create_entitlement(&base, &dto).await,
                EntitlementSubmission::Reissue(dto) => api::reissue_entitlement(&base, &dto).await,
            };
            match result {
                Ok(saved) => {
                    log::info!("Entitlement saved: {:?}", saved.uuid);
                    change_handler.run(());
                    close_handler.run(());
                }
                Err(e) => {
                    log::error!("Entitlement request failed: {}", e);
                    set_error.set(Some(e));
                    set_saving.set(false);
                }
            }
        });
    };

    let reissue_summary = move || {
        target.with_value(|record| {
            record.as_ref().map(|r| {
                view! {
                    <div class="form__group">
                        <div>"Course UUID: " <strong>{r.course_uuid.clone()}</strong></div>
                        <div>"Mode: " <strong>{r.mode.clone()}</strong></div>
                        <div>"Order: " <strong>{r.order_number.clone()}</strong></div>
                        <div>"Course run: " <strong>{r.enrollment_course_run.clone().unwrap_or_default()}</strong></div>
                    </div>
                }
            })
        })
    };

    view! {
        <div class="form-panel" style="border: 1px solid var(--color-border); border-radius: 6px; padding: 12px; margin-bottom: 12px;">
            <div class="form-panel__header" style="display: flex; justify-content: space-between; align-items: center;">
                <h4 style="margin: 0;">{form_kind.title()}</h4>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| close_handler.run(())
                    attr:title="Close"
                >
                    {icon("x")}
                </Button>
            </div>

            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            {match form_kind {
                EntitlementFormKind::Create => view! {
                    <div class="form__group">
                        <Label>"Course UUID"</Label>
                        <Input
                            value=course_uuid
                            placeholder="00000000-0000-0000-0000-000000000000"
                            disabled=Signal::derive(move || saving.get())
                        />
                    </div>
                    <div class="form__group">
                        <Label>"Mode"</Label>
                        <Select value=mode>
                            {EntitlementMode::ALL
                                .iter()
                                .map(|m| view! { <option value=m.code()>{m.code()}</option> })
                                .collect_view()}
                        </Select>
                    </div>
                }.into_any(),
                EntitlementFormKind::Reissue => reissue_summary().into_any(),
            }}

            <div class="form__group">
                <Label>"Comments"</Label>
                <Textarea value=comments placeholder="Reason for the change" attr:rows=3 />
            </div>

            <div class="form-actions" style="display: flex; gap: 8px; justify-content: flex-end;">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| close_handler.run(())
                    disabled=Signal::derive(move || saving.get())
                >
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=on_submit
                    disabled=Signal::derive(move || saving.get())
                >
                    {move || if saving.get() { "Saving..." } else { form_kind.submit_label() }}
                </Button>
            </div>
        </div>
    }
}
