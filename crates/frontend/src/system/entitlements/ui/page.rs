use contracts::system::entitlements::EntitlementList;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::config::use_app_config;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::system::entitlements::api;
use crate::system::entitlements::ui::list::Entitlements;

/// Страница прав пользователя: загружает список и перезагружает его после изменений
#[component]
pub fn EntitlementsPage(
    #[prop(into)] user: String,
    /// Возврат к выбору пользователя
    on_back: Callback<()>,
) -> impl IntoView {
    let config = use_app_config();
    let data: RwSignal<Option<EntitlementList>> = RwSignal::new(None);
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let user_value = StoredValue::new(user.clone());
    let api_base = StoredValue::new(config.api_base_url.clone());

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        let user = user_value.get_value();
        let base = api_base.get_value();
        spawn_local(async move {
            match api::fetch_entitlements(&base, &user).await {
                Ok(list) => {
                    log::debug!("Loaded {} entitlements for {}", list.results.len(), user);
                    data.set(Some(list));
                }
                Err(e) => {
                    log::error!("Failed to load entitlements for {}: {}", user, e);
                    set_error.set(Some(format!("Failed to load entitlements: {}", e)));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        load_data();
    });

    let change_handler = Callback::new(move |_| load_data());

    view! {
        <PageFrame page_id="entitlements--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{format!("User: {}", user)}</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_back.run(())
                    >
                        {icon("search")}
                        " Another user"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <Entitlements
                    data=data
                    change_handler=change_handler
                    user=user_value.get_value()
                    ecommerce_base_url=config.ecommerce_base_url.clone()
                />
            </div>
        </PageFrame>
    }
}
