use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_SYSTEM};
use crate::system::entitlements::ui::page::EntitlementsPage;
use leptos::prelude::*;
use std::collections::HashMap;
use thaw::*;
use web_sys::window;

/// Пользователь из query string (`?user=...`)
fn user_from_query(search: &str) -> Option<String> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params
        .get("user")
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
}

fn user_query(user: &str) -> String {
    let query = serde_qs::to_string(&HashMap::from([("user", user)])).unwrap_or_default();
    format!("?{}", query)
}

/// Отражает выбранного пользователя в адресной строке без перезагрузки
fn sync_url(user: Option<&str>) {
    if let Some(w) = window() {
        let new_url = match user {
            Some(user) => user_query(user),
            None => w.location().pathname().unwrap_or_else(|_| "/".to_string()),
        };
        if let Ok(history) = w.history() {
            let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&new_url));
        }
    }
}

#[component]
fn UserLookup(on_select: Callback<String>) -> impl IntoView {
    let query = RwSignal::new(String::new());

    let submit = move || {
        let value = query.get_untracked().trim().to_string();
        if !value.is_empty() {
            on_select.run(value);
        }
    };

    view! {
        <PageFrame page_id="user_lookup--system" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Support tools"</h1>
                </div>
            </div>
            <div class="page__content">
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <div style="flex: 1; max-width: 320px;">
                        <Input value=query placeholder="Username or email" />
                    </div>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| submit()>
                        {icon("search")}
                        " Search"
                    </Button>
                </Flex>
            </div>
        </PageFrame>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let search = window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    let selected_user = RwSignal::new(user_from_query(&search));

    let on_select = Callback::new(move |user: String| {
        sync_url(Some(&user));
        selected_user.set(Some(user));
    });
    let on_back = Callback::new(move |_| {
        sync_url(None);
        selected_user.set(None);
    });

    view! {
        {move || match selected_user.get() {
            Some(user) => view! { <EntitlementsPage user=user on_back=on_back /> }.into_any(),
            None => view! { <UserLookup on_select=on_select /> }.into_any(),
        }}
    }
}
