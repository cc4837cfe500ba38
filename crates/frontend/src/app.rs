use crate::routes::routes::AppRoutes;
use crate::shared::config::AppConfig;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Конфигурация читается один раз и раздаётся через context
    let config = AppConfig::from_env();
    log::debug!(
        "AppConfig: api_base_url={}, ecommerce_base_url={}",
        config.api_base_url,
        config.ecommerce_base_url
    );
    provide_context(config);

    view! {
        <AppRoutes />
    }
}
