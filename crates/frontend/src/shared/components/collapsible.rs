use crate::shared::icons::icon;
use leptos::prelude::*;

/// Сворачиваемая секция с заголовком
#[component]
pub fn Collapsible(
    /// Заголовок; может меняться вместе с данными
    #[prop(into)]
    title: Signal<String>,
    /// Открыта ли секция при первом показе
    #[prop(optional, default = true)]
    default_open: bool,
    children: Children,
) -> impl IntoView {
    let open = RwSignal::new(default_open);

    view! {
        <div class="collapsible">
            <div
                class="collapsible__header"
                style="display: flex; align-items: center; gap: 6px; cursor: pointer; padding: 8px 0; font-weight: 600;"
                on:click=move |_| open.update(|v| *v = !*v)
            >
                {move || if open.get() { icon("chevron-down") } else { icon("chevron-right") }}
                <span>{move || title.get()}</span>
            </div>
            <div class="collapsible__body" style:display=move || if open.get() { "block" } else { "none" }>
                {children()}
            </div>
        </div>
    }
}
