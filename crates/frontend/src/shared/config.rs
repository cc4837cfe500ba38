//! Runtime configuration of the support tool.
//!
//! Values are resolved once in `App` and provided through Leptos context.
//! Components that need a value receive it as a prop, so they do not read
//! global state themselves.

use crate::shared::api_utils::api_base;
use leptos::prelude::*;

/// Адрес страницы заказов e-commerce по умолчанию
pub const DEFAULT_ECOMMERCE_BASE_URL: &str = "http://localhost:18130/dashboard/orders/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    /// Префикс ссылки на заказ: `{ecommerce_base_url}{order_number}/`
    pub ecommerce_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::resolve(api_base(), option_env!("ECOMMERCE_BASE_URL"))
    }

    fn resolve(api_base_url: String, ecommerce_base_url: Option<&str>) -> Self {
        let ecommerce_base_url = ecommerce_base_url
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_ECOMMERCE_BASE_URL)
            .to_string();
        Self {
            api_base_url,
            ecommerce_base_url,
        }
    }
}

/// Конфигурация из context; вне `App` (например, в изолированном компоненте)
/// собирается заново.
pub fn use_app_config() -> AppConfig {
    use_context::<AppConfig>().unwrap_or_else(AppConfig::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uses_default_ecommerce_url() {
        let config = AppConfig::resolve("http://api".to_string(), None);
        assert_eq!(config.ecommerce_base_url, DEFAULT_ECOMMERCE_BASE_URL);

        let blank = AppConfig::resolve("http://api".to_string(), Some("  "));
        assert_eq!(blank.ecommerce_base_url, DEFAULT_ECOMMERCE_BASE_URL);
    }

    #[test]
    fn test_resolve_keeps_explicit_ecommerce_url() {
        let config = AppConfig::resolve(
            "http://api".to_string(),
            Some("https://ecommerce.example.com/orders/"),
        );
        assert_eq!(config.api_base_url, "http://api");
        assert_eq!(config.ecommerce_base_url, "https://ecommerce.example.com/orders/");
    }
}
