use contracts::system::entitlements::{
    CreateEntitlementDto, EntitlementList, EntitlementRecord, ReissueEntitlementDto,
};
use gloo_net::http::Request;
use serde::Serialize;
use web_sys::RequestCredentials;

use crate::shared::api_utils::api_url;

const ENTITLEMENTS_PATH: &str = "/api/entitlements/v1/entitlements/";

#[derive(Serialize)]
struct EntitlementsQuery<'a> {
    user: &'a str,
}

/// URL списка прав пользователя
pub fn entitlements_list_url(base: &str, user: &str) -> String {
    let query = serde_qs::to_string(&EntitlementsQuery { user }).unwrap_or_default();
    format!("{}?{}", api_url(base, ENTITLEMENTS_PATH), query)
}

/// URL одного права
pub fn entitlement_url(base: &str, uuid: &str) -> String {
    format!(
        "{}{}/",
        api_url(base, ENTITLEMENTS_PATH),
        urlencoding::encode(uuid)
    )
}

/// Fetch entitlements of a user
pub async fn fetch_entitlements(base: &str, user: &str) -> Result<EntitlementList, String> {
    let response = Request::get(&entitlements_list_url(base, user))
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch entitlements: {}", response.status()));
    }

    response
        .json::<EntitlementList>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Create new entitlement
pub async fn create_entitlement(
    base: &str,
    dto: &CreateEntitlementDto,
) -> Result<EntitlementRecord, String> {
    let response = Request::post(&api_url(base, ENTITLEMENTS_PATH))
        .credentials(RequestCredentials::Include)
        .json(dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to create entitlement: {}", response.status()));
    }

    response
        .json::<EntitlementRecord>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Reissue entitlement: detach it from the consumed course run
pub async fn reissue_entitlement(
    base: &str,
    dto: &ReissueEntitlementDto,
) -> Result<EntitlementRecord, String> {
    let response = Request::patch(&entitlement_url(base, &dto.entitlement_uuid))
        .credentials(RequestCredentials::Include)
        .json(dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to reissue entitlement: {}", response.status()));
    }

    response
        .json::<EntitlementRecord>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::AppConfig;

    #[test]
    fn test_list_url() {
        assert_eq!(
            entitlements_list_url("http://localhost:3000", "edx"),
            "http://localhost:3000/api/entitlements/v1/entitlements/?user=edx"
        );
    }

    #[test]
    fn test_urls_follow_configured_base() {
        let config = AppConfig {
            api_base_url: "https://support.example.com".to_string(),
            ecommerce_base_url: String::new(),
        };
        assert_eq!(
            entitlements_list_url(&config.api_base_url, "edx"),
            "https://support.example.com/api/entitlements/v1/entitlements/?user=edx"
        );
        assert_eq!(
            entitlement_url(&config.api_base_url, "e-1"),
            "https://support.example.com/api/entitlements/v1/entitlements/e-1/"
        );
    }

    #[test]
    fn test_entitlement_url_encodes_uuid() {
        assert_eq!(
            entitlement_url("http://localhost:3000/", "a/b"),
            "http://localhost:3000/api/entitlements/v1/entitlements/a%2Fb/"
        );
    }
}
