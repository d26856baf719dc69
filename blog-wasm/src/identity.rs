//! Провайдер личности: страница входа hosted UI с implicit grant,
//! `id_token` приходит во фрагменте URL.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Identity {
    pub(crate) email: String,
}

/// Внешняя возможность, которую получает оболочка приложения.
pub(crate) trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<Identity>;
    fn sign_out(&self);
    /// Ссылка на страницу входа, если провайдер настроен.
    fn sign_in_url(&self) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HostedUiConfig {
    region: String,
    user_pool_id: String,
    client_id: String,
    domain: Option<String>,
}

impl HostedUiConfig {
    /// Значения задаются при сборке; проверяется только их наличие.
    pub(crate) fn from_build_env() -> Option<Self> {
        Self::from_parts(
            option_env!("WASM_AUTH_REGION"),
            option_env!("WASM_AUTH_USER_POOL_ID"),
            option_env!("WASM_AUTH_CLIENT_ID"),
            option_env!("WASM_AUTH_DOMAIN"),
        )
    }

    fn from_parts(
        region: Option<&str>,
        user_pool_id: Option<&str>,
        client_id: Option<&str>,
        domain: Option<&str>,
    ) -> Option<Self> {
        let present = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        Some(Self {
            region: present(region)?,
            user_pool_id: present(user_pool_id)?,
            client_id: present(client_id)?,
            domain: present(domain),
        })
    }

    fn issuer(&self) -> String {
        format!(
            "https://cognito-idp.{}.amazonaws.com/{}",
            self.region, self.user_pool_id
        )
    }

    fn base_url(&self) -> Option<String> {
        let domain = self.domain.as_deref()?.trim_end_matches('/');
        if domain.starts_with("http://") || domain.starts_with("https://") {
            return Some(domain.to_string());
        }
        Some(format!("https://{domain}"))
    }

    /// `redirect_uri` должен быть уже закодирован для query-строки.
    pub(crate) fn sign_in_url(&self, redirect_uri: &str) -> Option<String> {
        Some(format!(
            "{}/login?client_id={}&response_type=token&scope=openid+email+profile&redirect_uri={redirect_uri}",
            self.base_url()?,
            self.client_id
        ))
    }

    pub(crate) fn sign_out_url(&self, redirect_uri: &str) -> Option<String> {
        Some(format!(
            "{}/logout?client_id={}&logout_uri={redirect_uri}",
            self.base_url()?,
            self.client_id
        ))
    }
}

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    email: Option<String>,
    exp: i64,
    iss: Option<String>,
    aud: Option<String>,
}

pub(crate) fn id_token_from_fragment(fragment: &str) -> Option<String> {
    fragment
        .trim_start_matches('#')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "id_token")
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// Payload JWT в стандартном base64 с паддингом, как его ждёт `atob`.
pub(crate) fn payload_segment(token: &str) -> Option<String> {
    let mut parts = token.split('.');
    let (_, payload, _) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || payload.is_empty() {
        return None;
    }

    let mut segment: String = payload
        .chars()
        .map(|ch| match ch {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    while segment.len() % 4 != 0 {
        segment.push('=');
    }
    Some(segment)
}

/// Истёкший токен или токен чужого пула/клиента даёт `None`.
pub(crate) fn identity_from_payload(
    payload_json: &str,
    config: Option<&HostedUiConfig>,
    now_secs: i64,
) -> Option<Identity> {
    let claims: IdTokenClaims = serde_json::from_str(payload_json).ok()?;
    if claims.exp <= now_secs {
        return None;
    }

    if let Some(config) = config {
        if claims.iss.as_deref() != Some(config.issuer().as_str())
            || claims.aud.as_deref() != Some(config.client_id.as_str())
        {
            return None;
        }
    }

    let email = claims.email.filter(|email| !email.is_empty())?;
    Some(Identity { email })
}

#[cfg(target_arch = "wasm32")]
pub(crate) use browser::HostedUiIdentity;

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::JsValue;

    use super::{
        HostedUiConfig, Identity, IdentityProvider, id_token_from_fragment, identity_from_payload,
        payload_segment,
    };
    use crate::storage;

    pub(crate) struct HostedUiIdentity {
        config: Option<HostedUiConfig>,
    }

    impl HostedUiIdentity {
        pub(crate) fn from_build_env() -> Self {
            Self {
                config: HostedUiConfig::from_build_env(),
            }
        }

        /// Забирает `id_token` из фрагмента после редиректа и убирает его из адреса.
        pub(crate) fn complete_sign_in(&self) -> Result<(), String> {
            let window = web_sys::window().ok_or_else(|| "window is not available".to_string())?;
            let location = window.location();
            let hash = location
                .hash()
                .map_err(|_| "failed to read location hash".to_string())?;

            let Some(token) = id_token_from_fragment(&hash) else {
                return Ok(());
            };
            storage::save_id_token(&token)?;

            let path = location
                .pathname()
                .map_err(|_| "failed to read location path".to_string())?;
            window
                .history()
                .map_err(|_| "history is not available".to_string())?
                .replace_state_with_url(&JsValue::NULL, "", Some(&path))
                .map_err(|_| "failed to clear location hash".to_string())
        }
    }

    fn redirect_uri() -> Option<String> {
        let location = web_sys::window()?.location();
        let origin = location.origin().ok()?;
        let path = location.pathname().ok()?;
        Some(js_sys::encode_uri_component(&format!("{origin}{path}")).into())
    }

    fn now_secs() -> i64 {
        (js_sys::Date::now() / 1000.0) as i64
    }

    impl IdentityProvider for HostedUiIdentity {
        fn current_user(&self) -> Option<Identity> {
            let token = storage::load_id_token()?;
            let payload = web_sys::window()?.atob(&payload_segment(&token)?).ok()?;
            identity_from_payload(&payload, self.config.as_ref(), now_secs())
        }

        fn sign_out(&self) {
            if let Err(err) = storage::clear_id_token() {
                leptos::logging::warn!("{err}");
            }

            let logout = self
                .config
                .as_ref()
                .zip(redirect_uri())
                .and_then(|(config, redirect)| config.sign_out_url(&redirect));
            if let (Some(url), Some(window)) = (logout, web_sys::window()) {
                if window.location().set_href(&url).is_err() {
                    leptos::logging::warn!("failed to redirect to hosted logout");
                }
            }
        }

        fn sign_in_url(&self) -> Option<String> {
            self.config.as_ref()?.sign_in_url(&redirect_uri()?)
        }
    }
}
