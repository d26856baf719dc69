#[cfg(target_arch = "wasm32")]
const ID_TOKEN_KEY: &str = "blog_id_token";

fn parse_token(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    let window = web_sys::window().ok_or_else(|| "window is not available".to_string())?;
    window
        .local_storage()
        .map_err(|_| "failed to access localStorage".to_string())?
        .ok_or_else(|| "localStorage is not available".to_string())
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn load_id_token() -> Option<String> {
    let storage = local_storage().ok()?;
    let raw = storage.get_item(ID_TOKEN_KEY).ok()??;
    parse_token(&raw)
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn save_id_token(token: &str) -> Result<(), String> {
    let token = parse_token(token).ok_or_else(|| "id_token is empty".to_string())?;
    local_storage()?
        .set_item(ID_TOKEN_KEY, &token)
        .map_err(|_| "failed to save id_token".to_string())
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn clear_id_token() -> Result<(), String> {
    local_storage()?
        .remove_item(ID_TOKEN_KEY)
        .map_err(|_| "failed to clear id_token".to_string())
}
