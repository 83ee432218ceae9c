//! Google 登录弹窗
//!
//! 通过页面中加载的 Firebase compat SDK 打开 OAuth 弹窗，
//! 取得 ID token 后交给后端 `api/google-login` 交换会话。

use chicham::config::IdentityConfig;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen(inline_js = r#"
export function google_id_token(apiKey, authDomain, projectId) {
    const sdk = globalThis.firebase;
    if (!sdk) {
        return Promise.reject(new Error("firebase sdk not loaded"));
    }
    const app = sdk.apps.length
        ? sdk.app()
        : sdk.initializeApp({ apiKey, authDomain, projectId });
    const provider = new sdk.auth.GoogleAuthProvider();
    return app.auth().signInWithPopup(provider).then((cred) => cred.user.getIdToken());
}
"#)]
extern "C" {
    fn google_id_token(api_key: &str, auth_domain: &str, project_id: &str) -> js_sys::Promise;
}

/// 打开弹窗并返回 ID token；用户关闭弹窗或 SDK 缺失时返回 `Err`
pub async fn sign_in_with_google(config: &IdentityConfig) -> Result<String, String> {
    let promise = google_id_token(&config.api_key, &config.auth_domain, &config.project_id);
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| format!("{e:?}"))?;
    value
        .as_string()
        .ok_or_else(|| "identity provider returned no token".to_string())
}
