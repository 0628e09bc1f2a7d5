//! Mail service transport.

use folio_engine::{EmailRequest, FolioError, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// POST the request body and return the response text. Non-2xx responses
/// still return their body; the form decides what counts as success.
pub async fn send(endpoint: &str, request: &EmailRequest) -> Result<String> {
    let body = request.to_json()?;
    post_json(endpoint, &body)
        .await
        .map_err(|err| FolioError::Submission(format!("{err:?}")))
}

async fn post_json(endpoint: &str, body: &str) -> std::result::Result<String, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(endpoint, &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;
    let text = JsFuture::from(response.text()?).await?;
    Ok(text.as_string().unwrap_or_default())
}
