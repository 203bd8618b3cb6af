use vitrina::{FetchError, FetchResponse, Fetcher};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// 基于 `window.fetch` 的获取器
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserFetcher;

fn network_error(value: JsValue) -> FetchError {
    FetchError::Network(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

impl Fetcher for BrowserFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, FetchError> {
        let window =
            web_sys::window().ok_or_else(|| FetchError::Network("没有 window 对象".to_string()))?;

        let value = JsFuture::from(window.fetch_with_str(path))
            .await
            .map_err(network_error)?;
        let response: Response = value.dyn_into().map_err(network_error)?;
        let status = response.status();

        let text = JsFuture::from(response.text().map_err(network_error)?)
            .await
            .map_err(network_error)?;

        Ok(FetchResponse {
            status,
            body: text.as_string().unwrap_or_default(),
        })
    }
}
