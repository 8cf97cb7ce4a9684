//! The wallet injected by the browser as `window.ethereum`.

use async_trait::async_trait;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wave_portal_shared::{ProviderRpcError, WaveError};
use web_sys::js_sys;

use super::Eip1193Provider;

pub struct InjectedProvider {
    ethereum: js_sys::Object,
    request: js_sys::Function,
}

impl InjectedProvider {
    /// Look up `window.ethereum`. Returns `None` if there is no window, no
    /// injected object, or the object has no callable `request`.
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let ethereum = js_sys::Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return None;
        }

        let request = js_sys::Reflect::get(&ethereum, &JsValue::from_str("request"))
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()?;
        let ethereum = ethereum.dyn_into::<js_sys::Object>().ok()?;

        Some(Self { ethereum, request })
    }
}

#[async_trait(?Send)]
impl Eip1193Provider for InjectedProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WaveError> {
        let args = js_sys::Object::new();
        js_sys::Reflect::set(&args, &"method".into(), &JsValue::from_str(method))
            .map_err(js_error)?;
        let params = js_sys::JSON::parse(&serde_json::to_string(&params)?).map_err(js_error)?;
        js_sys::Reflect::set(&args, &"params".into(), &params).map_err(js_error)?;

        let promise = self
            .request
            .call1(&self.ethereum, &args)
            .map_err(rejection)?
            .dyn_into::<js_sys::Promise>()
            .map_err(|_| WaveError::Transport(format!("{method} did not return a promise")))?;
        let result = JsFuture::from(promise).await.map_err(rejection)?;

        if result.is_undefined() {
            return Ok(Value::Null);
        }
        let json: String = js_sys::JSON::stringify(&result).map_err(js_error)?.into();
        Ok(serde_json::from_str(&json)?)
    }
}

/// Convert a rejected `request` into an RPC error when it carries a numeric
/// `code`, otherwise into a transport error.
fn rejection(err: JsValue) -> WaveError {
    let code = js_sys::Reflect::get(&err, &"code".into())
        .ok()
        .and_then(|v| v.as_f64());
    let message = js_sys::Reflect::get(&err, &"message".into())
        .ok()
        .and_then(|v| v.as_string());

    match code {
        Some(code) => ProviderRpcError::new(code as i64, message.unwrap_or_default()).into(),
        None => js_error(err),
    }
}

fn js_error(err: JsValue) -> WaveError {
    WaveError::Transport(format!("{err:?}"))
}
