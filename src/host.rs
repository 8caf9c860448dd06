//! Bindings to the Tauri command bridge exposed on `window.__TAURI__`.

use input_portal_ui::{Configuration, HostError, SettingsHost, Timer};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "tauri"], js_name = invoke)]
    async fn tauri_invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SetConfigArgs<'a> {
    new_config: &'a Configuration,
}

#[derive(Serialize)]
struct OpenCreditArgs<'a> {
    site: &'a str,
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

async fn invoke_raw(cmd: &str, args: JsValue) -> Result<JsValue, HostError> {
    tauri_invoke(cmd, args).await.map_err(|err| HostError::Call {
        command: cmd.to_string(),
        message: describe(&err),
    })
}

fn decode<R: DeserializeOwned>(cmd: &str, value: JsValue) -> Result<R, HostError> {
    serde_wasm_bindgen::from_value(value).map_err(|err| HostError::Decode {
        command: cmd.to_string(),
        message: err.to_string(),
    })
}

/// Call a command that takes no arguments.
async fn invoke<R: DeserializeOwned>(cmd: &str) -> Result<R, HostError> {
    let value = invoke_raw(cmd, js_sys::Object::new().into()).await?;
    decode(cmd, value)
}

async fn invoke_with<A: Serialize, R: DeserializeOwned>(cmd: &str, args: &A) -> Result<R, HostError> {
    let args = serde_wasm_bindgen::to_value(args).map_err(|err| HostError::Encode(err.to_string()))?;
    let value = invoke_raw(cmd, args).await?;
    decode(cmd, value)
}

/// The Tauri backend of the desktop app.
#[derive(Clone, Copy, Default)]
pub struct TauriHost;

impl SettingsHost for TauriHost {
    async fn load_config(&self) -> Result<Configuration, HostError> {
        invoke("get_config").await
    }

    async fn save_config(&self, candidate: &Configuration) -> Result<bool, HostError> {
        invoke_with(
            "set_config",
            &SetConfigArgs {
                new_config: candidate,
            },
        )
        .await
    }

    async fn load_port(&self) -> Result<Option<u16>, HostError> {
        invoke("get_port").await
    }

    async fn load_version(&self) -> Result<String, HostError> {
        invoke("get_version").await
    }

    async fn load_presets(&self) -> Result<Vec<String>, HostError> {
        invoke("get_presets").await
    }

    async fn close_window(&self) {
        if let Err(err) = invoke::<()>("close_window").await {
            warn!("{}", err);
        }
    }

    async fn open_external(&self, site: &str) {
        if let Err(err) = invoke_with::<_, ()>("open_credit", &OpenCreditArgs { site }).await {
            warn!("{}", err);
        }
    }
}

/// Browser timers.
#[derive(Clone, Copy, Default)]
pub struct GlooTimer;

impl Timer for GlooTimer {
    async fn sleep(&self, ms: u32) {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
}
