/// Bindings to the extension APIs exposed by bridge.js
use crate::error::{Result, TrackerError};
use crate::storage::KeyValueStorage;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn writeClipboard(text: &str) -> std::result::Result<(), JsValue>;

    fn openTab(url: &str);
}

/// chrome.storage.local, rejected promises (runtime.lastError) included
pub struct ChromeStorage;

impl KeyValueStorage for ChromeStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let value_js = getStorage(key)
            .await
            .map_err(|e| TrackerError::StorageUnavailable(format!("{:?}", e)))?;

        if value_js.is_null() || value_js.is_undefined() {
            return Ok(None);
        }

        serde_wasm_bindgen::from_value(value_js)
            .map(Some)
            .map_err(|e| TrackerError::StorageUnavailable(format!("Failed to parse storage: {:?}", e)))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        // Plain objects and arrays, not JS Maps
        let value_js = value
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| TrackerError::StorageUnavailable(format!("Failed to serialize storage: {:?}", e)))?;

        setStorage(key, value_js)
            .await
            .map_err(|e| TrackerError::StorageUnavailable(format!("{:?}", e)))
    }
}

pub async fn write_clipboard(text: &str) -> Result<()> {
    writeClipboard(text)
        .await
        .map_err(|e| TrackerError::ClipboardWriteFailed(format!("{:?}", e)))
}

/// Open a URL in a new foreground tab
pub fn open_tab(url: &str) {
    openTab(url);
}

/// Today's UTC calendar date, the date stamped on new records
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
