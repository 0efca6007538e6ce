//! バイト列とBlob/オブジェクトURLの変換

use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, Url};

pub fn blob_from_bytes(bytes: &[u8], mime: &str) -> Result<Blob, JsValue> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let mut props = BlobPropertyBag::new();
    props.type_(mime);
    Blob::new_with_u8_array_sequence_and_options(&parts, &props)
}

/// 表示用のローカルURL（不要になったら `revoke` する）
pub fn object_url(bytes: &[u8], mime: &str) -> Result<String, JsValue> {
    let blob = blob_from_bytes(bytes, mime)?;
    Url::create_object_url_with_blob(&blob)
}

pub fn revoke(url: &str) {
    if let Err(e) = Url::revoke_object_url(url) {
        log::warn!("failed to revoke {}: {:?}", url, e);
    }
}
