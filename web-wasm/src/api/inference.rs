//! fetchによる推論API呼び出し
//!
//! 同一オリジンの固定パス（/api, /predict_vgg, /detect_yolo, /segment_sam）へ送る。
//! タイムアウトは設けていない。

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, Response};
use tumor_ai_common::{
    check_status, endpoint_url, parse_classification, AnnotatedImage, Backend, Classification,
    Error, Result, StagedImage, Variant, HEALTH_ENDPOINT, UPLOAD_FIELD,
};

use crate::blob::blob_from_bytes;

pub struct FetchBackend {
    base_url: String,
}

impl FetchBackend {
    /// ページと同じオリジンのAPIを使う
    pub fn same_origin() -> Self {
        Self {
            base_url: String::new(),
        }
    }

    async fn fetch(&self, path: &str, form: Option<&FormData>) -> Result<Response> {
        let mut opts = RequestInit::new();
        match form {
            Some(form) => {
                opts.method("POST");
                opts.body(Some(form.as_ref()));
            }
            None => {
                opts.method("GET");
            }
        }

        let url = endpoint_url(&self.base_url, path);
        let request = Request::new_with_str_and_init(&url, &opts).map_err(network)?;
        let window = web_sys::window().ok_or_else(|| Error::Network("no window".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network)?;
        let resp: Response = resp_value.dyn_into().map_err(network)?;

        check_status(resp.status())?;
        Ok(resp)
    }

    async fn post_image(&self, path: &str, image: &StagedImage) -> Result<Response> {
        let form = build_form(image).map_err(network)?;
        self.fetch(path, Some(&form)).await
    }
}

/// 画像を `file` フィールド1つのFormDataにする
pub fn build_form(image: &StagedImage) -> std::result::Result<FormData, JsValue> {
    let blob = blob_from_bytes(image.bytes(), image.mime())?;
    let form = FormData::new()?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, image.name())?;
    Ok(form)
}

async fn body_bytes(resp: &Response) -> Result<Vec<u8>> {
    let promise = resp.array_buffer().map_err(body)?;
    let buffer = JsFuture::from(promise).await.map_err(body)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

fn network(err: JsValue) -> Error {
    Error::Network(format!("{:?}", err))
}

fn body(err: JsValue) -> Error {
    Error::Body(format!("{:?}", err))
}

impl Backend for FetchBackend {
    async fn health(&self) -> Result<()> {
        self.fetch(HEALTH_ENDPOINT, None).await.map(|_| ())
    }

    async fn classify(&self, image: &StagedImage) -> Result<Classification> {
        let resp = self.post_image(Variant::Classify.endpoint(), image).await?;
        let bytes = body_bytes(&resp).await?;
        parse_classification(&bytes)
    }

    async fn annotate(&self, variant: Variant, image: &StagedImage) -> Result<AnnotatedImage> {
        let resp = self.post_image(variant.endpoint(), image).await?;
        let mime = resp.headers().get("content-type").ok().flatten();
        let bytes = body_bytes(&resp).await?;
        Ok(AnnotatedImage::new(bytes, mime.as_deref()))
    }
}
