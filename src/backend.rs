//! reqwestによる推論API呼び出し

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Response;
use tumor_ai_common::{
    check_status, endpoint_url, parse_classification, AnnotatedImage, Backend, Classification,
    Error, StagedImage, Variant, HEALTH_ENDPOINT, UPLOAD_FIELD,
};

use crate::error::Result;

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        endpoint_url(&self.base_url, path)
    }

    /// 画像を `file` フィールド1つのmultipartで送信
    async fn post_image(&self, path: &str, image: &StagedImage) -> tumor_ai_common::Result<Response> {
        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.name().to_string())
            .mime_str(image.mime())
            .map_err(network)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        tracing::debug!("POST {} ({} bytes)", path, image.bytes().len());
        let response = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .map_err(network)?;
        check_status(response.status().as_u16())?;
        Ok(response)
    }
}

fn network(err: reqwest::Error) -> Error {
    Error::Network(err.to_string())
}

fn body(err: reqwest::Error) -> Error {
    Error::Body(err.to_string())
}

impl Backend for HttpBackend {
    async fn health(&self) -> tumor_ai_common::Result<()> {
        let response = self
            .client
            .get(self.url(HEALTH_ENDPOINT))
            .send()
            .await
            .map_err(network)?;
        check_status(response.status().as_u16())
    }

    async fn classify(&self, image: &StagedImage) -> tumor_ai_common::Result<Classification> {
        let response = self.post_image(Variant::Classify.endpoint(), image).await?;
        let bytes = response.bytes().await.map_err(body)?;
        parse_classification(&bytes)
    }

    async fn annotate(
        &self,
        variant: Variant,
        image: &StagedImage,
    ) -> tumor_ai_common::Result<AnnotatedImage> {
        let response = self.post_image(variant.endpoint(), image).await?;
        let mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await.map_err(body)?;
        Ok(AnnotatedImage::new(bytes.to_vec(), mime.as_deref()))
    }
}
