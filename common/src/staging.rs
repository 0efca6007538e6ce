//! 画像ステージング
//!
//! 選択されたファイルを検証し、推論に使う1枚の画像として保持する。

use std::io::Cursor;
use std::path::Path;

use crate::error::{Error, Result};

/// 受け付けるMIMEタイプ
pub const ALLOWED_MIME_TYPES: [&str; 5] = [
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/bmp",
    "image/tiff",
];

pub const INVALID_TYPE_MESSAGE: &str =
    "Please upload a valid image file (PNG, JPG, JPEG, BMP, TIFF)";

pub const NO_IMAGE_MESSAGE: &str = "Please upload an image first";

/// ファイル未選択時の表示
pub const NO_FILE_LABEL: &str = "No file selected";

pub fn is_allowed_mime(mime: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&mime)
}

/// 拡張子からMIMEタイプを推定（CLI用。ブラウザはFile.typeを使う）
///
/// APIが受け付ける拡張子だけを扱う（`.tif` は不可）。
pub fn mime_from_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "bmp" => Some("image/bmp"),
        "tiff" => Some("image/tiff"),
        _ => None,
    }
}

/// ステージ済み画像
#[derive(Debug, Clone, PartialEq)]
pub struct StagedImage {
    name: String,
    mime: String,
    bytes: Vec<u8>,
}

impl StagedImage {
    /// MIMEタイプを検証して生成する
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let mime = mime.into();
        if !is_allowed_mime(&mime) {
            return Err(Error::UnsupportedType(mime));
        }
        Ok(Self {
            name: name.into(),
            mime,
            bytes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// ヘッダから画像の実寸を読む（デコードはしない）
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        image::ImageReader::new(Cursor::new(&self.bytes))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()
    }
}

/// 描画用サーフェス（現状どの処理も描画しない。常に非表示）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawingSurface {
    pub width: u32,
    pub height: u32,
    pub visible: bool,
}

impl DrawingSurface {
    /// 画像の実寸に合わせた非表示サーフェス
    pub fn for_image(image: &StagedImage) -> Self {
        let (width, height) = image.dimensions().unwrap_or_else(|| {
            log::warn!("could not read dimensions of {}", image.name());
            (0, 0)
        });
        Self {
            width,
            height,
            visible: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        image::RgbImage::new(width, height)
            .write_to(&mut buf, image::ImageFormat::Png)
            .expect("PNG書き込み失敗");
        buf.into_inner()
    }

    #[test]
    fn test_allowed_mime_types() {
        for mime in ALLOWED_MIME_TYPES {
            assert!(is_allowed_mime(mime), "{} は許可されるべき", mime);
        }
    }

    #[test]
    fn test_rejected_mime_types() {
        for mime in ["image/gif", "image/webp", "application/pdf", "text/plain", ""] {
            assert!(!is_allowed_mime(mime), "{} は拒否されるべき", mime);
        }
    }

    #[test]
    fn test_staged_image_rejects_gif() {
        let result = StagedImage::new("anim.gif", "image/gif", vec![0x47, 0x49, 0x46]);
        assert!(matches!(result, Err(Error::UnsupportedType(m)) if m == "image/gif"));
    }

    #[test]
    fn test_staged_image_accessors() {
        let image = StagedImage::new("scan.bmp", "image/bmp", vec![1, 2, 3]).unwrap();
        assert_eq!(image.name(), "scan.bmp");
        assert_eq!(image.mime(), "image/bmp");
        assert_eq!(image.bytes(), &[1, 2, 3]);
    }

    #[test]
    fn test_mime_from_path() {
        assert_eq!(mime_from_path(Path::new("a/b/brain.PNG")), Some("image/png"));
        assert_eq!(mime_from_path(Path::new("x.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_from_path(Path::new("x.jpg")), Some("image/jpeg"));
        assert_eq!(mime_from_path(Path::new("x.TIFF")), Some("image/tiff"));
        assert_eq!(mime_from_path(Path::new("x.tif")), None);
        assert_eq!(mime_from_path(Path::new("x.bmp")), Some("image/bmp"));
        assert_eq!(mime_from_path(Path::new("x.gif")), None);
        assert_eq!(mime_from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_dimensions_from_png() {
        let image = StagedImage::new("mri.png", "image/png", png_bytes(7, 5)).unwrap();
        assert_eq!(image.dimensions(), Some((7, 5)));
    }

    #[test]
    fn test_surface_for_image_is_hidden() {
        let image = StagedImage::new("mri.png", "image/png", png_bytes(12, 9)).unwrap();
        let surface = DrawingSurface::for_image(&image);
        assert_eq!((surface.width, surface.height), (12, 9));
        assert!(!surface.visible);
    }

    #[test]
    fn test_surface_for_unreadable_image() {
        let image = StagedImage::new("broken.jpg", "image/jpeg", vec![0, 1, 2, 3]).unwrap();
        let surface = DrawingSurface::for_image(&image);
        assert_eq!(surface, DrawingSurface::default());
    }
}
