//! 端末への表示
//!
//! 処理中のアクションはスピナー、注釈付き画像は出力フォルダへ保存する。

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tumor_ai_common::{
    ActionState, AnnotatedImage, ClassificationDisplay, ConnectivityStatus, DrawingSurface, Error,
    StagedImage, Variant, View, BUSY_LABEL,
};

const BAR_WIDTH: usize = 20;

pub struct TerminalView {
    output_dir: PathBuf,
    stem: RefCell<String>,
    progress: MultiProgress,
    spinners: RefCell<HashMap<Variant, ProgressBar>>,
    saved: RefCell<Vec<PathBuf>>,
}

impl TerminalView {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            stem: RefCell::new(String::new()),
            progress: MultiProgress::new(),
            spinners: RefCell::new(HashMap::new()),
            saved: RefCell::new(Vec::new()),
        }
    }

    /// 保存した注釈付き画像のパス
    pub fn saved_files(&self) -> Vec<PathBuf> {
        self.saved.borrow().clone()
    }

    fn print(&self, line: String) {
        self.progress.suspend(|| println!("{}", line));
    }

    fn annotated_path(&self, variant: Variant, image: &AnnotatedImage) -> PathBuf {
        let stem = self.stem.borrow();
        let stem = if stem.is_empty() { "image" } else { stem.as_str() };
        self.output_dir
            .join(format!("{}_{}.{}", stem, variant.as_str(), image.extension()))
    }
}

/// 信頼度バー（例: `[██████████░░░░░░░░░░]`）
pub fn confidence_bar(fill_percent: f64, width: usize) -> String {
    let filled = ((fill_percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image")
        .to_string()
}

fn write_image(path: &Path, image: &AnnotatedImage) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &image.bytes)
}

impl View for TerminalView {
    fn alert(&self, message: &str) {
        self.progress.suspend(|| eprintln!("⚠ {}", message));
    }

    fn set_action(&self, variant: Variant, state: ActionState) {
        let mut spinners = self.spinners.borrow_mut();
        match state {
            ActionState::Busy => {
                let spinner = self.progress.add(ProgressBar::new_spinner());
                spinner.set_style(ProgressStyle::default_spinner());
                spinner.set_message(format!("{}: {}", variant.label(), BUSY_LABEL));
                spinner.enable_steady_tick(Duration::from_millis(100));
                if let Some(previous) = spinners.insert(variant, spinner) {
                    previous.finish_and_clear();
                }
            }
            ActionState::Ready | ActionState::Disabled => {
                if let Some(spinner) = spinners.remove(&variant) {
                    spinner.finish_and_clear();
                }
            }
        }
    }

    fn show_preview(&self, image: &StagedImage) {
        *self.stem.borrow_mut() = file_stem(image.name());
        self.print(format!(
            "🖼  {} ({}, {} bytes)",
            image.name(),
            image.mime(),
            image.bytes().len()
        ));
    }

    fn set_surface(&self, surface: DrawingSurface) {
        if surface.width > 0 && surface.height > 0 {
            self.print(format!("   {}x{}px", surface.width, surface.height));
        }
    }

    fn show_classification(&self, display: &ClassificationDisplay) {
        self.print(format!("✔ {}: {}", Variant::Classify.label(), display.label));
        self.print(format!(
            "   {} {} ({})",
            confidence_bar(display.fill_percent, BAR_WIDTH),
            display.percent_text,
            display.tier.as_str()
        ));
    }

    fn show_annotated(
        &self,
        variant: Variant,
        image: &AnnotatedImage,
    ) -> tumor_ai_common::Result<()> {
        let path = self.annotated_path(variant, image);
        write_image(&path, image)
            .map_err(|e| Error::Body(format!("画像を保存できません: {}: {}", path.display(), e)))?;
        self.print(format!("✔ {}: {}", variant.label(), path.display()));
        self.saved.borrow_mut().push(path);
        Ok(())
    }

    fn set_connectivity(&self, status: &ConnectivityStatus) {
        let mark = if status.connected { "●" } else { "○" };
        self.print(format!("{} {}", mark, status.message));
    }

    fn clear(&self) {
        self.stem.borrow_mut().clear();
        for (_, spinner) in self.spinners.borrow_mut().drain() {
            spinner.finish_and_clear();
        }
    }
}
