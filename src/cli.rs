use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tumor_ai_common::Variant;

#[derive(Parser)]
#[command(name = "tumor-ai")]
#[command(about = "脳腫瘍推論API（分類・検出・セグメンテーション）クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// APIのベースURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// APIの疎通確認
    Status,

    /// VGGで分類（ラベルと信頼度）
    Classify {
        /// 画像ファイル (PNG/JPEG/BMP/TIFF)
        #[arg(required = true)]
        image: PathBuf,
    },

    /// YOLOで検出し注釈付き画像を保存
    Detect {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 出力フォルダ（デフォルト: 画像と同じフォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// SAMでセグメンテーションし注釈付き画像を保存
    Segment {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 出力フォルダ（デフォルト: 画像と同じフォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 複数のアクションを同時に実行
    Run {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 出力フォルダ（デフォルト: 画像と同じフォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 実行するアクション（カンマ区切り）
        #[arg(short, long, value_delimiter = ',', default_value = "classify,detect,segment")]
        actions: Vec<Action>,
    },

    /// 設定を表示/編集
    Config {
        /// APIのベースURLを設定
        #[arg(long)]
        set_url: Option<String>,

        /// タイムアウト秒数を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Action {
    Classify,
    Detect,
    Segment,
}

impl From<Action> for Variant {
    fn from(action: Action) -> Self {
        match action {
            Action::Classify => Variant::Classify,
            Action::Detect => Variant::Detect,
            Action::Segment => Variant::Segment,
        }
    }
}

/// 出力フォルダの既定値（画像の親フォルダ）
pub fn default_output_dir(image: &Path) -> PathBuf {
    image
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
