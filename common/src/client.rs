//! アップロード・推論クライアント
//!
//! ステージ済み画像1枚と各アクション・パネルの状態を保持し、
//! `Backend` で推論APIを呼び出して `View` に結果を反映する。
//!
//! シングルスレッド前提。状態は `RefCell` で持ち、`.await` をまたいで借用しない。
//! 同じアクションを重ねて実行した場合の直列化はしていない（後から届いた
//! レスポンスがパネルを上書きする）。重複は警告ログで知らせるのみ。

use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::render::ClassificationDisplay;
use crate::staging::{DrawingSurface, StagedImage, INVALID_TYPE_MESSAGE, NO_IMAGE_MESSAGE};
use crate::types::{
    ActionState, AnnotatedImage, Classification, ConnectivityStatus, Outcome, PanelState, Variant,
};
use crate::view::View;

/// クライアントの状態
#[derive(Debug, Clone, Default)]
pub struct ClientState {
    staged: Option<Rc<StagedImage>>,
    actions: [ActionState; 3],
    panels: [PanelState; 3],
    in_flight: [usize; 3],
    surface: DrawingSurface,
    connectivity: Option<ConnectivityStatus>,
}

impl ClientState {
    pub fn staged(&self) -> Option<&StagedImage> {
        self.staged.as_deref()
    }

    pub fn action(&self, variant: Variant) -> ActionState {
        self.actions[variant.index()]
    }

    pub fn panel(&self, variant: Variant) -> PanelState {
        self.panels[variant.index()]
    }

    /// 実行中リクエスト数
    pub fn in_flight(&self, variant: Variant) -> usize {
        self.in_flight[variant.index()]
    }

    pub fn surface(&self) -> DrawingSurface {
        self.surface
    }

    pub fn connectivity(&self) -> Option<&ConnectivityStatus> {
        self.connectivity.as_ref()
    }
}

pub struct Client<B, V> {
    backend: B,
    view: V,
    state: RefCell<ClientState>,
}

impl<B: Backend, V: View> Client<B, V> {
    /// 画像未選択・全アクション無効の状態で生成
    pub fn new(backend: B, view: V) -> Self {
        let client = Self {
            backend,
            view,
            state: RefCell::new(ClientState::default()),
        };
        for variant in Variant::ALL {
            client.view.set_action(variant, ActionState::Disabled);
        }
        client
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// 現在の状態のコピー
    pub fn snapshot(&self) -> ClientState {
        self.state.borrow().clone()
    }

    pub fn has_image(&self) -> bool {
        self.state.borrow().staged.is_some()
    }

    fn staged_image(&self) -> Option<Rc<StagedImage>> {
        self.state.borrow().staged.clone()
    }

    /// 選択ファイルを検証してステージする
    ///
    /// 許可されないMIMEタイプは警告を出して拒否し、状態は変更しない。
    pub fn stage_file(&self, name: &str, mime: &str, bytes: Vec<u8>) -> Result<()> {
        match StagedImage::new(name, mime, bytes) {
            Ok(image) => {
                self.stage(image);
                Ok(())
            }
            Err(err) => {
                log::warn!("rejected upload {}: {}", name, err);
                self.view.alert(INVALID_TYPE_MESSAGE);
                Err(err)
            }
        }
    }

    /// 検証済み画像をステージし、アクションを有効化する
    ///
    /// 既存の結果パネルはクリアしない。
    pub fn stage(&self, image: StagedImage) {
        log::info!(
            "staged {} ({}, {} bytes)",
            image.name(),
            image.mime(),
            image.bytes().len()
        );
        let surface = DrawingSurface::for_image(&image);
        self.view.show_preview(&image);
        self.view.set_surface(surface);

        let actions = {
            let mut state = self.state.borrow_mut();
            state.staged = Some(Rc::new(image));
            state.surface = surface;
            for action in state.actions.iter_mut() {
                // 実行中のボタンは完了時に戻る
                if *action != ActionState::Busy {
                    *action = ActionState::Ready;
                }
            }
            state.actions
        };
        for variant in Variant::ALL {
            self.view.set_action(variant, actions[variant.index()]);
        }
    }

    /// 起動時の疎通確認（リトライなし）
    pub async fn check_connectivity(&self) -> ConnectivityStatus {
        let status = match self.backend.health().await {
            Ok(()) => ConnectivityStatus::connected(),
            Err(Error::Status(code)) => {
                log::warn!("API check returned status {}", code);
                ConnectivityStatus::failed()
            }
            Err(err) => {
                log::error!("API check failed: {}", err);
                ConnectivityStatus::unreachable()
            }
        };
        self.state.borrow_mut().connectivity = Some(status.clone());
        self.view.set_connectivity(&status);
        status
    }

    /// 推論アクションを1回実行する
    ///
    /// 画像が無ければ通信せずに `Error::NoImage`。
    /// 失敗は種類を問わず汎用の警告とエラーログのみ。ボタンは結果に関わらず元に戻る。
    pub async fn run(&self, variant: Variant) -> Result<Outcome> {
        let Some(image) = self.staged_image() else {
            self.view.alert(NO_IMAGE_MESSAGE);
            return Err(Error::NoImage);
        };

        let _busy = BusyGuard::acquire(self, variant);

        let result = match variant {
            Variant::Classify => self
                .backend
                .classify(&image)
                .await
                .map(Outcome::Classification),
            Variant::Detect | Variant::Segment => self
                .backend
                .annotate(variant, &image)
                .await
                .map(|annotated| Outcome::Annotated(variant, annotated)),
        };

        let result = result.and_then(|outcome| self.render(&outcome).map(|()| outcome));
        if let Err(err) = &result {
            log::error!("{} error: {}", variant.as_str(), err);
            self.view.alert(variant.failure_message());
        }
        result
    }

    pub async fn classify(&self) -> Result<Classification> {
        match self.run(Variant::Classify).await? {
            Outcome::Classification(result) => Ok(result),
            Outcome::Annotated(..) => Err(Error::Body("expected a classification".into())),
        }
    }

    pub async fn detect(&self) -> Result<AnnotatedImage> {
        self.annotated(Variant::Detect).await
    }

    pub async fn segment(&self) -> Result<AnnotatedImage> {
        self.annotated(Variant::Segment).await
    }

    async fn annotated(&self, variant: Variant) -> Result<AnnotatedImage> {
        match self.run(variant).await? {
            Outcome::Annotated(_, image) => Ok(image),
            Outcome::Classification(_) => Err(Error::Body("expected an annotated image".into())),
        }
    }

    /// 表示に成功したパネルだけを結果表示にする
    fn render(&self, outcome: &Outcome) -> Result<()> {
        let variant = match outcome {
            Outcome::Classification(result) => {
                self.view
                    .show_classification(&ClassificationDisplay::from(result));
                Variant::Classify
            }
            Outcome::Annotated(variant, image) => {
                self.view.show_annotated(*variant, image)?;
                *variant
            }
        };
        self.state.borrow_mut().panels[variant.index()] = PanelState::Populated;
        Ok(())
    }

    /// 画面全体を初期状態に戻す
    pub fn reset(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.staged = None;
            state.surface = DrawingSurface::default();
            state.panels = [PanelState::Placeholder; 3];
            state.actions = [ActionState::Disabled; 3];
        }
        self.view.clear();
        for variant in Variant::ALL {
            self.view.set_action(variant, ActionState::Disabled);
        }
    }
}

/// 実行中のボタン状態を保持し、スコープを抜けると必ず元に戻す
///
/// 成功・失敗・futureの破棄（キャンセル）いずれでも解放される。
struct BusyGuard<'a, B: Backend, V: View> {
    client: &'a Client<B, V>,
    variant: Variant,
}

impl<'a, B: Backend, V: View> BusyGuard<'a, B, V> {
    fn acquire(client: &'a Client<B, V>, variant: Variant) -> Self {
        let overlapping = {
            let mut state = client.state.borrow_mut();
            let i = variant.index();
            state.in_flight[i] += 1;
            state.actions[i] = ActionState::Busy;
            state.in_flight[i] > 1
        };
        if overlapping {
            log::warn!(
                "{} started while a previous request is still in flight; the last response wins",
                variant.as_str()
            );
        }
        client.view.set_action(variant, ActionState::Busy);
        Self { client, variant }
    }
}

impl<B: Backend, V: View> Drop for BusyGuard<'_, B, V> {
    fn drop(&mut self) {
        let restored = {
            let mut state = self.client.state.borrow_mut();
            let i = self.variant.index();
            state.in_flight[i] = state.in_flight[i].saturating_sub(1);
            // リセット後に完了した場合は無効のまま
            let next = if state.staged.is_some() {
                ActionState::Ready
            } else {
                ActionState::Disabled
            };
            state.actions[i] = next;
            next
        };
        self.client.view.set_action(self.variant, restored);
    }
}
