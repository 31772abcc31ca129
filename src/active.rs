//! アクティブなカタログの共有ハンドル

/// 複数カタログの重ね合わせ
mod stack;

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
pub use stack::{
    CatalogueStack,
    StackError,
};

use crate::catalogue::{
    Catalogue,
    Diagnostic,
    LoadError,
    LoadOptions,
    load_file,
};
use crate::indexer::{
    CatalogueFile,
    select_layers,
};
use crate::resolver::{
    Query,
    Resolution,
    Resolver,
};

/// 現在の言語のカタログを保持する共有ハンドル
///
/// グローバル変数の代わりに、このハンドルを UI コードへ渡します。
/// `Clone` したハンドルは同じカタログを共有します。
///
/// アプリ本体のカタログとフレームワークのカタログ（`qt_it.ts` など）を
/// [`CatalogueStack`] として保持し、順に参照します。
///
/// # 一貫性
///
/// 読み取り側は [`stack`](Self::stack) でスナップショット（`Arc`）を取得します。
/// 言語切り替えはスタック全体を差し替えるため、読み取り側が
/// 構築途中のカタログや、言語の混ざったスタックを見ることはありません。
#[derive(Clone)]
pub struct ActiveCatalogue {
    current: Arc<RwLock<Arc<CatalogueStack>>>,
}

impl ActiveCatalogue {
    /// 指定したカタログで新しいハンドルを作成
    #[must_use]
    pub fn new(catalogue: Catalogue) -> Self {
        Self::with_stack(CatalogueStack::new(catalogue))
    }

    /// 指定したスタックで新しいハンドルを作成
    #[must_use]
    pub fn with_stack(stack: CatalogueStack) -> Self {
        Self { current: Arc::new(RwLock::new(Arc::new(stack))) }
    }

    /// 現在のスタックのスナップショットを取得
    #[must_use]
    pub fn stack(&self) -> Arc<CatalogueStack> {
        Arc::clone(&self.current.read())
    }

    /// 現在のアプリ本体のカタログのスナップショットを取得
    #[must_use]
    pub fn current(&self) -> Arc<Catalogue> {
        Arc::clone(self.current.read().primary())
    }

    /// 現在の言語タグ
    #[must_use]
    pub fn language(&self) -> String {
        self.current.read().primary().language().to_string()
    }

    /// 1 つのカタログだけのスタックに差し替え、以前のアプリ本体のカタログを返す
    pub fn replace(&self, catalogue: Catalogue) -> Arc<Catalogue> {
        let previous = self.replace_stack(CatalogueStack::new(catalogue));
        Arc::clone(previous.primary())
    }

    /// スタック全体を差し替え、以前のスタックを返す
    pub fn replace_stack(&self, stack: CatalogueStack) -> Arc<CatalogueStack> {
        let next = Arc::new(stack);
        tracing::debug!(
            language = %next.primary().language(),
            layers = next.layers().count(),
            "Active catalogue replaced"
        );
        std::mem::replace(&mut *self.current.write(), next)
    }

    /// ファイルから新しいカタログを読み込み、成功した場合のみ差し替える
    ///
    /// 読み込み時の診断を返します。
    ///
    /// # Errors
    /// 読み込みに失敗した場合はエラーを返し、以前のカタログを保持します。
    pub fn switch_language(
        &self,
        path: &Path,
        options: &LoadOptions,
    ) -> Result<Vec<Diagnostic>, LoadError> {
        let outcome = match load_file(path, options) {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %error,
                    "Language switch failed, keeping current catalogue"
                );
                return Err(error);
            }
        };

        if outcome.has_warnings() {
            tracing::warn!(
                path = %path.display(),
                diagnostics = outcome.diagnostics.len(),
                "Catalogue loaded with warnings"
            );
        }
        self.replace(outcome.catalogue);
        Ok(outcome.diagnostics)
    }

    /// 検出済みのファイルからレイヤーごとのカタログを選んで読み込み、
    /// すべて成功した場合のみスタック全体を差し替える
    ///
    /// `layers` はファイル名の接頭辞で、参照順に並べます（例: `["wireshark", "qt"]`）。
    ///
    /// # Errors
    /// 言語に合うファイルが 1 つもない場合、またはいずれかの読み込みに
    /// 失敗した場合はエラーを返し、以前のスタックを保持します。
    pub fn load_language(
        &self,
        files: &[CatalogueFile],
        layers: &[String],
        language: &str,
        options: &LoadOptions,
    ) -> Result<Vec<Diagnostic>, StackError> {
        let selected = select_layers(files, layers, language);
        let Some((primary, fallbacks)) = selected.split_first() else {
            tracing::warn!(language, "No catalogue for language, keeping current catalogue");
            return Err(StackError::NoCatalogue { language: language.to_string() });
        };
        let fallbacks: Vec<_> = fallbacks.iter().map(|file| file.path.clone()).collect();

        let (stack, diagnostics) = match CatalogueStack::load(&primary.path, &fallbacks, options) {
            Ok(loaded) => loaded,
            Err(error) => {
                tracing::warn!(
                    language,
                    error = %error,
                    "Language switch failed, keeping current catalogue"
                );
                return Err(error);
            }
        };

        self.replace_stack(stack);
        Ok(diagnostics)
    }

    /// 現在のスタックで翻訳
    #[must_use]
    pub fn tr(&self, context: &str, source_text: &str) -> String {
        self.stack().resolve(&Query::new(context, source_text)).text
    }
}

impl Resolver for ActiveCatalogue {
    fn resolve(&self, query: &Query<'_>) -> Resolution {
        self.stack().resolve(query)
    }
}

impl Default for ActiveCatalogue {
    /// 空の英語カタログ（すべての検索がソーステキストを返す）
    fn default() -> Self {
        Self::new(Catalogue::empty("en"))
    }
}

impl std::fmt::Debug for ActiveCatalogue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let current = self.current.read();
        f.debug_struct("ActiveCatalogue")
            .field("language", &current.primary().language())
            .field("layers", &current.layers().count())
            .field("resolvable", &current.primary().resolvable_len())
            .finish()
    }
}
