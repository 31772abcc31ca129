//! 複数カタログの重ね合わせ（アプリ本体 → フレームワーク）

use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use thiserror::Error;

use crate::catalogue::{
    Catalogue,
    Diagnostic,
    LoadError,
    LoadOptions,
    load_file,
};
use crate::resolver::{
    Query,
    Resolution,
    Resolver,
};

#[derive(Error, Debug)]
pub enum StackError {
    #[error("No catalogue found for language '{language}'")]
    NoCatalogue { language: String },

    #[error("Failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },
}

/// 順番に参照されるカタログの列
///
/// 先頭のカタログ（アプリ本体）で翻訳が見つからない場合、後続のカタログ
/// （例: `qt_it.ts`）を順に参照します。どのカタログにも翻訳がなければ、
/// 先頭のカタログの解決結果（ソーステキスト）を返します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueStack {
    primary: Arc<Catalogue>,
    fallbacks: Vec<Arc<Catalogue>>,
}

impl CatalogueStack {
    /// 1 つのカタログだけのスタック
    #[must_use]
    pub fn new(primary: Catalogue) -> Self {
        Self { primary: Arc::new(primary), fallbacks: Vec::new() }
    }

    /// 末尾にフォールバックのカタログを追加
    #[must_use]
    pub fn with_fallback(mut self, catalogue: Catalogue) -> Self {
        self.fallbacks.push(Arc::new(catalogue));
        self
    }

    /// ファイルからすべてのカタログを読み込む
    ///
    /// 1 つでも失敗した場合はスタック全体を作りません。
    /// 診断はすべてのファイル分をまとめて返します。
    ///
    /// # Errors
    /// いずれかのファイルの読み込みに失敗した場合
    pub fn load(
        primary: &Path,
        fallbacks: &[PathBuf],
        options: &LoadOptions,
    ) -> Result<(Self, Vec<Diagnostic>), StackError> {
        let load = |path: &Path| {
            load_file(path, options)
                .map_err(|source| StackError::Load { path: path.to_path_buf(), source })
        };

        let first = load(primary)?;
        let mut diagnostics = first.diagnostics;
        let mut stack = Self::new(first.catalogue);
        for path in fallbacks {
            let outcome = load(path)?;
            diagnostics.extend(outcome.diagnostics);
            stack = stack.with_fallback(outcome.catalogue);
        }
        Ok((stack, diagnostics))
    }

    #[must_use]
    pub const fn primary(&self) -> &Arc<Catalogue> {
        &self.primary
    }

    /// 参照順のすべてのカタログ
    pub fn layers(&self) -> impl Iterator<Item = &Arc<Catalogue>> {
        std::iter::once(&self.primary).chain(&self.fallbacks)
    }
}

impl Resolver for CatalogueStack {
    fn resolve(&self, query: &Query<'_>) -> Resolution {
        let first = self.primary.resolve(query);
        if first.outcome.is_translated() {
            return first;
        }
        self.fallbacks
            .iter()
            .map(|catalogue| catalogue.resolve(query))
            .find(|resolution| resolution.outcome.is_translated())
            .unwrap_or(first)
    }
}
