//! 翻訳ディレクトリの走査と言語ごとのカタログ選択

use ignore::WalkBuilder;

use crate::config::FileMatcher;
use crate::indexer::types::{
    CatalogueFile,
    IndexerError,
};
use crate::language;

/// 翻訳ディレクトリ以下のカタログファイルを検索
///
/// 結果はパス順にソートされます。
///
/// # Errors
/// ルートが存在しない、またはディレクトリでない場合
pub fn discover(matcher: &FileMatcher) -> Result<Vec<CatalogueFile>, IndexerError> {
    let root = matcher.root();
    if !root.exists() {
        return Err(IndexerError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(IndexerError::NotADirectory(root.to_path_buf()));
    }

    tracing::debug!(root = %root.display(), "Discovering catalogue files");

    let mut found = Vec::new();
    // ignore クレートでファイルを走査
    for result in WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        // ファイルのみを対象
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if !matcher.is_catalogue_file(path) {
            continue;
        }

        // ルートからの相対パスで言語を判定（ルート自体の名前に影響されないように）
        let relative = path.strip_prefix(root).unwrap_or(path);
        let language = language::detect_from_path(relative);
        if language.is_none() {
            tracing::debug!(path = %path.display(), "No language detected from path");
        }
        found.push(CatalogueFile { path: path.to_path_buf(), language });
    }

    found.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!(count = found.len(), "Catalogue files discovered");
    Ok(found)
}

/// 指定した言語に最も適したカタログを選択
///
/// 完全一致（大文字小文字・区切り文字は無視）を優先し、
/// なければ基本言語が一致するもの（`it_IT` → `it`）を返します。
#[must_use]
pub fn select_for_language<'a>(
    files: &'a [CatalogueFile],
    requested: &str,
) -> Option<&'a CatalogueFile> {
    select_from(files.iter(), requested)
}

/// 完全一致、次に基本言語の一致で選択
fn select_from<'a, I>(files: I, requested: &str) -> Option<&'a CatalogueFile>
where
    I: Iterator<Item = &'a CatalogueFile> + Clone,
{
    let with_language = || {
        files
            .clone()
            .filter_map(|file| file.language.as_deref().map(|language| (file, language)))
    };

    with_language()
        .find(|(_, language)| language::same_language(language, requested))
        .or_else(|| {
            with_language().find(|(_, language)| language::same_base_language(language, requested))
        })
        .map(|(file, _)| file)
}

/// レイヤーごとに指定した言語のカタログを選択
///
/// レイヤーはファイル名の接頭辞（`wireshark` → `wireshark_it.ts`、
/// `qt` → `qt_it.ts`）で、結果は `layers` の順に並びます。
/// 該当するファイルがないレイヤーは飛ばします。
/// `layers` が空の場合は [`select_for_language`] の結果だけを返します。
#[must_use]
pub fn select_layers<'a>(
    files: &'a [CatalogueFile],
    layers: &[String],
    requested: &str,
) -> Vec<&'a CatalogueFile> {
    if layers.is_empty() {
        return select_for_language(files, requested).into_iter().collect();
    }

    layers
        .iter()
        .filter_map(|layer| {
            let in_layer = files.iter().filter(|file| belongs_to_layer(file, layer));
            let selected = select_from(in_layer, requested);
            if selected.is_none() {
                tracing::debug!(layer = %layer, language = requested, "No catalogue for layer");
            }
            selected
        })
        .collect()
}

/// ファイル名が `<layer>` または `<layer>_...` で始まるか
fn belongs_to_layer(file: &CatalogueFile, layer: &str) -> bool {
    file.path.file_stem().and_then(|stem| stem.to_str()).is_some_and(|stem| {
        stem.strip_prefix(layer).is_some_and(|rest| rest.is_empty() || rest.starts_with('_'))
    })
}
