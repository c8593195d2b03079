//! ワークスペースの設定と、そこから導くエンジンのオプション

use std::path::{
    Path,
    PathBuf,
};

use super::{
    CONFIG_FILE_NAME,
    ConfigError,
    ImportExportSettings,
    loader,
};
use crate::catalog::ExtendOptions;
use crate::export::ExportOptions;

/// 検証済みの設定と、その読み込み元
#[derive(Debug, Clone, Default)]
pub struct WorkspaceConfig {
    settings: ImportExportSettings,
    /// 読み込んだ設定ファイル（デフォルト設定なら `None`）
    source: Option<PathBuf>,
}

impl WorkspaceConfig {
    /// `workspace_root` の設定ファイルを読み込む
    ///
    /// ルートがない、または設定ファイルがない場合はデフォルト設定を使う
    ///
    /// # Errors
    /// - 設定ファイルの読み込み・パースに失敗
    /// - 設定の検証に失敗
    pub fn load(workspace_root: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(root) = workspace_root else {
            tracing::debug!("No workspace root, using default settings");
            return Ok(Self::default());
        };

        let Some(settings) = loader::load_from_workspace(root)? else {
            return Ok(Self::default());
        };
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        let source = root.join(CONFIG_FILE_NAME);
        tracing::debug!(source = %source.display(), ?settings, "Loaded workspace settings");
        Ok(Self { settings, source: Some(source) })
    }

    #[must_use]
    pub const fn settings(&self) -> &ImportExportSettings {
        &self.settings
    }

    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// [`crate::catalog::ProjectGraph::extend`] のロケール絞り込み
    #[must_use]
    pub fn extend_options(&self) -> ExtendOptions {
        ExtendOptions { locale_filter: self.settings.export.locale_filter.clone() }
    }

    /// エクスポートのオプション（コンテキスト区切り文字はインポートと共通）
    #[must_use]
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions::from(&self.settings.export)
            .with_context_separator(self.settings.context_separator.as_str())
    }
}
