//! テスト用のユーティリティ
#![cfg(test)]

use crate::catalog::Project;
use crate::locale::Locale;

/// 英語とノルウェー語（ブークモール）のロケール
pub(crate) fn test_locales() -> Vec<Locale> {
    vec![
        Locale::new("loc-en", "en-US", "en", "eng", "eng", "English"),
        Locale::new("loc-no", "nb-NO", "nb", "nob", "nob", "Norwegian"),
    ]
}

/// テスト用エンティティの所有者となるプロジェクト
pub(crate) fn base_project() -> Project {
    Project::new("proj-123", "jim", "org-123")
}
