//! プレビュー画像のオブジェクトURL管理
//!
//! 選択したファイルのバイト列に `blob:` 形式の一時参照を払い出す。
//! ネットワークI/Oは行わない。差し替え・リセット時に revoke する。

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

const URL_PREFIX: &str = "blob:species-id/";

/// 一時参照URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// URLが指すバイト列
#[derive(Debug, Clone)]
pub struct Blob {
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

/// オブジェクトURLの登録簿
#[derive(Debug, Default)]
pub struct ObjectUrlStore {
    next_id: u64,
    entries: HashMap<ObjectUrl, Blob>,
}

impl ObjectUrlStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// バイト列を登録してURLを払い出す
    pub fn create(&mut self, mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> ObjectUrl {
        self.next_id += 1;
        let url = ObjectUrl(format!("{}{}", URL_PREFIX, self.next_id));
        self.entries.insert(
            url.clone(),
            Blob {
                mime: mime.into(),
                bytes: bytes.into(),
            },
        );
        url
    }

    pub fn resolve(&self, url: &ObjectUrl) -> Option<&Blob> {
        self.entries.get(url)
    }

    /// 解放。登録済みだった場合のみ true
    pub fn revoke(&mut self, url: &ObjectUrl) -> bool {
        self.entries.remove(url).is_some()
    }

    /// 未解放のURL数
    pub fn live_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_resolve() {
        let mut store = ObjectUrlStore::new();
        let url = store.create("image/jpeg", vec![1u8, 2, 3]);

        assert!(url.as_str().starts_with("blob:"));
        let blob = store.resolve(&url).expect("blob should be registered");
        assert_eq!(blob.mime, "image/jpeg");
        assert_eq!(&*blob.bytes, &[1, 2, 3]);
    }

    #[test]
    fn test_urls_are_unique() {
        let mut store = ObjectUrlStore::new();
        let a = store.create("image/png", vec![0u8]);
        let b = store.create("image/png", vec![0u8]);
        assert_ne!(a, b);
        assert_eq!(store.live_count(), 2);
    }

    #[test]
    fn test_revoke() {
        let mut store = ObjectUrlStore::new();
        let url = store.create("image/png", vec![0u8]);

        assert!(store.revoke(&url));
        assert!(store.resolve(&url).is_none());
        assert_eq!(store.live_count(), 0);

        // 二重解放は何もしない
        assert!(!store.revoke(&url));
    }
}
