//! 「最後に抽出したコード」スロット

use common::fence;

/// 直近の応答から抽出したコード本文（空 = 未抽出）
///
/// 新しい応答に Code があれば上書き、無ければ前回値を保持する。空に戻すのはリセットだけ。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastCodeBlock(String);

impl LastCodeBlock {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 応答本文から抽出して更新する。更新した場合 true。
    pub fn absorb(&mut self, content: &str) -> bool {
        match fence::extract_last_code(content) {
            Some(code) => {
                self.0 = code.to_string();
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}
