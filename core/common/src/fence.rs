//! コードフェンス（```）スキャナ
//!
//! 応答テキストを `Text` / `Code` のセグメント列に分割する。純粋関数で、同じ入力には常に同じ列を返す。
//!
//! - 閉じた ``` ... ``` の組だけを Code とみなす。閉じていない開始フェンスはただのテキスト。
//! - 開始フェンス直後の言語タグ（`abap` 等、大文字小文字は問わない）は改行が続く場合のみ読み飛ばす。
//! - セグメントの span は入力を左から隙間なく重なりなく覆う。空の Text は出さない。

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// 生成コードらしさの判定に使うキーワード（単語単位・大文字小文字無視）
pub const SOURCE_KEYWORDS: &[&str] = &[
    "REPORT",
    "DATA",
    "SELECT",
    "ENDSELECT",
    "LOOP",
    "ENDLOOP",
    "IF",
    "ENDIF",
    "WRITE",
    "PERFORM",
    "FORM",
    "ENDFORM",
    "CLASS",
    "ENDCLASS",
    "METHOD",
    "ENDMETHOD",
    "FUNCTION",
    "ENDFUNCTION",
    "START-OF-SELECTION",
    "END-OF-SELECTION",
    "TABLES",
    "TYPES",
    "CONSTANTS",
];

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)```(?:[A-Za-z0-9_+#.\-]*[ \t]*(?:\r\n|\r|\n))?(.*?)```")
            .expect("fence pattern is valid")
    })
}

fn keyword_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let alternation = SOURCE_KEYWORDS.join("|");
        Regex::new(&format!(r"(?i)\b(?:{})\b", alternation)).expect("keyword pattern is valid")
    })
}

/// スキャン結果の 1 区間
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// フェンス外のテキスト（そのまま、trim しない）
    Text { span: Range<usize>, text: &'a str },
    /// 閉じたフェンス。span はフェンス記号を含む全体、body は中身を trim したもの
    Code { span: Range<usize>, body: &'a str },
}

impl<'a> Segment<'a> {
    pub fn span(&self) -> Range<usize> {
        match self {
            Segment::Text { span, .. } | Segment::Code { span, .. } => span.clone(),
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Segment::Code { .. })
    }

    /// Code なら trim 済み本文を返す
    pub fn code_body(&self) -> Option<&'a str> {
        match self {
            Segment::Code { body, .. } => Some(body),
            Segment::Text { .. } => None,
        }
    }
}

/// 遅延評価のセグメント列。clone すればその位置から再開できる。
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    pos: usize,
    pending: Option<Segment<'a>>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(seg) = self.pending.take() {
            return Some(seg);
        }
        if self.pos >= self.text.len() {
            return None;
        }

        let Some(caps) = fence_re().captures_at(self.text, self.pos) else {
            let span = self.pos..self.text.len();
            self.pos = self.text.len();
            return Some(Segment::Text {
                text: &self.text[span.clone()],
                span,
            });
        };

        // グループ 0 は一致すれば必ず存在する
        let whole = caps.get(0)?;
        let body = caps.get(1).map_or("", |m| m.as_str()).trim();
        let code = Segment::Code {
            span: whole.range(),
            body,
        };
        let start = self.pos;
        self.pos = whole.end();

        if whole.start() > start {
            self.pending = Some(code);
            let span = start..whole.start();
            Some(Segment::Text {
                text: &self.text[span.clone()],
                span,
            })
        } else {
            Some(code)
        }
    }
}

/// テキストをスキャンしてセグメント列を返す
pub fn scan(text: &str) -> Segments<'_> {
    Segments {
        text,
        pos: 0,
        pending: None,
    }
}

/// フェンスなしの本文が生成コードらしく見えるか（キーワードを単語として含むか）
pub fn looks_like_source(text: &str) -> bool {
    keyword_re().is_match(text)
}

/// 「最後のコード」を抽出する
///
/// フェンスがあれば文書順で最後の Code 本文。無ければキーワード判定に通った場合のみ全体を trim したもの。
/// どちらでもなければ None（呼び出し側は前回値を保持する）。
pub fn extract_last_code(text: &str) -> Option<&str> {
    if let Some(last) = scan(text).filter_map(|s| s.code_body()).last() {
        return Some(last);
    }
    if looks_like_source(text) {
        return Some(text.trim());
    }
    None
}
