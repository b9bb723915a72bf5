//! 送信の状態（Idle ⇄ Sending）

/// 送信状態。Sending 中の新規送信は受け付けない。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Sending,
}

/// 送信が行われなかった理由（いずれもエラーではない）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// 入力が空でファイルも無い
    Empty,
    /// 別の送信が進行中
    Busy,
    /// ファイル必須のバックエンドでファイルが無い
    FileRequired,
    /// Sending でないのに完了が届いた
    NotSending,
}

/// submit の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ignored(Ignored),
    /// assistant ターンを追加した（extracted: LastCodeBlock を更新したか）
    Answered { extracted: bool },
    /// error ターンを追加した
    Failed,
}
