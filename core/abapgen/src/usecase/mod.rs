//! ユースケース（ポート経由でのみ外界に触れる）

pub mod render;
pub mod templates;
pub mod transcript_engine;

pub use render::{render_turn, RenderBlock};
pub use templates::TemplateUseCase;
pub use transcript_engine::{EngineDeps, EngineOptions, TranscriptEngine};
