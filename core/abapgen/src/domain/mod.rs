//! abapgen 固有のドメイン型（型と不変条件）

pub mod backend;
pub mod chat_turn;
pub mod code_block;
pub mod command;
pub mod ricef;
pub mod session_handle;
pub mod submission;
pub mod transcript;
pub mod upload;

pub use backend::BackendKind;
pub use chat_turn::{ChatTurn, Role};
pub use code_block::LastCodeBlock;
pub use command::{AppCommand, ChatCommand};
pub use ricef::RicefKind;
pub use session_handle::SessionHandle;
pub use submission::{Ignored, SubmissionState, SubmitOutcome};
pub use transcript::Transcript;
pub use upload::{PendingUpload, StagedFile, StagingRejection, UploadPolicy};
