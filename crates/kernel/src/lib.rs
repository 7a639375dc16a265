pub mod runtime;
pub mod sync;

pub use protocol::models;
pub use protocol::{AppError, AppErrorPayload, AppResult, ErrorContextItem, ResultExt};
