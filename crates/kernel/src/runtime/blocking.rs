use crate::{AppError, AppResult};

pub async fn run_blocking<T, F>(label: &'static str, job: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> AppResult<T> + Send + 'static,
{
    let handle = tokio::task::spawn_blocking(job);
    match handle.await {
        Ok(result) => result,
        Err(error) => {
            if error.is_cancelled() {
                return Err(
                    AppError::new("blocking_task_canceled", "blocking task was canceled")
                        .with_context("blockingTask", label),
                );
            }

            if error.is_panic() {
                tracing::error!(event = "blocking_task_panicked", blocking_task = label);
                return Err(
                    AppError::new("blocking_task_panicked", "blocking task panicked")
                        .with_context("joinError", join_error_detail(&error))
                        .with_context("blockingTask", label),
                );
            }

            Err(AppError::new("blocking_task_failed", "blocking task failed")
                .with_context("joinError", join_error_detail(&error))
                .with_context("blockingTask", label))
        }
    }
}

fn join_error_detail(error: &tokio::task::JoinError) -> String {
    let debug_text = format!("{error:?}");
    if debug_text.trim().is_empty() {
        "join error".to_string()
    } else {
        debug_text
    }
}

#[cfg(test)]
#[path = "../../tests/runtime/blocking_tests.rs"]
mod tests;
