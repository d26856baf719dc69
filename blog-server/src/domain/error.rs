use thiserror::Error;

/// Непрозрачный сбой таблицы: сохраняется только сообщение.
#[derive(Debug, Error)]
#[error("{message}")]
pub(crate) struct StoreError {
    message: String,
}

impl StoreError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("{0}")]
    ClientInput(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
