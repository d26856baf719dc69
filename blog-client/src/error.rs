use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `blog-client`.
pub enum BlogClientError {
    /// Ошибка HTTP-транспорта (`reqwest`): соединение, таймаут, TLS.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Сервер ответил конвертом `{"success":false,"error":...}` или не-2xx статусом.
    #[error("api error {status}: {message}")]
    Api {
        /// HTTP-статус ответа.
        status: u16,
        /// Сообщение об ошибке из тела ответа.
        message: String,
    },

    /// Тело ответа не удалось разобрать как ожидаемый JSON.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Результат операций `blog-client`.
pub type BlogClientResult<T> = Result<T, BlogClientError>;

impl BlogClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let message = message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("http status {status}"));
        Self::Api {
            status: status.as_u16(),
            message,
        }
    }

    /// Сообщение, которое сервер вернул в поле `error`, если оно есть.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}
