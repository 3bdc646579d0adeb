use thiserror::Error;

/// Falhas possíveis durante a operação. Nenhuma delas derruba o processo.
#[derive(Debug, Error)]
pub enum AlertaError {
    /// Arquivo de objids ausente ou ilegível.
    #[error("falha ao ler arquivo de sensores {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Falha de rede, HTTP ou JSON ao consultar o PRTG.
    #[error("falha ao consultar o PRTG: {0}")]
    Fetch(String),

    /// Registro individual que não pôde ser normalizado.
    #[error("registro inválido: {0}")]
    Format(String),

    /// Webhook recusou a mensagem ou está inacessível.
    #[error("falha ao enviar mensagem ao webhook: {0}")]
    Dispatch(String),
}

impl From<reqwest::Error> for AlertaError {
    fn from(e: reqwest::Error) -> Self {
        AlertaError::Fetch(e.to_string())
    }
}
