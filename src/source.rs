use crate::error::AlertaError;
use crate::types::SensorTable;
use async_trait::async_trait;
use reqwest::StatusCode;

/// Fonte dos registros de sensores consultada a cada ciclo.
#[async_trait]
pub trait SensorSource: Send + Sync {
    /// Devolve os elementos de `sensors` ainda sem decodificar.
    async fn fetch(&self) -> Result<Vec<serde_json::Value>, AlertaError>;
}

/// Converte a resposta do PRTG em elementos de sensor, ou em `Fetch`.
pub fn decode_table(status: StatusCode, body: &str) -> Result<Vec<serde_json::Value>, AlertaError> {
    if !status.is_success() {
        return Err(AlertaError::Fetch(format!("PRTG respondeu {}", status)));
    }
    let table: SensorTable = serde_json::from_str(body)
        .map_err(|e| AlertaError::Fetch(format!("JSON inválido do PRTG: {}", e)))?;
    Ok(table.sensors)
}

/// Consulta a API de tabela do PRTG via HTTP GET.
pub struct PrtgSource {
    url: String,
    client: reqwest::Client,
}

impl PrtgSource {
    pub fn new(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

#[async_trait]
impl SensorSource for PrtgSource {
    async fn fetch(&self) -> Result<Vec<serde_json::Value>, AlertaError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        decode_table(status, &body)
    }
}
