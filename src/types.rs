use serde::{Deserialize, Deserializer, Serialize};

/// Corpo devolvido pela API de tabela do PRTG (`content=sensors`).
///
/// Os elementos ficam como JSON cru: cada um é decodificado em separado na
/// normalização, para que um registro ruim não derrube a resposta inteira.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorTable {
    #[serde(default)]
    pub sensors: Vec<serde_json::Value>,
}

/// Registro bruto como vem da API: tudo texto, mensagem com HTML.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSensor {
    /// O PRTG devolve número ou string dependendo da versão.
    #[serde(default)]
    pub objid: serde_json::Value,
    #[serde(default, deserialize_with = "lenient_text")]
    pub device: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub lastup: String,
}

/// Campo textual tolerante: `null` vira vazio, número/booleano vira texto.
/// Objetos e listas continuam sendo erro.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!("esperado texto, veio {}", other))),
    }
}

/// Registro normalizado de um sensor em um ciclo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorRecord {
    pub id: i64,
    pub device: String,
    /// Status original (Down, Warning, Paused...), mantido para exibição.
    pub status: String,
    pub is_down: bool,
    /// Mensagem já sem marcação HTML.
    pub message: String,
    pub last_up: String,
}

/// Resultado da reclassificação de um ciclo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionResult {
    pub currently_down: Vec<SensorRecord>,
    pub recovered: Vec<SensorRecord>,
    /// Quantidade de sensores ainda em alerta após a atualização do estado.
    pub still_alerting: usize,
}

/// Corpo do POST enviado ao webhook do chat.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload<'a> {
    pub text: &'a str,
    pub username: &'a str,
}
