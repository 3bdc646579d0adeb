//! normalize.rs — Converte registros brutos do PRTG em `SensorRecord`

use crate::error::AlertaError;
use crate::types::{RawSensor, SensorRecord};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::warn;

/// Remove marcação HTML: tudo entre `<` e o próximo `>`.
///
/// Um `<` sem `>` posterior é mantido literalmente até o fim do texto.
/// Uma única varredura já chega ao ponto fixo: qualquer `<` que sobra não
/// tem `>` depois dele.
pub fn strip_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('<') {
        match rest[open..].find('>') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

fn parse_objid(value: &serde_json::Value) -> Result<i64, AlertaError> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| AlertaError::Format(format!("objid não inteiro: {}", n))),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| AlertaError::Format(format!("objid inválido: {:?}", s))),
        other => Err(AlertaError::Format(format!("objid ausente: {}", other))),
    }
}

/// Normaliza um único elemento de `sensors`. Qualquer status diferente de `Up`
/// conta como queda.
pub fn normalize_record(value: &serde_json::Value) -> Result<SensorRecord, AlertaError> {
    let raw = RawSensor::deserialize(value).map_err(|e| AlertaError::Format(e.to_string()))?;
    let id = parse_objid(&raw.objid)?;
    Ok(SensorRecord {
        id,
        is_down: raw.status != "Up",
        message: strip_html(&raw.message),
        device: raw.device,
        status: raw.status,
        last_up: raw.lastup,
    })
}

/// Normaliza todos os registros do ciclo, descartando (com aviso) os inválidos.
pub fn normalize_all(raws: &[serde_json::Value]) -> Vec<SensorRecord> {
    raws.iter()
        .filter_map(|raw| match normalize_record(raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Registro descartado: {}", e);
                None
            }
        })
        .collect()
}

impl SensorRecord {
    /// O sensor faz parte do conjunto monitorado?
    pub fn in_scope(&self, targets: &HashSet<i64>) -> bool {
        targets.contains(&self.id)
    }
}
