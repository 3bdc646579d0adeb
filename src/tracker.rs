//! tracker.rs — Estado de sensores em alerta entre ciclos de polling

use crate::types::{SensorRecord, TransitionResult};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Sensores monitorados que estão em queda segundo o último ciclo com dados.
#[derive(Debug, Clone, Default)]
pub struct TransitionTracker {
    down: HashMap<i64, SensorRecord>,
}

impl TransitionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reclassifica os registros do ciclo contra o estado anterior.
    ///
    /// - `currently_down`: alvos em queda neste ciclo, na ordem da API.
    /// - `recovered`: alvos que estavam em queda e agora aparecem como `Up`.
    ///   Um sensor ausente da resposta não é considerado recuperado.
    ///
    /// Ao final, o estado é `(anterior \ recuperados) ∪ em_queda`.
    pub fn reclassify(
        &mut self,
        records: &[SensorRecord],
        targets: &HashSet<i64>,
    ) -> TransitionResult {
        let currently_down: Vec<SensorRecord> = records
            .iter()
            .filter(|r| r.in_scope(targets) && r.is_down)
            .cloned()
            .collect();
        let down_ids: HashSet<i64> = currently_down.iter().map(|r| r.id).collect();

        // Recuperado: estava no estado, não caiu agora e a API diz Up.
        // Devolve o último snapshot em queda para o cálculo do tempo fora.
        let recovered: Vec<SensorRecord> = records
            .iter()
            .filter(|r| !r.is_down && !down_ids.contains(&r.id))
            .filter_map(|r| self.down.get(&r.id).cloned())
            .collect();

        for record in &currently_down {
            if self.down.insert(record.id, record.clone()).is_none() {
                info!("Sensor {} ({}) entrou em queda: {}", record.id, record.device, record.status);
            }
        }
        for record in &recovered {
            self.down.remove(&record.id);
            info!("Sensor {} ({}) voltou a responder", record.id, record.device);
        }

        debug!(
            "Em queda no ciclo: {:?}, recuperados: {:?}, estado: {:?}",
            down_ids,
            recovered.iter().map(|r| r.id).collect::<Vec<_>>(),
            self.down.keys().collect::<Vec<_>>()
        );

        TransitionResult {
            currently_down,
            recovered,
            still_alerting: self.down.len(),
        }
    }

    pub fn down_ids(&self) -> HashSet<i64> {
        self.down.keys().copied().collect()
    }
}
