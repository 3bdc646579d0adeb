// src/scheduler.rs

use crate::notifier::Notifier;
use crate::source::SensorSource;
use crate::tracker::TransitionTracker;
use crate::{compose, normalize};
use chrono::Local;
use std::collections::HashSet;
use std::{time::Duration, time::Instant};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// Estados do scheduler: esperando o intervalo ou executando um ciclo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchedulerState {
    Idle,
    Polling,
}

/// Resumo de um ciclo, usado para log e testes.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub composed: usize,
    pub delivered: usize,
}

/// Executa um único ciclo: busca → normaliza → reclassifica → compõe → envia.
///
/// Falha na busca aborta o ciclo sem tocar no estado. Falha ao enviar uma
/// mensagem não impede o envio das seguintes.
pub async fn run_cycle(
    source: &dyn SensorSource,
    notifier: &dyn Notifier,
    tracker: &mut TransitionTracker,
    targets: &HashSet<i64>,
    cycle_number: u64,
) -> CycleReport {
    if targets.is_empty() {
        warn!("[CICLO {}] Nenhum sensor monitorado. Ciclo ignorado.", cycle_number);
        return CycleReport::default();
    }

    let raws = match source.fetch().await {
        Ok(raws) => raws,
        Err(e) => {
            error!("[CICLO {}] {}", cycle_number, e);
            return CycleReport::default();
        }
    };
    debug!("[CICLO {}] {} registros recebidos do PRTG.", cycle_number, raws.len());

    let records = normalize::normalize_all(&raws);
    let result = tracker.reclassify(&records, targets);
    let messages = compose::compose(&result, Local::now());

    info!(
        "[CICLO {}] Em queda: {}, recuperados: {}, em alerta: {:?}, mensagens: {}",
        cycle_number,
        result.currently_down.len(),
        result.recovered.len(),
        tracker.down_ids(),
        messages.len()
    );

    let mut delivered = 0;
    for message in &messages {
        match notifier.send(message).await {
            Ok(()) => delivered += 1,
            Err(e) => error!("[CICLO {}] {}", cycle_number, e),
        }
    }

    CycleReport {
        composed: messages.len(),
        delivered,
    }
}

/// Loop principal: busca, processa, envia, dorme `cycle_interval`, repete.
///
/// A espera conta a partir do fim do ciclo anterior; o primeiro ciclo é imediato.
pub async fn run_scheduler(
    source: &dyn SensorSource,
    notifier: &dyn Notifier,
    targets: HashSet<i64>,
    cycle_interval: Duration,
) {
    let mut tracker = TransitionTracker::new();
    let mut state = SchedulerState::Polling;
    let mut cycle_number: u64 = 0;

    loop {
        match state {
            SchedulerState::Idle => {
                sleep(cycle_interval).await;
                state = SchedulerState::Polling;
            }
            SchedulerState::Polling => {
                cycle_number += 1;
                let cycle_start = Instant::now();
                info!("[CICLO {}] Iniciando ciclo em {}.", cycle_number, Local::now());

                let report = run_cycle(source, notifier, &mut tracker, &targets, cycle_number).await;

                info!(
                    "[CICLO {}] Fim do ciclo. {}/{} mensagens entregues. Duração: {:?}",
                    cycle_number,
                    report.delivered,
                    report.composed,
                    cycle_start.elapsed()
                );
                state = SchedulerState::Idle;
            }
        }
    }
}
