//! compose.rs — Monta os textos enviados ao chat a partir das transições do ciclo

use crate::downtime::describe_last_up;
use crate::types::{SensorRecord, TransitionResult};
use chrono::{DateTime, Local};

const DOWN_BANNER: &str = "**🚨 Attention! The following devices are down:**\n\n";
const RECOVERY_BANNER: &str = "**✅ The following devices have recovered:**\n\n";
const ALL_CLEAR: &str = "✅ **All monitored devices are functioning normally.**\n";
const SEPARATOR: &str = "**-----------------------------**\n";

fn down_entry(sensor: &SensorRecord, now: DateTime<Local>) -> String {
    let last_up = if sensor.last_up.is_empty() {
        String::new()
    } else {
        format!("**Last Up**: {}\n", describe_last_up(&sensor.last_up, now))
    };
    format!(
        "**Sensor ID**: {}\n**Device**: {}\n**Status**: {}\n{}**Message**: {}\n{}",
        sensor.id, sensor.device, sensor.status, last_up, sensor.message, SEPARATOR
    )
}

fn recovery_entry(sensor: &SensorRecord, now: DateTime<Local>) -> String {
    format!(
        "**Sensor ID**: {}\n**Device**: {}\n**Downtime**: {}\n**Status**: Responding normally\n{}",
        sensor.id,
        sensor.device,
        describe_last_up(&sensor.last_up, now),
        SEPARATOR
    )
}

/// Gera os blocos de mensagem do ciclo, na ordem: queda, recuperação, tudo ok.
///
/// O "tudo ok" sai quando nada está em queda neste ciclo e nenhum sensor
/// continua em alerta, mesmo que um bloco de recuperação também tenha saído.
pub fn compose(result: &TransitionResult, now: DateTime<Local>) -> Vec<String> {
    let mut messages = Vec::new();

    if !result.currently_down.is_empty() {
        let mut block = String::from(DOWN_BANNER);
        for sensor in &result.currently_down {
            block.push_str(&down_entry(sensor, now));
        }
        messages.push(block);
    }

    if !result.recovered.is_empty() {
        let mut block = String::from(RECOVERY_BANNER);
        for sensor in &result.recovered {
            block.push_str(&recovery_entry(sensor, now));
        }
        messages.push(block);
    }

    if result.currently_down.is_empty() && result.still_alerting == 0 {
        messages.push(ALL_CLEAR.to_string());
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, TimeZone};

    fn now() -> DateTime<Local> {
        let naive = NaiveDateTime::parse_from_str("2024-05-03 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        Local.from_local_datetime(&naive).earliest().unwrap()
    }

    fn sensor(id: i64, last_up: &str) -> SensorRecord {
        SensorRecord {
            id,
            device: "edge-router".into(),
            status: "Down".into(),
            is_down: true,
            message: "No route to host".into(),
            last_up: last_up.into(),
        }
    }

    #[test]
    fn down_block_lists_every_sensor() {
        let result = TransitionResult {
            currently_down: vec![sensor(10, "5/3/2024 10:30:00 AM"), sensor(11, "")],
            recovered: vec![],
            still_alerting: 2,
        };
        let messages = compose(&result, now());
        assert_eq!(messages.len(), 1);

        let expected = "**🚨 Attention! The following devices are down:**\n\n\
            **Sensor ID**: 10\n\
            **Device**: edge-router\n\
            **Status**: Down\n\
            **Last Up**: 5/3/2024 10:30:00 AM (0 days, 1 hours, 30 minutes)\n\
            **Message**: No route to host\n\
            **-----------------------------**\n\
            **Sensor ID**: 11\n\
            **Device**: edge-router\n\
            **Status**: Down\n\
            **Message**: No route to host\n\
            **-----------------------------**\n";
        assert_eq!(messages[0], expected);
    }

    #[test]
    fn recovery_and_all_clear_co_emit() {
        let result = TransitionResult {
            currently_down: vec![],
            recovered: vec![sensor(10, "")],
            still_alerting: 0,
        };
        let messages = compose(&result, now());
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with(RECOVERY_BANNER));
        assert!(messages[0].contains("**Downtime**: Unknown\n"));
        assert!(messages[0].contains("Responding normally"));
        assert_eq!(messages[1], ALL_CLEAR);
    }

    #[test]
    fn recovery_without_all_clear_while_others_alert() {
        let result = TransitionResult {
            currently_down: vec![],
            recovered: vec![sensor(10, "")],
            still_alerting: 1,
        };
        let messages = compose(&result, now());
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with(RECOVERY_BANNER));
    }

    #[test]
    fn quiet_cycle_is_all_clear() {
        assert_eq!(compose(&TransitionResult::default(), now()), vec![ALL_CLEAR.to_string()]);
    }

    #[test]
    fn never_emits_empty_blocks() {
        let result = TransitionResult {
            currently_down: vec![sensor(1, "")],
            recovered: vec![sensor(2, "")],
            still_alerting: 1,
        };
        let messages = compose(&result, now());
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| !m.trim().is_empty()));
        assert!(messages[0].starts_with(DOWN_BANNER));
        assert!(messages[1].starts_with(RECOVERY_BANNER));
    }

    #[test]
    fn recovery_entry_layout() {
        let entry = recovery_entry(&sensor(7, "5/3/2024 11:00:00 AM"), now());
        assert_eq!(
            entry,
            "**Sensor ID**: 7\n\
             **Device**: edge-router\n\
             **Downtime**: 5/3/2024 11:00:00 AM (0 days, 1 hours, 0 minutes)\n\
             **Status**: Responding normally\n\
             **-----------------------------**\n"
        );
    }
}
