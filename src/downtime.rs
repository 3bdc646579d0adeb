//! downtime.rs — Extração do "last up" do PRTG e cálculo do tempo fora do ar

use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, TimeZone};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

pub const UNKNOWN: &str = "Unknown";
pub const UNKNOWN_DURATION: &str = "(Unknown)";

const LAST_UP_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

fn last_up_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\d{1,2}/\d{1,2}/\d{4} \d{1,2}:\d{2}:\d{2} (?:AM|PM)")
            .expect("regex de last up é constante")
    })
}

/// Formata a duração como `(D days, H hours, M minutes)`, truncando cada unidade.
/// Durações negativas (relógio adiantado no PRTG) viram `(Unknown)`.
pub fn format_downtime(elapsed: TimeDelta) -> String {
    let total = elapsed.num_seconds();
    if total < 0 {
        return UNKNOWN_DURATION.to_string();
    }
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    format!("({} days, {} hours, {} minutes)", days, hours, minutes)
}

/// Localiza o carimbo `M/D/YYYY H:MM:SS AM|PM` no texto e devolve
/// `"<carimbo> (<duração desde então>)"`, ou `Unknown` se não houver.
pub fn describe_last_up(last_up: &str, now: DateTime<Local>) -> String {
    let Some(found) = last_up_pattern().find(last_up) else {
        return UNKNOWN.to_string();
    };
    let stamp = found.as_str();

    let parsed = NaiveDateTime::parse_from_str(stamp, LAST_UP_FORMAT)
        .ok()
        .and_then(|naive| Local.from_local_datetime(&naive).earliest());

    match parsed {
        Some(last_up_time) => format!("{} {}", stamp, format_downtime(now - last_up_time)),
        None => {
            debug!("Carimbo de last up não interpretável: {:?}", stamp);
            UNKNOWN.to_string()
        }
    }
}
