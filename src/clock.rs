//! Tiempo del sistema en segundos epoch. Los calculos del scheduler trabajan
//! en minutos enteros.
use std::time::{SystemTime, UNIX_EPOCH};

/// Segundos en un minuto.
pub const MINUTE_SECS: i64 = 60;

/// Segundos en un dia.
pub const DAY_SECS: i64 = 24 * 60 * MINUTE_SECS;

/// Devuelve el instante actual en segundos desde epoch.
pub fn now_epoch_secs() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs() as i64,
        Err(_) => 0,
    }
}

/// Minutos enteros transcurridos entre dos instantes (trunca hacia cero).
pub fn minutes_between(from_secs: i64, to_secs: i64) -> i64 {
    (to_secs - from_secs) / MINUTE_SECS
}
