//! Señal de apagado compartida por los hilos periodicos: ticks explicitos
//! con cancelacion en lugar de timers manejados por un framework.
use std::sync::{Condvar, Mutex};
use std::time::Duration;

use log::error;

pub struct Shutdown {
    stopped: Mutex<bool>,
    signal: Condvar,
}

impl Shutdown {
    pub fn new() -> Shutdown {
        Shutdown {
            stopped: Mutex::new(false),
            signal: Condvar::new(),
        }
    }

    pub fn stop(&self) {
        if let Ok(mut stopped) = self.stopped.lock() {
            *stopped = true;
        } else {
            error!("[SHUTDOWN] Error setting the stop flag");
        }
        self.signal.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        match self.stopped.lock() {
            Ok(stopped) => *stopped,
            Err(_) => true,
        }
    }

    /// Duerme hasta el proximo tick o hasta la señal de stop, lo que llegue
    /// primero. Devuelve true si hay que terminar.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        match self.stopped.lock() {
            Ok(stopped) => {
                match self
                    .signal
                    .wait_timeout_while(stopped, timeout, |stopped| !*stopped)
                {
                    Ok((stopped, _)) => *stopped,
                    Err(_) => true,
                }
            }
            Err(_) => true,
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Shutdown::new()
    }
}
