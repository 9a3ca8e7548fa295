//! Representacion de un barista de la cafeteria.
use serde::{Deserialize, Serialize};

/// Un barista. Esta disponible si y solo si no tiene orden en curso.
/// Los minutos de carga acumulada nunca se descuentan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barista {
    pub id: u64,
    pub name: String,
    pub available: bool,
    pub workload_minutes: i64,
    pub current_order_id: Option<u64>,
}

impl Barista {
    pub fn new(name: &str) -> Barista {
        Barista {
            id: 0,
            name: String::from(name),
            available: true,
            workload_minutes: 0,
            current_order_id: None,
        }
    }
}
