//! Representacion de una orden de bebida y su ciclo de vida.
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PREP_TIME_MINUTES;

/// Tabla fija de bebida a minutos de preparacion.
const PREP_TIME_BY_DRINK: [(&str, i64); 7] = [
    ("Cold Brew", 1),
    ("Espresso", 2),
    ("Americano", 2),
    ("Cappuccino", 4),
    ("Latte", 4),
    ("Specialty", 6),
    ("Mocha", 6),
];

/// Estado de una orden. Las transiciones son solo hacia adelante:
/// Waiting -> InProgress -> Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Waiting,
    InProgress,
    Completed,
}

/// Una orden de bebida. El puntaje de prioridad se recalcula en cada pasada
/// del scheduler; el contador de salteos solo crece mientras la orden espera.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub drink_type: String,
    pub prep_time: i64,
    pub arrival_time: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub loyalty_customer: bool,
    pub rush_order: bool,
    pub priority_score: f64,
    pub status: OrderStatus,
    pub skipped_by_later_count: u32,
    pub assigned_barista_id: Option<u64>,
    pub started_at: Option<i64>,
    pub completed_at: Option<i64>,
}

impl Order {
    /// Crea una orden en espera. El tiempo de preparacion queda fijo segun
    /// la tabla de bebidas (4 minutos si la bebida no figura).
    pub fn new(
        drink_type: &str,
        customer_name: &str,
        customer_phone: &str,
        loyalty_customer: bool,
        rush_order: bool,
        arrival_time: i64,
    ) -> Order {
        Order {
            id: 0,
            drink_type: String::from(drink_type),
            prep_time: prep_time_for_drink(drink_type),
            arrival_time,
            customer_name: String::from(customer_name),
            customer_phone: String::from(customer_phone),
            loyalty_customer,
            rush_order,
            priority_score: 0.0,
            status: OrderStatus::Waiting,
            skipped_by_later_count: 0,
            assigned_barista_id: None,
            started_at: None,
            completed_at: None,
        }
    }
}

/// Busca los minutos de preparacion de una bebida en la tabla fija.
pub fn prep_time_for_drink(drink_type: &str) -> i64 {
    PREP_TIME_BY_DRINK
        .iter()
        .find(|(name, _)| *name == drink_type)
        .map(|(_, minutes)| *minutes)
        .unwrap_or(DEFAULT_PREP_TIME_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_a_waiting_order_with_prep_time_from_the_table() {
        let order = Order::new("Espresso", "Ana", "555-0101", false, false, 1000);
        assert_eq!(OrderStatus::Waiting, order.status);
        assert_eq!(2, order.prep_time);
        assert_eq!(0.0, order.priority_score);
        assert_eq!(None, order.assigned_barista_id);
        assert_eq!(None, order.started_at);
    }

    #[test]
    fn should_default_to_four_minutes_for_unknown_drinks() {
        assert_eq!(4, prep_time_for_drink("Butterbeer"));
    }

    #[test]
    fn should_map_known_drinks() {
        assert_eq!(1, prep_time_for_drink("Cold Brew"));
        assert_eq!(6, prep_time_for_drink("Mocha"));
    }
}
