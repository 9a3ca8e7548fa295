//! Puntaje de prioridad de una orden en espera. Funcion pura: depende solo
//! de la orden y del instante que se le pasa.
use crate::clock::minutes_between;
use crate::order::Order;

/// Calcula el puntaje de una orden (mas alto = mas urgente).
///
/// Las bebidas rapidas puntuan mas alto en complejidad: conviene despachar
/// lo que sale rapido. El resultado no se recorta, puede ser negativo para
/// ordenes rapidas, recientes y muchas veces servidas antes que otras.
pub fn score(order: &Order, now_secs: i64, fairness_skip_threshold: u32) -> f64 {
    let wait_minutes = minutes_between(order.arrival_time, now_secs);

    let wait_score = (wait_minutes * 4).min(40) as f64;
    let complexity_score = ((6 - order.prep_time) * 4) as f64;
    let loyalty_score = if order.loyalty_customer { 10.0 } else { 0.0 };
    let urgency_score = if wait_minutes >= 8 {
        25.0
    } else {
        (wait_minutes * 3) as f64
    };
    let emergency_boost = if wait_minutes >= 8 { 50.0 } else { 0.0 };
    let fairness_penalty = if order.skipped_by_later_count > fairness_skip_threshold {
        15.0
    } else {
        0.0
    };
    let rush_score = if order.rush_order { 5.0 } else { 0.0 };

    wait_score + complexity_score + loyalty_score + urgency_score + emergency_boost + rush_score
        - fairness_penalty
}
