//! Simulador de agenda para analitica. Genera cargas sinteticas y las
//! reproduce en un scheduler de eventos discretos, una cola por barista.
//! No comparte estado con el motor en vivo.
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use serde::Serialize;

use crate::clock::{minutes_between, now_epoch_secs, DAY_SECS, MINUTE_SECS};
use crate::constants::MAX_TEST_CASES;

/// Catalogo fijo de bebidas con su rango de preparacion en minutos.
const DRINK_PROFILES: [(&str, i64, i64); 6] = [
    ("Cold Brew", 2, 5),
    ("Espresso", 1, 4),
    ("Americano", 2, 5),
    ("Cappuccino", 3, 6),
    ("Latte", 3, 7),
    ("Mocha", 4, 8),
];

/// Plantel fijo de baristas simulados.
const BARISTA_ROSTER: [&str; 5] = ["Ava", "Noah", "Maya", "Ethan", "Ivy"];

/// Orden sintetica a simular.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    pub order_id: String,
    pub customer_name: String,
    pub drink_type: String,
    pub barista: String,
    pub arrival_time: i64,
    pub priority: i64,
    pub prep_time: i64,
}

/// Resultado simulado de una orden, listo para mostrar en la analitica.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulatedOrder {
    pub order_id: String,
    pub customer_name: String,
    pub drink_type: String,
    pub barista: String,
    pub arrival_time: i64,
    pub priority: i64,
    pub prep_time: i64,
    pub start_time: i64,
    pub completion_time: i64,
    pub waiting_minutes: i64,
    pub turnaround_minutes: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestCase {
    pub id: String,
    pub label: String,
    pub orders: Vec<SimulatedOrder>,
    pub average_waiting_minutes: f64,
    pub average_turnaround_minutes: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub cases: Vec<TestCase>,
}

/// Entrada de la cola de listas. El heap es de maximos: gana la prioridad
/// mas alta, luego la llegada mas temprana, luego el id menor.
#[derive(Debug, Clone)]
struct ReadySpec(OrderSpec);

impl Ord for ReadySpec {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .priority
            .cmp(&other.0.priority)
            .then_with(|| other.0.arrival_time.cmp(&self.0.arrival_time))
            .then_with(|| other.0.order_id.cmp(&self.0.order_id))
    }
}

impl PartialOrd for ReadySpec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ReadySpec {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ReadySpec {}

pub struct SimulationEngine;

impl SimulationEngine {
    pub fn new() -> SimulationEngine {
        SimulationEngine
    }

    /// Genera casos de prueba etiquetados. La cantidad se recorta a
    /// [1, MAX_TEST_CASES]; min_orders a por lo menos 1; max_orders a por
    /// lo menos min_orders. El caso mas viejo queda `cantidad - 1` dias
    /// atras.
    pub fn generate_test_cases(
        &self,
        test_case_count: usize,
        min_orders: usize,
        max_orders: usize,
    ) -> AnalyticsReport {
        let safe_cases = test_case_count.max(1).min(MAX_TEST_CASES);
        let safe_min = min_orders.max(1);
        let safe_max = max_orders.max(safe_min);

        let now = now_epoch_secs();
        let mut rng = thread_rng();
        let mut cases = Vec::with_capacity(safe_cases);

        for case_index in 0..safe_cases {
            let order_count = rng.gen_range(safe_min, safe_max + 1);
            let base_date = now - ((safe_cases - 1 - case_index) as i64) * DAY_SECS;
            let specs = build_order_specs(&mut rng, order_count, base_date, case_index);
            let (orders, average_waiting, average_turnaround) = simulate_schedule(&specs);
            cases.push(TestCase {
                id: format!("case-{}", case_index + 1),
                label: format!("Test Case {}", case_index + 1),
                orders,
                average_waiting_minutes: average_waiting,
                average_turnaround_minutes: average_turnaround,
            });
        }

        AnalyticsReport { cases }
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        SimulationEngine::new()
    }
}

fn build_order_specs(
    rng: &mut ThreadRng,
    count: usize,
    base_date: i64,
    case_index: usize,
) -> Vec<OrderSpec> {
    let mut specs = Vec::with_capacity(count);
    for index in 0..count {
        let (drink, min_wait, max_wait) = DRINK_PROFILES
            .choose(rng)
            .copied()
            .unwrap_or(DRINK_PROFILES[0]);
        let barista = BARISTA_ROSTER.choose(rng).copied().unwrap_or(BARISTA_ROSTER[0]);
        let offset_minutes = rng.gen_range(0, 361);
        specs.push(OrderSpec {
            order_id: format!("TC{}-{:03}", case_index + 1, index + 1),
            customer_name: format!("Customer {}", index + 1),
            drink_type: String::from(drink),
            barista: String::from(barista),
            arrival_time: base_date + offset_minutes * MINUTE_SECS,
            priority: rng.gen_range(1, 6),
            prep_time: build_prep_time(rng, min_wait, max_wait),
        });
    }
    specs.sort_by(|a, b| {
        a.arrival_time
            .cmp(&b.arrival_time)
            .then_with(|| a.order_id.cmp(&b.order_id))
    });
    specs
}

/// Preparacion = base uniforme del rango de la bebida + colchon de hasta 2
/// minutos, con un 3% de chances de un sobrecosto de 1 a 3. Piso de 1.
fn build_prep_time(rng: &mut ThreadRng, min_wait: i64, max_wait: i64) -> i64 {
    let base = rng.gen_range(min_wait, max_wait + 1);
    let buffer = rng.gen_range(0, 3);
    let mut minutes = base + buffer;
    if rng.gen_range(0, 100) < 3 {
        minutes += rng.gen_range(1, 4);
    }
    minutes.max(1)
}

/// Simula el conjunto completo: una cola independiente por barista, luego
/// junta todo ordenado por llegada y promedia esperas y turnaround.
fn simulate_schedule(specs: &[OrderSpec]) -> (Vec<SimulatedOrder>, f64, f64) {
    let mut by_barista: BTreeMap<&str, Vec<OrderSpec>> = BTreeMap::new();
    for spec in specs {
        by_barista
            .entry(spec.barista.as_str())
            .or_insert_with(Vec::new)
            .push(spec.clone());
    }

    let mut scheduled = Vec::with_capacity(specs.len());
    for (_, barista_orders) in by_barista {
        scheduled.extend(simulate_barista_queue(&barista_orders));
    }

    let total_waiting: i64 = scheduled.iter().map(|order| order.waiting_minutes).sum();
    let total_turnaround: i64 = scheduled.iter().map(|order| order.turnaround_minutes).sum();
    let (average_waiting, average_turnaround) = if scheduled.is_empty() {
        (0.0, 0.0)
    } else {
        (
            total_waiting as f64 / scheduled.len() as f64,
            total_turnaround as f64 / scheduled.len() as f64,
        )
    };

    scheduled.sort_by(|a, b| {
        a.arrival_time
            .cmp(&b.arrival_time)
            .then_with(|| a.order_id.cmp(&b.order_id))
    });
    (scheduled, average_waiting, average_turnaround)
}

/// Cola de un solo servidor por eventos discretos. Determinista para una
/// misma entrada: el reloj avanza de terminacion en terminacion y la cola
/// de listas desempata por prioridad, llegada e id.
pub fn simulate_barista_queue(specs: &[OrderSpec]) -> Vec<SimulatedOrder> {
    let mut ordered: Vec<OrderSpec> = specs.to_vec();
    ordered.sort_by(|a, b| {
        a.arrival_time
            .cmp(&b.arrival_time)
            .then_with(|| a.order_id.cmp(&b.order_id))
    });

    let mut ready: BinaryHeap<ReadySpec> = BinaryHeap::new();
    let mut scheduled = Vec::with_capacity(ordered.len());
    let mut index = 0;
    let mut clock = match ordered.first() {
        Some(first) => first.arrival_time,
        None => return scheduled,
    };

    while index < ordered.len() || !ready.is_empty() {
        while index < ordered.len() && ordered[index].arrival_time <= clock {
            ready.push(ReadySpec(ordered[index].clone()));
            index += 1;
        }

        let next = match ready.pop() {
            Some(ReadySpec(next)) => next,
            None => {
                clock = ordered[index].arrival_time;
                continue;
            }
        };

        let start_time = clock.max(next.arrival_time);
        let completion_time = start_time + next.prep_time * MINUTE_SECS;
        let waiting_minutes = minutes_between(next.arrival_time, start_time);
        let turnaround_minutes = minutes_between(next.arrival_time, completion_time);

        scheduled.push(SimulatedOrder {
            order_id: next.order_id,
            customer_name: next.customer_name,
            drink_type: next.drink_type,
            barista: next.barista,
            arrival_time: next.arrival_time,
            priority: next.priority,
            prep_time: next.prep_time,
            start_time,
            completion_time,
            waiting_minutes,
            turnaround_minutes,
        });
        clock = completion_time;
    }

    scheduled
}
