//! Scheduler de despacho. Asigna ordenes en espera a baristas disponibles
//! priorizando por puntaje, con balanceo de carga y salto de emergencia.
use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

use log::{debug, info};

use crate::barista::Barista;
use crate::clock::{minutes_between, now_epoch_secs};
use crate::constants::{
    COMPLEX_PREP_MINUTES, EMERGENCY_WAIT_MINUTES, FAIRNESS_SKIP_THRESHOLD, OVERLOADED_RATIO,
    QUICK_PREP_MINUTES, UNDERUTILIZED_RATIO,
};
use crate::errors::CoffeeShopError;
use crate::order::{Order, OrderStatus};
use crate::priority;
use crate::store::{BaristaStore, OrderStore};

/// Umbrales de la heuristica de seleccion. Los valores por defecto son los
/// de `constants`.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub overloaded_ratio: f64,
    pub underutilized_ratio: f64,
    pub fairness_skip_threshold: u32,
    pub emergency_wait_minutes: i64,
    pub quick_prep_minutes: i64,
    pub complex_prep_minutes: i64,
}

impl Default for SchedulerConfig {
    fn default() -> SchedulerConfig {
        SchedulerConfig {
            overloaded_ratio: OVERLOADED_RATIO,
            underutilized_ratio: UNDERUTILIZED_RATIO,
            fairness_skip_threshold: FAIRNESS_SKIP_THRESHOLD,
            emergency_wait_minutes: EMERGENCY_WAIT_MINUTES,
            quick_prep_minutes: QUICK_PREP_MINUTES,
            complex_prep_minutes: COMPLEX_PREP_MINUTES,
        }
    }
}

/// Scheduler de asignacion. Cada pasada corre bajo el lock de pasadas, asi
/// dos disparadores concurrentes (timer, alta de orden, barrido) nunca
/// asignan dos veces el mismo barista ni la misma orden.
pub struct DispatchScheduler {
    orders: Arc<dyn OrderStore>,
    baristas: Arc<dyn BaristaStore>,
    config: SchedulerConfig,
    pass_lock: Arc<Mutex<()>>,
}

impl DispatchScheduler {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        baristas: Arc<dyn BaristaStore>,
        config: SchedulerConfig,
        pass_lock: Arc<Mutex<()>>,
    ) -> DispatchScheduler {
        DispatchScheduler {
            orders,
            baristas,
            config,
            pass_lock,
        }
    }

    /// Ejecuta una pasada de asignacion sobre el estado actual del store.
    /// A lo sumo una orden por barista disponible por pasada.
    pub fn assign_orders(&self) -> Result<(), CoffeeShopError> {
        let _pass = self.pass_lock.lock()?;
        self.run_pass(now_epoch_secs())
    }

    fn run_pass(&self, now: i64) -> Result<(), CoffeeShopError> {
        let mut waiting = self
            .orders
            .find_by_status_order_by_arrival(OrderStatus::Waiting)?;
        let baristas = self.baristas.find_all()?;
        if waiting.is_empty() || baristas.is_empty() {
            return Ok(());
        }

        for order in waiting.iter_mut() {
            order.priority_score = priority::score(order, now, self.config.fairness_skip_threshold);
        }
        waiting.sort_by(|a, b| {
            b.priority_score
                .partial_cmp(&a.priority_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.arrival_time.cmp(&b.arrival_time))
                .then_with(|| a.id.cmp(&b.id))
        });

        let average_workload = baristas
            .iter()
            .map(|barista| barista.workload_minutes)
            .sum::<i64>() as f64
            / baristas.len() as f64;

        for mut barista in baristas {
            if !barista.available || waiting.is_empty() {
                continue;
            }

            let selected = self
                .emergency_index(&waiting, now)
                .unwrap_or_else(|| self.index_for_barista(&barista, &waiting, average_workload));
            let mut order = waiting.remove(selected);

            order.status = OrderStatus::InProgress;
            order.assigned_barista_id = Some(barista.id);
            order.started_at = Some(now);

            barista.available = false;
            barista.current_order_id = Some(order.id);
            barista.workload_minutes += order.prep_time;

            self.increment_fairness_skips(&mut waiting, &order)?;

            info!(
                "[SCHEDULER] Assigned order {} ({}) to barista {} with score {}",
                order.id, order.drink_type, barista.name, order.priority_score
            );
            self.orders.save(order)?;
            self.baristas.save(barista)?;
        }
        Ok(())
    }

    /// Primera orden (en el orden de prioridad) que espera hace demasiado.
    /// Saltea todas las reglas de balanceo.
    fn emergency_index(&self, waiting: &[Order], now: i64) -> Option<usize> {
        waiting.iter().position(|order| {
            minutes_between(order.arrival_time, now) >= self.config.emergency_wait_minutes
        })
    }

    /// Seleccion por balanceo de carga: un barista sobrecargado prefiere
    /// ordenes rapidas y uno subutilizado ordenes complejas. Si no hay
    /// candidata, o la carga promedio es cero, gana la de mayor puntaje.
    fn index_for_barista(
        &self,
        barista: &Barista,
        waiting: &[Order],
        average_workload: f64,
    ) -> usize {
        if average_workload <= 0.0 {
            return 0;
        }
        let ratio = barista.workload_minutes as f64 / average_workload;
        debug!(
            "[SCHEDULER] Barista {} workload ratio {:.2}",
            barista.name, ratio
        );
        if ratio > self.config.overloaded_ratio {
            if let Some(index) = waiting
                .iter()
                .position(|order| order.prep_time <= self.config.quick_prep_minutes)
            {
                return index;
            }
        } else if ratio < self.config.underutilized_ratio {
            if let Some(index) = waiting
                .iter()
                .position(|order| order.prep_time >= self.config.complex_prep_minutes)
            {
                return index;
            }
        }
        0
    }

    /// Toda orden que llego antes que la servida y sigue esperando fue
    /// salteada por una posterior: sube su contador de equidad.
    fn increment_fairness_skips(
        &self,
        waiting: &mut Vec<Order>,
        served: &Order,
    ) -> Result<(), CoffeeShopError> {
        for order in waiting.iter_mut() {
            if order.arrival_time < served.arrival_time {
                order.skipped_by_later_count += 1;
            }
        }
        self.orders.save_all(waiting.clone())
    }
}
