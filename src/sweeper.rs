//! Barrido de ordenes terminadas. Diseño por sondeo: una orden "termina"
//! cuando un barrido observa que su tiempo de preparacion ya transcurrio.
use std::sync::{Arc, Mutex};

use log::{debug, info};

use crate::clock::{now_epoch_secs, MINUTE_SECS};
use crate::errors::CoffeeShopError;
use crate::order::OrderStatus;
use crate::scheduler::DispatchScheduler;
use crate::store::{BaristaStore, OrderStore};

pub struct CompletionSweeper {
    orders: Arc<dyn OrderStore>,
    baristas: Arc<dyn BaristaStore>,
    scheduler: Arc<DispatchScheduler>,
    pass_lock: Arc<Mutex<()>>,
}

impl CompletionSweeper {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        baristas: Arc<dyn BaristaStore>,
        scheduler: Arc<DispatchScheduler>,
        pass_lock: Arc<Mutex<()>>,
    ) -> CompletionSweeper {
        CompletionSweeper {
            orders,
            baristas,
            scheduler,
            pass_lock,
        }
    }

    /// Completa las ordenes en curso cuyo tiempo de preparacion ya paso,
    /// libera sus baristas y, si completo alguna, dispara una pasada de
    /// asignacion sin esperar al proximo tick.
    pub fn complete_finished_orders(&self) -> Result<(), CoffeeShopError> {
        let any_completed = self.sweep(now_epoch_secs())?;
        if any_completed {
            self.scheduler.assign_orders()?;
        }
        Ok(())
    }

    /// Un barrido bajo el lock de pasadas: no puede pisar la disponibilidad
    /// de un barista mientras corre una asignacion.
    fn sweep(&self, now: i64) -> Result<bool, CoffeeShopError> {
        let _pass = self.pass_lock.lock()?;
        let in_progress = self.orders.find_by_status(OrderStatus::InProgress)?;
        let mut any_completed = false;

        for mut order in in_progress {
            let started_at = match order.started_at {
                Some(started_at) => started_at,
                None => continue,
            };
            let expected_complete = started_at + order.prep_time * MINUTE_SECS;
            if now < expected_complete {
                debug!("[SWEEPER] Order {} not due yet", order.id);
                continue;
            }

            order.status = OrderStatus::Completed;
            order.completed_at = Some(now);
            any_completed = true;

            if let Some(barista_id) = order.assigned_barista_id {
                if let Some(mut barista) = self.baristas.find_by_id(barista_id)? {
                    barista.available = true;
                    barista.current_order_id = None;
                    self.baristas.save(barista)?;
                }
            }

            info!("[SWEEPER] Completed order {} ({})", order.id, order.drink_type);
            self.orders.save(order)?;
        }
        Ok(any_completed)
    }
}
