//! Impresion periodica del estado de la cafeteria.
use std::sync::Arc;
use std::time::Duration;

use crate::constants::STATISTICS_WAIT_IN_MS;
use crate::errors::CoffeeShopError;
use crate::order::OrderStatus;
use crate::shutdown::Shutdown;
use crate::store::{BaristaStore, OrderStore};

pub struct StatisticsPrinter {
    orders: Arc<dyn OrderStore>,
    baristas: Arc<dyn BaristaStore>,
    shutdown: Arc<Shutdown>,
}

impl StatisticsPrinter {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        baristas: Arc<dyn BaristaStore>,
        shutdown: Arc<Shutdown>,
    ) -> StatisticsPrinter {
        StatisticsPrinter {
            orders,
            baristas,
            shutdown,
        }
    }

    pub fn process_statistics(&self) -> Result<(), CoffeeShopError> {
        loop {
            self.print_statistics()?;

            if self
                .shutdown
                .wait_timeout(Duration::from_millis(STATISTICS_WAIT_IN_MS))
            {
                self.print_statistics()?;
                return Ok(());
            }
        }
    }

    fn print_statistics(&self) -> Result<(), CoffeeShopError> {
        let waiting = self.orders.find_by_status(OrderStatus::Waiting)?.len();
        let in_progress = self.orders.find_by_status(OrderStatus::InProgress)?.len();
        let completed = self.orders.find_by_status(OrderStatus::Completed)?.len();

        let mut statistics = format!(
            "[STATISTICS] Orders waiting={} in_progress={} completed={} | Barista=(available, workload) |",
            waiting, in_progress, completed
        );
        for barista in self.baristas.find_all()? {
            statistics.push_str(&format!(
                " {}=({},{}) ",
                barista.name, barista.available, barista.workload_minutes
            ));
        }
        println!("{}", statistics);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Order;
    use crate::store::{MemoryBaristaStore, MemoryOrderStore};

    #[test]
    fn should_stop_once_the_shutdown_signal_fires() {
        let orders = Arc::new(MemoryOrderStore::new());
        orders
            .save(Order::new("Latte", "Cliente", "555-0000", false, false, 0))
            .unwrap();
        let shutdown = Arc::new(Shutdown::new());
        let printer =
            StatisticsPrinter::new(orders, Arc::new(MemoryBaristaStore::new()), shutdown.clone());
        shutdown.stop();
        assert_eq!(Ok(()), printer.process_statistics());
    }
}
