//! Orquestacion de la cafeteria. Es dueña de los stores, del scheduler y
//! del barrido, y maneja el ciclo de vida de los hilos periodicos.
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{error, info};
use serde::Deserialize;

use crate::barista::Barista;
use crate::clock::now_epoch_secs;
use crate::constants::{DISPATCH_INTERVAL_MS, SWEEP_INTERVAL_MS};
use crate::errors::CoffeeShopError;
use crate::order::{Order, OrderStatus};
use crate::orders_reader::read_and_place_orders;
use crate::scheduler::{DispatchScheduler, SchedulerConfig};
use crate::shutdown::Shutdown;
use crate::statistics::StatisticsPrinter;
use crate::store::{BaristaStore, OrderStore};
use crate::sweeper::CompletionSweeper;

/// Pedido de alta de orden, tal como llega de afuera.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRequest {
    pub drink_type: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub loyalty_customer: bool,
    pub rush_order: bool,
}

pub struct CoffeeShop {
    orders: Arc<dyn OrderStore>,
    baristas: Arc<dyn BaristaStore>,
    scheduler: Arc<DispatchScheduler>,
    sweeper: Arc<CompletionSweeper>,
    shutdown: Arc<Shutdown>,
}

impl CoffeeShop {
    pub fn new(orders: Arc<dyn OrderStore>, baristas: Arc<dyn BaristaStore>) -> CoffeeShop {
        let pass_lock = Arc::new(Mutex::new(()));
        let scheduler = Arc::new(DispatchScheduler::new(
            orders.clone(),
            baristas.clone(),
            SchedulerConfig::default(),
            pass_lock.clone(),
        ));
        let sweeper = Arc::new(CompletionSweeper::new(
            orders.clone(),
            baristas.clone(),
            scheduler.clone(),
            pass_lock,
        ));
        CoffeeShop {
            orders,
            baristas,
            scheduler,
            sweeper,
            shutdown: Arc::new(Shutdown::new()),
        }
    }

    /// Crea el plantel inicial de baristas. Si ya hay baristas cargados
    /// devuelve los existentes sin crear nuevos.
    pub fn seed_baristas(&self, names: &[&str]) -> Result<Vec<Barista>, CoffeeShopError> {
        let existing = self.baristas.find_all()?;
        if !existing.is_empty() {
            return Ok(existing);
        }
        let mut created = Vec::with_capacity(names.len());
        for name in names {
            created.push(self.baristas.save(Barista::new(name))?);
        }
        Ok(created)
    }

    /// Alta de una orden: queda en espera con su tiempo de preparacion de
    /// la tabla de bebidas y dispara una pasada de asignacion sincronica.
    pub fn place_order(&self, request: &OrderRequest) -> Result<Order, CoffeeShopError> {
        let order = Order::new(
            &request.drink_type,
            &request.customer_name,
            &request.customer_phone,
            request.loyalty_customer,
            request.rush_order,
            now_epoch_secs(),
        );
        let saved = self.orders.save(order)?;
        info!(
            "[SHOP] Placed order {} ({}) for {}",
            saved.id, saved.drink_type, saved.customer_name
        );
        self.scheduler.assign_orders()?;
        Ok(saved)
    }

    /// Completa una orden por pedido externo directo, libera a su barista
    /// si se lo encuentra y dispara una pasada de asignacion.
    pub fn complete_order(&self, id: u64) -> Result<Order, CoffeeShopError> {
        let mut order = self
            .orders
            .find_by_id(id)?
            .ok_or(CoffeeShopError::OrderNotFound)?;

        order.status = OrderStatus::Completed;
        order.completed_at = Some(now_epoch_secs());

        if let Some(barista_id) = order.assigned_barista_id {
            if let Some(mut barista) = self.baristas.find_by_id(barista_id)? {
                barista.available = true;
                barista.current_order_id = None;
                self.baristas.save(barista)?;
            }
        }

        let saved = self.orders.save(order)?;
        self.scheduler.assign_orders()?;
        Ok(saved)
    }

    pub fn orders_by_status(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, CoffeeShopError> {
        match status {
            Some(status) => self.orders.find_by_status(status),
            None => self.orders.find_all(),
        }
    }

    /// Lanza los hilos periodicos: tick de asignacion, barrido de ordenes
    /// terminadas y estadisticas. Devuelve los handles para el join.
    pub fn start(&self) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::new();

        let scheduler = self.scheduler.clone();
        let shutdown = self.shutdown.clone();
        handles.push(thread::spawn(move || {
            while !shutdown.wait_timeout(Duration::from_millis(DISPATCH_INTERVAL_MS)) {
                if let Err(dispatch_error) = scheduler.assign_orders() {
                    error!("[SHOP] Dispatch pass failed: {:?}", dispatch_error);
                }
            }
        }));

        let sweeper = self.sweeper.clone();
        let shutdown = self.shutdown.clone();
        handles.push(thread::spawn(move || {
            while !shutdown.wait_timeout(Duration::from_millis(SWEEP_INTERVAL_MS)) {
                if let Err(sweep_error) = sweeper.complete_finished_orders() {
                    error!("[SHOP] Completion sweep failed: {:?}", sweep_error);
                }
            }
        }));

        let printer = StatisticsPrinter::new(
            self.orders.clone(),
            self.baristas.clone(),
            self.shutdown.clone(),
        );
        handles.push(thread::spawn(move || {
            if let Err(statistics_error) = printer.process_statistics() {
                error!("[SHOP] Statistics printer failed: {:?}", statistics_error);
            }
        }));

        handles
    }

    pub fn stop(&self) {
        self.shutdown.stop();
    }

    /// Demo de punta a punta: siembra el plantel, ingresa las ordenes del
    /// archivo y corre los ticks hasta que no quede nada pendiente.
    pub fn run(&self, orders_file: &str, roster: &[&str]) -> Result<(), CoffeeShopError> {
        self.seed_baristas(roster)?;
        let placed = read_and_place_orders(self, orders_file)?;
        info!("[SHOP] Placed {} orders from {}", placed, orders_file);

        let handles = self.start();
        while !self.shutdown.wait_timeout(Duration::from_millis(1000)) {
            if self.pending_orders()? == 0 {
                info!("[SHOP] All orders completed");
                self.stop();
            }
        }
        for handle in handles {
            handle.join().expect("Error en join");
        }
        Ok(())
    }

    fn pending_orders(&self) -> Result<usize, CoffeeShopError> {
        let waiting = self.orders.find_by_status(OrderStatus::Waiting)?.len();
        let in_progress = self.orders.find_by_status(OrderStatus::InProgress)?.len();
        Ok(waiting + in_progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryBaristaStore, MemoryOrderStore};

    struct Fixture {
        orders: Arc<MemoryOrderStore>,
        baristas: Arc<MemoryBaristaStore>,
        shop: CoffeeShop,
    }

    fn fixture() -> Fixture {
        let orders = Arc::new(MemoryOrderStore::new());
        let baristas = Arc::new(MemoryBaristaStore::new());
        let shop = CoffeeShop::new(orders.clone(), baristas.clone());
        Fixture {
            orders,
            baristas,
            shop,
        }
    }

    fn request(drink: &str) -> OrderRequest {
        OrderRequest {
            drink_type: String::from(drink),
            customer_name: String::from("Cliente"),
            customer_phone: String::from("555-0000"),
            loyalty_customer: false,
            rush_order: false,
        }
    }

    #[test]
    fn should_seed_the_roster_only_once() {
        let fixture = fixture();
        let created = fixture.shop.seed_baristas(&["Emma", "Liam"]).unwrap();
        assert_eq!(2, created.len());
        let again = fixture.shop.seed_baristas(&["Sophia"]).unwrap();
        assert_eq!(2, again.len());
        assert_eq!(2, fixture.baristas.find_all().unwrap().len());
    }

    #[test]
    fn should_assign_a_placed_order_when_a_barista_is_free() {
        let fixture = fixture();
        fixture.shop.seed_baristas(&["Emma"]).unwrap();
        let placed = fixture.shop.place_order(&request("Espresso")).unwrap();

        let order = fixture.orders.find_by_id(placed.id).unwrap().unwrap();
        assert_eq!(OrderStatus::InProgress, order.status);
        assert_eq!(2, order.prep_time);

        let barista = fixture.baristas.find_all().unwrap().remove(0);
        assert_eq!(false, barista.available);
        assert_eq!(Some(placed.id), barista.current_order_id);
    }

    #[test]
    fn should_leave_an_order_waiting_without_baristas() {
        let fixture = fixture();
        let placed = fixture.shop.place_order(&request("Latte")).unwrap();
        let order = fixture.orders.find_by_id(placed.id).unwrap().unwrap();
        assert_eq!(OrderStatus::Waiting, order.status);
    }

    #[test]
    fn should_complete_an_order_on_external_request_and_reassign() {
        let fixture = fixture();
        fixture.shop.seed_baristas(&["Emma"]).unwrap();
        let first = fixture.shop.place_order(&request("Mocha")).unwrap();
        let second = fixture.shop.place_order(&request("Latte")).unwrap();

        let completed = fixture.shop.complete_order(first.id).unwrap();
        assert_eq!(OrderStatus::Completed, completed.status);
        assert!(completed.completed_at.is_some());

        // El barista liberado toma la orden que esperaba.
        let reassigned = fixture.orders.find_by_id(second.id).unwrap().unwrap();
        assert_eq!(OrderStatus::InProgress, reassigned.status);
    }

    #[test]
    fn should_fail_to_complete_an_unknown_order() {
        let fixture = fixture();
        assert_eq!(
            Err(CoffeeShopError::OrderNotFound),
            fixture.shop.complete_order(42).map(|order| order.id)
        );
    }

    #[test]
    fn should_filter_orders_by_status() {
        let fixture = fixture();
        fixture.shop.seed_baristas(&["Emma"]).unwrap();
        fixture.shop.place_order(&request("Mocha")).unwrap();
        fixture.shop.place_order(&request("Latte")).unwrap();

        let waiting = fixture
            .shop
            .orders_by_status(Some(OrderStatus::Waiting))
            .unwrap();
        assert_eq!(1, waiting.len());
        let all = fixture.shop.orders_by_status(None).unwrap();
        assert_eq!(2, all.len());
    }

    #[test]
    fn should_stop_the_periodic_threads() {
        let fixture = fixture();
        let handles = fixture.shop.start();
        fixture.shop.stop();
        for handle in handles {
            handle.join().expect("Error en join");
        }
    }
}
