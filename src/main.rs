pub mod barista;
pub mod clock;
pub mod coffee_shop;
pub mod constants;
pub mod errors;
pub mod order;
pub mod orders_reader;
pub mod priority;
pub mod scheduler;
pub mod shutdown;
pub mod simulation;
pub mod statistics;
pub mod store;
pub mod sweeper;

use std::sync::Arc;

use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;

use coffee_shop::CoffeeShop;
use simulation::SimulationEngine;
use store::{MemoryBaristaStore, MemoryOrderStore};

fn main() {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .expect("Error initializing the logger");

    let coffee_shop = CoffeeShop::new(
        Arc::new(MemoryOrderStore::new()),
        Arc::new(MemoryBaristaStore::new()),
    );
    if let Err(shop_error) = coffee_shop.run("orders.json", &["Emma", "Liam", "Sophia"]) {
        error!("[MAIN] Coffee shop stopped with {:?}", shop_error);
        return;
    }

    let report = SimulationEngine::new().generate_test_cases(3, 5, 10);
    for case in &report.cases {
        info!(
            "[MAIN] {}: {} orders, avg wait {:.1} min, avg turnaround {:.1} min",
            case.label,
            case.orders.len(),
            case.average_waiting_minutes,
            case.average_turnaround_minutes
        );
    }
}
