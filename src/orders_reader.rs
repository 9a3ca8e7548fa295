//! Lectura del archivo de ordenes y alta en la cafeteria.
use log::{debug, info};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::coffee_shop::{CoffeeShop, OrderRequest};
use crate::errors::CoffeeShopError;

#[derive(Deserialize)]
struct OrdersConfiguration {
    orders: Vec<OrderRequest>,
}

fn read_orders_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<OrderRequest>, Box<dyn Error>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let orders_config: OrdersConfiguration = serde_json::from_reader(reader)?;
    Ok(orders_config.orders)
}

/// Lee las ordenes del archivo y las da de alta una por una. Cada alta
/// dispara su pasada de asignacion sincronica.
pub fn read_and_place_orders<P: AsRef<Path>>(
    shop: &CoffeeShop,
    path: P,
) -> Result<usize, CoffeeShopError> {
    let requests = match read_orders_from_file(path) {
        Ok(requests) => requests,
        Err(_) => return Err(CoffeeShopError::FileReaderError),
    };

    let mut placed = 0;
    for request in &requests {
        let order = shop.place_order(request)?;
        debug!("[READER] Placed order {}", order.id);
        placed += 1;
    }
    info!("[READER] No more orders left");
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryBaristaStore, MemoryOrderStore};
    use std::io::Write;
    use std::sync::Arc;

    fn shop() -> CoffeeShop {
        CoffeeShop::new(
            Arc::new(MemoryOrderStore::new()),
            Arc::new(MemoryBaristaStore::new()),
        )
    }

    fn write_orders_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = File::create(&path).expect("Error creating the test file");
        file.write_all(content.as_bytes())
            .expect("Error writing the test file");
        path
    }

    #[test]
    fn should_place_every_order_in_the_file() {
        let path = write_orders_file(
            "barista_dispatch_reader_ok.json",
            r#"{"orders": [
                {"drink_type": "Latte", "customer_name": "Ana", "customer_phone": "555-0101",
                 "loyalty_customer": true, "rush_order": false},
                {"drink_type": "Espresso", "customer_name": "Bruno", "customer_phone": "555-0102",
                 "loyalty_customer": false, "rush_order": true}
            ]}"#,
        );
        let shop = shop();
        let placed = read_and_place_orders(&shop, &path).unwrap();
        assert_eq!(2, placed);
        assert_eq!(2, shop.orders_by_status(None).unwrap().len());
    }

    #[test]
    fn should_fail_on_a_missing_file() {
        let shop = shop();
        let result = read_and_place_orders(&shop, "no_such_orders_file.json");
        assert_eq!(Err(CoffeeShopError::FileReaderError), result.map(|_| ()));
    }

    #[test]
    fn should_fail_on_a_malformed_file() {
        let path = write_orders_file("barista_dispatch_reader_bad.json", "not json at all");
        let shop = shop();
        let result = read_and_place_orders(&shop, &path);
        assert_eq!(Err(CoffeeShopError::FileReaderError), result.map(|_| ()));
    }
}
