//! Almacenamiento de ordenes y baristas. El motor de despacho solo conoce
//! los traits; la implementacion en memoria respalda las pruebas y el demo.
use std::collections::HashMap;
use std::sync::Mutex;

use crate::barista::Barista;
use crate::errors::CoffeeShopError;
use crate::order::{Order, OrderStatus};

pub trait OrderStore: Send + Sync {
    /// Persiste la orden. Si su id es 0 se le asigna uno nuevo.
    fn save(&self, order: Order) -> Result<Order, CoffeeShopError>;
    fn find_by_id(&self, id: u64) -> Result<Option<Order>, CoffeeShopError>;
    fn find_all(&self) -> Result<Vec<Order>, CoffeeShopError>;
    fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, CoffeeShopError>;
    /// Ordenes en el estado pedido, ordenadas por llegada ascendente.
    fn find_by_status_order_by_arrival(
        &self,
        status: OrderStatus,
    ) -> Result<Vec<Order>, CoffeeShopError>;
    fn save_all(&self, orders: Vec<Order>) -> Result<(), CoffeeShopError>;
}

pub trait BaristaStore: Send + Sync {
    /// Persiste el barista. Si su id es 0 se le asigna uno nuevo.
    fn save(&self, barista: Barista) -> Result<Barista, CoffeeShopError>;
    fn find_by_id(&self, id: u64) -> Result<Option<Barista>, CoffeeShopError>;
    fn find_all(&self) -> Result<Vec<Barista>, CoffeeShopError>;
}

pub struct MemoryOrderStore {
    orders: Mutex<OrderTable>,
}

struct OrderTable {
    by_id: HashMap<u64, Order>,
    next_id: u64,
}

impl MemoryOrderStore {
    pub fn new() -> MemoryOrderStore {
        MemoryOrderStore {
            orders: Mutex::new(OrderTable {
                by_id: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryOrderStore {
    fn default() -> Self {
        MemoryOrderStore::new()
    }
}

impl OrderStore for MemoryOrderStore {
    fn save(&self, mut order: Order) -> Result<Order, CoffeeShopError> {
        let mut table = self.orders.lock()?;
        if order.id == 0 {
            order.id = table.next_id;
            table.next_id += 1;
        }
        table.by_id.insert(order.id, order.clone());
        Ok(order)
    }

    fn find_by_id(&self, id: u64) -> Result<Option<Order>, CoffeeShopError> {
        let table = self.orders.lock()?;
        Ok(table.by_id.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Order>, CoffeeShopError> {
        let table = self.orders.lock()?;
        let mut orders: Vec<Order> = table.by_id.values().cloned().collect();
        orders.sort_by_key(|order| order.id);
        Ok(orders)
    }

    fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, CoffeeShopError> {
        let orders = self.find_all()?;
        Ok(orders
            .into_iter()
            .filter(|order| order.status == status)
            .collect())
    }

    fn find_by_status_order_by_arrival(
        &self,
        status: OrderStatus,
    ) -> Result<Vec<Order>, CoffeeShopError> {
        let mut orders = self.find_by_status(status)?;
        orders.sort_by(|a, b| {
            a.arrival_time
                .cmp(&b.arrival_time)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(orders)
    }

    fn save_all(&self, orders: Vec<Order>) -> Result<(), CoffeeShopError> {
        let mut table = self.orders.lock()?;
        for order in orders {
            table.by_id.insert(order.id, order);
        }
        Ok(())
    }
}

pub struct MemoryBaristaStore {
    baristas: Mutex<BaristaTable>,
}

struct BaristaTable {
    by_id: HashMap<u64, Barista>,
    next_id: u64,
}

impl MemoryBaristaStore {
    pub fn new() -> MemoryBaristaStore {
        MemoryBaristaStore {
            baristas: Mutex::new(BaristaTable {
                by_id: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryBaristaStore {
    fn default() -> Self {
        MemoryBaristaStore::new()
    }
}

impl BaristaStore for MemoryBaristaStore {
    fn save(&self, mut barista: Barista) -> Result<Barista, CoffeeShopError> {
        let mut table = self.baristas.lock()?;
        if barista.id == 0 {
            barista.id = table.next_id;
            table.next_id += 1;
        }
        table.by_id.insert(barista.id, barista.clone());
        Ok(barista)
    }

    fn find_by_id(&self, id: u64) -> Result<Option<Barista>, CoffeeShopError> {
        let table = self.baristas.lock()?;
        Ok(table.by_id.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Barista>, CoffeeShopError> {
        let table = self.baristas.lock()?;
        let mut baristas: Vec<Barista> = table.by_id.values().cloned().collect();
        baristas.sort_by_key(|barista| barista.id);
        Ok(baristas)
    }
}
