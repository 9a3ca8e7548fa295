#[derive(Debug, PartialEq, Eq)]
pub enum CoffeeShopError {
    LockError,
    FileReaderError,
    OrderNotFound,
}

impl<T> From<std::sync::PoisonError<T>> for CoffeeShopError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        CoffeeShopError::LockError
    }
}
