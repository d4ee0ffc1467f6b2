pub mod images;
pub mod models;
pub mod ports;
pub mod services;
#[cfg(test)]
pub mod testing;
