mod order_handler;

pub use order_handler::*;
