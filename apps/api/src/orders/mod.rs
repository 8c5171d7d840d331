// Orders: one paid statement per order, tracked from checkout to delivery.

pub mod handlers;
pub mod models;
pub mod store;
