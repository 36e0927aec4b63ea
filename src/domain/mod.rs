// Domain layer: schedule entities and the traits the adapters implement.

pub mod model;
pub mod ports;
