// Domain layer: core models and ports (interfaces). No AWS or I/O dependencies.

pub mod model;
pub mod ports;
