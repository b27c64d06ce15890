// Domain layer: roster models and ports. Only std/serde/chrono here.

pub mod model;
pub mod ports;
