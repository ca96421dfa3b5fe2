// Domain layer: models and ports (interfaces). No docker or filesystem
// details leak in here.

pub mod model;
pub mod ports;
