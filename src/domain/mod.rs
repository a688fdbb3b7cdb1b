// Domain layer: core models and ports (interfaces) shared by the presenter and adapters.

pub mod model;
pub mod ports;
