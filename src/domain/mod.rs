// Domain layer: core models and ports (interfaces). No behavior beyond
// small conversions; the state machine lives in `core`.

pub mod model;
pub mod ports;
