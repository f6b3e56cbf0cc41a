// Domain layer: session inputs, model features and the ports the estimator depends on.

pub mod model;
pub mod ports;
