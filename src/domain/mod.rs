// Domain layer: canonical schema, tables and the ports the pipeline runs against.

pub mod model;
pub mod ports;
pub mod xml;
