// Domain layer: the typed sales table, aggregation results and the ports the
// pipeline depends on. No I/O happens here.

pub mod model;
pub mod ports;
