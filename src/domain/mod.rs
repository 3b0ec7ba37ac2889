// Domain layer: wire types, RPC response shapes and the fullnode port.

pub mod model;
pub mod ports;
pub mod rpc_types;
