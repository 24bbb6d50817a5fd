// Domain layer: value objects, the roster hierarchy and the capability traits.
// No I/O here beyond what callers pass in.

pub mod hierarchy;
pub mod model;
pub mod ports;
