/// Review core - the dependency change model and the pure classification services
///
/// Nothing in this module performs I/O. Adapters hand it a materialized change list
/// and a validated policy; it hands back a classification.
pub mod domain;
pub mod services;
