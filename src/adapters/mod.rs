/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: change sources,
/// formatters, presenters and the console reporter.
pub mod outbound;
