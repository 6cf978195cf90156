/// Use cases module containing application business logic orchestration
mod review_changes;

pub use review_changes::ReviewChangesUseCase;
