//! PostgreSQL persistence adapters.

pub mod finance_repository;
pub mod transaction_repository;
pub mod user_repository;

pub use finance_repository::{
    PostgresAdvisorRepository, PostgresExpenseRepository, PostgresSetupRepository,
};
pub use transaction_repository::PostgresTransactionRepository;
pub use user_repository::PostgresUserRepository;
