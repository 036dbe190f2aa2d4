//! Ports - trait boundaries between the application core and the
//! outside world. Adapters implement these; handlers depend on them.

pub mod ai_provider;
pub mod checkout_provider;
pub mod finance;
pub mod transaction_repository;
pub mod user_repository;

pub use ai_provider::{AiError, AiProvider};
pub use checkout_provider::{CheckoutProvider, CreateSessionRequest, HostedSession};
pub use finance::{AdvisorRepository, ExpenseRepository, FinanceError, SetupRepository};
pub use transaction_repository::{ReconciledTransaction, TransactionRepository};
pub use user_repository::UserRepository;
