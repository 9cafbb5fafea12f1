//! Service layer for household-cli
//!
//! The service layer provides business logic on top of the storage layer:
//! chore rotation, expense splitting, recurring expense generation, settling
//! up, and the plain CRUD operations behind the CLI.

pub mod chore;
pub mod expense;
pub mod member;
pub mod recurrence;
pub mod rotation;
pub mod settle;
pub mod split;
pub mod template;
pub mod week;

pub use chore::ChoreService;
pub use expense::{ExpenseFilter, ExpenseService};
pub use member::{MemberDirectory, MemberService};
pub use recurrence::{MaterializeReport, RecurrenceMaterializer};
pub use rotation::ChoreRotationService;
pub use settle::{PaymentLink, SettleService, Settlement};
pub use split::{ExpenseSplitService, SplitOutcome, SplitRequest};
pub use template::TemplateService;
