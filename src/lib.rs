//! # Split Core
//!
//! Shared expense splitting for groups: who paid what, what everybody owes,
//! and the fewest payments that settle the group.
//!
//! ## Features
//!
//! - **Fair-share balances**: every participant covers `total / participants`
//! - **Greedy settlement**: largest debtor pays largest creditor until everyone is within one cent
//! - **Group management**: participants with optional PIX keys, expense registration, cascading removal
//! - **Input validation**: user-typed amounts with `.` or `,` decimals, pluggable validators
//! - **Storage abstraction**: backend-agnostic design with trait-based storage
//!
//! ## Quick Start
//!
//! ```rust
//! use split_core::{settle, Expense, Participant};
//!
//! let participants = vec![
//!     Participant::new("a".to_string(), "Ana".to_string(), Some("ana@pix.com".to_string())),
//!     Participant::new("b".to_string(), "Bia".to_string(), None),
//! ];
//! let expenses = vec![Expense::new("e1".to_string(), "a".to_string(), 50.0, "Pizza".to_string())];
//!
//! let settlement = settle(&participants, &expenses);
//! assert_eq!(settlement.transfers.len(), 1);
//! assert_eq!(settlement.transfers[0].from, "Bia");
//! assert_eq!(settlement.transfers[0].amount, 25.0);
//! ```

pub mod group;
pub mod settlement;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use group::*;
pub use settlement::*;
pub use traits::*;
pub use types::*;
