//! Group module containing participant management and expense registration

pub mod expense;
pub mod participant;
pub mod session;

pub use expense::*;
pub use participant::*;
pub use session::*;
