pub mod placement;
pub mod validator;

pub use validator::{RejectReason, RejectedAction, VirtualState, filter_actions, validate_response};
