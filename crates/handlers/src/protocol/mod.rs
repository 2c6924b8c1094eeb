//! # Reconciliation Protocol
//!
//! Progress events, the callback continuation token, target-state polling and
//! the delete coordinator shared by every resource handler.
//!
//! A logical Create/Update/Delete that outlives one invocation is a sequence of
//! stateless invocations. Each one either starts the provider operation and
//! returns `IN_PROGRESS` with a [`ContinuationToken::PollingFor`] token, or
//! resumes by polling the provider until a target state is reached.

mod continuation;
mod delete;
mod poll;
mod progress;

pub use continuation::{CallbackContext, ContinuationToken};
pub use delete::{coordinate_delete, DeleteOutcome};
pub use poll::{evaluate, observe, Observation, PollOutcome, PollSpec, PollSubject};
pub use progress::{HandlerErrorCode, OperationStatus, ProgressEvent};
