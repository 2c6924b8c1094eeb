//! # Target-State Polling
//!
//! Resuming an operation means fetching the provider resource once and
//! deciding, from the observation alone, whether the operation is complete,
//! still pending, or failed. [`evaluate`] is pure: the same spec and
//! observation always produce the same outcome.

use crate::atlas::AtlasError;
use crate::constants::STATE_DELETED;
use crate::error::HandlerError;

use super::continuation::ContinuationToken;
use super::progress::ProgressEvent;

/// Target and error states of one kind of operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSpec {
    pub target_states: &'static [&'static str],
    pub error_states: &'static [&'static str],
    pub poll_delay_secs: u32,
}

impl PollSpec {
    fn accepts_deletion(&self) -> bool {
        self.target_states.iter().any(|t| *t == STATE_DELETED)
    }
}

/// What one provider read returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// The provider answered 404
    Gone,
    Observed {
        state: String,
        error_state: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Complete { state: String },
    Pending { state: String },
    Errored { error_state: String },
    /// 404 while deletion is not a target state
    Missing,
}

/// Turn a provider read into an observation, mapping 404 to [`Observation::Gone`]
pub fn observe<T, F>(result: Result<T, AtlasError>, project: F) -> Result<Observation, AtlasError>
where
    F: FnOnce(T) -> Observation,
{
    match result {
        Ok(resource) => Ok(project(resource)),
        Err(e) if e.is_not_found() => Ok(Observation::Gone),
        Err(e) => Err(e),
    }
}

pub fn evaluate(spec: &PollSpec, observation: &Observation) -> PollOutcome {
    match observation {
        Observation::Gone if spec.accepts_deletion() => PollOutcome::Complete {
            state: STATE_DELETED.to_string(),
        },
        Observation::Gone => PollOutcome::Missing,
        Observation::Observed { state, error_state } => {
            if let Some(error_state) = error_state
                .as_deref()
                .filter(|e| spec.error_states.iter().any(|known| known == e))
            {
                return PollOutcome::Errored {
                    error_state: error_state.to_string(),
                };
            }
            if spec.target_states.iter().any(|t| t == state) {
                PollOutcome::Complete {
                    state: state.clone(),
                }
            } else {
                PollOutcome::Pending {
                    state: state.clone(),
                }
            }
        }
    }
}

/// Names the polled resource in failure messages
#[derive(Debug, Clone, Copy)]
pub struct PollSubject<'a> {
    pub kind: &'a str,
    pub identifier: &'a str,
    pub connection_id: Option<&'a str>,
}

impl std::fmt::Display for PollSubject<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.identifier)?;
        match self.connection_id.filter(|c| !c.is_empty()) {
            Some(connection_id) => write!(f, " (connection {connection_id})"),
            None => Ok(()),
        }
    }
}

impl PollOutcome {
    pub fn into_event<M>(
        self,
        spec: &PollSpec,
        subject: &PollSubject<'_>,
        model: M,
    ) -> Result<ProgressEvent<M>, HandlerError> {
        match self {
            PollOutcome::Complete { .. } => Ok(ProgressEvent::success("Complete", model)),
            PollOutcome::Pending { state } => Ok(ProgressEvent::in_progress(
                "Pending",
                model,
                spec.poll_delay_secs,
                ContinuationToken::polling(state),
            )),
            PollOutcome::Errored { error_state } => Err(HandlerError::ErrorState(format!(
                "{subject} is in error state {error_state}"
            ))),
            PollOutcome::Missing => Err(HandlerError::NotFound(format!(
                "{subject} no longer exists"
            ))),
        }
    }
}
