//! Session-layer error types.
//!
//! These are precondition rejections, not transport faults: a submission that
//! fails with one of these never reached the network, and no state changed.
//! Transport faults are absorbed inside the controllers (fallback turn,
//! preserved results) and never surface as errors.

use thiserror::Error;

/// Rejections raised by the chat controller and the nearby-search variant
/// before any request is dispatched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// A request is already outstanding on this controller instance.
    ///
    /// UI-level disabling of the submit affordance is advisory; this is the
    /// guarantee.
    #[error("a request is already in flight")]
    RequestInFlight,

    /// The submitted text was empty after trimming.
    #[error("nothing to submit: text is empty")]
    EmptySubmission,

    /// The nearby lookup was invoked without a location.
    #[error("nothing to search: location is empty")]
    EmptyLocation,
}
