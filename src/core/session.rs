//! Study-session tracking.
//!
//! Operates on the aggregate state: at most one incomplete session may
//! exist at any time. Starting appends; finishing mutates the open entry
//! in place. Persistence is the caller's job (the monitor saves after
//! each successful mutation).

use crate::core::model::{StudySession, TrackerState};
use crate::error::{Result, ScoutError};

/// Open a new study session.
///
/// Fails with [`ScoutError::SessionActive`] if one is already open; the
/// existing session is left untouched and nothing is appended.
pub fn start(
    state: &mut TrackerState,
    library: impl Into<String>,
    display_name: impl Into<String>,
    version: impl Into<String>,
) -> Result<&StudySession> {
    if let Some(active) = state.active_session() {
        return Err(ScoutError::session_active(active.display_name.clone()));
    }

    state
        .study_sessions
        .push(StudySession::start(library, display_name, version));
    Ok(state.study_sessions.last().expect("just pushed"))
}

/// Close the open study session in place.
///
/// Fails with [`ScoutError::NoActiveSession`] if none is open. The closed
/// entry keeps its position in the log; no new entry is appended.
pub fn finish(
    state: &mut TrackerState,
    cards_created: u32,
    notes: Option<String>,
) -> Result<&StudySession> {
    let session = state
        .active_session_mut()
        .ok_or(ScoutError::NoActiveSession)?;
    session.close(cards_created, notes);
    Ok(&*session)
}
