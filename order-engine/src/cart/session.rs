use super::{CartCommand, CartContext, CartError, CartResult, reduce};
use parking_lot::Mutex;
use shared::order::ActiveOrder;
use std::collections::VecDeque;

/// Undo depth kept per session
const MAX_HISTORY: usize = 50;

#[derive(Debug)]
struct SessionState {
    order: ActiveOrder,
    history: VecDeque<ActiveOrder>,
    /// Set while a [`SubmitGuard`] is alive
    submitting: bool,
}

impl SessionState {
    fn reset(&mut self) {
        self.order = ActiveOrder::new();
        self.history.clear();
    }
}

/// Single owner of one active order
///
/// Commands are serialized by the mutex; each successful command pushes the
/// previous state onto the undo history. While a [`SubmitGuard`] is held the
/// order is frozen: commands are rejected and undo is unavailable.
#[derive(Debug)]
pub struct CartSession {
    state: Mutex<SessionState>,
}

impl Default for CartSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CartSession {
    pub fn new() -> Self {
        Self::with_order(ActiveOrder::new())
    }

    pub fn with_order(order: ActiveOrder) -> Self {
        Self {
            state: Mutex::new(SessionState {
                order,
                history: VecDeque::new(),
                submitting: false,
            }),
        }
    }

    /// Apply a command and return the resulting order
    pub fn apply(&self, command: CartCommand, ctx: &CartContext<'_>) -> CartResult<ActiveOrder> {
        let mut state = self.state.lock();
        if state.submitting {
            return Err(CartError::SubmissionInProgress(state.order.id.clone()));
        }
        let next = reduce(&state.order, command, ctx)?;
        let previous = std::mem::replace(&mut state.order, next.clone());
        state.history.push_back(previous);
        if state.history.len() > MAX_HISTORY {
            state.history.pop_front();
        }
        Ok(next)
    }

    pub fn snapshot(&self) -> ActiveOrder {
        self.state.lock().order.clone()
    }

    /// Restore the state before the last successful command
    ///
    /// Returns `None` when there is nothing to undo or a submission is in flight.
    pub fn undo(&self) -> Option<ActiveOrder> {
        let mut state = self.state.lock();
        if state.submitting {
            return None;
        }
        let previous = state.history.pop_back()?;
        state.order = previous.clone();
        Some(previous)
    }

    pub fn can_undo(&self) -> bool {
        let state = self.state.lock();
        !state.submitting && !state.history.is_empty()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.lock().submitting
    }

    /// Start a fresh order with a new id and no history
    pub fn reset(&self) -> ActiveOrder {
        let mut state = self.state.lock();
        state.reset();
        state.order.clone()
    }

    /// Freeze the session for submission
    ///
    /// Returns `None` if another submission already holds it.
    pub fn begin_submit(&self) -> Option<SubmitGuard<'_>> {
        let mut state = self.state.lock();
        if state.submitting {
            return None;
        }
        state.submitting = true;
        Some(SubmitGuard {
            session: self,
            order: state.order.clone(),
            committed: false,
        })
    }
}

/// Exclusive hold on a [`CartSession`] while its order is being submitted
///
/// [`commit`](Self::commit) starts a fresh order; dropping the guard without
/// committing unfreezes the session with the cart untouched.
#[must_use = "dropping the guard immediately unfreezes the session"]
#[derive(Debug)]
pub struct SubmitGuard<'a> {
    session: &'a CartSession,
    order: ActiveOrder,
    committed: bool,
}

impl SubmitGuard<'_> {
    /// The order as it was when the session was frozen
    pub fn order(&self) -> &ActiveOrder {
        &self.order
    }

    /// Unfreeze and reset the session after a successful submission
    pub fn commit(mut self) -> ActiveOrder {
        self.committed = true;
        let mut state = self.session.state.lock();
        state.submitting = false;
        state.reset();
        state.order.clone()
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.session.state.lock().submitting = false;
        }
    }
}
