//! Conversation state for a single simulation run.
//!
//! One mutable record per run: the append-only message history, who spoke
//! and who speaks next, the collected estimates, and the terminal flag.
//! Once `done` is set the state is frozen; further mutation attempts
//! return [`StateError::Finished`].

use std::collections::HashMap;

use crate::role::Role;

/// One turn's output, attributed to the role that produced it.
///
/// Immutable once appended to the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub origin: Role,
    pub body: String,
}

impl Message {
    pub fn new(origin: Role, body: impl Into<String>) -> Self {
        Self {
            origin,
            body: body.into(),
        }
    }
}

/// Error raised when mutating a finished conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// The conversation already terminated; resuming it is undefined.
    Finished,
}

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finished => write!(f, "conversation is finished; state is frozen"),
        }
    }
}

impl std::error::Error for StateError {}

/// Mutable state of one simulation run.
#[derive(Debug, Clone)]
pub struct Conversation {
    history: Vec<Message>,
    sender: Role,
    receiver: Role,
    estimates: HashMap<Role, String>,
    done: bool,
    summary: Option<String>,
}

impl Conversation {
    /// Start a new conversation from a customer request.
    ///
    /// The request is seeded into the history as the customer's message;
    /// the product owner speaks first.
    ///
    /// # Examples
    /// ```
    /// use scrumsim::conversation::Conversation;
    /// use scrumsim::role::Role;
    ///
    /// let conv = Conversation::new("Build a bookstore app");
    /// assert_eq!(conv.sender(), Role::Customer);
    /// assert_eq!(conv.receiver(), Role::ProductOwner);
    /// assert_eq!(conv.history().len(), 1);
    /// assert!(!conv.done());
    /// ```
    pub fn new(customer_request: impl Into<String>) -> Self {
        Self {
            history: vec![Message::new(Role::Customer, customer_request)],
            sender: Role::Customer,
            receiver: Role::ProductOwner,
            estimates: HashMap::new(),
            done: false,
            summary: None,
        }
    }

    /// The full message history, in append order.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// The most recently appended message.
    pub fn last_message(&self) -> Option<&Message> {
        self.history.last()
    }

    /// Who most recently spoke.
    pub fn sender(&self) -> Role {
        self.sender
    }

    /// Who speaks next.
    pub fn receiver(&self) -> Role {
        self.receiver
    }

    /// Last response per contributing role.
    pub fn estimates(&self) -> &HashMap<Role, String> {
        &self.estimates
    }

    /// Whether the run has terminated.
    pub fn done(&self) -> bool {
        self.done
    }

    /// Final summary, set only at termination by the coordinator.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Append a message to the history.
    pub fn push(&mut self, message: Message) -> Result<(), StateError> {
        self.guard()?;
        self.history.push(message);
        Ok(())
    }

    /// Record (or overwrite) a role's estimate.
    pub fn record_estimate(&mut self, role: Role, body: impl Into<String>) -> Result<(), StateError> {
        self.guard()?;
        self.estimates.insert(role, body.into());
        Ok(())
    }

    pub(crate) fn set_sender(&mut self, role: Role) {
        self.sender = role;
    }

    pub(crate) fn set_receiver(&mut self, role: Role) {
        self.receiver = role;
    }

    /// Terminate the run, freezing the state.
    pub(crate) fn finish(&mut self, summary: Option<String>) {
        self.done = true;
        self.summary = summary;
    }

    fn guard(&self) -> Result<(), StateError> {
        if self.done {
            Err(StateError::Finished)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_seeds_customer_request() {
        let conv = Conversation::new("Build it");
        assert_eq!(conv.history().len(), 1);
        assert_eq!(conv.history()[0].origin, Role::Customer);
        assert_eq!(conv.history()[0].body, "Build it");
        assert!(conv.estimates().is_empty());
        assert!(conv.summary().is_none());
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut conv = Conversation::new("req");
        conv.push(Message::new(Role::ProductOwner, "first")).unwrap();
        conv.push(Message::new(Role::ScrumMaster, "second")).unwrap();

        let bodies: Vec<&str> = conv.history().iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["req", "first", "second"]);
    }

    #[test]
    fn test_record_estimate_grows_and_overwrites() {
        let mut conv = Conversation::new("req");
        conv.record_estimate(Role::QaEngineer, "5 days").unwrap();
        conv.record_estimate(Role::TechnicalWriter, "2 weeks").unwrap();
        assert_eq!(conv.estimates().len(), 2);

        // A second response from the same role overwrites, never duplicates.
        conv.record_estimate(Role::QaEngineer, "6 days").unwrap();
        assert_eq!(conv.estimates().len(), 2);
        assert_eq!(conv.estimates()[&Role::QaEngineer], "6 days");
    }

    #[test]
    fn test_finish_freezes_state() {
        let mut conv = Conversation::new("req");
        conv.finish(Some("all done".to_string()));

        assert!(conv.done());
        assert_eq!(conv.summary(), Some("all done"));
        assert_eq!(
            conv.push(Message::new(Role::ScrumMaster, "late")),
            Err(StateError::Finished)
        );
        assert_eq!(
            conv.record_estimate(Role::QaEngineer, "late"),
            Err(StateError::Finished)
        );
        // Nothing leaked through the guard.
        assert_eq!(conv.history().len(), 1);
        assert!(conv.estimates().is_empty());
    }

    #[test]
    fn test_finish_without_summary() {
        let mut conv = Conversation::new("req");
        conv.finish(None);
        assert!(conv.done());
        assert!(conv.summary().is_none());
    }

    #[test]
    fn test_last_message() {
        let mut conv = Conversation::new("req");
        assert_eq!(conv.last_message().unwrap().body, "req");
        conv.push(Message::new(Role::ProductOwner, "reply")).unwrap();
        assert_eq!(conv.last_message().unwrap().body, "reply");
    }

    #[test]
    fn test_state_error_display() {
        let msg = StateError::Finished.to_string();
        assert!(msg.contains("finished"));
    }
}
