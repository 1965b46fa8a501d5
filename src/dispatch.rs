//! Dispatch policy: who speaks next and when the run is finished.
//!
//! The policy is data, not branching logic: a static transition table for
//! the linear pipeline, an ordered expert roster, and a coordinating role
//! that round-robins over the roster until everyone has contributed. The
//! standard policy mirrors the project workflow; tests can build custom
//! policies to exercise routing in isolation.

use crate::conversation::{Conversation, Message, StateError};
use crate::role::{Role, EXPERTS};

/// One row of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Role that hears the reply.
    pub to: Role,
    /// Next stage in the linear pipeline; `None` marks the end of the chain.
    pub then: Option<Role>,
}

/// Static transition table for the standard project workflow.
///
/// Every reply routes back through the scrum master, who hands the work to
/// the next stage named by `then`.
const TRANSITIONS: &[(Role, Route)] = &[
    (Role::Customer, Route { to: Role::ProductOwner, then: Some(Role::ScrumMaster) }),
    (Role::ProductOwner, Route { to: Role::ScrumMaster, then: Some(Role::UiUxDesigner) }),
    (Role::UiUxDesigner, Route { to: Role::ScrumMaster, then: Some(Role::SolutionArchitect) }),
    (Role::SolutionArchitect, Route { to: Role::ScrumMaster, then: Some(Role::FrontendDeveloper) }),
    (Role::FrontendDeveloper, Route { to: Role::ScrumMaster, then: Some(Role::BackendDeveloper) }),
    (Role::BackendDeveloper, Route { to: Role::ScrumMaster, then: Some(Role::RecommendationDeveloper) }),
    (Role::RecommendationDeveloper, Route { to: Role::ScrumMaster, then: Some(Role::QaEngineer) }),
    (Role::QaEngineer, Route { to: Role::ScrumMaster, then: Some(Role::TechnicalWriter) }),
    (Role::TechnicalWriter, Route { to: Role::ScrumMaster, then: Some(Role::DevopsEngineer) }),
    (Role::DevopsEngineer, Route { to: Role::ScrumMaster, then: Some(Role::SecurityEngineer) }),
    (Role::SecurityEngineer, Route { to: Role::ScrumMaster, then: Some(Role::EcommerceSpecialist) }),
    (Role::EcommerceSpecialist, Route { to: Role::ScrumMaster, then: None }),
    // Legacy generalist keeps its old slot before QA.
    (Role::Developer, Route { to: Role::ScrumMaster, then: Some(Role::QaEngineer) }),
];

/// Message appended when the chain ends and the coordinator owes a summary.
pub const SUMMARY_REQUEST: &str =
    "Please provide a final summary of the project timeline based on all the \
     estimates collected.";

/// The dispatch policy: transition table, expert roster, coordinator.
#[derive(Debug, Clone)]
pub struct Policy {
    transitions: Vec<(Role, Route)>,
    experts: Vec<Role>,
    coordinator: Option<Role>,
}

impl Policy {
    /// The standard project workflow policy.
    pub fn standard() -> Self {
        Self {
            transitions: TRANSITIONS.to_vec(),
            experts: EXPERTS.to_vec(),
            coordinator: Some(Role::ScrumMaster),
        }
    }

    /// Build a custom policy. Intended for tests and alternate workflows.
    pub fn new(
        transitions: Vec<(Role, Route)>,
        experts: Vec<Role>,
        coordinator: Option<Role>,
    ) -> Self {
        Self {
            transitions,
            experts,
            coordinator,
        }
    }

    /// Look up the static route for a role.
    pub fn route(&self, role: Role) -> Option<Route> {
        self.transitions
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, route)| *route)
    }

    /// The expert roster in round-robin priority order.
    pub fn experts(&self) -> &[Role] {
        &self.experts
    }

    /// The coordinating role, if one is configured.
    pub fn coordinator(&self) -> Option<Role> {
        self.coordinator
    }

    /// First roster expert that has not yet contributed an estimate.
    ///
    /// Returns `None` once every roster role appears in the estimates map;
    /// that is the round-robin's termination condition. Scanning the roster
    /// (instead of comparing counts) keeps termination correct even when
    /// off-roster roles such as the product owner also recorded estimates.
    pub fn next_unheard(&self, conversation: &Conversation) -> Option<Role> {
        self.experts
            .iter()
            .copied()
            .find(|expert| !conversation.estimates().contains_key(expert))
    }

    /// Apply one dispatch step after `current` produced output.
    ///
    /// Updates the sender, picks the next receiver, injects any follow-up
    /// instruction message, and sets the terminal flag when the run is
    /// complete. Dispatching on a finished conversation is an error.
    pub fn dispatch(&self, current: Role, conversation: &mut Conversation) -> Result<(), StateError> {
        if conversation.done() {
            return Err(StateError::Finished);
        }

        conversation.set_sender(current);

        if let Some(route) = self.route(current) {
            conversation.set_receiver(route.to);
            if route.then.is_none() {
                match self.coordinator {
                    Some(coordinator) => {
                        // End of the linear chain: ask the coordinator to
                        // close out with a summary. The request is worded
                        // from the customer's side of the table.
                        conversation.push(Message::new(Role::Customer, SUMMARY_REQUEST))?;
                        conversation.set_receiver(coordinator);
                    }
                    None => conversation.finish(None),
                }
            }
        } else if Some(current) == self.coordinator {
            match self.next_unheard(conversation) {
                Some(expert) => {
                    conversation.set_receiver(expert);
                    if let Some(brief) = expert.follow_up() {
                        conversation.push(Message::new(current, brief))?;
                    }
                }
                None => {
                    // Every roster expert has contributed; the coordinator's
                    // latest reply is the final summary.
                    let summary = conversation.last_message().map(|m| m.body.clone());
                    conversation.finish(summary);
                }
            }
        } else {
            // A role the table does not know should end the run, not hang it.
            conversation.finish(None);
        }

        Ok(())
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conv() -> Conversation {
        Conversation::new("Build a bookstore app")
    }

    #[test]
    fn test_linear_routes_match_table() {
        let policy = Policy::standard();
        for (role, route) in TRANSITIONS {
            assert_eq!(policy.route(*role), Some(*route), "route for {}", role);
        }
        assert_eq!(policy.route(Role::ScrumMaster), None);
    }

    #[test]
    fn test_dispatch_is_deterministic() {
        let policy = Policy::standard();
        for (role, _) in TRANSITIONS {
            let mut a = conv();
            let mut b = conv();
            policy.dispatch(*role, &mut a).unwrap();
            policy.dispatch(*role, &mut b).unwrap();
            assert_eq!(a.receiver(), b.receiver(), "receiver for {}", role);
            assert_eq!(a.done(), b.done());
            assert_eq!(a.history().len(), b.history().len());
        }
    }

    #[test]
    fn test_dispatch_updates_sender() {
        let policy = Policy::standard();
        let mut c = conv();
        policy.dispatch(Role::ProductOwner, &mut c).unwrap();
        assert_eq!(c.sender(), Role::ProductOwner);
        assert_eq!(c.receiver(), Role::ScrumMaster);
    }

    #[test]
    fn test_customer_routes_to_product_owner() {
        let policy = Policy::standard();
        let mut c = conv();
        policy.dispatch(Role::Customer, &mut c).unwrap();
        assert_eq!(c.receiver(), Role::ProductOwner);
        assert!(!c.done());
    }

    #[test]
    fn test_coordinator_round_robin_order() {
        let policy = Policy::standard();
        let mut c = conv();

        // Each coordinator dispatch picks the first roster expert still
        // missing from the estimates, in roster order.
        for expert in EXPERTS {
            let before = c.history().len();
            policy.dispatch(Role::ScrumMaster, &mut c).unwrap();
            assert_eq!(c.receiver(), expert);
            // The expert's hand-over brief was appended.
            assert_eq!(c.history().len(), before + 1);
            assert_eq!(c.last_message().unwrap().origin, Role::ScrumMaster);
            c.record_estimate(expert, "estimate").unwrap();
        }

        // Roster exhausted: the next coordinator dispatch terminates.
        policy.dispatch(Role::ScrumMaster, &mut c).unwrap();
        assert!(c.done());
    }

    #[test]
    fn test_round_robin_visits_each_expert_once() {
        let policy = Policy::standard();
        let mut c = conv();
        let mut visited = Vec::new();

        loop {
            policy.dispatch(Role::ScrumMaster, &mut c).unwrap();
            if c.done() {
                break;
            }
            let expert = c.receiver();
            assert!(!visited.contains(&expert), "{} visited twice", expert);
            visited.push(expert);
            c.record_estimate(expert, "estimate").unwrap();
        }

        assert_eq!(visited, EXPERTS.to_vec());
    }

    #[test]
    fn test_round_robin_skips_roles_already_heard() {
        let policy = Policy::standard();
        let mut c = conv();
        c.record_estimate(Role::UiUxDesigner, "3 weeks").unwrap();
        c.record_estimate(Role::SolutionArchitect, "4 weeks").unwrap();

        policy.dispatch(Role::ScrumMaster, &mut c).unwrap();
        assert_eq!(c.receiver(), Role::FrontendDeveloper);
    }

    #[test]
    fn test_off_roster_estimates_do_not_terminate_early() {
        let policy = Policy::standard();
        let mut c = conv();
        // The product owner and legacy developer record estimates without
        // being roster members; termination still requires the full roster.
        c.record_estimate(Role::ProductOwner, "2 weeks").unwrap();
        c.record_estimate(Role::Developer, "2 weeks").unwrap();
        for expert in &EXPERTS[..9] {
            c.record_estimate(*expert, "estimate").unwrap();
        }
        assert_eq!(c.estimates().len(), 11);

        policy.dispatch(Role::ScrumMaster, &mut c).unwrap();
        assert!(!c.done());
        assert_eq!(c.receiver(), Role::EcommerceSpecialist);
    }

    #[test]
    fn test_end_of_chain_redirects_to_coordinator() {
        let policy = Policy::standard();
        let mut c = conv();
        let before = c.history().len();

        policy.dispatch(Role::EcommerceSpecialist, &mut c).unwrap();

        assert!(!c.done());
        assert_eq!(c.receiver(), Role::ScrumMaster);
        assert_eq!(c.history().len(), before + 1);
        assert_eq!(c.last_message().unwrap().body, SUMMARY_REQUEST);
    }

    #[test]
    fn test_end_of_chain_without_coordinator_terminates() {
        let policy = Policy::new(
            vec![(Role::EcommerceSpecialist, Route { to: Role::ScrumMaster, then: None })],
            EXPERTS.to_vec(),
            None,
        );
        let mut c = conv();
        let history_before = c.history().len();

        policy.dispatch(Role::EcommerceSpecialist, &mut c).unwrap();

        assert!(c.done());
        assert!(c.summary().is_none());
        assert_eq!(c.history().len(), history_before);
        assert!(c.estimates().is_empty());
    }

    #[test]
    fn test_unknown_role_terminates_defensively() {
        // A policy that knows nothing treats every role as unknown.
        let policy = Policy::new(Vec::new(), Vec::new(), None);
        let mut c = conv();

        policy.dispatch(Role::Customer, &mut c).unwrap();

        assert!(c.done());
        assert!(c.summary().is_none());
    }

    #[test]
    fn test_termination_sets_summary_from_last_message() {
        let policy = Policy::standard();
        let mut c = conv();
        for expert in EXPERTS {
            c.record_estimate(expert, "estimate").unwrap();
        }
        c.push(Message::new(Role::ScrumMaster, "Total timeline: 12 weeks"))
            .unwrap();

        policy.dispatch(Role::ScrumMaster, &mut c).unwrap();

        assert!(c.done());
        assert_eq!(c.summary(), Some("Total timeline: 12 weeks"));
    }

    #[test]
    fn test_done_flips_exactly_once() {
        let policy = Policy::standard();
        let mut c = conv();
        for expert in EXPERTS {
            c.record_estimate(expert, "estimate").unwrap();
        }
        policy.dispatch(Role::ScrumMaster, &mut c).unwrap();
        assert!(c.done());

        // Dispatching on a finished conversation fails loudly and mutates
        // nothing.
        let history = c.history().len();
        let estimates = c.estimates().len();
        assert_eq!(
            policy.dispatch(Role::ScrumMaster, &mut c),
            Err(StateError::Finished)
        );
        assert!(c.done());
        assert_eq!(c.history().len(), history);
        assert_eq!(c.estimates().len(), estimates);
    }

    #[test]
    fn test_coordinator_loop_is_bounded() {
        // One round trip per roster expert, plus the closing summary trip.
        let policy = Policy::standard();
        let mut c = conv();
        let mut coordinator_dispatches = 0;

        while !c.done() {
            policy.dispatch(Role::ScrumMaster, &mut c).unwrap();
            coordinator_dispatches += 1;
            if !c.done() {
                c.record_estimate(c.receiver(), "estimate").unwrap();
            }
            assert!(coordinator_dispatches <= EXPERTS.len() + 1, "loop did not converge");
        }

        assert_eq!(coordinator_dispatches, EXPERTS.len() + 1);
    }
}
