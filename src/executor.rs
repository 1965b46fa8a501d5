//! Turn executor: drives the conversation one blocking turn at a time.
//!
//! Each turn resolves the current receiver, asks the engine for that
//! role's response, appends it to the history, records the estimate when
//! the responder contributes one, and lets the dispatch policy pick the
//! next receiver. Generation failures are fatal for the run; whatever
//! accumulated before the failure stays inspectable on the conversation.

use crate::conversation::{Conversation, Message, StateError};
use crate::dispatch::Policy;
use crate::engine::{Engine, GenerationRequest, RequestKind};
use crate::prompt;
use crate::role::Role;
use crate::shutdown;

/// One executed turn.
#[derive(Debug, Clone)]
pub struct TurnRecord {
    /// 1-indexed turn number.
    pub turn: usize,
    /// Role that spoke.
    pub role: Role,
    /// The generated response.
    pub body: String,
}

/// How a run loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The policy terminated the conversation.
    Completed,
    /// A shutdown request stopped the loop at a turn boundary.
    Interrupted,
    /// The defensive turn cap was reached.
    TurnLimit,
}

/// Fatal run errors.
#[derive(Debug)]
pub enum RunError {
    /// The generation collaborator failed for one turn.
    Generation {
        role: Role,
        turn: usize,
        error: String,
    },
    /// The conversation state rejected a mutation.
    State(StateError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generation { role, turn, error } => {
                write!(f, "generation failed for {} on turn {}: {}", role, turn, error)
            }
            Self::State(e) => write!(f, "state error: {}", e),
        }
    }
}

impl std::error::Error for RunError {}

impl From<StateError> for RunError {
    fn from(e: StateError) -> Self {
        Self::State(e)
    }
}

/// Drives one conversation to completion against an engine and a policy.
///
/// The engine and the conversation are passed in explicitly; the executor
/// holds no process-wide state.
pub struct TurnExecutor<'a> {
    engine: &'a dyn Engine,
    policy: &'a Policy,
    max_turns: usize,
    turn: usize,
}

impl<'a> TurnExecutor<'a> {
    pub fn new(engine: &'a dyn Engine, policy: &'a Policy) -> Self {
        Self {
            engine,
            policy,
            max_turns: 0,
            turn: 0,
        }
    }

    /// Cap the number of turns (0 = unbounded). A defensive bound for
    /// custom policies; the standard policy terminates on its own.
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Turns executed so far.
    pub fn turns_taken(&self) -> usize {
        self.turn
    }

    /// Execute exactly one turn.
    ///
    /// A single generation attempt; failures surface with the role and
    /// turn index and leave the conversation as it was before the turn.
    pub fn step(&mut self, conversation: &mut Conversation) -> Result<TurnRecord, RunError> {
        if conversation.done() {
            return Err(RunError::State(StateError::Finished));
        }

        self.turn += 1;
        let role = conversation.receiver();

        let request = GenerationRequest {
            role,
            kind: RequestKind::Turn,
            instructions: prompt::instructions_for(role),
            history: conversation.history(),
            turn: self.turn,
        };
        let result = self.engine.generate(&request);

        if !result.success {
            return Err(RunError::Generation {
                role,
                turn: self.turn,
                error: result
                    .error
                    .unwrap_or_else(|| "engine returned no output".to_string()),
            });
        }

        let body = result.output;
        conversation.push(Message::new(role, body.clone()))?;

        // Everyone but the customer and the coordinator contributes an
        // estimate; the round-robin check reads these entries.
        if role != Role::Customer && Some(role) != self.policy.coordinator() {
            conversation.record_estimate(role, body.clone())?;
        }

        self.policy.dispatch(role, conversation)?;

        Ok(TurnRecord {
            turn: self.turn,
            role,
            body,
        })
    }

    /// Run turns until the policy terminates the conversation.
    ///
    /// Cancellation is observed only between turns; a turn in flight
    /// always completes or fails whole.
    pub fn run(&mut self, conversation: &mut Conversation) -> Result<RunOutcome, RunError> {
        while !conversation.done() {
            if shutdown::requested() {
                return Ok(RunOutcome::Interrupted);
            }
            if self.max_turns > 0 && self.turn >= self.max_turns {
                return Ok(RunOutcome::TurnLimit);
            }
            self.step(conversation)?;
        }
        Ok(RunOutcome::Completed)
    }
}
