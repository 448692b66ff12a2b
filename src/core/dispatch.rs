//! Command dispatch — maps command tokens onto engine calls.

use std::fmt;
use thiserror::Error;

use crate::core::engine::{GameState, NarrativeEngine};
use crate::schema::command::{Verb, MISC_QUERY};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("engine failed on {call}: {source}")]
    Engine {
        call: EngineCall,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// The engine operation a command resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    /// Re-describe the current room (blank command line).
    DescribeRoom,
    Inventory,
    Query { verb: &'static str, arg: String },
}

impl fmt::Display for EngineCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DescribeRoom => f.write_str("print_current_room"),
            Self::Inventory => f.write_str("print_inventory"),
            Self::Query { verb, arg } => write!(f, "query({}, {:?})", verb, arg),
        }
    }
}

/// Resolve command tokens to an engine call.
///
/// Words outside the verb table are never rejected; they go to the engine
/// as a `MISC` query carrying the word itself. A missing argument token
/// is sent as the empty string.
pub fn plan(tokens: &[String]) -> EngineCall {
    let head = tokens.first().map(String::as_str).unwrap_or("");
    if head.is_empty() {
        return EngineCall::DescribeRoom;
    }

    let arg = |slot: usize| tokens.get(slot).cloned().unwrap_or_default();

    let Some(verb) = Verb::lookup(head) else {
        return EngineCall::Query {
            verb: MISC_QUERY,
            arg: head.to_string(),
        };
    };

    match verb.query_name() {
        None => EngineCall::Inventory,
        Some(name) if verb == Verb::Help => EngineCall::Query {
            verb: name,
            arg: "help".to_string(),
        },
        Some(name) => EngineCall::Query {
            verb: name,
            arg: arg(verb.arg_slot()),
        },
    }
}

/// Run a command against `engine` starting from `state`.
///
/// The returned state supersedes `state`; callers must query with it from
/// now on.
pub fn dispatch<E: NarrativeEngine>(
    tokens: &[String],
    engine: &E,
    state: &E::State,
) -> Result<GameState<E::State>, DispatchError> {
    let call = plan(tokens);
    tracing::debug!("dispatching {}", call);

    let result = match &call {
        EngineCall::DescribeRoom => engine.print_current_room(state),
        EngineCall::Inventory => engine.print_inventory(state),
        EngineCall::Query { verb, arg } => engine.query(verb, arg, state),
    };

    result.map_err(|e| DispatchError::Engine {
        call,
        source: Box::new(e),
    })
}

/// Owns the engine and the current story state.
pub struct CommandDispatcher<E: NarrativeEngine> {
    engine: E,
    state: E::State,
}

impl<E: NarrativeEngine> CommandDispatcher<E> {
    /// Start the story. Returns the dispatcher and the opening text.
    pub fn start(engine: E) -> Result<(Self, String), E::Error> {
        let (text, state) = engine.start()?.into_parts();
        Ok((Self { engine, state }, text))
    }

    /// Dispatch `tokens` and replace the held state with the result.
    ///
    /// On error the held state is left as it was.
    pub fn dispatch(&mut self, tokens: &[String]) -> Result<String, DispatchError> {
        let (text, state) = dispatch(tokens, &self.engine, &self.state)?.into_parts();
        self.state = state;
        Ok(text)
    }

    pub fn state(&self) -> &E::State {
        &self.state
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}
