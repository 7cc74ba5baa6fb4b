/// Schema synthesis from a profiled graph.
///
/// Two interchangeable strategies produce the same [`Schema`] shape:
///
/// - [`Strategy::Oracle`]: the profile report is embedded in a fixed
///   instruction template ([`build_prompt`]) and sent to a [`SchemaOracle`].
///   The response may be bare or fenced JSON ([`parse_schema`]); any other
///   response is a [`SynthesisError::Parse`] and is not retried.
/// - [`Strategy::Derive`]: the schema is derived locally from the graph's
///   observed types ([`derive_schema`]) with no external call.
///
/// The strategy is chosen up front by the caller. An oracle failure never
/// falls back to derivation.
pub mod derive;
pub mod extract;
pub mod prompt;

pub use derive::{DeriveConfig, derive_schema};
pub use extract::{ExtractError, extract_json, parse_schema};
pub use prompt::build_prompt;

use std::time::Duration;

use crate::graph::TypedGraph;
use crate::schema::Schema;

/// An external text-generation service that answers a prompt with text
/// expected to contain one JSON object.
///
/// Implementations own transport, credentials and timeouts. The core never
/// depends on a concrete network client.
pub trait SchemaOracle {
    /// Sends `prompt` and returns the raw response text.
    fn complete(&self, prompt: &str) -> Result<String, OracleError>;
}

/// Failures of a [`SchemaOracle`] call.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// The request could not be sent or the response could not be read.
    #[error("oracle request failed: {0}")]
    Request(String),
    /// No response arrived within the configured timeout.
    #[error("oracle did not answer within {}s", .0.as_secs())]
    Timeout(Duration),
    /// The service answered with a non-success status.
    #[error("oracle returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },
    /// The service answered successfully but without any text.
    #[error("oracle returned no text")]
    EmptyResponse,
}

/// Failures of [`synthesize`].
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    /// The graph has no nodes; no strategy was run.
    #[error("graph is empty: no node or edge files were ingested")]
    EmptyGraph,
    /// The oracle call failed or timed out.
    #[error("schema synthesis failed at the oracle call: {0}")]
    Oracle(#[from] OracleError),
    /// The oracle response could not be parsed as a schema.
    #[error("schema synthesis failed to parse the oracle response: {0}")]
    Parse(#[from] ExtractError),
}

/// How a schema is produced.
pub enum Strategy<'a> {
    /// Ask an external oracle.
    Oracle(&'a dyn SchemaOracle),
    /// Derive locally from the graph.
    Derive(DeriveConfig),
}

impl std::fmt::Debug for Strategy<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Oracle(_) => f.write_str("Strategy::Oracle"),
            Strategy::Derive(c) => f.debug_tuple("Strategy::Derive").field(c).finish(),
        }
    }
}

/// Produces a schema for `graph` with the chosen strategy.
///
/// `report` is the context report of `graph`; it is only consulted by the
/// oracle strategy.
///
/// # Errors
///
/// Returns [`SynthesisError::EmptyGraph`] before contacting any oracle when
/// `graph` has no nodes.
pub fn synthesize(
    graph: &TypedGraph,
    report: &str,
    strategy: &Strategy<'_>,
) -> Result<Schema, SynthesisError> {
    if graph.is_empty() {
        return Err(SynthesisError::EmptyGraph);
    }
    match strategy {
        Strategy::Oracle(oracle) => {
            let response = oracle.complete(&build_prompt(report))?;
            Ok(parse_schema(&response)?)
        }
        Strategy::Derive(config) => Ok(derive_schema(graph, config)),
    }
}
