use thiserror::Error;

/// Failures the simulation surfaces to its callers.
///
/// `InvalidTopologyParameters` is fatal and raised before any simulation
/// happens. The other two come out of the policy choice functions and only
/// mean that this action type has run out of targets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VaxError{
    #[error("invalid topology parameters: {0}")]
    InvalidTopologyParameters(String),

    #[error("no node is eligible for the requested action")]
    NoEligibleNode,

    #[error("every node in the population refuses vaccination")]
    AllNodesRefusers,
}
