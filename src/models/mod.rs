pub mod contract;
pub mod decision;
pub mod outcome;
pub mod payment;

pub use contract::Contract;
pub use decision::{DecisionKind, LinkingDecision, ReconcileStats};
pub use outcome::{
    LinkingOutcome, MatchResult, Recommendation, AUTO_LINK_THRESHOLD, MAX_SUGGESTIONS,
    SUCCESS_THRESHOLD,
};
pub use payment::Payment;
