use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanningError {
    #[error("invalid rule set: {0}")]
    InvalidRuleSet(#[from] serde_json::Error),

    #[error("carb distribution requires at least one meal slot")]
    EmptySlotList,
}
