use std::env;

use crate::helpers::parse_boolean_flag;

const DEFAULT_REVALIDATE_BEFORE_ORDER: bool = true;

#[derive(Clone, Debug)]
pub struct SubmissionConfig {
    /// If true (the default), the quote is validated again right before the order is assembled, after nominal items
    /// have been removed. Set `QE_REVALIDATE_BEFORE_ORDER=0` to skip the second validation pass.
    pub revalidate_before_order: bool,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self { revalidate_before_order: DEFAULT_REVALIDATE_BEFORE_ORDER }
    }
}

impl SubmissionConfig {
    pub fn from_env_or_default() -> Self {
        let revalidate_before_order =
            parse_boolean_flag(env::var("QE_REVALIDATE_BEFORE_ORDER").ok(), DEFAULT_REVALIDATE_BEFORE_ORDER);
        Self { revalidate_before_order }
    }
}
