use std::sync::Arc;

use crate::application::ports::TokenEstimator;
use crate::application::services::{CharRatioEstimator, TiktokenEstimator};
use crate::presentation::config::TokenEstimatorKind;

pub struct TokenEstimatorFactory;

impl TokenEstimatorFactory {
    pub fn create(kind: TokenEstimatorKind, chars_per_token: usize) -> Arc<dyn TokenEstimator> {
        match kind {
            TokenEstimatorKind::CharRatio => Arc::new(CharRatioEstimator::new(chars_per_token)),
            TokenEstimatorKind::Tiktoken => Arc::new(TiktokenEstimator),
        }
    }
}
