//! Label algorithms: normalization, character n-grams, blended similarity.

pub mod ngrams;
pub mod normalizer;
pub mod similarity;
