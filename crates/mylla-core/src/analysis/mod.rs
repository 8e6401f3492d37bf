pub mod classifier;
pub mod deficiency;
pub mod outcome;
pub mod recommender;

pub use classifier::classify_levels;
pub use deficiency::deficiency;
pub use outcome::{
    Analysis, Classification, DeficiencyVector, NutrientStatus, Recommendation, Recommendations,
    SampleAnalysis,
};
pub use recommender::recommend_levels;
