pub mod bill;
pub mod config;
pub mod cycle;
pub mod prediction;
pub mod recommendation;

pub use bill::{Bill, ExtractedBillData};
pub use cycle::{CycleEntry, CycleProfile, FlowIntensity, Phase};
pub use prediction::{
    CyclePredictionData, FertileWindow, HistoryPrediction, MedicineAnalysis, PredictionRecord,
    PredictionSource,
};
pub use recommendation::Recommendation;
