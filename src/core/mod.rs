pub mod analyze;
pub mod extract;
pub mod generator;
pub mod insight;
pub mod phase;
pub mod predict;
pub mod recommend;
pub mod report;
