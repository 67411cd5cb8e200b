pub mod analyze;
pub mod completions;
pub mod config;
pub mod cycle;
pub mod init;
pub mod insights;
pub mod predict;
pub mod recommend;
pub mod status;
