//! # Armor Build Calculation Engine
//!
//! 將配裝請求轉換為整數規劃模型、求解並解碼為配裝結果

pub mod calculator;
pub mod decoder;
pub mod model_builder;
pub mod totals;
pub mod variables;

// Re-export 主要類型
pub use calculator::BuildCalculator;
pub use model_builder::BuildModel;
pub use variables::BuildVariables;
