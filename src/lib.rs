//! # Armor Build
//!
//! 裝備配裝最佳化：在滿足六項屬性最低需求的前提下，分配五件裝備的
//! 原型、第三屬性與模組，並可選擇最大化單一優先屬性。
//!
//! ```
//! use armor_build::{compute_build, BuildRequest, Statistic};
//!
//! let request = BuildRequest::new()
//!     .with_minimum(Statistic::Health, 100)
//!     .with_major_mods(2)
//!     .with_priority(Statistic::Weapons);
//!
//! let result = compute_build(&request).unwrap();
//! assert!(result.total(Statistic::Health) >= 100);
//! assert_eq!(result.pieces_total(), 5);
//! ```

pub use armor_calc::{BuildCalculator, BuildModel};
pub use armor_core::{
    Archetype, BuildError, BuildRequest, BuildResult, ModifierRow, Result, SolverBackend,
    SolverConfig, Statistic, TertiaryRow,
};
pub use armor_optimizer::CancelFlag;

/// 以預設求解器配置計算最佳配裝
pub fn compute_build(request: &BuildRequest) -> Result<BuildResult> {
    BuildCalculator::new().compute(request)
}

/// 以指定求解器配置計算最佳配裝
pub fn compute_build_with(request: &BuildRequest, config: &SolverConfig) -> Result<BuildResult> {
    BuildCalculator::with_config(config.clone()).compute(request)
}
