//! # Armor Core
//!
//! 核心資料模型與類型定義

pub mod archetype;
pub mod config;
pub mod request;
pub mod result;
pub mod rules;
pub mod statistic;

// Re-export 主要類型
pub use archetype::{Archetype, ArchetypeProfile, TERTIARY_COUNT};
pub use config::{SolverBackend, SolverConfig};
pub use request::BuildRequest;
pub use result::{BuildResult, ModifierRow, TertiaryRow};
pub use statistic::Statistic;

/// 配裝計算錯誤類型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// 請求格式或數值不合法，於建模前拒絕
    #[error("無效的請求: {0}")]
    InvalidRequest(String),

    /// 約束無法同時滿足（正常結果，非系統錯誤）
    #[error("找不到符合所有最低需求的配裝組合")]
    Infeasible,

    /// 求解超過時限或被取消
    #[error("求解逾時：耗時 {elapsed_ms} 毫秒")]
    SolverTimeout { elapsed_ms: u128 },

    /// 求解器內部錯誤
    #[error("求解器錯誤: {0}")]
    SolverError(String),
}

impl BuildError {
    /// 是否為「無可行解」（需回饋給使用者，而非系統故障）
    pub fn is_infeasible(&self) -> bool {
        matches!(self, BuildError::Infeasible)
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
