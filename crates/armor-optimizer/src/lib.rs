//! # Armor Optimizer
//!
//! 有界整數線性規劃：模型、求解器介面與 good_lp 求解後端

pub mod backend;
pub mod expr;
pub mod model;
pub mod solver;

use std::time::Duration;

// Re-export 主要類型
#[cfg(feature = "highs")]
pub use backend::HighsSolver;
pub use backend::MicroLpSolver;
pub use expr::{LinearExpr, VarId};
pub use model::{Constraint, ConstraintSense, IntegerProgram, Objective, Variable};
pub use solver::{CancelFlag, IntegerSolver, SolveLimits, Solution};

/// 求解狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// 找到最佳解（可行性問題為任一可行解）
    Optimal,
    /// 證明無可行解
    Infeasible,
}

/// 優化結果
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// 求解狀態
    pub status: SolveStatus,

    /// 整數解（無解時為 None）
    pub solution: Option<Solution>,

    /// 求解耗時
    pub elapsed: Duration,
}

impl OptimizationResult {
    /// 創建最佳解結果
    pub fn optimal(solution: Solution, elapsed: Duration) -> Self {
        Self {
            status: SolveStatus::Optimal,
            solution: Some(solution),
            elapsed,
        }
    }

    /// 創建無解結果
    pub fn infeasible(elapsed: Duration) -> Self {
        Self {
            status: SolveStatus::Infeasible,
            solution: None,
            elapsed,
        }
    }

    /// 是否可行
    pub fn is_feasible(&self) -> bool {
        self.status == SolveStatus::Optimal
    }
}

/// 求解器錯誤類型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolverError {
    #[error("模型不合法: {0}")]
    InvalidModel(String),

    #[error("超過求解時限 {limit_ms} 毫秒")]
    TimeLimit { limit_ms: u128 },

    #[error("求解已取消")]
    Cancelled,

    #[error("求解後端錯誤: {0}")]
    Backend(String),
}

impl SolverError {
    /// 是否為時限或取消造成的中止
    pub fn is_interrupted(&self) -> bool {
        matches!(self, SolverError::TimeLimit { .. } | SolverError::Cancelled)
    }
}
