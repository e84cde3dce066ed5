//! 求解器配置

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::BuildError;

/// 預設求解時限（毫秒）
pub const DEFAULT_TIME_LIMIT_MS: u64 = 10_000;

/// 求解後端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SolverBackend {
    /// microlp 純 Rust 整數規劃求解器
    #[default]
    MicroLp,
    /// HiGHS MIP 求解器（需啟用 `highs` feature）
    Highs,
}

/// 求解器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// 求解後端
    pub backend: SolverBackend,

    /// 求解時限（毫秒），None 表示不限時
    pub time_limit_ms: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            backend: SolverBackend::MicroLp,
            time_limit_ms: Some(DEFAULT_TIME_LIMIT_MS),
        }
    }
}

impl SolverConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 讀取配置（缺少的欄位使用預設值）
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| BuildError::InvalidRequest(format!("求解器配置格式錯誤: {}", e)))
    }

    /// 建構器模式：設置求解後端
    pub fn with_backend(mut self, backend: SolverBackend) -> Self {
        self.backend = backend;
        self
    }

    /// 建構器模式：設置求解時限
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = Some(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// 建構器模式：取消求解時限
    pub fn without_time_limit(mut self) -> Self {
        self.time_limit_ms = None;
        self
    }

    /// 求解時限
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }
}
