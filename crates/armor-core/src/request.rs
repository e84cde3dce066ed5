//! 配裝請求模型

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::rules::{MAX_MODIFIERS, PIECES_PER_BUILD};
use crate::{BuildError, Statistic};

/// 配裝請求
///
/// 各屬性最低需求（未指定視為 0）、模組數量、是否使用異域裝備，
/// 以及可選的優先屬性（以剩餘點數最大化）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildRequest {
    /// 各屬性最低需求
    pub minimums: BTreeMap<Statistic, u32>,

    /// 大型模組（+10）數量，必須全數裝上
    pub major_mods: u32,

    /// 小型模組（+5）數量上限
    pub minor_mods: u32,

    /// 是否使用一件異域裝備
    pub use_exotic: bool,

    /// 優先屬性
    pub priority: Option<Statistic>,
}

impl BuildRequest {
    /// 創建空白請求（所有最低需求為 0，不使用模組與異域裝備）
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 解析請求
    ///
    /// 負數最低需求、未知屬性名稱等格式問題一律視為無效請求。
    ///
    /// ```
    /// # use armor_core::{BuildRequest, Statistic};
    /// let request = BuildRequest::from_json(
    ///     r#"{"minimums": {"Health": 100}, "major_mods": 2, "priority": "Weapons"}"#,
    /// ).unwrap();
    /// assert_eq!(request.minimum(Statistic::Health), 100);
    /// assert_eq!(request.priority, Some(Statistic::Weapons));
    /// ```
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let request: BuildRequest = serde_json::from_str(json)
            .map_err(|e| BuildError::InvalidRequest(format!("請求格式錯誤: {}", e)))?;
        request.validate()?;
        Ok(request)
    }

    /// 建構器模式：設置單一屬性最低需求
    pub fn with_minimum(mut self, stat: Statistic, minimum: u32) -> Self {
        self.minimums.insert(stat, minimum);
        self
    }

    /// 建構器模式：設置大型模組數量
    pub fn with_major_mods(mut self, count: u32) -> Self {
        self.major_mods = count;
        self
    }

    /// 建構器模式：裝滿大型模組（每件裝備一個）
    pub fn with_full_major_mods(self) -> Self {
        self.with_major_mods(PIECES_PER_BUILD)
    }

    /// 建構器模式：設置小型模組數量上限
    pub fn with_minor_mods(mut self, count: u32) -> Self {
        self.minor_mods = count;
        self
    }

    /// 建構器模式：設置是否使用異域裝備
    pub fn with_exotic(mut self, use_exotic: bool) -> Self {
        self.use_exotic = use_exotic;
        self
    }

    /// 建構器模式：設置優先屬性
    pub fn with_priority(mut self, stat: Statistic) -> Self {
        self.priority = Some(stat);
        self
    }

    /// 取得屬性最低需求（未指定為 0）
    pub fn minimum(&self, stat: Statistic) -> u32 {
        self.minimums.get(&stat).copied().unwrap_or(0)
    }

    /// 檢查請求是否合法
    pub fn validate(&self) -> crate::Result<()> {
        if self.major_mods > MAX_MODIFIERS {
            return Err(BuildError::InvalidRequest(format!(
                "大型模組數量 {} 超過上限 {}",
                self.major_mods, MAX_MODIFIERS
            )));
        }

        let total = self.major_mods.saturating_add(self.minor_mods);
        if total > MAX_MODIFIERS {
            return Err(BuildError::InvalidRequest(format!(
                "模組總數 {} 超過上限 {}",
                total, MAX_MODIFIERS
            )));
        }

        Ok(())
    }
}
