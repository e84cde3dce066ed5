//! 配裝結果模型

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Archetype, BuildError, BuildRequest, Statistic};

/// 配裝計算結果（求解後解碼，不可變）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildResult {
    /// 各原型的一般裝備件數（不含異域裝備）
    pub pieces: BTreeMap<Archetype, u32>,

    /// 異域裝備所屬原型
    pub exotic: Option<Archetype>,

    /// 各原型在每個可用第三屬性上的件數（含異域裝備）
    pub tertiaries: BTreeMap<Archetype, BTreeMap<Statistic, u32>>,

    /// 大型模組分配（僅非零項）
    pub major_mods: BTreeMap<Statistic, u32>,

    /// 小型模組分配（僅非零項）
    pub minor_mods: BTreeMap<Statistic, u32>,

    /// 各屬性最終點數
    pub totals: BTreeMap<Statistic, u32>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

/// 第三屬性列（僅列出件數大於 0 的組合）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TertiaryRow {
    pub archetype: Archetype,
    pub stat: Statistic,
    pub count: u32,
}

/// 模組分配列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifierRow {
    pub stat: Statistic,
    pub major: u32,
    pub minor: u32,
}

impl BuildResult {
    /// 原型的一般裝備件數
    pub fn pieces_of(&self, archetype: Archetype) -> u32 {
        self.pieces.get(&archetype).copied().unwrap_or(0)
    }

    /// 異域裝備件數（0 或 1）
    pub fn exotic_count(&self) -> u32 {
        u32::from(self.exotic.is_some())
    }

    /// 裝備總件數（一般 + 異域）
    pub fn pieces_total(&self) -> u32 {
        self.pieces.values().sum::<u32>() + self.exotic_count()
    }

    /// 屬性最終點數
    pub fn total(&self, stat: Statistic) -> u32 {
        self.totals.get(&stat).copied().unwrap_or(0)
    }

    /// 所有屬性點數合計
    pub fn grand_total(&self) -> u32 {
        self.totals.values().sum()
    }

    pub fn major_mods_used(&self) -> u32 {
        self.major_mods.values().sum()
    }

    pub fn minor_mods_used(&self) -> u32 {
        self.minor_mods.values().sum()
    }

    /// 件數大於 0 的第三屬性組合
    pub fn tertiary_rows(&self) -> Vec<TertiaryRow> {
        self.tertiaries
            .iter()
            .flat_map(|(&archetype, stats)| {
                stats
                    .iter()
                    .filter(|(_, &count)| count > 0)
                    .map(move |(&stat, &count)| TertiaryRow {
                        archetype,
                        stat,
                        count,
                    })
            })
            .collect()
    }

    /// 有分配任何模組的屬性
    pub fn modifier_rows(&self) -> Vec<ModifierRow> {
        Statistic::ALL
            .into_iter()
            .filter(|s| self.major_mods.contains_key(s) || self.minor_mods.contains_key(s))
            .map(|stat| ModifierRow {
                stat,
                major: self.major_mods.get(&stat).copied().unwrap_or(0),
                minor: self.minor_mods.get(&stat).copied().unwrap_or(0),
            })
            .collect()
    }

    /// 檢查所有最低需求是否滿足
    pub fn meets_minimums(&self, request: &BuildRequest) -> bool {
        Statistic::ALL
            .into_iter()
            .all(|stat| self.total(stat) >= request.minimum(stat))
    }

    /// 序列化為 JSON
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BuildError::SolverError(format!("結果序列化失敗: {}", e)))
    }
}
