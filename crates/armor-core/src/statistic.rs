//! 角色屬性模型

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::BuildError;

/// 角色屬性（固定六種，順序固定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Statistic {
    /// 生命
    Health,
    /// 近戰
    Melee,
    /// 手榴彈
    Grenade,
    /// 超能
    Super,
    /// 職業技能
    Class,
    /// 武器
    Weapons,
}

impl Statistic {
    /// 屬性數量
    pub const COUNT: usize = 6;

    /// 依固定順序列出所有屬性
    pub const ALL: [Statistic; Self::COUNT] = [
        Statistic::Health,
        Statistic::Melee,
        Statistic::Grenade,
        Statistic::Super,
        Statistic::Class,
        Statistic::Weapons,
    ];

    /// 屬性在固定順序中的位置（可作為陣列索引）
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 屬性名稱
    pub const fn name(self) -> &'static str {
        match self {
            Statistic::Health => "Health",
            Statistic::Melee => "Melee",
            Statistic::Grenade => "Grenade",
            Statistic::Super => "Super",
            Statistic::Class => "Class",
            Statistic::Weapons => "Weapons",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Statistic {
    type Err = BuildError;

    /// 依名稱解析屬性（不分大小寫）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Statistic::ALL
            .into_iter()
            .find(|stat| stat.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| BuildError::InvalidRequest(format!("未知的屬性: {}", trimmed)))
    }
}
