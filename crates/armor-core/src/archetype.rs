//! 裝備原型（Archetype）參考資料
//!
//! 每個原型永久綁定一組（主屬性, 副屬性）。其餘四項屬性即為該原型
//! 可擲出的第三屬性，於編譯期預先計算成固定查表。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{BuildError, Statistic};

/// 每個原型可擲出的第三屬性數量
pub const TERTIARY_COUNT: usize = Statistic::COUNT - 2;

/// 裝備原型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// 槍手（武器 / 手榴彈）
    Gunner,
    /// 堡壘（生命 / 職業技能）
    Bulwark,
    /// 專家（職業技能 / 武器）
    Specialist,
    /// 擲彈兵（手榴彈 / 超能）
    Grenadier,
    /// 典範（超能 / 近戰）
    Paragon,
    /// 鬥士（近戰 / 生命）
    Brawler,
}

/// 原型屬性配置（不可變參考資料）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchetypeProfile {
    pub archetype: Archetype,
    pub primary: Statistic,
    pub secondary: Statistic,
    /// 可擲出的第三屬性（依屬性固定順序排列）
    pub tertiary: [Statistic; TERTIARY_COUNT],
}

const fn profile(archetype: Archetype, primary: Statistic, secondary: Statistic) -> ArchetypeProfile {
    let mut tertiary = [Statistic::Health; TERTIARY_COUNT];
    let mut filled = 0;
    let mut i = 0;
    while i < Statistic::COUNT {
        let stat = Statistic::ALL[i];
        if stat as usize != primary as usize && stat as usize != secondary as usize {
            tertiary[filled] = stat;
            filled += 1;
        }
        i += 1;
    }
    ArchetypeProfile {
        archetype,
        primary,
        secondary,
        tertiary,
    }
}

/// 原型參考表，索引與 `Archetype::index()` 一致
static ARCHETYPE_TABLE: [ArchetypeProfile; Archetype::COUNT] = [
    profile(Archetype::Gunner, Statistic::Weapons, Statistic::Grenade),
    profile(Archetype::Bulwark, Statistic::Health, Statistic::Class),
    profile(Archetype::Specialist, Statistic::Class, Statistic::Weapons),
    profile(Archetype::Grenadier, Statistic::Grenade, Statistic::Super),
    profile(Archetype::Paragon, Statistic::Super, Statistic::Melee),
    profile(Archetype::Brawler, Statistic::Melee, Statistic::Health),
];

impl Archetype {
    /// 原型數量
    pub const COUNT: usize = 6;

    /// 依固定順序列出所有原型
    pub const ALL: [Archetype; Self::COUNT] = [
        Archetype::Gunner,
        Archetype::Bulwark,
        Archetype::Specialist,
        Archetype::Grenadier,
        Archetype::Paragon,
        Archetype::Brawler,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Archetype::Gunner => "Gunner",
            Archetype::Bulwark => "Bulwark",
            Archetype::Specialist => "Specialist",
            Archetype::Grenadier => "Grenadier",
            Archetype::Paragon => "Paragon",
            Archetype::Brawler => "Brawler",
        }
    }

    /// 取得原型的屬性配置
    pub fn profile(self) -> &'static ArchetypeProfile {
        &ARCHETYPE_TABLE[self.index()]
    }

    pub fn primary(self) -> Statistic {
        self.profile().primary
    }

    pub fn secondary(self) -> Statistic {
        self.profile().secondary
    }

    /// 可擲出的第三屬性（非主、非副屬性）
    pub fn tertiary_stats(self) -> [Statistic; TERTIARY_COUNT] {
        self.profile().tertiary
    }

    /// 屬性在第三屬性查表中的位置；主/副屬性回傳 None
    pub fn tertiary_slot(self, stat: Statistic) -> Option<usize> {
        self.tertiary_stats().iter().position(|&s| s == stat)
    }

    /// 屬性是否可作為此原型的第三屬性
    pub fn is_tertiary_eligible(self, stat: Statistic) -> bool {
        self.tertiary_slot(stat).is_some()
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Archetype {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Archetype::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| BuildError::InvalidRequest(format!("未知的原型: {}", trimmed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_table_order_matches_enum() {
        for archetype in Archetype::ALL {
            assert_eq!(archetype.profile().archetype, archetype);
        }
    }

    #[rstest]
    #[case(Archetype::Gunner, Statistic::Weapons, Statistic::Grenade)]
    #[case(Archetype::Bulwark, Statistic::Health, Statistic::Class)]
    #[case(Archetype::Specialist, Statistic::Class, Statistic::Weapons)]
    #[case(Archetype::Grenadier, Statistic::Grenade, Statistic::Super)]
    #[case(Archetype::Paragon, Statistic::Super, Statistic::Melee)]
    #[case(Archetype::Brawler, Statistic::Melee, Statistic::Health)]
    fn test_stat_pairs(
        #[case] archetype: Archetype,
        #[case] primary: Statistic,
        #[case] secondary: Statistic,
    ) {
        assert_eq!(archetype.primary(), primary);
        assert_eq!(archetype.secondary(), secondary);
        assert_ne!(primary, secondary);
    }

    #[test]
    fn test_tertiary_excludes_primary_and_secondary() {
        for archetype in Archetype::ALL {
            let tertiary = archetype.tertiary_stats();
            assert!(!tertiary.contains(&archetype.primary()));
            assert!(!tertiary.contains(&archetype.secondary()));

            // 四項第三屬性互不重複，且依屬性順序排列
            for pair in tertiary.windows(2) {
                assert!(pair[0] < pair[1]);
            }
        }
    }

    #[test]
    fn test_tertiary_slot_lookup() {
        // 槍手：武器 / 手榴彈 → 第三屬性為 生命、近戰、超能、職業技能
        let gunner = Archetype::Gunner;
        assert_eq!(
            gunner.tertiary_stats(),
            [Statistic::Health, Statistic::Melee, Statistic::Super, Statistic::Class]
        );
        assert_eq!(gunner.tertiary_slot(Statistic::Super), Some(2));
        assert_eq!(gunner.tertiary_slot(Statistic::Weapons), None);
        assert!(!gunner.is_tertiary_eligible(Statistic::Grenade));
    }

    #[test]
    fn test_each_stat_is_primary_exactly_once() {
        for stat in Statistic::ALL {
            let count = Archetype::ALL.iter().filter(|a| a.primary() == stat).count();
            assert_eq!(count, 1, "{} 應恰為一個原型的主屬性", stat);
        }
    }

    #[test]
    fn test_parse_archetype() {
        assert_eq!("paragon".parse::<Archetype>().unwrap(), Archetype::Paragon);
        assert!("Titan".parse::<Archetype>().is_err());
    }
}
