//! 配裝模型的決策變數

use armor_core::rules::{MAX_MAJOR_PER_STAT, MAX_MINOR_PER_STAT, PIECES_PER_BUILD};
use armor_core::{Archetype, Statistic, TERTIARY_COUNT};
use armor_optimizer::{IntegerProgram, LinearExpr, VarId};

/// 單次求解使用的所有決策變數
///
/// 第三屬性變數依 `Archetype::tertiary_stats()` 的順序排列，
/// 主/副屬性沒有對應的第三屬性變數。
#[derive(Debug, Clone)]
pub struct BuildVariables {
    /// 各原型的一般裝備件數 ∈ [0, 5]
    pub pieces: [VarId; Archetype::COUNT],

    /// 異域裝備是否屬於該原型 ∈ {0, 1}
    pub exotic: [VarId; Archetype::COUNT],

    /// 一般裝備第三屬性落在各可用屬性的件數 ∈ [0, 5]
    pub tertiary: [[VarId; TERTIARY_COUNT]; Archetype::COUNT],

    /// 異域裝備的第三屬性 ∈ {0, 1}
    pub tertiary_exotic: [[VarId; TERTIARY_COUNT]; Archetype::COUNT],

    /// 各屬性大型模組數 ∈ [0, 5]
    pub major_mods: [VarId; Statistic::COUNT],

    /// 各屬性小型模組數 ∈ [0, 2]
    pub minor_mods: [VarId; Statistic::COUNT],
}

impl BuildVariables {
    /// 在模型中配置所有變數
    pub fn allocate(program: &mut IntegerProgram) -> Self {
        let max_pieces = i64::from(PIECES_PER_BUILD);

        let pieces = Archetype::ALL
            .map(|a| program.add_integer(format!("pieces_{}", a), 0, max_pieces));
        let exotic = Archetype::ALL.map(|a| program.add_binary(format!("exotic_{}", a)));

        let tertiary = Archetype::ALL.map(|a| {
            a.tertiary_stats()
                .map(|s| program.add_integer(format!("tertiary_{}_{}", a, s), 0, max_pieces))
        });
        let tertiary_exotic = Archetype::ALL.map(|a| {
            a.tertiary_stats()
                .map(|s| program.add_binary(format!("tertiary_exotic_{}_{}", a, s)))
        });

        let major_mods = Statistic::ALL.map(|s| {
            program.add_integer(format!("major_mod_{}", s), 0, i64::from(MAX_MAJOR_PER_STAT))
        });
        let minor_mods = Statistic::ALL.map(|s| {
            program.add_integer(format!("minor_mod_{}", s), 0, i64::from(MAX_MINOR_PER_STAT))
        });

        Self {
            pieces,
            exotic,
            tertiary,
            tertiary_exotic,
            major_mods,
            minor_mods,
        }
    }

    /// 原型在某屬性上的一般裝備第三屬性變數（主/副屬性為 None）
    pub fn tertiary_var(&self, archetype: Archetype, stat: Statistic) -> Option<VarId> {
        archetype
            .tertiary_slot(stat)
            .map(|slot| self.tertiary[archetype.index()][slot])
    }

    /// 原型在某屬性上的異域裝備第三屬性變數（主/副屬性為 None）
    pub fn tertiary_exotic_var(&self, archetype: Archetype, stat: Statistic) -> Option<VarId> {
        archetype
            .tertiary_slot(stat)
            .map(|slot| self.tertiary_exotic[archetype.index()][slot])
    }

    /// Σ pieces[a]
    pub fn total_pieces(&self) -> LinearExpr {
        LinearExpr::sum_of(self.pieces)
    }

    /// Σ exotic[a]
    pub fn total_exotic(&self) -> LinearExpr {
        LinearExpr::sum_of(self.exotic)
    }

    /// Σ majorMod[s]
    pub fn total_major_mods(&self) -> LinearExpr {
        LinearExpr::sum_of(self.major_mods)
    }

    /// Σ minorMod[s]
    pub fn total_minor_mods(&self) -> LinearExpr {
        LinearExpr::sum_of(self.minor_mods)
    }
}
