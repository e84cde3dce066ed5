//! 將整數解解碼為配裝結果

use std::collections::BTreeMap;

use armor_core::{Archetype, BuildError, BuildResult, Statistic};
use armor_optimizer::Solution;

use crate::model_builder::BuildModel;

/// 變數值轉為非負件數
fn count(value: i64, what: &str) -> armor_core::Result<u32> {
    u32::try_from(value)
        .map_err(|_| BuildError::SolverError(format!("{} 的解值 {} 超出範圍", what, value)))
}

/// 從求解結果組出配裝結果
///
/// 屬性總點數直接以模型中的總點數表達式代入解值，不另行重算。
pub fn decode(model: &BuildModel, solution: &Solution) -> armor_core::Result<BuildResult> {
    let vars = &model.vars;

    let mut pieces = BTreeMap::new();
    let mut exotic = None;
    let mut tertiaries = BTreeMap::new();

    for archetype in Archetype::ALL {
        let a = archetype.index();
        pieces.insert(
            archetype,
            count(solution.value(vars.pieces[a]), "pieces")?,
        );

        if solution.value(vars.exotic[a]) == 1 {
            if let Some(previous) = exotic {
                return Err(BuildError::SolverError(format!(
                    "異域裝備同時指派給 {} 與 {}",
                    previous, archetype
                )));
            }
            exotic = Some(archetype);
        }

        let mut per_stat = BTreeMap::new();
        for (slot, stat) in archetype.tertiary_stats().into_iter().enumerate() {
            let regular = solution.value(vars.tertiary[a][slot]);
            let from_exotic = solution.value(vars.tertiary_exotic[a][slot]);
            per_stat.insert(stat, count(regular + from_exotic, "tertiary")?);
        }
        tertiaries.insert(archetype, per_stat);
    }

    let mut major_mods = BTreeMap::new();
    let mut minor_mods = BTreeMap::new();
    let mut totals = BTreeMap::new();

    for stat in Statistic::ALL {
        let s = stat.index();

        let major = count(solution.value(vars.major_mods[s]), "major_mod")?;
        if major > 0 {
            major_mods.insert(stat, major);
        }
        let minor = count(solution.value(vars.minor_mods[s]), "minor_mod")?;
        if minor > 0 {
            minor_mods.insert(stat, minor);
        }

        let total = solution.evaluate(model.total_expr(stat));
        totals.insert(stat, count(total, stat.name())?);
    }

    Ok(BuildResult {
        pieces,
        exotic,
        tertiaries,
        major_mods,
        minor_mods,
        totals,
        calculation_time_ms: None,
    })
}
