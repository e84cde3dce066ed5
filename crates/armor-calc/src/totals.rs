//! 屬性總點數推導
//!
//! total(s) = Σₐ [ 一般裝備：主 30 / 副 25 / 第三 20 / 其餘保底 5
//!               + 異域裝備：主 30 / 副 20 / 第三 13 / 其餘保底 5 ]
//!          + 10·majorMod[s] + 5·minorMod[s]
//!
//! 指示函數 𝟙(primary(a)=s) 在建模時已知，只決定某項是否納入表達式，
//! 不會在模型中形成變數乘積。保底項扣除已計入主/副/第三屬性的件數。

use armor_core::rules::{PiecePoints, EXOTIC_PIECE, MAJOR_MOD_POINTS, MINOR_MOD_POINTS, STANDARD_PIECE};
use armor_core::{Archetype, Statistic};
use armor_optimizer::{LinearExpr, VarId};

use crate::variables::BuildVariables;

/// 單一原型、單一類裝備（一般或異域）對屬性 s 的貢獻
fn piece_contribution(
    archetype: Archetype,
    stat: Statistic,
    count: VarId,
    tertiary: Option<VarId>,
    points: &PiecePoints,
) -> LinearExpr {
    let is_primary = archetype.primary() == stat;
    let is_secondary = archetype.secondary() == stat;

    let mut expr = LinearExpr::new();
    let mut off_stat = LinearExpr::from(count);

    if is_primary {
        expr += LinearExpr::term(count, points.primary);
        off_stat -= LinearExpr::from(count);
    }
    if is_secondary {
        expr += LinearExpr::term(count, points.secondary);
        off_stat -= LinearExpr::from(count);
    }
    if let Some(t) = tertiary {
        expr += LinearExpr::term(t, points.tertiary);
        off_stat -= LinearExpr::from(t);
    }

    expr + off_stat * points.floor
}

/// 屬性 s 的總點數表達式
pub fn stat_total(vars: &BuildVariables, stat: Statistic) -> LinearExpr {
    let mut total = LinearExpr::new();

    for archetype in Archetype::ALL {
        let a = archetype.index();
        total += piece_contribution(
            archetype,
            stat,
            vars.pieces[a],
            vars.tertiary_var(archetype, stat),
            &STANDARD_PIECE,
        );
        total += piece_contribution(
            archetype,
            stat,
            vars.exotic[a],
            vars.tertiary_exotic_var(archetype, stat),
            &EXOTIC_PIECE,
        );
    }

    let s = stat.index();
    total += LinearExpr::term(vars.major_mods[s], MAJOR_MOD_POINTS);
    total += LinearExpr::term(vars.minor_mods[s], MINOR_MOD_POINTS);
    total
}

/// 所有屬性的總點數表達式（依屬性固定順序）
pub fn all_stat_totals(vars: &BuildVariables) -> [LinearExpr; Statistic::COUNT] {
    Statistic::ALL.map(|stat| stat_total(vars, stat))
}

/// 封閉式總點數：90·Σpieces + 78·Σexotic + 10·Σmajor + 5·Σminor
pub fn closed_form_budget(vars: &BuildVariables) -> LinearExpr {
    vars.total_pieces() * STANDARD_PIECE.budget()
        + vars.total_exotic() * EXOTIC_PIECE.budget()
        + vars.total_major_mods() * MAJOR_MOD_POINTS
        + vars.total_minor_mods() * MINOR_MOD_POINTS
}
