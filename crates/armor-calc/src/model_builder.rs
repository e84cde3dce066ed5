//! 配裝整數規劃模型建構

use armor_core::rules::{MAX_EXOTIC_PIECES, PIECES_PER_BUILD};
use armor_core::{Archetype, BuildRequest, Statistic};
use armor_optimizer::{Constraint, IntegerProgram, LinearExpr};

use crate::totals::{all_stat_totals, closed_form_budget};
use crate::variables::BuildVariables;

/// 單一請求的完整模型
///
/// 變數、約束與各屬性總點數表達式都屬於同一個模型物件，
/// 解碼完成後整個丟棄。
#[derive(Debug, Clone)]
pub struct BuildModel {
    pub program: IntegerProgram,
    pub vars: BuildVariables,
    /// 各屬性總點數表達式，索引與 `Statistic::index()` 一致
    pub totals: [LinearExpr; Statistic::COUNT],
}

impl BuildModel {
    /// 依請求建立模型（請求須已通過驗證）
    pub fn build(request: &BuildRequest) -> Self {
        let mut program = IntegerProgram::new("armor_build");
        let vars = BuildVariables::allocate(&mut program);
        let totals = all_stat_totals(&vars);

        // 裝備總件數（一般 + 異域）
        program.add_constraint(Constraint::equal(
            "pieces_total",
            vars.total_pieces() + vars.total_exotic(),
            i64::from(PIECES_PER_BUILD),
        ));

        // 異域裝備使用與否
        let exotic_count = if request.use_exotic {
            i64::from(MAX_EXOTIC_PIECES)
        } else {
            0
        };
        program.add_constraint(Constraint::equal(
            "exotic_count",
            vars.total_exotic(),
            exotic_count,
        ));

        // 每件裝備恰有一個第三屬性
        for archetype in Archetype::ALL {
            let a = archetype.index();
            program.add_constraint(Constraint::equal(
                format!("tertiary_sum_{}", archetype),
                LinearExpr::sum_of(vars.tertiary[a]),
                vars.pieces[a],
            ));
            program.add_constraint(Constraint::equal(
                format!("tertiary_exotic_sum_{}", archetype),
                LinearExpr::sum_of(vars.tertiary_exotic[a]),
                vars.exotic[a],
            ));
        }

        // 大型模組必須全數裝上，小型模組可少於請求數量
        program.add_constraint(Constraint::equal(
            "major_mods",
            vars.total_major_mods(),
            i64::from(request.major_mods),
        ));
        program.add_constraint(Constraint::less_eq(
            "minor_mods",
            vars.total_minor_mods(),
            i64::from(request.minor_mods),
        ));

        for stat in Statistic::ALL {
            program.add_constraint(Constraint::greater_eq(
                format!("minimum_{}", stat),
                totals[stat.index()].clone(),
                i64::from(request.minimum(stat)),
            ));
        }

        // 總點數恆等式
        program.add_constraint(Constraint::equal(
            "stat_budget",
            totals.iter().cloned().sum::<LinearExpr>(),
            closed_form_budget(&vars),
        ));

        if let Some(priority) = request.priority {
            program.maximize(totals[priority.index()].clone());
        }

        tracing::debug!(
            "模型建立完成：{} 個變數，{} 條約束，優先屬性 {:?}",
            program.num_variables(),
            program.num_constraints(),
            request.priority
        );

        Self {
            program,
            vars,
            totals,
        }
    }

    /// 屬性總點數表達式
    pub fn total_expr(&self, stat: Statistic) -> &LinearExpr {
        &self.totals[stat.index()]
    }
}
