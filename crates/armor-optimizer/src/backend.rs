//! good_lp 求解後端
//!
//! 模型在背景執行緒中轉譯為 good_lp 問題後交給後端求解；
//! 回傳的浮點解一律四捨五入並以精確整數運算重新驗證。

use std::time::Instant;

use good_lp::{
    variable, Expression, ProblemVariables, ResolutionError, Solution as _, SolverModel,
    Variable as LpVariable,
};

use crate::expr::LinearExpr;
use crate::model::{ConstraintSense, IntegerProgram};
use crate::solver::{supervise, IntegerSolver, SolveLimits, Solution};
use crate::{OptimizationResult, SolverError};

/// 轉譯後的 good_lp 問題
struct LpProblem {
    variables: ProblemVariables,
    columns: Vec<LpVariable>,
    objective: Expression,
    constraints: Vec<good_lp::Constraint>,
}

fn expression(expr: &LinearExpr, columns: &[LpVariable]) -> Expression {
    let mut lp = Expression::with_capacity(expr.len());
    for (var, coef) in expr.terms() {
        lp.add_mul(coef as f64, columns[var.index()]);
    }
    lp
}

fn translate(program: &IntegerProgram) -> LpProblem {
    let mut variables = ProblemVariables::new();
    let columns: Vec<LpVariable> = program
        .variables()
        .iter()
        .map(|var| {
            variables.add(
                variable()
                    .integer()
                    .min(var.lower as f64)
                    .max(var.upper as f64)
                    .name(var.name.clone()),
            )
        })
        .collect();

    let objective = match program.objective() {
        Some(objective) => expression(&objective.expr, &columns),
        None => Expression::with_capacity(0),
    };

    let constraints = program
        .constraints()
        .iter()
        .map(|constraint| {
            let rhs = constraint.rhs() as f64;
            match constraint.sense() {
                ConstraintSense::LessEq => {
                    good_lp::constraint::leq(expression(constraint.expr(), &columns), rhs)
                }
                ConstraintSense::Equal => {
                    good_lp::constraint::eq(expression(constraint.expr(), &columns), rhs)
                }
                // a·x ≥ b 改寫為 −a·x ≤ −b
                ConstraintSense::GreaterEq => {
                    let negated = -constraint.expr().clone();
                    good_lp::constraint::leq(expression(&negated, &columns), -rhs)
                }
            }
        })
        .collect();

    LpProblem {
        variables,
        columns,
        objective,
        constraints,
    }
}

/// 加入約束並求解；無解時回傳 None
fn solve_model<M>(
    mut model: M,
    constraints: Vec<good_lp::Constraint>,
    columns: &[LpVariable],
) -> Result<Option<Vec<f64>>, SolverError>
where
    M: SolverModel<Error = ResolutionError>,
{
    for constraint in constraints {
        model.add_constraint(constraint);
    }

    match model.solve() {
        Ok(solution) => Ok(Some(columns.iter().map(|&c| solution.value(c)).collect())),
        Err(ResolutionError::Infeasible) => Ok(None),
        Err(e) => Err(SolverError::Backend(e.to_string())),
    }
}

/// 將後端的浮點解轉為整數解並驗證
fn integral_values(program: &IntegerProgram, raw: &[f64]) -> Result<Vec<i64>, SolverError> {
    if raw.len() != program.num_variables() {
        return Err(SolverError::Backend(format!(
            "後端回傳 {} 個變數值，模型有 {} 個變數",
            raw.len(),
            program.num_variables()
        )));
    }

    if let Some(bad) = raw.iter().find(|v| !v.is_finite()) {
        return Err(SolverError::Backend(format!("後端回傳非有限值 {}", bad)));
    }

    let values: Vec<i64> = raw.iter().map(|v| v.round() as i64).collect();
    if !program.is_feasible(&values) {
        return Err(SolverError::Backend(
            "後端回傳的解未通過整數驗證".to_string(),
        ));
    }

    Ok(values)
}

/// 驗證模型、在監督下執行後端並整理結果
fn run<F>(
    program: &IntegerProgram,
    limits: &SolveLimits,
    backend: F,
) -> Result<OptimizationResult, SolverError>
where
    F: FnOnce(LpProblem) -> Result<Option<Vec<f64>>, SolverError> + Send + 'static,
{
    program.validate()?;

    let started = Instant::now();
    let owned = program.clone();
    let raw = supervise(limits, move || backend(translate(&owned)))?;
    let elapsed = started.elapsed();

    match raw {
        Some(raw) => {
            let values = integral_values(program, &raw)?;
            let objective = program.objective_value(&values);
            Ok(OptimizationResult::optimal(
                Solution::new(values, objective),
                elapsed,
            ))
        }
        None => Ok(OptimizationResult::infeasible(elapsed)),
    }
}

/// microlp 純 Rust 求解器（預設後端）
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl IntegerSolver for MicroLpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(
        &self,
        program: &IntegerProgram,
        limits: &SolveLimits,
    ) -> Result<OptimizationResult, SolverError> {
        run(program, limits, |problem| {
            let model = problem
                .variables
                .maximise(problem.objective)
                .using(good_lp::microlp);
            solve_model(model, problem.constraints, &problem.columns)
        })
    }
}

/// HiGHS MIP 求解器（`highs` feature，需 C++ 工具鏈）
#[cfg(feature = "highs")]
#[derive(Debug, Clone, Copy, Default)]
pub struct HighsSolver;

#[cfg(feature = "highs")]
impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "highs")]
impl IntegerSolver for HighsSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve(
        &self,
        program: &IntegerProgram,
        limits: &SolveLimits,
    ) -> Result<OptimizationResult, SolverError> {
        run(program, limits, |problem| {
            let model = problem
                .variables
                .maximise(problem.objective)
                .using(good_lp::highs);
            solve_model(model, problem.constraints, &problem.columns)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Constraint;
    use proptest::prelude::*;
    use std::time::Duration;

    fn knapsack() -> IntegerProgram {
        let mut program = IntegerProgram::new("knapsack");
        let x = program.add_integer("x", 0, 10);
        let y = program.add_integer("y", 0, 10);
        program.add_constraint(Constraint::less_eq(
            "cap",
            LinearExpr::term(x, 3) + LinearExpr::term(y, 4),
            17,
        ));
        program.maximize(LinearExpr::term(x, 5) + LinearExpr::term(y, 7));
        program
    }

    #[test]
    fn test_microlp_finds_integer_optimum() {
        // x = 3, y = 2：3·3 + 4·2 = 17，目標 29
        let result = MicroLpSolver::new()
            .solve(&knapsack(), &SolveLimits::unlimited())
            .unwrap();
        assert!(result.is_feasible());
        let solution = result.solution.unwrap();
        assert_eq!(solution.objective(), Some(29));
        assert_eq!(solution.values(), &[3, 2]);
    }

    #[test]
    fn test_microlp_equality_and_lower_bound() {
        let mut program = IntegerProgram::new("eq");
        let x = program.add_integer("x", 0, 5);
        let y = program.add_integer("y", 0, 5);
        let b = program.add_binary("b");
        program.add_constraint(Constraint::equal("sum", LinearExpr::sum_of([x, y]), 7));
        program.add_constraint(Constraint::greater_eq(
            "floor",
            LinearExpr::term(y, 2) + LinearExpr::term(b, 3),
            9,
        ));
        program.maximize(LinearExpr::from(x));

        let result = MicroLpSolver::new()
            .solve(&program, &SolveLimits::unlimited())
            .unwrap();
        let solution = result.solution.unwrap();
        // y ≥ 3 且 b = 1 ⇒ x = 4
        assert_eq!(solution.value(x), 4);
        assert_eq!(solution.value(y), 3);
        assert_eq!(solution.value(b), 1);
    }

    #[test]
    fn test_feasibility_problem_without_objective() {
        let mut program = IntegerProgram::new("feasibility");
        let x = program.add_integer("x", 0, 5);
        program.add_constraint(Constraint::greater_eq("c", LinearExpr::term(x, 30), 120));

        let result = MicroLpSolver::new()
            .solve(&program, &SolveLimits::unlimited())
            .unwrap();
        let solution = result.solution.unwrap();
        assert!(solution.value(x) >= 4);
        assert_eq!(solution.objective(), None);
    }

    #[test]
    fn test_microlp_reports_infeasible() {
        let mut program = IntegerProgram::new("infeasible");
        let x = program.add_integer("x", 0, 5);
        program.add_constraint(Constraint::greater_eq("c", LinearExpr::term(x, 30), 200));

        let result = MicroLpSolver::new()
            .solve(&program, &SolveLimits::unlimited())
            .unwrap();
        assert!(!result.is_feasible());
        assert!(result.solution.is_none());
    }

    #[test]
    fn test_invalid_model_rejected_before_solving() {
        let mut program = IntegerProgram::new("bad");
        program.add_integer("x", 3, 2);
        let result = MicroLpSolver::new().solve(&program, &SolveLimits::unlimited());
        assert!(matches!(result, Err(SolverError::InvalidModel(_))));
    }

    #[test]
    fn test_limits_apply_to_backend() {
        let limits = SolveLimits::unlimited().with_time_limit(Duration::ZERO);
        let result = MicroLpSolver::new().solve(&knapsack(), &limits);
        assert!(matches!(result, Err(SolverError::TimeLimit { .. })));
    }

    #[test]
    fn test_integral_values_rejects_column_mismatch() {
        let program = knapsack();
        let result = integral_values(&program, &[3.0]);
        assert!(matches!(result, Err(SolverError::Backend(_))));
    }

    #[test]
    fn test_integral_values_rounds_and_verifies() {
        let program = knapsack();
        assert_eq!(integral_values(&program, &[2.9999999, 2.0000001]), Ok(vec![3, 2]));
        // 4·3 + 2·4 = 20 > 17
        assert!(integral_values(&program, &[4.0, 2.0]).is_err());
        assert!(integral_values(&program, &[f64::NAN, 0.0]).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn test_microlp_matches_enumeration(
            a in 1i64..6,
            b in 1i64..6,
            cap in 0i64..30,
            p in 1i64..9,
            q in 1i64..9,
        ) {
            let mut program = IntegerProgram::new("enumeration");
            let x = program.add_integer("x", 0, 6);
            let y = program.add_integer("y", 0, 6);
            program.add_constraint(Constraint::less_eq(
                "cap",
                LinearExpr::term(x, a) + LinearExpr::term(y, b),
                cap,
            ));
            program.maximize(LinearExpr::term(x, p) + LinearExpr::term(y, q));

            let best = (0..=6)
                .flat_map(|i| (0..=6).map(move |j| (i, j)))
                .filter(|&(i, j)| a * i + b * j <= cap)
                .map(|(i, j)| p * i + q * j)
                .max();

            let result = MicroLpSolver::new()
                .solve(&program, &SolveLimits::unlimited())
                .unwrap();
            prop_assert_eq!(result.solution.and_then(|s| s.objective()), best);
        }
    }

    #[cfg(feature = "highs")]
    #[test]
    fn test_highs_matches_microlp() {
        let limits = SolveLimits::unlimited();
        let highs = HighsSolver::new().solve(&knapsack(), &limits).unwrap();
        let micro = MicroLpSolver::new().solve(&knapsack(), &limits).unwrap();
        assert_eq!(
            highs.solution.unwrap().objective(),
            micro.solution.unwrap().objective()
        );
    }
}
