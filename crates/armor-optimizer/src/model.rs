//! 有界整數線性規劃模型
//!
//! 一個請求建立一個模型，所有變數與約束都配置在同一個模型物件中，
//! 求解與解碼後整個丟棄。

use std::fmt;

use crate::expr::{LinearExpr, VarId};
use crate::SolverError;

/// 整數決策變數
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub lower: i64,
    pub upper: i64,
}

/// 約束方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    LessEq,
    Equal,
    GreaterEq,
}

impl fmt::Display for ConstraintSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConstraintSense::LessEq => "<=",
            ConstraintSense::Equal => "==",
            ConstraintSense::GreaterEq => ">=",
        })
    }
}

/// 線性約束：expr (sense) rhs，常數已移至右側
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    name: String,
    expr: LinearExpr,
    sense: ConstraintSense,
    rhs: i64,
}

impl Constraint {
    /// 創建約束 lhs (sense) rhs
    pub fn new(
        name: impl Into<String>,
        lhs: LinearExpr,
        sense: ConstraintSense,
        rhs: impl Into<LinearExpr>,
    ) -> Self {
        let (expr, constant) = (lhs - rhs.into()).split_constant();
        Self {
            name: name.into(),
            expr,
            sense,
            rhs: -constant,
        }
    }

    pub fn equal(name: impl Into<String>, lhs: LinearExpr, rhs: impl Into<LinearExpr>) -> Self {
        Self::new(name, lhs, ConstraintSense::Equal, rhs)
    }

    pub fn less_eq(name: impl Into<String>, lhs: LinearExpr, rhs: impl Into<LinearExpr>) -> Self {
        Self::new(name, lhs, ConstraintSense::LessEq, rhs)
    }

    pub fn greater_eq(name: impl Into<String>, lhs: LinearExpr, rhs: impl Into<LinearExpr>) -> Self {
        Self::new(name, lhs, ConstraintSense::GreaterEq, rhs)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expr(&self) -> &LinearExpr {
        &self.expr
    }

    pub fn sense(&self) -> ConstraintSense {
        self.sense
    }

    pub fn rhs(&self) -> i64 {
        self.rhs
    }

    /// 檢查給定變數值是否滿足約束
    pub fn is_satisfied(&self, values: &[i64]) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.sense {
            ConstraintSense::LessEq => lhs <= self.rhs,
            ConstraintSense::Equal => lhs == self.rhs,
            ConstraintSense::GreaterEq => lhs >= self.rhs,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {} {}", self.name, self.expr, self.sense, self.rhs)
    }
}

/// 最大化目標
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Objective {
    pub expr: LinearExpr,
}

/// 有界整數線性規劃
///
/// 沒有設定目標函數時為可行性問題：任何滿足所有約束的解皆可接受。
#[derive(Debug, Clone, Default)]
pub struct IntegerProgram {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: Option<Objective>,
}

impl IntegerProgram {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 新增整數變數 lower ≤ x ≤ upper
    pub fn add_integer(&mut self, name: impl Into<String>, lower: i64, upper: i64) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(Variable {
            name: name.into(),
            lower,
            upper,
        });
        id
    }

    /// 新增 0/1 變數
    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        self.add_integer(name, 0, 1)
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// 設置最大化目標
    pub fn maximize(&mut self, expr: LinearExpr) {
        self.objective = Some(Objective { expr });
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id.0]
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn objective(&self) -> Option<&Objective> {
        self.objective.as_ref()
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// 檢查模型是否合法（變數界限、變數索引）
    pub fn validate(&self) -> Result<(), SolverError> {
        for var in &self.variables {
            if var.lower > var.upper {
                return Err(SolverError::InvalidModel(format!(
                    "變數 {} 的下界 {} 大於上界 {}",
                    var.name, var.lower, var.upper
                )));
            }
        }

        let exprs = self
            .constraints
            .iter()
            .map(|c| (c.name(), c.expr()))
            .chain(self.objective.iter().map(|o| ("objective", &o.expr)));
        for (name, expr) in exprs {
            if let Some((var, _)) = expr.terms().find(|(v, _)| v.0 >= self.variables.len()) {
                return Err(SolverError::InvalidModel(format!(
                    "{} 引用了不存在的變數 {}",
                    name, var
                )));
            }
        }

        Ok(())
    }

    /// 以精確整數運算檢查一組變數值是否可行
    pub fn is_feasible(&self, values: &[i64]) -> bool {
        values.len() == self.variables.len()
            && self
                .variables
                .iter()
                .zip(values)
                .all(|(var, &v)| var.lower <= v && v <= var.upper)
            && self.constraints.iter().all(|c| c.is_satisfied(values))
    }

    /// 目標函數值（可行性問題為 None）
    pub fn objective_value(&self, values: &[i64]) -> Option<i64> {
        self.objective.as_ref().map(|o| o.expr.evaluate(values))
    }
}
