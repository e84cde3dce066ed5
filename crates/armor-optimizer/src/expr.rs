//! 線性整數表達式

use std::collections::BTreeMap;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// 決策變數識別碼（模型內的索引）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub(crate) usize);

impl VarId {
    /// 變數在模型中的索引
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// 整數係數線性表達式：Σ cᵢ·xᵢ + k
///
/// 相同變數的係數會自動合併，係數為 0 的項會被移除。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    terms: BTreeMap<VarId, i64>,
    constant: i64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// 單項表達式 coef·var
    pub fn term(var: VarId, coef: i64) -> Self {
        let mut expr = Self::new();
        expr.add_term(var, coef);
        expr
    }

    /// 多個變數的總和（係數皆為 1）
    pub fn sum_of<I: IntoIterator<Item = VarId>>(vars: I) -> Self {
        let mut expr = Self::new();
        for var in vars {
            expr.add_term(var, 1);
        }
        expr
    }

    /// 加入一項 coef·var
    pub fn add_term(&mut self, var: VarId, coef: i64) {
        if coef == 0 {
            return;
        }
        let entry = self.terms.entry(var).or_insert(0);
        *entry += coef;
        if *entry == 0 {
            self.terms.remove(&var);
        }
    }

    /// 變數係數（不存在為 0）
    pub fn coefficient(&self, var: VarId) -> i64 {
        self.terms.get(&var).copied().unwrap_or(0)
    }

    /// 所有非零項（依變數索引排序）
    pub fn terms(&self) -> impl Iterator<Item = (VarId, i64)> + '_ {
        self.terms.iter().map(|(&var, &coef)| (var, coef))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// 以給定的變數值計算表達式
    pub fn evaluate(&self, values: &[i64]) -> i64 {
        self.constant
            + self
                .terms
                .iter()
                .map(|(var, coef)| coef * values[var.0])
                .sum::<i64>()
    }

    /// 拆分為（僅含變數項的表達式, 常數）
    pub(crate) fn split_constant(mut self) -> (Self, i64) {
        let constant = self.constant;
        self.constant = 0;
        (self, constant)
    }
}

impl From<VarId> for LinearExpr {
    fn from(var: VarId) -> Self {
        LinearExpr::term(var, 1)
    }
}

impl From<i64> for LinearExpr {
    fn from(value: i64) -> Self {
        Self {
            terms: BTreeMap::new(),
            constant: value,
        }
    }
}

impl From<i32> for LinearExpr {
    fn from(value: i32) -> Self {
        LinearExpr::from(i64::from(value))
    }
}

impl AddAssign for LinearExpr {
    fn add_assign(&mut self, rhs: LinearExpr) {
        for (var, coef) in rhs.terms {
            self.add_term(var, coef);
        }
        self.constant += rhs.constant;
    }
}

impl SubAssign for LinearExpr {
    fn sub_assign(&mut self, rhs: LinearExpr) {
        *self += -rhs;
    }
}

impl Add for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: LinearExpr) -> LinearExpr {
        self += rhs;
        self
    }
}

impl Sub for LinearExpr {
    type Output = LinearExpr;

    fn sub(mut self, rhs: LinearExpr) -> LinearExpr {
        self -= rhs;
        self
    }
}

impl Mul<i64> for LinearExpr {
    type Output = LinearExpr;

    fn mul(self, factor: i64) -> LinearExpr {
        if factor == 0 {
            return LinearExpr::new();
        }
        LinearExpr {
            terms: self
                .terms
                .into_iter()
                .map(|(var, coef)| (var, coef * factor))
                .collect(),
            constant: self.constant * factor,
        }
    }
}

impl Neg for LinearExpr {
    type Output = LinearExpr;

    fn neg(self) -> LinearExpr {
        self * -1
    }
}

impl Sum for LinearExpr {
    fn sum<I: Iterator<Item = LinearExpr>>(iter: I) -> Self {
        iter.fold(LinearExpr::new(), |acc, expr| acc + expr)
    }
}

impl fmt::Display for LinearExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (var, coef) in self.terms() {
            if first {
                write!(f, "{}·{}", coef, var)?;
                first = false;
            } else if coef < 0 {
                write!(f, " - {}·{}", -coef, var)?;
            } else {
                write!(f, " + {}·{}", coef, var)?;
            }
        }
        if first {
            write!(f, "{}", self.constant)
        } else if self.constant != 0 {
            write!(f, " + {}", self.constant)
        } else {
            Ok(())
        }
    }
}
