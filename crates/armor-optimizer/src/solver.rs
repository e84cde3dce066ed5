//! 求解器介面與求解限制

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::expr::{LinearExpr, VarId};
use crate::model::IntegerProgram;
use crate::{OptimizationResult, SolverError};

/// 等待求解結果時檢查時限與取消旗標的間隔
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// 整數規劃求解器
///
/// 回傳最佳（或可行性問題的任一可行）整數解，或明確的無解結果。
/// 不接受近似或部分結果：超過限制時回傳錯誤。
pub trait IntegerSolver {
    /// 求解器名稱（用於日誌）
    fn name(&self) -> &'static str;

    fn solve(
        &self,
        program: &IntegerProgram,
        limits: &SolveLimits,
    ) -> Result<OptimizationResult, SolverError>;
}

/// 取消旗標（由呼叫端持有，可跨執行緒觸發）
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// 要求停止求解
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// 求解限制
#[derive(Debug, Clone, Default)]
pub struct SolveLimits {
    /// 求解時限
    pub time_limit: Option<Duration>,

    /// 取消旗標
    pub cancel: Option<CancelFlag>,
}

impl SolveLimits {
    /// 不設任何限制
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// 建構器模式：設置求解時限
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// 建構器模式：設置取消旗標
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// 檢查是否已超過限制
    pub(crate) fn check(&self, started: Instant) -> Result<(), SolverError> {
        if let Some(flag) = &self.cancel {
            if flag.is_cancelled() {
                return Err(SolverError::Cancelled);
            }
        }

        if let Some(limit) = self.time_limit {
            if started.elapsed() >= limit {
                return Err(SolverError::TimeLimit {
                    limit_ms: limit.as_millis(),
                });
            }
        }

        Ok(())
    }

    /// 距離時限還能等待多久（不超過輪詢間隔）
    fn next_wait(&self, started: Instant) -> Duration {
        match self.time_limit {
            Some(limit) => limit.saturating_sub(started.elapsed()).min(POLL_INTERVAL),
            None => POLL_INTERVAL,
        }
    }
}

/// 在背景執行緒執行求解工作，等待期間持續檢查時限與取消旗標
///
/// 超過限制時立即回傳錯誤並放棄背景工作，其結果會被丟棄。
pub(crate) fn supervise<T, F>(limits: &SolveLimits, job: F) -> Result<T, SolverError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, SolverError> + Send + 'static,
{
    let started = Instant::now();
    limits.check(started)?;

    let (sender, receiver) = mpsc::channel();
    thread::Builder::new()
        .name("armor-solver".to_string())
        .spawn(move || {
            // 接收端可能已因逾時離開
            let _ = sender.send(job());
        })
        .map_err(|e| SolverError::Backend(format!("無法啟動求解執行緒: {}", e)))?;

    loop {
        match receiver.recv_timeout(limits.next_wait(started)) {
            Ok(result) => return result,
            Err(RecvTimeoutError::Timeout) => {
                if let Err(error) = limits.check(started) {
                    tracing::debug!("放棄背景求解工作: {}", error);
                    return Err(error);
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(SolverError::Backend("求解執行緒異常結束".to_string()));
            }
        }
    }
}

/// 整數解
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    values: Vec<i64>,
    objective: Option<i64>,
}

impl Solution {
    pub fn new(values: Vec<i64>, objective: Option<i64>) -> Self {
        Self { values, objective }
    }

    /// 變數值
    pub fn value(&self, var: VarId) -> i64 {
        self.values[var.index()]
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// 目標函數值（可行性問題為 None）
    pub fn objective(&self) -> Option<i64> {
        self.objective
    }

    /// 以此解計算任意表達式
    pub fn evaluate(&self, expr: &LinearExpr) -> i64 {
        expr.evaluate(&self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_flag_shared() {
        let flag = CancelFlag::new();
        let limits = SolveLimits::unlimited().with_cancel_flag(flag.clone());
        assert!(limits.check(Instant::now()).is_ok());

        flag.cancel();
        assert_eq!(limits.check(Instant::now()), Err(SolverError::Cancelled));
    }

    #[test]
    fn test_zero_time_limit_trips_immediately() {
        let limits = SolveLimits::unlimited().with_time_limit(Duration::ZERO);
        assert!(matches!(
            limits.check(Instant::now()),
            Err(SolverError::TimeLimit { limit_ms: 0 })
        ));
    }

    #[test]
    fn test_supervise_returns_job_result() {
        let result = supervise(&SolveLimits::unlimited(), || Ok(42));
        assert_eq!(result, Ok(42));

        let failed: Result<i32, _> = supervise(&SolveLimits::unlimited(), || {
            Err(SolverError::Backend("x".to_string()))
        });
        assert!(matches!(failed, Err(SolverError::Backend(_))));
    }

    #[test]
    fn test_supervise_stops_at_time_limit() {
        let limits = SolveLimits::unlimited().with_time_limit(Duration::from_millis(20));
        let started = Instant::now();
        let result = supervise(&limits, || {
            thread::sleep(Duration::from_secs(2));
            Ok(())
        });
        assert!(matches!(result, Err(SolverError::TimeLimit { limit_ms: 20 })));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_supervise_stops_when_cancelled_mid_solve() {
        let flag = CancelFlag::new();
        let limits = SolveLimits::unlimited().with_cancel_flag(flag.clone());

        let trigger = flag.clone();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            trigger.cancel();
        });

        let started = Instant::now();
        let result = supervise(&limits, || {
            thread::sleep(Duration::from_secs(2));
            Ok(())
        });
        canceller.join().unwrap();

        assert_eq!(result, Err(SolverError::Cancelled));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_solution_evaluate() {
        let solution = Solution::new(vec![2, 3], Some(7));
        let expr = LinearExpr::term(VarId(0), 2) + LinearExpr::term(VarId(1), 1);
        assert_eq!(solution.evaluate(&expr), 7);
        assert_eq!(solution.value(VarId(1)), 3);
        assert_eq!(solution.objective(), Some(7));
    }
}
