//! 配裝主計算器

use std::time::Instant;

use armor_core::{BuildError, BuildRequest, BuildResult, SolverBackend, SolverConfig};
use armor_optimizer::{
    CancelFlag, IntegerSolver, MicroLpSolver, SolveLimits, SolveStatus, SolverError,
};

use crate::decoder;
use crate::model_builder::BuildModel;

/// 配裝計算器
///
/// 每次 `compute` 都建立獨立的模型，計算器本身不保存任何請求狀態。
#[derive(Debug, Clone, Default)]
pub struct BuildCalculator {
    /// 求解器配置
    config: SolverConfig,

    /// 外部取消旗標
    cancel: Option<CancelFlag>,
}

impl BuildCalculator {
    /// 以預設配置創建計算器
    pub fn new() -> Self {
        Self::default()
    }

    /// 以指定配置創建計算器
    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// 建構器模式：掛上取消旗標
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// 主計算入口
    pub fn compute(&self, request: &BuildRequest) -> armor_core::Result<BuildResult> {
        tracing::info!(
            "開始配裝計算：大型模組 {}，小型模組 {}，異域裝備 {}，優先屬性 {:?}",
            request.major_mods,
            request.minor_mods,
            request.use_exotic,
            request.priority
        );

        let start_time = Instant::now();

        // Step 1: 請求驗證
        tracing::debug!("Step 1: 請求驗證");
        request.validate()?;

        // Step 2: 建立模型
        tracing::debug!("Step 2: 建立整數規劃模型");
        let model = BuildModel::build(request);

        // Step 3: 求解
        tracing::debug!("Step 3: 求解（{:?}）", self.config.backend);
        let solver = self.solver()?;
        let outcome = solver
            .solve(&model.program, &self.limits())
            .map_err(|e| self.map_solver_error(e, start_time))?;

        let solution = match (outcome.status, outcome.solution) {
            (SolveStatus::Optimal, Some(solution)) => solution,
            (SolveStatus::Infeasible, _) => {
                tracing::info!("無可行配裝：耗時 {:?}", outcome.elapsed);
                return Err(BuildError::Infeasible);
            }
            (SolveStatus::Optimal, None) => {
                return Err(BuildError::SolverError("求解器回報最佳但未提供解".to_string()));
            }
        };
        tracing::debug!(
            "{} 完成：耗時 {:?}，目標值 {:?}",
            solver.name(),
            outcome.elapsed,
            solution.objective()
        );

        // Step 4: 解碼
        tracing::debug!("Step 4: 解碼結果");
        let mut result = decoder::decode(&model, &solution)?;

        let elapsed = start_time.elapsed().as_millis();
        result.calculation_time_ms = Some(elapsed);

        tracing::info!(
            "配裝計算完成：異域裝備 {:?}，屬性總和 {}，耗時 {} ms",
            result.exotic,
            result.grand_total(),
            elapsed
        );

        Ok(result)
    }

    fn limits(&self) -> SolveLimits {
        let mut limits = SolveLimits::unlimited();
        if let Some(limit) = self.config.time_limit() {
            limits = limits.with_time_limit(limit);
        }
        if let Some(flag) = &self.cancel {
            limits = limits.with_cancel_flag(flag.clone());
        }
        limits
    }

    fn solver(&self) -> armor_core::Result<Box<dyn IntegerSolver>> {
        match self.config.backend {
            SolverBackend::MicroLp => Ok(Box::new(MicroLpSolver::new())),
            #[cfg(feature = "highs")]
            SolverBackend::Highs => Ok(Box::new(armor_optimizer::HighsSolver::new())),
            #[cfg(not(feature = "highs"))]
            SolverBackend::Highs => Err(BuildError::SolverError(
                "未啟用 highs feature，無法使用 HiGHS 後端".to_string(),
            )),
        }
    }

    fn map_solver_error(&self, error: SolverError, start_time: Instant) -> BuildError {
        if error.is_interrupted() {
            tracing::warn!("求解中止: {}", error);
            BuildError::SolverTimeout {
                elapsed_ms: start_time.elapsed().as_millis(),
            }
        } else {
            tracing::error!("求解失敗: {}", error);
            BuildError::SolverError(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armor_core::Statistic;
    use rstest::rstest;
    use std::time::Duration;

    #[test]
    fn test_invalid_request_rejected_before_solving() {
        let calculator = BuildCalculator::new();
        let request = BuildRequest::new().with_major_mods(4).with_minor_mods(2);
        assert!(matches!(
            calculator.compute(&request),
            Err(BuildError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_default_backend_solves_to_optimality() {
        let request = BuildRequest::new()
            .with_major_mods(2)
            .with_minimum(Statistic::Health, 100)
            .with_priority(Statistic::Weapons);
        let result = BuildCalculator::new().compute(&request).unwrap();
        assert!(result.total(Statistic::Health) >= 100);
        assert_eq!(result.pieces_total(), 5);
    }

    #[test]
    fn test_unreachable_minimum_is_infeasible() {
        let request = BuildRequest::new().with_minimum(Statistic::Super, 200);
        let result = BuildCalculator::new().compute(&request);
        assert_eq!(result, Err(BuildError::Infeasible));
    }

    #[test]
    fn test_time_limit_maps_to_timeout() {
        let config = SolverConfig::new().with_time_limit(Duration::ZERO);
        let result = BuildCalculator::with_config(config)
            .compute(&BuildRequest::new().with_priority(Statistic::Health));
        assert!(matches!(result, Err(BuildError::SolverTimeout { .. })));
    }

    #[test]
    fn test_cancelled_flag_maps_to_timeout() {
        let flag = CancelFlag::new();
        flag.cancel();
        let calculator = BuildCalculator::new().with_cancel_flag(flag);
        let result = calculator.compute(&BuildRequest::new());
        assert!(matches!(result, Err(BuildError::SolverTimeout { .. })));
    }

    #[cfg(not(feature = "highs"))]
    #[test]
    fn test_highs_backend_requires_feature() {
        let config = SolverConfig::new().with_backend(SolverBackend::Highs);
        let result = BuildCalculator::with_config(config).compute(&BuildRequest::new());
        assert!(matches!(result, Err(BuildError::SolverError(_))));
    }

    #[cfg(feature = "highs")]
    #[test]
    fn test_highs_backend_agrees_with_default() {
        let request = BuildRequest::new()
            .with_major_mods(1)
            .with_minor_mods(3)
            .with_minimum(Statistic::Super, 90)
            .with_priority(Statistic::Class);
        let config = SolverConfig::new().with_backend(SolverBackend::Highs);
        let highs = BuildCalculator::with_config(config).compute(&request).unwrap();
        let micro = BuildCalculator::new().compute(&request).unwrap();
        assert_eq!(highs.total(Statistic::Class), micro.total(Statistic::Class));
    }

    #[test]
    fn test_compute_sets_calculation_time() {
        let result = BuildCalculator::new()
            .compute(&BuildRequest::new().with_minimum(Statistic::Class, 100))
            .unwrap();
        assert!(result.calculation_time_ms.is_some());
        assert!(result.total(Statistic::Class) >= 100);
        assert_eq!(result.pieces_total(), 5);
    }

    #[rstest]
    #[case(Statistic::Health, false)]
    #[case(Statistic::Melee, true)]
    #[case(Statistic::Grenade, false)]
    #[case(Statistic::Super, true)]
    #[case(Statistic::Class, false)]
    #[case(Statistic::Weapons, true)]
    fn test_priority_reaches_primary_ceiling(#[case] stat: Statistic, #[case] use_exotic: bool) {
        // 五件裝備皆以該屬性為主屬性：5·30
        let request = BuildRequest::new().with_exotic(use_exotic).with_priority(stat);
        let result = BuildCalculator::new().compute(&request).unwrap();
        assert_eq!(result.total(stat), 150);
        assert_eq!(result.exotic.is_some(), use_exotic);
    }
}
