//! 簡單配裝計算示例

use armor_build::{compute_build, BuildError, BuildRequest, Statistic};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== 簡單配裝計算示例 ===\n");

    let request = BuildRequest::new()
        .with_minimum(Statistic::Health, 100)
        .with_minimum(Statistic::Class, 70)
        .with_minimum(Statistic::Weapons, 60)
        .with_full_major_mods();

    println!("最低需求:");
    for stat in Statistic::ALL {
        println!("  - {:<8} {}", stat, request.minimum(stat));
    }

    let result = match compute_build(&request) {
        Ok(result) => result,
        Err(BuildError::Infeasible) => {
            println!("\n找不到符合所有最低需求的配裝組合");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("\n裝備分配:");
    for (archetype, count) in &result.pieces {
        if *count > 0 {
            println!("  - {:<10} {} 件", archetype, count);
        }
    }
    if let Some(exotic) = result.exotic {
        println!("  - {:<10} 1 件（異域）", exotic);
    }

    println!("\n第三屬性:");
    for row in result.tertiary_rows() {
        println!("  - {:<10} {:<8} {} 件", row.archetype, row.stat, row.count);
    }

    println!("\n模組:");
    for row in result.modifier_rows() {
        println!("  - {:<8} 大型 {}，小型 {}", row.stat, row.major, row.minor);
    }

    println!("\n屬性總點數:");
    for stat in Statistic::ALL {
        println!("  - {:<8} {}", stat, result.total(stat));
    }
    println!("  - {:<8} {}", "Total", result.grand_total());

    Ok(())
}
