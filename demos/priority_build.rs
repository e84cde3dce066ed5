//! 優先屬性配裝示例
//!
//! ```bash
//! cargo run --example priority_build -- '{"minimums": {"Health": 80}, "use_exotic": true, "priority": "Weapons"}'
//! ```

use std::time::Duration;

use armor_build::{compute_build_with, BuildRequest, SolverConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_REQUEST: &str = r#"{
    "minimums": {"Health": 80, "Grenade": 60},
    "major_mods": 3,
    "minor_mods": 2,
    "use_exotic": true,
    "priority": "Super"
}"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let json = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_REQUEST.to_string());
    let request = BuildRequest::from_json(&json)?;
    let config = SolverConfig::new().with_time_limit(Duration::from_secs(5));

    let result = compute_build_with(&request, &config)?;
    println!("{}", result.to_json()?);

    Ok(())
}
