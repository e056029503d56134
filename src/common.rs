use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// 目標判定の方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoalMode {
    /// 中央のマスが一致すれば向きは問わない
    #[default]
    Anchor,
    /// 中央のマスと向きの両方が一致する必要がある
    Exact,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown goal mode '{0}' (expected 'anchor' or 'exact')")]
pub struct UnknownGoalMode(String);

impl FromStr for GoalMode {
    type Err = UnknownGoalMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anchor" => Ok(GoalMode::Anchor),
            "exact" => Ok(GoalMode::Exact),
            _ => Err(UnknownGoalMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    pub goal_mode: GoalMode,
}

impl Config {
    pub fn new(goal_mode: GoalMode) -> Self {
        Self { goal_mode }
    }

    pub fn from_env() -> Self {
        let goal_mode = match std::env::var("GOAL_MODE") {
            Ok(v) => v.parse().unwrap_or_else(|e| {
                warn!("{}; falling back to anchor", e);
                GoalMode::Anchor
            }),
            Err(_) => GoalMode::default(),
        };
        debug!("GOAL_MODE = {:?}", goal_mode);

        Self::new(goal_mode)
    }
}

/// 標準出力は解答専用なので、ログは標準エラー出力に流す
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // テストなどで二重に初期化された場合は既存の設定を使う
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
