//! 核心模块 - 配置与共享状态
//!
//! - [`Config`] - 环境变量配置
//! - [`PosState`] - 目录、订单管理器、审计服务的装配

pub mod config;
pub mod state;

pub use config::Config;
pub use state::PosState;
