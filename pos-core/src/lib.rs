//! POS Core - 餐厅收银订单核心
//!
//! # 架构概述
//!
//! 订单从点单到出餐的完整生命周期：
//!
//! - **菜单目录** (`catalog`): 只读菜单，库存上限、修饰组、出餐方式可售范围
//! - **计价** (`pricing`): 纯函数，小计 / 税 / 折扣 / 合计
//! - **购物车** (`cart`): 修饰规则、库存上限、改价校验
//! - **出餐信息** (`dispatch`): 按出餐方式校验，CRM 自动填充，异步地址查询
//! - **订单** (`orders`): 提交 / 挂单 / 状态流转 / 召回追加
//! - **厨房** (`kitchen`): 厨房队列投影
//! - **审计** (`audit`): fire-and-forget 审计事件
//!
//! # 数据流
//!
//! ```text
//! MenuCatalog → CartBuilder → PricingEngine (每次变更)
//!             → DispatchDetails 校验 (提交前)
//!             → OrdersManager → KitchenFeed / 订单列表 / 账单
//! ```
//!
//! # 模块结构
//!
//! ```text
//! pos-core/src/
//! ├── core/          # 配置、共享状态
//! ├── catalog/       # 菜单目录
//! ├── pricing/       # 计价
//! ├── cart/          # 购物车
//! ├── dispatch/      # 出餐信息
//! ├── orders/        # 订单管理
//! ├── kitchen/       # 厨房队列
//! ├── audit/         # 审计日志
//! └── utils/         # 日志、输入校验
//! ```

pub mod audit;
pub mod cart;
pub mod catalog;
pub mod core;
pub mod dispatch;
pub mod kitchen;
pub mod orders;
pub mod pricing;
pub mod utils;

// Re-export 公共类型
pub use cart::{AddOutcome, CartBuilder, CartError, ItemConfigurator, OverrideRequest};
pub use catalog::MenuCatalog;
pub use core::{Config, PosState};
pub use dispatch::{DispatchDraft, DispatchError, DispatchForm, DraftField};
pub use kitchen::{KitchenFeed, KitchenTicket, project};
pub use orders::{CommitRequest, ManagerError, OrderFilter, OrdersManager, RecallDraft, StatusFilter};
pub use pricing::{PriceBreakdown, price};

// Re-export unified error types from shared
pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
