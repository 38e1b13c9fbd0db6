/// 收银核心配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | POS_TAX_RATE | 0.08 | 统一税率 |
/// | POS_FIRST_ORDER_NUMBER | 101 | 本次会话第一个订单号 |
/// | POS_CURRENCY_SYMBOL | $ | 货币符号 |
/// | POS_AUDIT_BUFFER | 1024 | 审计通道容量 |
/// | POS_EVENT_CAPACITY | 1024 | 订单事件广播容量 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (无) | 日志目录，存在时按天滚动写文件 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// POS_TAX_RATE=0.135 LOG_LEVEL=debug ./terminal
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Flat tax rate applied to the subtotal
    pub tax_rate: f64,
    /// First order number handed out by the orders manager
    pub first_order_number: u64,
    pub currency_symbol: String,
    /// Audit mpsc channel capacity
    pub audit_buffer: usize,
    /// Order event broadcast capacity
    pub event_capacity: usize,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// Default flat tax rate
    pub const DEFAULT_TAX_RATE: f64 = 0.08;
    /// Default first order number
    pub const DEFAULT_FIRST_ORDER_NUMBER: u64 = 101;

    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            tax_rate: std::env::var("POS_TAX_RATE")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|r| r.is_finite() && *r >= 0.0)
                .unwrap_or(Self::DEFAULT_TAX_RATE),
            first_order_number: std::env::var("POS_FIRST_ORDER_NUMBER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(Self::DEFAULT_FIRST_ORDER_NUMBER),
            currency_symbol: std::env::var("POS_CURRENCY_SYMBOL").unwrap_or_else(|_| "$".into()),
            audit_buffer: std::env::var("POS_AUDIT_BUFFER")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(1024),
            event_capacity: std::env::var("POS_EVENT_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(1024),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义税率和起始单号覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(tax_rate: f64, first_order_number: u64) -> Self {
        let mut config = Self::from_env();
        config.tax_rate = tax_rate;
        config.first_order_number = first_order_number;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_overrides() {
        let config = Config::with_overrides(0.135, 500);
        assert_eq!(config.tax_rate, 0.135);
        assert_eq!(config.first_order_number, 500);
        assert!(config.audit_buffer > 0);
    }

    #[test]
    fn test_format_money() {
        let mut config = Config::with_overrides(0.08, 101);
        config.currency_symbol = "€".to_string();
        assert_eq!(config.format_money(28.06), "€28.06");
        assert_eq!(config.format_money(0.0), "€0.00");
    }
}
