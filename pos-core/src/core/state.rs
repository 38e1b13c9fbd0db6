//! 收银核心状态
//!
//! 把目录、订单管理器、审计服务装配在一起，供各个界面共享。

use std::sync::Arc;
use tokio::task::JoinHandle;

use super::Config;
use crate::audit::{AuditService, AuditSink, AuditWorker};
use crate::cart::CartBuilder;
use crate::catalog::MenuCatalog;
use crate::dispatch::{AddressResolver, CustomerDirectory, DispatchForm};
use crate::kitchen::KitchenFeed;
use crate::orders::OrdersManager;
use shared::order::DispatchType;

/// Shared core state (cheap to clone)
#[derive(Clone)]
pub struct PosState {
    pub config: Config,
    pub catalog: Arc<MenuCatalog>,
    pub orders: Arc<OrdersManager>,
    pub audit: Arc<AuditService>,
    pub directory: Arc<dyn CustomerDirectory>,
    pub resolver: Option<Arc<dyn AddressResolver>>,
}

impl std::fmt::Debug for PosState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosState")
            .field("config", &self.config)
            .field("menu_items", &self.catalog.len())
            .field("orders", &self.orders)
            .finish_non_exhaustive()
    }
}

impl PosState {
    /// Wire the core and start the audit worker
    ///
    /// Must be called inside a tokio runtime. The returned handle finishes
    /// once every `PosState` clone (and so every audit sender) is dropped.
    pub fn initialize<S: AuditSink + 'static>(
        config: Config,
        catalog: MenuCatalog,
        directory: Arc<dyn CustomerDirectory>,
        sink: S,
    ) -> (Self, JoinHandle<()>) {
        let (audit, rx) = AuditService::new(config.audit_buffer);
        let worker = tokio::spawn(AuditWorker::new(sink).run(rx));
        let orders = Arc::new(OrdersManager::new(&config).with_audit(audit.clone()));

        tracing::info!(
            menu_items = catalog.len(),
            tax_rate = config.tax_rate,
            first_order_number = config.first_order_number,
            environment = %config.environment,
            "POS core initialized"
        );

        let state = Self {
            config,
            catalog: Arc::new(catalog),
            orders,
            audit,
            directory,
            resolver: None,
        };
        (state, worker)
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn AddressResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Fresh cart for a terminal session
    pub fn new_cart(&self) -> CartBuilder {
        CartBuilder::new(self.catalog.clone(), self.config.tax_rate).with_audit(self.audit.clone())
    }

    /// Fresh dispatch form for a cart
    pub fn new_dispatch_form(&self, dispatch_type: DispatchType) -> DispatchForm {
        let form = DispatchForm::new(dispatch_type, self.directory.clone());
        match &self.resolver {
            Some(resolver) => form.with_resolver(resolver.clone()),
            None => form,
        }
    }

    /// Kitchen display feed
    pub fn kitchen_feed(&self) -> KitchenFeed {
        KitchenFeed::new(self.orders.clone())
    }
}
