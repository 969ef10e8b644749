//! Client context - store registry and session lifecycle
//!
//! [`ErpClient`] wires configuration, the shared transport client, the
//! credential tiers and the notification channel, and hands out one store per
//! key, created on first access.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tokio::sync::broadcast;
use tracing::{info, warn};

use erpwire_core::{
    CredentialSource, Credentials, FinanceStore, LayoutStore, NliService, ResourceStore,
};
use erpwire_domain::{ClientConfig, Company, OrderScope, Result, UserInfo};

use crate::api::{AuthApi, CompanyApi, FinanceClient, InventoryApi, NliClient, OrderApi};
use crate::credentials::{MemoryTokenCache, SharedSession};
use crate::http::HttpClient;
use crate::notify::{Notice, NotificationChannel};

pub type CompanyStore = ResourceStore<CompanyApi>;
pub type InventoryStore = ResourceStore<InventoryApi>;
pub type OrderStore = ResourceStore<OrderApi>;
pub type FinanceStatisticsStore = FinanceStore<FinanceClient>;

/// Entry point of the data-access layer
pub struct ErpClient {
    config: ClientConfig,
    http: HttpClient,
    credentials: Arc<Credentials>,
    session: Arc<SharedSession>,
    notifications: NotificationChannel,
    auth: AuthApi,

    companies: OnceCell<Arc<CompanyStore>>,
    inventory: OnceCell<Arc<InventoryStore>>,
    orders: OnceCell<Arc<OrderStore>>,
    customer_orders: OnceCell<Arc<OrderStore>>,
    purchase_orders: OnceCell<Arc<OrderStore>>,
    finance: OnceCell<Arc<FinanceStatisticsStore>>,
    layout: OnceCell<Arc<LayoutStore>>,
    nli: OnceCell<Arc<NliService<NliClient>>>,
}

impl ErpClient {
    /// Build a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`erpwire_domain::ErpError::Config`] if the transport client
    /// cannot be built (e.g. an invalid base URL).
    pub fn new(config: ClientConfig) -> Result<Self> {
        let session = Arc::new(SharedSession::default());
        let credentials = Arc::new(Credentials::new(
            Arc::new(MemoryTokenCache::new(config.token_key.clone())),
            session.clone(),
        ));
        let notifications = NotificationChannel::new(config.environment);

        let http = HttpClient::builder()
            .base_url(config.base_url.clone())
            .timeout(config.timeout())
            .credentials(credentials.clone())
            .notifier(Arc::new(notifications.clone()))
            .build()?;

        info!(base_url = %config.base_url, environment = ?config.environment, "ERP client ready");

        Ok(Self {
            auth: AuthApi::new(http.clone()),
            config,
            http,
            credentials,
            session,
            notifications,
            companies: OnceCell::new(),
            inventory: OnceCell::new(),
            orders: OnceCell::new(),
            customer_orders: OnceCell::new(),
            purchase_orders: OnceCell::new(),
            finance: OnceCell::new(),
            layout: OnceCell::new(),
            nli: OnceCell::new(),
        })
    }

    /// Build a client from environment variables or a config file.
    pub fn from_env() -> Result<Self> {
        Self::new(crate::config::load()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Subscribe to user-facing failure notices (published in production).
    pub fn notifications(&self) -> broadcast::Receiver<Notice> {
        self.notifications.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_authenticated()
    }

    /// Profile of the logged-in user, if any
    pub fn user(&self) -> Option<UserInfo> {
        self.session.user()
    }

    /// Log in, store the issued credential and load the user profile.
    ///
    /// `password` is the plain password; it is sent as its MD5 digest.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserInfo> {
        let issued = self.auth.login(username, password).await?;
        self.credentials.store(&issued.token);

        let user = self.auth.user_info().await?;
        self.session.set_user(user.clone());
        info!(username, roles = ?user.roles, "logged in");
        Ok(user)
    }

    /// Log out on the server, then forget the credential and reset every store.
    ///
    /// Local state is cleared even when the server call fails; that failure is
    /// still returned.
    pub async fn logout(&self) -> Result<()> {
        let outcome = self.auth.logout().await;
        if let Err(err) = &outcome {
            warn!(error = %err, "server logout failed, clearing local session anyway");
        }
        self.credentials.invalidate();
        self.reset_all();
        outcome.map(|_| ())
    }

    /// Select `company` as the working company and reset the stores holding
    /// data scoped to the previous one.
    pub fn switch_company(&self, company: Company) {
        info!(company = %company.name, id = ?company.id, "switching company");
        for store in [&self.orders, &self.customer_orders, &self.purchase_orders] {
            if let Some(store) = store.get() {
                store.reset();
            }
        }
        if let Some(store) = self.inventory.get() {
            store.reset();
        }
        if let Some(store) = self.finance.get() {
            store.reset();
        }
        self.companies().set_current(Some(company));
    }

    pub fn current_company(&self) -> Option<Company> {
        self.companies.get().and_then(|store| store.current())
    }

    /// Reset every store created so far to its initial shape.
    pub fn reset_all(&self) {
        if let Some(store) = self.companies.get() {
            store.reset();
        }
        if let Some(store) = self.inventory.get() {
            store.reset();
        }
        for store in [&self.orders, &self.customer_orders, &self.purchase_orders] {
            if let Some(store) = store.get() {
                store.reset();
            }
        }
        if let Some(store) = self.finance.get() {
            store.reset();
        }
        if let Some(store) = self.layout.get() {
            store.reset();
        }
        info!("all stores reset");
    }

    pub fn companies(&self) -> Arc<CompanyStore> {
        self.companies
            .get_or_init(|| {
                Arc::new(ResourceStore::new(
                    "companies",
                    Arc::new(CompanyApi::new(self.http.clone())),
                    self.config.default_page_size,
                ))
            })
            .clone()
    }

    pub fn inventory(&self) -> Arc<InventoryStore> {
        self.inventory
            .get_or_init(|| {
                Arc::new(ResourceStore::new(
                    "inventory",
                    Arc::new(InventoryApi::new(self.http.clone())),
                    self.config.default_page_size,
                ))
            })
            .clone()
    }

    /// Order store for `scope`; each scope has its own cached collection.
    pub fn orders(&self, scope: OrderScope) -> Arc<OrderStore> {
        let (cell, name) = match scope {
            OrderScope::All => (&self.orders, "orders"),
            OrderScope::Customer => (&self.customer_orders, "customer_orders"),
            OrderScope::Purchase => (&self.purchase_orders, "purchase_orders"),
        };
        cell.get_or_init(|| {
            Arc::new(ResourceStore::new(
                name,
                Arc::new(OrderApi::new(self.http.clone(), scope)),
                self.config.default_page_size,
            ))
        })
        .clone()
    }

    pub fn finance(&self) -> Arc<FinanceStatisticsStore> {
        self.finance
            .get_or_init(|| Arc::new(FinanceStore::new(Arc::new(FinanceClient::new(self.http.clone())))))
            .clone()
    }

    pub fn layout(&self) -> Arc<LayoutStore> {
        self.layout.get_or_init(|| Arc::new(LayoutStore::new())).clone()
    }

    /// Natural-language query service on the configured endpoint
    pub fn nli(&self) -> Arc<NliService<NliClient>> {
        self.nli
            .get_or_init(|| {
                Arc::new(NliService::new(Arc::new(NliClient::new(
                    self.http.clone(),
                    &self.config.nli,
                ))))
            })
            .clone()
    }
}
