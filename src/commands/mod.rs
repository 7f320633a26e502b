//! Command line surface over the client services.

pub mod account;
pub mod admin;
pub mod orders;
pub mod shop;

use crate::domain::admin::{AnalyticsService, MessageAdminService, ProductAdminService};
use crate::domain::auth::AuthService;
use crate::domain::cart::CartService;
use crate::domain::catalog::CatalogService;
use crate::domain::contact::ContactService;
use crate::domain::orders::OrderService;
use crate::domain::payment::{PaymentPoller, PollPolicy};
use crate::domain::session::SessionContext;
use crate::domain::tickets::{TicketAdminService, TicketScanner};
use crate::domain::user::UserAdminService;
use crate::error::AppResult;
use crate::infrastructure::api::ApiClient;
use crate::infrastructure::config::Config;
use crate::infrastructure::http::{HttpTransport, ReqwestTransport};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::sync::Arc;

pub use admin::AdminCommand;
pub use orders::OrderCommand;
pub use shop::{CartCommand, ContactCommand};

#[derive(Debug, Parser)]
#[command(name = "storefront", version, about = "Storefront and admin console client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// End the session on the backend and forget local tokens
    Logout,
    /// Show the logged in user
    Whoami,
    /// Print the Google sign-in URL
    GoogleLogin,
    /// Store tokens handed back by the Google sign-in redirect
    GoogleCallback {
        #[arg(long)]
        access: String,
        #[arg(long)]
        refresh: String,
    },
    /// List product categories
    Categories,
    /// List products
    Products {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Parent category id
        #[arg(long)]
        category: Option<i64>,
        /// Subcategory id
        #[arg(long)]
        subcategory: Option<i64>,
        #[arg(long)]
        search: Option<String>,
    },
    /// List trending products
    Trending {
        /// Parent category slug
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one product
    Product { id: i64 },
    #[command(subcommand)]
    Cart(CartCommand),
    #[command(subcommand)]
    Orders(OrderCommand),
    #[command(subcommand)]
    Contact(ContactCommand),
    #[command(subcommand)]
    Admin(AdminCommand),
}

/// Every service, wired to one session
pub struct Services {
    pub config: Arc<Config>,
    pub client: Arc<ApiClient>,
    pub auth: Arc<AuthService>,
    pub catalog: Arc<CatalogService>,
    pub cart: Arc<CartService>,
    pub orders: Arc<OrderService>,
    pub contact: Arc<ContactService>,
    pub analytics: Arc<AnalyticsService>,
    pub products: Arc<ProductAdminService>,
    pub users: Arc<UserAdminService>,
    pub messages: Arc<MessageAdminService>,
    pub tickets: Arc<TicketAdminService>,
}

impl Services {
    pub fn from_config(config: Config) -> AppResult<Self> {
        let transport: Arc<dyn HttpTransport> =
            Arc::new(ReqwestTransport::new(config.request_timeout())?);
        let session = Arc::new(SessionContext::from_config(&config)?);
        Ok(Self::new(config, transport, session))
    }

    pub fn new(config: Config, transport: Arc<dyn HttpTransport>, session: Arc<SessionContext>) -> Self {
        let client = Arc::new(ApiClient::new(transport, config.api_base_url(), session));

        Self {
            auth: Arc::new(AuthService::new(client.clone(), config.backend_base_url.clone())),
            catalog: Arc::new(CatalogService::new(client.clone())),
            cart: Arc::new(CartService::new(client.clone())),
            orders: Arc::new(OrderService::new(client.clone())),
            contact: Arc::new(ContactService::new(client.clone())),
            analytics: Arc::new(AnalyticsService::new(client.clone())),
            products: Arc::new(ProductAdminService::new(client.clone())),
            users: Arc::new(UserAdminService::new(client.clone())),
            messages: Arc::new(MessageAdminService::new(client.clone())),
            tickets: Arc::new(TicketAdminService::new(client.clone())),
            config: Arc::new(config),
            client,
        }
    }

    pub fn payment_poller(&self) -> PaymentPoller {
        PaymentPoller::new(self.orders.clone(), PollPolicy::from_config(&self.config))
    }

    pub fn ticket_scanner(&self) -> TicketScanner {
        TicketScanner::new(self.tickets.clone())
    }
}

pub async fn run(command: Command, services: &Services) -> AppResult<()> {
    match command {
        Command::Login { email, password } => account::login(services, &email, &password).await,
        Command::Logout => account::logout(services).await,
        Command::Whoami => account::whoami(services).await,
        Command::GoogleLogin => {
            println!("{}", services.auth.google_login_url());
            Ok(())
        }
        Command::GoogleCallback { access, refresh } => {
            let route = services.auth.complete_google_login(&access, &refresh)?;
            tracing::info!(route, "Google login stored");
            Ok(())
        }
        Command::Categories => print_json(&services.catalog.categories().await?),
        Command::Products {
            page,
            category,
            subcategory,
            search,
        } => shop::products(services, page, category, subcategory, search).await,
        Command::Trending { category } => {
            let listing = services.catalog.trending(category.as_deref()).await?;
            print_json(listing.products())
        }
        Command::Product { id } => print_json(&services.catalog.product(id).await?),
        Command::Cart(command) => shop::cart(services, command).await,
        Command::Orders(command) => orders::run(services, command).await,
        Command::Contact(command) => shop::contact(services, command).await,
        Command::Admin(command) => admin::run(services, command).await,
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
