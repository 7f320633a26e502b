use super::backend::{CUSTOMER_EMAIL, PASSWORD, STAFF_EMAIL};
use std::sync::Arc;
use storefront_client::commands::Services;
use storefront_client::domain::auth::TokenPair;
use storefront_client::domain::session::SessionContext;
use storefront_client::infrastructure::config::Config;

/// The client under test, wired exactly like the binary
pub struct TestClient {
    pub services: Services,
}

impl TestClient {
    pub fn new(config: Config) -> Self {
        let services = Services::from_config(config).expect("Failed to build services");
        Self { services }
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        self.services.client.session()
    }

    pub async fn login_customer(&self) -> TokenPair {
        self.services
            .auth
            .login(CUSTOMER_EMAIL, PASSWORD)
            .await
            .expect("Customer login failed")
    }

    pub async fn login_staff(&self) -> TokenPair {
        self.services
            .auth
            .login(STAFF_EMAIL, PASSWORD)
            .await
            .expect("Staff login failed")
    }

    pub fn access_token(&self) -> Option<String> {
        self.session().tokens().access()
    }
}

impl std::ops::Deref for TestClient {
    type Target = Services;

    fn deref(&self) -> &Services {
        &self.services
    }
}
