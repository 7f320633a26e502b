use super::{print_json, Services};
use crate::error::AppResult;

pub async fn login(services: &Services, email: &str, password: &str) -> AppResult<()> {
    services.auth.login(email, password).await?;

    match services.auth.current_user().await? {
        Some(user) => println!("Logged in as {}", user.display_name()),
        None => println!("Logged in"),
    }
    Ok(())
}

pub async fn logout(services: &Services) -> AppResult<()> {
    let route = services.auth.logout().await?;
    tracing::info!(route, "Logged out");
    println!("Logged out");
    Ok(())
}

pub async fn whoami(services: &Services) -> AppResult<()> {
    match services.auth.current_user().await? {
        Some(user) => print_json(&user),
        None => {
            println!("Not logged in");
            Ok(())
        }
    }
}
