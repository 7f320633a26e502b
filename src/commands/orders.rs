use super::{print_json, Services};
use crate::domain::payment::PaymentOutcome;
use crate::error::AppResult;
use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum OrderCommand {
    /// List your orders
    List,
    /// Show one order
    Show { id: i64 },
    /// Show the fulfilment status of an order
    Status { id: i64 },
    /// Poll the payment status until it settles
    Wait { id: i64 },
}

pub async fn run(services: &Services, command: OrderCommand) -> AppResult<()> {
    match command {
        OrderCommand::List => print_json(&services.orders.list().await?),
        OrderCommand::Show { id } => print_json(&services.orders.detail(id).await?),
        OrderCommand::Status { id } => print_json(&services.orders.order_status(id).await?),
        OrderCommand::Wait { id } => wait_for_payment(services, id).await.map(|_| ()),
    }
}

/// Poll until the payment settles, attempts run out or Ctrl-C
pub async fn wait_for_payment(services: &Services, order_id: i64) -> AppResult<Option<PaymentOutcome>> {
    let poller = services.payment_poller();
    eprintln!("Checking payment for order {}...", order_id);

    let poll = poller.poll_with(order_id, |status| eprintln!("  status: {}", status));

    tokio::select! {
        outcome = poll => {
            let outcome = outcome?;
            println!("{:?} ({})", outcome, outcome.route());
            Ok(Some(outcome))
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!(order_id, "Payment polling cancelled");
            Ok(None)
        }
    }
}
