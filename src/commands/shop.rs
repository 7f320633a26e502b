use super::{orders, print_json, Services};
use crate::domain::cart::{CheckoutRequest, ShippingAddress};
use crate::domain::catalog::ProductQuery;
use crate::domain::contact::{ContactMessageRequest, SubscribeRequest};
use crate::error::AppResult;
use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show the cart
    Show,
    /// Add a product
    Add {
        product_id: i64,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a cart line
    Remove { item_id: i64 },
    /// Add one more of a product
    Increase { product_id: i64 },
    /// Take one of a product out
    Decrease { product_id: i64 },
    /// Start payment for the cart
    Checkout {
        #[arg(long)]
        email: String,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        postal_code: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Wait for the payment to settle after printing the payment URL
        #[arg(long)]
        wait: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Send a contact form message
    Send {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        #[arg(long)]
        subscribe: bool,
    },
    /// Join the mailing list
    Subscribe {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
    },
}

pub async fn products(
    services: &Services,
    page: u32,
    category: Option<i64>,
    subcategory: Option<i64>,
    search: Option<String>,
) -> AppResult<()> {
    let query = ProductQuery {
        page,
        category,
        subcategory,
        search,
    };
    let listing = services.catalog.products(&query).await?;

    print_json(listing.products())?;
    if listing.has_next() {
        eprintln!("More results: --page {}", page + 1);
    }
    Ok(())
}

pub async fn cart(services: &Services, command: CartCommand) -> AppResult<()> {
    let cart = match command {
        CartCommand::Show => services.cart.get().await?,
        CartCommand::Add {
            product_id,
            quantity,
        } => services.cart.add_item(product_id, quantity).await?,
        CartCommand::Remove { item_id } => services.cart.remove_item(item_id).await?,
        CartCommand::Increase { product_id } => services.cart.increase_item(product_id).await?,
        CartCommand::Decrease { product_id } => services.cart.decrease_item(product_id).await?,
        CartCommand::Checkout {
            email,
            full_name,
            address,
            city,
            postal_code,
            country,
            phone,
            wait,
        } => {
            let request = CheckoutRequest {
                shipping_address: ShippingAddress {
                    email,
                    full_name,
                    address,
                    city,
                    postal_code,
                    country,
                },
                phone_number: phone,
            };
            let checkout = services.cart.checkout(&request).await?;

            println!("Pay at: {}", checkout.payment_url);
            println!("Order: {}", checkout.order_id);

            if wait {
                orders::wait_for_payment(services, checkout.order_id).await?;
            }
            return Ok(());
        }
    };

    print_json(&cart)
}

pub async fn contact(services: &Services, command: ContactCommand) -> AppResult<()> {
    match command {
        ContactCommand::Send {
            first_name,
            last_name,
            email,
            message,
            subscribe,
        } => {
            services
                .contact
                .send_message(&ContactMessageRequest {
                    first_name,
                    last_name,
                    email,
                    message,
                    subscribe,
                })
                .await?;
            println!("Message sent");
        }
        ContactCommand::Subscribe {
            email,
            first_name,
            last_name,
        } => {
            let response = services
                .contact
                .subscribe(&SubscribeRequest {
                    email,
                    first_name,
                    last_name,
                })
                .await?;
            println!("{}", response.message);
        }
    }
    Ok(())
}
