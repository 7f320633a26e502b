use super::{print_json, Services};
use crate::domain::admin::{AnalyticsRange, BulkUpload, Download, EmailBlast};
use crate::domain::tickets::{extract_ticket_code, Severity};
use crate::error::{AppError, AppResult};
use clap::{Subcommand, ValueEnum};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Dashboard totals
    Stats {
        #[arg(long, default_value = "30")]
        range: String,
    },
    /// One of the dashboard charts
    Report {
        #[arg(value_enum)]
        kind: ReportKind,
        #[arg(long, default_value = "30")]
        range: String,
    },
    /// Revenue, cost and profit
    Profit {
        #[arg(long, default_value = "30")]
        range: String,
    },
    /// Best sellers, optionally within a category
    TopProducts {
        #[arg(long)]
        category: Option<i64>,
        #[arg(long, default_value = "30")]
        range: String,
    },
    /// Products running out of stock
    LowStock,
    #[command(subcommand)]
    Products(ProductCommand),
    #[command(subcommand)]
    Categories(CategoryCommand),
    #[command(subcommand)]
    Users(UserCommand),
    #[command(subcommand)]
    Messages(MessageCommand),
    #[command(subcommand)]
    Tickets(TicketCommand),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportKind {
    MonthlySales,
    SalesOverTime,
    ProfitOverTime,
    OrderStatus,
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    List,
    /// Create from a JSON object
    Create {
        #[arg(long)]
        data: String,
    },
    /// Replace with a JSON object
    Update {
        id: i64,
        #[arg(long)]
        data: String,
    },
    Delete { id: i64 },
    ToggleTrending { id: i64 },
    /// Import products from a spreadsheet
    BulkUpload {
        excel: PathBuf,
        #[arg(long)]
        images_zip: Option<PathBuf>,
    },
    BulkDelete {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Delete every product (superuser only)
    DeleteAll {
        #[arg(long)]
        yes: bool,
    },
    DownloadCsv { out: PathBuf },
    DownloadSample { out: PathBuf },
    UploadImage { product_id: i64, file: PathBuf },
    DeleteImage { image_id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    List,
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        data: String,
    },
    Delete { id: i64 },
    UploadImage { id: i64, file: PathBuf },
    DeleteImage { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    List,
    ToggleStaff { id: i64 },
    PromoteToOwner { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum MessageCommand {
    List,
    Reply {
        id: i64,
        #[arg(long)]
        body: String,
    },
    MailingList,
    /// Email everyone in `emails`
    Blast {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        body: String,
        #[arg(long = "to", required = true)]
        emails: Vec<String>,
    },
    RemoveSubscriber { id: i64 },
    DeleteSubscriber { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum TicketCommand {
    /// Verify and consume the ticket in a QR payload
    Verify { payload: String },
    /// Look up a ticket, consuming it if unused
    Scan { payload: String },
    /// Verify QR payloads read line by line from stdin
    Scanner,
}

pub async fn run(services: &Services, command: AdminCommand) -> AppResult<()> {
    let analytics = &services.analytics;

    match command {
        AdminCommand::Stats { range } => print_json(&analytics.stats(&range.as_str().into()).await?),
        AdminCommand::Report { kind, range } => {
            let range = AnalyticsRange::from(range.as_str());
            let report = match kind {
                ReportKind::MonthlySales => analytics.monthly_sales(&range).await?,
                ReportKind::SalesOverTime => analytics.sales_over_time(&range).await?,
                ReportKind::ProfitOverTime => analytics.profit_over_time(&range).await?,
                ReportKind::OrderStatus => analytics.order_status_summary(&range).await?,
            };
            print_json(&report)
        }
        AdminCommand::Profit { range } => print_json(&analytics.profit(&range.as_str().into()).await?),
        AdminCommand::TopProducts { category, range } => print_json(
            &analytics
                .top_products_by_category(category, &range.as_str().into())
                .await?,
        ),
        AdminCommand::LowStock => print_json(&analytics.low_stock_products().await?),
        AdminCommand::Products(command) => products(services, command).await,
        AdminCommand::Categories(command) => categories(services, command).await,
        AdminCommand::Users(command) => users(services, command).await,
        AdminCommand::Messages(command) => messages(services, command).await,
        AdminCommand::Tickets(command) => tickets(services, command).await,
    }
}

async fn products(services: &Services, command: ProductCommand) -> AppResult<()> {
    let products = &services.products;

    match command {
        ProductCommand::List => print_json(&products.list().await?),
        ProductCommand::Create { data } => print_json(&products.create(&parse_data(&data)?).await?),
        ProductCommand::Update { id, data } => {
            print_json(&products.update(id, &parse_data(&data)?).await?)
        }
        ProductCommand::Delete { id } => products.delete(id).await,
        ProductCommand::ToggleTrending { id } => {
            let trending = products.toggle_trending(id).await?;
            println!("Product {} trending: {}", id, trending);
            Ok(())
        }
        ProductCommand::BulkUpload { excel, images_zip } => {
            let upload = BulkUpload::from_files(&excel, images_zip.as_deref()).await?;
            print_json(&products.bulk_upload(upload).await?)
        }
        ProductCommand::BulkDelete { ids } => print_json(&products.bulk_delete(&ids).await?),
        ProductCommand::DeleteAll { yes } => {
            if !yes {
                return Err(AppError::BadRequest(
                    "Refusing to delete every product without --yes".to_string(),
                ));
            }
            println!("{}", products.delete_all().await?);
            Ok(())
        }
        ProductCommand::DownloadCsv { out } => save(products.download_csv().await?, &out).await,
        ProductCommand::DownloadSample { out } => {
            save(products.download_sample_excel().await?, &out).await
        }
        ProductCommand::UploadImage { product_id, file } => {
            let (name, data) = read_file(&file).await?;
            print_json(&products.upload_image(product_id, &name, data).await?)
        }
        ProductCommand::DeleteImage { image_id } => products.delete_image(image_id).await,
    }
}

async fn categories(services: &Services, command: CategoryCommand) -> AppResult<()> {
    let products = &services.products;

    match command {
        CategoryCommand::List => print_json(&products.categories().await?),
        CategoryCommand::Create { data } => {
            print_json(&products.create_category(&parse_data(&data)?).await?)
        }
        CategoryCommand::Update { id, data } => {
            print_json(&products.update_category(id, &parse_data(&data)?).await?)
        }
        CategoryCommand::Delete { id } => products.delete_category(id).await,
        CategoryCommand::UploadImage { id, file } => {
            let (name, data) = read_file(&file).await?;
            print_json(&products.upload_category_image(id, &name, data).await?)
        }
        CategoryCommand::DeleteImage { id } => products.delete_category_image(id).await,
    }
}

async fn users(services: &Services, command: UserCommand) -> AppResult<()> {
    match command {
        UserCommand::List => print_json(&services.users.list().await?),
        UserCommand::ToggleStaff { id } => print_json(&services.users.toggle_staff(id).await?),
        UserCommand::PromoteToOwner { id } => {
            print_json(&services.users.promote_to_owner(id).await?)
        }
    }
}

async fn messages(services: &Services, command: MessageCommand) -> AppResult<()> {
    let messages = &services.messages;

    match command {
        MessageCommand::List => print_json(&messages.messages().await?),
        MessageCommand::Reply { id, body } => messages.reply(id, &body).await,
        MessageCommand::MailingList => print_json(&messages.mailing_list().await?),
        MessageCommand::Blast {
            subject,
            body,
            emails,
        } => {
            messages
                .email_blast(&EmailBlast {
                    subject,
                    body,
                    emails,
                })
                .await
        }
        MessageCommand::RemoveSubscriber { id } => messages.remove_subscriber(id).await,
        MessageCommand::DeleteSubscriber { id } => messages.delete_subscriber(id).await,
    }
}

async fn tickets(services: &Services, command: TicketCommand) -> AppResult<()> {
    match command {
        TicketCommand::Verify { payload } => {
            let code = ticket_code(&payload)?;
            print_json(&services.tickets.verify(code).await?)
        }
        TicketCommand::Scan { payload } => {
            let code = ticket_code(&payload)?;
            print_json(&services.tickets.scan(code).await?)
        }
        TicketCommand::Scanner => {
            let scanner = services.ticket_scanner();
            let mut lines = BufReader::new(tokio::io::stdin()).lines();

            while let Some(line) = lines.next_line().await? {
                if line.trim().is_empty() {
                    continue;
                }
                if let Some(outcome) = scanner.handle_scan(&line).await {
                    let marker = match outcome.severity() {
                        Severity::Success => "OK",
                        Severity::Warning => "WARN",
                        Severity::Error => "ERR",
                    };
                    println!("[{}] {}", marker, outcome.message());
                }
            }
            Ok(())
        }
    }
}

fn ticket_code(payload: &str) -> AppResult<uuid::Uuid> {
    extract_ticket_code(payload)
        .ok_or_else(|| AppError::BadRequest("Invalid QR format".to_string()))
}

fn parse_data(data: &str) -> AppResult<Value> {
    let value: Value = serde_json::from_str(data)?;
    if !value.is_object() {
        return Err(AppError::BadRequest("--data must be a JSON object".to_string()));
    }
    Ok(value)
}

async fn read_file(path: &Path) -> AppResult<(String, Vec<u8>)> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok((name, tokio::fs::read(path).await?))
}

async fn save(download: Download, out: &Path) -> AppResult<()> {
    download.save(out).await?;
    println!("Saved {} bytes to {}", download.data.len(), out.display());
    Ok(())
}
