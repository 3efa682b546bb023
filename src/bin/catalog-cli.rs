use catalog_sdk::{ListQuery, NewProduct, ProductClient, ProductUpdate};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Management CLI for the Product Catalog service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    /// Shared secret for write commands.
    #[arg(short, long, env = "CATALOG_API_KEY", default_value = "secret-api-key")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products with optional filters and paging
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        in_stock: Option<bool>,
        #[arg(long)]
        page: Option<usize>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show one product
    Get { id: String },
    /// Search product names
    Search { q: String },
    /// Catalog statistics
    Stats,
    /// Create a product
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        category: String,
        #[arg(long)]
        in_stock: bool,
    },
    /// Update fields of a product
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        in_stock: Option<bool>,
    },
    /// Delete a product
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = ProductClient::new(&cli.url)?.with_api_key(&cli.key);

    match cli.command {
        Commands::List {
            category,
            in_stock,
            page,
            limit,
        } => {
            let query = ListQuery {
                category,
                in_stock,
                page,
                limit,
            };
            print_json(&client.list_products(&query).await?)?;
        }
        Commands::Get { id } => print_json(&client.get_product(&id).await?)?,
        Commands::Search { q } => print_json(&client.search_products(&q).await?)?,
        Commands::Stats => print_json(&client.stats().await?)?,
        Commands::Create {
            name,
            description,
            price,
            category,
            in_stock,
        } => {
            let product = NewProduct {
                name,
                description,
                price,
                category,
                in_stock,
            };
            print_json(&client.create_product(&product).await?)?;
        }
        Commands::Update {
            id,
            name,
            description,
            price,
            category,
            in_stock,
        } => {
            let update = ProductUpdate {
                name,
                description,
                price,
                category,
                in_stock,
            };
            print_json(&client.update_product(&id, &update).await?)?;
        }
        Commands::Delete { id } => {
            client.delete_product(&id).await?;
            println!("Deleted {}", id);
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
