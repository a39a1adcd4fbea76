mod config;
mod logging;
mod render;

use std::{path::PathBuf, sync::Arc};

use async_std::task;
use catalog_client::HttpCatalogClient;
use clap::{Args, Parser, Subcommand};
use config::{AppConfig, ConfigOverrides};
use core_types::{events::Notification, PriceRangePreset, Product, ProductId};
use favorites_storage::file_store::FileKeyValueStore;
use service::{
    catalog_view_model::CatalogViewModel, item_presenter::present, navigation::Navigator,
    view_models::ItemIntent,
};

#[derive(Parser, Debug)]
#[command(name = "perfume-catalog", about = "Browse the perfume catalog and manage favorites")]
struct Cli {
    /// Root URL of the catalog API (overrides CATALOG_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides CATALOG_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Favorites store file (overrides FAVORITES_STORE_PATH)
    #[arg(long)]
    favorites_store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List perfumes, optionally searched or filtered
    List(ListArgs),
    /// List the distinct brands in the catalog
    Brands,
    /// List favorite perfumes
    Favorites,
    /// Add or remove a favorite
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Show details of one perfume
    Show { id: ProductId },
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Case-insensitive search in perfume names
    #[arg(long, conflicts_with_all = ["brand", "min", "max", "preset"])]
    search: Option<String>,

    /// Only perfumes of this brand
    #[arg(long, conflicts_with_all = ["min", "max", "preset"])]
    brand: Option<String>,

    /// Lowest price, inclusive
    #[arg(long, requires = "max", conflicts_with = "preset")]
    min: Option<String>,

    /// Highest price, inclusive
    #[arg(long, requires = "min", conflicts_with = "preset")]
    max: Option<String>,

    /// Price preset: 0-50, 50-100, 100-200 or 200+
    #[arg(long)]
    preset: Option<PriceRangePreset>,
}

#[derive(Subcommand, Debug)]
enum FavoriteAction {
    Add { id: ProductId },
    Remove { id: ProductId },
}

struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn show_detail(&self, product: &Product) {
        println!("{}", render::render_detail(product));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = logging::init_logging();

    let config = AppConfig::load(ConfigOverrides {
        base_url: cli.base_url.clone(),
        timeout_secs: cli.timeout_secs,
        favorites_store_path: cli.favorites_store.clone(),
    })?;

    task::block_on(run(cli.command, config))
}

async fn run(command: Command, config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(FileKeyValueStore::open(&config.favorites_store_path).await?);
    let catalog_api = Arc::new(HttpCatalogClient::new(&config.base_url, Some(config.timeout))?);
    let (sender, notifications) = flume::unbounded();
    let mut view_model = CatalogViewModel::new(catalog_api, store, sender);

    let result = execute(&mut view_model, command).await;

    for notification in notifications.drain() {
        print_notification(&notification);
    }
    result
}

async fn execute(
    view_model: &mut CatalogViewModel,
    command: Command,
) -> Result<(), Box<dyn std::error::Error>> {
    view_model.load().await?;

    match command {
        Command::List(args) => {
            if let Some(text) = args.search {
                view_model.search(&text);
            } else if let Some(brand) = args.brand {
                view_model.filter_by_brand(&brand);
            } else if let (Some(min), Some(max)) = (args.min, args.max) {
                view_model.filter_by_price_input(&min, &max)?;
            } else if let Some(preset) = args.preset {
                view_model.apply_price_preset(preset);
            }
            println!(
                "{}",
                render::render_screen(view_model.active_title(), &view_model.items())
            );
        }
        Command::Brands => {
            for brand in view_model.distinct_brands() {
                println!("{}", brand);
            }
        }
        Command::Favorites => {
            let items: Vec<_> = view_model
                .favorites()
                .iter()
                .map(|entry| present(entry.product(), true))
                .collect();
            println!("{}", render::render_screen("Favorite Perfumes", &items));
        }
        Command::Favorite { action } => {
            let intent = match action {
                FavoriteAction::Add { id } => {
                    let product = view_model
                        .find_product(&id)
                        .cloned()
                        .ok_or_else(|| format!("No perfume with id {}", id))?;
                    ItemIntent::ToggleFavorite(product)
                }
                FavoriteAction::Remove { id } => {
                    let id = view_model
                        .find_favorite(&id)
                        .map(|entry| entry.id().clone())
                        .unwrap_or(id);
                    ItemIntent::RemoveFavorite(id)
                }
            };
            view_model.handle_intent(intent, &TerminalNavigator).await?;
        }
        Command::Show { id } => {
            let product = view_model
                .find_product(&id)
                .cloned()
                .ok_or_else(|| format!("No perfume with id {}", id))?;
            view_model
                .handle_intent(ItemIntent::ShowDetail(product), &TerminalNavigator)
                .await?;
        }
    }
    Ok(())
}

fn print_notification(notification: &Notification) {
    let line = render::render_notification(notification);
    if notification.is_error() {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}
