//! Catalog and product-detail command handlers.

use stylehub_api::{CatalogKind, StorefrontClient};
use stylehub_checkout::{CatalogBrowser, CatalogStatus, DetailState, ProductDetailViewer};
use stylehub_core::pricing::discount_percent;
use stylehub_core::{AppConfig, Item, ItemId};

/// List one catalog listing.
///
/// Prints the first page unless `all` is set. A failed fetch prints an empty
/// catalog rather than an error.
pub(crate) async fn run_catalog(
    client: &StorefrontClient,
    config: &AppConfig,
    featured: bool,
    all: bool,
) -> anyhow::Result<()> {
    let kind = if featured {
        CatalogKind::Featured
    } else {
        CatalogKind::Collections
    };
    let mut browser = CatalogBrowser::new(kind, config.catalog_page_size);
    browser.load(client).await;

    if browser.is_empty() {
        if browser.status() == CatalogStatus::Failed {
            println!("no {kind} items available right now");
        } else {
            println!("no {kind} items listed");
        }
        return Ok(());
    }

    browser.set_expanded(all);
    let header = format!(
        "{:<7}{:<32}{:<16}{:>10}{:>7}  {:<14}SIZES",
        "ID", "TITLE", "BRAND", "PRICE", "OFF", "STATUS"
    );
    println!("{header}");
    for item in browser.visible_items() {
        println!(
            "{:<7}{:<32}{:<16}{:>10}{:>7}  {:<14}{}",
            item.id,
            truncate(&item.title, 30),
            truncate(&item.brand, 14),
            item.price,
            discount_percent(item).map(|p| format!("-{p}%")).unwrap_or_default(),
            browser.affordance(item).label(),
            format_sizes(item),
        );
    }

    if browser.has_more() && !browser.is_expanded() {
        let hidden = browser.items().len() - browser.visible_items().len();
        println!("... {hidden} more; pass --all to show everything");
    }
    Ok(())
}

/// Show extended detail for one product. A failed fetch is reported on
/// stdout.
pub(crate) async fn run_product(client: &StorefrontClient, id: i64) -> anyhow::Result<()> {
    let mut viewer = ProductDetailViewer::new();
    viewer.load(client, ItemId(id), None).await;

    match viewer.state() {
        DetailState::Loaded(detail) => {
            println!("{}", detail.name);
            if let Some(brand) = &detail.brand {
                println!("Brand: {brand}");
            }
            if let Some(description) = &detail.description {
                println!();
                println!("{description}");
            }
            if !detail.images.is_empty() {
                println!();
                println!("Images:");
                for url in detail.gallery() {
                    let marker = if viewer.active_image() == Some(url) {
                        "*"
                    } else {
                        " "
                    };
                    println!(" {marker} {url}");
                }
            }
        }
        DetailState::Failed { message, .. } => println!("{message}"),
        DetailState::Idle | DetailState::Loading { .. } => {}
    }
    Ok(())
}

fn format_sizes(item: &Item) -> String {
    item.variants
        .iter()
        .map(|v| format!("{}({})", v.name, v.quantity))
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        format!("{}...", value.chars().take(max - 3).collect::<String>())
    } else {
        value.to_string()
    }
}
