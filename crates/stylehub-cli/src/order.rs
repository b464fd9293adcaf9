//! `order` command: one purchase session driven through `CheckoutController`.

use anyhow::Context;
use clap::Args;
use stylehub_api::{CatalogKind, StorefrontClient};
use stylehub_checkout::{CheckoutController, SubmitOutcome, WorkflowState};
use stylehub_core::{AppConfig, DeliveryZone, ItemId, OrderSummary, ShippingField, VariantId};

#[derive(Debug, Args)]
pub struct OrderArgs {
    /// Product id
    #[arg(long)]
    pub product: i64,
    /// Size (variant) id
    #[arg(long)]
    pub size: i64,
    /// Quantity, between 1 and the size's stock
    #[arg(long, default_value_t = 1)]
    pub quantity: i64,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub city: String,
    /// Delivery zone: near (inside) or far (outside)
    #[arg(long, default_value = "near")]
    pub zone: DeliveryZone,
    /// Look the product up in the featured listing instead of collections
    #[arg(long)]
    pub featured: bool,
}

/// Place one order.
///
/// # Errors
///
/// Returns an error if the product listing cannot be fetched, the product or
/// size is unknown, the form is rejected, or the API refuses the order.
pub(crate) async fn run_order(
    client: StorefrontClient,
    config: &AppConfig,
    args: OrderArgs,
) -> anyhow::Result<()> {
    let kind = if args.featured {
        CatalogKind::Featured
    } else {
        CatalogKind::Collections
    };
    let items = client
        .fetch_catalog(kind)
        .await
        .with_context(|| format!("failed to fetch {kind} listing"))?;
    let item = items
        .into_iter()
        .find(|i| i.id == ItemId(args.product))
        .ok_or_else(|| anyhow::anyhow!("product {} not found in {kind} listing", args.product))?;

    let mut ctl = CheckoutController::from_config(client, config);
    let session = ctl.open(item);
    tracing::debug!(%session, product = args.product, "order session started");

    let wf = ctl.workflow_mut();
    if !wf.select_variant(VariantId(args.size)) {
        anyhow::bail!("size {} is unknown or out of stock", args.size);
    }
    if !wf.change_quantity(args.quantity) {
        let available = wf
            .draft()
            .and_then(|d| d.variant.as_ref())
            .map_or(0, |v| v.quantity);
        anyhow::bail!(
            "quantity {} is out of range; {available} available for this size",
            args.quantity
        );
    }
    wf.update_shipping_field(ShippingField::Name, args.name);
    wf.update_shipping_field(ShippingField::Phone, args.phone);
    wf.update_shipping_field(ShippingField::Address, args.address);
    wf.update_shipping_field(ShippingField::City, args.city);
    wf.set_zone(args.zone);

    if let Some(summary) = ctl.workflow().summary() {
        print_summary(&summary);
    }

    match ctl.submit() {
        SubmitOutcome::Dispatched(_) => {}
        SubmitOutcome::Rejected(err) => anyhow::bail!("{err}"),
        SubmitOutcome::Ignored => anyhow::bail!("order was not submitted"),
    }

    match ctl.settle_submission().await {
        WorkflowState::Succeeded => {
            let message = ctl
                .workflow()
                .draft()
                .and_then(|d| d.success.clone())
                .unwrap_or_default();
            println!();
            println!("{message}");
            Ok(())
        }
        WorkflowState::Failed => {
            let message = ctl
                .workflow()
                .draft()
                .and_then(|d| d.error.clone())
                .unwrap_or_else(|| stylehub_api::GENERIC_FAILURE_MESSAGE.to_string());
            anyhow::bail!("{message}")
        }
        other => anyhow::bail!("checkout ended in unexpected state {other:?}"),
    }
}

fn print_summary(summary: &OrderSummary) {
    println!("Order summary");
    println!("  {:<10}{}", "Item", summary.title);
    if let Some(size) = &summary.variant_name {
        println!("  {:<10}{size}", "Size");
    }
    println!("  {:<10}{}", "Price", summary.unit_price);
    println!("  {:<10}{}", "Quantity", summary.quantity);
    println!("  {:<10}{}", "Subtotal", summary.subtotal);
    println!("  {:<10}{}", "Shipping", summary.shipping);
    println!("  {:<10}{}", "Total", summary.total);
    println!("  {:<10}{}", "Payment", OrderSummary::PAYMENT_METHOD);
    if let Some(note) = &summary.stock_note {
        println!("  {note}");
    }
}
