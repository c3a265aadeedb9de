//! Cart commands.

use anyhow::{Context as _, Result};
use grt_cart::{Applied, CartHandle, CartState};

use super::{parse_product_id, AddArgs, LineArgs, RemoveProductArgs, SetArgs};
use crate::context::Context;
use crate::output::{format_amount, format_variant};

pub fn add(args: AddArgs, cart: &CartHandle, ctx: &Context) -> Result<()> {
    let item = args.to_line_item();
    let applied = cart
        .add_or_merge_line(item)
        .with_context(|| format!("Cannot add product {}", args.line.id))?;
    report(&applied, ctx, &format!("Added {} x {}", args.quantity, args.name));
    Ok(())
}

pub fn remove(args: LineArgs, cart: &CartHandle, ctx: &Context) -> Result<()> {
    let key = args.key();
    let before = cart.snapshot().len();
    let applied = cart.remove_line(key.clone());
    if applied.state.len() < before {
        report(&applied, ctx, &format!("Removed {}", key));
    } else {
        report(&applied, ctx, &format!("No line matches {}", key));
    }
    Ok(())
}

pub fn remove_product(args: RemoveProductArgs, cart: &CartHandle, ctx: &Context) -> Result<()> {
    let id = parse_product_id(&args.id);
    let before = cart.snapshot().len();
    let applied = cart.remove_product(id.clone());
    let removed = before - applied.state.len();
    report(&applied, ctx, &format!("Removed {} line(s) of product {}", removed, id));
    Ok(())
}

pub fn set(args: SetArgs, cart: &CartHandle, ctx: &Context) -> Result<()> {
    let key = args.line.key();
    let applied = cart.set_quantity(key.clone(), args.quantity)?;
    let msg = match applied.state.get(&key) {
        Some(line) => format!("{} quantity is now {}", key, line.quantity),
        None => format!("{} is not in the cart", key),
    };
    report(&applied, ctx, &msg);
    Ok(())
}

pub fn clear(cart: &CartHandle, ctx: &Context) -> Result<()> {
    let applied = cart.clear();
    report(&applied, ctx, "Cart cleared");
    Ok(())
}

pub fn show(cart: &CartHandle, ctx: &Context) -> Result<()> {
    let state = cart.snapshot();
    if ctx.output.is_json() {
        ctx.output.json(&state);
        return Ok(());
    }
    print_lines(&state, ctx);
    Ok(())
}

pub fn totals(cart: &CartHandle, ctx: &Context) -> Result<()> {
    let summary = cart.summary();
    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    ctx.output.header("Order summary");
    ctx.output.kv(
        &format!("Subtotal ({} items)", summary.item_count),
        &format_amount(summary.subtotal),
    );
    let shipping = if summary.ships_free() && summary.item_count > 0 {
        "Free".to_string()
    } else {
        format_amount(summary.shipping)
    };
    ctx.output.kv("Shipping", &shipping);
    ctx.output.kv("Tax", &format_amount(summary.tax));
    ctx.output.kv("Total", &format_amount(summary.total));
    Ok(())
}

pub fn checkout(cart: &CartHandle, ctx: &Context) -> Result<()> {
    let handoff = cart.checkout().context("Nothing to check out")?;
    if ctx.output.is_json() {
        ctx.output.json(&handoff);
        return Ok(());
    }

    ctx.output.header("Checkout");
    ctx.output.kv("Lines", &handoff.totals.line_count.to_string());
    ctx.output.kv("Items", &handoff.totals.item_count.to_string());
    ctx.output.kv("Amount due", &format_amount(handoff.amount_due()));
    Ok(())
}

fn print_lines(state: &CartState, ctx: &Context) {
    if state.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    ctx.output.header("Cart");
    let widths = [10, 24, 12, 10, 6, 12];
    ctx.output
        .table_row(&["ID", "NAME", "VARIANT", "PRICE", "QTY", "LINE TOTAL"], &widths);
    for line in state {
        let id = line.id.to_string();
        let variant = format_variant(line.size.as_deref(), line.color.as_deref());
        let price = format_amount(line.price);
        let quantity = line.quantity.to_string();
        let total = format_amount(line.line_total());
        ctx.output.table_row(
            &[
                id.as_str(),
                line.name.as_str(),
                variant.as_str(),
                price.as_str(),
                quantity.as_str(),
                total.as_str(),
            ],
            &widths,
        );
    }
}

fn report(applied: &Applied, ctx: &Context, msg: &str) {
    if let Some(warning) = &applied.warning {
        ctx.output.warn(&warning.to_string());
    }
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "cart": applied.state,
            "saved": applied.is_durable(),
        }));
        return;
    }
    ctx.output.success(msg);
}
