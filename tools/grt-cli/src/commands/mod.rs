//! CLI command implementations.

pub mod cart;
pub mod config;

use clap::Args;
use grt_cart::{LineItem, LineKey, ProductId};

/// Parse a product id: integers stay numeric, anything else is a string id.
pub fn parse_product_id(raw: &str) -> ProductId {
    match raw.parse::<i64>() {
        Ok(n) => ProductId::Number(n),
        Err(_) => ProductId::Text(raw.to_string()),
    }
}

/// Identifies one cart line.
#[derive(Args)]
pub struct LineArgs {
    /// Product id (integer or string).
    pub id: String,

    /// Size variant.
    #[arg(long)]
    pub size: Option<String>,

    /// Color variant.
    #[arg(long)]
    pub color: Option<String>,
}

impl LineArgs {
    pub fn key(&self) -> LineKey {
        LineKey {
            id: parse_product_id(&self.id),
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub line: LineArgs,

    /// Display name.
    #[arg(short, long)]
    pub name: String,

    /// Unit price.
    #[arg(short, long)]
    pub price: f64,

    /// Quantity to add.
    #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
    pub quantity: i64,

    /// Image reference.
    #[arg(long)]
    pub image: Option<String>,
}

impl AddArgs {
    pub fn to_line_item(&self) -> LineItem {
        let key = self.line.key();
        LineItem {
            id: key.id,
            name: self.name.clone(),
            price: self.price,
            image: self.image.clone(),
            quantity: self.quantity,
            size: key.size,
            color: key.color,
        }
    }
}

/// Arguments for the set command.
#[derive(Args)]
pub struct SetArgs {
    #[command(flatten)]
    pub line: LineArgs,

    /// New quantity; zero or less removes the line.
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,
}

/// Arguments for the remove-product command.
#[derive(Args)]
pub struct RemoveProductArgs {
    /// Product id; every size and color of it is removed.
    pub id: String,
}

/// Arguments for the init-config command.
#[derive(Args)]
pub struct InitConfigArgs {
    /// Where to write the config file.
    #[arg(default_value = "grt.toml")]
    pub path: String,

    /// Force overwrite existing config.
    #[arg(short, long)]
    pub force: bool,
}
