//! GRT cart CLI - inspect and edit the persisted shopping cart.
//!
//! Commands:
//! - `grt add` - Add a product line, merging with an identical line
//! - `grt remove` - Remove one line (product plus size/color)
//! - `grt remove-product` - Remove every variant of a product
//! - `grt set` - Set a line's quantity
//! - `grt clear` - Empty the cart
//! - `grt show` - List cart lines
//! - `grt totals` - Order summary with shipping and tax
//! - `grt checkout` - Print the hand-off for the payment step
//! - `grt init-config` - Write a config file with every default spelled out

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use grt_cart::CartHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{AddArgs, InitConfigArgs, LineArgs, RemoveProductArgs, SetArgs};

/// GRT cart - manage the persisted shopping cart
#[derive(Parser)]
#[command(name = "grt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Session id; keeps this cart separate from other sessions
    #[arg(short, long, global = true)]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add(AddArgs),

    /// Remove one cart line
    Remove(LineArgs),

    /// Remove every size and color of a product
    RemoveProduct(RemoveProductArgs),

    /// Set the quantity of a cart line
    Set(SetArgs),

    /// Empty the cart
    Clear,

    /// List cart lines
    Show,

    /// Show the order summary
    Totals,

    /// Produce the checkout hand-off
    Checkout,

    /// Write a default config file
    InitConfig(InitConfigArgs),
}

fn init_tracing(filter: &str, verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("grt_cart=debug,grt_cache=debug,grt=debug")
        } else {
            EnvFilter::new(filter)
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };
    init_tracing(&ctx.config.logging.filter, ctx.output.is_verbose());

    let result = match cli.command {
        Commands::InitConfig(args) => commands::config::init(args, &ctx),
        command => ctx
            .open_cart(cli.session.as_deref())
            .and_then(|cart| run_cart_command(command, &cart, &ctx)),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn run_cart_command(command: Commands, cart: &CartHandle, ctx: &context::Context) -> Result<()> {
    match command {
        Commands::Add(args) => commands::cart::add(args, cart, ctx),
        Commands::Remove(args) => commands::cart::remove(args, cart, ctx),
        Commands::RemoveProduct(args) => commands::cart::remove_product(args, cart, ctx),
        Commands::Set(args) => commands::cart::set(args, cart, ctx),
        Commands::Clear => commands::cart::clear(cart, ctx),
        Commands::Show => commands::cart::show(cart, ctx),
        Commands::Totals => commands::cart::totals(cart, ctx),
        Commands::Checkout => commands::cart::checkout(cart, ctx),
        Commands::InitConfig(args) => commands::config::init(args, ctx),
    }
}
