//! Product lookup by barcode.

use clap::{Args, Subcommand};
use std::io;

use super::{block_on, notice, OutputFormat};
use pocket_chef_core::{
    BarcodeScanner, Category, FileStore, ItemDraft, LookupClient, LookupError, PantryInventory,
    Product, ReaderScanner, ScanError,
};

#[derive(Args)]
pub struct ProductCommand {
    #[command(subcommand)]
    pub command: ProductSubcommand,
}

#[derive(Subcommand)]
pub enum ProductSubcommand {
    /// Look up a product by barcode
    Lookup {
        /// Barcode (8 to 14 digits)
        barcode: String,

        /// Add the product to the pantry under this category
        #[arg(long)]
        add_to_pantry: Option<Category>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Read a barcode from the scanner (stdin) and look it up
    Scan {
        /// Add the product to the pantry under this category
        #[arg(long)]
        add_to_pantry: Option<Category>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ProductCommand {
    pub fn run(&self, store: &FileStore, api_url: &str) -> Result<(), Box<dyn std::error::Error>> {
        let (barcode, add_to_pantry, format) = match &self.command {
            ProductSubcommand::Lookup {
                barcode,
                add_to_pantry,
                format,
            } => (barcode.clone(), *add_to_pantry, format),
            ProductSubcommand::Scan {
                add_to_pantry,
                format,
            } => {
                eprintln!("Scan a barcode (or type it and press Enter):");
                let mut scanner = ReaderScanner::new(io::stdin().lock());
                match scanner.scan() {
                    Ok(code) => (code, *add_to_pantry, format),
                    Err(ScanError::Cancelled) => {
                        println!("Scan cancelled.");
                        return Ok(());
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        };

        let client = LookupClient::new(api_url)?;
        let product = match block_on(client.fetch_product(&barcode))? {
            Ok(product) => product,
            Err(e) if e.is_not_found() => {
                eprintln!("warning: no product found for barcode {}", barcode);
                return Ok(());
            }
            Err(e @ LookupError::InvalidBarcode(_)) => return Err(e.into()),
            Err(e) => {
                tracing::warn!(error = %e, "Product lookup failed");
                eprintln!("warning: {}", e);
                return Ok(());
            }
        };

        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&product)?),
            OutputFormat::Text => print!("{}", product),
        }

        if let Some(category) = add_to_pantry {
            add_product_to_pantry(store, &product, category)?;
        }
        Ok(())
    }
}

fn add_product_to_pantry(
    store: &FileStore,
    product: &Product,
    category: Category,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(mut pantry) = notice(PantryInventory::load(store.clone()))? else {
        return Ok(());
    };

    let draft = ItemDraft::new()
        .with_name(product.name.clone())
        .with_quantity(1.0)
        .with_unit("units")
        .with_category(category);

    if let Some(item) = notice(pantry.add_item(draft))? {
        println!("\nAdded to pantry: {}  [{}]", item, item.id);
    }
    Ok(())
}
