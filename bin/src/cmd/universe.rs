//! Universe command implementation.

use std::path::Path;

use anyhow::Result;

use sotavento_data::PriceBundle;

/// Print the resolved asset universe of a bundle.
pub(crate) fn list_universe(bundle_path: &Path) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                     Resolved Universe                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let bundle = PriceBundle::from_csv_path(bundle_path)?;

    println!("{:<8} {:<10} {:<12} {:<12}", "Id", "Symbol", "First", "Last");
    println!("{}", "─".repeat(44));

    for (asset, symbol) in bundle.universe().iter() {
        match bundle.coverage(asset) {
            Some((first, last)) => {
                println!("{:<8} {:<10} {:<12} {:<12}", asset, symbol, first, last);
            }
            None => {
                println!("{:<8} {:<10} {:<12} {:<12}", asset, symbol, "-", "-");
            }
        }
    }

    println!();
    println!(
        "{} assets over {} trading days",
        bundle.universe().len(),
        bundle.calendar().len()
    );
    println!();

    Ok(())
}
