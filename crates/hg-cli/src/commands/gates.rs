use anyhow::Result;
use hg_core::GateCatalog;

/// Print the gate catalog in report order.
pub fn run() -> Result<()> {
    let catalog = GateCatalog::canonical();

    println!("{:<4} {:<40} {:<16} {}", "#", "Practice", "Category", "Key");
    println!("{}", "-".repeat(100));
    for (i, gate) in catalog.gates().iter().enumerate() {
        println!(
            "{:<4} {:<40} {:<16} {}",
            i + 1,
            gate.display_name,
            gate.category.to_string(),
            gate.key
        );
    }
    println!();
    println!("{} gates", catalog.len());
    Ok(())
}
