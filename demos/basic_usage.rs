//! Basic usage example for addressing-rs
//!
//! This example demonstrates how to:
//! - Load the bundled country snapshot
//! - Validate postal codes and subdivision codes
//! - List the subdivisions of a country

use addressing_core::{AddressMetadataProvider, EmbeddedProvider, Result};

fn main() -> Result<()> {
    println!("=== addressing-rs Basic Usage Example ===\n");

    let provider = EmbeddedProvider::shared();
    println!("✓ Snapshot loaded: {} countries\n", provider.index().len());

    // Example 1: Postal codes
    println!("--- Example 1: Postal codes ---");
    let postals = [
        ("US", "94043"),
        ("US", "ABCDE"),
        ("NG", "100001"),
        ("GB", "SW1A 1AA"),
        ("CA", "k1a 0b1"),
    ];
    for (cc, postal) in postals {
        println!("  {cc} {postal:<10} -> {}", provider.is_valid_postal(cc, postal));
    }
    println!();

    // Example 2: Subdivision codes are case-insensitive. DE has no
    // subdivision data, so no code is valid there.
    println!("--- Example 2: Subdivision codes ---");
    for (cc, code) in [("US", "ca"), ("US", "ZZ"), ("NG", "lagos"), ("DE", "BY")] {
        println!("  {cc} {code:<6} -> {}", provider.is_valid_subdivision(cc, code));
    }
    println!();

    // Example 3: Subdivision names
    println!("--- Example 3: Provinces of Canada ---");
    for (code, name) in provider.subdivision_names("CA").iter() {
        println!("  {code}: {name}");
    }
    println!();

    // Example 4: Raw patterns
    println!("--- Example 4: Postal patterns ---");
    for cc in provider.index().codes() {
        let pattern = provider
            .country(cc)
            .and_then(|c| c.postal_pattern.as_deref())
            .unwrap_or("(none)");
        println!("  {cc}: {pattern}");
    }

    Ok(())
}
