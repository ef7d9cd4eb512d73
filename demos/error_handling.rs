//! Error handling example for addressing-rs
//!
//! Predicates never fail; errors only come from loading data and from the
//! explicit pattern diagnostics.

use addressing_core::{
    AddressError, AddressMetadataProvider, CountryRecord, EmbeddedProvider, Result,
};

fn main() -> Result<()> {
    println!("=== addressing-rs Error Handling Example ===\n");

    // Example 1: Loading a snapshot directory
    println!("--- Example 1: Loading a snapshot directory ---");
    match EmbeddedProvider::from_dir("/definitely/not/here") {
        Ok(p) => println!("  Loaded {} countries", p.index().len()),
        Err(AddressError::NotFound(msg)) => println!("  ✗ {msg}"),
        Err(e) => return Err(e),
    }
    let provider = EmbeddedProvider::from_dir(EmbeddedProvider::default_data_dir())?;
    println!("  ✓ Loaded {} countries from the data directory", provider.index().len());
    println!();

    // Example 2: Unknown countries are permissive, not errors
    println!("--- Example 2: Unknown and malformed input ---");
    for (cc, postal) in [("XX", "12345"), ("", "12345"), ("US", "   ")] {
        println!("  postal({cc:?}, {postal:?}) -> {}", provider.is_valid_postal(cc, postal));
    }
    println!();

    // Example 3: A malformed pattern in source data
    println!("--- Example 3: Pattern diagnostics ---");
    let broken = CountryRecord::new(Some("ZZ"), "ZZ").with_postal_pattern(Some(r"\d{5}(".into()));
    let provider = EmbeddedProvider::from_records([("ZZ".to_string(), broken)]);
    println!("  is_valid_postal(ZZ, abc) -> {}", provider.is_valid_postal("ZZ", "abc"));
    match provider.try_postal_regex("ZZ") {
        Ok(_) => println!("  pattern compiled"),
        Err(e) => println!("  ✗ {e}"),
    }

    Ok(())
}
