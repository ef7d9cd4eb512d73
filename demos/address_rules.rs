//! Address rules example for addressing-rs
//!
//! Validates whole addresses against the bundled snapshot and against the
//! no-data baseline.

use addressing_core::{
    validate_address, Address, AddressMetadataProvider, EmbeddedProvider, NoDataProvider,
};

fn main() -> anyhow::Result<()> {
    println!("=== addressing-rs Address Rules Example ===\n");

    let addresses: Vec<Address> = serde_json::from_str(
        r#"[
            {"line1":"1600 Amphitheatre Pkwy","city":"Mountain View",
             "stateOrProvince":"CA","postalCode":"94043","countryCode":"US"},
            {"line1":"1 Marina Rd","city":"Lagos",
             "stateOrProvince":"Lagos","postalCode":"ABC123","countryCode":"NG"},
            {"line1":"","city":"Berlin",
             "stateOrProvince":"BE","postalCode":"10117","countryCode":"DEU"}
        ]"#,
    )?;

    let providers: [(&str, &dyn AddressMetadataProvider); 2] = [
        ("embedded", EmbeddedProvider::shared()),
        ("no-data", &NoDataProvider),
    ];

    for (label, provider) in providers {
        println!("--- Provider: {label} ---");
        for address in &addresses {
            match validate_address(address, provider) {
                Ok(()) => println!("  ✓ {}, {}", address.city, address.country_code),
                Err(violations) => {
                    println!("  ✗ {}, {}", address.city, address.country_code);
                    for v in violations {
                        println!("      {v}");
                    }
                }
            }
        }
        println!();
    }

    Ok(())
}
