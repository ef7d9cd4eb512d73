// crates/addressing-core/src/provider/bundled.rs

// Snapshot compiled into the crate. Regenerate the files under `data/` with
// `addressing import --out crates/addressing-core/data --overwrite`.
pub(super) const SNAPSHOT: &[(&str, &str)] = &[
    ("AE", include_str!("../../data/AE.json")),
    ("AU", include_str!("../../data/AU.json")),
    ("BR", include_str!("../../data/BR.json")),
    ("CA", include_str!("../../data/CA.json")),
    ("DE", include_str!("../../data/DE.json")),
    ("FR", include_str!("../../data/FR.json")),
    ("GB", include_str!("../../data/GB.json")),
    ("NG", include_str!("../../data/NG.json")),
    ("US", include_str!("../../data/US.json")),
];
