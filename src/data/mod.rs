/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<LaunchRecord>, sites, payload bounds
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site / payload predicates → derived record views
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
