/// Data layer: core types, loading, aggregation and export.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet / http(s) URL
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse source → SalesDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SalesDataset │  Vec<SalesRecord>, vehicle types
///   └──────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  filter + group-by means → SummarySet
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  SummarySet → long-format CSV
///   └──────────┘
/// ```

pub mod aggregate;
pub mod export;
pub mod loader;
pub mod model;
pub mod summary;
