/// Data layer: core types, loading, filtering, aggregation, trajectories.
///
/// Architecture:
/// ```text
///        .csv
///          │
///          ▼
///    ┌──────────┐
///    │  loader   │  parse file → RttTable (Type rename, dtype guessing)
///    └──────────┘
///          │
///          ▼
///    ┌──────────┐     ┌──────────┐
///    │ classify  │ ──▶ │  filter   │  per-column constraints → filtered table
///    └──────────┘     └──────────┘
///                           │
///                           ▼
///                     ┌───────────┐
///                     │ aggregate  │  metric selection → ChartSpec
///                     └───────────┘
///
///    ┌────────────┐
///    │ trajectory  │  twelve monthly targets → trajectory.csv (independent)
///    └────────────┘
/// ```
pub mod aggregate;
pub mod classify;
pub mod filter;
pub mod loader;
pub mod model;
pub mod trajectory;
