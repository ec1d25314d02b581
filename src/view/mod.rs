//! Presentation layer.
//!
//! ```text
//! StoreSnapshot → TableViewModel / DetailViewModel → render_* → String
//! ```
//!
//! - [`viewmodel`]: display-ready projections of the store, including search filtering
//! - [`renderer`]: fixed-width plain-text output

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render_detail, render_table};
pub use viewmodel::{Banner, DetailViewModel, EmptyState, HeaderInfo, TableRow, TableViewModel};
