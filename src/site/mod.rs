pub mod graph;
pub mod reconcile;
pub mod sitemap;
pub mod slug;

pub use graph::{build_site_graph, PageDescriptor, PageKind, PagePayload};
