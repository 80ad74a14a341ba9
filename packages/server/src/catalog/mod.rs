//! Catalog core: facet storage, image lifecycle, dealer ordering and door
//! sample search.

pub mod facets;
pub mod images;
pub mod ordinal;
pub mod search;
