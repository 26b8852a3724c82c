pub mod catalogue;
pub mod compare;
pub mod report;

pub use catalogue::{Catalogue, Category, Product};
pub use compare::{CompareError, CompareRequest, ProductComparator};
pub use report::{CatalogueReport, ComparisonReport, ParityStatus};
