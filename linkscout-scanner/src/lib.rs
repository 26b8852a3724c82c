pub mod error;
pub mod extractor;
pub mod ignore;
pub mod normalize;
pub mod result;

pub use error::ScanError;
pub use extractor::LinkExtractor;
pub use ignore::IgnoreList;
pub use normalize::normalize_href;
pub use result::{DocumentLink, FetchResult};
