mod result;

pub use result::{QueryResult, RawQueryResult};
