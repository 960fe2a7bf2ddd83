pub mod http;
pub mod imaging;
pub mod observability;
pub mod persistence;
pub mod storage;
pub mod tabular;
