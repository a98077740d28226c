pub mod lazy_init;

pub use lazy_init::LazyInit;
