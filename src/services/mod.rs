pub mod cafe_service;
pub use cafe_service::{CafeError, CafeService};

pub mod cafe_service_impl;
pub use cafe_service_impl::SeaOrmCafeService;
