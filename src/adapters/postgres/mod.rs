pub mod booking_store;

#[allow(unused_imports)]
pub use booking_store::PostgresBookingStore;
