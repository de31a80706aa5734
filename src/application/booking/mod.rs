mod booking_service;
mod errors;

#[allow(unused_imports)]
pub use booking_service::{
    BookingView, ServiceDependencies, create_booking, decide_booking, delete_booking, get_booking,
    list_by_booker, list_by_owner,
};
#[allow(unused_imports)]
pub use errors::{BookingApplicationError, Result};
