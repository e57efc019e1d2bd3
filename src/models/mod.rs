pub mod booking;
pub mod payment;

pub use booking::{Booking, BookingStatus, FinalStatus, NewBooking, StatusUpdate};
pub use payment::{
    BookingDetails, ConfirmPaymentRequest, CreatePaymentIntentRequest,
    CreatePaymentIntentResponse, PaymentDetails, PaymentIntent, PaymentIntentRequest,
};
