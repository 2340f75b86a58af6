//! Service layer: the booking, availability and admin-control core.

pub mod booking_service;
