pub mod hotel_service;
