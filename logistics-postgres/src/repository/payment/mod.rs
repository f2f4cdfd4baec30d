pub mod payment_record_repository;


pub use payment_record_repository::PaymentRecordRepositoryImpl;
