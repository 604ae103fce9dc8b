pub mod calendar;
pub mod catalog_repository;
pub mod messenger;

pub use calendar::Calendar;
pub use catalog_repository::CatalogRepository;
pub use messenger::Messenger;
