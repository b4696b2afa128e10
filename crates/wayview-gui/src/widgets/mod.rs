pub mod modals;

pub use modals::ErrorModal;
