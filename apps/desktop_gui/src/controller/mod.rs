pub mod carousel;
pub mod catalog;
pub mod events;
pub mod orchestration;
pub mod selection;
