pub mod event;
pub mod net;
