pub mod handle_controller;
pub mod push_controller;

pub use handle_controller::HandleController;
pub use push_controller::PushController;
