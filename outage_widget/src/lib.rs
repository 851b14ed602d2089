pub mod api;
pub mod controller;
pub mod render;
pub mod settings;
pub mod view_state;

pub use controller::ViewController;
pub use settings::Settings;
pub use view_state::ViewState;
