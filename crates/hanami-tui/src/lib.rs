pub mod app;
pub mod event_handler;
pub mod logging;
pub mod ui;
pub mod views;
pub mod widgets;

pub use app::App;
pub use event_handler::EventHandler;
pub use ui::try_init_tui;
pub use widgets::SceneWidget;
