// Components module

pub mod device_selector;
pub mod editor;
pub mod preview;
pub mod resource_panel;
pub mod tab_bar;
pub mod toolbar;

pub use device_selector::DeviceSelector;
pub use editor::EditorPane;
pub use preview::{Preview, PreviewAction, PreviewState};
pub use resource_panel::ResourcePanel;
pub use tab_bar::TabBar;
pub use toolbar::Toolbar;
