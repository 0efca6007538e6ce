pub mod header;
pub mod upload_area;
pub mod preview;
pub mod action_buttons;
pub mod confidence_bar;
pub mod result_panels;
