pub mod modal_frame;
pub mod statusbar;
pub mod tab_bar;
