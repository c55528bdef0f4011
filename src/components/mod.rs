mod app_button;
mod circle_button;
mod icon_button;

pub use app_button::{AppButton, ButtonTheme};
pub use circle_button::CircleButton;
pub use icon_button::IconButton;
