//! Demo content shown above the editor, unrelated to stickers

pub mod faq;
pub mod profile_card;
