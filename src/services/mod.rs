pub mod assets;
pub mod html;
pub mod markup;
pub mod pages;
pub mod slug;
pub mod tags;
