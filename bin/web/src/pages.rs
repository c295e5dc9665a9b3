//! Page components for the application.
//!
//! Each page is a Leptos component rendered for one [`Screen`].
//!
//! [`Screen`]: crate::screen::Screen

pub mod home;

pub use home::HomePage;
