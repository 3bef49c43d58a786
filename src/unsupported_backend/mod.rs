pub mod font_backend;
