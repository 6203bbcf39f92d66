// Mask Editor Core Library
// Mask frame model, transform controller and persistence

pub mod action;
pub mod actions;
pub mod canvas;
pub mod command;
pub mod document;
pub mod editor;
pub mod error;
pub mod file_io;
pub mod geometry;
pub mod hit_test;
pub mod mask_frame;
pub mod mode;
pub mod object_store;
pub mod presets;
pub mod tool;
