pub mod folder;
pub mod settings;
pub mod task;
pub mod view;
