pub mod new;
pub mod options;
pub mod preview;
pub mod reset;
pub mod submit;
pub mod validate;
