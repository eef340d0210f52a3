pub mod alexa;
pub mod nest;
