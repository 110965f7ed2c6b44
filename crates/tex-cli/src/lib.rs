pub mod commands;
pub mod keyscript;
