pub mod classify_ops;
pub mod config_ops;
pub mod replay_ops;
