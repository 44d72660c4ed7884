pub(crate) mod bootstrap;
pub(crate) mod cli;
pub(crate) mod commands;
pub(crate) mod loop_runner;
pub(crate) mod replay;
pub(crate) mod session;
