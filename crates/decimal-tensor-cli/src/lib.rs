//! decimal-tensor-cli: helpers behind the `dtensor` binary.
pub mod commands;
