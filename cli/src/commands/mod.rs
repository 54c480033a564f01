pub mod check;
pub mod cli;
pub mod init;
pub mod run;
