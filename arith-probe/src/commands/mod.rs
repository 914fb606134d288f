pub mod init;
pub mod run;
pub mod eval;
pub mod surface;
