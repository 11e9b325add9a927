pub mod io;
pub(crate) mod synchsafe;
