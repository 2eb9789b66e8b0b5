//! Command handlers

mod info;
mod poll;
mod transceive;

pub(crate) use info::*;
pub(crate) use poll::*;
pub(crate) use transceive::*;
