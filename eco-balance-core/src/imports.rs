pub(crate) use anyhow::{bail, ensure, Context};
pub(crate) use ndarray::Array1;
#[cfg(test)]
pub(crate) use ndarray::array;
pub(crate) use serde::{Deserialize, Serialize};
pub(crate) use std::ffi::OsStr;
pub(crate) use std::fs::File;
pub(crate) use std::path::Path;

pub(crate) use crate::traits::*;
pub(crate) use crate::utils::*;
