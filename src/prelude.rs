#![allow(unused_imports)]

pub use anyhow::{Context as _, Result, bail};
pub use bytes::Bytes;
pub use serde::{Deserialize, Serialize};
pub use std::sync::Arc;

pub use tracing::{debug, error, info, trace, warn};
