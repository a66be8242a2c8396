//! Parallel resolution for pages with many selects.
//!
//! Controls are independent and the lookup is only read, so each config is
//! resolved on the rayon pool. Results keep the input order.

use rayon::prelude::*;
use tracing::debug;

use crate::config::{ResolveOptions, SelectConfig};
use crate::error::BindingError;
use crate::error_state::ErrorLookup;
use crate::resolver::{resolve_with, BindingDescriptor};

pub fn resolve_all(
    configs: &[SelectConfig],
    lookup: &dyn ErrorLookup,
    options: ResolveOptions,
) -> Vec<Result<BindingDescriptor, BindingError>> {
    debug!(count = configs.len(), "resolving select batch");

    configs
        .par_iter()
        .map(|config| resolve_with(config, lookup, options))
        .collect()
}
