//! Rayon pool setup
//!
//! Grid rows are evaluated on Rayon's global pool. By default Rayon sizes it
//! to the number of CPUs; `init_parallel` pins it to a fixed worker count.

use tracing::{info, warn};

use crate::error::{HeatmapError, HeatmapResult};

/// Initialize the global pool with `threads` workers (0 = auto-detect).
/// Call this once at startup, before the first heatmap is built.
pub fn init_parallel(threads: usize) -> HeatmapResult<()> {
    if threads == 0 {
        return Ok(());
    }
    match rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
    {
        Ok(()) => {
            info!("Rayon pool initialized with {} threads", threads);
            Ok(())
        }
        Err(e) => {
            warn!("Rayon pool already initialized: {}", e);
            Err(HeatmapError::config(format!(
                "failed to initialize {} worker threads: {}",
                threads, e
            )))
        }
    }
}
