use crate::model::ScanError;
use kdam::{Bar, BarExt};
use rayon::prelude::*;
use std::sync::{Arc, Mutex};

/// controls how [`parallel_map`] schedules its work.
#[derive(Debug, Clone, Default)]
pub struct ParallelOptions {
    /// number of worker threads. if None, the rayon global pool is used.
    pub parallelism: Option<usize>,
    /// description for a progress bar written to stderr. if None, no progress is reported.
    pub progress: Option<String>,
}

impl ParallelOptions {
    pub fn new(parallelism: Option<usize>, progress: Option<String>) -> ParallelOptions {
        ParallelOptions {
            parallelism,
            progress,
        }
    }
}

/// applies `f` to every item on a rayon thread pool. the output has one entry per
/// input item, in input order, regardless of the order in which items were processed.
/// the progress bar is observational only.
pub fn parallel_map<T, R, F>(
    items: &[T],
    f: F,
    options: &ParallelOptions,
) -> Result<Vec<R>, ScanError>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    let bar = match &options.progress {
        None => None,
        Some(desc) => {
            let bar = Bar::builder()
                .desc(desc.clone())
                .total(items.len())
                .build()
                .map_err(|e| ScanError::InternalError(format!("progress bar error: {e}")))?;
            Some(Arc::new(Mutex::new(bar)))
        }
    };

    let run = || {
        items
            .par_iter()
            .map(|item| {
                if let Some(bar) = &bar {
                    if let Ok(mut bar) = bar.lock() {
                        let _ = bar.update(1);
                    }
                }
                f(item)
            })
            .collect::<Vec<_>>()
    };

    let result = match options.parallelism {
        None => run(),
        Some(0) => {
            return Err(ScanError::InvalidConfiguration(String::from(
                "parallelism must be at least 1",
            )))
        }
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ScanError::ThreadPoolError(e.to_string()))?;
            pool.install(run)
        }
    };
    if bar.is_some() {
        eprintln!();
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_input_order() {
        let items = (0..1000).collect::<Vec<u64>>();
        let options = ParallelOptions::new(Some(4), None);
        let result = parallel_map(&items, |x| x * 2, &options).expect("test invariant failed");
        let expected = items.iter().map(|x| x * 2).collect::<Vec<_>>();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_global_pool() {
        let items = vec!["a", "bb", "ccc"];
        let result = parallel_map(&items, |s| s.len(), &ParallelOptions::default())
            .expect("test invariant failed");
        assert_eq!(result, vec![1, 2, 3]);
    }

    #[test]
    fn test_zero_parallelism_is_rejected() {
        let items = vec![1, 2, 3];
        let options = ParallelOptions::new(Some(0), None);
        let result = parallel_map(&items, |x| *x, &options);
        assert!(matches!(result, Err(ScanError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<u8> = vec![];
        let options = ParallelOptions::new(Some(2), Some(String::from("empty")));
        let result = parallel_map(&items, |x| *x, &options).expect("test invariant failed");
        assert!(result.is_empty());
    }
}
