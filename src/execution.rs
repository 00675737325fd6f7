#[cfg(feature = "parallel")]
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};

/// Scheduling backend for the independent per-query tasks of a batch.
///
/// Tasks carry no ordering between them and run to completion without
/// yielding or allocating; any schedule over any number of workers is
/// permissible.
pub trait Execution {
    /// Runs `task` once for every index in `0..count`.
    fn for_each<F>(&mut self, count: usize, task: F)
    where
        F: Fn(usize) + Send + Sync;

    /// Runs `task` once per view, with exclusive access to it.
    fn for_each_view<T, F>(&mut self, views: Vec<&mut [T]>, task: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Send + Sync;
}

/// Executes tasks one after the other on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sequential;

impl Execution for Sequential {
    #[inline]
    fn for_each<F>(&mut self, count: usize, task: F)
    where
        F: Fn(usize) + Send + Sync,
    {
        for index in 0..count {
            task(index);
        }
    }

    #[inline]
    fn for_each_view<T, F>(&mut self, views: Vec<&mut [T]>, task: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Send + Sync,
    {
        for (index, view) in views.into_iter().enumerate() {
            task(index, view);
        }
    }
}

/// Executes tasks across the [rayon](https://github.com/rayon-rs/rayon)
/// thread pool.
#[cfg(feature = "parallel")]
#[derive(Clone, Copy, Debug, Default)]
pub struct Parallel;

#[cfg(feature = "parallel")]
impl Execution for Parallel {
    #[inline]
    fn for_each<F>(&mut self, count: usize, task: F)
    where
        F: Fn(usize) + Send + Sync,
    {
        (0..count).into_par_iter().for_each(task);
    }

    #[inline]
    fn for_each_view<T, F>(&mut self, views: Vec<&mut [T]>, task: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Send + Sync,
    {
        views
            .into_par_iter()
            .enumerate()
            .for_each(|(index, view)| task(index, view));
    }
}
