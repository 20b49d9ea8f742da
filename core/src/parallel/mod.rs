//! Parallel

use std::thread;

/// Applies `f` to consecutive chunks of `items` on `n_threads` scoped worker
/// threads and returns the results in input order, exactly as a sequential
/// `items.chunks(chunk_size).flat_map(f)` would.
///
/// * `items`      - The input values.
/// * `n_threads`  - Number of worker threads (at least 1 is used).
/// * `chunk_size` - Number of items handed to a worker at a time.
/// * `f`          - Function mapping a chunk to one output per item.
pub fn par_map_ordered<T, R, F>(items: &[T], n_threads: usize, chunk_size: usize, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&[T]) -> Vec<R> + Sync,
{
    let chunk_size = chunk_size.max(1);
    let n_threads = n_threads.max(1);
    if n_threads == 1 || items.len() <= chunk_size {
        return items.chunks(chunk_size).flat_map(&f).collect();
    }

    let n_chunks = items.len().div_ceil(chunk_size);
    let mut results: Vec<Option<Vec<R>>> = (0..n_chunks).map(|_| None).collect();

    thread::scope(|scope| {
        let (tx_worker, rx_worker) = crossbeam_channel::bounded::<(usize, &[T])>(n_threads);
        let (tx_result, rx_result) = crossbeam_channel::unbounded::<(usize, Vec<R>)>();

        // Spawn worker threads.
        for _ in 0..n_threads {
            let rx_worker = rx_worker.clone();
            let tx_result = tx_result.clone();
            let f = &f;
            scope.spawn(move || {
                for (index, chunk) in rx_worker.iter() {
                    // The receiver outlives the workers.
                    let _ = tx_result.send((index, f(chunk)));
                }
            });
        }
        drop(rx_worker); // Drop extra since we've cloned one for each worker.
        drop(tx_result);

        // Send work. Workers only stop once the sender is dropped.
        for (index, chunk) in items.chunks(chunk_size).enumerate() {
            if tx_worker.send((index, chunk)).is_err() {
                break;
            }
        }
        drop(tx_worker);

        for (index, out) in rx_result.iter() {
            results[index] = Some(out);
        }
    });

    trace!("Processed {} chunks on {} threads.", n_chunks, n_threads);
    results.into_iter().flatten().flatten().collect()
}
