//! Lazy, indexable, resumable enumeration of integer partitions (C2).
//!
//! Ported from `original_source/riemann/superabundant.py::partitions_of_n`:
//! partitions of a level `L` are produced in the classical reverse-
//! lexicographic order (largest part first; the rightmost part greater than
//! one is decremented and the freed total is redistributed greedily among
//! new trailing parts).

pub mod errors;

pub use errors::PartitionError;

/// Number of partitions of `level`, via the standard "partitions with parts
/// bounded by k" dynamic program.
pub fn count(level: u64) -> Result<u64, PartitionError> {
    if level == 0 {
        return Err(PartitionError::InvalidLevel(level));
    }
    let n = level as usize;
    // q[i][k] = number of partitions of i using parts <= k.
    let mut q = vec![vec![0u64; n + 1]; n + 1];
    for k in 0..=n {
        q[0][k] = 1;
    }
    for i in 1..=n {
        for k in 1..=n {
            q[i][k] = q[i][k - 1] + if i >= k { q[i - k][k] } else { 0 };
        }
    }
    Ok(q[n][n])
}

/// Advance `partition` (weakly decreasing, summing to the level) to its
/// reverse-lexicographic successor. Returns `false` and leaves `partition`
/// unchanged if `partition` is the last one (all ones).
fn step(partition: &mut Vec<u64>) -> bool {
    if partition.iter().all(|&x| x == 1) {
        return false;
    }
    let rightmost_gt_one = partition.iter().rposition(|&x| x > 1).expect("checked above");
    let value = partition[rightmost_gt_one];
    let trailing_ones = (partition.len() - 1 - rightmost_gt_one) as u64;
    let mut remainder = trailing_ones + 1;
    let new_value = value - 1;

    partition.truncate(rightmost_gt_one);
    partition.push(new_value);
    while remainder > new_value {
        partition.push(new_value);
        remainder -= new_value;
    }
    if remainder > 0 {
        partition.push(remainder);
    }
    true
}

/// The partition of `level` at 0-based position `index`, found by stepping
/// from `[level]`. O(index) time; callers doing forward-sequential access
/// should prefer `enumerate` or `CachedPartitions` to amortize this.
fn nth_partition(level: u64, index: u64) -> Vec<u64> {
    let mut partition = vec![level];
    for _ in 0..index {
        step(&mut partition);
    }
    partition
}

/// Partitions of `level` at 0-based positions `[start, stop]`, both
/// inclusive, in enumeration order. `stop` is clamped down to
/// `count(level) - 1`; `start` beyond that range is a hard error.
pub fn enumerate(level: u64, start: u64, stop: u64) -> Result<Vec<(u64, Vec<u64>)>, PartitionError> {
    let total = count(level)?;
    if start >= total {
        return Err(PartitionError::IndexOutOfRange { level, index: start, count: total });
    }
    let stop = stop.min(total - 1);

    let mut partition = nth_partition(level, start);
    let mut results = Vec::with_capacity((stop - start + 1) as usize);
    let mut index = start;
    loop {
        results.push((index, partition.clone()));
        if index >= stop {
            break;
        }
        step(&mut partition);
        index += 1;
    }
    Ok(results)
}

/// An indexable view over the partitions of one level that keeps at most
/// `max_cache_size` contiguous partitions resident. Forward-sequential reads
/// are the optimized path: a read one past the resident window extends it
/// in place; any other read refills the window starting at that index.
pub struct CachedPartitions {
    level: u64,
    count: u64,
    max_cache_size: usize,
    window_start: u64,
    window: Vec<Vec<u64>>,
}

impl CachedPartitions {
    pub fn new(level: u64, max_cache_size: usize) -> Result<Self, PartitionError> {
        let count = count(level)?;
        let mut instance = Self { level, count, max_cache_size: max_cache_size.max(1), window_start: 0, window: Vec::new() };
        instance.refill_from(0)?;
        Ok(instance)
    }

    /// Total number of partitions of this level.
    pub fn len(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn level(&self) -> u64 {
        self.level
    }

    fn refill_from(&mut self, start: u64) -> Result<(), PartitionError> {
        let stop = start.saturating_add(self.max_cache_size as u64 - 1);
        let produced = enumerate(self.level, start, stop)?;
        self.window_start = start;
        self.window = produced.into_iter().map(|(_, p)| p).collect();
        Ok(())
    }

    /// The partition at `index`, refilling the resident window if needed.
    pub fn get(&mut self, index: u64) -> Result<&[u64], PartitionError> {
        if index >= self.count {
            return Err(PartitionError::IndexOutOfRange { level: self.level, index, count: self.count });
        }
        let window_end = self.window_start + self.window.len() as u64;
        if index < self.window_start || index >= window_end {
            self.refill_from(index)?;
        }
        let offset = (index - self.window_start) as usize;
        Ok(&self.window[offset])
    }
}
