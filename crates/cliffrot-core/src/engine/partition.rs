use std::ops::Range;

/// Number of workers the host can run at once.
///
/// With the `parallel` feature this is the size of the current rayon pool,
/// which callers may pin with `rayon::ThreadPoolBuilder::build_global`.
pub fn available_parallelism() -> usize {
    #[cfg(feature = "parallel")]
    let workers = rayon::current_num_threads();

    #[cfg(not(feature = "parallel"))]
    let workers = std::thread::available_parallelism().map_or(1, |n| n.get());

    workers.max(1)
}

/// Workers to use for `rows` rows: the available parallelism (or `limit`, if
/// given), but never more than there are rows.
pub fn worker_count(rows: usize, limit: Option<usize>) -> usize {
    limit.unwrap_or_else(available_parallelism).min(rows)
}

/// Contiguous row ranges, one per worker.
///
/// Every worker gets `rows / workers` rows; the last one also takes the remainder.
#[derive(Debug, Clone)]
pub struct Fragments {
    rows: usize,
    workers: usize,
    fragment_len: usize,
    next: usize,
}

/// # Panics
///
/// Panics unless `1 <= workers <= rows`.
pub fn fragments(rows: usize, workers: usize) -> Fragments {
    assert!(
        workers >= 1 && workers <= rows,
        "cannot split {} rows among {} workers",
        rows,
        workers
    );
    Fragments {
        rows,
        workers,
        fragment_len: rows / workers,
        next: 0,
    }
}

impl Fragments {
    pub fn fragment_len(&self) -> usize {
        self.fragment_len
    }
}

impl Iterator for Fragments {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == self.workers {
            return None;
        }
        let i = self.next;
        self.next += 1;

        let start = i * self.fragment_len;
        let end = if i == self.workers - 1 {
            self.rows
        } else {
            start + self.fragment_len
        };
        Some(start..end)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.workers - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Fragments {}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exact_cover(rows: usize, workers: usize) {
        let ranges: Vec<_> = fragments(rows, workers).collect();
        assert_eq!(ranges.len(), workers);
        assert_eq!(ranges[0].start, 0);
        assert_eq!(ranges[workers - 1].end, rows);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert!(ranges.iter().all(|r| !r.is_empty()));
        assert_eq!(ranges.iter().map(|r| r.len()).sum::<usize>(), rows);
    }

    #[test]
    fn even_split_gives_equal_fragments() {
        let ranges: Vec<_> = fragments(12, 4).collect();
        assert_eq!(ranges, vec![0..3, 3..6, 6..9, 9..12]);
    }

    #[test]
    fn last_worker_absorbs_remainder() {
        let ranges: Vec<_> = fragments(10, 3).collect();
        assert_eq!(ranges, vec![0..3, 3..6, 6..10]);
    }

    #[test]
    fn one_worker_takes_every_row() {
        let ranges: Vec<_> = fragments(7, 1).collect();
        assert_eq!(ranges, vec![0..7]);
    }

    #[test]
    fn one_row_per_worker_when_workers_equal_rows() {
        let ranges: Vec<_> = fragments(3, 3).collect();
        assert_eq!(ranges, vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn fragments_cover_rows_exactly_once_for_all_small_splits() {
        for rows in 1..=40 {
            for workers in 1..=rows {
                assert_exact_cover(rows, workers);
            }
        }
    }

    #[test]
    fn fragments_reports_exact_length() {
        let mut it = fragments(9, 4);
        assert_eq!(it.len(), 4);
        it.next();
        assert_eq!(it.len(), 3);
        assert_eq!(it.fragment_len(), 2);
    }

    #[test]
    #[should_panic(expected = "cannot split")]
    fn fragments_panics_with_more_workers_than_rows() {
        fragments(2, 3);
    }

    #[test]
    #[should_panic(expected = "cannot split")]
    fn fragments_panics_with_zero_workers() {
        fragments(5, 0);
    }

    #[test]
    fn worker_count_never_exceeds_rows() {
        assert_eq!(worker_count(3, Some(8)), 3);
        assert_eq!(worker_count(100, Some(8)), 8);
        assert_eq!(worker_count(0, Some(8)), 0);
        assert_eq!(worker_count(1, None), 1);
    }

    #[test]
    fn available_parallelism_is_at_least_one() {
        assert!(available_parallelism() >= 1);
    }
}
