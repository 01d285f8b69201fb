//! TimSort with the run, merge and gallop rules of V8's `Array.prototype.sort`.
//!
//! A consistent comparator gives the same result as `slice::sort_by`. An
//! inconsistent one gives the exact order a Chromium-based browser produces for
//! the same input, and never panics.

use std::cmp::Ordering;

/// Arrays shorter than this are sorted by a single binary insertion pass
const MIN_MERGE: usize = 64;
const MIN_GALLOP: usize = 7;

#[derive(Debug, Clone, Copy)]
struct Run {
    base: usize,
    len: usize,
}

/// How a merge ends once one side is (almost) used up
enum Tail {
    /// Copy what is left of the buffered side
    Finished,
    /// The buffered side has one element left that goes after the other side
    LastOfBuffer,
}

pub(crate) fn sort_by<T, F>(items: &mut [T], compare: F)
where
    T: Copy,
    F: Fn(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }

    let mut state = SortState {
        items,
        compare,
        min_gallop: MIN_GALLOP,
        runs: Vec::new(),
    };
    let min_run = min_run_length(len);

    let mut low = 0;
    let mut remaining = len;
    while remaining != 0 {
        let mut run = state.count_and_make_run(low, low + remaining);
        if run < min_run {
            let forced = min_run.min(remaining);
            state.binary_insertion_sort(low, low + run, low + forced);
            run = forced;
        }
        state.runs.push(Run { base: low, len: run });
        state.merge_collapse();
        low += run;
        remaining -= run;
    }
    state.merge_force_collapse();
}

fn min_run_length(mut n: usize) -> usize {
    let mut low_bits = 0;
    while n >= MIN_MERGE {
        low_bits |= n & 1;
        n >>= 1;
    }
    n + low_bits
}

fn less<T, F: Fn(&T, &T) -> Ordering>(compare: &F, a: &T, b: &T) -> bool {
    compare(a, b) == Ordering::Less
}

/// Position in `run` of the first element not less than `key`, searched
/// outwards from `hint`
fn gallop_left<T, F>(compare: &F, key: &T, run: &[T], hint: usize) -> usize
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut last_ofs = 0;
    let mut ofs = 1;

    let (mut low, mut high) = if less(compare, &run[hint], key) {
        let max_ofs = run.len() - hint;
        while ofs < max_ofs {
            if !less(compare, &run[hint + ofs], key) {
                break;
            }
            last_ofs = ofs;
            ofs = (ofs << 1) + 1;
        }
        ofs = ofs.min(max_ofs);
        (hint + last_ofs + 1, hint + ofs)
    } else {
        let max_ofs = hint + 1;
        while ofs < max_ofs {
            if less(compare, &run[hint - ofs], key) {
                break;
            }
            last_ofs = ofs;
            ofs = (ofs << 1) + 1;
        }
        ofs = ofs.min(max_ofs);
        (hint + 1 - ofs, hint - last_ofs)
    };

    while low < high {
        let mid = low + ((high - low) >> 1);
        if less(compare, &run[mid], key) {
            low = mid + 1;
        } else {
            high = mid;
        }
    }
    high
}

/// Position in `run` just after the last element not greater than `key`,
/// searched outwards from `hint`
fn gallop_right<T, F>(compare: &F, key: &T, run: &[T], hint: usize) -> usize
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut last_ofs = 0;
    let mut ofs = 1;

    let (mut low, mut high) = if less(compare, key, &run[hint]) {
        let max_ofs = hint + 1;
        while ofs < max_ofs {
            if !less(compare, key, &run[hint - ofs]) {
                break;
            }
            last_ofs = ofs;
            ofs = (ofs << 1) + 1;
        }
        ofs = ofs.min(max_ofs);
        (hint + 1 - ofs, hint - last_ofs)
    } else {
        let max_ofs = run.len() - hint;
        while ofs < max_ofs {
            if less(compare, key, &run[hint + ofs]) {
                break;
            }
            last_ofs = ofs;
            ofs = (ofs << 1) + 1;
        }
        ofs = ofs.min(max_ofs);
        (hint + last_ofs + 1, hint + ofs)
    };

    while low < high {
        let mid = low + ((high - low) >> 1);
        if less(compare, key, &run[mid]) {
            high = mid;
        } else {
            low = mid + 1;
        }
    }
    high
}

struct SortState<'a, T, F> {
    items: &'a mut [T],
    compare: F,
    min_gallop: usize,
    runs: Vec<Run>,
}

impl<T, F> SortState<'_, T, F>
where
    T: Copy,
    F: Fn(&T, &T) -> Ordering,
{
    fn less(&self, a: &T, b: &T) -> bool {
        less(&self.compare, a, b)
    }

    /// Length of the run starting at `low`. A strictly descending run is
    /// reversed in place.
    fn count_and_make_run(&mut self, low: usize, high: usize) -> usize {
        if low + 1 == high {
            return 1;
        }

        let descending = self.less(&self.items[low + 1], &self.items[low]);
        let mut run = 2;
        for idx in low + 2..high {
            let lower = self.less(&self.items[idx], &self.items[idx - 1]);
            if lower != descending {
                break;
            }
            run += 1;
        }

        if descending {
            self.items[low..low + run].reverse();
        }
        run
    }

    /// Sorts `items[low..high]`, given that `items[low..start]` is sorted
    fn binary_insertion_sort(&mut self, low: usize, start: usize, high: usize) {
        let start = if low == start { start + 1 } else { start };
        for idx in start..high {
            let pivot = self.items[idx];
            let (mut left, mut right) = (low, idx);
            while left < right {
                let mid = left + ((right - left) >> 1);
                if self.less(&pivot, &self.items[mid]) {
                    right = mid;
                } else {
                    left = mid + 1;
                }
            }
            self.items[left..=idx].rotate_right(1);
        }
    }

    fn run_len(&self, n: usize) -> usize {
        self.runs[n].len
    }

    fn run_invariant_holds(&self, n: usize) -> bool {
        n < 2 || self.run_len(n - 2) > self.run_len(n - 1) + self.run_len(n)
    }

    fn merge_collapse(&mut self) {
        while self.runs.len() > 1 {
            let mut n = self.runs.len() - 2;
            if !self.run_invariant_holds(n + 1) || !self.run_invariant_holds(n) {
                if self.run_len(n - 1) < self.run_len(n + 1) {
                    n -= 1;
                }
                self.merge_at(n);
            } else if self.run_len(n) <= self.run_len(n + 1) {
                self.merge_at(n);
            } else {
                break;
            }
        }
    }

    fn merge_force_collapse(&mut self) {
        while self.runs.len() > 1 {
            let mut n = self.runs.len() - 2;
            if n > 0 && self.run_len(n - 1) < self.run_len(n + 1) {
                n -= 1;
            }
            self.merge_at(n);
        }
    }

    /// Merges runs `i` and `i + 1`
    fn merge_at(&mut self, i: usize) {
        let Run {
            base: mut base_a,
            len: mut len_a,
        } = self.runs[i];
        let Run {
            base: base_b,
            len: mut len_b,
        } = self.runs[i + 1];
        self.runs[i].len = len_a + len_b;
        self.runs.remove(i + 1);

        // Elements of A already in place
        let key = self.items[base_b];
        let skip = gallop_right(&self.compare, &key, &self.items[base_a..base_a + len_a], 0);
        base_a += skip;
        len_a -= skip;
        if len_a == 0 {
            return;
        }

        // Elements of B already in place
        let key = self.items[base_a + len_a - 1];
        len_b = gallop_left(
            &self.compare,
            &key,
            &self.items[base_b..base_b + len_b],
            len_b - 1,
        );
        if len_b == 0 {
            return;
        }

        if len_a <= len_b {
            self.merge_low(base_a, len_a, base_b, len_b);
        } else {
            self.merge_high(base_a, len_a, base_b, len_b);
        }
    }

    /// Merges left to right, buffering run A
    fn merge_low(&mut self, base_a: usize, mut len_a: usize, base_b: usize, mut len_b: usize) {
        let buffer: Vec<T> = self.items[base_a..base_a + len_a].to_vec();
        let mut dest = base_a;
        let mut cursor_buf = 0;
        let mut cursor_b = base_b;

        self.items[dest] = self.items[cursor_b];
        dest += 1;
        cursor_b += 1;

        let tail = 'merge: {
            len_b -= 1;
            if len_b == 0 {
                break 'merge Tail::Finished;
            }
            if len_a == 1 {
                break 'merge Tail::LastOfBuffer;
            }

            let mut min_gallop = self.min_gallop;
            loop {
                let mut wins_a = 0;
                let mut wins_b = 0;

                // One element at a time until one side keeps winning
                loop {
                    if self.less(&self.items[cursor_b], &buffer[cursor_buf]) {
                        self.items[dest] = self.items[cursor_b];
                        dest += 1;
                        cursor_b += 1;
                        wins_b += 1;
                        wins_a = 0;
                        len_b -= 1;
                        if len_b == 0 {
                            break 'merge Tail::Finished;
                        }
                        if wins_b >= min_gallop {
                            break;
                        }
                    } else {
                        self.items[dest] = buffer[cursor_buf];
                        dest += 1;
                        cursor_buf += 1;
                        wins_a += 1;
                        wins_b = 0;
                        len_a -= 1;
                        if len_a == 1 {
                            break 'merge Tail::LastOfBuffer;
                        }
                        if wins_a >= min_gallop {
                            break;
                        }
                    }
                }

                min_gallop += 1;
                let mut first = true;
                while first || wins_a >= MIN_GALLOP || wins_b >= MIN_GALLOP {
                    first = false;
                    min_gallop = min_gallop.saturating_sub(1).max(1);
                    self.min_gallop = min_gallop;

                    let key = self.items[cursor_b];
                    wins_a = gallop_right(
                        &self.compare,
                        &key,
                        &buffer[cursor_buf..cursor_buf + len_a],
                        0,
                    );
                    if wins_a > 0 {
                        self.items[dest..dest + wins_a]
                            .copy_from_slice(&buffer[cursor_buf..cursor_buf + wins_a]);
                        dest += wins_a;
                        cursor_buf += wins_a;
                        len_a -= wins_a;
                        if len_a == 1 {
                            break 'merge Tail::LastOfBuffer;
                        }
                        // Only reachable with an inconsistent comparator
                        if len_a == 0 {
                            break 'merge Tail::Finished;
                        }
                    }
                    self.items[dest] = self.items[cursor_b];
                    dest += 1;
                    cursor_b += 1;
                    len_b -= 1;
                    if len_b == 0 {
                        break 'merge Tail::Finished;
                    }

                    let key = buffer[cursor_buf];
                    wins_b = gallop_left(
                        &self.compare,
                        &key,
                        &self.items[cursor_b..cursor_b + len_b],
                        0,
                    );
                    if wins_b > 0 {
                        self.items.copy_within(cursor_b..cursor_b + wins_b, dest);
                        dest += wins_b;
                        cursor_b += wins_b;
                        len_b -= wins_b;
                        if len_b == 0 {
                            break 'merge Tail::Finished;
                        }
                    }
                    self.items[dest] = buffer[cursor_buf];
                    dest += 1;
                    cursor_buf += 1;
                    len_a -= 1;
                    if len_a == 1 {
                        break 'merge Tail::LastOfBuffer;
                    }
                }
                min_gallop += 1;
                self.min_gallop = min_gallop;
            }
        };

        match tail {
            Tail::Finished => {
                self.items[dest..dest + len_a]
                    .copy_from_slice(&buffer[cursor_buf..cursor_buf + len_a]);
            }
            Tail::LastOfBuffer => {
                self.items.copy_within(cursor_b..cursor_b + len_b, dest);
                self.items[dest + len_b] = buffer[cursor_buf];
            }
        }
    }

    /// Merges right to left, buffering run B
    ///
    /// Cursors are signed: they step one past the start of their run on the
    /// last move.
    fn merge_high(&mut self, base_a: usize, mut len_a: usize, base_b: usize, mut len_b: usize) {
        let buffer: Vec<T> = self.items[base_b..base_b + len_b].to_vec();
        let mut dest = (base_b + len_b) as isize - 1;
        let mut cursor_buf = len_b as isize - 1;
        let mut cursor_a = (base_a + len_a) as isize - 1;

        self.items[dest as usize] = self.items[cursor_a as usize];
        dest -= 1;
        cursor_a -= 1;

        let tail = 'merge: {
            len_a -= 1;
            if len_a == 0 {
                break 'merge Tail::Finished;
            }
            if len_b == 1 {
                break 'merge Tail::LastOfBuffer;
            }

            let mut min_gallop = self.min_gallop;
            loop {
                let mut wins_a = 0;
                let mut wins_b = 0;

                loop {
                    if self.less(&buffer[cursor_buf as usize], &self.items[cursor_a as usize]) {
                        self.items[dest as usize] = self.items[cursor_a as usize];
                        dest -= 1;
                        cursor_a -= 1;
                        wins_a += 1;
                        wins_b = 0;
                        len_a -= 1;
                        if len_a == 0 {
                            break 'merge Tail::Finished;
                        }
                        if wins_a >= min_gallop {
                            break;
                        }
                    } else {
                        self.items[dest as usize] = buffer[cursor_buf as usize];
                        dest -= 1;
                        cursor_buf -= 1;
                        wins_b += 1;
                        wins_a = 0;
                        len_b -= 1;
                        if len_b == 1 {
                            break 'merge Tail::LastOfBuffer;
                        }
                        if wins_b >= min_gallop {
                            break;
                        }
                    }
                }

                min_gallop += 1;
                let mut first = true;
                while first || wins_a >= MIN_GALLOP || wins_b >= MIN_GALLOP {
                    first = false;
                    min_gallop = min_gallop.saturating_sub(1).max(1);
                    self.min_gallop = min_gallop;

                    let key = buffer[cursor_buf as usize];
                    let run_a = &self.items[base_a..base_a + len_a];
                    wins_a = len_a - gallop_right(&self.compare, &key, run_a, len_a - 1);
                    if wins_a > 0 {
                        dest -= wins_a as isize;
                        cursor_a -= wins_a as isize;
                        let from = (cursor_a + 1) as usize;
                        self.items.copy_within(from..from + wins_a, (dest + 1) as usize);
                        len_a -= wins_a;
                        if len_a == 0 {
                            break 'merge Tail::Finished;
                        }
                    }
                    self.items[dest as usize] = buffer[cursor_buf as usize];
                    dest -= 1;
                    cursor_buf -= 1;
                    len_b -= 1;
                    if len_b == 1 {
                        break 'merge Tail::LastOfBuffer;
                    }

                    let key = self.items[cursor_a as usize];
                    wins_b = len_b - gallop_left(&self.compare, &key, &buffer[..len_b], len_b - 1);
                    if wins_b > 0 {
                        dest -= wins_b as isize;
                        cursor_buf -= wins_b as isize;
                        let from = (cursor_buf + 1) as usize;
                        let to = (dest + 1) as usize;
                        self.items[to..to + wins_b].copy_from_slice(&buffer[from..from + wins_b]);
                        len_b -= wins_b;
                        if len_b == 1 {
                            break 'merge Tail::LastOfBuffer;
                        }
                        // Only reachable with an inconsistent comparator
                        if len_b == 0 {
                            break 'merge Tail::Finished;
                        }
                    }
                    self.items[dest as usize] = self.items[cursor_a as usize];
                    dest -= 1;
                    cursor_a -= 1;
                    len_a -= 1;
                    if len_a == 0 {
                        break 'merge Tail::Finished;
                    }
                }
                min_gallop += 1;
                self.min_gallop = min_gallop;
            }
        };

        match tail {
            Tail::Finished => {
                if len_b > 0 {
                    let to = (dest + 1) as usize - len_b;
                    self.items[to..to + len_b].copy_from_slice(&buffer[..len_b]);
                }
            }
            Tail::LastOfBuffer => {
                dest -= len_a as isize;
                cursor_a -= len_a as isize;
                let from = (cursor_a + 1) as usize;
                self.items.copy_within(from..from + len_a, (dest + 1) as usize);
                self.items[dest as usize] = buffer[cursor_buf as usize];
            }
        }
    }
}
