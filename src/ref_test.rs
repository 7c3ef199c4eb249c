// Reference multiset over keys in `0..capacity`, one counter per key.
struct RefNodes {
    counts: Vec<usize>,
}

impl RefNodes {
    fn new(capacity: usize) -> RefNodes {
        RefNodes {
            counts: vec![0; capacity],
        }
    }

    fn len(&self) -> usize {
        self.counts.iter().sum()
    }

    fn find(&self, key: i64) -> Option<i64> {
        if self.counts[key as usize] > 0 {
            Some(key)
        } else {
            None
        }
    }

    fn insert(&mut self, key: i64) {
        self.counts[key as usize] += 1;
    }

    fn insert_unique(&mut self, key: i64) -> bool {
        if self.counts[key as usize] > 0 {
            false
        } else {
            self.counts[key as usize] = 1;
            true
        }
    }

    fn erase(&mut self, key: i64) -> Option<i64> {
        let count = &mut self.counts[key as usize];
        if *count == 0 {
            None
        } else {
            *count -= 1;
            Some(key)
        }
    }

    fn min(&self) -> Option<i64> {
        self.iter().next()
    }

    fn max(&self) -> Option<i64> {
        self.iter().last()
    }

    fn predecessor(&self, key: i64) -> Option<i64> {
        self.iter().filter(|k| *k < key).last()
    }

    fn successor(&self, key: i64) -> Option<i64> {
        self.iter().find(|k| *k > key)
    }

    fn iter(&self) -> std::vec::IntoIter<i64> {
        self.counts
            .iter()
            .enumerate()
            .flat_map(|(key, count)| std::iter::repeat(key as i64).take(*count))
            .collect::<Vec<i64>>()
            .into_iter()
    }

    fn range(&self, low: Bound<i64>, high: Bound<i64>) -> std::vec::IntoIter<i64> {
        self.iter()
            .filter(|key| match low {
                Bound::Included(low) => *key >= low,
                Bound::Excluded(low) => *key > low,
                Bound::Unbounded => true,
            })
            .filter(|key| match high {
                Bound::Included(high) => *key <= high,
                Bound::Excluded(high) => *key < high,
                Bound::Unbounded => true,
            })
            .collect::<Vec<i64>>()
            .into_iter()
    }

    fn reverse(&self, low: Bound<i64>, high: Bound<i64>) -> std::vec::IntoIter<i64> {
        let mut keys: Vec<i64> = self.range(low, high).collect();
        keys.reverse();
        keys.into_iter()
    }
}

fn random_low_high(rng: &mut SmallRng, size: usize) -> (Bound<i64>, Bound<i64>) {
    let size = size as u64;
    let low = (rng.gen::<u64>() % size) as i64;
    let high = (rng.gen::<u64>() % size) as i64;
    let low = match rng.gen::<u8>() % 3 {
        0 => Bound::Included(low),
        1 => Bound::Excluded(low),
        _ => Bound::Unbounded,
    };
    let high = match rng.gen::<u8>() % 3 {
        0 => Bound::Included(high),
        1 => Bound::Excluded(high),
        _ => Bound::Unbounded,
    };
    (low, high)
}
