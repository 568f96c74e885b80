//! Separate-chaining hash table with string keys
//!
//! The hash is the sum of the key's UTF-16 code units modulo the bucket
//! count. It is intentionally weak: anagrams such as `"age"` and `"gae"`
//! always collide, which makes chaining visible. The bucket count is fixed
//! at construction and the table never rehashes, so the load factor can grow
//! without bound and bucket scans degrade toward O(n).

/// Bucket count used by [`HashTable::default`]
pub const DEFAULT_CAPACITY: usize = 10;

/// One chained bucket
pub type Bucket<V> = Vec<(String, V)>;

/// Fixed-capacity chaining hash table
#[derive(Debug, Clone, PartialEq)]
pub struct HashTable<V> {
    buckets: Vec<Bucket<V>>,
    len: usize,
}

impl<V> HashTable<V> {
    /// Create a table with `capacity` buckets (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, Vec::new);
        Self { buckets, len: 0 }
    }

    /// Bucket index for `key`
    pub fn hash(&self, key: &str) -> usize {
        let sum = key.encode_utf16().fold(0u64, |acc, unit| acc + u64::from(unit));
        (sum % self.buckets.len() as u64) as usize
    }

    /// Insert or update `key`.
    ///
    /// Returns `true` when a new entry was appended to its bucket and `false`
    /// when an existing entry was updated in place.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> bool {
        let key = key.into();
        let index = self.hash(&key);
        let bucket = &mut self.buckets[index];

        if let Some(entry) = bucket.iter_mut().find(|(existing, _)| *existing == key) {
            entry.1 = value;
            return false;
        }

        bucket.push((key, value));
        self.len += 1;
        true
    }

    /// Value stored under `key`
    pub fn get(&self, key: &str) -> Option<&V> {
        self.buckets[self.hash(key)]
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Remove `key`, returning whether it was present
    pub fn delete(&mut self, key: &str) -> bool {
        let index = self.hash(key);
        let bucket = &mut self.buckets[index];
        match bucket.iter().position(|(existing, _)| existing == key) {
            Some(position) => {
                bucket.remove(position);
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// Whether `key` is present
    pub fn has(&self, key: &str) -> bool {
        self.locate(key).is_some()
    }

    /// `(bucket, position within bucket)` of `key`
    pub fn locate(&self, key: &str) -> Option<(usize, usize)> {
        let index = self.hash(key);
        self.buckets[index]
            .iter()
            .position(|(existing, _)| existing == key)
            .map(|position| (index, position))
    }

    /// Number of buckets
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table holds no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Entries per bucket. Unbounded since the table never grows.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Read-only view of every bucket, for rendering
    pub fn buckets(&self) -> &[Bucket<V>] {
        &self.buckets
    }

    /// Keys in bucket order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|(key, _)| key.as_str()))
    }

    /// Drop every entry, keeping the bucket count
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}
