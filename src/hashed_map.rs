//! HashedMap: fixed-size table of bucket chains keyed by strings.

use crate::chain::{ChainArena, Link, Links, NodesMut};
use crate::error::TableSizeError;
use crate::string_hash::{bucket_index, TableSize};
use core::borrow::Borrow;
use core::fmt;

/// A hash map with separate chaining and a table size fixed at
/// construction.
///
/// Keys are hashed over their characters (`K: AsRef<str>`); colliding
/// keys share a bucket and are kept in a singly linked chain, newest
/// first. The table never grows: inserting far more keys than there are
/// buckets lengthens the chains and every operation degrades toward a
/// linear scan.
///
/// ```
/// use chained_hashmap::HashedMap;
///
/// let mut phone_book = HashedMap::with_table_size(10).unwrap();
/// phone_book.add("Alice", 1234);
/// phone_book.add("Alice", 9999);
/// assert_eq!(phone_book.len(), 1);
/// assert_eq!(phone_book.get_value("Alice"), Some(9999));
/// assert!(!phone_book.contains("Zoe"));
/// ```
#[derive(Clone)]
pub struct HashedMap<K, V> {
    buckets: Box<[Link]>,
    table_size: TableSize,
    entries: ChainArena<K, V>,
}

impl<K, V> HashedMap<K, V> {
    /// Creates an empty map with `TableSize::DEFAULT` (101) buckets.
    pub fn new() -> Self {
        Self::from_table_size(TableSize::DEFAULT)
    }

    pub fn from_table_size(table_size: TableSize) -> Self {
        Self {
            buckets: vec![None; table_size.get()].into_boxed_slice(),
            table_size,
            entries: ChainArena::new(),
        }
    }

    /// Creates an empty map with `buckets` buckets, rejecting zero.
    pub fn with_table_size(buckets: usize) -> Result<Self, TableSizeError> {
        TableSize::try_from(buckets).map(Self::from_table_size)
    }

    /// Number of entries across all chains.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() == 0
    }

    pub fn table_size(&self) -> usize {
        self.table_size.get()
    }

    /// Entries per bucket. Unbounded, since the table never resizes.
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.table_size() as f64
    }

    /// Drops every entry and empties every bucket. The table size is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.buckets.fill(None);
    }

    /// Chain stored in `bucket`, head first. `None` if out of range.
    pub fn chain(&self, bucket: usize) -> Option<Chain<'_, K, V>> {
        self.buckets.get(bucket).map(|&head| Chain {
            links: self.entries.links(head),
        })
    }

    /// Entries in bucket order; within a bucket, most recently inserted
    /// first.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            heads: self.buckets.iter(),
            chain: self.entries.links(None),
            entries: &self.entries,
            remaining: self.entries.len(),
        }
    }

    /// Mutable access to every entry. Order is unspecified.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            nodes: self.entries.nodes_mut(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.iter_mut().map(|(_, v)| v)
    }

    /// Renders one line per bucket: `bucket 2: hat -> rat -> cat -> nil`.
    pub fn layout(&self) -> Layout<'_, K, V> {
        Layout { map: self }
    }
}

impl<K, V> HashedMap<K, V>
where
    K: AsRef<str> + Eq,
{
    /// Bucket that `q` hashes to for this table.
    pub fn bucket_of<Q>(&self, q: &Q) -> usize
    where
        Q: ?Sized + AsRef<str>,
    {
        bucket_index(q.as_ref(), self.table_size)
    }

    /// Inserts or updates. Always succeeds and returns `true`.
    ///
    /// An existing key keeps its node and its place in the chain; only the
    /// value is overwritten. A new key is linked at the head of its chain.
    pub fn add(&mut self, key: K, value: V) -> bool {
        let _ = self.insert(key, value);
        true
    }

    /// Like `add`, returning the overwritten value if the key was present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let b = self.bucket_of(&key);
        if let Some(e) = self.entries.find_mut(self.buckets[b], &key) {
            return Some(core::mem::replace(&mut e.value, value));
        }
        self.entries.push_front(&mut self.buckets[b], key, value);
        None
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + AsRef<str> + Eq,
    {
        let head = self.buckets[self.bucket_of(q)];
        let k = self.entries.find(head, q)?;
        self.entries.get(k).map(|e| &e.value)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + AsRef<str> + Eq,
    {
        let head = self.buckets[self.bucket_of(q)];
        self.entries.find_mut(head, q).map(|e| &mut e.value)
    }

    /// Copy of the value stored under `q`; `None` when absent.
    pub fn get_value<Q>(&self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + AsRef<str> + Eq,
        V: Clone,
    {
        self.get(q).cloned()
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + AsRef<str> + Eq,
    {
        let head = self.buckets[self.bucket_of(q)];
        self.entries.find(head, q).is_some()
    }

    /// Returns whether an entry was removed. A miss leaves the map as is.
    pub fn remove<Q>(&mut self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + AsRef<str> + Eq,
    {
        self.remove_entry(q).is_some()
    }

    /// Unlinks the entry for `q` and hands back its key and value.
    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + AsRef<str> + Eq,
    {
        let b = self.bucket_of(q);
        self.entries.unlink(&mut self.buckets[b], q)
    }

    /// Structural self-check used by tests: count consistency, bucket
    /// placement, per-bucket key uniqueness, no node linked twice and no
    /// orphaned node.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) -> Result<(), String> {
        if self.buckets.len() != self.table_size.get() {
            return Err(format!(
                "{} buckets allocated for table size {}",
                self.buckets.len(),
                self.table_size.get()
            ));
        }
        let mut seen = std::collections::HashSet::new();
        let mut reachable = 0usize;
        for (b, &head) in self.buckets.iter().enumerate() {
            // Bounded so a cycle shows up as a repeated node instead of hanging.
            let chain: Vec<_> = self.entries.links(head).take(self.len() + 1).collect();
            for (i, &(node, e)) in chain.iter().enumerate() {
                if !seen.insert(node) {
                    return Err(format!("node linked twice, seen again in bucket {b}"));
                }
                let home = bucket_index(e.key.as_ref(), self.table_size);
                if home != b {
                    return Err(format!(
                        "key {:?} sits in bucket {b} but hashes to {home}",
                        e.key.as_ref()
                    ));
                }
                if chain[..i].iter().any(|(_, other)| other.key == e.key) {
                    return Err(format!("key {:?} duplicated in bucket {b}", e.key.as_ref()));
                }
            }
            reachable += chain.len();
        }
        if reachable != self.len() {
            return Err(format!(
                "{reachable} nodes reachable from buckets, {} stored",
                self.len()
            ));
        }
        Ok(())
    }
}

impl<K, V> Default for HashedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for HashedMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Extend<(K, V)> for HashedMap<K, V>
where
    K: AsRef<str> + Eq,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            let _ = self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HashedMap<K, V>
where
    K: AsRef<str> + Eq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::new();
        m.extend(iter);
        m
    }
}

impl<'a, K, V> IntoIterator for &'a HashedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over one bucket's chain.
pub struct Chain<'a, K, V> {
    links: Links<'a, K, V>,
}

impl<'a, K, V> Iterator for Chain<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.links.next().map(|(_, e)| (&e.key, &e.value))
    }
}

/// Iterator over all entries, bucket by bucket.
pub struct Iter<'a, K, V> {
    heads: core::slice::Iter<'a, Link>,
    chain: Links<'a, K, V>,
    entries: &'a ChainArena<K, V>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((_, e)) = self.chain.next() {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((&e.key, &e.value));
            }
            let &head = self.heads.next()?;
            self.chain = self.entries.links(head);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Iterator over mutable entries.
pub struct IterMut<'a, K, V> {
    nodes: NodesMut<'a, K, V>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

/// Bucket-by-bucket rendering returned by [`HashedMap::layout`].
pub struct Layout<'a, K, V> {
    map: &'a HashedMap<K, V>,
}

impl<K: fmt::Display, V> fmt::Display for Layout<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (b, &head) in self.map.buckets.iter().enumerate() {
            write!(f, "bucket {b}:")?;
            for (_, e) in self.map.entries.links(head) {
                write!(f, " {} ->", e.key)?;
            }
            writeln!(f, " nil")?;
        }
        Ok(())
    }
}
