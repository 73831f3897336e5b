//! ChainArena: node storage for bucket chains.
//!
//! Every node lives in one `SlotMap`. A chain is addressed by its head
//! `Link`, which the caller owns (a bucket slot); each node owns the link
//! to its successor. Nodes are freed from the arena on unlink, so the
//! arena length is always the number of linked nodes.

use core::borrow::Borrow;
use slotmap::{DefaultKey, SlotMap};

/// Head of a chain or a node's successor.
pub(crate) type Link = Option<DefaultKey>;

#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    next: Link,
}

#[derive(Debug, Clone)]
pub(crate) struct ChainArena<K, V> {
    slots: SlotMap<DefaultKey, Entry<K, V>>,
}

/// Walks one chain from its head.
pub(crate) struct Links<'a, K, V> {
    slots: &'a SlotMap<DefaultKey, Entry<K, V>>,
    cursor: Link,
}

impl<'a, K, V> Iterator for Links<'a, K, V> {
    type Item = (DefaultKey, &'a Entry<K, V>);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cursor?;
        let e = self.slots.get(k)?;
        self.cursor = e.next;
        Some((k, e))
    }
}

/// Mutable walk over every node in the arena, in storage order.
pub(crate) struct NodesMut<'a, K, V> {
    it: slotmap::basic::IterMut<'a, DefaultKey, Entry<K, V>>,
}

impl<'a, K, V> Iterator for NodesMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, e)| (&e.key, &mut e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K, V> ChainArena<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Frees every node. Callers must reset all heads they hold.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }

    pub(crate) fn get(&self, k: DefaultKey) -> Option<&Entry<K, V>> {
        self.slots.get(k)
    }

    /// Links a new node in front of `head`. O(1), no scan.
    pub(crate) fn push_front(&mut self, head: &mut Link, key: K, value: V) -> DefaultKey {
        let k = self.slots.insert(Entry {
            key,
            value,
            next: *head,
        });
        *head = Some(k);
        k
    }

    pub(crate) fn links(&self, head: Link) -> Links<'_, K, V> {
        Links {
            slots: &self.slots,
            cursor: head,
        }
    }

    pub(crate) fn nodes_mut(&mut self) -> NodesMut<'_, K, V> {
        NodesMut {
            it: self.slots.iter_mut(),
        }
    }

    /// Every node regardless of chain, in storage order.
    #[cfg(test)]
    pub(crate) fn nodes(&self) -> impl Iterator<Item = (DefaultKey, &Entry<K, V>)> {
        self.slots.iter()
    }

    pub(crate) fn find<Q>(&self, head: Link, q: &Q) -> Option<DefaultKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.links(head)
            .find(|(_, e)| e.key.borrow() == q)
            .map(|(k, _)| k)
    }

    pub(crate) fn find_mut<Q>(&mut self, head: Link, q: &Q) -> Option<&mut Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let k = self.find(head, q)?;
        self.slots.get_mut(k)
    }

    /// Unlinks the first node equal to `q` and frees it. On a miss the
    /// chain is left untouched.
    pub(crate) fn unlink<Q>(&mut self, head: &mut Link, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut prev: Link = None;
        let mut cursor = *head;
        while let Some(k) = cursor {
            let node = self.slots.get(k)?;
            if node.key.borrow() == q {
                let next = node.next;
                match prev {
                    None => *head = next,
                    Some(p) => self.slots.get_mut(p)?.next = next,
                }
                let node = self.slots.remove(k)?;
                return Some((node.key, node.value));
            }
            prev = cursor;
            cursor = node.next;
        }
        None
    }
}

impl<K, V> Default for ChainArena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
