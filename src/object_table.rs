use std::collections::BTreeMap;
use std::fmt;

/// Stable handle to a canvas object.
///
/// Ids are never handed out twice within a document's lifetime, so a handle
/// to a removed object stays dead even after undo brings older objects back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Objects keyed by [`ObjectId`], plus the counter that mints the ids.
#[derive(Debug, Clone)]
pub struct ObjectTable<T> {
    entries: BTreeMap<ObjectId, T>,
    next_id: u64,
}

impl<T> Default for ObjectTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ObjectTable<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn insert(&mut self, value: T) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, value);
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&T> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut T> {
        self.entries.get_mut(&id)
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<T> {
        self.entries.remove(&id)
    }

    pub fn contains_key(&self, id: ObjectId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Entries in id order, which is also creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &T)> {
        self.entries.iter().map(|(id, value)| (*id, value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectId, &mut T)> {
        self.entries.iter_mut().map(|(id, value)| (*id, value))
    }

    pub fn retain(&mut self, mut keep: impl FnMut(ObjectId, &mut T) -> bool) {
        self.entries.retain(|id, value| keep(*id, value));
    }

    /// Drops every entry. Ids already handed out stay retired.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Takes over the entries of an older copy of this table.
    ///
    /// The id counter never moves backwards, so ids minted after the copy was
    /// taken are not handed out again.
    pub fn restore_entries(&mut self, older: ObjectTable<T>) {
        self.entries = older.entries;
        self.next_id = self.next_id.max(older.next_id);
    }
}
