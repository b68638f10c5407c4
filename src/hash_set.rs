use core::fmt::Debug;
use core::fmt::Display;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::hash::Hasher;
use core::iter::FusedIterator;

use crate::capacity::LoadFactor;
use crate::error::Result;
use crate::hash_table::Entry;
use crate::hash_table::HashTable;
use crate::hasher::DefaultHashBuilder;
use crate::hasher::FixedState;

/// A hash set implemented using the chaining [`HashTable`] as the underlying
/// storage.
///
/// `HashSet<E, S>` stores values of type `E` where `E` implements `Hash + Eq`
/// and uses a configurable hasher builder `S` to hash values. Values hashing to
/// the same bucket share a chain; the bucket count is always a prime, grows
/// when the set becomes denser than its [`LoadFactor`], and shrinks when a
/// quarter or less of it is in use.
///
/// Elements cannot be null: there is no null value in `E` to reject, so every
/// operation that would check for one is infallible in that respect.
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashSet;
///
/// let mut set: HashSet<i32> = HashSet::new();
/// for v in [10, 20, 30, 40, 50] {
///     set.insert(v);
/// }
///
/// assert_eq!(set.len(), 5);
/// assert!(set.contains(&30));
/// assert!(!set.contains(&100));
/// ```
#[derive(Clone)]
pub struct HashSet<E, S = DefaultHashBuilder> {
    table: HashTable<E>,
    hash_builder: S,
}

impl<E, S, S2> PartialEq<HashSet<E, S2>> for HashSet<E, S>
where
    E: Hash + Eq,
    S: BuildHasher,
    S2: BuildHasher,
{
    fn eq(&self, other: &HashSet<E, S2>) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }
}

impl<E, S> Eq for HashSet<E, S>
where
    E: Hash + Eq,
    S: BuildHasher,
{
}

impl<E, S> Hash for HashSet<E, S>
where
    E: Hash,
{
    /// Feeds the length and the wrapping sum of every element's hash under
    /// the zero-keyed [`FixedState`](crate::hasher::FixedState).
    ///
    /// The sum ignores iteration order and the set's own hasher state, so
    /// equal sets always hash equally.
    fn hash<H: Hasher>(&self, state: &mut H) {
        let fixed = FixedState::default();
        let sum = self
            .iter()
            .fold(0u64, |sum, v| sum.wrapping_add(fixed.hash_one(v)));
        state.write_usize(self.len());
        state.write_u64(sum);
    }
}

impl<E, S> Debug for HashSet<E, S>
where
    E: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<E, S> Display for HashSet<E, S>
where
    E: Display,
{
    /// Renders the elements as `{a, b, c}` in iteration order, or `{ }` when
    /// the set is empty.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_empty() {
            return f.write_str("{ }");
        }

        f.write_str("{")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("}")
    }
}

impl<E, S> HashSet<E, S> {
    /// Creates a new hash set with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::hash_map::RandomState;
    ///
    /// use chain_hash::HashSet;
    ///
    /// let set: HashSet<i32, _> = HashSet::with_hasher(RandomState::new());
    /// assert!(set.is_empty());
    /// assert_eq!(set.capacity(), 17);
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates a new hash set with at least `capacity` buckets and the given
    /// hasher builder.
    ///
    /// The bucket count is the smallest prime in the sequence that is at
    /// least `capacity`, clamped to the largest one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::hash_map::RandomState;
    ///
    /// use chain_hash::HashSet;
    ///
    /// let set: HashSet<i32, _> = HashSet::with_capacity_and_hasher(100, RandomState::new());
    /// assert_eq!(set.capacity(), 107);
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::with_capacity_load_factor_and_hasher(capacity, LoadFactor::DEFAULT, hash_builder)
    }

    /// Creates a new hash set with at least `capacity` buckets, the given load
    /// factor, and the given hasher builder.
    pub fn with_capacity_load_factor_and_hasher(
        capacity: usize,
        load_factor: LoadFactor,
        hash_builder: S,
    ) -> Self {
        Self {
            table: HashTable::with_capacity_and_load_factor(capacity, load_factor),
            hash_builder,
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// assert_eq!(set.len(), 0);
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the current number of buckets.
    ///
    /// Always one of [`PRIMES`](crate::capacity::PRIMES).
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the position of [`capacity`](Self::capacity) in the prime
    /// sequence.
    pub fn capacity_index(&self) -> usize {
        self.table.capacity_index()
    }

    /// Returns the load factor the set was created with.
    pub fn load_factor(&self) -> LoadFactor {
        self.table.load_factor()
    }

    /// Returns a reference to the set's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns an iterator over the values of the set.
    ///
    /// Values come out bucket by bucket in ascending bucket order, and within
    /// a bucket in the order they were inserted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// set.insert(1);
    /// set.insert(2);
    ///
    /// for value in set.iter() {
    ///     println!("Value: {}", value);
    /// }
    /// ```
    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns a detached [`Cursor`] positioned before the first value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::Error;
    /// use chain_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::from([1, 2, 3]);
    /// let mut cursor = set.cursor();
    /// assert!(cursor.next(&set)?.is_some());
    ///
    /// set.insert(4);
    /// assert_eq!(cursor.next(&set), Err(Error::ConcurrentModification));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn cursor(&self) -> Cursor {
        Cursor {
            inner: self.table.cursor(),
        }
    }

    /// Removes all elements and resets the set to the smallest capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = (0..50).collect();
    /// assert!(set.capacity() > 17);
    /// set.clear();
    /// assert!(set.is_empty());
    /// assert_eq!(set.capacity(), 17);
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns an iterator that removes and yields all values from the
    /// set.
    ///
    /// The set is empty and back at the smallest capacity as soon as this
    /// returns, whether or not the iterator is consumed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::from([1, 2]);
    ///
    /// let values: Vec<_> = set.drain().collect();
    /// assert!(set.is_empty());
    /// assert_eq!(values.len(), 2);
    /// ```
    pub fn drain(&mut self) -> Drain<'_, E> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all elements `e` for which `f(&e)` returns
    /// `false`. The shrink policy is evaluated once after the whole pass,
    /// even when nothing was removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::from([1, 2, 3, 4]);
    ///
    /// set.retain(|&x| x % 2 == 0);
    /// assert_eq!(set.len(), 2);
    /// assert!(set.contains(&2));
    /// assert!(set.contains(&4));
    /// ```
    pub fn retain(&mut self, f: impl FnMut(&E) -> bool) {
        self.table.retain(f);
    }

    /// Returns a vector holding a copy of every element, in iteration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let set: HashSet<i32> = HashSet::from([1, 2, 3]);
    /// let mut values = set.to_vec();
    /// values.sort();
    /// assert_eq!(values, [1, 2, 3]);
    /// ```
    pub fn to_vec(&self) -> alloc::vec::Vec<E>
    where
        E: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Returns bucket and chain statistics for the underlying table.
    ///
    /// Requires the `stats` feature.
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> crate::hash_table::TableStats {
        self.table.stats()
    }
}

impl<E, S> HashSet<E, S>
where
    E: Hash + Eq,
    S: BuildHasher,
{
    /// Adds a value to the set, failing instead of panicking when the set
    /// cannot grow any further.
    ///
    /// Returns `Ok(true)` if the value was newly inserted and `Ok(false)` if
    /// an equal value was already present, in which case nothing changes.
    /// Fails with [`Error::CapacityExhausted`](crate::Error::CapacityExhausted)
    /// if the insertion would need more buckets than the largest prime; the
    /// set is left untouched.
    pub fn try_insert(&mut self, value: E) -> Result<bool> {
        let hash = self.hash_builder.hash_one(&value);
        match self.table.entry(hash, |v| v == &value) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(entry) => {
                entry.try_insert(value)?;
                Ok(true)
            }
        }
    }

    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the set did not previously contain this value, `true` is returned.
    /// - If the set already contained this value, `false` is returned.
    ///
    /// # Panics
    ///
    /// Panics if the set would need more buckets than the largest prime. See
    /// [`try_insert`](Self::try_insert).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// assert_eq!(set.insert(37), true);
    /// assert_eq!(set.insert(37), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: E) -> bool {
        match self.try_insert(value) {
            Ok(inserted) => inserted,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns `true` if the set contains a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// set.insert(1);
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&2));
    /// ```
    pub fn contains(&self, value: &E) -> bool {
        self.get(value).is_some()
    }

    /// Returns a reference to the value in the set, if any, that is equal to
    /// the given value.
    pub fn get(&self, value: &E) -> Option<&E> {
        let hash = self.hash_builder.hash_one(value);
        self.table.find(hash, |v| v == value)
    }

    /// Removes a value from the set. Returns whether the value was
    /// present in the set.
    ///
    /// A miss changes nothing. A successful removal may shrink the set by one
    /// prime step.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), true);
    /// assert_eq!(set.remove(&1), false);
    /// ```
    pub fn remove(&mut self, value: &E) -> bool {
        self.take(value).is_some()
    }

    /// Removes and returns the value in the set, if any, that is equal to the
    /// given one.
    pub fn take(&mut self, value: &E) -> Option<E> {
        let hash = self.hash_builder.hash_one(value);
        self.table.remove(hash, |v| v == value)
    }

    /// Adds a value to the set, replacing the existing value, if any, that is
    /// equal to the given one. Returns the replaced value.
    ///
    /// # Panics
    ///
    /// Panics if the set would need more buckets than the largest prime.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::new();
    /// set.insert(1);
    /// assert_eq!(set.replace(1), Some(1));
    /// assert_eq!(set.replace(2), None);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn replace(&mut self, value: E) -> Option<E> {
        let hash = self.hash_builder.hash_one(&value);
        match self.table.entry(hash, |v| v == &value) {
            Entry::Occupied(mut entry) => Some(core::mem::replace(entry.get_mut(), value)),
            Entry::Vacant(entry) => {
                entry.insert(value);
                None
            }
        }
    }

    /// Adds every value from `values`, returning whether any was new.
    ///
    /// Stops at the first value that cannot be inserted because the set is
    /// out of capacity; values added before it stay in the set.
    pub fn try_add_all(&mut self, values: impl IntoIterator<Item = E>) -> Result<bool> {
        let mut changed = false;
        for value in values {
            changed |= self.try_insert(value)?;
        }
        Ok(changed)
    }

    /// Adds every value from `values`, returning whether any was new.
    ///
    /// # Panics
    ///
    /// Panics if the set would need more buckets than the largest prime.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::from([1, 2]);
    /// assert!(set.add_all([2, 3]));
    /// assert!(!set.add_all([1, 3]));
    /// assert_eq!(set.len(), 3);
    /// ```
    pub fn add_all(&mut self, values: impl IntoIterator<Item = E>) -> bool {
        match self.try_add_all(values) {
            Ok(changed) => changed,
            Err(err) => panic!("{err}"),
        }
    }

    /// Removes every value in `values` from the set, returning whether any
    /// was present.
    ///
    /// Each removal evaluates the shrink policy on its own.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::from([1, 2, 3]);
    /// assert!(set.remove_all(&[2, 5]));
    /// assert!(!set.remove_all(&[5]));
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn remove_all<'a>(&mut self, values: impl IntoIterator<Item = &'a E>) -> bool
    where
        E: 'a,
    {
        let mut changed = false;
        for value in values {
            changed |= self.remove(value);
        }
        changed
    }

    /// Keeps only the elements also contained in `other`, returning whether
    /// any element was removed.
    ///
    /// This is an in-place intersection. The shrink policy is evaluated once
    /// after the whole pass, even when nothing was removed.
    ///
    /// To intersect with a slice, a `Vec`, or any other collection, use
    /// [`retain`](Self::retain) with that collection's own membership test:
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let mut set: HashSet<i32> = HashSet::from([1, 2, 3]);
    /// let keep = vec![2, 3, 4];
    ///
    /// set.retain(|v| keep.contains(v));
    /// assert_eq!(set, HashSet::<i32>::from([2, 3]));
    /// ```
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let mut a: HashSet<i32> = HashSet::from([1, 2, 3]);
    /// let b: HashSet<i32> = HashSet::from([2, 3, 4]);
    ///
    /// assert!(a.retain_all(&b));
    /// assert_eq!(a, HashSet::<i32>::from([2, 3]));
    /// assert!(!a.retain_all(&b));
    /// ```
    pub fn retain_all<S2>(&mut self, other: &HashSet<E, S2>) -> bool
    where
        S2: BuildHasher,
    {
        self.table.retain(|v| other.contains(v)) > 0
    }

    /// Returns `true` if every value in `values` is in the set.
    pub fn contains_all<'a>(&self, values: impl IntoIterator<Item = &'a E>) -> bool
    where
        E: 'a,
    {
        values.into_iter().all(|v| self.contains(v))
    }

    /// Grows the set so that `additional` more elements fit without a
    /// rehash.
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        self.table.try_reserve(additional)
    }

    /// Grows the set so that `additional` more elements fit without a
    /// rehash.
    ///
    /// # Panics
    ///
    /// Panics if that would need more buckets than the largest prime.
    pub fn reserve(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve(additional) {
            panic!("{err}");
        }
    }

    /// Returns the wrapping sum of every element's hash under this set's own
    /// hasher builder.
    ///
    /// Two equal sets sharing a hasher builder state (a set and its clone, or
    /// sets built with the same deterministic builder) always agree on it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let a: HashSet<i32> = HashSet::from([1, 2, 3]);
    /// let mut b = a.clone();
    /// b.remove(&3);
    /// b.insert(3);
    /// assert_eq!(a.hash_code(), b.hash_code());
    /// ```
    pub fn hash_code(&self) -> u64 {
        self.table.hash_sum()
    }

    /// Returns `true` if the set contains no elements in common with `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let a: HashSet<i32> = HashSet::from([1, 2]);
    /// let b: HashSet<i32> = HashSet::from([3, 4]);
    ///
    /// assert!(a.is_disjoint(&b));
    /// ```
    pub fn is_disjoint(&self, other: &HashSet<E, S>) -> bool {
        if self.len() <= other.len() {
            self.iter().all(|v| !other.contains(v))
        } else {
            other.iter().all(|v| !self.contains(v))
        }
    }

    /// Returns `true` if the set is a subset of another, i.e., `other`
    /// contains at least all the elements in `self`.
    pub fn is_subset(&self, other: &HashSet<E, S>) -> bool {
        if self.len() > other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }

    /// Returns `true` if the set is a superset of another, i.e., `self`
    /// contains at least all the elements in `other`.
    pub fn is_superset(&self, other: &HashSet<E, S>) -> bool {
        other.is_subset(self)
    }

    /// Returns an iterator over the union of `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let a: HashSet<i32> = HashSet::from([1, 2]);
    /// let b: HashSet<i32> = HashSet::from([2, 3]);
    ///
    /// let union: Vec<_> = a.union(&b).copied().collect();
    /// assert_eq!(union.len(), 3);
    /// ```
    pub fn union<'a>(&'a self, other: &'a HashSet<E, S>) -> Union<'a, E, S> {
        Union {
            iter: self.iter(),
            other_iter: other.iter(),
            set: self,
        }
    }

    /// Returns an iterator over the intersection of `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let a: HashSet<i32> = HashSet::from([1, 2]);
    /// let b: HashSet<i32> = HashSet::from([2, 3]);
    ///
    /// let intersection: Vec<_> = a.intersection(&b).copied().collect();
    /// assert_eq!(intersection, [2]);
    /// ```
    pub fn intersection<'a>(&'a self, other: &'a HashSet<E, S>) -> Intersection<'a, E, S> {
        if self.len() <= other.len() {
            Intersection {
                iter: self.iter(),
                other,
            }
        } else {
            Intersection {
                iter: other.iter(),
                other: self,
            }
        }
    }

    /// Returns an iterator over the values in `self` but not in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let a: HashSet<i32> = HashSet::from([1, 2]);
    /// let b: HashSet<i32> = HashSet::from([2, 3]);
    ///
    /// let difference: Vec<_> = a.difference(&b).copied().collect();
    /// assert_eq!(difference, [1]);
    /// ```
    pub fn difference<'a>(&'a self, other: &'a HashSet<E, S>) -> Difference<'a, E, S> {
        Difference {
            iter: self.iter(),
            other,
        }
    }

    /// Returns an iterator over the values in exactly one of `self` and
    /// `other`.
    pub fn symmetric_difference<'a>(
        &'a self,
        other: &'a HashSet<E, S>,
    ) -> SymmetricDifference<'a, E, S> {
        SymmetricDifference {
            iter: self.difference(other).chain(other.difference(self)),
        }
    }
}

impl<E, S> HashSet<E, S>
where
    E: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates a new hash set using the default hasher builder.
    ///
    /// The set starts at the smallest prime capacity with the default load
    /// factor of 0.75.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    ///
    /// let set: HashSet<i32> = HashSet::new();
    /// assert!(set.is_empty());
    /// assert_eq!(set.capacity(), 17);
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates a new hash set with at least `capacity` buckets using the
    /// default hasher builder.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }

    /// Creates a new hash set with at least `capacity` buckets and the given
    /// load factor, using the default hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashSet;
    /// use chain_hash::LoadFactor;
    ///
    /// let set: HashSet<i32> = HashSet::with_capacity_and_load_factor(20, LoadFactor::new(0.5)?);
    /// assert_eq!(set.capacity(), 23);
    /// assert_eq!(set.load_factor().get(), 0.5);
    ///
    /// assert!(LoadFactor::new(-1.0).is_err());
    /// # Ok::<(), chain_hash::Error>(())
    /// ```
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: LoadFactor) -> Self {
        Self::with_capacity_load_factor_and_hasher(capacity, load_factor, S::default())
    }
}

impl<E, S> Default for HashSet<E, S>
where
    E: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// A detached, fail-fast iteration position over a [`HashSet`].
///
/// Created by [`HashSet::cursor`]. A cursor does not borrow the set; it is
/// advanced by handing it the set on every step. If the set was structurally
/// modified (an insertion, removal, clear, or rehash) since the cursor was
/// created, every later step fails with
/// [`Error::ConcurrentModification`](crate::Error::ConcurrentModification).
/// Only advance a cursor against the set that created it.
#[derive(Clone, Debug)]
pub struct Cursor {
    inner: crate::hash_table::Cursor,
}

impl Cursor {
    /// Returns the next value, or `None` once every value has been visited.
    pub fn next<'a, E, S>(&mut self, set: &'a HashSet<E, S>) -> Result<Option<&'a E>> {
        self.inner.next(&set.table)
    }

    /// Returns whether [`next`](Self::next) would yield another value.
    pub fn has_next<E, S>(&self, set: &HashSet<E, S>) -> Result<bool> {
        self.inner.has_next(&set.table)
    }
}

/// An iterator over the values of a `HashSet`.
pub struct Iter<'a, E> {
    inner: crate::hash_table::Iter<'a, E>,
}

impl<E> Clone for Iter<'_, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}

impl<E> FusedIterator for Iter<'_, E> {}

/// A draining iterator over the values of a `HashSet`.
pub struct Drain<'a, E> {
    inner: crate::hash_table::Drain<'a, E>,
}

impl<E> Iterator for Drain<'_, E> {
    type Item = E;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// A consuming iterator over the values of a `HashSet`.
pub struct IntoIter<E> {
    inner: crate::hash_table::IntoIter<E>,
}

impl<E> Iterator for IntoIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E> ExactSizeIterator for IntoIter<E> {}

impl<E, S> IntoIterator for HashSet<E, S> {
    type IntoIter = IntoIter<E>;
    type Item = E;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, E, S> IntoIterator for &'a HashSet<E, S> {
    type IntoIter = Iter<'a, E>;
    type Item = &'a E;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E, S> FromIterator<E> for HashSet<E, S>
where
    E: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Builds a set of the distinct values, sized up front from the iterator's
    /// lower size bound.
    ///
    /// # Panics
    ///
    /// Panics if the values need more buckets than the largest prime.
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let capacity = LoadFactor::DEFAULT.buckets_for(iter.size_hint().0);
        let mut set = HashSet::with_capacity(capacity);
        set.add_all(iter);
        set
    }
}

impl<E, S, const N: usize> From<[E; N]> for HashSet<E, S>
where
    E: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from(values: [E; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<E, S> From<alloc::vec::Vec<E>> for HashSet<E, S>
where
    E: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from(values: alloc::vec::Vec<E>) -> Self {
        values.into_iter().collect()
    }
}

impl<E, S> Extend<E> for HashSet<E, S>
where
    E: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<'a, E, S> Extend<&'a E> for HashSet<E, S>
where
    E: Hash + Eq + Copy + 'a,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = &'a E>>(&mut self, iter: I) {
        self.add_all(iter.into_iter().copied());
    }
}

/// An iterator over the union of two sets.
pub struct Union<'a, E, S> {
    iter: Iter<'a, E>,
    other_iter: Iter<'a, E>,
    set: &'a HashSet<E, S>,
}

impl<'a, E, S> Iterator for Union<'a, E, S>
where
    E: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(v) = self.iter.next() {
            return Some(v);
        }
        loop {
            let v = self.other_iter.next()?;
            if !self.set.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the intersection of two sets.
pub struct Intersection<'a, E, S> {
    iter: Iter<'a, E>,
    other: &'a HashSet<E, S>,
}

impl<'a, E, S> Iterator for Intersection<'a, E, S>
where
    E: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.iter.next()?;
            if self.other.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the difference of two sets.
pub struct Difference<'a, E, S> {
    iter: Iter<'a, E>,
    other: &'a HashSet<E, S>,
}

impl<'a, E, S> Iterator for Difference<'a, E, S>
where
    E: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.iter.next()?;
            if !self.other.contains(v) {
                return Some(v);
            }
        }
    }
}

/// An iterator over the symmetric difference of two sets.
pub struct SymmetricDifference<'a, E, S> {
    iter: core::iter::Chain<Difference<'a, E, S>, Difference<'a, E, S>>,
}

impl<'a, E, S> Iterator for SymmetricDifference<'a, E, S>
where
    E: Hash + Eq,
    S: BuildHasher,
{
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}
