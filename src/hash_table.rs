use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::capacity::Capacity;
use crate::capacity::LoadFactor;
use crate::error::Error;
use crate::error::Result;

#[inline(always)]
fn bucket_index(hash: u64, buckets: usize) -> usize {
    (hash % buckets as u64) as usize
}

fn absent_buckets<V>(count: usize) -> Box<[Bucket<V>]> {
    (0..count).map(|_| Bucket::Absent).collect()
}

/// A chained value along with the full hash it was inserted under.
///
/// Keeping the hash lets rehashing skip the hasher entirely and lets chain
/// scans reject most mismatches without calling the equality predicate.
#[derive(Clone)]
struct Slot<V> {
    hash: u64,
    value: V,
}

/// One entry of the bucket array.
///
/// A bucket holding no values is always `Absent`; `Populated` chains are never
/// empty.
#[derive(Clone)]
enum Bucket<V> {
    Absent,
    Populated(Vec<Slot<V>>),
}

impl<V> Bucket<V> {
    #[inline]
    fn chain(&self) -> &[Slot<V>] {
        match self {
            Bucket::Absent => &[],
            Bucket::Populated(chain) => chain,
        }
    }

    #[inline]
    fn position(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<usize> {
        self.chain()
            .iter()
            .position(|slot| slot.hash == hash && eq(&slot.value))
    }

    fn push(&mut self, slot: Slot<V>) -> &mut V {
        if matches!(self, Bucket::Absent) {
            *self = Bucket::Populated(Vec::with_capacity(1));
        }

        match self {
            Bucket::Populated(chain) => {
                chain.push(slot);
                let last = chain.len() - 1;
                &mut chain[last].value
            }
            Bucket::Absent => unreachable!("bucket was populated above"),
        }
    }

    /// Removes the value at `slot`, keeping the order of the rest of the
    /// chain, and collapses the bucket to `Absent` when it empties.
    fn remove(&mut self, slot: usize) -> V {
        let Bucket::Populated(chain) = self else {
            unreachable!("removal from an absent bucket");
        };

        let removed = chain.remove(slot);
        if chain.is_empty() {
            *self = Bucket::Absent;
        }
        removed.value
    }
}

/// Bucket and chain statistics for a [`HashTable`].
///
/// Requires the `stats` feature.
#[cfg(feature = "stats")]
#[derive(Debug, Clone)]
pub struct TableStats {
    /// Number of elements currently in the table
    pub populated: usize,
    /// Number of buckets allocated
    pub buckets: usize,
    /// Position of `buckets` in the prime sequence
    pub capacity_index: usize,
    /// Number of buckets holding at least one element
    pub populated_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Current ratio of elements to buckets
    pub load: f64,
    /// Ratio above which the table grows
    pub load_factor: f64,
    /// Fraction of buckets holding at least one element
    pub bucket_utilization: f64,
    /// `chain_histogram[n]` counts buckets whose chain has length `n`
    pub chain_histogram: Vec<usize>,
}

#[cfg(feature = "stats")]
impl TableStats {
    /// Pretty-print the statistics, followed by the chain length histogram as
    /// a horizontal bar chart.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Statistics ===");
        println!(
            "Population: {}/{} buckets ({:.2}% load, grows above {:.2}%)",
            self.populated,
            self.buckets,
            self.load * 100.0,
            self.load_factor * 100.0
        );
        println!(
            "Bucket Usage: {}/{} ({:.2}% utilization)",
            self.populated_buckets,
            self.buckets,
            self.bucket_utilization * 100.0
        );
        println!(
            "Capacity Index: {}, Longest Chain: {}",
            self.capacity_index, self.longest_chain
        );

        let max = self.chain_histogram.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("chain histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let mut bar = "█".repeat(units / 8);
            let partial = match units % 8 {
                1 => Some('▏'),
                2 => Some('▎'),
                3 => Some('▍'),
                4 => Some('▌'),
                5 => Some('▋'),
                6 => Some('▊'),
                7 => Some('▉'),
                _ => None,
            };
            if let Some(ch) = partial {
                bar.push(ch);
            }
            bar
        };

        println!("chain histogram ({} buckets):", self.buckets);
        for (len, &count) in self.chain_histogram.iter().enumerate() {
            println!("{:>2} | {} ({})", len, make_bar(count), count);
        }
    }
}

/// A hash table resolving collisions by separate chaining over a prime-sized
/// bucket array.
///
/// `HashTable<V>` stores values of type `V`. Like other raw tables, it does
/// not hash anything itself: every operation takes the value's hash and an
/// equality predicate. A value's bucket is `hash % capacity`, where the
/// capacity is always drawn from [`PRIMES`](crate::capacity::PRIMES).
///
/// The table grows as soon as an insertion would push the ratio of elements
/// to buckets above its [`LoadFactor`], and shrinks by one prime step after a
/// removal leaves a quarter or fewer of the buckets' worth of elements.
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use chain_hash::hash_table::Entry;
/// # use chain_hash::hash_table::HashTable;
/// # use siphasher::sip::SipHasher;
/// #
/// # #[derive(Debug, PartialEq)]
/// # struct Person {
/// #     id: u64,
/// #     name: String,
/// # }
/// #
/// # fn hash_id(id: u64) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     id.hash(&mut hasher);
/// #     hasher.finish()
/// # }
///
/// let mut table = HashTable::with_capacity(100);
/// let hash = hash_id(123);
///
/// match table.entry(hash, |p: &Person| p.id == 123) {
///     Entry::Vacant(entry) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     Entry::Occupied(_) => {
///         println!("Person already exists");
///     }
/// }
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Clone)]
pub struct HashTable<V> {
    buckets: Box<[Bucket<V>]>,
    capacity: Capacity,
    load_factor: LoadFactor,
    populated: usize,
    // Bumped on every structural change; cursors compare against it.
    modifications: u64,
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        struct Chains<'a, V>(&'a [Bucket<V>]);

        impl<V> Debug for Chains<'_, V> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_map()
                    .entries(
                        self.0
                            .iter()
                            .enumerate()
                            .filter(|(_, b)| !b.chain().is_empty())
                            .map(|(i, b)| (i, b.chain().len())),
                    )
                    .finish()
            }
        }

        f.debug_struct("HashTable")
            .field("populated", &self.populated)
            .field("capacity", &self.capacity.buckets())
            .field("capacity_index", &self.capacity.index())
            .field("load_factor", &self.load_factor.get())
            .field("chains", &Chains(&self.buckets))
            .finish()
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<V> HashTable<V> {
    /// Creates a new hash table with at least `capacity` buckets and the
    /// default load factor.
    ///
    /// The bucket count is the smallest prime in the sequence that is at
    /// least `capacity`, or the largest prime if `capacity` is beyond it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<String> = HashTable::with_capacity(100);
    /// assert_eq!(table.capacity(), 107);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_load_factor(capacity, LoadFactor::DEFAULT)
    }

    /// Creates a new hash table with at least `capacity` buckets, growing
    /// whenever the element to bucket ratio would exceed `load_factor`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::LoadFactor;
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<u64> =
    ///     HashTable::with_capacity_and_load_factor(0, LoadFactor::new(2.0)?);
    /// assert_eq!(table.capacity(), 17);
    /// assert_eq!(table.load_factor().get(), 2.0);
    /// # Ok::<(), chain_hash::Error>(())
    /// ```
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: LoadFactor) -> Self {
        let capacity: Capacity = capacity.into();
        Self {
            buckets: absent_buckets(capacity.buckets()),
            capacity,
            load_factor,
            populated: 0,
            modifications: 0,
        }
    }

    /// Returns the number of elements in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table contains no elements.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of buckets.
    ///
    /// Unlike open-addressing tables, chaining lets the table hold more
    /// elements than buckets; it grows once `len() / capacity()` would exceed
    /// the load factor.
    pub fn capacity(&self) -> usize {
        self.capacity.buckets()
    }

    /// Returns the position of [`capacity`](Self::capacity) in the prime
    /// sequence.
    pub fn capacity_index(&self) -> usize {
        self.capacity.index()
    }

    /// Returns the load factor the table was created with.
    pub fn load_factor(&self) -> LoadFactor {
        self.load_factor
    }

    /// Returns an iterator over the values in the table.
    ///
    /// Buckets are visited in ascending index order, and each chain in the
    /// order its values were inserted.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: [].iter(),
            remaining: self.populated,
        }
    }

    /// Returns a [`Cursor`] positioned before the first value.
    ///
    /// The cursor does not borrow the table, and reports
    /// [`Error::ConcurrentModification`] if the table changes structurally
    /// before it is advanced again.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            bucket: 0,
            slot: 0,
            expected: self.modifications,
        }
    }

    /// Returns an iterator that removes and yields all values from the table.
    ///
    /// The table is reset to the smallest capacity immediately; values not
    /// yet yielded are dropped along with the iterator.
    pub fn drain(&mut self) -> Drain<'_, V> {
        let buckets = core::mem::take(&mut self.buckets);
        let remaining = self.populated;
        self.reset();

        Drain {
            inner: IntoIter {
                buckets: buckets.into_vec().into_iter(),
                chain: Vec::new().into_iter(),
                remaining,
            },
            _table: PhantomData,
        }
    }

    /// Removes all values and resets the table to the smallest capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(1000);
    /// table.entry(1, |&n: &u64| n == 1).or_insert(1);
    /// table.entry(2, |&n: &u64| n == 2).or_insert(2);
    /// assert_eq!(table.len(), 2);
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 17);
    /// ```
    pub fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            populated = self.populated,
            capacity = self.capacity.buckets(),
            "clearing hash table"
        );

        self.reset();
    }

    fn reset(&mut self) {
        self.buckets = absent_buckets(Capacity::MIN.buckets());
        self.capacity = Capacity::MIN;
        self.populated = 0;
        self.bump();
    }

    /// Grows the table so that `additional` more values fit without another
    /// rehash.
    ///
    /// Fails with [`Error::CapacityExhausted`] if that would take more buckets
    /// than the largest prime, leaving the table untouched.
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let required = self.populated.saturating_add(additional);
        if let Some(grown) = self.capacity.grown_for(required, self.load_factor)? {
            self.resize(grown);
        }
        Ok(())
    }

    /// Finds a value by hash and equality predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(42, |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.find(42, |&n| n == 42), Some(&42));
    /// assert_eq!(table.find(99, |&n| n == 99), None);
    /// ```
    #[inline]
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        let bucket = &self.buckets[bucket_index(hash, self.buckets.len())];
        bucket
            .chain()
            .iter()
            .find(|slot| slot.hash == hash && eq(&slot.value))
            .map(|slot| &slot.value)
    }

    /// Finds a value by hash and equality predicate, returning a mutable
    /// reference.
    ///
    /// The caller must not change the value in a way that changes its hash
    /// or its equality with other values.
    #[inline]
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        let index = bucket_index(hash, self.buckets.len());
        match &mut self.buckets[index] {
            Bucket::Absent => None,
            Bucket::Populated(chain) => chain
                .iter_mut()
                .find(|slot| slot.hash == hash && eq(&slot.value))
                .map(|slot| &mut slot.value),
        }
    }

    /// Removes and returns a value from the table.
    ///
    /// A successful removal may shrink the table by one prime step.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(10);
    /// table.entry(42, |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.remove(42, |&n| n == 42), Some(42));
    /// assert!(table.is_empty());
    /// assert_eq!(table.remove(99, |&n| n == 99), None);
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        let bucket = bucket_index(hash, self.buckets.len());
        let slot = self.buckets[bucket].position(hash, eq)?;
        Some(self.remove_at(bucket, slot))
    }

    fn remove_at(&mut self, bucket: usize, slot: usize) -> V {
        let value = self.buckets[bucket].remove(slot);
        self.populated -= 1;
        self.bump();
        self.maybe_shrink();
        value
    }

    /// Keeps only the values for which `keep` returns `true`, returning how
    /// many were removed.
    ///
    /// The whole table is filtered in one pass, and the shrink policy is
    /// evaluated once afterwards rather than per removed value. The check
    /// runs even when nothing was removed, so a sparse presized table steps
    /// back one prime.
    pub fn retain(&mut self, mut keep: impl FnMut(&V) -> bool) -> usize {
        let mut removed = 0;
        for bucket in self.buckets.iter_mut() {
            if let Bucket::Populated(chain) = bucket {
                let before = chain.len();
                chain.retain(|slot| keep(&slot.value));
                removed += before - chain.len();
                if chain.is_empty() {
                    *bucket = Bucket::Absent;
                }
            }
        }

        if removed > 0 {
            self.populated -= removed;
            self.bump();
        }
        self.maybe_shrink();
        removed
    }

    /// Gets the entry for the given hash and equality predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use chain_hash::hash_table::Entry;
    /// # use chain_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(10);
    ///
    /// match table.entry(7, |s: &String| s == "hello") {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert("hello".to_string());
    ///     }
    ///     Entry::Occupied(_) => unreachable!(),
    /// }
    ///
    /// assert!(matches!(
    ///     table.entry(7, |s: &String| s == "hello"),
    ///     Entry::Occupied(_)
    /// ));
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        let bucket = bucket_index(hash, self.buckets.len());
        match self.buckets[bucket].position(hash, eq) {
            Some(slot) => Entry::Occupied(OccupiedEntry {
                table: self,
                bucket,
                slot,
            }),
            None => Entry::Vacant(VacantEntry {
                table: self,
                hash,
                bucket,
            }),
        }
    }

    /// Wrapping sum of the hashes of every value.
    ///
    /// Independent of iteration order, so equal tables built with the same
    /// hasher agree on it.
    pub fn hash_sum(&self) -> u64 {
        self.buckets
            .iter()
            .flat_map(Bucket::chain)
            .fold(0u64, |sum, slot| sum.wrapping_add(slot.hash))
    }

    /// Returns bucket and chain statistics.
    ///
    /// Requires the `stats` feature.
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> TableStats {
        let mut chain_histogram = alloc::vec![0usize; 1];
        let mut populated_buckets = 0;
        for bucket in self.buckets.iter() {
            let len = bucket.chain().len();
            if len >= chain_histogram.len() {
                chain_histogram.resize(len + 1, 0);
            }
            chain_histogram[len] += 1;
            if len > 0 {
                populated_buckets += 1;
            }
        }

        let buckets = self.buckets.len();
        TableStats {
            populated: self.populated,
            buckets,
            capacity_index: self.capacity.index(),
            populated_buckets,
            longest_chain: chain_histogram.len() - 1,
            load: self.populated as f64 / buckets as f64,
            load_factor: self.load_factor.get(),
            bucket_utilization: populated_buckets as f64 / buckets as f64,
            chain_histogram,
        }
    }

    #[inline]
    fn bump(&mut self) {
        self.modifications = self.modifications.wrapping_add(1);
    }

    fn maybe_shrink(&mut self) {
        if let Some(shrunk) = self.capacity.shrunk_for(self.populated) {
            self.resize(shrunk);
        }
    }

    /// Moves every value into a fresh bucket array sized for `capacity`.
    fn resize(&mut self, capacity: Capacity) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            from = self.capacity.buckets(),
            to = capacity.buckets(),
            populated = self.populated,
            "rehashing hash table"
        );

        let buckets = capacity.buckets();
        let mut resized = absent_buckets(buckets);
        for bucket in core::mem::take(&mut self.buckets).into_vec() {
            if let Bucket::Populated(chain) = bucket {
                for slot in chain {
                    resized[bucket_index(slot.hash, buckets)].push(slot);
                }
            }
        }

        self.buckets = resized;
        self.capacity = capacity;
        self.bump();
    }
}

impl<V> IntoIterator for HashTable<V> {
    type IntoIter = IntoIter<V>;
    type Item = V;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            buckets: self.buckets.into_vec().into_iter(),
            chain: Vec::new().into_iter(),
            remaining: self.populated,
        }
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type IntoIter = Iter<'a, V>;
    type Item = &'a V;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A view into a single entry in the hash table, which may be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashTable`].
///
/// [`entry`]: HashTable::entry
pub enum Entry<'a, V> {
    /// A vacant entry - no matching value is present in the table
    Vacant(VacantEntry<'a, V>),
    /// An occupied entry - a matching value is present in the table
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value in the entry.
    ///
    /// # Panics
    ///
    /// Panics if inserting would need more buckets than the largest prime.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the result of `default` if the entry is vacant and returns a
    /// mutable reference to the value in the entry.
    ///
    /// # Panics
    ///
    /// Panics if inserting would need more buckets than the largest prime.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }
}

/// A view into a vacant entry in a [`HashTable`].
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    hash: u64,
    bucket: usize,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Inserts `value` at the end of its bucket's chain and returns a mutable
    /// reference to it.
    ///
    /// If the table would exceed its load factor it is grown and rehashed
    /// first. Fails with [`Error::CapacityExhausted`] without inserting if
    /// the largest prime capacity is not enough.
    pub fn try_insert(self, value: V) -> Result<&'a mut V> {
        let table = self.table;
        let mut bucket = self.bucket;

        if let Some(grown) = table
            .capacity
            .grown_for(table.populated + 1, table.load_factor)?
        {
            table.resize(grown);
            bucket = bucket_index(self.hash, table.buckets.len());
        }

        table.populated += 1;
        table.bump();
        Ok(table.buckets[bucket].push(Slot {
            hash: self.hash,
            value,
        }))
    }

    /// Inserts `value` and returns a mutable reference to it.
    ///
    /// # Panics
    ///
    /// Panics if inserting would need more buckets than the largest prime.
    pub fn insert(self, value: V) -> &'a mut V {
        match self.try_insert(value) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

/// A view into an occupied entry in a [`HashTable`].
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    bucket: usize,
    slot: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    fn slot(&self) -> &Slot<V> {
        &self.table.buckets[self.bucket].chain()[self.slot]
    }

    fn slot_mut(&mut self) -> &mut Slot<V> {
        match &mut self.table.buckets[self.bucket] {
            Bucket::Populated(chain) => &mut chain[self.slot],
            Bucket::Absent => unreachable!("occupied entry in an absent bucket"),
        }
    }

    /// Returns a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.slot().value
    }

    /// Returns a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.slot_mut().value
    }

    /// Converts the entry into a mutable reference to its value, with the
    /// lifetime of the table borrow.
    pub fn into_mut(self) -> &'a mut V {
        let table = self.table;
        match &mut table.buckets[self.bucket] {
            Bucket::Populated(chain) => &mut chain[self.slot].value,
            Bucket::Absent => unreachable!("occupied entry in an absent bucket"),
        }
    }

    /// Removes the value from the table and returns it.
    ///
    /// May shrink the table by one prime step.
    pub fn remove(self) -> V {
        self.table.remove_at(self.bucket, self.slot)
    }
}

/// A detached, fail-fast position in a [`HashTable`].
///
/// Created by [`HashTable::cursor`]. Unlike [`Iter`], a cursor holds no borrow
/// of the table, so the table may be modified while the cursor is alive. Any
/// structural modification (insertion, removal, clearing, or a rehash) makes
/// every later step fail with [`Error::ConcurrentModification`] instead of
/// skipping or repeating values. A cursor must only be advanced against the
/// table that created it.
#[derive(Clone, Debug)]
pub struct Cursor {
    bucket: usize,
    slot: usize,
    expected: u64,
}

impl Cursor {
    fn check<V>(&self, table: &HashTable<V>) -> Result<()> {
        if table.modifications == self.expected {
            Ok(())
        } else {
            Err(Error::ConcurrentModification)
        }
    }

    /// Returns the next value, or `None` once every value has been visited.
    pub fn next<'a, V>(&mut self, table: &'a HashTable<V>) -> Result<Option<&'a V>> {
        self.check(table)?;

        while let Some(bucket) = table.buckets.get(self.bucket) {
            if let Some(slot) = bucket.chain().get(self.slot) {
                self.slot += 1;
                return Ok(Some(&slot.value));
            }
            self.bucket += 1;
            self.slot = 0;
        }

        Ok(None)
    }

    /// Returns whether [`next`](Self::next) would yield another value.
    pub fn has_next<V>(&self, table: &HashTable<V>) -> Result<bool> {
        self.check(table)?;

        let Some(current) = table.buckets.get(self.bucket) else {
            return Ok(false);
        };
        Ok(self.slot < current.chain().len()
            || table.buckets[self.bucket + 1..]
                .iter()
                .any(|b| !b.chain().is_empty()))
    }
}

/// An iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`iter`] method on [`HashTable`].
///
/// [`iter`]: HashTable::iter
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Bucket<V>>,
    chain: core::slice::Iter<'a, Slot<V>>,
    remaining: usize,
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            chain: self.chain.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(slot) = self.chain.next() {
                self.remaining -= 1;
                return Some(&slot.value);
            }

            if self.remaining == 0 {
                return None;
            }
            self.chain = self.buckets.next()?.chain().iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

/// A consuming iterator over the values in a [`HashTable`].
pub struct IntoIter<V> {
    buckets: alloc::vec::IntoIter<Bucket<V>>,
    chain: alloc::vec::IntoIter<Slot<V>>,
    remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(slot) = self.chain.next() {
                self.remaining -= 1;
                return Some(slot.value);
            }

            if self.remaining == 0 {
                return None;
            }
            match self.buckets.next()? {
                Bucket::Absent => {}
                Bucket::Populated(chain) => self.chain = chain.into_iter(),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> FusedIterator for IntoIter<V> {}

/// A draining iterator over the values of a [`HashTable`].
///
/// This struct is created by the [`drain`] method on [`HashTable`].
///
/// [`drain`]: HashTable::drain
pub struct Drain<'a, V> {
    inner: IntoIter<V>,
    _table: PhantomData<&'a mut HashTable<V>>,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Drain<'_, V> {}
