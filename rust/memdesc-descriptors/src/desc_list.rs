//! `DescList`: an ordered, homogeneous list of descriptors of one memory type.

use std::fmt;
use std::ops::{Deref, Index, IndexMut};

use memdesc_common::{Error, MemType, Result};

use crate::{Descriptor, RangeDesc};

/// Backing storage of a [`DescList`]. The variant is chosen at construction
/// and never changes for the lifetime of the list.
enum Storage<'a, T> {
    /// Independently allocated, mutable.
    Owned(Vec<T>),
    /// Read-only window into storage owned elsewhere.
    Borrowed(&'a [T]),
}

/// An ordered list of descriptors sharing one [`MemType`].
///
/// A list is either *owning* (it holds its own `Vec` and can be mutated) or
/// a *view* (it borrows a slice owned by someone else, for example another
/// list, and is read-only). The borrow checker keeps the backing storage
/// alive and unmodified for as long as the view exists.
///
/// Read access (`len`, indexing, iteration, lookup, serialization) works in
/// both modes. Mutating operations return an `InvalidOperation` error on a
/// view and leave it untouched; `IndexMut` panics instead, the same way
/// indexing out of bounds does.
///
/// Cloning always produces an owning list, whatever the source mode. Use
/// [`DescList::as_view`] for a cheap, borrowed copy.
pub struct DescList<'a, T> {
    mem_type: MemType,
    storage: Storage<'a, T>,
}

impl<'a, T: Descriptor> DescList<'a, T> {
    /// Creates an empty owning list.
    pub fn new(mem_type: MemType) -> Self {
        Self::with_capacity(mem_type, 0)
    }

    /// Creates an empty owning list with room for `capacity` descriptors.
    pub fn with_capacity(mem_type: MemType, capacity: usize) -> Self {
        DescList {
            mem_type,
            storage: Storage::Owned(Vec::with_capacity(capacity)),
        }
    }

    /// Creates an owning list from the given descriptors, in order.
    pub fn from_descs(mem_type: MemType, descs: impl IntoIterator<Item = T>) -> Self {
        DescList {
            mem_type,
            storage: Storage::Owned(descs.into_iter().collect()),
        }
    }

    /// Creates a read-only view over `descs`. Nothing is copied or validated.
    pub fn borrowed(mem_type: MemType, descs: &'a [T]) -> Self {
        DescList {
            mem_type,
            storage: Storage::Borrowed(descs),
        }
    }

    /// Borrows the current content of this list as a view.
    pub fn as_view(&self) -> DescList<'_, T> {
        DescList::borrowed(self.mem_type, self.as_slice())
    }

    /// Deep-copies the content into a new owning list that does not borrow
    /// from anything.
    pub fn to_owned_list(&self) -> DescList<'static, T> {
        DescList {
            mem_type: self.mem_type,
            storage: Storage::Owned(self.as_slice().to_vec()),
        }
    }

    /// Moves the content out.
    ///
    /// An owning list hands over its storage and is left empty (still
    /// owning, same memory type). A view owns nothing: the returned list is
    /// another view over the same window and `self` is unchanged.
    pub fn take(&mut self) -> DescList<'a, T> {
        let mem_type = self.mem_type;
        match self.storage {
            Storage::Borrowed(descs) => DescList::borrowed(mem_type, descs),
            Storage::Owned(_) => std::mem::replace(self, DescList::new(mem_type)),
        }
    }

    #[inline]
    pub fn mem_type(&self) -> MemType {
        self.mem_type
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_view(&self) -> bool {
        matches!(self.storage, Storage::Borrowed(_))
    }

    #[inline]
    pub fn is_owning(&self) -> bool {
        !self.is_view()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match &self.storage {
            Storage::Owned(descs) => descs,
            Storage::Borrowed(descs) => descs,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    fn owned_mut(&mut self, op: &str) -> Result<&mut Vec<T>> {
        match &mut self.storage {
            Storage::Owned(descs) => Ok(descs),
            Storage::Borrowed(_) => Err(Error::invalid_operation(format!(
                "{op} on a read-only descriptor list view"
            ))),
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let descs = self.owned_mut("get_mut")?;
        let len = descs.len();
        descs
            .get_mut(index)
            .ok_or_else(|| Error::index_out_of_range(index, len))
    }

    pub fn as_mut_slice(&mut self) -> Result<&mut [T]> {
        Ok(self.owned_mut("as_mut_slice")?.as_mut_slice())
    }

    pub fn iter_mut(&mut self) -> Result<std::slice::IterMut<'_, T>> {
        Ok(self.owned_mut("iter_mut")?.iter_mut())
    }

    /// Appends a descriptor.
    pub fn add_desc(&mut self, desc: T) -> Result<()> {
        self.owned_mut("add_desc")?.push(desc);
        Ok(())
    }

    /// Inserts a descriptor before position `index`; `index == len()`
    /// appends.
    pub fn insert_desc(&mut self, index: usize, desc: T) -> Result<()> {
        let descs = self.owned_mut("insert_desc")?;
        if index > descs.len() {
            return Err(Error::index_out_of_range(index, descs.len()));
        }
        descs.insert(index, desc);
        Ok(())
    }

    /// Removes and returns the descriptor at `index`, shifting the following
    /// ones down.
    pub fn rem_desc(&mut self, index: usize) -> Result<T> {
        let descs = self.owned_mut("rem_desc")?;
        if index >= descs.len() {
            return Err(Error::index_out_of_range(index, descs.len()));
        }
        Ok(descs.remove(index))
    }

    /// Truncates or extends the list to `count` descriptors. New slots hold
    /// default (all-zero) descriptors.
    pub fn resize(&mut self, count: usize) -> Result<()> {
        self.owned_mut("resize")?.resize_with(count, T::default);
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.owned_mut("clear")?.clear();
        Ok(())
    }

    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.owned_mut("reserve")?.reserve(additional);
        Ok(())
    }

    /// Stable sort by the range order (`dev_id`, `addr`, `len`). Extra
    /// fields do not take part in the comparison.
    pub fn sort(&mut self) -> Result<()> {
        self.owned_mut("sort")?
            .sort_by(|a, b| a.base().cmp(b.base()));
        Ok(())
    }

    pub fn is_sorted(&self) -> bool {
        self.as_slice()
            .windows(2)
            .all(|w| w[0].base() <= w[1].base())
    }

    /// Returns `true` if any two descriptors of the list overlap.
    pub fn has_overlaps(&self) -> bool {
        let mut ranges = self
            .iter()
            .map(Descriptor::to_basic)
            .filter(|d| d.len != 0)
            .collect::<Vec<_>>();
        ranges.sort_unstable();
        // Sorted by device and start address: if any pair overlaps, some
        // adjacent pair does.
        ranges.windows(2).any(|w| w[0].overlaps(&w[1]))
    }

    /// Returns the position of the first descriptor that covers `query`
    /// (same device, range fully contained), or `None`.
    pub fn get_index(&self, query: &RangeDesc) -> Option<usize> {
        self.iter().position(|d| d.base().covers(query))
    }

    /// Projects every descriptor onto its range triple, producing a new
    /// owning list of the same memory type, length and order.
    pub fn trim(&self) -> DescList<'static, RangeDesc> {
        DescList {
            mem_type: self.mem_type,
            storage: Storage::Owned(self.iter().map(Descriptor::to_basic).collect()),
        }
    }

    /// Single-line rendering, e.g. `DRAM[(addr: 0x0, len: 8, devID: 0)]`.
    pub fn to_string_compact(&self) -> String {
        let items = self
            .iter()
            .map(|d| format!("({d})"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}[{}]", self.mem_type, items)
    }

    pub(crate) fn from_owned_parts(mem_type: MemType, descs: Vec<T>) -> Self {
        DescList {
            mem_type,
            storage: Storage::Owned(descs),
        }
    }
}

impl<'a> DescList<'a, RangeDesc> {
    /// Views a natively laid out array of [`RangeDesc`] (for example a
    /// region of shared memory written by another component) without
    /// copying it.
    pub fn borrow_raw(mem_type: MemType, raw: &'a [u8]) -> Result<Self> {
        Ok(DescList::borrowed(mem_type, RangeDesc::slice_from_raw(raw)?))
    }
}

impl<T: Descriptor> Clone for DescList<'_, T> {
    fn clone(&self) -> Self {
        DescList {
            mem_type: self.mem_type,
            storage: Storage::Owned(self.as_slice().to_vec()),
        }
    }
}

impl<T: Descriptor> Deref for DescList<'_, T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Descriptor> Index<usize> for DescList<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T: Descriptor> IndexMut<usize> for DescList<'_, T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match &mut self.storage {
            Storage::Owned(descs) => &mut descs[index],
            Storage::Borrowed(_) => panic!("cannot mutate a read-only descriptor list view"),
        }
    }
}

impl<'b, T: Descriptor> PartialEq<DescList<'b, T>> for DescList<'_, T> {
    /// Memory type, length and element-wise equality; storage mode is
    /// ignored.
    fn eq(&self, other: &DescList<'b, T>) -> bool {
        self.mem_type == other.mem_type && self.as_slice() == other.as_slice()
    }
}

impl<T: Descriptor + Eq> Eq for DescList<'_, T> {}

impl<'s, T: Descriptor> IntoIterator for &'s DescList<'_, T> {
    type Item = &'s T;
    type IntoIter = std::slice::Iter<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Descriptor> fmt::Debug for DescList<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescList")
            .field("mem_type", &self.mem_type)
            .field("view", &self.is_view())
            .field("descs", &self.as_slice())
            .finish()
    }
}

impl<T: Descriptor> fmt::Display for DescList<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "DescList of {} ({} descriptors, {})",
            self.mem_type,
            self.len(),
            if self.is_view() { "view" } else { "owning" }
        )?;
        for (i, d) in self.iter().enumerate() {
            writeln!(f, "  [{i}] {d}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlobDesc, RemoteDesc};

    fn sample() -> DescList<'static, RangeDesc> {
        DescList::from_descs(
            MemType::Dram,
            [
                RangeDesc::new(0x1000, 64, 1),
                RangeDesc::new(0x2000, 64, 1),
                RangeDesc::new(0x1000, 64, 2),
            ],
        )
    }

    #[test]
    fn test_add_and_remove() {
        let mut list = sample();
        list.add_desc(RangeDesc::new(0x3000, 64, 2)).unwrap();
        assert_eq!(list.len(), 4);

        let removed = list.rem_desc(0).unwrap();
        assert_eq!(removed, RangeDesc::new(0x1000, 64, 1));
        assert_eq!(
            list.as_slice(),
            &[
                RangeDesc::new(0x2000, 64, 1),
                RangeDesc::new(0x1000, 64, 2),
                RangeDesc::new(0x3000, 64, 2),
            ]
        );
    }

    #[test]
    fn test_out_of_range() {
        let mut list = sample();
        let err = list.rem_desc(3).unwrap_err();
        assert!(err.is_misuse());
        assert_eq!(list.len(), 3);

        assert!(list.insert_desc(4, RangeDesc::default()).is_err());
        assert!(list.get_mut(3).is_err());
        assert_eq!(list, sample());
    }

    #[test]
    fn test_insert_before() {
        let mut list = sample();
        let d = RangeDesc::new(0, 1, 0);
        list.insert_desc(1, d).unwrap();
        assert_eq!(list[1], d);
        list.insert_desc(list.len(), d).unwrap();
        assert_eq!(list[4], d);
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_view_rejects_mutation() {
        let backing = sample();
        let before = backing.clone();
        let mut view = backing.as_view();
        assert!(view.is_view());

        assert!(view.add_desc(RangeDesc::default()).unwrap_err().is_misuse());
        assert!(view.insert_desc(0, RangeDesc::default()).is_err());
        assert!(view.rem_desc(0).unwrap_err().is_misuse());
        assert!(view.resize(10).is_err());
        assert!(view.clear().is_err());
        assert!(view.reserve(1).is_err());
        assert!(view.sort().is_err());
        assert!(view.get_mut(0).is_err());
        assert!(view.iter_mut().is_err());
        assert!(view.as_mut_slice().is_err());

        assert_eq!(view.len(), 3);
        assert_eq!(view, before);
        assert_eq!(backing, before);
    }

    #[test]
    #[should_panic(expected = "read-only")]
    fn test_view_index_mut_panics() {
        let backing = sample();
        let mut view = backing.as_view();
        view[0].len = 0;
    }

    #[test]
    fn test_clone_of_view_is_owning() {
        let backing = sample();
        let view = backing.as_view();
        let mut copy = view.clone();
        assert!(copy.is_owning());
        copy.add_desc(RangeDesc::default()).unwrap();
        assert_eq!(copy.len(), 4);
        assert_eq!(view.len(), 3);

        let detached = {
            let backing = sample();
            let view = backing.as_view();
            view.to_owned_list()
        };
        assert_eq!(detached, sample());
    }

    #[test]
    fn test_take() {
        let mut list = sample();
        let moved = list.take();
        assert_eq!(moved, sample());
        assert!(list.is_empty());
        assert!(list.is_owning());
        assert_eq!(list.mem_type(), MemType::Dram);
        list.add_desc(RangeDesc::default()).unwrap();

        let backing = sample();
        let mut view = backing.as_view();
        let other = view.take();
        assert!(other.is_view());
        assert_eq!(other, view);
    }

    #[test]
    fn test_resize_and_clear() {
        let mut list = sample();
        list.resize(5).unwrap();
        assert_eq!(list.len(), 5);
        assert_eq!(list[4], RangeDesc::default());
        list.resize(1).unwrap();
        assert_eq!(list.as_slice(), &[RangeDesc::new(0x1000, 64, 1)]);
        list.clear().unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_mutable_access() {
        let mut list = sample();
        list.get_mut(0).unwrap().len = 128;
        list[1].dev_id = 9;
        for d in list.iter_mut().unwrap() {
            d.addr += 1;
        }
        assert_eq!(list[0], RangeDesc::new(0x1001, 128, 1));
        assert_eq!(list[1], RangeDesc::new(0x2001, 64, 9));
    }

    #[test]
    fn test_equality_ignores_mode() {
        let a = sample();
        let view = a.as_view();
        assert_eq!(view, a);

        let other_type = DescList::from_descs(MemType::Vram, a.iter().copied());
        assert_ne!(other_type, a);

        let mut shorter = a.clone();
        shorter.rem_desc(2).unwrap();
        assert_ne!(shorter, a);
    }

    #[test]
    fn test_get_index() {
        let mut list = sample();
        list.add_desc(RangeDesc::new(100, 50, 5)).unwrap();
        assert_eq!(list.get_index(&RangeDesc::new(110, 10, 5)), Some(3));
        assert_eq!(list.get_index(&RangeDesc::new(110, 10, 9)), None);
        assert_eq!(list.get_index(&RangeDesc::new(0x1010, 8, 2)), Some(2));
        assert_eq!(list.as_view().get_index(&RangeDesc::new(0x2000, 64, 1)), Some(1));
    }

    #[test]
    fn test_trim() {
        let regs = DescList::from_descs(
            MemType::Vram,
            [
                BlobDesc::new(0x10, 16, 0, "k0"),
                BlobDesc::new(0x20, 16, 1, "k1"),
            ],
        );
        let trimmed = regs.trim();
        assert_eq!(trimmed.mem_type(), MemType::Vram);
        assert!(trimmed.is_owning());
        assert_eq!(
            trimmed.as_slice(),
            &[RangeDesc::new(0x10, 16, 0), RangeDesc::new(0x20, 16, 1)]
        );
        assert_eq!(regs[0].meta_info(), b"k0");

        let remotes = DescList::from_descs(MemType::Dram, [RemoteDesc::new(1, 2, 3, "peer")]);
        assert_eq!(remotes.as_view().trim()[0], RangeDesc::new(1, 2, 3));
    }

    #[test]
    fn test_sort_and_overlaps() {
        let mut list = DescList::from_descs(
            MemType::Block,
            [
                RangeDesc::new(50, 10, 2),
                RangeDesc::new(0, 10, 1),
                RangeDesc::new(10, 10, 1),
            ],
        );
        assert!(!list.is_sorted());
        assert!(!list.has_overlaps());
        list.sort().unwrap();
        assert!(list.is_sorted());
        assert_eq!(list[0], RangeDesc::new(0, 10, 1));

        list.add_desc(RangeDesc::new(55, 1, 2)).unwrap();
        assert!(list.has_overlaps());
    }

    #[test]
    fn test_overlaps_skip_empty_ranges() {
        let list = DescList::from_descs(
            MemType::Dram,
            [
                RangeDesc::new(0, 10, 1),
                RangeDesc::new(5, 0, 1),
                RangeDesc::new(6, 3, 1),
            ],
        );
        assert!(list.has_overlaps());

        let empties = DescList::from_descs(
            MemType::Dram,
            [RangeDesc::new(5, 0, 1), RangeDesc::new(5, 0, 1)],
        );
        assert!(!empties.has_overlaps());
    }

    #[test]
    fn test_borrow_raw() {
        let descs = vec![RangeDesc::new(1, 2, 3), RangeDesc::new(4, 5, 6)];
        let raw = RangeDesc::slice_as_raw(&descs);
        let view = DescList::borrow_raw(MemType::File, raw).unwrap();
        assert!(view.is_view());
        assert_eq!(view.as_slice(), &descs[..]);
        assert!(DescList::borrow_raw(MemType::File, &raw[1..]).is_err());
    }

    #[test]
    fn test_rendering() {
        let list = DescList::from_descs(MemType::Dram, [RangeDesc::new(0, 8, 0)]);
        assert_eq!(list.to_string_compact(), "DRAM[(addr: 0x0, len: 8, devID: 0)]");
        assert_eq!(
            list.to_string(),
            "DescList of DRAM (1 descriptors, owning)\n  [0] addr: 0x0, len: 8, devID: 0\n"
        );
    }
}
