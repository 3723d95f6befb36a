use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Stable handle to a value stored in an [`Arena`].
///
/// A handle carries the generation of the slot it was issued for, so it
/// stops resolving once the value is removed, even after the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    pub const NULL: BodyHandle = BodyHandle {
        index: u32::MAX,
        generation: 0,
    };

    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl Default for BodyHandle {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Generational arena that remembers insertion order.
///
/// Iteration always visits live values in the order they were inserted,
/// regardless of which slots were recycled. The physics world relies on
/// this: pair enumeration order decides how simultaneous contacts resolve.
pub struct Arena<T> {
    slots: Vec<Option<T>>,
    generations: Vec<u32>,
    free_list: VecDeque<usize>,
    order: Vec<usize>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: VecDeque::new(),
            order: Vec::new(),
        }
    }

    pub fn insert(&mut self, item: T) -> BodyHandle {
        let index = match self.free_list.pop_front() {
            Some(index) => {
                self.slots[index] = Some(item);
                index
            }
            None => {
                self.slots.push(Some(item));
                self.generations.push(0);
                self.slots.len() - 1
            }
        };
        self.order.push(index);
        BodyHandle::new(index as u32, self.generations[index])
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&T> {
        if self.is_valid(handle) {
            self.slots[handle.index()].as_ref()
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut T> {
        if self.is_valid(handle) {
            self.slots[handle.index()].as_mut()
        } else {
            None
        }
    }

    /// Removes the value behind `handle`. Unknown or stale handles are a no-op.
    pub fn remove(&mut self, handle: BodyHandle) -> Option<T> {
        if !self.is_valid(handle) {
            return None;
        }
        let index = handle.index();
        let item = self.slots[index].take()?;
        self.generations[index] = self.generations[index].wrapping_add(1);
        self.free_list.push_back(index);
        self.order.retain(|&slot| slot != index);
        Some(item)
    }

    /// Drops every value and invalidates every outstanding handle.
    pub fn clear(&mut self) {
        for index in self.order.drain(..) {
            self.slots[index] = None;
            self.generations[index] = self.generations[index].wrapping_add(1);
            self.free_list.push_back(index);
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Handles of live values, in insertion order.
    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.order
            .iter()
            .map(move |&index| BodyHandle::new(index as u32, self.generations[index]))
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &T)> + '_ {
        self.order.iter().filter_map(move |&index| {
            self.slots[index]
                .as_ref()
                .map(|item| (BodyHandle::new(index as u32, self.generations[index]), item))
        })
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.order
            .iter()
            .filter_map(move |&index| self.slots[index].as_ref())
    }

    /// Visits every live value mutably, in insertion order.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T),
    {
        for &index in &self.order {
            if let Some(item) = self.slots[index].as_mut() {
                f(item);
            }
        }
    }

    /// Number of live values; also the upper bound for [`Arena::nth_pair_mut`].
    pub fn ordered_len(&self) -> usize {
        self.order.len()
    }

    /// Mutable access to the `i`-th and `j`-th values in insertion order.
    pub fn nth_pair_mut(&mut self, i: usize, j: usize) -> Option<(&mut T, &mut T)> {
        let a = *self.order.get(i)?;
        let b = *self.order.get(j)?;
        if a == b {
            return None;
        }
        Self::pair_at(&mut self.slots, a, b)
    }

    fn pair_at(slots: &mut [Option<T>], a: usize, b: usize) -> Option<(&mut T, &mut T)> {
        if a < b {
            let (left, right) = slots.split_at_mut(b);
            Some((left[a].as_mut()?, right[0].as_mut()?))
        } else {
            let (left, right) = slots.split_at_mut(a);
            let first = right[0].as_mut()?;
            let second = left[b].as_mut()?;
            Some((first, second))
        }
    }

    fn is_valid(&self, handle: BodyHandle) -> bool {
        self.generations
            .get(handle.index())
            .map(|&generation| generation == handle.generation())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_handle_goes_stale_after_slot_reuse() {
        let mut arena = Arena::new();
        let a = arena.insert("a");
        let _b = arena.insert("b");
        assert_eq!(arena.remove(a), Some("a"));

        let c = arena.insert("c");
        assert_eq!(c.index(), a.index());
        assert_ne!(c.generation(), a.generation());
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(c), Some(&"c"));
    }

    #[test]
    fn iteration_follows_insertion_order_across_reuse() {
        let mut arena = Arena::new();
        let a = arena.insert(1);
        arena.insert(2);
        arena.insert(3);
        arena.remove(a);
        arena.insert(4);

        let values: Vec<i32> = arena.values().copied().collect();
        assert_eq!(values, vec![2, 3, 4]);
    }

    #[test]
    fn clear_invalidates_all_handles() {
        let mut arena = Arena::new();
        let handles: Vec<_> = (0..3).map(|i| arena.insert(i)).collect();
        arena.clear();
        assert!(arena.is_empty());
        assert!(handles.iter().all(|&h| arena.get(h).is_none()));
        assert_eq!(arena.remove(handles[0]), None);
    }

    #[test]
    fn nth_pair_mut_respects_argument_order() {
        let mut arena = Arena::new();
        let first = arena.insert(10);
        arena.insert(20);
        arena.remove(first);
        arena.insert(30);

        let (a, b) = arena.nth_pair_mut(1, 0).expect("two live values");
        assert_eq!((*a, *b), (30, 20));
        assert!(arena.nth_pair_mut(0, 0).is_none());
        assert!(arena.nth_pair_mut(0, 5).is_none());
    }

    #[test]
    fn unknown_handle_is_ignored() {
        let mut arena: Arena<u8> = Arena::new();
        assert_eq!(arena.remove(BodyHandle::NULL), None);
        assert!(!arena.contains(BodyHandle::new(7, 0)));
    }
}
