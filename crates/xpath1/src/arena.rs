//! Per-parse ownership table for token strings.
//!
//! Every string payload handed to the grammar lives here until a semantic
//! action takes it into the tree with [`StringArena::release`]. Whatever is
//! still registered when a parse fails is dropped by
//! [`StringArena::release_all`]. Handles carry a generation, so a handle that
//! was already released (or belongs to an earlier parse) is rejected instead
//! of aliasing a newer string in the same slot.

use thiserror::Error;

/// Generation-checked reference to a registered string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrHandle {
    index: u32,
    generation: u32,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    #[error("string handle {0:?} is not registered")]
    UnknownHandle(StrHandle),
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    value: Option<String>,
}

#[derive(Debug, Default)]
pub struct StringArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl StringArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `value` and returns a fresh handle to it.
    pub fn register(&mut self, value: String) -> StrHandle {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        slot.value = Some(value);
        self.live += 1;
        StrHandle {
            index,
            generation: slot.generation,
        }
    }

    pub fn get(&self, handle: StrHandle) -> Option<&str> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_deref())
    }

    /// Removes exactly one entry and hands its string to the caller.
    pub fn release(&mut self, handle: StrHandle) -> Result<String, ArenaError> {
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .ok_or(ArenaError::UnknownHandle(handle))?;
        let value = slot.value.take().ok_or(ArenaError::UnknownHandle(handle))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.live -= 1;
        Ok(value)
    }

    /// Drops every registered string and returns how many there were.
    pub fn release_all(&mut self) -> usize {
        let released = self.live;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.live = 0;
        released
    }

    /// Number of strings currently registered.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}
