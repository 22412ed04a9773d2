use crate::error::{Error, Result};

const INDEX_BITS: u32 = 24;
const INDEX_MASK: u64 = (1 << INDEX_BITS) - 1;

/// An opaque, generation-tagged reference into a [`HandleRegistry`].
///
/// Bits 0..24 hold the slot index, bits 24..32 the registry tag and the high
/// 32 bits the slot generation. Generations start at 1, so no issued handle
/// is ever 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    tag: u8,
    index: u32,
    generation: u32,
}

impl Handle {
    pub fn from_raw(raw: u64) -> Result<Handle> {
        if raw == 0 {
            return Err(Error::NullHandle);
        }
        let handle = Handle {
            tag: ((raw >> INDEX_BITS) & 0xFF) as u8,
            index: (raw & INDEX_MASK) as u32,
            generation: (raw >> 32) as u32,
        };
        if handle.generation == 0 {
            return Err(Error::InvalidHandle(raw));
        }
        Ok(handle)
    }

    pub fn to_raw(&self) -> u64 {
        ((self.generation as u64) << 32) | ((self.tag as u64) << INDEX_BITS) | self.index as u64
    }

    pub fn get_tag(&self) -> u8 {
        self.tag
    }

    pub fn get_index(&self) -> u32 {
        self.index
    }

    pub fn get_generation(&self) -> u32 {
        self.generation
    }
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Owns values handed out across the foreign boundary.
///
/// Removing a value bumps its slot's generation, so every handle issued for it
/// becomes stale and is rejected instead of reaching a reused slot.
pub struct HandleRegistry<T> {
    tag: u8,
    slots: Vec<Slot<T>>,
    free_indices: Vec<u32>,
    len: usize,
}

impl<T> HandleRegistry<T> {
    pub fn new() -> HandleRegistry<T> {
        Self::with_tag(0)
    }

    /// Handles issued by registries with different tags never resolve in each other.
    pub fn with_tag(tag: u8) -> HandleRegistry<T> {
        HandleRegistry {
            tag,
            slots: Vec::new(),
            free_indices: Vec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> Result<Handle> {
        if let Some(index) = self.free_indices.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            self.len += 1;
            return Ok(Handle {
                tag: self.tag,
                index,
                generation: slot.generation,
            });
        }
        if self.slots.len() as u64 > INDEX_MASK {
            return Err(Error::RegistryFull);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 1,
            value: Some(value),
        });
        self.len += 1;
        Ok(Handle {
            tag: self.tag,
            index,
            generation: 1,
        })
    }

    fn slot_index(&self, handle: Handle) -> Result<usize> {
        let raw = handle.to_raw();
        if handle.tag != self.tag {
            return Err(Error::InvalidHandle(raw));
        }
        let slot = self
            .slots
            .get(handle.index as usize)
            .ok_or(Error::InvalidHandle(raw))?;
        if handle.generation > slot.generation {
            return Err(Error::InvalidHandle(raw));
        }
        if handle.generation != slot.generation || slot.value.is_none() {
            return Err(Error::StaleHandle(raw));
        }
        Ok(handle.index as usize)
    }

    pub fn get(&self, handle: Handle) -> Result<&T> {
        let index = self.slot_index(handle)?;
        self.slots[index]
            .value
            .as_ref()
            .ok_or(Error::StaleHandle(handle.to_raw()))
    }

    pub fn get_mut(&mut self, handle: Handle) -> Result<&mut T> {
        let index = self.slot_index(handle)?;
        self.slots[index]
            .value
            .as_mut()
            .ok_or(Error::StaleHandle(handle.to_raw()))
    }

    pub fn remove(&mut self, handle: Handle) -> Result<T> {
        let index = self.slot_index(handle)?;
        let slot = &mut self.slots[index];
        let value = slot.value.take().ok_or(Error::StaleHandle(handle.to_raw()))?;
        // A slot whose generation would wrap is retired instead of reused.
        if slot.generation < u32::MAX {
            slot.generation += 1;
            self.free_indices.push(index as u32);
        }
        self.len -= 1;
        Ok(value)
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.slot_index(handle).is_ok()
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Default for HandleRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::{Handle, HandleRegistry};
    use crate::error::Error;

    #[test]
    fn test_raw_is_never_zero() {
        let mut registry = HandleRegistry::new();
        let handle = registry.insert(1).unwrap();
        assert_ne!(handle.to_raw(), 0);
        assert_eq!(Handle::from_raw(handle.to_raw()).unwrap(), handle);
    }

    #[test]
    fn test_from_raw_rejects_zero() {
        assert!(matches!(Handle::from_raw(0), Err(Error::NullHandle)));
        assert!(matches!(Handle::from_raw(7), Err(Error::InvalidHandle(7))));
    }

    #[test]
    fn test_tag_mismatch_is_invalid() {
        let mut configs = HandleRegistry::with_tag(1);
        let mut manipulators = HandleRegistry::with_tag(2);
        let config = configs.insert(1).unwrap();
        let manipulator = manipulators.insert(2).unwrap();
        assert_eq!(config.get_index(), manipulator.get_index());
        assert_eq!(manipulator.get_tag(), 2);
        assert!(matches!(manipulators.get(config), Err(Error::InvalidHandle(_))));
        assert!(matches!(configs.remove(manipulator), Err(Error::InvalidHandle(_))));
        assert_eq!(configs.len(), 1);
    }

    #[test]
    fn test_insert_get_remove() {
        let mut registry = HandleRegistry::new();
        let a = registry.insert("a".to_string()).unwrap();
        let b = registry.insert("b".to_string()).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(a).unwrap(), "a");
        registry.get_mut(b).unwrap().push('!');
        assert_eq!(registry.remove(b).unwrap(), "b!");
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(a));
        assert!(!registry.contains(b));
    }

    #[test]
    fn test_create_destroy_does_not_leak() {
        let mut registry = HandleRegistry::new();
        for _ in 0..100 {
            let handle = registry.insert(vec![0u8; 16]).unwrap();
            registry.remove(handle).unwrap();
        }
        assert!(registry.is_empty());
        assert_eq!(registry.slots.len(), 1);
    }

    #[test]
    fn test_double_remove_is_stale() {
        let mut registry = HandleRegistry::new();
        let handle = registry.insert(1).unwrap();
        registry.remove(handle).unwrap();
        assert!(matches!(
            registry.remove(handle),
            Err(Error::StaleHandle(raw)) if raw == handle.to_raw()
        ));
    }

    #[test]
    fn test_stale_handle_does_not_reach_reused_slot() {
        let mut registry = HandleRegistry::new();
        let old = registry.insert(1).unwrap();
        registry.remove(old).unwrap();
        let new = registry.insert(2).unwrap();
        assert_eq!(old.get_index(), new.get_index());
        assert_ne!(old, new);
        assert!(matches!(registry.get(old), Err(Error::StaleHandle(_))));
        assert_eq!(*registry.get(new).unwrap(), 2);
    }

    #[test]
    fn test_never_issued_handle_is_invalid() {
        let registry: HandleRegistry<i32> = HandleRegistry::new();
        let handle = Handle::from_raw((1u64 << 32) | 42).unwrap();
        assert!(matches!(registry.get(handle), Err(Error::InvalidHandle(_))));

        let mut registry = HandleRegistry::new();
        let issued = registry.insert(0).unwrap();
        let future = Handle::from_raw(issued.to_raw() + (1u64 << 32)).unwrap();
        assert!(matches!(registry.get(future), Err(Error::InvalidHandle(_))));
    }
}
