//! Panel registry.
//!
//! Display controllers probe the attached panel's id and look up its
//! descriptor here. Capacity is fixed at compile time.
//!
//! ```
//! use lcd_panels::{descriptor::DeviceSlot, models::{Model, ILI9340, ST7796S}, registry::PanelRegistry};
//!
//! let mut registry = PanelRegistry::<4>::new();
//! registry.register(ILI9340::INFO).unwrap();
//! registry.register(ST7796S::INFO).unwrap();
//!
//! let found = registry.find(DeviceSlot::Main, 0x7796).unwrap();
//! assert_eq!(found.name, "lcd_st7796s_mipi");
//! ```

use heapless::Vec;

use crate::descriptor::{DeviceSlot, PanelInfo};

/// Error returned by [`PanelRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// No free entry left.
    Full,
    /// A panel with the same slot and id is already registered.
    Duplicate { slot: DeviceSlot, id: u32 },
}

/// Fixed capacity table of panel descriptors keyed by slot and id.
#[derive(Debug, Default)]
pub struct PanelRegistry<const N: usize> {
    panels: Vec<&'static PanelInfo, N>,
}

impl<const N: usize> PanelRegistry<N> {
    pub const fn new() -> Self {
        Self { panels: Vec::new() }
    }

    /// Adds a descriptor.
    pub fn register(&mut self, info: &'static PanelInfo) -> Result<(), RegistryError> {
        if self.find(info.slot, info.id).is_some() {
            return Err(RegistryError::Duplicate {
                slot: info.slot,
                id: info.id,
            });
        }
        self.panels.push(info).map_err(|_| RegistryError::Full)
    }

    /// Looks up the descriptor registered for `slot` and `id`.
    pub fn find(&self, slot: DeviceSlot, id: u32) -> Option<&'static PanelInfo> {
        self.panels
            .iter()
            .copied()
            .find(|info| info.slot == slot && info.id == id)
    }

    /// All descriptors, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static PanelInfo> + '_ {
        self.panels.iter().copied()
    }

    /// Descriptors registered for `slot`, in registration order.
    pub fn for_slot(&self, slot: DeviceSlot) -> impl Iterator<Item = &'static PanelInfo> + '_ {
        self.iter().filter(move |info| info.slot == slot)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}
