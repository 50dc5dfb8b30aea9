//! Authoritative item slot management.

use maze_chase_core::{CellCoord, ItemId, ItemKind, ItemSnapshot, ItemSpawn};

/// State of a single item slot stored inside the world.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ItemSlot {
    /// Kind of item currently held by the slot.
    pub(crate) kind: ItemKind,
    /// Cell the item occupies.
    pub(crate) cell: CellCoord,
    /// Whether the item can be collected.
    pub(crate) visible: bool,
}

/// Fixed set of item slots. Collected items go dormant and are reused.
#[derive(Clone, Debug, Default)]
pub(crate) struct ItemSlots {
    slots: Vec<ItemSlot>,
}

impl ItemSlots {
    /// Creates one visible slot per level placement.
    pub(crate) fn from_spawns(spawns: &[ItemSpawn]) -> Self {
        Self {
            slots: spawns
                .iter()
                .map(|spawn| ItemSlot {
                    kind: spawn.kind,
                    cell: spawn.cell,
                    visible: true,
                })
                .collect(),
        }
    }

    /// Hides every visible item in `cell`, yielding what was collected.
    pub(crate) fn collect_at(&mut self, cell: CellCoord) -> Vec<(ItemId, ItemKind)> {
        let mut collected = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.visible && slot.cell == cell {
                slot.visible = false;
                collected.push((ItemId::new(index as u32), slot.kind));
            }
        }
        collected
    }

    /// Places a power-up into the first dormant slot.
    ///
    /// Returns `None` when every slot is visible.
    pub(crate) fn spawn_power_up(&mut self, cell: CellCoord) -> Option<ItemId> {
        let (index, slot) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| !slot.visible)?;
        *slot = ItemSlot {
            kind: ItemKind::PowerUp,
            cell,
            visible: true,
        };
        Some(ItemId::new(index as u32))
    }

    /// Number of visible coins.
    pub(crate) fn remaining_coins(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.visible && slot.kind == ItemKind::Coin)
            .count()
    }

    /// Snapshots of every slot in slot order.
    pub(crate) fn snapshots(&self) -> Vec<ItemSnapshot> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| ItemSnapshot {
                id: ItemId::new(index as u32),
                kind: slot.kind,
                cell: slot.cell,
                visible: slot.visible,
            })
            .collect()
    }
}
