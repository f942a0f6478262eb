//! Fixed-capacity snapshot ring used for rollback netcode: save a
//! simulation state every frame, restore any of the last `CAP` frames
//! without allocating.
//!
//! Converted from the teacher's `g_save.rs` (full-state save/load for
//! level transitions) and `net_chan.rs` (fixed-window sequence-number
//! buffering for unreliable delivery): here the two ideas merge into
//! one ring — sequence-numbered slots like a net channel, full
//! structural snapshots like a save file, reused in place instead of
//! written to disk.
//!
//! Slot indices in the public API (`restore`, `copy`, `confirm_frame`)
//! are offsets from the current head: `0` is the most recently saved
//! frame, `1` the one before it, and so on up to `frames_stored() - 1`.
//! They are never absolute, ever-increasing frame numbers — a caller
//! never needs to remember how many times it has called `save()`.

mod error;

pub use error::RollbackError;
use simcore_ecs::Rollbackable;

/// A ring of `CAP` pre-allocated `Sim` slots, each holding at most
/// `MAX_BYTES` of snapshot data. `Sim` is almost always a generated
/// `World` type.
pub struct RollbackRing<Sim, const CAP: usize, const MAX_BYTES: usize> {
    slots: Vec<Sim>,
    /// Byte size last recorded for each physical slot, used by `stats`.
    slot_bytes: Vec<usize>,
    /// Total number of `save()` calls ever made. Internal bookkeeping
    /// only — never exposed as an absolute frame id.
    frames_written: u64,
    /// Furthest-back confirmed point, recorded in the same internal
    /// absolute-frame terms as `frames_written`. Purely a diagnostic
    /// marker (§4.5/C5): it never gates `restore`/`copy`.
    confirmed_frame: Option<u64>,
    high_water_bytes: usize,
}

/// A snapshot of the ring's bookkeeping, for diagnostics.
///
/// Field names match spec.md §4.5's documented `stats()` shape
/// (`frames_stored`, `avg_frame_size_bytes`, `total_bytes`,
/// `used_bytes`); `high_water_bytes` is SPEC_FULL's additive field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollbackStats {
    /// Number of slots currently holding a saved frame, `<= CAP`.
    pub frames_stored: usize,
    /// `used_bytes / frames_stored`, `0` if nothing has been saved.
    pub avg_frame_size_bytes: usize,
    /// Total byte budget reserved by the ring: `CAP * MAX_BYTES`.
    pub total_bytes: usize,
    /// Sum of the actual recorded sizes of every currently stored frame.
    pub used_bytes: usize,
    /// Largest single-frame payload ever observed by `save()`.
    pub high_water_bytes: usize,
}

impl<Sim, const CAP: usize, const MAX_BYTES: usize> RollbackRing<Sim, CAP, MAX_BYTES>
where
    Sim: Rollbackable + Clone,
{
    /// Builds a ring of `CAP` slots, each a clone of `template`. The
    /// template's contents are irrelevant — every slot is overwritten
    /// before it is ever restored from — only its allocated capacity
    /// (component storage `Vec` reservations) matters, since that is
    /// what lets later `save()` calls avoid reallocating.
    pub fn new(template: &Sim) -> Self {
        assert!(CAP > 0, "rollback ring must have at least one slot");
        RollbackRing {
            slots: vec![template.clone(); CAP],
            slot_bytes: vec![0; CAP],
            frames_written: 0,
            confirmed_frame: None,
            high_water_bytes: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        CAP
    }

    #[inline]
    pub fn max_bytes(&self) -> usize {
        MAX_BYTES
    }

    #[inline]
    fn frames_stored(&self) -> u64 {
        self.frames_written.min(CAP as u64)
    }

    /// Resolves a head-relative offset (`0` = most recent) to the
    /// physical slot it lives in. Every `frames_stored()` distinct
    /// offsets map to `frames_stored()` distinct slots, since `save()`
    /// always advances the head by exactly one slot at a time — no
    /// separate "is this slot stale" bookkeeping is needed.
    fn slot_for_offset(&self, offset: u64) -> Result<usize, RollbackError> {
        if offset >= self.frames_stored() {
            return Err(RollbackError::SlotOutOfRange);
        }
        let abs_frame = self.frames_written - 1 - offset;
        Ok((abs_frame % CAP as u64) as usize)
    }

    pub fn stats(&self) -> RollbackStats {
        let frames_stored = self.frames_stored() as usize;
        let used_bytes: usize = (0..frames_stored)
            .map(|offset| self.slot_for_offset(offset as u64).unwrap())
            .map(|slot| self.slot_bytes[slot])
            .sum();
        let avg_frame_size_bytes = if frames_stored > 0 { used_bytes / frames_stored } else { 0 };
        RollbackStats {
            frames_stored,
            avg_frame_size_bytes,
            total_bytes: CAP * MAX_BYTES,
            used_bytes,
            high_water_bytes: self.high_water_bytes,
        }
    }

    /// Snapshots `sim` as the next frame, becoming offset `0`. Checks
    /// `byte_size()` against `MAX_BYTES` before touching any slot — a
    /// rejected save leaves the ring in exactly its prior state, never
    /// a partial copy.
    pub fn save(&mut self, sim: &Sim) -> Result<(), RollbackError> {
        let size = sim.byte_size();
        if size > MAX_BYTES {
            return Err(RollbackError::FrameTooLarge { size, max: MAX_BYTES });
        }
        let slot = (self.frames_written % CAP as u64) as usize;
        self.slots[slot].copy_from(sim);
        self.slot_bytes[slot] = size;
        self.frames_written += 1;
        if size > self.high_water_bytes {
            self.high_water_bytes = size;
        }
        Ok(())
    }

    /// Copies the snapshot at `slot_offset` (`0` = most recent) into
    /// `out`. Fails with `SlotOutOfRange` if no frame has been saved at
    /// that offset, or it has been evicted by ring wraparound.
    pub fn restore(&self, slot_offset: u64, out: &mut Sim) -> Result<(), RollbackError> {
        let slot = self.slot_for_offset(slot_offset)?;
        out.copy_from(&self.slots[slot]);
        Ok(())
    }

    /// In-place slot-to-slot copy: duplicates the frame at `src_offset`
    /// into the slot addressed by `dst_offset`, without advancing the
    /// head or requiring a fresh `save()`. Used when the engine
    /// predicts forward from a confirmed frame without rerunning
    /// systems.
    pub fn copy(&mut self, src_offset: u64, dst_offset: u64) -> Result<(), RollbackError> {
        let src_slot = self.slot_for_offset(src_offset)?;
        let dst_slot = self.slot_for_offset(dst_offset)?;
        if src_slot != dst_slot {
            let (lo, hi) = if src_slot < dst_slot { (src_slot, dst_slot) } else { (dst_slot, src_slot) };
            let (left, right) = self.slots.split_at_mut(hi);
            if src_slot < dst_slot {
                right[0].copy_from(&left[lo]);
            } else {
                left[lo].copy_from(&right[0]);
            }
        }
        self.slot_bytes[dst_slot] = self.slot_bytes[src_slot];
        Ok(())
    }

    /// Records `slot_offset` as the netcode's last-confirmed frame, for
    /// diagnostics only (C5): it never changes `save`/`restore`/`copy`
    /// behavior. Monotonic in absolute time; calling it with an offset
    /// that resolves to an already-confirmed or older frame is a no-op.
    pub fn confirm_frame(&mut self, slot_offset: u64) -> Result<(), RollbackError> {
        self.slot_for_offset(slot_offset)?;
        let abs_frame = self.frames_written - 1 - slot_offset;
        self.confirmed_frame = Some(match self.confirmed_frame {
            Some(existing) => existing.max(abs_frame),
            None => abs_frame,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simcore_bitset::BitSet64;
    use simcore_ecs::{add_component, create_entity, get_component, get_component_mut};

    #[derive(Clone, Copy, PartialEq, Debug)]
    struct Position {
        x: i32,
        y: i32,
    }

    simcore_ecs::define_world! {
        pub struct ToyWorld {
            bits: BitSet64,
            capacity: 64,
            components: {
                position: Position,
            }
        }
    }

    #[test]
    fn save_then_restore_reproduces_state_byte_for_byte() {
        let template = ToyWorld::new();
        let mut ring: RollbackRing<ToyWorld, 8, 65536> = RollbackRing::new(&template);

        let mut live = ToyWorld::new();
        let e = create_entity(&mut live).unwrap();
        add_component(&mut live, e, Position { x: 1, y: 1 }).unwrap();
        ring.save(&live).unwrap();

        get_component_mut::<ToyWorld, Position>(&mut live, e).unwrap().x = 999;
        ring.save(&live).unwrap();

        let mut restored = ToyWorld::new();
        ring.restore(1, &mut restored).unwrap();
        assert_eq!(
            get_component::<ToyWorld, Position>(&restored, e),
            Some(&Position { x: 1, y: 1 })
        );

        ring.restore(0, &mut restored).unwrap();
        assert_eq!(
            get_component::<ToyWorld, Position>(&restored, e),
            Some(&Position { x: 999, y: 1 })
        );
    }

    #[test]
    fn restoring_an_evicted_offset_is_an_error() {
        let template = ToyWorld::new();
        let mut ring: RollbackRing<ToyWorld, 4, 65536> = RollbackRing::new(&template);
        let world = ToyWorld::new();
        for _ in 0..10 {
            ring.save(&world).unwrap();
        }
        let mut out = ToyWorld::new();
        assert_eq!(ring.restore(4, &mut out), Err(RollbackError::SlotOutOfRange));
        assert!(ring.restore(3, &mut out).is_ok());
    }

    #[test]
    fn restoring_an_unsaved_offset_is_an_error() {
        let template = ToyWorld::new();
        let ring: RollbackRing<ToyWorld, 4, 65536> = RollbackRing::new(&template);
        let mut out = ToyWorld::new();
        assert_eq!(ring.restore(0, &mut out), Err(RollbackError::SlotOutOfRange));
    }

    #[test]
    fn oversized_frame_is_rejected_before_any_slot_is_touched() {
        let template = ToyWorld::new();
        let mut ring: RollbackRing<ToyWorld, 4, 8> = RollbackRing::new(&template);
        let world = ToyWorld::new();
        assert!(matches!(
            ring.save(&world),
            Err(RollbackError::FrameTooLarge { .. })
        ));
        assert_eq!(ring.stats().frames_stored, 0);
    }

    #[test]
    fn confirm_frame_is_a_diagnostic_marker_and_never_blocks_restore() {
        let template = ToyWorld::new();
        let mut ring: RollbackRing<ToyWorld, 8, 65536> = RollbackRing::new(&template);
        let world = ToyWorld::new();
        for _ in 0..3 {
            ring.save(&world).unwrap();
        }
        ring.confirm_frame(1).unwrap();
        let mut out = ToyWorld::new();
        assert!(ring.restore(0, &mut out).is_ok());
        assert!(ring.restore(1, &mut out).is_ok());
        assert!(ring.restore(2, &mut out).is_ok());
        assert_eq!(ring.confirm_frame(10), Err(RollbackError::SlotOutOfRange));
    }

    #[test]
    fn copy_duplicates_a_frame_into_another_slot_without_a_fresh_save() {
        let template = ToyWorld::new();
        let mut ring: RollbackRing<ToyWorld, 4, 65536> = RollbackRing::new(&template);

        let mut live = ToyWorld::new();
        let e = create_entity(&mut live).unwrap();
        add_component(&mut live, e, Position { x: 1, y: 1 }).unwrap();
        ring.save(&live).unwrap();

        get_component_mut::<ToyWorld, Position>(&mut live, e).unwrap().x = 2;
        ring.save(&live).unwrap();

        get_component_mut::<ToyWorld, Position>(&mut live, e).unwrap().x = 3;
        ring.save(&live).unwrap();

        // Overwrite the oldest stored frame (offset 2) with offset 0's content.
        ring.copy(0, 2).unwrap();

        let mut out = ToyWorld::new();
        ring.restore(2, &mut out).unwrap();
        assert_eq!(get_component::<ToyWorld, Position>(&out, e), Some(&Position { x: 3, y: 1 }));
    }

    #[test]
    fn stats_report_frames_stored_capped_at_capacity_and_byte_totals() {
        let template = ToyWorld::new();
        let mut ring: RollbackRing<ToyWorld, 4, 65536> = RollbackRing::new(&template);
        let mut world = ToyWorld::new();
        let e = create_entity(&mut world).unwrap();
        add_component(&mut world, e, Position { x: 0, y: 0 }).unwrap();
        for _ in 0..10 {
            ring.save(&world).unwrap();
        }
        let stats = ring.stats();
        assert_eq!(stats.frames_stored, 4);
        assert_eq!(stats.total_bytes, 4 * 65536);
        assert_eq!(stats.used_bytes, stats.frames_stored * world.byte_size());
        assert_eq!(stats.avg_frame_size_bytes, world.byte_size());
        assert_eq!(stats.high_water_bytes, world.byte_size());
    }
}
