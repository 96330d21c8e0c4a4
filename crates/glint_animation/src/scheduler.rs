//! Instance scheduler
//!
//! Owns a population of animation instances and fans one host tick out
//! to all of them. The scheduler never reads the clock; the host hands
//! it the timestamp, which keeps a whole population deterministic
//! under test and leaves frame pacing to the embedder.

use crate::instance::{AnimationInstance, PlaybackState};
use slotmap::{new_key_type, SlotMap};
use std::time::Instant;

new_key_type! {
    /// Generational handle for an instance owned by a [`Scheduler`].
    pub struct InstanceId;
}

pub struct Scheduler {
    instances: SlotMap<InstanceId, AnimationInstance>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            instances: SlotMap::with_key(),
        }
    }

    pub fn add(&mut self, instance: AnimationInstance) -> InstanceId {
        self.instances.insert(instance)
    }

    pub fn get(&self, id: InstanceId) -> Option<&AnimationInstance> {
        self.instances.get(id)
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut AnimationInstance> {
        self.instances.get_mut(id)
    }

    pub fn remove(&mut self, id: InstanceId) -> Option<AnimationInstance> {
        self.instances.remove(id)
    }

    /// Advance every instance to `now`.
    pub fn tick(&mut self, now: Instant) {
        for (_, instance) in self.instances.iter_mut() {
            instance.tick(now);
        }
    }

    /// True while any instance is Running or Paused.
    pub fn has_active(&self) -> bool {
        self.instances.iter().any(|(_, i)| is_active(i))
    }

    pub fn active_count(&self) -> usize {
        self.instances.iter().filter(|(_, i)| is_active(i)).count()
    }

    /// Drop every Finished instance; returns how many were removed.
    pub fn prune_finished(&mut self) -> usize {
        let before = self.instances.len();
        self.instances.retain(|_, instance| !instance.is_finished());
        before - self.instances.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (InstanceId, &AnimationInstance)> {
        self.instances.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (InstanceId, &mut AnimationInstance)> {
        self.instances.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_active(instance: &AnimationInstance) -> bool {
    matches!(
        instance.state(),
        PlaybackState::Running | PlaybackState::Paused
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn instance(duration_ms: u64) -> AnimationInstance {
        AnimationInstance::new(Duration::from_millis(duration_ms), Curve::Linear).unwrap()
    }

    #[test]
    fn test_tick_drives_every_instance() {
        let mut scheduler = Scheduler::new();
        let frames = Arc::new(Mutex::new(Vec::new()));

        let t0 = Instant::now();
        for (label, duration) in [("short", 100), ("long", 200)] {
            let mut inst = instance(duration);
            let frames_clone = frames.clone();
            inst.on_frame(move |p| frames_clone.lock().unwrap().push((label, p)));
            inst.start(t0);
            scheduler.add(inst);
        }

        scheduler.tick(t0 + Duration::from_millis(50));
        let recorded = frames.lock().unwrap().clone();
        assert_eq!(recorded.len(), 2);
        assert!(recorded.contains(&("short", 0.5)));
        assert!(recorded.contains(&("long", 0.25)));
    }

    #[test]
    fn test_active_tracking_and_prune() {
        let mut scheduler = Scheduler::new();
        let t0 = Instant::now();

        let mut short = instance(100);
        short.start(t0);
        let short_id = scheduler.add(short);

        let mut long = instance(500);
        long.start(t0);
        scheduler.add(long);

        assert_eq!(scheduler.active_count(), 2);

        scheduler.tick(t0 + Duration::from_millis(100));
        assert!(scheduler.get(short_id).unwrap().is_finished());
        assert_eq!(scheduler.active_count(), 1);
        assert!(scheduler.has_active());

        assert_eq!(scheduler.prune_finished(), 1);
        assert_eq!(scheduler.len(), 1);
        assert!(scheduler.get(short_id).is_none());
    }

    #[test]
    fn test_remove_hands_back_the_instance() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.add(instance(100));
        assert_eq!(scheduler.len(), 1);

        let removed = scheduler.remove(id).unwrap();
        assert_eq!(removed.duration(), Duration::from_millis(100));
        assert!(scheduler.is_empty());
        assert!(scheduler.remove(id).is_none());
    }

    #[test]
    fn test_idle_instances_are_not_active() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.add(instance(100));
        assert!(!scheduler.has_active());

        scheduler.get_mut(id).unwrap().start(Instant::now());
        assert!(scheduler.has_active());
    }
}
