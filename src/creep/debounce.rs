/// The result of checking whether it is safe to stop creeping in one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearanceSignal {
    /// The vehicle is not yet close enough, nor has it waited long enough,
    /// for clearance to be checked.
    GateNotSatisfied,
    /// No obstacle is expected to conflict with the vehicle soon.
    Clear,
    /// At least one obstacle may conflict with the vehicle soon.
    Blocked,
}

/// Identifies the stop line being crept towards.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StopLineKey {
    /// The map overlap ID of the stop sign or traffic light.
    Overlap(String),
    /// A stop line without a known overlap.
    Unnamed,
}

/// Turns a noisy per-cycle clearance signal into a stable decision.
///
/// Fires once `threshold` consecutive [ClearanceSignal::Clear] samples have
/// been seen, then starts counting again from zero. A [ClearanceSignal::Blocked]
/// sample resets the count; [ClearanceSignal::GateNotSatisfied] leaves it alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceGate {
    count: u32,
    threshold: u32,
}

impl DebounceGate {
    pub fn new(threshold: u32) -> Self {
        Self {
            count: 0,
            threshold: threshold.max(1),
        }
    }

    /// The number of consecutive clear samples since the gate last fired or was reset.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Feeds one sample into the gate. Returns `true` iff the gate fires.
    pub fn observe(&mut self, signal: ClearanceSignal) -> bool {
        match signal {
            ClearanceSignal::GateNotSatisfied => false,
            ClearanceSignal::Blocked => {
                self.count = 0;
                false
            }
            ClearanceSignal::Clear if self.count + 1 >= self.threshold => {
                self.count = 0;
                true
            }
            ClearanceSignal::Clear => {
                self.count += 1;
                false
            }
        }
    }
}

/// A [DebounceGate] for the stop line currently being approached.
///
/// Moving to a different stop line starts a fresh count, so progress made
/// on an earlier approach never carries over to a later one.
#[derive(Clone, Debug)]
pub struct StopLineDebounce {
    threshold: u32,
    active: Option<(StopLineKey, DebounceGate)>,
}

impl StopLineDebounce {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            active: None,
        }
    }

    /// The stop line the count belongs to, if any.
    pub fn active(&self) -> Option<&StopLineKey> {
        self.active.as_ref().map(|(key, _)| key)
    }

    /// The current count for the given stop line.
    pub fn count(&self, key: &StopLineKey) -> u32 {
        match &self.active {
            Some((active, gate)) if active == key => gate.count(),
            _ => 0,
        }
    }

    /// Feeds one sample for the given stop line into the gate.
    /// Returns `true` iff the gate fires.
    pub fn observe(&mut self, key: &StopLineKey, signal: ClearanceSignal) -> bool {
        if self.active() != Some(key) {
            self.active = Some((key.clone(), DebounceGate::new(self.threshold)));
        }
        match &mut self.active {
            Some((_, gate)) => gate.observe(signal),
            None => false,
        }
    }

    /// Discards the count for the given stop line.
    pub fn forget(&mut self, key: &StopLineKey) {
        if self.active() == Some(key) {
            self.active = None;
        }
    }
}

#[cfg(test)]
mod test {
    use super::ClearanceSignal::*;
    use super::*;

    #[test]
    fn fires_on_fifth_clear_sample_only() {
        let mut gate = DebounceGate::new(5);
        for expected in 1..5 {
            assert!(!gate.observe(Clear));
            assert_eq!(gate.count(), expected);
        }
        assert!(gate.observe(Clear));
        assert_eq!(gate.count(), 0);

        // Counting starts again after firing
        assert!(!gate.observe(Clear));
        assert_eq!(gate.count(), 1);
    }

    #[test]
    fn blocked_sample_resets() {
        for prior in 0..5 {
            let mut gate = DebounceGate::new(5);
            for _ in 0..prior {
                gate.observe(Clear);
            }
            assert!(!gate.observe(Blocked));
            assert_eq!(gate.count(), 0);
        }
    }

    #[test]
    fn unmet_gate_leaves_count_unchanged() {
        let mut gate = DebounceGate::new(5);
        gate.observe(Clear);
        gate.observe(Clear);
        for _ in 0..10 {
            assert!(!gate.observe(GateNotSatisfied));
            assert_eq!(gate.count(), 2);
        }
        gate.observe(Clear);
        gate.observe(Clear);
        assert!(gate.observe(Clear));
    }

    #[test]
    fn threshold_of_one_fires_immediately() {
        let mut gate = DebounceGate::new(1);
        assert!(gate.observe(Clear));
        assert!(gate.observe(Clear));
        assert_eq!(gate.count(), 0);
    }

    #[test]
    fn new_stop_line_starts_from_zero() {
        let a = StopLineKey::Overlap("ss_a".to_owned());
        let b = StopLineKey::Overlap("ss_b".to_owned());
        let mut debounce = StopLineDebounce::new(3);

        debounce.observe(&a, Clear);
        debounce.observe(&a, Clear);
        assert_eq!(debounce.count(&a), 2);

        assert!(!debounce.observe(&b, Clear));
        assert_eq!(debounce.active(), Some(&b));
        assert_eq!(debounce.count(&a), 0);
        assert_eq!(debounce.count(&b), 1);

        // Coming back to the first stop line does not resume its old count
        assert!(!debounce.observe(&a, Clear));
        assert!(!debounce.observe(&a, Clear));
        assert!(debounce.observe(&a, Clear));
    }

    #[test]
    fn changing_stop_line_resets_even_when_gate_unmet() {
        let a = StopLineKey::Overlap("ss_a".to_owned());
        let mut debounce = StopLineDebounce::new(3);
        debounce.observe(&a, Clear);
        debounce.observe(&a, Clear);

        assert!(!debounce.observe(&StopLineKey::Unnamed, GateNotSatisfied));
        assert!(!debounce.observe(&a, Clear));
        assert_eq!(debounce.count(&a), 1);

        debounce.forget(&StopLineKey::Unnamed);
        assert_eq!(debounce.active(), Some(&a));
        debounce.forget(&a);
        assert_eq!(debounce.active(), None);
    }
}
