use heapless::LinearMap;

/// Name of the bus failure counter
pub const COMMS_ERRORS: &str = "com_err";

/// Observability handle the driver reports into.
pub trait Perf {
    fn increment(&mut self, name: &'static str);
    fn count(&self, name: &'static str) -> u32;
}

/// Fixed-capacity set of named event counters.
///
/// Counters are never reset; a name that does not fit into the map is
/// dropped silently.
pub struct PerfCounters<const N: usize> {
    counters: LinearMap<&'static str, u32, N>,
}

impl<const N: usize> PerfCounters<N> {
    pub fn new() -> Self {
        Self {
            counters: LinearMap::new(),
        }
    }
}

impl<const N: usize> Default for PerfCounters<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Perf for PerfCounters<N> {
    fn increment(&mut self, name: &'static str) {
        if let Some(c) = self.counters.get_mut(&name) {
            *c = c.saturating_add(1);
        } else {
            let _ = self.counters.insert(name, 1);
        }
    }

    fn count(&self, name: &'static str) -> u32 {
        self.counters.get(&name).copied().unwrap_or(0)
    }
}
