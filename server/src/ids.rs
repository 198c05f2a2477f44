/// Allocates identifiers for clients, ships, projectiles and stars.
///
/// Ids count up from zero and wrap back to zero once they reach `i32::MAX`,
/// matching the long-standing wire behavior clients expect. After ~2^31
/// allocations an id can therefore collide with a live entity; accepted and
/// documented rather than changed, since ids land on the wire as plain ints.
#[derive(Debug)]
pub struct IdAllocator {
    current: i32,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator { current: -1 }
    }

    /// Returns the next id, wrapping to zero at `i32::MAX`.
    pub fn next(&mut self) -> i32 {
        if self.current == i32::MAX {
            self.current = 0;
        } else {
            self.current += 1;
        }
        self.current
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        IdAllocator::new()
    }
}
