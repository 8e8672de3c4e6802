//! Object table and the cascading reclamation pass.

use ahash::RandomState;
use hashbrown::{HashMap, HashSet};

use crate::errors::{HandleRole, TrackerError, TrackerResult};
use crate::handle::Handle;

pub(crate) type FastHashMap<K, V> = HashMap<K, V, RandomState>;
pub(crate) type FastHashSet<T> = HashSet<T, RandomState>;

/// Per-object bookkeeping.
struct ObjectRecord {
    /// Identifiers this object references. A set: duplicate edges collapse.
    outgoing: FastHashSet<usize>,
    /// External holders keeping this object alive. Starts at 1; the
    /// allocator counts as the first implicit holder.
    root_count: usize,
    /// Live graph edges currently pointing at this object.
    in_degree: usize,
    /// Informational allocation size; never consulted by the algorithm.
    size: usize,
}

impl ObjectRecord {
    fn new(size: usize) -> Self {
        Self {
            outgoing: FastHashSet::default(),
            root_count: 1,
            in_degree: 0,
            size,
        }
    }

    /// An orphan has no external holders and no incoming graph edges.
    /// Only orphans are eligible for reclamation.
    fn is_orphan(&self) -> bool {
        self.root_count == 0 && self.in_degree == 0
    }
}

/// Owns the table of live objects and runs cascading reclamation.
///
/// Fully synchronous and caller-driven: reclamation happens only inside an
/// explicit [`collect`](Tracker::collect) call, never as a side effect of a
/// reference-count change. A multithreaded host must treat every operation
/// as a critical section.
pub struct Tracker {
    objects: FastHashMap<usize, ObjectRecord>,
    next_id: usize,
}

impl Tracker {
    pub fn new() -> Self {
        Self {
            objects: FastHashMap::default(),
            next_id: 0,
        }
    }

    /// Allocate a new tracked object under a fresh, never-reused identifier.
    ///
    /// The new object starts with a root count of 1 and no graph edges.
    /// `size` is recorded for the live-bytes statistic only.
    pub fn allocate(&mut self, size: usize) -> Handle {
        let id = self.next_id;
        self.next_id += 1;
        self.objects.insert(id, ObjectRecord::new(size));
        log::trace!("allocated object {id} ({size} bytes)");
        Handle::new(id)
    }

    /// Declare one more external holder of the object.
    pub fn increase_root_count(&mut self, handle: Handle) -> TrackerResult<()> {
        let record = self.lookup_mut(handle, HandleRole::Operand)?;
        record.root_count += 1;
        Ok(())
    }

    /// Release one external holder of the object.
    ///
    /// Does not trigger reclamation; an object whose root count reaches zero
    /// stays in the table until the next [`collect`](Tracker::collect) call.
    /// Releasing a holder the object does not have is a caller bug and is
    /// rejected with [`TrackerError::NegativeRootCount`], leaving the record
    /// untouched.
    pub fn decrease_root_count(&mut self, handle: Handle) -> TrackerResult<()> {
        let record = self.lookup_mut(handle, HandleRole::Operand)?;
        if record.root_count == 0 {
            return Err(TrackerError::NegativeRootCount { id: handle.id() });
        }
        record.root_count -= 1;
        Ok(())
    }

    /// Establish a graph edge from `from` to `to`.
    ///
    /// Idempotent: the outgoing set deduplicates, and only a newly inserted
    /// edge bumps the target's in-degree. Both handles are validated before
    /// any mutation, with the error naming the side that failed.
    pub fn refer_to(&mut self, from: Handle, to: Handle) -> TrackerResult<()> {
        if !self.objects.contains_key(&from.id()) {
            return Err(TrackerError::UnknownObject {
                id: from.id(),
                role: HandleRole::Referer,
            });
        }
        if !self.objects.contains_key(&to.id()) {
            return Err(TrackerError::UnknownObject {
                id: to.id(),
                role: HandleRole::Referee,
            });
        }
        let newly_inserted = self
            .objects
            .get_mut(&from.id())
            .is_some_and(|record| record.outgoing.insert(to.id()));
        if newly_inserted {
            if let Some(record) = self.objects.get_mut(&to.id()) {
                record.in_degree += 1;
            }
        }
        Ok(())
    }

    /// Reclaim every object that is (or becomes) an orphan, cascading along
    /// the reference graph.
    ///
    /// Seeds a work-list with all current orphans, then pops LIFO: removing
    /// an object decrements the in-degree of each neighbor it referenced,
    /// and a neighbor that just became an orphan joins the work-list. The
    /// returned identifiers are in reclamation order.
    ///
    /// Objects on a reference cycle with no zero-in-degree entry point are
    /// never reclaimed: each cycle member keeps a nonzero in-degree from its
    /// cycle-mate. This is a documented limitation of the in-degree model,
    /// not a bug.
    pub fn collect(&mut self) -> Vec<usize> {
        let mut worklist: Vec<usize> = self
            .objects
            .iter()
            .filter(|(_, record)| record.is_orphan())
            .map(|(&id, _)| id)
            .collect();
        // The table iterates in a randomly seeded order; sort the seeds so
        // the reclamation trace is reproducible run to run.
        worklist.sort_unstable();

        let mut reclaimed = Vec::new();
        while let Some(id) = worklist.pop() {
            let Some(record) = self.objects.remove(&id) else {
                continue;
            };
            for adj in record.outgoing {
                if let Some(neighbor) = self.objects.get_mut(&adj) {
                    neighbor.in_degree -= 1;
                    if neighbor.is_orphan() {
                        worklist.push(adj);
                    }
                }
            }
            log::debug!("erasing object {id}");
            reclaimed.push(id);
        }
        reclaimed
    }

    /// Whether the handle still names a live object.
    pub fn contains(&self, handle: Handle) -> bool {
        self.objects.contains_key(&handle.id())
    }

    pub fn root_count(&self, handle: Handle) -> TrackerResult<usize> {
        Ok(self.lookup(handle, HandleRole::Operand)?.root_count)
    }

    pub fn in_degree(&self, handle: Handle) -> TrackerResult<usize> {
        Ok(self.lookup(handle, HandleRole::Operand)?.in_degree)
    }

    /// The informational size recorded at allocation.
    pub fn size_of(&self, handle: Handle) -> TrackerResult<usize> {
        Ok(self.lookup(handle, HandleRole::Operand)?.size)
    }

    /// Number of live objects in the table.
    pub fn live_count(&self) -> usize {
        self.objects.len()
    }

    /// Sum of the informational sizes of all live objects.
    pub fn live_bytes(&self) -> usize {
        self.objects.values().map(|record| record.size).sum()
    }

    fn lookup(&self, handle: Handle, role: HandleRole) -> TrackerResult<&ObjectRecord> {
        self.objects.get(&handle.id()).ok_or(TrackerError::UnknownObject {
            id: handle.id(),
            role,
        })
    }

    fn lookup_mut(&mut self, handle: Handle, role: HandleRole) -> TrackerResult<&mut ObjectRecord> {
        self.objects
            .get_mut(&handle.id())
            .ok_or(TrackerError::UnknownObject {
                id: handle.id(),
                role,
            })
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}
