//! Node identity allocation.
//!
//! Every [`crate::node::Node`] carries a stable integer uid so that links and
//! serialized graphs can refer to it. Uids come from a [`UidAllocator`] owned
//! by the application (typically one per process, but tests create their own),
//! never from hidden global state — this keeps allocation deterministic and
//! resettable.

/// A node identifier. Always `>= 1`; `0` is never allocated.
pub type Uid = u64;

/// Monotonically increasing uid source.
///
/// `force` is used on deserialization to re-register uids read from storage:
/// it advances the counter past the forced value so later allocations can
/// never collide with any uid ever handed out.
///
/// # Example
///
/// ```
/// use blueprint_editor::UidAllocator;
///
/// let mut uids = UidAllocator::new();
/// assert_eq!(uids.next(), 1);
/// assert_eq!(uids.next(), 2);
/// uids.force(50);
/// assert_eq!(uids.next(), 51);
/// ```
#[derive(Clone, Debug)]
pub struct UidAllocator {
    next: Uid,
}

impl Default for UidAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl UidAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next uid.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Uid {
        let uid = self.next;
        self.next += 1;
        uid
    }

    /// Register an externally supplied uid (e.g. read from a saved graph)
    /// and keep the counter above it.
    pub fn force(&mut self, uid: Uid) {
        if self.next <= uid {
            self.next = uid + 1;
        }
    }

    /// Restart allocation from 1. Meant for tests and fresh documents.
    pub fn reset(&mut self) {
        self.next = 1;
    }
}
