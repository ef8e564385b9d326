use uuid::Uuid;

/// Stable identity of a carousel page.
///
/// Identity survives reordering and slot reuse; a full deck reload with new
/// page data produces new identities.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageId(pub Uuid);

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

impl PageId {
    pub fn new() -> Self {
        PageId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for PageId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for PageId {
    fn from(value: Uuid) -> Self {
        PageId(value)
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a reusable visual slot handed out by the host's list
/// virtualization layer. A slot may be rebound to a different page at any
/// time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotId(pub usize);

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}
