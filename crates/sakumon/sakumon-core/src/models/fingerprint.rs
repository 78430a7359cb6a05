use serde::{Deserialize, Serialize};

/// Cheap corpus summary used to detect inserts and deletes without a re-scan.
///
/// Content edits that keep the id set intact do not change the fingerprint;
/// callers force a refresh after in-place text edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Fingerprint {
    pub row_count: i64,
    pub id_sum: i64,
    pub max_id: i64,
}

impl Fingerprint {
    pub fn new(row_count: i64, id_sum: i64, max_id: i64) -> Self {
        Self {
            row_count,
            id_sum,
            max_id,
        }
    }

    /// Fingerprint of an id list, as the aggregate query would compute it.
    pub fn of_ids(ids: &[i64]) -> Self {
        Self {
            row_count: ids.len() as i64,
            id_sum: ids.iter().sum(),
            max_id: ids.iter().copied().max().unwrap_or(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.row_count, self.id_sum, self.max_id)
    }
}
