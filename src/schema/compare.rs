//! Structural schema equivalence.
//!
//! A server holding a reference schema uses this check to refuse payloads
//! declared against an incompatible schema before touching the payload body.

use super::types::Schema;

impl Schema {
    /// Checks whether `candidate` is structurally equivalent to this schema.
    ///
    /// Version and column names compare case-insensitively; the delimiter and
    /// column types compare exactly; column counts and every per-index
    /// length/precision/scale must match. Any single mismatch rejects the
    /// candidate, there is no partial acceptance.
    pub fn is_valid(&self, candidate: &Schema) -> bool {
        if !self.version.eq_ignore_ascii_case(&candidate.version) {
            return false;
        }

        if self.with_header != candidate.with_header {
            return false;
        }

        if self.delimiter != candidate.delimiter {
            return false;
        }

        if self.columns.len() != candidate.columns.len() {
            return false;
        }

        for (ours, theirs) in self.columns.iter().zip(&candidate.columns) {
            if !ours.name.eq_ignore_ascii_case(&theirs.name) {
                return false;
            }
            if ours.column_type != theirs.column_type {
                return false;
            }
            if ours.length != theirs.length {
                return false;
            }
            if ours.precision != theirs.precision {
                return false;
            }
            if ours.scale != theirs.scale {
                return false;
            }
        }

        true
    }
}
