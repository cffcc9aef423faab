//! Course catalog types.

use std::ops::RangeInclusive;

/// Which catalog a course row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    /// Courses students list as completed prerequisites.
    Prerequisite,
    /// Courses students may plan for the advising term.
    Plan,
}

/// Levels shown on the admin prerequisite screen.
pub const PREREQUISITE_LEVELS: RangeInclusive<i32> = 100..=499;
