//! Visual test cases organized by category

pub mod borders;
pub mod layout;

use crate::runner::TestSuite;

/// Create all test suites
pub fn all_suites() -> Vec<TestSuite> {
    vec![
        shapes::suite(),
        borders::suite(),
        shadows::suite(),
        textures::suite(),
        layout::suite(),
    ]
}
