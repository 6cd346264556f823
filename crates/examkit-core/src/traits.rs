//! Capabilities shared by the question and exam families.

/// Produces the display lines for a value, one entry per printed line.
pub trait Render {
    fn render(&self) -> Vec<String>;
}

/// Produces an independent deep copy.
///
/// Unlike `Clone`, a duplicate may differ from its source where identity
/// matters: exam duplicates get fresh question ids.
pub trait Duplicate {
    fn duplicate(&self) -> Self;
}
