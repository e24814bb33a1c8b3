/******************************************************************************
 *                                                                            *
 * Defines the textual grid template that describes a container's layout.     *
 * A template is a list of rows; every character is a symbol naming the kind *
 * of slot at that position. Provides the shape queries and the row-major    *
 * scan that the index resolver builds on.                                   *
 *                                                                            *
 ******************************************************************************/

use serde::{Deserialize, Serialize};

use crate::error::{AnemoneError, Result};

// --- Container Geometry ---
pub const CHEST_WIDTH: usize = 9;
pub const MAX_CHEST_ROWS: usize = 6;
pub const GRID_3X3_SIDE: usize = 3;

/// The kind of physical container a template is displayed in.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// The small 3x3 container type.
    Grid3x3,
    /// A standard chest with 3 or 6 rows of 9.
    Chest { rows: usize },
    /// No named type exists; the host allocates a container by slot count.
    Sized { slots: usize },
}

impl ContainerKind {
    /// Number of physical slots in a container of this kind.
    pub fn size(&self) -> usize {
        match self {
            ContainerKind::Grid3x3 => GRID_3X3_SIDE * GRID_3X3_SIDE,
            ContainerKind::Chest { rows } => CHEST_WIDTH * rows,
            ContainerKind::Sized { slots } => *slots,
        }
    }
}

/// Width (longest row) and height (row count) of a template.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    pub width: usize,
    pub height: usize,
}

impl Shape {
    pub fn capacity(&self) -> usize {
        self.width * self.height
    }

    /// Classifies the shape into a container kind.
    ///
    /// An empty template is legal and yields a zero-slot container. Any other
    /// shape outside the supported set is a configuration error.
    pub fn kind(&self) -> Result<ContainerKind> {
        match (self.width, self.height) {
            (0, 0) => Ok(ContainerKind::Sized { slots: 0 }),
            (GRID_3X3_SIDE, GRID_3X3_SIDE) => Ok(ContainerKind::Grid3x3),
            (CHEST_WIDTH, rows @ (3 | 6)) => Ok(ContainerKind::Chest { rows }),
            (CHEST_WIDTH, rows) if rows <= MAX_CHEST_ROWS => Ok(ContainerKind::Sized {
                slots: CHEST_WIDTH * rows,
            }),
            (width, height) => Err(AnemoneError::UnsupportedShape { width, height }),
        }
    }
}

/// An immutable grid template.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct Template {
    rows: Vec<String>,
}

impl Template {
    pub fn new<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Template {
            rows: rows.into_iter().map(Into::into).collect(),
        }
    }

    pub fn empty() -> Self {
        Template::default()
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn shape(&self) -> Shape {
        let width = self
            .rows
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0);
        Shape {
            width,
            height: self.rows.len(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.shape().capacity()
    }

    pub fn kind(&self) -> Result<ContainerKind> {
        self.shape().kind()
    }

    /// Row-major scan over `(slot, symbol)` pairs, rows concatenated in order.
    ///
    /// Every other query on the template is expressed in terms of this scan.
    pub fn cells(&self) -> Cells<'_> {
        Cells {
            rows: self.rows.iter(),
            current: None,
            slot: 0,
        }
    }

    /// Number of times `symbol` appears anywhere in the template.
    pub fn count_of(&self, symbol: char) -> usize {
        self.cells().filter(|&(_, c)| c == symbol).count()
    }

    /// The symbol occupying `slot`, or `None` past the end of the template.
    pub fn symbol_at(&self, slot: usize) -> Option<char> {
        if slot >= self.capacity() {
            return None;
        }
        self.cells()
            .find(|&(current, _)| current == slot)
            .map(|(_, symbol)| symbol)
    }

    /// Occurrences of `symbol` strictly before `slot`.
    pub fn occurrences_before(&self, slot: usize, symbol: char) -> usize {
        self.cells()
            .take_while(|&(current, _)| current < slot)
            .filter(|&(_, c)| c == symbol)
            .count()
    }
}

impl<S: Into<String>> FromIterator<S> for Template {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Template::new(iter)
    }
}

impl From<Vec<String>> for Template {
    fn from(rows: Vec<String>) -> Self {
        Template { rows }
    }
}

impl From<&[&str]> for Template {
    fn from(rows: &[&str]) -> Self {
        Template::new(rows.iter().copied())
    }
}

/// Iterator returned by [`Template::cells`].
#[derive(Debug, Clone)]
pub struct Cells<'t> {
    rows: std::slice::Iter<'t, String>,
    current: Option<std::str::Chars<'t>>,
    slot: usize,
}

impl Iterator for Cells<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(symbol) = self.current.as_mut().and_then(Iterator::next) {
                let slot = self.slot;
                self.slot += 1;
                return Some((slot, symbol));
            }
            self.current = Some(self.rows.next()?.chars());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Template {
        Template::new(["AAB", "AAB", "CCC"])
    }

    #[test]
    fn shape_of_sample() {
        let template = sample();
        assert_eq!(template.shape(), Shape { width: 3, height: 3 });
        assert_eq!(template.capacity(), 9);
        assert_eq!(template.kind(), Ok(ContainerKind::Grid3x3));
    }

    #[test]
    fn counts_and_lookups() {
        let template = sample();
        assert_eq!(template.count_of('A'), 4);
        assert_eq!(template.count_of('B'), 2);
        assert_eq!(template.count_of('C'), 3);
        assert_eq!(template.count_of('Z'), 0);
        assert_eq!(template.symbol_at(2), Some('B'));
        assert_eq!(template.symbol_at(8), Some('C'));
        assert_eq!(template.symbol_at(9), None);
        assert_eq!(template.occurrences_before(2, 'A'), 2);
        assert_eq!(template.occurrences_before(3, 'A'), 2);
        assert_eq!(template.occurrences_before(4, 'A'), 3);
    }

    #[test]
    fn classification_table() {
        let kind = |width, height| Shape { width, height }.kind();
        assert_eq!(kind(0, 0), Ok(ContainerKind::Sized { slots: 0 }));
        assert_eq!(kind(3, 3), Ok(ContainerKind::Grid3x3));
        assert_eq!(kind(9, 3), Ok(ContainerKind::Chest { rows: 3 }));
        assert_eq!(kind(9, 6), Ok(ContainerKind::Chest { rows: 6 }));
        assert_eq!(kind(9, 1), Ok(ContainerKind::Sized { slots: 9 }));
        assert_eq!(kind(9, 4), Ok(ContainerKind::Sized { slots: 36 }));
        assert_eq!(
            kind(9, 7),
            Err(AnemoneError::UnsupportedShape { width: 9, height: 7 })
        );
        assert_eq!(
            kind(3, 2),
            Err(AnemoneError::UnsupportedShape { width: 3, height: 2 })
        );
        assert_eq!(
            kind(5, 5),
            Err(AnemoneError::UnsupportedShape { width: 5, height: 5 })
        );
    }

    #[test]
    fn ragged_rows_use_longest_row_for_width() {
        let template = Template::new(["XXXXXXXXX", "XX"]);
        assert_eq!(template.shape(), Shape { width: 9, height: 2 });
        assert_eq!(template.capacity(), 18);
        // Rows are concatenated, so slot 10 is the last symbol and 11.. are empty.
        assert_eq!(template.symbol_at(10), Some('X'));
        assert_eq!(template.symbol_at(11), None);
        assert_eq!(template.cells().count(), 11);
    }

    #[test]
    fn empty_template() {
        let template = Template::empty();
        assert!(template.is_empty());
        assert_eq!(template.shape(), Shape::default());
        assert_eq!(template.symbol_at(0), None);
        assert_eq!(template.cells().next(), None);
    }

    #[test]
    fn multibyte_symbols_count_as_one_slot() {
        let template = Template::new(["ééé", "ééé", "ééé"]);
        assert_eq!(template.shape(), Shape { width: 3, height: 3 });
        assert_eq!(template.symbol_at(4), Some('é'));
    }
}
